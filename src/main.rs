use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ironlog::cli::{self, prefs::PrefsUpdate, AppContext};
use ironlog::domain::{DayOfWeek, FitnessLevel, TrainingLocation};
use ironlog::stats::achievements::BoardFilter;

#[derive(Parser)]
#[command(name = "ironlog")]
#[command(about = "Workout log with progress tracking, records and achievements")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.ironlog/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database (overrides [storage] in the config)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON where supported
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Track a workout in progress
    #[command(subcommand)]
    Session(SessionCommand),

    /// Append an already completed workout from a file
    Record { file: PathBuf },

    /// Show totals, streak and time trained
    Stats,

    /// Show the profile and personal records
    Profile,

    /// Show per-exercise max weight over time
    Progress {
        /// Only this exercise, with its full series
        #[arg(long)]
        exercise: Option<String>,
    },

    /// List achievements
    Achievements {
        /// all, unlocked or locked
        #[arg(long, default_value = "all")]
        filter: BoardFilter,
    },

    /// Manage custom plans and the weekly schedule
    #[command(subcommand)]
    Plan(PlanCommand),

    /// Workout generation preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Start a session from a plan file or a stored custom plan
    Start {
        file: Option<PathBuf>,
        /// Id of a custom plan
        #[arg(long, conflicts_with = "file")]
        custom: Option<String>,
    },
    /// Show the session
    Show,
    /// Log weight (and reps) on a set
    Log {
        exercise: usize,
        set: usize,
        weight: String,
        reps: Option<String>,
    },
    /// Toggle a set's checked mark
    Check { exercise: usize, set: usize },
    /// Add one set to an exercise
    AddSet { exercise: usize },
    /// Replace an exercise with one from a file
    Replace { exercise: usize, file: PathBuf },
    /// Go to the next exercise
    Next,
    /// Go to the previous exercise
    Prev,
    /// Finish and record the session
    Finish,
    /// Discard the session
    Cancel,
}

#[derive(Subcommand)]
enum PlanCommand {
    /// List plans and the week
    List,
    /// Import a custom plan from a file
    Import { file: PathBuf },
    /// Delete a plan (also removes it from the week)
    Delete { id: String },
    /// Schedule a plan on a day
    Assign { day: DayOfWeek, id: String },
    /// Clear a day
    Unassign { day: DayOfWeek },
    /// Show today's plan
    Today,
    /// Replace all plans and the week with a generated weekly plan
    ApplyWeekly { file: PathBuf },
}

#[derive(Subcommand)]
enum PrefsCommand {
    /// Show stored preferences
    Show,
    /// Update stored preferences
    Set {
        #[arg(long)]
        level: Option<FitnessLevel>,
        #[arg(long)]
        location: Option<TrainingLocation>,
        /// Comma-separated list
        #[arg(long, value_delimiter = ',')]
        equipment: Option<Vec<String>>,
        /// Minutes
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        focus: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let json = cli.json;
    match cli.command {
        Commands::Init { force } => {
            let path = cli::config_path_or_default(cli.config.as_ref());
            cli::init::init_command(&path, force)
        }
        command => {
            let ctx = AppContext::open(cli.config.as_deref(), cli.db.as_deref())?;
            run(&ctx, command, json)
        }
    }
}

fn run(ctx: &AppContext, command: Commands, json: bool) -> Result<()> {
    match command {
        // needs no store; handled in main
        Commands::Init { .. } => {}
        Commands::Session(cmd) => match cmd {
            SessionCommand::Start { file, custom } => {
                cli::session::start_command(ctx, file.as_deref(), custom.as_deref())?
            }
            SessionCommand::Show => cli::session::show_command(ctx)?,
            SessionCommand::Log {
                exercise,
                set,
                weight,
                reps,
            } => cli::session::log_command(ctx, exercise, set, &weight, reps)?,
            SessionCommand::Check { exercise, set } => {
                cli::session::check_command(ctx, exercise, set)?
            }
            SessionCommand::AddSet { exercise } => cli::session::add_set_command(ctx, exercise)?,
            SessionCommand::Replace { exercise, file } => {
                cli::session::replace_command(ctx, exercise, &file)?
            }
            SessionCommand::Next => cli::session::next_command(ctx)?,
            SessionCommand::Prev => cli::session::prev_command(ctx)?,
            SessionCommand::Finish => cli::session::finish_command(ctx, json)?,
            SessionCommand::Cancel => cli::session::cancel_command(ctx)?,
        },
        Commands::Record { file } => cli::record::record_command(ctx, &file, json)?,
        Commands::Stats => cli::report::stats_command(ctx, json)?,
        Commands::Profile => cli::report::profile_command(ctx, json)?,
        Commands::Progress { exercise } => {
            cli::report::progress_command(ctx, exercise.as_deref(), json)?
        }
        Commands::Achievements { filter } => cli::report::achievements_command(ctx, filter, json)?,
        Commands::Plan(cmd) => match cmd {
            PlanCommand::List => cli::plan::list_command(ctx, json)?,
            PlanCommand::Import { file } => cli::plan::import_command(ctx, &file)?,
            PlanCommand::Delete { id } => cli::plan::delete_command(ctx, &id)?,
            PlanCommand::Assign { day, id } => cli::plan::assign_command(ctx, day, &id)?,
            PlanCommand::Unassign { day } => cli::plan::unassign_command(ctx, day)?,
            PlanCommand::Today => cli::plan::today_command(ctx)?,
            PlanCommand::ApplyWeekly { file } => cli::plan::apply_weekly_command(ctx, &file)?,
        },
        Commands::Prefs(cmd) => match cmd {
            PrefsCommand::Show => cli::prefs::prefs_show_command(ctx, json)?,
            PrefsCommand::Set {
                level,
                location,
                equipment,
                duration,
                focus,
            } => cli::prefs::prefs_set_command(
                ctx,
                PrefsUpdate {
                    level,
                    location,
                    equipment,
                    duration,
                    focus,
                },
            )?,
        },
    }

    Ok(())
}
