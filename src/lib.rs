//! ironlog - workout tracking with progress stats and gamification
//!
//! ironlog keeps a history of completed workouts and derives everything else
//! from it: lifted volume, personal records, streaks, per-exercise progress,
//! XP, levels and achievements.
//!
//! ## Layout
//!
//! - [`domain`]: plans, exercises, sets, profile and planner types
//! - [`stats`]: the pure computation engine and the [`stats::Tracker`] facade
//! - [`session`]: set-by-set tracking of a workout in progress
//! - [`store`]: key-value persistence (SQLite or in-memory)
//! - [`config`]: `~/.ironlog/config.toml`

pub mod cli;
pub mod config;
pub mod domain;
pub mod session;
pub mod stats;
pub mod store;

pub use domain::*;
