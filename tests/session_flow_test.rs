//! A full session: start, log sets, persist between steps, finish

mod common;

use chrono::Duration;
use common::{exercise, local_noon, temp_store, today, workout_on};
use ironlog::domain::{Exercise, WorkoutPlan};
use ironlog::session::{ActiveSession, SessionError};
use ironlog::stats::achievements::GamificationRules;
use ironlog::stats::Tracker;

fn leg_day() -> WorkoutPlan {
    WorkoutPlan {
        title: "Pernas A".to_string(),
        duration: 0,
        focus: "Pernas".to_string(),
        exercises: vec![
            Exercise {
                id: "agachamento".to_string(),
                name: "Agachamento Livre".to_string(),
                sets: "3 séries".to_string(),
                reps: "8-12".to_string(),
                ..Default::default()
            },
            Exercise {
                id: "leg".to_string(),
                name: "Leg Press".to_string(),
                sets: "2".to_string(),
                reps: "12".to_string(),
                ..Default::default()
            },
        ],
    }
}

#[test]
fn test_session_roundtrip_through_store() {
    let (_dir, store) = temp_store();
    let tracker = Tracker::new(&store, GamificationRules::default());
    let repo = tracker.repository();

    // previous leg day to compare against
    tracker
        .append_workout_on(
            workout_on(today() - Duration::days(3), "Pernas", vec![exercise("Agachamento Livre", &["90"])]),
            today() - Duration::days(3),
        )
        .unwrap();

    let started = local_noon(today());
    let session = ActiveSession::start(leg_day(), started, 3).unwrap();
    repo.save_active_session(&session).unwrap();

    // each step reloads, as separate CLI invocations would
    let mut session = repo.active_session().unwrap().expect("session saved");
    let history = tracker.history().unwrap();
    let last = session.last_performance(&history).expect("previous squat");
    assert_eq!(last[0].weight, "90");

    session.log_set(0, 0, "100", None).unwrap();
    session.log_set(0, 1, "100", Some("8".to_string())).unwrap();
    assert_eq!(session.add_set(0).unwrap(), 4);
    assert_eq!(session.plan.exercises[0].sets, "4 séries");
    repo.save_active_session(&session).unwrap();

    let mut session = repo.active_session().unwrap().expect("session saved");
    assert!(session.advance());
    assert!(!session.advance());
    session.log_set(1, 0, "200", None).unwrap();
    assert_eq!(
        session.log_set(1, 5, "200", None),
        Err(SessionError::SetOutOfRange {
            exercise: "Leg Press".to_string(),
            index: 5,
            len: 2,
        })
    );

    let workout = session.finish(started + Duration::minutes(50), 45);
    assert_eq!(workout.plan.duration, 45);
    assert_eq!(workout.plan.exercises[0].logged_sets().len(), 4);

    let outcome = tracker.append_workout_on(workout, today()).unwrap();
    repo.clear_active_session().unwrap();

    let squat = &outcome.summary.exercises[0];
    assert!(squat.is_new_pr);
    assert_eq!(squat.weight_delta(), Some(10.0));
    // squat falls back to the plan's "8-12" -> 8 reps; leg press 200x12
    assert_eq!(outcome.summary.total_volume, 800 + 800 + 2400);
    assert_eq!(outcome.gamification.earned_xp, 100);
    assert!(repo.active_session().unwrap().is_none());
}

#[test]
fn test_empty_plan_cannot_start() {
    let plan = WorkoutPlan {
        title: "Vazio".to_string(),
        duration: 30,
        focus: "Geral".to_string(),
        exercises: vec![],
    };
    assert_eq!(
        ActiveSession::start(plan, local_noon(today()), 3),
        Err(SessionError::EmptyPlan)
    );
}
