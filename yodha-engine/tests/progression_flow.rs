use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use yodha_engine::constants::{PROGRESSION_KEY, PROMOTION_THRESHOLD};
use yodha_engine::{
    Equipment, ExerciseSlot, Feedback, Level, LevelUp, MemoryStore, MuscleGroup,
    ProgressionTracker, Selections, Style,
};

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 1).unwrap() + Duration::days(offset)
}

#[test]
fn a_month_of_training_promotes_once() {
    let store = MemoryStore::new();
    let mut tracker = ProgressionTracker::load(store.clone());
    let mut promotions = Vec::new();

    for offset in 0..i64::from(PROMOTION_THRESHOLD) + 5 {
        let today = day(offset);
        let plan = tracker.ensure_today_plan(today).unwrap();
        let mut weights = BTreeMap::new();
        weights.insert(ExerciseSlot::new(0, 0), 60.0 + f64::from(u32::try_from(offset).unwrap()));
        let outcome = tracker.record_session(today, plan, Feedback::Good, weights, "");
        if let Some(level_up) = outcome.level_up {
            promotions.push((offset, level_up));
        }
    }

    assert_eq!(
        promotions,
        vec![(
            i64::from(PROMOTION_THRESHOLD) - 1,
            LevelUp {
                from: Level::Beginner,
                to: Level::Intermediate
            }
        )]
    );
    assert_eq!(tracker.state().sessions_at(Level::Intermediate), 5);
    assert_eq!(tracker.current_streak(day(34)), 35);

    let next = tracker.ensure_today_plan(day(35)).unwrap();
    assert_eq!(next.level, Level::Intermediate);

    let reloaded = ProgressionTracker::load(store);
    assert_eq!(reloaded.state().level, Level::Intermediate);
    assert_eq!(reloaded.history().len(), 35);
}

#[test]
fn logged_plan_snapshot_is_kept_after_selection_change() {
    let mut tracker = ProgressionTracker::load(MemoryStore::new());
    let plan = tracker.ensure_today_plan(day(0)).unwrap();
    tracker.record_session(
        day(0),
        plan.clone(),
        Feedback::Easy,
        BTreeMap::new(),
        "bench felt light",
    );

    tracker
        .update_selections(Selections {
            style: Style::Custom,
            equipment: Some(Equipment::Machines),
            custom_muscles: vec![MuscleGroup::Hamstrings, MuscleGroup::Glutes],
            ..Selections::default()
        })
        .unwrap();
    let custom = tracker.ensure_today_plan(day(0)).unwrap();

    assert_eq!(custom.style, Style::Custom);
    assert_eq!(tracker.entry_for(day(0)).unwrap().plan, plan);
    assert_eq!(tracker.entry_for(day(0)).unwrap().notes, "bench felt light");
}

#[test]
fn easy_feedback_raises_future_volume() {
    let mut tracker = ProgressionTracker::load(MemoryStore::new());
    tracker
        .update_selections(Selections {
            style: Style::Home,
            equipment: Some(Equipment::Calisthenics),
            ..Selections::default()
        })
        .unwrap();
    let before = tracker.ensure_today_plan(day(0)).unwrap();
    for _ in 0..8 {
        tracker.adjust_intensity(Feedback::Easy);
    }
    let after = yodha_engine::generate_workout_plan(day(0), &tracker.plan_options()).unwrap();
    assert!(after.total_sets() > before.total_sets());
}

#[test]
fn persisted_json_uses_slot_keys() {
    let store = MemoryStore::new();
    let mut tracker = ProgressionTracker::load(store.clone());
    let plan = tracker.ensure_today_plan(day(0)).unwrap();
    let mut weights = BTreeMap::new();
    weights.insert(ExerciseSlot::new(1, 2), 22.5);
    tracker.record_session(day(0), plan, Feedback::Hard, weights, "");

    let raw = store.raw(PROGRESSION_KEY).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["logs"][0]["logged_weights"]["1.2"], 22.5);
    assert_eq!(value["logs"][0]["feedback"], "hard");
}
