//! Session history, level promotion and the per-day plan cache.
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::composer::{PlanOptions, generate_workout_plan, resolve_muscles};
use crate::constants::{
    INTENSITY_BIAS_DEFAULT, INTENSITY_BIAS_MAX, INTENSITY_BIAS_MIN, INTENSITY_BIAS_STEP,
    PLAN_CACHE_DAYS, PROGRESSION_KEY, PROMOTION_THRESHOLD,
};
use crate::numbers::{round_hundredths, usize_to_f64};
use crate::plan::{Equipment, ExerciseSlot, Goal, Level, MuscleGroup, Plan, PlanError, Style};
use crate::storage::{KeyValueStore, load_or, save_value};

/// How the finished session felt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Easy,
    #[default]
    Good,
    Hard,
}

impl Feedback {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Good => "good",
            Self::Hard => "hard",
        }
    }

    /// Change applied to the intensity bias.
    #[must_use]
    pub const fn bias_delta(self) -> f64 {
        match self {
            Self::Easy => INTENSITY_BIAS_STEP,
            Self::Good => 0.0,
            Self::Hard => -INTENSITY_BIAS_STEP,
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feedback {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "good" => Ok(Self::Good),
            "hard" => Ok(Self::Hard),
            _ => Err(PlanError::UnknownSelection {
                kind: "feedback",
                value: s.to_string(),
            }),
        }
    }
}

/// One logged workout; at most one per calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLogEntry {
    pub date: NaiveDate,
    pub plan: Plan,
    pub feedback: Feedback,
    #[serde(default)]
    pub logged_weights: BTreeMap<ExerciseSlot, f64>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub main_lift_weight: Option<f64>,
}

/// The user's current plan choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Selections {
    pub style: Style,
    pub goal: Goal,
    /// `None` follows the style's default equipment.
    pub equipment: Option<Equipment>,
    pub custom_muscles: Vec<MuscleGroup>,
}

impl Selections {
    /// Fail fast when the equipment does not fit the style.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::UnsupportedEquipment` for a mismatched pair.
    pub fn validate(&self) -> Result<(), PlanError> {
        match self.equipment {
            Some(equipment) => self.style.check_equipment(equipment),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn plan_options(&self, level: Level, intensity_bias: f64) -> PlanOptions {
        PlanOptions {
            style: self.style,
            level,
            goal: self.goal,
            equipment: self.equipment,
            intensity_bias,
            custom_muscles: self.custom_muscles.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionState {
    pub level: Level,
    pub intensity_bias: f64,
    pub session_counts: BTreeMap<Level, u32>,
    pub plan_cache: BTreeMap<NaiveDate, Plan>,
    pub logs: Vec<SessionLogEntry>,
    pub selections: Selections,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            level: Level::Beginner,
            intensity_bias: INTENSITY_BIAS_DEFAULT,
            session_counts: BTreeMap::new(),
            plan_cache: BTreeMap::new(),
            logs: Vec::new(),
            selections: Selections::default(),
        }
    }
}

impl ProgressionState {
    #[must_use]
    pub fn sessions_at(&self, level: Level) -> u32 {
        self.session_counts.get(&level).copied().unwrap_or(0)
    }

    /// Repair values a hand-edited or older save may carry.
    fn sanitize(&mut self) {
        if !self.intensity_bias.is_finite() {
            self.intensity_bias = INTENSITY_BIAS_DEFAULT;
        }
        self.intensity_bias = self
            .intensity_bias
            .clamp(INTENSITY_BIAS_MIN, INTENSITY_BIAS_MAX);
        // the last entry for a date wins
        self.logs.reverse();
        self.logs.sort_by_key(|entry| entry.date);
        self.logs.dedup_by_key(|entry| entry.date);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelUp {
    pub from: Level,
    pub to: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionOutcome {
    pub entry: SessionLogEntry,
    pub level_up: Option<LevelUp>,
}

/// Mean logged weight across the plan's main-lift slots.
#[must_use]
pub fn main_lift_weight(plan: &Plan, weights: &BTreeMap<ExerciseSlot, f64>) -> Option<f64> {
    let main: Vec<f64> = weights
        .iter()
        .filter(|(slot, weight)| plan.is_main_lift(**slot) && weight.is_finite())
        .map(|(_, weight)| *weight)
        .collect();
    if main.is_empty() {
        None
    } else {
        Some(main.iter().sum::<f64>() / usize_to_f64(main.len()))
    }
}

/// Owns the persisted progression state and the store it lives in.
pub struct ProgressionTracker<S>
where
    S: KeyValueStore,
{
    store: S,
    state: ProgressionState,
}

impl<S> ProgressionTracker<S>
where
    S: KeyValueStore,
{
    /// Load persisted state, starting fresh when nothing usable is stored.
    pub fn load(store: S) -> Self {
        let mut state: ProgressionState =
            load_or(&store, PROGRESSION_KEY, ProgressionState::default());
        state.sanitize();
        Self { store, state }
    }

    #[must_use]
    pub const fn state(&self) -> &ProgressionState {
        &self.state
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn history(&self) -> &[SessionLogEntry] {
        &self.state.logs
    }

    #[must_use]
    pub fn entry_for(&self, date: NaiveDate) -> Option<&SessionLogEntry> {
        self.state.logs.iter().find(|entry| entry.date == date)
    }

    #[must_use]
    pub fn plan_options(&self) -> PlanOptions {
        self.state
            .selections
            .plan_options(self.state.level, self.state.intensity_bias)
    }

    fn persist(&self) {
        save_value(&self.store, PROGRESSION_KEY, &self.state);
    }

    /// Replace the current selections.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::UnsupportedEquipment` and leaves state untouched
    /// when the equipment does not fit the style.
    pub fn update_selections(&mut self, selections: Selections) -> Result<(), PlanError> {
        selections.validate()?;
        self.state.selections = selections;
        self.persist();
        Ok(())
    }

    /// Manual level override; counters are kept.
    pub fn set_level(&mut self, level: Level) {
        self.state.level = level;
        self.persist();
    }

    /// Today's plan: the cached one when it still matches the selections,
    /// otherwise a fresh plan that replaces the cache entry. Entries more
    /// than a week away from `today` are dropped.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::UnsupportedEquipment` when the stored selections
    /// name a mismatched style and equipment.
    pub fn ensure_today_plan(&mut self, today: NaiveDate) -> Result<Plan, PlanError> {
        let options = self.plan_options();
        if let Some(cached) = self
            .state
            .plan_cache
            .get(&today)
            .filter(|cached| cache_matches(cached, &options))
        {
            log::debug!("reusing cached plan for {today}");
            return Ok(cached.clone());
        }
        let plan = generate_workout_plan(today, &options)?;
        log::debug!("caching fresh {} plan for {today}", plan.style);
        self.state.plan_cache.insert(today, plan.clone());
        self.state
            .plan_cache
            .retain(|date, _| (today - *date).num_days().abs() < PLAN_CACHE_DAYS);
        self.persist();
        Ok(plan)
    }

    /// Nudge the intensity bias by the feedback step and persist it.
    pub fn adjust_intensity(&mut self, feedback: Feedback) -> f64 {
        self.nudge_bias(feedback);
        self.persist();
        self.state.intensity_bias
    }

    fn nudge_bias(&mut self, feedback: Feedback) {
        let next = round_hundredths(self.state.intensity_bias + feedback.bias_delta());
        self.state.intensity_bias = next.clamp(INTENSITY_BIAS_MIN, INTENSITY_BIAS_MAX);
    }

    /// Log a finished session for `today`, replacing any earlier entry for
    /// the same date, then adapt intensity and evaluate promotion.
    pub fn record_session(
        &mut self,
        today: NaiveDate,
        plan: Plan,
        feedback: Feedback,
        logged_weights: BTreeMap<ExerciseSlot, f64>,
        notes: &str,
    ) -> SessionOutcome {
        let entry = SessionLogEntry {
            date: today,
            main_lift_weight: main_lift_weight(&plan, &logged_weights),
            plan,
            feedback,
            logged_weights,
            notes: notes.trim().to_string(),
        };
        self.state.logs.retain(|existing| existing.date != today);
        self.state.logs.push(entry.clone());
        self.state.logs.sort_by_key(|existing| existing.date);

        self.nudge_bias(feedback);
        let current = self.state.level;
        let count = self.state.session_counts.entry(current).or_insert(0);
        *count = count.saturating_add(1);
        let level_up = self.promote_if_ready(today);

        self.persist();
        SessionOutcome { entry, level_up }
    }

    fn promote_if_ready(&mut self, today: NaiveDate) -> Option<LevelUp> {
        let from = self.state.level;
        if self.state.sessions_at(from) < PROMOTION_THRESHOLD {
            return None;
        }
        let to = from.next()?;
        self.state.level = to;
        self.state.session_counts.insert(to, 0);
        self.state.plan_cache.retain(|date, _| *date == today);
        log::info!("promoted from {from} to {to}");
        Some(LevelUp { from, to })
    }

    /// Consecutive logged days ending today, or yesterday when today is
    /// not logged yet.
    #[must_use]
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        let dates = self.logged_dates();
        let mut cursor = if dates.contains(&today) {
            today
        } else {
            today - Duration::days(1)
        };
        let mut streak = 0;
        while dates.contains(&cursor) {
            streak += 1;
            cursor -= Duration::days(1);
        }
        streak
    }

    #[must_use]
    pub fn longest_streak(&self) -> u32 {
        let mut longest = 0;
        let mut run = 0;
        let mut previous: Option<NaiveDate> = None;
        for date in self.logged_dates() {
            run = match previous {
                Some(prev) if date - prev == Duration::days(1) => run + 1,
                _ => 1,
            };
            longest = longest.max(run);
            previous = Some(date);
        }
        longest
    }

    fn logged_dates(&self) -> BTreeSet<NaiveDate> {
        self.state.logs.iter().map(|entry| entry.date).collect()
    }
}

fn cache_matches(cached: &Plan, options: &PlanOptions) -> bool {
    cached.style == options.style
        && cached.level == options.level
        && cached.goal == options.goal
        && cached.equipment == options.resolved_equipment()
        && cached.custom_muscles == resolve_muscles(options.style, &options.custom_muscles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn day(offset: i64) -> NaiveDate {
        crate::seed::epoch() + Duration::days(offset)
    }

    fn tracker() -> ProgressionTracker<MemoryStore> {
        ProgressionTracker::load(MemoryStore::new())
    }

    fn log_day(
        tracker: &mut ProgressionTracker<MemoryStore>,
        offset: i64,
        feedback: Feedback,
    ) -> SessionOutcome {
        let plan = tracker.ensure_today_plan(day(offset)).unwrap();
        tracker.record_session(day(offset), plan, feedback, BTreeMap::new(), "")
    }

    #[test]
    fn fresh_state_uses_defaults() {
        let tracker = tracker();
        assert_eq!(tracker.state().level, Level::Beginner);
        assert!((tracker.state().intensity_bias - 1.0).abs() < f64::EPSILON);
        assert!(tracker.history().is_empty());
    }

    #[test]
    fn resubmitting_a_day_replaces_its_entry() {
        let mut tracker = tracker();
        log_day(&mut tracker, 0, Feedback::Good);
        log_day(&mut tracker, 0, Feedback::Hard);
        assert_eq!(tracker.history().len(), 1);
        assert_eq!(tracker.history()[0].feedback, Feedback::Hard);
        assert_eq!(tracker.state().sessions_at(Level::Beginner), 2);
    }

    #[test]
    fn intensity_stays_within_bounds() {
        let mut tracker = tracker();
        for _ in 0..20 {
            tracker.adjust_intensity(Feedback::Easy);
        }
        assert!((tracker.state().intensity_bias - INTENSITY_BIAS_MAX).abs() < f64::EPSILON);
        for _ in 0..20 {
            tracker.adjust_intensity(Feedback::Hard);
        }
        assert!((tracker.state().intensity_bias - INTENSITY_BIAS_MIN).abs() < f64::EPSILON);
        let settled = tracker.adjust_intensity(Feedback::Good);
        assert!((settled - INTENSITY_BIAS_MIN).abs() < f64::EPSILON);
    }

    #[test]
    fn bias_steps_do_not_drift() {
        let mut tracker = tracker();
        for _ in 0..3 {
            tracker.adjust_intensity(Feedback::Easy);
        }
        assert!((tracker.state().intensity_bias - 1.15).abs() < f64::EPSILON);
    }

    #[test]
    fn thirtieth_session_promotes_and_narrows_cache() {
        let mut tracker = tracker();
        let mut promotion = None;
        for offset in 0..30 {
            let outcome = log_day(&mut tracker, offset, Feedback::Good);
            if offset < 29 {
                assert!(outcome.level_up.is_none(), "early promotion on day {offset}");
            }
            promotion = outcome.level_up;
        }
        assert_eq!(
            promotion,
            Some(LevelUp {
                from: Level::Beginner,
                to: Level::Intermediate
            })
        );
        let state = tracker.state();
        assert_eq!(state.level, Level::Intermediate);
        assert_eq!(state.sessions_at(Level::Intermediate), 0);
        assert_eq!(state.plan_cache.keys().copied().collect::<Vec<_>>(), vec![day(29)]);
    }

    #[test]
    fn intermediate_promotes_to_advanced() {
        let mut tracker = tracker();
        tracker.set_level(Level::Intermediate);
        let mut promotion = None;
        for offset in 0..30 {
            promotion = log_day(&mut tracker, offset, Feedback::Good).level_up;
        }
        assert_eq!(
            promotion,
            Some(LevelUp {
                from: Level::Intermediate,
                to: Level::Advanced
            })
        );
        let state = tracker.state();
        assert_eq!(state.level, Level::Advanced);
        assert_eq!(state.sessions_at(Level::Intermediate), 30);
        assert_eq!(state.sessions_at(Level::Advanced), 0);
        assert_eq!(state.plan_cache.keys().copied().collect::<Vec<_>>(), vec![day(29)]);

        let next = tracker.ensure_today_plan(day(30)).unwrap();
        assert_eq!(next.level, Level::Advanced);
    }

    #[test]
    fn advanced_is_terminal() {
        let mut tracker = tracker();
        tracker.set_level(Level::Advanced);
        for offset in 0..31 {
            assert!(log_day(&mut tracker, offset, Feedback::Good).level_up.is_none());
        }
        assert_eq!(tracker.state().level, Level::Advanced);
    }

    #[test]
    fn cached_plan_is_reused_until_selections_change() {
        let mut tracker = tracker();
        let first = tracker.ensure_today_plan(day(2)).unwrap();
        assert_eq!(tracker.ensure_today_plan(day(2)).unwrap(), first);

        tracker
            .update_selections(Selections {
                style: Style::Home,
                equipment: Some(Equipment::Dumbbell),
                ..Selections::default()
            })
            .unwrap();
        let changed = tracker.ensure_today_plan(day(2)).unwrap();
        assert_eq!(changed.style, Style::Home);
        assert_eq!(tracker.state().plan_cache[&day(2)], changed);
    }

    #[test]
    fn invalid_selections_are_rejected() {
        let mut tracker = tracker();
        let err = tracker
            .update_selections(Selections {
                style: Style::Gym,
                equipment: Some(Equipment::Swimming),
                ..Selections::default()
            })
            .unwrap_err();
        assert!(matches!(err, PlanError::UnsupportedEquipment { .. }));
        assert_eq!(tracker.state().selections, Selections::default());
    }

    #[test]
    fn main_lift_weight_averages_flagged_slots() {
        let mut tracker = tracker();
        let plan = tracker.ensure_today_plan(day(0)).unwrap();
        let mut weights = BTreeMap::new();
        weights.insert(ExerciseSlot::new(0, 0), 80.0);
        weights.insert(ExerciseSlot::new(1, 0), 20.0);
        let outcome =
            tracker.record_session(day(0), plan, Feedback::Good, weights, " felt strong ");
        assert_eq!(outcome.entry.main_lift_weight, Some(80.0));
        assert_eq!(outcome.entry.notes, "felt strong");

        let plan = tracker.ensure_today_plan(day(1)).unwrap();
        let outcome = tracker.record_session(day(1), plan, Feedback::Good, BTreeMap::new(), "");
        assert_eq!(outcome.entry.main_lift_weight, None);
    }

    #[test]
    fn streaks_count_consecutive_days() {
        let mut tracker = tracker();
        for offset in [0, 1, 2, 5, 6] {
            log_day(&mut tracker, offset, Feedback::Good);
        }
        assert_eq!(tracker.longest_streak(), 3);
        assert_eq!(tracker.current_streak(day(6)), 2);
        assert_eq!(tracker.current_streak(day(7)), 2);
        assert_eq!(tracker.current_streak(day(8)), 0);
    }

    #[test]
    fn state_survives_reload() {
        let store = MemoryStore::new();
        let mut tracker = ProgressionTracker::load(store.clone());
        log_day(&mut tracker, 0, Feedback::Easy);
        let reloaded = ProgressionTracker::load(store);
        assert_eq!(reloaded.state(), tracker.state());
    }

    #[test]
    fn corrupt_state_falls_back_to_defaults() {
        let store = MemoryStore::new();
        store.insert_raw(PROGRESSION_KEY, "[[[");
        let tracker = ProgressionTracker::load(store);
        assert_eq!(tracker.state(), &ProgressionState::default());
    }

    #[test]
    fn duplicate_dates_on_load_keep_the_later_entry() {
        let mut tracker = tracker();
        let first = log_day(&mut tracker, 3, Feedback::Easy).entry;
        let mut second = first.clone();
        second.feedback = Feedback::Hard;
        second.notes = "redo".to_string();
        let mut state = tracker.state().clone();
        state.logs = vec![first, second];

        let store = MemoryStore::new();
        store.insert_raw(PROGRESSION_KEY, &serde_json::to_string(&state).unwrap());
        let reloaded = ProgressionTracker::load(store);

        assert_eq!(reloaded.history().len(), 1);
        assert_eq!(reloaded.history()[0].feedback, Feedback::Hard);
        assert_eq!(reloaded.history()[0].notes, "redo");
    }

    #[test]
    fn plan_cache_keeps_only_nearby_days() {
        let mut tracker = tracker();
        for offset in 0..20 {
            tracker.ensure_today_plan(day(offset)).unwrap();
        }
        let cached: Vec<NaiveDate> = tracker.state().plan_cache.keys().copied().collect();
        assert_eq!(cached, (13..20).map(day).collect::<Vec<_>>());
    }

    #[test]
    fn out_of_range_bias_is_clamped_on_load() {
        let store = MemoryStore::new();
        store.insert_raw(PROGRESSION_KEY, r#"{"intensity_bias": 3.0}"#);
        let tracker = ProgressionTracker::load(store);
        assert!((tracker.state().intensity_bias - INTENSITY_BIAS_MAX).abs() < f64::EPSILON);
    }
}
