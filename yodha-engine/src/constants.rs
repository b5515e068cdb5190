//! Centralized tuning constants for Yodha Arc plan generation.
//!
//! These values define the deterministic math behind every generated plan.
//! The epoch and rotation length decide which calendar day lands on which
//! rotation slot, so they must never change once plans have been logged.

// Calendar rotation --------------------------------------------------------
/// Reference date for day indexing (`2025-01-01`).
pub const EPOCH_YEAR: i32 = 2025;
pub const EPOCH_MONTH: u32 = 1;
pub const EPOCH_DAY: u32 = 1;
/// Number of slots in the gym rotation (push/pull/legs × volume/size).
pub const ROTATION_LENGTH: i64 = 6;

// Duration budget ----------------------------------------------------------
pub const WARM_UP_MINUTES: f64 = 10.0;
pub const FINISHER_MINUTES: f64 = 7.0;
pub const MINUTES_PER_SET: f64 = 3.5;
pub const MAX_SESSION_MINUTES: u32 = 70;
/// Floor applied to every numeric set count by scaling and trimming.
pub const MIN_SETS: u32 = 2;

// Level scaling ------------------------------------------------------------
pub const BEGINNER_MULTIPLIER: f64 = 0.8;
pub const INTERMEDIATE_MULTIPLIER: f64 = 1.0;
pub const ADVANCED_MULTIPLIER: f64 = 1.25;

// Intensity bias -----------------------------------------------------------
pub const INTENSITY_BIAS_DEFAULT: f64 = 1.0;
pub const INTENSITY_BIAS_MIN: f64 = 0.7;
pub const INTENSITY_BIAS_MAX: f64 = 1.4;
pub const INTENSITY_BIAS_STEP: f64 = 0.05;

// Progression --------------------------------------------------------------
/// Logged sessions at one level required before promotion.
pub const PROMOTION_THRESHOLD: u32 = 30;

// Composition --------------------------------------------------------------
pub const CALISTHENICS_PICKS: usize = 4;
pub const FINISHER_LENGTH: usize = 7;
pub const MAX_CUSTOM_MUSCLES: usize = 3;
pub const CALISTHENICS_DEFAULT_REPS: &str = "8–12";
pub const FALLBACK_REPS: &str = "6–10";

// Finisher countdown -------------------------------------------------------
pub const FINISHER_SECONDS: u32 = 7 * 60;
/// Seconds each finisher movement stays on screen before rotating.
pub const FINISHER_MOVE_SECONDS: u32 = 30;

// Storage keys -------------------------------------------------------------
pub const PROGRESSION_KEY: &str = "yodha.progression";
/// Cached plans further than this many days from today are dropped.
pub const PLAN_CACHE_DAYS: i64 = 7;
