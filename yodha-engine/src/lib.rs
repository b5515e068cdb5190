//! Yodha Arc Plan Engine
//!
//! Platform-agnostic core of the Yodha Arc training planner. Given a date and
//! the user's selections it deterministically composes a daily workout, and it
//! tracks logged sessions to adapt intensity and promote levels over time.
//! This crate has no UI or platform-specific dependencies; persistence is
//! reached through the [`KeyValueStore`] port.

pub mod catalog;
pub mod composer;
pub mod constants;
pub mod duration;
pub mod finisher;
pub mod numbers;
pub mod plan;
pub mod progression;
pub mod scaling;
pub mod seed;
pub mod storage;

// Re-export commonly used types
pub use composer::{PlanOptions, generate_workout_plan, resolve_muscles};
pub use duration::{ensure_duration, estimate_minutes};
pub use finisher::{FinisherTimer, TimerState, TimerTick, format_clock};
pub use plan::{
    Block, BlockKind, Equipment, Exercise, ExerciseSlot, FocusTags, Goal, Level, MuscleCategory,
    MuscleGroup, MuscleSelection, Plan, PlanError, PlanFormat, PlanMode, Style,
};
pub use progression::{
    Feedback, LevelUp, ProgressionState, ProgressionTracker, Selections, SessionLogEntry,
    SessionOutcome,
};
pub use scaling::{scale_blocks, scale_exercises};
pub use seed::{DailyStreams, SeededRandom, day_index, rotation_phase};
pub use storage::{KeyValueStore, MemoryStore, StorageError, load_or, save_value};
