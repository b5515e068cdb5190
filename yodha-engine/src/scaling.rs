//! Level and intensity scaling of set counts.
use crate::constants::{ADVANCED_MULTIPLIER, BEGINNER_MULTIPLIER, INTERMEDIATE_MULTIPLIER, MIN_SETS};
use crate::numbers::{round_f64_to_u32, u32_to_f64};
use crate::plan::{Block, Exercise, Level};

#[must_use]
pub const fn level_multiplier(level: Level) -> f64 {
    match level {
        Level::Beginner => BEGINNER_MULTIPLIER,
        Level::Intermediate => INTERMEDIATE_MULTIPLIER,
        Level::Advanced => ADVANCED_MULTIPLIER,
    }
}

/// `max(2, round(base * level * bias))` for numeric set counts.
#[must_use]
pub fn scale_sets(base: u32, level: Level, intensity_bias: f64) -> u32 {
    let multiplier = level_multiplier(level) * intensity_bias;
    round_f64_to_u32(u32_to_f64(base) * multiplier).max(MIN_SETS)
}

/// Scaled copies of `exercises`; untimed work passes through unchanged.
#[must_use]
pub fn scale_exercises(exercises: &[Exercise], level: Level, intensity_bias: f64) -> Vec<Exercise> {
    exercises
        .iter()
        .map(|ex| Exercise {
            sets: ex.sets.map(|base| scale_sets(base, level, intensity_bias)),
            ..ex.clone()
        })
        .collect()
}

#[must_use]
pub fn scale_blocks(blocks: &[Block], level: Level, intensity_bias: f64) -> Vec<Block> {
    blocks
        .iter()
        .map(|block| Block {
            exercises: scale_exercises(&block.exercises, level, intensity_bias),
            ..block.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(sets: Option<u32>) -> Exercise {
        Exercise {
            name: "Row".into(),
            sets,
            reps: "8–12".into(),
            is_main_lift: false,
            tempo: None,
            rest: None,
        }
    }

    #[test]
    fn level_multipliers_follow_table() {
        assert_eq!(scale_sets(4, Level::Beginner, 1.0), 3);
        assert_eq!(scale_sets(4, Level::Intermediate, 1.0), 4);
        assert_eq!(scale_sets(4, Level::Advanced, 1.0), 5);
        assert_eq!(scale_sets(3, Level::Advanced, 1.0), 4);
    }

    #[test]
    fn scaled_sets_never_drop_below_two() {
        assert_eq!(scale_sets(2, Level::Beginner, 0.7), 2);
        assert_eq!(scale_sets(1, Level::Beginner, 1.0), 2);
    }

    #[test]
    fn intensity_bias_multiplies_level() {
        assert_eq!(scale_sets(4, Level::Intermediate, 1.4), 6);
        assert_eq!(scale_sets(4, Level::Intermediate, 0.7), 3);
    }

    #[test]
    fn untimed_work_passes_through() {
        let scaled = scale_exercises(&[exercise(None), exercise(Some(3))], Level::Advanced, 1.0);
        assert_eq!(scaled[0].sets, None);
        assert_eq!(scaled[1].sets, Some(4));
    }

    #[test]
    fn scaling_does_not_mutate_input() {
        let input = vec![exercise(Some(3))];
        let _ = scale_exercises(&input, Level::Advanced, 1.4);
        assert_eq!(input[0].sets, Some(3));
    }
}
