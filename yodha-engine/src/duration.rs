//! Session-length budget.
//!
//! The correction is a single trimming pass: when the first estimate is
//! over budget every numeric set count drops by one (never below the
//! floor), the estimate is recomputed once, and that value is accepted.
use crate::constants::{
    FINISHER_MINUTES, MAX_SESSION_MINUTES, MIN_SETS, MINUTES_PER_SET, WARM_UP_MINUTES,
};
use crate::numbers::{round_f64_to_u32, u32_to_f64};
use crate::plan::{Block, Plan};

/// Sets counted for duration; untimed work counts once.
#[must_use]
pub fn total_duration_sets(blocks: &[Block]) -> u32 {
    blocks
        .iter()
        .flat_map(|b| b.exercises.iter())
        .map(|ex| ex.duration_sets())
        .sum()
}

/// Unclamped minutes: warm-up + finisher + 3.5 per set.
#[must_use]
pub fn raw_minutes(blocks: &[Block]) -> f64 {
    WARM_UP_MINUTES + FINISHER_MINUTES + u32_to_f64(total_duration_sets(blocks)) * MINUTES_PER_SET
}

#[must_use]
pub fn estimate_minutes(blocks: &[Block]) -> u32 {
    round_f64_to_u32(raw_minutes(blocks)).min(MAX_SESSION_MINUTES)
}

/// Drop every numeric set count by one, flooring at the minimum.
#[must_use]
pub fn trim_sets(blocks: &[Block]) -> Vec<Block> {
    blocks
        .iter()
        .map(|block| {
            let mut trimmed = block.clone();
            for ex in &mut trimmed.exercises {
                if let Some(sets) = ex.sets {
                    ex.sets = Some(sets.saturating_sub(1).max(MIN_SETS));
                }
            }
            trimmed
        })
        .collect()
}

/// Enforce the session budget on a plan.
#[must_use]
pub fn ensure_duration(plan: Plan) -> Plan {
    let first = raw_minutes(&plan.blocks);
    if first <= u32_to_f64(MAX_SESSION_MINUTES) {
        let estimated_minutes = estimate_minutes(&plan.blocks);
        return Plan {
            estimated_minutes,
            ..plan
        };
    }
    let blocks = trim_sets(&plan.blocks);
    let estimated_minutes = estimate_minutes(&blocks);
    log::debug!(
        "trimmed plan for {} from {first:.1} to {estimated_minutes} minutes",
        plan.date_key
    );
    Plan {
        blocks,
        estimated_minutes,
        ..plan
    }
}
