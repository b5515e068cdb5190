use std::sync::OnceLock;

use anyhow::{Context, Result, bail};
use regex::Regex;
use yodha_engine::{ExerciseSlot, MuscleGroup, Plan};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

pub fn parse_muscles(s: &str) -> Result<Vec<MuscleGroup>> {
    split_csv(s)
        .iter()
        .map(|name| {
            name.parse::<MuscleGroup>()
                .with_context(|| format!("invalid muscle list `{s}`"))
        })
        .collect()
}

fn weight_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(\d+\.\d+)\s*=\s*(\d+(?:\.\d+)?)\s*(?:kg)?\s*$")
            .expect("weight pattern compiles")
    })
}

/// Parse `block.exercise=weight`, e.g. `0.0=82.5`.
pub fn parse_weight(input: &str) -> Result<(ExerciseSlot, f64)> {
    let Some(caps) = weight_pattern().captures(input) else {
        bail!("expected <block>.<exercise>=<weight>, got `{input}`");
    };
    let slot: ExerciseSlot = caps[1]
        .parse()
        .with_context(|| format!("invalid slot in `{input}`"))?;
    let weight: f64 = caps[2]
        .parse()
        .with_context(|| format!("invalid weight in `{input}`"))?;
    Ok((slot, weight))
}

/// Reject weights for slots the plan does not contain.
pub fn check_slots(plan: &Plan, slots: impl IntoIterator<Item = ExerciseSlot>) -> Result<()> {
    for slot in slots {
        if plan.exercise_at(slot).is_none() {
            bail!("plan for {} has no exercise at slot {slot}", plan.date_key);
        }
    }
    Ok(())
}
