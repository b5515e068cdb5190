use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use yodha_engine::constants::PROMOTION_THRESHOLD;
use yodha_engine::{BlockKind, ExerciseSlot, Level, LevelUp, Plan, SessionLogEntry};

/// Snapshot printed by `status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub level: Level,
    pub intensity_bias: f64,
    pub sessions_at_level: u32,
    pub sessions_to_promotion: Option<u32>,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_sessions: usize,
    pub recent: Vec<HistoryLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryLine {
    pub date: chrono::NaiveDate,
    pub style: String,
    pub format: String,
    pub feedback: String,
    pub main_lift_weight: Option<f64>,
}

impl From<&SessionLogEntry> for HistoryLine {
    fn from(entry: &SessionLogEntry) -> Self {
        Self {
            date: entry.date,
            style: entry.plan.style.to_string(),
            format: entry.plan.format.to_string(),
            feedback: entry.feedback.to_string(),
            main_lift_weight: entry.main_lift_weight,
        }
    }
}

pub fn write_json<W: Write + ?Sized, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    let json_output = serde_json::to_string_pretty(value)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

fn sets_label(sets: Option<u32>) -> String {
    sets.map_or_else(|| "—".to_string(), |s| s.to_string())
}

pub fn write_plan<W: Write + ?Sized>(
    out: &mut W,
    plan: &Plan,
    weights: &BTreeMap<ExerciseSlot, f64>,
) -> Result<()> {
    writeln!(
        out,
        "{}",
        format!("🗡  Yodha Arc · {}", plan.date_key).bright_cyan().bold()
    )?;
    writeln!(
        out,
        "{} {} ({}) · {} · {} · {} · ~{} min",
        plan.style.as_str().bold(),
        plan.format,
        plan.mode,
        plan.level,
        plan.goal,
        plan.equipment,
        plan.estimated_minutes
    )?;
    if !plan.custom_muscles.is_empty() {
        let muscles: Vec<&str> = plan.custom_muscles.iter().map(|m| m.as_str()).collect();
        writeln!(out, "Muscles: {}", muscles.join(", "))?;
    }
    writeln!(out, "Focus: {}", plan.focus_tags.join(" · ").yellow())?;
    if !plan.affirmation.is_empty() {
        writeln!(out, "{}", format!("“{}”", plan.affirmation).italic())?;
    }

    for (bi, block) in plan.blocks.iter().enumerate() {
        writeln!(out)?;
        let title = match block.kind {
            BlockKind::Calisthenics => block.title.bright_magenta().bold(),
            BlockKind::Standard => block.title.bright_blue().bold(),
        };
        writeln!(out, "[{bi}] {title}")?;
        for (ei, exercise) in block.exercises.iter().enumerate() {
            let slot = ExerciseSlot::new(bi, ei);
            let marker = if exercise.is_main_lift { "★" } else { " " };
            let mut line = format!(
                "  {slot} {marker} {}  {} × {}",
                exercise.name,
                sets_label(exercise.sets),
                exercise.reps
            );
            if let Some(tempo) = &exercise.tempo {
                line.push_str(&format!("  tempo {tempo}"));
            }
            if let Some(rest) = &exercise.rest {
                line.push_str(&format!("  rest {rest}"));
            }
            if let Some(weight) = weights.get(&slot) {
                line.push_str(&format!("  @ {weight}"));
            }
            writeln!(out, "{line}")?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "{} {}",
        "🔥 Finisher:".bright_red().bold(),
        plan.finisher.join(" → ")
    )?;
    Ok(())
}

pub fn write_level_up<W: Write + ?Sized>(out: &mut W, level_up: LevelUp) -> Result<()> {
    writeln!(
        out,
        "{}",
        format!("🏆 Level up! {} → {}", level_up.from, level_up.to)
            .bright_green()
            .bold()
    )?;
    Ok(())
}

pub fn write_status<W: Write + ?Sized>(out: &mut W, status: &StatusReport) -> Result<()> {
    writeln!(out, "{}", "📊 Yodha Arc Progress".bright_cyan().bold())?;
    writeln!(out, "{}", "====================".cyan())?;
    writeln!(out, "Level: {}", status.level.as_str().bold())?;
    writeln!(out, "Intensity bias: {:.2}", status.intensity_bias)?;
    match status.sessions_to_promotion {
        Some(left) => writeln!(
            out,
            "Sessions at level: {}/{PROMOTION_THRESHOLD} ({left} to promotion)",
            status.sessions_at_level
        )?,
        None => writeln!(out, "Sessions at level: {}", status.sessions_at_level)?,
    }
    writeln!(
        out,
        "Streak: {} (best {})",
        status.current_streak.to_string().green(),
        status.longest_streak
    )?;
    writeln!(out, "Total sessions: {}", status.total_sessions)?;
    if !status.recent.is_empty() {
        writeln!(out)?;
        for line in &status.recent {
            let weight = line
                .main_lift_weight
                .map(|w| format!("  main lift {w:.1}"))
                .unwrap_or_default();
            writeln!(
                out,
                "  {}  {:<8} {:<12} {}{weight}",
                line.date, line.style, line.format, line.feedback
            )?;
        }
    }
    Ok(())
}
