mod export;
mod render;
mod store;
mod util;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Duration;

use render::{HistoryLine, StatusReport};
use store::FileStore;
use util::{check_slots, parse_muscles, parse_weight};
use yodha_engine::constants::{INTENSITY_BIAS_DEFAULT, PROMOTION_THRESHOLD};
use yodha_engine::{
    Equipment, Feedback, FinisherTimer, Goal, KeyValueStore, Level, PlanOptions,
    ProgressionTracker, Style, TimerTick, format_clock, generate_workout_plan,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable output
    Console,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "yodha", version)]
#[command(about = "Yodha Arc training planner: daily plans, session logs and finisher countdown")]
struct Args {
    /// Directory holding saved progress
    #[arg(long, env = "YODHA_STATE_DIR", default_value = ".yodha", global = true)]
    state_dir: PathBuf,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Console, global = true)]
    format: OutputFormat,

    /// Optional path to write output instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Preview a plan without touching saved progress
    Plan(PlanArgs),
    /// Show today's plan for the saved selections
    Today,
    /// Log today's session and adapt future plans
    Log(LogArgs),
    /// Show level, intensity and streaks
    Status {
        /// Number of recent sessions to list
        #[arg(long, default_value_t = 5)]
        recent: usize,
    },
    /// Change saved selections
    Select(SelectArgs),
    /// Export today's plan (with logged weights) as CSV
    Export,
    /// Run the 7-minute finisher countdown for today's plan
    Finisher {
        /// Do not wait a real second between ticks
        #[arg(long)]
        fast: bool,
    },
}

#[derive(Debug, ClapArgs)]
struct PlanArgs {
    #[arg(long, default_value_t = Style::Gym)]
    style: Style,
    #[arg(long, default_value_t = Level::Beginner)]
    level: Level,
    #[arg(long, default_value_t = Goal::Strength)]
    goal: Goal,
    /// Defaults to the style's usual equipment
    #[arg(long)]
    equipment: Option<Equipment>,
    /// Comma-separated muscle groups for the custom style
    #[arg(long)]
    muscles: Option<String>,
    #[arg(long, default_value_t = INTENSITY_BIAS_DEFAULT)]
    bias: f64,
}

#[derive(Debug, ClapArgs)]
struct LogArgs {
    /// How the session felt: easy, good or hard
    #[arg(long)]
    feedback: Feedback,
    /// Weight lifted at a slot, as <block>.<exercise>=<weight> (repeatable)
    #[arg(long = "weight")]
    weights: Vec<String>,
    #[arg(long, default_value = "")]
    notes: String,
}

#[derive(Debug, ClapArgs)]
struct SelectArgs {
    #[arg(long)]
    style: Option<Style>,
    #[arg(long)]
    goal: Option<Goal>,
    /// Changing style without this resets equipment to the style default
    #[arg(long)]
    equipment: Option<Equipment>,
    /// Comma-separated muscle groups for the custom style
    #[arg(long)]
    muscles: Option<String>,
    /// Manually override the training level
    #[arg(long)]
    level: Option<Level>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    let store = FileStore::new(&args.state_dir);
    log::debug!("using state directory {}", store.root().display());
    let mut tracker = ProgressionTracker::load(store);

    let mut output_target = OutputTarget::new(args.output.clone())?;
    run(&args.command, args.format, today, &mut tracker, &mut output_target)?;
    output_target.flush_inner()?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run<S: KeyValueStore>(
    command: &Command,
    format: OutputFormat,
    today: NaiveDate,
    tracker: &mut ProgressionTracker<S>,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::Plan(plan_args) => preview_plan(plan_args, format, today, out),
        Command::Today => show_today(format, today, tracker, out),
        Command::Log(log_args) => log_session(log_args, format, today, tracker, out),
        Command::Status { recent } => show_status(*recent, format, today, tracker, out),
        Command::Select(select_args) => update_selections(select_args, format, tracker, out),
        Command::Export => export_today(today, tracker, out),
        Command::Finisher { fast } => run_finisher(*fast, format, today, tracker, out),
    }
}

fn preview_plan(
    plan_args: &PlanArgs,
    format: OutputFormat,
    today: NaiveDate,
    out: &mut dyn Write,
) -> Result<()> {
    let custom_muscles = match &plan_args.muscles {
        Some(list) => parse_muscles(list)?,
        None => Vec::new(),
    };
    let options = PlanOptions {
        style: plan_args.style,
        level: plan_args.level,
        goal: plan_args.goal,
        equipment: plan_args.equipment,
        intensity_bias: plan_args.bias,
        custom_muscles,
    };
    let plan = generate_workout_plan(today, &options).context("failed to generate plan")?;
    match format {
        OutputFormat::Json => render::write_json(out, &plan),
        OutputFormat::Console => render::write_plan(out, &plan, &BTreeMap::new()),
    }
}

fn show_today<S: KeyValueStore>(
    format: OutputFormat,
    today: NaiveDate,
    tracker: &mut ProgressionTracker<S>,
    out: &mut dyn Write,
) -> Result<()> {
    let plan = tracker
        .ensure_today_plan(today)
        .context("saved selections cannot produce a plan")?;
    let logged = tracker.entry_for(today);
    match format {
        OutputFormat::Json => render::write_json(out, &plan),
        OutputFormat::Console => {
            let weights = logged
                .filter(|entry| entry.plan == plan)
                .map(|entry| entry.logged_weights.clone())
                .unwrap_or_default();
            render::write_plan(out, &plan, &weights)?;
            if let Some(entry) = logged {
                writeln!(out, "\n✅ Logged today ({})", entry.feedback)?;
            }
            Ok(())
        }
    }
}

fn log_session<S: KeyValueStore>(
    log_args: &LogArgs,
    format: OutputFormat,
    today: NaiveDate,
    tracker: &mut ProgressionTracker<S>,
    out: &mut dyn Write,
) -> Result<()> {
    let plan = tracker
        .ensure_today_plan(today)
        .context("saved selections cannot produce a plan")?;
    let weights = log_args
        .weights
        .iter()
        .map(|raw| parse_weight(raw))
        .collect::<Result<BTreeMap<_, _>>>()?;
    check_slots(&plan, weights.keys().copied())?;

    let outcome = tracker.record_session(today, plan, log_args.feedback, weights, &log_args.notes);
    match format {
        OutputFormat::Json => render::write_json(out, &outcome)?,
        OutputFormat::Console => {
            writeln!(
                out,
                "✅ Logged {} session for {today}; intensity bias now {:.2}",
                outcome.entry.feedback.as_str().green(),
                tracker.state().intensity_bias
            )?;
            if let Some(weight) = outcome.entry.main_lift_weight {
                writeln!(out, "Main lift: {weight:.1}")?;
            }
            if let Some(level_up) = outcome.level_up {
                render::write_level_up(out, level_up)?;
            }
        }
    }
    Ok(())
}

fn show_status<S: KeyValueStore>(
    recent: usize,
    format: OutputFormat,
    today: NaiveDate,
    tracker: &ProgressionTracker<S>,
    out: &mut dyn Write,
) -> Result<()> {
    let state = tracker.state();
    let sessions_at_level = state.sessions_at(state.level);
    let status = StatusReport {
        level: state.level,
        intensity_bias: state.intensity_bias,
        sessions_at_level,
        sessions_to_promotion: state
            .level
            .next()
            .map(|_| PROMOTION_THRESHOLD.saturating_sub(sessions_at_level)),
        current_streak: tracker.current_streak(today),
        longest_streak: tracker.longest_streak(),
        total_sessions: tracker.history().len(),
        recent: tracker
            .history()
            .iter()
            .rev()
            .take(recent)
            .map(HistoryLine::from)
            .collect(),
    };
    match format {
        OutputFormat::Json => render::write_json(out, &status),
        OutputFormat::Console => render::write_status(out, &status),
    }
}

fn update_selections<S: KeyValueStore>(
    select_args: &SelectArgs,
    format: OutputFormat,
    tracker: &mut ProgressionTracker<S>,
    out: &mut dyn Write,
) -> Result<()> {
    let mut selections = tracker.state().selections.clone();
    if let Some(style) = select_args.style {
        if style != selections.style {
            selections.equipment = None;
        }
        selections.style = style;
    }
    if let Some(goal) = select_args.goal {
        selections.goal = goal;
    }
    if let Some(equipment) = select_args.equipment {
        selections.equipment = Some(equipment);
    }
    if let Some(list) = &select_args.muscles {
        selections.custom_muscles = parse_muscles(list)?;
    }
    tracker
        .update_selections(selections)
        .context("selection rejected")?;
    if let Some(level) = select_args.level {
        tracker.set_level(level);
    }

    let state = tracker.state();
    match format {
        OutputFormat::Json => render::write_json(out, &state.selections)?,
        OutputFormat::Console => {
            let selections = &state.selections;
            let equipment = selections
                .equipment
                .unwrap_or_else(|| selections.style.default_equipment());
            writeln!(
                out,
                "Saved: {} · {} · {} · {}",
                selections.style.as_str().bold(),
                selections.goal,
                equipment,
                state.level
            )?;
        }
    }
    Ok(())
}

fn export_today<S: KeyValueStore>(
    today: NaiveDate,
    tracker: &mut ProgressionTracker<S>,
    out: &mut dyn Write,
) -> Result<()> {
    if let Some(entry) = tracker.entry_for(today).cloned() {
        return export::write_plan_csv(out, &entry.plan, &entry.logged_weights);
    }
    let plan = tracker
        .ensure_today_plan(today)
        .context("saved selections cannot produce a plan")?;
    export::write_plan_csv(out, &plan, &BTreeMap::new())
}

#[derive(Debug, Serialize)]
struct FinisherEvent {
    clock: String,
    movement: Option<String>,
}

fn run_finisher<S: KeyValueStore>(
    fast: bool,
    format: OutputFormat,
    today: NaiveDate,
    tracker: &mut ProgressionTracker<S>,
    out: &mut dyn Write,
) -> Result<()> {
    let plan = tracker
        .ensure_today_plan(today)
        .context("saved selections cannot produce a plan")?;
    let mut timer = FinisherTimer::new(plan.finisher);
    timer.start();

    let mut events = vec![FinisherEvent {
        clock: format_clock(timer.remaining()),
        movement: timer.current_move().map(str::to_string),
    }];
    if format == OutputFormat::Console {
        writeln!(out, "{}", "🔥 Finisher".bright_red().bold())?;
        print_event(out, &events[0])?;
    }
    loop {
        if !fast {
            std::thread::sleep(Duration::from_secs(1));
        }
        let event = match timer.tick() {
            TimerTick::Counting { .. } => continue,
            TimerTick::NextMove { remaining, .. } => FinisherEvent {
                clock: format_clock(remaining),
                movement: timer.current_move().map(str::to_string),
            },
            TimerTick::Finished | TimerTick::Stopped => FinisherEvent {
                clock: format_clock(timer.remaining()),
                movement: None,
            },
        };
        let done = event.movement.is_none();
        if format == OutputFormat::Console {
            print_event(out, &event)?;
        }
        events.push(event);
        if done {
            break;
        }
    }
    match format {
        OutputFormat::Json => render::write_json(out, &events),
        OutputFormat::Console => {
            writeln!(out, "{}", "💥 Finisher complete".bright_green().bold())?;
            Ok(())
        }
    }
}

fn print_event(out: &mut dyn Write, event: &FinisherEvent) -> Result<()> {
    match &event.movement {
        Some(movement) => writeln!(out, "  {}  {movement}", event.clock.cyan())?,
        None => writeln!(out, "  {}", event.clock.cyan())?,
    }
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yodha_engine::{MemoryStore, Selections};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn run_to_string(
        command: &Command,
        format: OutputFormat,
        today: NaiveDate,
        tracker: &mut ProgressionTracker<MemoryStore>,
    ) -> Result<String> {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        run(command, format, today, tracker, &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap())
    }

    fn log_args(feedback: Feedback, weights: &[&str]) -> Command {
        Command::Log(LogArgs {
            feedback,
            weights: weights.iter().map(ToString::to_string).collect(),
            notes: String::new(),
        })
    }

    #[test]
    fn today_is_cached_between_calls() {
        let mut tracker = ProgressionTracker::load(MemoryStore::new());
        let first =
            run_to_string(&Command::Today, OutputFormat::Json, day(3), &mut tracker).unwrap();
        let second =
            run_to_string(&Command::Today, OutputFormat::Json, day(3), &mut tracker).unwrap();
        assert_eq!(first, second);
        assert_eq!(tracker.state().plan_cache.len(), 1);
    }

    #[test]
    fn log_records_weights_and_reports_bias() {
        let mut tracker = ProgressionTracker::load(MemoryStore::new());
        let text = run_to_string(
            &log_args(Feedback::Easy, &["0.0=100"]),
            OutputFormat::Console,
            day(4),
            &mut tracker,
        )
        .unwrap();
        assert!(text.contains("intensity bias now 1.05"));
        assert!(text.contains("Main lift: 100.0"));
        assert_eq!(tracker.history().len(), 1);
    }

    #[test]
    fn log_rejects_slots_outside_the_plan() {
        let mut tracker = ProgressionTracker::load(MemoryStore::new());
        let err = run_to_string(
            &log_args(Feedback::Good, &["9.9=10"]),
            OutputFormat::Console,
            day(4),
            &mut tracker,
        )
        .unwrap_err();
        assert!(err.to_string().contains("no exercise at slot 9.9"));
        assert!(tracker.history().is_empty());
    }

    #[test]
    fn select_resets_equipment_when_style_changes() {
        let mut tracker = ProgressionTracker::load(MemoryStore::new());
        let command = Command::Select(SelectArgs {
            style: Some(Style::Outdoor),
            goal: Some(Goal::Endurance),
            equipment: None,
            muscles: None,
            level: Some(Level::Intermediate),
        });
        let text = run_to_string(&command, OutputFormat::Console, day(5), &mut tracker).unwrap();
        assert!(text.contains("outdoor · endurance · running · Intermediate"));
        assert_eq!(tracker.state().level, Level::Intermediate);
    }

    #[test]
    fn select_rejects_mismatched_equipment() {
        let mut tracker = ProgressionTracker::load(MemoryStore::new());
        let command = Command::Select(SelectArgs {
            style: Some(Style::Home),
            goal: None,
            equipment: Some(Equipment::Machines),
            muscles: None,
            level: None,
        });
        assert!(run_to_string(&command, OutputFormat::Console, day(5), &mut tracker).is_err());
        assert_eq!(tracker.state().selections, Selections::default());
    }

    #[test]
    fn status_reports_streak_and_promotion_distance() {
        let mut tracker = ProgressionTracker::load(MemoryStore::new());
        for d in 1..=3 {
            run_to_string(
                &log_args(Feedback::Good, &[]),
                OutputFormat::Console,
                day(d),
                &mut tracker,
            )
            .unwrap();
        }
        let json = run_to_string(
            &Command::Status { recent: 2 },
            OutputFormat::Json,
            day(3),
            &mut tracker,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["current_streak"], 3);
        assert_eq!(value["sessions_to_promotion"], 27);
        assert_eq!(value["recent"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn finisher_walks_every_move_then_finishes() {
        let mut tracker = ProgressionTracker::load(MemoryStore::new());
        let json = run_to_string(
            &Command::Finisher { fast: true },
            OutputFormat::Json,
            day(6),
            &mut tracker,
        )
        .unwrap();
        let events: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(events[0]["clock"], "07:00");
        assert_eq!(events.last().unwrap()["clock"], "00:00");
        // one event per 30 s rotation, plus the opening and closing events
        assert_eq!(events.len(), 1 + 13 + 1);
    }

    #[test]
    fn export_uses_logged_weights() {
        let mut tracker = ProgressionTracker::load(MemoryStore::new());
        run_to_string(
            &log_args(Feedback::Good, &["0.0=72.5"]),
            OutputFormat::Console,
            day(7),
            &mut tracker,
        )
        .unwrap();
        let csv = run_to_string(&Command::Export, OutputFormat::Console, day(7), &mut tracker)
            .unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Block,Exercise,Sets,Reps,Tempo,Rest,Weight"));
        assert!(lines.next().unwrap().ends_with(",72.5"));
    }
}
