//! Daily plan composition.
//!
//! Turns a date and the user's selections into one of four plan shapes,
//! then runs level scaling and the duration budget over the result.
use chrono::NaiveDate;
use rand::seq::SliceRandom;

use crate::catalog::{self, Activity, Context, ExerciseTemplate, GymFormat, GymMode, Split};
use crate::constants::{
    CALISTHENICS_DEFAULT_REPS, CALISTHENICS_PICKS, FALLBACK_REPS, INTENSITY_BIAS_DEFAULT,
    MAX_CUSTOM_MUSCLES,
};
use crate::duration::ensure_duration;
use crate::plan::{
    Block, Equipment, Exercise, FocusTags, Goal, Level, MuscleCategory, MuscleGroup,
    MuscleSelection, Plan, PlanError, PlanFormat, PlanMode, Style,
};
use crate::scaling::scale_blocks;
use crate::seed::{DailyStreams, SeededRandom, rotation_phase};

const GYM_ROTATION: [GymFormat; 6] = [
    GymFormat::Push,
    GymFormat::Pull,
    GymFormat::Legs,
    GymFormat::Push,
    GymFormat::Pull,
    GymFormat::Legs,
];
const DEFAULT_CUSTOM_MUSCLES: [MuscleGroup; 2] = [MuscleGroup::Chest, MuscleGroup::Back];
const VOLUME_TEMPO: (&str, &str) = ("Controlled 3-1-1", "90s");
const SIZE_TEMPO: (&str, &str) = ("Explosive concentric", "75s");

/// Selections feeding one plan generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOptions {
    pub style: Style,
    pub level: Level,
    pub goal: Goal,
    /// `None` picks the style's default equipment.
    pub equipment: Option<Equipment>,
    pub intensity_bias: f64,
    pub custom_muscles: Vec<MuscleGroup>,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            level: Level::default(),
            goal: Goal::default(),
            equipment: None,
            intensity_bias: INTENSITY_BIAS_DEFAULT,
            custom_muscles: Vec::new(),
        }
    }
}

impl PlanOptions {
    #[must_use]
    pub fn resolved_equipment(&self) -> Equipment {
        self.equipment
            .unwrap_or_else(|| self.style.default_equipment())
    }
}

/// Blocks and labels for one style before calisthenics, scaling and budget.
struct Shape {
    format: PlanFormat,
    mode: PlanMode,
    blocks: Vec<Block>,
}

/// Muscles a plan of `style` will record: deduplicated, capped at three,
/// defaulted when empty. Non-custom styles record none.
#[must_use]
pub fn resolve_muscles(style: Style, requested: &[MuscleGroup]) -> MuscleSelection {
    if style != Style::Custom {
        return MuscleSelection::new();
    }
    let mut selection = MuscleSelection::new();
    for muscle in requested {
        if selection.len() == MAX_CUSTOM_MUSCLES {
            break;
        }
        if !selection.contains(muscle) {
            selection.push(*muscle);
        }
    }
    if selection.is_empty() {
        selection.extend(DEFAULT_CUSTOM_MUSCLES);
    }
    selection
}

/// Generate the plan for `date`.
///
/// # Errors
///
/// Returns `PlanError::UnsupportedEquipment` when the equipment does not
/// belong to the chosen style.
pub fn generate_workout_plan(date: NaiveDate, options: &PlanOptions) -> Result<Plan, PlanError> {
    let equipment = options.resolved_equipment();
    options.style.check_equipment(equipment)?;

    let phase = rotation_phase(date);
    let mut streams = DailyStreams::for_date(date);
    let custom_muscles = resolve_muscles(options.style, &options.custom_muscles);

    let mut shape = match options.style {
        Style::Gym => gym_shape(phase),
        Style::Home => home_shape(equipment, phase)?,
        Style::Outdoor => outdoor_shape(equipment)?,
        Style::Custom => custom_shape(equipment, &custom_muscles),
    };
    shape
        .blocks
        .push(Block::calisthenics(draw_calisthenics(&mut streams.calisthenics)));
    normalize_reps(&mut shape.blocks);

    log::debug!(
        "composing {} plan for {date} (phase {phase}, format {}, mode {})",
        options.style,
        shape.format,
        shape.mode
    );

    let plan = Plan {
        date_key: date,
        style: options.style,
        format: shape.format,
        mode: shape.mode,
        level: options.level,
        goal: options.goal,
        equipment,
        blocks: scale_blocks(&shape.blocks, options.level, options.intensity_bias),
        finisher: draw_finisher(&mut streams.finisher),
        focus_tags: goal_focus_tags(options.goal),
        estimated_minutes: 0,
        custom_muscles,
        affirmation: draw_affirmation(&mut streams.affirmation),
    };
    Ok(ensure_duration(plan))
}

fn copy_templates(templates: &[ExerciseTemplate]) -> Vec<Exercise> {
    templates.iter().map(Exercise::from_template).collect()
}

fn gym_shape(phase: usize) -> Shape {
    let format = GYM_ROTATION[phase % GYM_ROTATION.len()];
    let mode = if phase < 3 {
        GymMode::Volume
    } else {
        GymMode::Size
    };
    let (tempo, rest) = match mode {
        GymMode::Volume => VOLUME_TEMPO,
        GymMode::Size => SIZE_TEMPO,
    };
    let mut exercises = copy_templates(catalog::gym(format, mode));
    for ex in &mut exercises {
        ex.tempo = Some(tempo.to_string());
        ex.rest = Some(rest.to_string());
    }
    let accessories = exercises.split_off(3.min(exercises.len()));
    Shape {
        format: match format {
            GymFormat::Push => PlanFormat::Push,
            GymFormat::Pull => PlanFormat::Pull,
            GymFormat::Legs => PlanFormat::Legs,
        },
        mode: match mode {
            GymMode::Volume => PlanMode::Volume,
            GymMode::Size => PlanMode::Size,
        },
        blocks: vec![
            Block::standard("Primary lifts", exercises),
            Block::standard("Accessory rotation", accessories),
        ],
    }
}

const fn calisthenics_only() -> Shape {
    Shape {
        format: PlanFormat::Calisthenics,
        mode: PlanMode::Skill,
        blocks: Vec::new(),
    }
}

fn home_shape(equipment: Equipment, phase: usize) -> Result<Shape, PlanError> {
    match equipment {
        Equipment::Calisthenics => Ok(calisthenics_only()),
        Equipment::Minimal => Ok(Shape {
            format: PlanFormat::FullBody,
            mode: PlanMode::Bodyweight,
            blocks: vec![Block::standard(
                "Full-body flow",
                copy_templates(catalog::home_minimal()),
            )],
        }),
        Equipment::Dumbbell => {
            let (split, format, title) = if phase % 2 == 0 {
                (Split::Upper, PlanFormat::Upper, "Upper-body dumbbell")
            } else {
                (Split::Lower, PlanFormat::Lower, "Lower-body dumbbell")
            };
            Ok(Shape {
                format,
                mode: PlanMode::Dumbbell,
                blocks: vec![Block::standard(
                    title,
                    copy_templates(catalog::home_dumbbell(split)),
                )],
            })
        }
        other => Err(PlanError::UnsupportedEquipment {
            style: Style::Home,
            equipment: other,
        }),
    }
}

fn outdoor_shape(equipment: Equipment) -> Result<Shape, PlanError> {
    let (activity, format, title) = match equipment {
        Equipment::Calisthenics => return Ok(calisthenics_only()),
        Equipment::Running => (Activity::Running, PlanFormat::Running, "Track session"),
        Equipment::Swimming => (Activity::Swimming, PlanFormat::Swimming, "Pool session"),
        other => {
            return Err(PlanError::UnsupportedEquipment {
                style: Style::Outdoor,
                equipment: other,
            });
        }
    };
    Ok(Shape {
        format,
        mode: PlanMode::Endurance,
        blocks: vec![Block::standard(
            title,
            copy_templates(catalog::outdoor(activity)),
        )],
    })
}

const fn custom_context(equipment: Equipment) -> Context {
    match equipment {
        Equipment::Machines | Equipment::Freeweight => Context::Gym,
        Equipment::Dumbbell | Equipment::Minimal | Equipment::Calisthenics => Context::Home,
        Equipment::Running | Equipment::Swimming => Context::Outdoor,
    }
}

fn custom_format(muscles: &[MuscleGroup]) -> PlanFormat {
    let Some(first) = muscles.first().map(|m| m.category()) else {
        return PlanFormat::Custom;
    };
    if muscles.iter().any(|m| m.category() != first) {
        return PlanFormat::Custom;
    }
    match first {
        MuscleCategory::Push => PlanFormat::Push,
        MuscleCategory::Pull => PlanFormat::Pull,
        MuscleCategory::Legs => PlanFormat::Legs,
        MuscleCategory::Core => PlanFormat::Custom,
    }
}

fn custom_shape(equipment: Equipment, muscles: &[MuscleGroup]) -> Shape {
    let context = custom_context(equipment);
    let mut exercises: Vec<Exercise> = muscles
        .iter()
        .flat_map(|m| copy_templates(catalog::muscle(*m, context)))
        .collect();
    let volume = exercises.split_off(3.min(exercises.len()));
    for ex in &mut exercises {
        ex.is_main_lift = true;
    }
    let mut blocks = vec![Block::standard("Primary focus", exercises)];
    if !volume.is_empty() {
        blocks.push(Block::standard("Volume builder", volume));
    }
    Shape {
        format: custom_format(muscles),
        mode: PlanMode::MuscleSelection,
        blocks,
    }
}

fn draw_calisthenics(rng: &mut SeededRandom) -> Vec<Exercise> {
    let mut pool: Vec<&ExerciseTemplate> = catalog::calisthenics_pool().iter().collect();
    pool.shuffle(rng);
    pool.into_iter()
        .take(CALISTHENICS_PICKS)
        .map(|template| {
            let mut ex = Exercise::from_template(template);
            if ex.reps.is_empty() {
                ex.reps = CALISTHENICS_DEFAULT_REPS.to_string();
            }
            ex
        })
        .collect()
}

fn normalize_reps(blocks: &mut [Block]) {
    for ex in blocks.iter_mut().flat_map(|b| b.exercises.iter_mut()) {
        if ex.reps.trim().is_empty() {
            ex.reps = FALLBACK_REPS.to_string();
        }
    }
}

fn draw_finisher(rng: &mut SeededRandom) -> Vec<String> {
    let library = catalog::hiit_library();
    let sequence = library[rng.pick_index(library.len())];
    sequence.iter().map(ToString::to_string).collect()
}

fn draw_affirmation(rng: &mut SeededRandom) -> String {
    let lines = catalog::affirmations();
    lines[rng.pick_index(lines.len())].to_string()
}

fn goal_focus_tags(goal: Goal) -> FocusTags {
    catalog::focus_tags(goal)
        .iter()
        .map(ToString::to_string)
        .collect()
}
