//! Plan value types shared by the composer, the tracker and adapters.
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::catalog::ExerciseTemplate;

/// Goal focus tags stored inline; every goal carries three.
pub type FocusTags = SmallVec<[String; 3]>;
/// Muscle groups selected for a custom plan, capped at three.
pub type MuscleSelection = SmallVec<[MuscleGroup; 3]>;

/// Errors raised when a plan request names an invalid combination.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("equipment `{equipment}` is not available for the {style} style")]
    UnsupportedEquipment { style: Style, equipment: Equipment },
    #[error("unknown {kind} `{value}`")]
    UnknownSelection { kind: &'static str, value: String },
}

impl PlanError {
    fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownSelection {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Gym,
    Home,
    Outdoor,
    Custom,
}

impl Style {
    pub const ALL: [Self; 4] = [Self::Gym, Self::Home, Self::Outdoor, Self::Custom];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gym => "gym",
            Self::Home => "home",
            Self::Outdoor => "outdoor",
            Self::Custom => "custom",
        }
    }

    /// Equipment used when the caller does not pick one.
    #[must_use]
    pub const fn default_equipment(self) -> Equipment {
        match self {
            Self::Gym | Self::Custom => Equipment::Freeweight,
            Self::Home => Equipment::Minimal,
            Self::Outdoor => Equipment::Running,
        }
    }

    /// Equipment choices the selection UI offers for this style.
    #[must_use]
    pub fn equipment_options(self) -> &'static [Equipment] {
        match self {
            Self::Gym => &[
                Equipment::Machines,
                Equipment::Freeweight,
                Equipment::Calisthenics,
            ],
            Self::Home => &[
                Equipment::Minimal,
                Equipment::Dumbbell,
                Equipment::Calisthenics,
            ],
            Self::Outdoor => &[
                Equipment::Running,
                Equipment::Swimming,
                Equipment::Calisthenics,
            ],
            Self::Custom => &Equipment::ALL,
        }
    }

    /// Fail fast when the equipment does not belong to this style.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::UnsupportedEquipment` for combinations the
    /// selection UI never offers.
    pub fn check_equipment(self, equipment: Equipment) -> Result<(), PlanError> {
        if self.equipment_options().contains(&equipment) {
            Ok(())
        } else {
            Err(PlanError::UnsupportedEquipment {
                style: self,
                equipment,
            })
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gym" => Ok(Self::Gym),
            "home" => Ok(Self::Home),
            "outdoor" => Ok(Self::Outdoor),
            "custom" => Ok(Self::Custom),
            _ => Err(PlanError::unknown("style", s)),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    /// Next rung on the ladder; `None` once Advanced.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Beginner => Some(Self::Intermediate),
            Self::Intermediate => Some(Self::Advanced),
            Self::Advanced => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(PlanError::unknown("level", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    #[default]
    Strength,
    Hypertrophy,
    Fatloss,
    Endurance,
}

impl Goal {
    pub const ALL: [Self; 4] = [
        Self::Strength,
        Self::Hypertrophy,
        Self::Fatloss,
        Self::Endurance,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Hypertrophy => "hypertrophy",
            Self::Fatloss => "fatloss",
            Self::Endurance => "endurance",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strength" => Ok(Self::Strength),
            "hypertrophy" => Ok(Self::Hypertrophy),
            "fatloss" | "fat-loss" => Ok(Self::Fatloss),
            "endurance" => Ok(Self::Endurance),
            _ => Err(PlanError::unknown("goal", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Equipment {
    Machines,
    Freeweight,
    Minimal,
    Dumbbell,
    Calisthenics,
    Running,
    Swimming,
}

impl Equipment {
    pub const ALL: [Self; 7] = [
        Self::Machines,
        Self::Freeweight,
        Self::Minimal,
        Self::Dumbbell,
        Self::Calisthenics,
        Self::Running,
        Self::Swimming,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Machines => "machines",
            Self::Freeweight => "freeweight",
            Self::Minimal => "minimal",
            Self::Dumbbell => "dumbbell",
            Self::Calisthenics => "calisthenics",
            Self::Running => "running",
            Self::Swimming => "swimming",
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Equipment {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == needle)
            .ok_or_else(|| PlanError::unknown("equipment", s))
    }
}

/// Broad movement family a muscle group trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuscleCategory {
    Push,
    Pull,
    Legs,
    Core,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Quads,
    Hamstrings,
    Glutes,
    Calves,
    Core,
    Forearms,
}

impl MuscleGroup {
    pub const ALL: [Self; 11] = [
        Self::Chest,
        Self::Back,
        Self::Shoulders,
        Self::Biceps,
        Self::Triceps,
        Self::Quads,
        Self::Hamstrings,
        Self::Glutes,
        Self::Calves,
        Self::Core,
        Self::Forearms,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Back => "back",
            Self::Shoulders => "shoulders",
            Self::Biceps => "biceps",
            Self::Triceps => "triceps",
            Self::Quads => "quads",
            Self::Hamstrings => "hamstrings",
            Self::Glutes => "glutes",
            Self::Calves => "calves",
            Self::Core => "core",
            Self::Forearms => "forearms",
        }
    }

    #[must_use]
    pub const fn category(self) -> MuscleCategory {
        match self {
            Self::Chest | Self::Shoulders | Self::Triceps => MuscleCategory::Push,
            Self::Back | Self::Biceps | Self::Forearms => MuscleCategory::Pull,
            Self::Quads | Self::Hamstrings | Self::Glutes | Self::Calves => MuscleCategory::Legs,
            Self::Core => MuscleCategory::Core,
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MuscleGroup {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == needle)
            .ok_or_else(|| PlanError::unknown("muscle group", s))
    }
}

/// Style-specific label describing what the day trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanFormat {
    Push,
    Pull,
    Legs,
    Upper,
    Lower,
    FullBody,
    Running,
    Swimming,
    Calisthenics,
    Custom,
}

impl PlanFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pull => "pull",
            Self::Legs => "legs",
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::FullBody => "full_body",
            Self::Running => "running",
            Self::Swimming => "swimming",
            Self::Calisthenics => "calisthenics",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for PlanFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanMode {
    Volume,
    Size,
    Bodyweight,
    Dumbbell,
    Skill,
    Endurance,
    MuscleSelection,
}

impl PlanMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Size => "size",
            Self::Bodyweight => "bodyweight",
            Self::Dumbbell => "dumbbell",
            Self::Skill => "skill",
            Self::Endurance => "endurance",
            Self::MuscleSelection => "muscle_selection",
        }
    }
}

impl fmt::Display for PlanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One prescribed movement inside a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    /// `None` for time-based or "as controlled" work.
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub is_main_lift: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<String>,
}

impl Exercise {
    /// Owned copy of a catalog template; missing reps stay empty.
    #[must_use]
    pub fn from_template(template: &ExerciseTemplate) -> Self {
        Self {
            name: template.name.to_string(),
            sets: template.sets,
            reps: template.reps.unwrap_or_default().to_string(),
            is_main_lift: template.main,
            tempo: None,
            rest: None,
        }
    }

    /// Set count used for duration math: non-numeric work counts once.
    #[must_use]
    pub fn duration_sets(&self) -> u32 {
        self.sets.unwrap_or(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    #[default]
    Standard,
    Calisthenics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub title: String,
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub kind: BlockKind,
}

impl Block {
    #[must_use]
    pub fn standard(title: &str, exercises: Vec<Exercise>) -> Self {
        Self {
            title: title.to_string(),
            exercises,
            kind: BlockKind::Standard,
        }
    }

    #[must_use]
    pub fn calisthenics(exercises: Vec<Exercise>) -> Self {
        Self {
            title: "Calisthenics".to_string(),
            exercises,
            kind: BlockKind::Calisthenics,
        }
    }
}

/// Position of an exercise inside a plan: the join key between logged
/// weights and the plan snapshot. Serialized as `"<block>.<exercise>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseSlot {
    pub block: usize,
    pub exercise: usize,
}

impl ExerciseSlot {
    #[must_use]
    pub const fn new(block: usize, exercise: usize) -> Self {
        Self { block, exercise }
    }
}

impl fmt::Display for ExerciseSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.block, self.exercise)
    }
}

impl FromStr for ExerciseSlot {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (block, exercise) = s
            .trim()
            .split_once('.')
            .ok_or_else(|| PlanError::unknown("exercise slot", s))?;
        let block = block
            .parse()
            .map_err(|_| PlanError::unknown("exercise slot", s))?;
        let exercise = exercise
            .parse()
            .map_err(|_| PlanError::unknown("exercise slot", s))?;
        Ok(Self { block, exercise })
    }
}

impl Serialize for ExerciseSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExerciseSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A generated daily workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub date_key: NaiveDate,
    pub style: Style,
    pub format: PlanFormat,
    pub mode: PlanMode,
    pub level: Level,
    pub goal: Goal,
    pub equipment: Equipment,
    pub blocks: Vec<Block>,
    pub finisher: Vec<String>,
    #[serde(default)]
    pub focus_tags: FocusTags,
    pub estimated_minutes: u32,
    #[serde(default)]
    pub custom_muscles: MuscleSelection,
    #[serde(default)]
    pub affirmation: String,
}

impl Plan {
    /// Sum of numeric set counts across every block.
    #[must_use]
    pub fn total_sets(&self) -> u32 {
        self.exercises().filter_map(|(_, ex)| ex.sets).sum()
    }

    /// Every exercise paired with its slot, in display order.
    pub fn exercises(&self) -> impl Iterator<Item = (ExerciseSlot, &Exercise)> {
        self.blocks.iter().enumerate().flat_map(|(bi, block)| {
            block
                .exercises
                .iter()
                .enumerate()
                .map(move |(ei, ex)| (ExerciseSlot::new(bi, ei), ex))
        })
    }

    #[must_use]
    pub fn exercise_at(&self, slot: ExerciseSlot) -> Option<&Exercise> {
        self.blocks.get(slot.block)?.exercises.get(slot.exercise)
    }

    #[must_use]
    pub fn is_main_lift(&self, slot: ExerciseSlot) -> bool {
        self.exercise_at(slot).is_some_and(|ex| ex.is_main_lift)
    }

    pub fn calisthenics_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Calisthenics)
    }
}
