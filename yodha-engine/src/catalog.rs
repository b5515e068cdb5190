//! Static exercise tables.
//!
//! Lookups are indexed by closed enums, so every combination the composer
//! can ask for has a table at compile time. Templates carry baseline
//! set/rep prescriptions; the composer copies and scales them.
use crate::constants::FINISHER_LENGTH;
use crate::plan::{Goal, MuscleGroup};

/// Immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseTemplate {
    pub name: &'static str,
    pub sets: Option<u32>,
    pub reps: Option<&'static str>,
    pub main: bool,
}

const fn main(name: &'static str, sets: u32, reps: &'static str) -> ExerciseTemplate {
    ExerciseTemplate {
        name,
        sets: Some(sets),
        reps: Some(reps),
        main: true,
    }
}

const fn acc(name: &'static str, sets: u32, reps: &'static str) -> ExerciseTemplate {
    ExerciseTemplate {
        name,
        sets: Some(sets),
        reps: Some(reps),
        main: false,
    }
}

/// Movement with a set count but no preset rep scheme.
const fn open(name: &'static str, sets: u32) -> ExerciseTemplate {
    ExerciseTemplate {
        name,
        sets: Some(sets),
        reps: None,
        main: false,
    }
}

/// Time-based or "as controlled" work without a numeric set count.
const fn timed(name: &'static str, reps: &'static str) -> ExerciseTemplate {
    ExerciseTemplate {
        name,
        sets: None,
        reps: Some(reps),
        main: false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GymFormat {
    Push,
    Pull,
    Legs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GymMode {
    Volume,
    Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    Upper,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activity {
    Running,
    Swimming,
}

/// Where a custom plan will be trained, derived from equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Gym,
    Home,
    Outdoor,
}

// Gym ----------------------------------------------------------------------

const PUSH_VOLUME: [ExerciseTemplate; 5] = [
    main("Barbell Bench Press", 4, "8–10"),
    acc("Incline Dumbbell Press", 3, "10–12"),
    acc("Seated Dumbbell Shoulder Press", 3, "10–12"),
    acc("Cable Fly", 3, "12–15"),
    acc("Triceps Rope Pushdown", 3, "12–15"),
];

const PUSH_SIZE: [ExerciseTemplate; 5] = [
    main("Standing Overhead Press", 4, "5–6"),
    acc("Weighted Dips", 3, "6–8"),
    acc("Close-Grip Bench Press", 3, "6–8"),
    acc("Lateral Raise", 3, "12–15"),
    acc("Overhead Triceps Extension", 3, "10–12"),
];

const PULL_VOLUME: [ExerciseTemplate; 5] = [
    main("Weighted Pull-up", 4, "6–8"),
    acc("Chest-Supported Row", 3, "10–12"),
    acc("Lat Pulldown", 3, "10–12"),
    acc("Face Pull", 3, "15–20"),
    acc("Incline Dumbbell Curl", 3, "10–12"),
];

const PULL_SIZE: [ExerciseTemplate; 5] = [
    main("Conventional Deadlift", 4, "3–5"),
    acc("Pendlay Row", 3, "5–6"),
    acc("Single-Arm Dumbbell Row", 3, "8–10"),
    acc("Rear Delt Fly", 3, "12–15"),
    acc("Hammer Curl", 3, "8–10"),
];

const LEGS_VOLUME: [ExerciseTemplate; 5] = [
    main("Back Squat", 4, "8–10"),
    acc("Romanian Deadlift", 3, "10–12"),
    acc("Walking Lunge", 3, "12 each leg"),
    acc("Seated Leg Curl", 3, "12–15"),
    acc("Standing Calf Raise", 3, "15–20"),
];

const LEGS_SIZE: [ExerciseTemplate; 5] = [
    main("Front Squat", 4, "4–6"),
    acc("Hip Thrust", 3, "6–8"),
    acc("Hack Squat", 3, "8–10"),
    acc("Nordic Hamstring Curl", 3, "5–6"),
    acc("Hanging Leg Raise", 3, "10–15"),
];

/// Gym push/pull/legs table for the given mode.
#[must_use]
pub const fn gym(format: GymFormat, mode: GymMode) -> &'static [ExerciseTemplate] {
    match (format, mode) {
        (GymFormat::Push, GymMode::Volume) => &PUSH_VOLUME,
        (GymFormat::Push, GymMode::Size) => &PUSH_SIZE,
        (GymFormat::Pull, GymMode::Volume) => &PULL_VOLUME,
        (GymFormat::Pull, GymMode::Size) => &PULL_SIZE,
        (GymFormat::Legs, GymMode::Volume) => &LEGS_VOLUME,
        (GymFormat::Legs, GymMode::Size) => &LEGS_SIZE,
    }
}

// Home ---------------------------------------------------------------------

const HOME_MINIMAL: [ExerciseTemplate; 5] = [
    main("Tempo Push-up", 4, "10–15"),
    acc("Bulgarian Split Squat", 3, "10 each leg"),
    acc("Backpack Row", 3, "12–15"),
    acc("Single-Leg Glute Bridge", 3, "12 each leg"),
    acc("Pike Push-up", 3, "8–12"),
];

const HOME_DUMBBELL_UPPER: [ExerciseTemplate; 5] = [
    main("Dumbbell Floor Press", 4, "8–12"),
    acc("One-Arm Dumbbell Row", 3, "10 each arm"),
    acc("Arnold Press", 3, "10–12"),
    acc("Dumbbell Pullover", 3, "12–15"),
    acc("Dumbbell Curl to Press", 3, "10–12"),
];

const HOME_DUMBBELL_LOWER: [ExerciseTemplate; 5] = [
    main("Goblet Squat", 4, "10–12"),
    acc("Dumbbell Romanian Deadlift", 3, "10–12"),
    acc("Reverse Lunge", 3, "10 each leg"),
    acc("Dumbbell Step-up", 3, "10 each leg"),
    acc("Single-Leg Calf Raise", 3, "15 each leg"),
];

#[must_use]
pub const fn home_minimal() -> &'static [ExerciseTemplate] {
    &HOME_MINIMAL
}

#[must_use]
pub const fn home_dumbbell(split: Split) -> &'static [ExerciseTemplate] {
    match split {
        Split::Upper => &HOME_DUMBBELL_UPPER,
        Split::Lower => &HOME_DUMBBELL_LOWER,
    }
}

// Outdoor ------------------------------------------------------------------

const RUNNING: [ExerciseTemplate; 4] = [
    main("Tempo Run Intervals", 4, "4 min on / 2 min easy"),
    acc("Hill Sprints", 3, "20s"),
    acc("Strides", 3, "100 m"),
    acc("Walking Lunges (grass)", 3, "20 steps"),
];

const SWIMMING: [ExerciseTemplate; 4] = [
    main("Freestyle Intervals", 4, "200 m"),
    acc("Kick Set", 3, "100 m"),
    acc("Pull Buoy Set", 3, "100 m"),
    acc("Sprint Repeats", 3, "50 m"),
];

#[must_use]
pub const fn outdoor(activity: Activity) -> &'static [ExerciseTemplate] {
    match activity {
        Activity::Running => &RUNNING,
        Activity::Swimming => &SWIMMING,
    }
}

// Calisthenics -------------------------------------------------------------

const CALISTHENICS_POOL: [ExerciseTemplate; 8] = [
    acc("Pull-up", 3, "6–10"),
    acc("Push-up", 3, "12–20"),
    open("Bodyweight Squat", 3),
    acc("Parallel Bar Dip", 3, "8–12"),
    open("Inverted Row", 3),
    acc("Hollow Body Hold", 3, "30s"),
    acc("Pistol Squat Progression", 3, "5 each leg"),
    open("Hanging Knee Raise", 3),
];

/// Shared bodyweight movement pool; some entries leave reps to the composer.
#[must_use]
pub const fn calisthenics_pool() -> &'static [ExerciseTemplate] {
    &CALISTHENICS_POOL
}

// Custom muscle catalog ----------------------------------------------------

/// Per-context lists for one muscle group.
#[derive(Debug, Clone, Copy)]
struct MuscleEntry {
    gym: [ExerciseTemplate; 3],
    home: [ExerciseTemplate; 3],
    outdoor: [ExerciseTemplate; 3],
}

const CHEST: MuscleEntry = MuscleEntry {
    gym: [
        main("Barbell Bench Press", 4, "6–10"),
        acc("Incline Dumbbell Press", 3, "8–12"),
        acc("Pec Deck Fly", 3, "12–15"),
    ],
    home: [
        main("Dumbbell Floor Press", 4, "8–12"),
        acc("Deficit Push-up", 3, "10–15"),
        acc("Dumbbell Fly", 3, "12–15"),
    ],
    outdoor: [
        main("Bench Push-up", 4, "12–20"),
        acc("Decline Push-up", 3, "10–15"),
        timed("Isometric Press Hold", "30s"),
    ],
};

const BACK: MuscleEntry = MuscleEntry {
    gym: [
        main("Barbell Row", 4, "6–10"),
        acc("Lat Pulldown", 3, "10–12"),
        acc("Seated Cable Row", 3, "10–12"),
    ],
    home: [
        main("One-Arm Dumbbell Row", 4, "10 each arm"),
        acc("Doorframe Row", 3, "12–15"),
        acc("Band Pull-apart", 3, "15–20"),
    ],
    outdoor: [
        main("Bar Pull-up", 4, "5–10"),
        acc("Australian Row", 3, "10–15"),
        acc("Scapular Pull", 3, "10–12"),
    ],
};

const SHOULDERS: MuscleEntry = MuscleEntry {
    gym: [
        main("Seated Military Press", 4, "6–10"),
        acc("Cable Lateral Raise", 3, "12–15"),
        acc("Reverse Pec Deck", 3, "12–15"),
    ],
    home: [
        main("Arnold Press", 4, "8–12"),
        acc("Dumbbell Lateral Raise", 3, "12–15"),
        acc("Pike Push-up", 3, "8–12"),
    ],
    outdoor: [
        main("Handstand Wall Hold", 4, "20–30s"),
        acc("Pike Push-up", 3, "8–12"),
        timed("Arm Circles", "60s"),
    ],
};

const BICEPS: MuscleEntry = MuscleEntry {
    gym: [
        main("EZ-Bar Curl", 4, "8–12"),
        acc("Preacher Curl", 3, "10–12"),
        acc("Cable Curl", 3, "12–15"),
    ],
    home: [
        main("Dumbbell Curl", 4, "10–12"),
        acc("Hammer Curl", 3, "10–12"),
        acc("Concentration Curl", 3, "12 each arm"),
    ],
    outdoor: [
        main("Chin-up", 4, "5–10"),
        acc("Towel Curl", 3, "12–15"),
        acc("Bar Hang Curl Negative", 3, "5"),
    ],
};

const TRICEPS: MuscleEntry = MuscleEntry {
    gym: [
        main("Close-Grip Bench Press", 4, "6–10"),
        acc("Rope Pushdown", 3, "12–15"),
        acc("Overhead Cable Extension", 3, "10–12"),
    ],
    home: [
        main("Diamond Push-up", 4, "8–15"),
        acc("Bench Dip", 3, "10–15"),
        acc("Dumbbell Skull Crusher", 3, "10–12"),
    ],
    outdoor: [
        main("Parallel Bar Dip", 4, "8–12"),
        acc("Bench Dip", 3, "12–15"),
        acc("Triceps Push-up", 3, "8–12"),
    ],
};

const QUADS: MuscleEntry = MuscleEntry {
    gym: [
        main("Back Squat", 4, "5–8"),
        acc("Leg Press", 3, "10–12"),
        acc("Leg Extension", 3, "12–15"),
    ],
    home: [
        main("Goblet Squat", 4, "10–12"),
        acc("Bulgarian Split Squat", 3, "10 each leg"),
        timed("Wall Sit", "45s"),
    ],
    outdoor: [
        main("Hill Sprint", 4, "15s"),
        acc("Jump Squat", 3, "10–12"),
        acc("Step-up on Bench", 3, "12 each leg"),
    ],
};

const HAMSTRINGS: MuscleEntry = MuscleEntry {
    gym: [
        main("Romanian Deadlift", 4, "6–10"),
        acc("Lying Leg Curl", 3, "10–12"),
        acc("Good Morning", 3, "8–10"),
    ],
    home: [
        main("Dumbbell Romanian Deadlift", 4, "10–12"),
        acc("Single-Leg RDL", 3, "10 each leg"),
        acc("Hamstring Slide", 3, "10–12"),
    ],
    outdoor: [
        main("Sprint Repeats", 4, "40 m"),
        acc("Nordic Curl on Bar", 3, "5–6"),
        acc("Single-Leg Bridge", 3, "12 each leg"),
    ],
};

const GLUTES: MuscleEntry = MuscleEntry {
    gym: [
        main("Barbell Hip Thrust", 4, "8–10"),
        acc("Cable Kickback", 3, "12–15"),
        acc("Sumo Deadlift", 3, "6–8"),
    ],
    home: [
        main("Dumbbell Hip Thrust", 4, "10–12"),
        acc("Frog Pump", 3, "20"),
        acc("Curtsy Lunge", 3, "10 each leg"),
    ],
    outdoor: [
        main("Stair Bounds", 4, "10"),
        acc("Lateral Lunge", 3, "10 each leg"),
        acc("Glute Bridge March", 3, "20"),
    ],
};

const CALVES: MuscleEntry = MuscleEntry {
    gym: [
        main("Standing Calf Raise", 4, "10–15"),
        acc("Seated Calf Raise", 3, "12–15"),
        acc("Leg Press Calf Press", 3, "15–20"),
    ],
    home: [
        main("Single-Leg Calf Raise", 4, "12 each leg"),
        acc("Tibialis Raise", 3, "15–20"),
        timed("Calf Raise Hold", "30s"),
    ],
    outdoor: [
        main("Pogo Hops", 4, "30"),
        acc("Stair Calf Raise", 3, "15–20"),
        acc("Skipping", 3, "60s"),
    ],
};

const CORE: MuscleEntry = MuscleEntry {
    gym: [
        main("Cable Crunch", 4, "12–15"),
        acc("Hanging Leg Raise", 3, "10–15"),
        acc("Pallof Press", 3, "10 each side"),
    ],
    home: [
        main("Dead Bug", 4, "10 each side"),
        timed("Plank", "45s"),
        acc("Bicycle Crunch", 3, "20"),
    ],
    outdoor: [
        main("Hanging Knee Raise", 4, "10–15"),
        acc("Mountain Climber", 3, "30s"),
        timed("Side Plank", "30s each side"),
    ],
};

const FOREARMS: MuscleEntry = MuscleEntry {
    gym: [
        main("Farmer's Carry", 4, "40 m"),
        acc("Wrist Curl", 3, "15–20"),
        acc("Reverse Curl", 3, "12–15"),
    ],
    home: [
        main("Dumbbell Farmer's Hold", 4, "40s"),
        acc("Dumbbell Wrist Curl", 3, "15–20"),
        acc("Towel Wring", 3, "10"),
    ],
    outdoor: [
        main("Dead Hang", 4, "30–45s"),
        acc("Towel Hang", 3, "20s"),
        acc("Fingertip Push-up Hold", 3, "15s"),
    ],
};

const fn muscle_entry(muscle: MuscleGroup) -> &'static MuscleEntry {
    match muscle {
        MuscleGroup::Chest => &CHEST,
        MuscleGroup::Back => &BACK,
        MuscleGroup::Shoulders => &SHOULDERS,
        MuscleGroup::Biceps => &BICEPS,
        MuscleGroup::Triceps => &TRICEPS,
        MuscleGroup::Quads => &QUADS,
        MuscleGroup::Hamstrings => &HAMSTRINGS,
        MuscleGroup::Glutes => &GLUTES,
        MuscleGroup::Calves => &CALVES,
        MuscleGroup::Core => &CORE,
        MuscleGroup::Forearms => &FOREARMS,
    }
}

/// Three exercises for a muscle group in a context; the first is the main lift.
#[must_use]
pub const fn muscle(group: MuscleGroup, context: Context) -> &'static [ExerciseTemplate] {
    let entry = muscle_entry(group);
    match context {
        Context::Gym => &entry.gym,
        Context::Home => &entry.home,
        Context::Outdoor => &entry.outdoor,
    }
}

// Finishers ----------------------------------------------------------------

const HIIT_LIBRARY: [[&str; FINISHER_LENGTH]; 4] = [
    [
        "Jumping Jacks",
        "Kettlebell Swings",
        "Mountain Climbers",
        "Burpees",
        "High Knees",
        "Squat Jumps",
        "Plank Shoulder Taps",
    ],
    [
        "Skater Hops",
        "Push-up to Renegade",
        "Jump Lunges",
        "Bear Crawl",
        "Tuck Jumps",
        "Speed Squats",
        "Flutter Kicks",
    ],
    [
        "Superman Hold Pulses",
        "Sprint in Place",
        "Lateral Shuffles",
        "Burpee Broad Jump",
        "Bicycle Crunches",
        "Star Jumps",
        "Hollow Rocks",
    ],
    [
        "Step-back Lunges",
        "Good Mornings",
        "March in Place",
        "Dumbbell Thrusters",
        "Inchworms",
        "Glute Bridge Pulses",
        "Slow Mountain Climbers",
    ],
];

/// HIIT finisher sequences; every sequence has exactly seven movements.
#[must_use]
pub const fn hiit_library() -> &'static [[&'static str; FINISHER_LENGTH]] {
    &HIIT_LIBRARY
}

// Goal focus ---------------------------------------------------------------

#[must_use]
pub const fn focus_tags(goal: Goal) -> [&'static str; 3] {
    match goal {
        Goal::Strength => [
            "Heavy compounds",
            "Full rest between sets",
            "Leave 1–2 reps in reserve",
        ],
        Goal::Hypertrophy => ["Time under tension", "Chase the pump", "Progressive volume"],
        Goal::Fatloss => ["Short rest", "Keep heart rate up", "Finish strong"],
        Goal::Endurance => ["Steady breathing", "Higher reps", "Pace control"],
    }
}

// Affirmations -------------------------------------------------------------

const AFFIRMATIONS: [&str; 14] = [
    "No excuses. No mercy. Just steel.",
    "Every rep forges your destiny.",
    "Strength is earned one set at a time.",
    "Push beyond yesterday, become unbreakable.",
    "Your iron will defines your arc.",
    "Sweat is your armour, pain is your forge.",
    "Rise. Grind. Conquer.",
    "Today's effort shapes tomorrow's hero.",
    "Hydrate. Dominate.",
    "Small plates. Big wins.",
    "Move clean. Grow mean.",
    "Respect the joints. Chase the pump.",
    "Today's work, tomorrow's armor.",
    "Consistency is the superpower.",
];

#[must_use]
pub const fn affirmations() -> &'static [&'static str] {
    &AFFIRMATIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gym_tables_lead_with_a_single_main_lift() {
        for format in [GymFormat::Push, GymFormat::Pull, GymFormat::Legs] {
            for mode in [GymMode::Volume, GymMode::Size] {
                let table = gym(format, mode);
                assert_eq!(table.len(), 5, "{format:?}/{mode:?}");
                assert!(table[0].main);
                assert!(table[1..].iter().all(|ex| !ex.main));
            }
        }
    }

    #[test]
    fn home_and_outdoor_tables_have_expected_sizes() {
        assert_eq!(home_minimal().len(), 5);
        assert_eq!(home_dumbbell(Split::Upper).len(), 5);
        assert_eq!(home_dumbbell(Split::Lower).len(), 5);
        assert_eq!(outdoor(Activity::Running).len(), 4);
        assert_eq!(outdoor(Activity::Swimming).len(), 4);
    }

    #[test]
    fn calisthenics_pool_has_depth_and_open_rep_entries() {
        let pool = calisthenics_pool();
        assert!(pool.len() >= 6);
        assert!(pool.iter().any(|ex| ex.reps.is_none()));
        assert!(pool.iter().all(|ex| ex.sets.is_some()));
    }

    #[test]
    fn every_muscle_has_three_exercises_per_context() {
        for group in MuscleGroup::ALL {
            for context in [Context::Gym, Context::Home, Context::Outdoor] {
                let list = muscle(group, context);
                assert_eq!(list.len(), 3, "{group:?}/{context:?}");
                assert!(list[0].main);
            }
        }
    }

    #[test]
    fn finisher_library_sequences_have_seven_moves() {
        assert!(hiit_library().len() >= 3);
        assert!(hiit_library().iter().all(|seq| seq.len() == 7));
    }

    #[test]
    fn every_goal_has_three_focus_tags() {
        for goal in Goal::ALL {
            assert!(focus_tags(goal).iter().all(|tag| !tag.is_empty()));
        }
    }
}
