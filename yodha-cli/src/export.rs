use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use yodha_engine::{ExerciseSlot, Plan};

pub const CSV_HEADER: [&str; 7] = ["Block", "Exercise", "Sets", "Reps", "Tempo", "Rest", "Weight"];

/// One row per exercise; weights are joined by slot.
pub fn write_plan_csv<W: Write>(
    out: W,
    plan: &Plan,
    weights: &BTreeMap<ExerciseSlot, f64>,
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for (slot, exercise) in plan.exercises() {
        let sets = exercise.sets.map(|s| s.to_string()).unwrap_or_default();
        let weight = weights
            .get(&slot)
            .map(|w| format!("{w}"))
            .unwrap_or_default();
        writer.write_record([
            plan.blocks[slot.block].title.as_str(),
            exercise.name.as_str(),
            sets.as_str(),
            exercise.reps.as_str(),
            exercise.tempo.as_deref().unwrap_or_default(),
            exercise.rest.as_deref().unwrap_or_default(),
            weight.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use yodha_engine::{PlanOptions, generate_workout_plan};

    fn plan_for(date: NaiveDate) -> Plan {
        generate_workout_plan(date, &PlanOptions::default()).unwrap()
    }

    fn export_to_string(plan: &Plan, weights: &BTreeMap<ExerciseSlot, f64>) -> String {
        let mut buffer = Vec::new();
        write_plan_csv(&mut buffer, plan, weights).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn plan_export_has_header_and_one_row_per_exercise() {
        let plan = plan_for(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let mut weights = BTreeMap::new();
        weights.insert(ExerciseSlot::new(0, 0), 82.5);

        let text = export_to_string(&plan, &weights);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Block,Exercise,Sets,Reps,Tempo,Rest,Weight");
        assert_eq!(lines.len(), 1 + plan.exercises().count());
        assert!(lines[1].starts_with("Primary lifts,Barbell Bench Press,"));
        assert!(lines[1].ends_with(",Controlled 3-1-1,90s,82.5"));
    }

    #[test]
    fn delimiters_and_quotes_are_quoted() {
        let mut plan = plan_for(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        plan.blocks[0].title = "Primary, heavy".to_string();
        plan.blocks[0].exercises[0].name = "the \"big\" lift".to_string();

        let text = export_to_string(&plan, &BTreeMap::new());
        let first_row = text.lines().nth(1).unwrap();

        assert!(first_row.starts_with("\"Primary, heavy\",\"the \"\"big\"\" lift\","));

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "Primary, heavy");
        assert_eq!(&record[1], "the \"big\" lift");
    }

    #[test]
    fn untimed_rows_leave_tempo_and_weight_empty() {
        let plan = plan_for(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let text = export_to_string(&plan, &BTreeMap::new());
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let calisthenics: Vec<csv::StringRecord> = reader
            .records()
            .map(|record| record.unwrap())
            .filter(|record| &record[0] == "Calisthenics")
            .collect();
        assert_eq!(calisthenics.len(), 4);
        assert!(calisthenics.iter().all(|record| record[6].is_empty()));
    }
}
