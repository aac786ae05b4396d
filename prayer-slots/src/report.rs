use serde::Serialize;

use crate::schedule::{Assignment, Issue, TimeSlot};

/// Slots a full slot is expected to hold when computing the fill percentage
const TARGET_PER_SLOT: usize = 2;

/// Keeps the slots with someone whose name or surname contains `term`
/// (case-insensitive). An empty term keeps every slot.
pub fn search_slots<'a>(slots: &'a [TimeSlot], term: &str) -> Vec<&'a TimeSlot> {
    if term.is_empty() {
        return slots.iter().collect();
    }
    let needle = term.to_lowercase();
    slots
        .iter()
        .filter(|slot| {
            slot.people.iter().any(|p| {
                p.name.to_lowercase().contains(&needle) || p.surname.to_lowercase().contains(&needle)
            })
        })
        .collect()
}

/// Overview of how well the chain is covered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_assigned: usize,
    pub empty_slots: usize,
    pub fill_percent: u32,
    pub least_filled: Option<usize>,
    pub least_filled_times: Vec<String>,
    pub unassigned: usize,
    pub issues: Vec<Issue>,
}

impl Summary {
    pub fn from_assignment(assignment: &Assignment) -> Self {
        let slots = &assignment.slots;
        let total_assigned = assignment.total_assigned();
        let empty_slots = slots.iter().filter(|s| s.is_empty()).count();

        let capacity = slots.len() * TARGET_PER_SLOT;
        let fill_percent = if capacity == 0 {
            0
        } else {
            (total_assigned as f64 / capacity as f64 * 100.0).round() as u32
        };

        // Smallest non-zero headcount; empty slots are already counted above
        let least_filled = slots
            .iter()
            .map(|s| s.people.len())
            .filter(|&n| n > 0)
            .min();
        let least_filled_times = match least_filled {
            Some(n) => slots
                .iter()
                .filter(|s| s.people.len() == n)
                .map(|s| s.time.clone())
                .collect(),
            None => Vec::new(),
        };

        Summary {
            total_assigned,
            empty_slots,
            fill_percent,
            least_filled,
            least_filled_times,
            unassigned: assignment.unassigned_count(),
            issues: assignment.issues.clone(),
        }
    }
}

/// One line of the downloadable roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "People")]
    pub people: String,
    #[serde(rename = "Status")]
    pub status: String,
}

impl ExportRow {
    pub fn from_slot(slot: &TimeSlot) -> Self {
        let people = if slot.is_empty() {
            "-".to_string()
        } else {
            slot.people
                .iter()
                .map(|p| format!("{} ({})", p.full_name(), p.phone))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let status = if slot.is_empty() {
            "-".to_string()
        } else {
            format!("Filled ({})", slot.people.len())
        };
        ExportRow {
            time: slot.time.clone(),
            people,
            status,
        }
    }
}

pub fn export_rows<'a, I>(slots: I) -> Vec<ExportRow>
where
    I: IntoIterator<Item = &'a TimeSlot>,
{
    slots.into_iter().map(ExportRow::from_slot).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{Person, SlotBoard, SlotHour};

    fn person(name: &str, surname: &str) -> Person {
        Person {
            name: name.to_string(),
            surname: surname.to_string(),
            phone: "+27821234567".to_string(),
        }
    }

    fn assignment(placements: &[(u8, Person)]) -> Assignment {
        let mut board = SlotBoard::new();
        for (hour, p) in placements {
            board.place(SlotHour::new(*hour).unwrap(), p.clone());
        }
        Assignment {
            slots: board.into_time_slots(),
            issues: Vec::new(),
        }
    }

    #[test]
    fn search_matches_name_or_surname_ignoring_case() {
        let a = assignment(&[(1, person("Lerato", "Mokoena")), (2, person("Johan", "Botha"))]);

        let hits = search_slots(&a.slots, "MOKO");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].time, "01:00");

        let hits = search_slots(&a.slots, "jo");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].time, "02:00");

        assert_eq!(search_slots(&a.slots, "").len(), 24);
        assert!(search_slots(&a.slots, "nobody").is_empty());
    }

    #[test]
    fn summary_counts_coverage() {
        let a = assignment(&[
            (1, person("a", "x")),
            (1, person("b", "x")),
            (2, person("c", "x")),
            (3, person("d", "x")),
        ]);
        let summary = Summary::from_assignment(&a);

        assert_eq!(summary.total_assigned, 4);
        assert_eq!(summary.empty_slots, 21);
        assert_eq!(summary.fill_percent, 8); // 4 of 48
        assert_eq!(summary.least_filled, Some(1));
        assert_eq!(summary.least_filled_times, vec!["02:00", "03:00"]);
        assert_eq!(summary.unassigned, 0);
    }

    #[test]
    fn summary_of_empty_roster() {
        let summary = Summary::from_assignment(&assignment(&[]));
        assert_eq!(summary.empty_slots, 24);
        assert_eq!(summary.least_filled, None);
        assert!(summary.least_filled_times.is_empty());
    }

    #[test]
    fn export_row_lists_people_and_status() {
        let a = assignment(&[(4, person("Nomsa", "Khumalo")), (4, person("Piet", "Nel"))]);
        let rows = export_rows(&a.slots);

        assert_eq!(rows[0].people, "-");
        assert_eq!(rows[0].status, "-");
        assert_eq!(rows[4].status, "Filled (2)");
        assert_eq!(
            rows[4].people,
            "Nomsa Khumalo (+27821234567)\nPiet Nel (+27821234567)"
        );
    }
}
