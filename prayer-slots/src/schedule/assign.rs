use tracing::{debug, warn};

use super::board::{choose_slot, SlotBoard};
use super::time_label::parse_time_label;
use super::types::{Assignment, Issue, Person, RawRow, SlotHour, PREFERENCE_COLUMNS};

/// Reads the three preference columns of a row, in priority order.
/// Returns the slots they name; anything unusable is pushed onto `issues`.
pub fn row_preferences(row_number: usize, row: &RawRow, issues: &mut Vec<Issue>) -> Vec<SlotHour> {
    let mut slots = Vec::with_capacity(PREFERENCE_COLUMNS.len());

    for column in PREFERENCE_COLUMNS {
        let value = row.get(column).map(String::as_str).unwrap_or("");
        match parse_time_label(value) {
            Ok(label) => match label.slot() {
                Some(slot) => slots.push(slot),
                None => {
                    warn!(row = row_number, column, %label, "preference is not on the hour");
                    issues.push(Issue::OffHourPreference {
                        row: row_number,
                        column: column.to_string(),
                        label: label.to_string(),
                    });
                }
            },
            Err(e) => {
                warn!(row = row_number, column, value, error = %e, "invalid time slot");
                issues.push(Issue::InvalidTime {
                    row: row_number,
                    column: column.to_string(),
                    value: value.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    slots
}

/// Places one person on the board using the placement rules.
/// Returns false when none of the preferences names a slot.
pub fn assign_person(board: &mut SlotBoard, person: Person, preferences: &[SlotHour]) -> bool {
    match choose_slot(board, preferences) {
        Some((slot, rule)) => {
            debug!(person = %person.full_name(), %slot, ?rule, "assigned");
            board.place(slot, person);
            true
        }
        None => false,
    }
}

/// Assigns every row to a prayer slot in a single forward pass.
///
/// Rows are handled in sheet order and each person is placed at most once:
/// an empty preferred slot first, then a preferred slot holding one person,
/// then any preferred slot. People without a single usable preference are
/// left out and reported as `Issue::Unassigned`.
pub fn assign_slots(rows: &[RawRow]) -> Assignment {
    let mut board = SlotBoard::new();
    let mut issues = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;
        let person = Person::from_row(row);
        let preferences = row_preferences(row_number, row, &mut issues);

        let (name, surname) = (person.name.clone(), person.surname.clone());
        if !assign_person(&mut board, person, &preferences) {
            warn!(row = row_number, name = %name, surname = %surname, "could not assign person");
            issues.push(Issue::Unassigned {
                row: row_number,
                name,
                surname,
            });
        }
    }

    Assignment {
        slots: board.into_time_slots(),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, prefs: [&str; 3]) -> RawRow {
        let mut row = RawRow::new();
        row.insert("Name".to_string(), name.to_string());
        row.insert("Surname".to_string(), "Test".to_string());
        row.insert("WhatsApp Number".to_string(), "0821234567".to_string());
        for (column, value) in PREFERENCE_COLUMNS.iter().zip(prefs) {
            row.insert(column.to_string(), value.to_string());
        }
        row
    }

    fn names_at(assignment: &Assignment, time: &str) -> Vec<String> {
        assignment
            .slots
            .iter()
            .find(|s| s.time == time)
            .map(|s| s.people.iter().map(|p| p.name.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn always_returns_all_slots_in_order() {
        let assignment = assign_slots(&[]);
        let times: Vec<&str> = assignment.slots.iter().map(|s| s.time.as_str()).collect();
        let expected: Vec<String> = (0..24).map(|h| format!("{:02}:00", h)).collect();
        assert_eq!(times, expected);
        assert!(assignment.issues.is_empty());
    }

    #[test]
    fn same_first_choice_stacks_through_every_rule() {
        let rows = vec![
            row("one", ["9:00:00 AM", "", ""]),
            row("two", ["9:00:00 AM", "", ""]),
            row("three", ["9:00:00 AM", "", ""]),
        ];
        let assignment = assign_slots(&rows);

        assert_eq!(names_at(&assignment, "09:00"), vec!["one", "two", "three"]);
        assert_eq!(assignment.total_assigned(), 3);
        let others_empty = assignment
            .slots
            .iter()
            .filter(|s| s.time != "09:00")
            .all(|s| s.people.is_empty());
        assert!(others_empty);
    }

    #[test]
    fn empty_preferred_slot_beats_earlier_choice() {
        let rows = vec![
            row("first", ["6:00:00 PM", "", ""]),
            row("second", ["6:00:00 PM", "7:00:00 PM", ""]),
        ];
        let assignment = assign_slots(&rows);

        assert_eq!(names_at(&assignment, "18:00"), vec!["first"]);
        assert_eq!(names_at(&assignment, "19:00"), vec!["second"]);
    }

    #[test]
    fn half_full_slot_beats_crowded_first_choice() {
        let rows = vec![
            row("a", ["1:00:00 AM", "", ""]),
            row("b", ["1:00:00 AM", "", ""]),
            row("c", ["2:00:00 AM", "", ""]),
            row("d", ["1:00:00 AM", "2:00:00 AM", ""]),
        ];
        let assignment = assign_slots(&rows);

        assert_eq!(names_at(&assignment, "01:00"), vec!["a", "b"]);
        assert_eq!(names_at(&assignment, "02:00"), vec!["c", "d"]);
    }

    #[test]
    fn distinct_first_choices_each_get_their_own_slot() {
        let rows: Vec<RawRow> = (1..=12)
            .map(|h| {
                let pref = format!("{}:00:00 PM", h);
                row(&format!("p{}", h), [pref.as_str(), "", ""])
            })
            .collect();
        let assignment = assign_slots(&rows);

        for slot in &assignment.slots {
            let hour: u8 = slot.time[..2].parse().unwrap();
            let expected = if hour >= 12 { 1 } else { 0 };
            assert_eq!(slot.people.len(), expected, "slot {}", slot.time);
        }
    }

    #[test]
    fn person_without_usable_preference_is_reported() {
        let rows = vec![
            row("lost", ["later", "13:00:00 PM", ""]),
            row("kept", ["", "", "3:00:00 AM"]),
        ];
        let assignment = assign_slots(&rows);

        assert_eq!(assignment.total_assigned(), 1);
        assert_eq!(names_at(&assignment, "03:00"), vec!["kept"]);
        assert_eq!(assignment.unassigned_count(), 1);
        assert!(assignment.issues.contains(&Issue::Unassigned {
            row: 1,
            name: "lost".to_string(),
            surname: "Test".to_string(),
        }));
        // three invalid cells on row 1, two empty cells on row 2
        let invalid = assignment
            .issues
            .iter()
            .filter(|i| matches!(i, Issue::InvalidTime { .. }))
            .count();
        assert_eq!(invalid, 5);
    }

    #[test]
    fn off_hour_preference_never_matches() {
        let rows = vec![row("half", ["4:30:00 PM", "", ""])];
        let assignment = assign_slots(&rows);

        assert_eq!(assignment.total_assigned(), 0);
        assert!(assignment.issues.contains(&Issue::OffHourPreference {
            row: 1,
            column: "Preferred Time Slot".to_string(),
            label: "16:30".to_string(),
        }));
    }

    #[test]
    fn blank_respondent_still_takes_a_slot() {
        let rows = vec![row("", ["5:00:00 AM", "", ""])];
        let assignment = assign_slots(&rows);

        let slot = &assignment.slots[5];
        assert_eq!(slot.people.len(), 1);
        assert_eq!(slot.people[0].name, "");
    }

    #[test]
    fn rerun_is_deterministic() {
        let rows = vec![
            row("a", ["10:00:00 PM", "11:00:00 PM", ""]),
            row("b", ["10:00:00 PM", "", ""]),
            row("c", ["11:00:00 PM", "10:00:00 PM", "12:00:00 AM"]),
        ];
        assert_eq!(assign_slots(&rows), assign_slots(&rows));
    }
}
