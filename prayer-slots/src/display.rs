use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::report::Summary;
use crate::schedule::{Issue, Person, TimeSlot};

/// Formats a person as "Name Surname (phone)", leaving out an empty phone
pub fn format_person(person: &Person) -> String {
    if person.phone.is_empty() {
        person.full_name()
    } else {
        format!("{} ({})", person.full_name(), person.phone)
    }
}

/// Writes the roster in the format: HH:MM name (phone), name (phone)
pub fn write_roster<W: Write>(
    out: &mut W,
    title: &str,
    slots: &[&TimeSlot],
) -> std::io::Result<()> {
    writeln!(out, "** {} **", title)?;

    for slot in slots {
        if slot.is_empty() {
            writeln!(out, "{} [EMPTY]", slot.time)?;
        } else {
            let people: Vec<String> = slot.people.iter().map(format_person).collect();
            writeln!(out, "{} {}", slot.time, people.join(", "))?;
        }
    }

    Ok(())
}

/// Writes the roster to a text file
pub fn write_roster_to_file(
    title: &str,
    slots: &[&TimeSlot],
    filename: &Path,
) -> std::io::Result<()> {
    let mut file = File::create(filename)?;
    write_roster(&mut file, title, slots)
}

/// Prints the roster, coverage numbers and any row issues
pub fn print_roster(title: &str, slots: &[&TimeSlot], summary: &Summary) {
    println!("\n=== {} ===", title);
    println!("Total assigned: {}", summary.total_assigned);
    println!("Empty slots: {}", summary.empty_slots);
    println!("Filled: {}%", summary.fill_percent);
    match summary.least_filled {
        Some(n) => println!("Least filled: {} person(s) at {}", n, summary.least_filled_times.join(", ")),
        None => println!("Least filled: N/A"),
    }

    if summary.unassigned > 0 {
        println!("⚠️  Unassigned people ({}):", summary.unassigned);
        for issue in summary.issues.iter().filter(|i| matches!(i, Issue::Unassigned { .. })) {
            println!("  - {}", issue);
        }
    }

    let other_issues: Vec<&Issue> = summary
        .issues
        .iter()
        .filter(|i| !matches!(i, Issue::Unassigned { .. }))
        .collect();
    if !other_issues.is_empty() {
        println!("Row issues ({}):", other_issues.len());
        for issue in other_issues {
            println!("  - {}", issue);
        }
    }

    println!("\nRoster by time slot:");
    for slot in slots {
        if slot.is_empty() {
            println!("  {} -> [EMPTY]", slot.time);
        } else {
            for (i, person) in slot.people.iter().enumerate() {
                let time = if i == 0 { slot.time.as_str() } else { "     " };
                println!("  {} -> {}", time, format_person(person));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(time: &str, people: Vec<Person>) -> TimeSlot {
        TimeSlot {
            time: time.to_string(),
            people,
        }
    }

    #[test]
    fn roster_text_marks_empty_slots() {
        let filled = slot(
            "07:00",
            vec![
                Person {
                    name: "Grace".to_string(),
                    surname: "Ndlovu".to_string(),
                    phone: "+27831112222".to_string(),
                },
                Person {
                    name: "Ben".to_string(),
                    surname: "Smit".to_string(),
                    phone: String::new(),
                },
            ],
        );
        let empty = slot("08:00", Vec::new());

        let mut out = Vec::new();
        write_roster(&mut out, "Prayer Slots", &[&filled, &empty]).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "** Prayer Slots **\n07:00 Grace Ndlovu (+27831112222), Ben Smit\n08:00 [EMPTY]\n"
        );
    }
}
