use std::collections::HashMap;
use std::fmt;
use serde::{Serialize, Deserialize};

/// One CSV record: column name -> cell value
pub type RawRow = HashMap<String, String>;

pub const NAME_COLUMN: &str = "Name";
pub const SURNAME_COLUMN: &str = "Surname";
pub const PHONE_COLUMN: &str = "WhatsApp Number";

/// Preference columns in priority order (first, second, last)
pub const PREFERENCE_COLUMNS: [&str; 3] = [
    "Preferred Time Slot",
    "Second Preferred Time Slot",
    "Last Preferred Time Slot",
];

/// Country code put in front of every derived phone number
const PHONE_PREFIX: &str = "+27";

/// A respondent as shown on the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub surname: String,
    pub phone: String,
}

impl Person {
    /// Builds a person from a sheet row. Missing cells become empty strings,
    /// so a blank row still yields a (blank) person.
    pub fn from_row(row: &RawRow) -> Self {
        let cell = |column: &str| row.get(column).cloned().unwrap_or_default();
        Person {
            name: cell(NAME_COLUMN),
            surname: cell(SURNAME_COLUMN),
            phone: derive_phone(row.get(PHONE_COLUMN).map(String::as_str).unwrap_or("")),
        }
    }

    /// "Name Surname"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Converts a local number to international form: keep digits only, drop the
/// trunk prefix (first digit) and prepend +27. Empty input stays empty.
pub fn derive_phone(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let national = digits.get(1..).unwrap_or("");
    format!("{}{}", PHONE_PREFIX, national)
}

/// One of the 24 hourly buckets (00:00 .. 23:00)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotHour(u8);

pub const SLOT_COUNT: usize = 24;

impl SlotHour {
    /// The whole bucket universe in ascending order
    pub const ALL: [SlotHour; SLOT_COUNT] = {
        let mut hours = [SlotHour(0); SLOT_COUNT];
        let mut i = 0;
        while i < SLOT_COUNT {
            hours[i] = SlotHour(i as u8);
            i += 1;
        }
        hours
    };

    pub fn new(hour: u8) -> Option<Self> {
        if (hour as usize) < SLOT_COUNT {
            Some(SlotHour(hour))
        } else {
            None
        }
    }

    pub fn hour(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Label used as the bucket key, e.g. "07:00"
    pub fn label(self) -> String {
        format!("{:02}:00", self.0)
    }
}

impl fmt::Display for SlotHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

/// A slot together with the people assigned to it, in assignment order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub time: String,
    pub people: Vec<Person>,
}

impl TimeSlot {
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

/// Something that went wrong with a single row. Rows with issues are still
/// processed; only `Unassigned` means the person is missing from the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    InvalidTime {
        row: usize,
        column: String,
        value: String,
        reason: String,
    },
    OffHourPreference {
        row: usize,
        column: String,
        label: String,
    },
    Unassigned {
        row: usize,
        name: String,
        surname: String,
    },
}

impl Issue {
    pub fn row(&self) -> usize {
        match self {
            Issue::InvalidTime { row, .. }
            | Issue::OffHourPreference { row, .. }
            | Issue::Unassigned { row, .. } => *row,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::InvalidTime { row, column, value, reason } => {
                write!(f, "row {}: {} {:?} is not a valid time ({})", row, column, value, reason)
            }
            Issue::OffHourPreference { row, column, label } => {
                write!(f, "row {}: {} {} does not fall on the hour", row, column, label)
            }
            Issue::Unassigned { row, name, surname } => {
                write!(f, "row {}: could not assign {} {}", row, name, surname)
            }
        }
    }
}

/// Result of one assignment run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub slots: Vec<TimeSlot>, // always 24, ascending
    pub issues: Vec<Issue>,
}

impl Assignment {
    pub fn total_assigned(&self) -> usize {
        self.slots.iter().map(|s| s.people.len()).sum()
    }

    pub fn unassigned_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, Issue::Unassigned { .. }))
            .count()
    }
}
