pub mod types;
pub mod time_label;
pub mod board;
pub mod assign;

pub use types::{Assignment, Issue, Person, RawRow, SlotHour, TimeSlot, SLOT_COUNT};
pub use time_label::{parse_time_label, TimeLabel, TimeLabelError};
pub use board::{PlacementRule, SlotBoard, PLACEMENT_RULES};
pub use assign::assign_slots;
