use super::types::{Person, SlotHour, TimeSlot, SLOT_COUNT};

/// The 24 buckets for one run. Shape is fixed; only the lists grow.
#[derive(Debug, Clone, Default)]
pub struct SlotBoard {
    buckets: [Vec<Person>; SLOT_COUNT],
}

impl SlotBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupancy(&self, slot: SlotHour) -> usize {
        self.buckets[slot.index()].len()
    }

    pub fn place(&mut self, slot: SlotHour, person: Person) {
        self.buckets[slot.index()].push(person);
    }

    /// Converts the board into the ordered 00:00 .. 23:00 slot list
    pub fn into_time_slots(self) -> Vec<TimeSlot> {
        SlotHour::ALL
            .iter()
            .zip(self.buckets)
            .map(|(slot, people)| TimeSlot {
                time: slot.label(),
                people,
            })
            .collect()
    }
}

/// Placement rules, tried in this order until one finds a home
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementRule {
    /// A preferred slot nobody holds yet
    EmptySlot,
    /// A preferred slot with exactly one person
    SingleOccupant,
    /// Any preferred slot, however full
    AnyPreferred,
}

pub const PLACEMENT_RULES: [PlacementRule; 3] = [
    PlacementRule::EmptySlot,
    PlacementRule::SingleOccupant,
    PlacementRule::AnyPreferred,
];

impl PlacementRule {
    pub fn accepts(self, occupancy: usize) -> bool {
        match self {
            PlacementRule::EmptySlot => occupancy == 0,
            PlacementRule::SingleOccupant => occupancy == 1,
            PlacementRule::AnyPreferred => true,
        }
    }

    /// First preferred slot (in preference order) this rule accepts
    pub fn pick(self, board: &SlotBoard, preferences: &[SlotHour]) -> Option<SlotHour> {
        preferences
            .iter()
            .copied()
            .find(|&slot| self.accepts(board.occupancy(slot)))
    }
}

/// Runs the rules in order and returns the chosen slot with the rule that chose it
pub fn choose_slot(board: &SlotBoard, preferences: &[SlotHour]) -> Option<(SlotHour, PlacementRule)> {
    PLACEMENT_RULES
        .iter()
        .find_map(|rule| rule.pick(board, preferences).map(|slot| (slot, *rule)))
}
