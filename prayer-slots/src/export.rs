use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::report::export_rows;
use crate::schedule::TimeSlot;

/// Writes the roster as CSV with a Time,People,Status header.
/// People in the same slot are separated by newlines inside one quoted cell.
pub fn write_roster_csv<W: Write>(out: W, slots: &[&TimeSlot]) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(out);

    for row in export_rows(slots.iter().copied()) {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the roster to a CSV file, replacing any existing file
pub fn export_roster_to_csv(slots: &[&TimeSlot], csv_path: &Path) -> Result<(), csv::Error> {
    let file = std::fs::File::create(csv_path)?;
    write_roster_csv(file, slots)
}

/// CSV export as an in-memory string, for HTTP downloads
pub fn roster_csv_string(slots: &[&TimeSlot]) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    write_roster_csv(&mut buf, slots)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
