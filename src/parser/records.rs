use anyhow::Result;

use super::dates::DateRange;

/// Cells of table header noise before the first record.
pub const HEADER_CELLS: usize = 4;

/// One complete calendar entry. Emitted only when all five fields are filled;
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Conference {
    pub event: String,
    pub name: String,
    pub dates: DateRange,
    pub location: String,
    pub deadline: String,
}

/// Which field the next cell fills. Cells arrive in fixed source order, so
/// the slot advances once per cell; a malformed date field still consumes
/// exactly one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Event,
    Name,
    Dates,
    Location,
    Deadline,
    Complete,
}

#[derive(Debug)]
pub struct ConferenceBuilder {
    slot: Slot,
    event: Option<String>,
    name: Option<String>,
    dates: Option<DateRange>,
    location: Option<String>,
    deadline: Option<String>,
}

impl ConferenceBuilder {
    pub fn new() -> Self {
        ConferenceBuilder {
            slot: Slot::Event,
            event: None,
            name: None,
            dates: None,
            location: None,
            deadline: None,
        }
    }

    /// Consume one cell, advancing to the next slot.
    pub fn push(&mut self, cell: &str) -> Result<()> {
        match self.slot {
            Slot::Event => {
                self.event = Some(cell.to_string());
                self.slot = Slot::Name;
            }
            Slot::Name => {
                self.name = Some(cell.to_string());
                self.slot = Slot::Dates;
            }
            Slot::Dates => {
                self.dates = Some(DateRange::parse(cell)?);
                self.slot = Slot::Location;
            }
            Slot::Location => {
                self.location = Some(cell.to_string());
                self.slot = Slot::Deadline;
            }
            Slot::Deadline => {
                self.deadline = Some(cell.to_string());
                self.slot = Slot::Complete;
            }
            Slot::Complete => unreachable!("cell pushed into a complete record"),
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.slot == Slot::Complete
    }

    fn build(self) -> Option<Conference> {
        Some(Conference {
            event: self.event?,
            name: self.name?,
            dates: self.dates?,
            location: self.location?,
            deadline: self.deadline?,
        })
    }
}

/// Group the flat cell stream into complete conferences.
///
/// The first HEADER_CELLS cells are header noise and never reach a record.
/// Every five cells after that is one record; a trailing partial record is
/// dropped, matching the calendar's own truncation behavior.
pub fn group_records(cells: &[String]) -> Result<Vec<Conference>> {
    let mut records = Vec::new();
    let mut builder = ConferenceBuilder::new();
    for cell in cells.iter().skip(HEADER_CELLS) {
        builder.push(cell)?;
        if builder.is_complete() {
            let done = std::mem::replace(&mut builder, ConferenceBuilder::new());
            records.extend(done.build());
        }
    }
    Ok(records)
}

// ── Tests ──
