use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Stored in the date columns when the source field is not a two-part range.
pub const UNAVAILABLE: &str = "N/A";

const SOURCE_FORMAT: &str = "%b %d, %Y";

/// A conference's running dates, or an explicit marker that the source field
/// could not be read as a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Parsed { start: NaiveDate, end: NaiveDate },
    Unavailable,
}

impl DateRange {
    /// Split a raw "Jun 15, 2024 - Jun 17, 2024" field on its hyphen.
    ///
    /// Anything other than exactly two parts (TBD, multi-range entries) is not
    /// a plain range and both dates become unavailable. Two parts that fail
    /// strict "%b %d, %Y" parsing are an error, not unavailable.
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split('-').collect();
        if parts.len() != 2 {
            return Ok(DateRange::Unavailable);
        }
        let start = NaiveDate::parse_from_str(parts[0].trim(), SOURCE_FORMAT)
            .with_context(|| format!("Bad start date in range {:?}", raw))?;
        let end = NaiveDate::parse_from_str(parts[1].trim(), SOURCE_FORMAT)
            .with_context(|| format!("Bad end date in range {:?}", raw))?;
        Ok(DateRange::Parsed { start, end })
    }

    /// First date as stored in the Events table: ISO date or the N/A sentinel.
    pub fn start_sql(&self) -> String {
        match self {
            DateRange::Parsed { start, .. } => start.format("%Y-%m-%d").to_string(),
            DateRange::Unavailable => UNAVAILABLE.to_string(),
        }
    }

    /// Last date as stored in the Events table: ISO date or the N/A sentinel.
    pub fn end_sql(&self) -> String {
        match self {
            DateRange::Parsed { end, .. } => end.format("%Y-%m-%d").to_string(),
            DateRange::Unavailable => UNAVAILABLE.to_string(),
        }
    }
}

// ── Tests ──
