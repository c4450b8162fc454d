pub mod dates;
pub mod records;
pub mod tokens;

use anyhow::Result;

pub use records::Conference;

/// Two-pass pipeline: page markup → cell tokens → grouped conferences.
pub fn extract_conferences(html: &str) -> Result<Vec<Conference>> {
    let cells = tokens::leaf_tokens(html)?;
    records::group_records(&cells)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::dates::DateRange;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn calendar_fixture_extracts_every_row() {
        let html = std::fs::read_to_string("tests/fixtures/calendar.html").unwrap();
        let confs = extract_conferences(&html).unwrap();
        assert_eq!(confs.len(), 3);

        assert_eq!(confs[0].event, "ICML 2026");
        assert_eq!(
            confs[0].name,
            "International Conference on Machine Learning"
        );
        assert_eq!(
            confs[0].dates,
            DateRange::Parsed {
                start: date(2026, 6, 15),
                end: date(2026, 6, 19),
            }
        );
        assert_eq!(confs[0].location, "Vancouver, Canada");
        assert_eq!(confs[0].deadline, "Jan 28, 2026");

        // Plain-text name cell, plus an empty wrapper cell in the same row
        // that must not shift the grouping.
        assert_eq!(confs[1].event, "CRYPTO 2026");
        assert_eq!(
            confs[1].dates,
            DateRange::Parsed {
                start: date(2026, 8, 16),
                end: date(2026, 8, 20),
            }
        );
        assert_eq!(confs[1].location, "Santa Barbara, CA, USA");

        // Unparseable range lands as the sentinel, not an error.
        assert_eq!(confs[2].event, "SOSP 2026");
        assert_eq!(confs[2].dates, DateRange::Unavailable);
        assert_eq!(confs[2].deadline, "N/A");
    }
}
