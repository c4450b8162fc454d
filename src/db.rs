use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::parser::Conference;

pub fn connect(path: &str) -> Result<Connection> {
    let conn =
        Connection::open(path).with_context(|| format!("Failed to open {}", path))?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

/// Drop-and-create the Events table. dbmake is destructive by design; there
/// are no migrations.
pub fn recreate_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        DROP TABLE IF EXISTS Events;
        CREATE TABLE Events (
            Event     TEXT,
            Name      TEXT,
            FirstDate DATE,
            LastDate  DATE,
            Location  TEXT,
            Deadline  TEXT
        );
        ",
    )?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct EventRow {
    pub event: String,
    pub name: String,
    pub first_date: String,
    pub last_date: String,
    pub location: String,
    pub deadline: String,
}

/// Batch-insert one page's worth of conferences. Date columns receive the ISO
/// date or the literal N/A sentinel; the sentinel is stored verbatim so
/// month queries against such rows simply never match.
pub fn insert_conferences(conn: &Connection, confs: &[Conference]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO Events (Event, Name, FirstDate, LastDate, Location, Deadline)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for c in confs {
            count += stmt.execute(rusqlite::params![
                c.event,
                c.name,
                c.dates.start_sql(),
                c.dates.end_sql(),
                c.location,
                c.deadline,
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

pub fn fetch_all(conn: &Connection) -> Result<Vec<EventRow>> {
    let mut stmt = conn.prepare(
        "SELECT Event, Name, FirstDate, LastDate, Location, Deadline FROM Events",
    )?;
    let rows = stmt
        .query_map([], row_to_event)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Rows whose first or last date falls in the given month. The caller passes
/// year and month as text; an unpadded month never matches strftime output.
pub fn fetch_by_month(conn: &Connection, year: &str, month: &str) -> Result<Vec<EventRow>> {
    let ym = format!("{}-{}", year, month);
    let mut stmt = conn.prepare(
        "SELECT Event, Name, FirstDate, LastDate, Location, Deadline FROM Events
         WHERE strftime('%Y-%m', FirstDate) = ?1 OR strftime('%Y-%m', LastDate) = ?1",
    )?;
    let rows = stmt
        .query_map(rusqlite::params![ym], row_to_event)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn row_to_event(row: &rusqlite::Row) -> rusqlite::Result<EventRow> {
    Ok(EventRow {
        event: row.get(0)?,
        name: row.get(1)?,
        first_date: row.get(2)?,
        last_date: row.get(3)?,
        location: row.get(4)?,
        deadline: row.get(5)?,
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::dates::DateRange;
    use chrono::NaiveDate;

    fn mem_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        recreate_schema(&conn).unwrap();
        conn
    }

    fn range(y: i32, m: u32, d: u32, y2: i32, m2: u32, d2: u32) -> DateRange {
        DateRange::Parsed {
            start: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            end: NaiveDate::from_ymd_opt(y2, m2, d2).unwrap(),
        }
    }

    fn conf(event: &str, dates: DateRange) -> Conference {
        Conference {
            event: event.to_string(),
            name: format!("{} conference", event),
            dates,
            location: "Boston, MA, USA".to_string(),
            deadline: "Feb 1, 2024".to_string(),
        }
    }

    #[test]
    fn round_trip_by_month() {
        let conn = mem_conn();
        let n =
            insert_conferences(&conn, &[conf("ICML", range(2024, 6, 15, 2024, 6, 17))]).unwrap();
        assert_eq!(n, 1);

        let hits = fetch_by_month(&conn, "2024", "06").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].event, "ICML");
        assert_eq!(hits[0].first_date, "2024-06-15");
        assert_eq!(hits[0].last_date, "2024-06-17");

        assert!(fetch_by_month(&conn, "2024", "07").unwrap().is_empty());
        assert!(fetch_by_month(&conn, "2023", "06").unwrap().is_empty());
    }

    #[test]
    fn matches_on_last_date_month_too() {
        let conn = mem_conn();
        insert_conferences(&conn, &[conf("EuroSys", range(2024, 6, 28, 2024, 7, 2))]).unwrap();
        assert_eq!(fetch_by_month(&conn, "2024", "07").unwrap().len(), 1);
        assert_eq!(fetch_by_month(&conn, "2024", "06").unwrap().len(), 1);
    }

    #[test]
    fn unavailable_rows_store_sentinel_and_never_match() {
        let conn = mem_conn();
        insert_conferences(&conn, &[conf("VAGUE", DateRange::Unavailable)]).unwrap();

        let all = fetch_all(&conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].first_date, "N/A");
        assert_eq!(all[0].last_date, "N/A");

        for ym in [("2024", "06"), ("2025", "01")] {
            assert!(fetch_by_month(&conn, ym.0, ym.1).unwrap().is_empty());
        }
    }

    #[test]
    fn recreate_schema_discards_existing_rows() {
        let conn = mem_conn();
        insert_conferences(&conn, &[conf("ICML", range(2024, 6, 15, 2024, 6, 17))]).unwrap();
        recreate_schema(&conn).unwrap();
        assert!(fetch_all(&conn).unwrap().is_empty());
    }
}
