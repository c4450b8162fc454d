mod db;
mod fetch;
mod parser;
mod settings;

use std::time::Instant;

use clap::{Parser, Subcommand};

use db::EventRow;
use settings::Settings;

#[derive(Parser)]
#[command(name = "cfp_scraper", about = "WikiCFP conference calendar scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the events table from the live calendar
    Dbmake,
    /// Print every stored event
    All,
    /// Print events starting or ending in a given month
    Search {
        /// Four-digit year, e.g. 2026
        year: String,
        /// Zero-padded month, e.g. 06
        month: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;

    let result = match cli.command {
        Commands::Dbmake => {
            let conn = db::connect(&settings.db_path)?;
            db::recreate_schema(&conn)?;
            println!("Crawling {} calendar pages...", settings.pages);
            let stats = fetch::crawl_calendar(&conn, &settings).await?;
            println!(
                "Done: {} conferences from {} pages.",
                stats.records, stats.pages
            );
            Ok(())
        }
        Commands::All => {
            let conn = db::connect(&settings.db_path)?;
            let rows = db::fetch_all(&conn)?;
            if rows.is_empty() {
                println!("No events stored. Run 'dbmake' first.");
                return Ok(());
            }
            print_rows(&rows);
            Ok(())
        }
        Commands::Search { year, month } => {
            let conn = db::connect(&settings.db_path)?;
            let rows = db::fetch_by_month(&conn, &year, &month)?;
            if rows.is_empty() {
                println!("No events found for {}-{}.", year, month);
                return Ok(());
            }
            print_rows(&rows);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn print_rows(rows: &[EventRow]) {
    println!(
        "{:>3} | {:<12} | {:<44} | {:<10} | {:<10} | {:<22} | {:<14}",
        "#", "Event", "Name", "Start", "End", "Where", "Deadline"
    );
    println!("{}", "-".repeat(134));

    for (i, r) in rows.iter().enumerate() {
        println!(
            "{:>3} | {:<12} | {:<44} | {:<10} | {:<10} | {:<22} | {:<14}",
            i + 1,
            truncate(&r.event, 12),
            truncate(&r.name, 44),
            r.first_date,
            r.last_date,
            truncate(&r.location, 22),
            truncate(&r.deadline, 14),
        );
    }

    println!("\n{} events", rows.len());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
