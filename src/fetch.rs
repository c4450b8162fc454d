use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::db;
use crate::parser;
use crate::settings::Settings;

/// Crawl stats returned after completion.
pub struct CrawlStats {
    pub pages: usize,
    pub records: usize,
}

/// Fetch every calendar page in order, extracting and inserting as each page
/// arrives. A fixed pause between successive requests keeps load on the
/// source polite; it is not driven by any backpressure signal.
pub async fn crawl_calendar(conn: &Connection, settings: &Settings) -> Result<CrawlStats> {
    let client = Client::new();
    let pb = ProgressBar::new(settings.pages as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len}")?
            .progress_chars("=> "),
    );

    let mut records = 0usize;
    for page in 1..=settings.pages {
        if page > 1 {
            tokio::time::sleep(Duration::from_secs(settings.delay_secs)).await;
        }
        let html = fetch_page(&client, &settings.base_url, page).await?;
        let confs = parser::extract_conferences(&html)
            .with_context(|| format!("Failed to extract conferences from page {}", page))?;
        records += db::insert_conferences(conn, &confs)?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Crawled {} pages, {} conferences", settings.pages, records);

    Ok(CrawlStats {
        pages: settings.pages as usize,
        records,
    })
}

async fn fetch_page(client: &Client, base_url: &str, page: u32) -> Result<String> {
    let start = Instant::now();
    let body = client
        .get(base_url)
        .query(&[("page", page)])
        .send()
        .await
        .with_context(|| format!("Request for calendar page {} failed", page))?
        .error_for_status()
        .with_context(|| format!("Calendar page {} returned an error status", page))?
        .text()
        .await
        .with_context(|| format!("Failed to read body of calendar page {}", page))?;
    debug!(
        "Fetched page {} ({} bytes) in {}ms",
        page,
        body.len(),
        start.elapsed().as_millis()
    );
    Ok(body)
}
