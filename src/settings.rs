use anyhow::Result;
use config::Config;
use serde::Deserialize;

/// Calendar endpoint with the topic filter baked into the query string.
const DEFAULT_BASE_URL: &str = "http://www.wikicfp.com/cfp/call?conference=computer%20science";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub db_path: String,
    pub base_url: String,
    pub pages: u32,
    pub delay_secs: u64,
}

impl Settings {
    /// Defaults overlaid with CFP_-prefixed environment variables
    /// (CFP_DB_PATH, CFP_BASE_URL, CFP_PAGES, CFP_DELAY_SECS).
    pub fn load() -> Result<Self> {
        let cfg = Config::builder()
            .set_default("db_path", "events.db")?
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("pages", 5)?
            .set_default("delay_secs", 5)?
            .add_source(config::Environment::with_prefix("CFP"))
            .build()?;
        Ok(cfg.try_deserialize()?)
    }
}

// ── Tests ──
