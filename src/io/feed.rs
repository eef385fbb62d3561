//! Schedule feed over HTTP - Google Sheets CSV export
//!
//! The sheet is fetched through the gviz endpoint which serves the whole
//! sheet as CSV. Rows are ragged (trailing empty columns are dropped by
//! the export), so the reader runs in flexible mode and downstream code
//! guards every positional access.

use crate::domain::RawRow;
use crate::infra::config::Config;
use crate::io::FeedSource;
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

pub struct SheetFetcher {
    url: String,
    client: reqwest::Client,
}

impl SheetFetcher {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // Explicit timeout: a stuck fetch would stall the whole poll loop
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.feed_timeout_ms()))
            .build()
            .context("Failed to build HTTP client for the feed")?;

        Ok(Self { url: sheet_csv_url(config.sheet_id()), client })
    }

    fn parse_csv(body: &str) -> anyhow::Result<Vec<RawRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(body.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.context("Malformed CSV record in feed")?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }
        Ok(rows)
    }
}

fn sheet_csv_url(sheet_id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:csv", sheet_id)
}

#[async_trait]
impl FeedSource for SheetFetcher {
    async fn fetch(&self) -> anyhow::Result<Vec<RawRow>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Feed request failed")?
            .error_for_status()
            .context("Feed request returned an error status")?;

        let body = response.text().await.context("Failed to read feed response body")?;
        let rows = Self::parse_csv(&body)?;

        debug!(rows = rows.len(), "feed_fetched");
        Ok(rows)
    }
}
