use std::time::Duration;

use reqwest::Client;
use tracing::info;

use crate::config::Settings;
use crate::error::ScrapeError;

pub fn client(settings: &Settings) -> Result<Client, ScrapeError> {
    let client = Client::builder()
        .user_agent(settings.user_agent.clone())
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch the schedule page HTML.
///
/// Any non-success status aborts the whole run: a half-reachable site must
/// produce zero records, not a partially scraped set.
pub async fn fetch_page(client: &Client, settings: &Settings) -> Result<String, ScrapeError> {
    info!("Fetching schedule page: {}", settings.schedule_url);
    let response = client.get(&settings.schedule_url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::FetchFailed {
            status: status.as_u16(),
        });
    }

    Ok(response.text().await?)
}

/// Fetch one schedule file, returning its raw bytes.
pub async fn fetch_file(client: &Client, url: &str) -> Result<Vec<u8>, ScrapeError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::FetchFailed {
            status: status.as_u16(),
        });
    }

    Ok(response.bytes().await?.to_vec())
}
