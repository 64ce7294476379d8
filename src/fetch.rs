use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

const USER_AGENT: &str = "Mozilla/5.0";
const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 2000;

/// Fetch the form page body. Rate limits and upstream server errors are
/// retried with exponential backoff; everything else fails immediately.
pub async fn fetch_form(url: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let mut attempt = 0u32;

    loop {
        let response = client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        let status = response.status();
        if status.is_success() {
            info!("fetched {} ({})", url, status);
            return response
                .text()
                .await
                .context("failed to read response body");
        }

        let transient = status.as_u16() == 429 || status.is_server_error();
        if !transient || attempt == MAX_RETRIES {
            bail!("form fetch failed with status {}", status);
        }

        let backoff = Duration::from_millis(BASE_BACKOFF_MS * 2u64.pow(attempt));
        warn!(
            "{} from {} (attempt {}/{}), backing off {:.1}s",
            status,
            url,
            attempt + 1,
            MAX_RETRIES,
            backoff.as_secs_f64()
        );
        tokio::time::sleep(backoff).await;
        attempt += 1;
    }
}
