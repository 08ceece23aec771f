use super::types::{IngestReport, IngestionSettings, MessagePage};
use crate::error::IngestionError;
use crate::search::types::Message;
use reqwest::StatusCode;
use std::time::Duration;

/// Statuses the upstream uses when it throttles us.
const RATE_LIMIT_STATUSES: [StatusCode; 3] = [
    StatusCode::BAD_REQUEST,
    StatusCode::FORBIDDEN,
    StatusCode::TOO_MANY_REQUESTS,
];

/// Upper bound of the random jitter added to each backoff delay.
const JITTER_MS: u64 = 50;

pub struct UpstreamClient {
    http_client: reqwest::Client,
    settings: IngestionSettings,
}

impl UpstreamClient {
    pub fn new(settings: IngestionSettings) -> Result<Self, IngestionError> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self {
            http_client,
            settings,
        })
    }

    /// Single attempt at fetching one page.
    pub async fn fetch_page(&self, skip: usize, limit: usize) -> Result<MessagePage, IngestionError> {
        let response = self
            .http_client
            .get(&self.settings.source_url)
            .query(&[("skip", skip), ("limit", limit)])
            .send()
            .await?;

        let status = response.status();
        if RATE_LIMIT_STATUSES.contains(&status) {
            return Err(IngestionError::RateLimited(status.as_u16()));
        }
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(IngestionError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(response.json::<MessagePage>().await?)
    }

    /// Fetches one page, retrying retriable failures with exponential backoff.
    pub async fn fetch_page_with_retry(
        &self,
        skip: usize,
        limit: usize,
    ) -> Result<MessagePage, IngestionError> {
        let attempts = self.settings.max_retries.max(1);
        let mut delay = self.settings.initial_backoff;

        for attempt in 0..attempts {
            match self.fetch_page(skip, limit).await {
                Ok(page) => return Ok(page),
                Err(e) if !e.is_retriable() => return Err(e),
                Err(e) => {
                    if attempt + 1 == attempts {
                        tracing::warn!("Giving up on skip={} after {}: {}", skip, attempts, e);
                        return Err(IngestionError::Exhausted(attempts));
                    }
                    tracing::warn!(
                        "Fetch skip={} failed ({}), retrying ({}/{}) in {:?}",
                        skip,
                        e,
                        attempt + 1,
                        attempts,
                        delay
                    );
                    let jitter = Duration::from_millis(rand::random::<u64>() % JITTER_MS);
                    tokio::time::sleep(delay + jitter).await;
                    delay = (delay * 2).min(self.settings.max_backoff);
                }
            }
        }

        Err(IngestionError::Exhausted(attempts))
    }

    /// Walks the upstream pages from `skip = 0` until an empty page or the reported
    /// total is reached.
    ///
    /// Never fails: on a terminal error the messages collected so far are returned
    /// with `complete = false`, so the service can still start.
    pub async fn fetch_all(&self) -> IngestReport {
        let limit = self.settings.page_size.max(1);
        let mut report = IngestReport::default();
        let mut skip = 0;

        loop {
            tracing::info!("Fetching messages: skip={}, limit={}", skip, limit);

            let page = match self.fetch_page_with_retry(skip, limit).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!(
                        "Ingestion stopped at skip={}: {}. Keeping {} messages",
                        skip,
                        e,
                        report.messages.len()
                    );
                    return report;
                }
            };
            report.pages += 1;

            if page.items.is_empty() {
                tracing::info!("No more items to fetch");
                break;
            }

            let fetched = page.items.len();
            for item in page.items {
                match serde_json::from_value::<Message>(item) {
                    Ok(message) => report.messages.push(message),
                    Err(e) => {
                        report.skipped += 1;
                        tracing::warn!("Skipping malformed message at skip={}: {}", skip, e);
                    }
                }
            }
            tracing::info!("Fetched {} messages", fetched);

            if report.messages.len() + report.skipped >= page.total {
                break;
            }

            skip += limit;
            tokio::time::sleep(self.settings.page_delay).await;
        }

        report.complete = true;
        report
    }
}
