use crate::http::{HttpRequest, HttpResponse};
use crate::{ScraperResult, StatsTracker};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

#[async_trait]
pub trait Scraper: Send + Sync {
    async fn fetch_single(&self, request: HttpRequest) -> ScraperResult<HttpResponse>;
    fn stats(&self) -> &StatsTracker;
    fn set_stats(&mut self, stats: Arc<StatsTracker>);

    /// Performs exactly one request and records it, whatever the status.
    async fn fetch(&self, request: HttpRequest) -> ScraperResult<HttpResponse> {
        let start_time = Utc::now();
        info!("Fetching URL: {}", request.url);

        let response = self.fetch_single(request).await?;
        debug!(
            "Received response: status={}, body_length={}, type={:?}",
            response.status,
            response.raw_body.len(),
            response.response_type
        );

        let duration = Utc::now().signed_duration_since(start_time);
        self.stats()
            .record_request(response.status, response.raw_body.len(), duration);

        Ok(response)
    }
}
