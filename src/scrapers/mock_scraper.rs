use crate::http::{HttpRequest, HttpResponse, ResponseType};
use crate::{ScraperResult, StatsTracker};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::Scraper;

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Serves canned responses in order, wrapping around, and keeps every
/// request it received.
#[derive(Clone)]
pub struct MockScraper {
    responses: Arc<Vec<MockResponse>>,
    current_response: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    stats: Arc<StatsTracker>,
}

impl MockScraper {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(responses),
            current_response: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            stats: Arc::new(StatsTracker::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Scraper for MockScraper {
    async fn fetch_single(&self, request: HttpRequest) -> ScraperResult<HttpResponse> {
        self.requests.lock().push(request.clone());

        let index = self.current_response.fetch_add(1, Ordering::SeqCst);
        let response = if self.responses.is_empty() {
            MockResponse::status(404, "")
        } else {
            self.responses[index % self.responses.len()].clone()
        };

        let headers = HashMap::from([(
            "content-type".to_string(),
            "text/html; charset=utf-8".to_string(),
        )]);

        Ok(HttpResponse {
            url: request.url,
            status: response.status,
            headers,
            raw_body: response.body.clone().into_bytes(),
            decoded_body: response.body,
            timestamp: Utc::now(),
            elapsed_ms: 0,
            response_type: ResponseType::Html,
        })
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    fn set_stats(&mut self, stats: Arc<StatsTracker>) {
        self.stats = stats;
    }
}
