use reqwest::header;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::http::HttpRequest;
use crate::parser::QuoteSelectors;
use crate::scrapers::http_scraper::parse_header;
use crate::{ScraperError, ScraperResult};

/// What to do with a quote block that lacks its text, author or tag container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MalformedBlockPolicy {
    /// Fail the whole scrape with `ScraperError::NotFound`.
    #[default]
    Abort,
    /// Log the block and keep going.
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct ScrapeConfig {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub user_agent: Option<String>,
    pub timeout: Option<Duration>,
    pub selectors: QuoteSelectors,
    pub malformed_policy: MalformedBlockPolicy,
}

impl ScrapeConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_selectors(mut self, selectors: QuoteSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn with_malformed_policy(mut self, policy: MalformedBlockPolicy) -> Self {
        self.malformed_policy = policy;
        self
    }

    /// The configured URL, required to be a non-empty absolute http(s) URL.
    pub fn target_url(&self) -> ScraperResult<Url> {
        let raw = self.url.trim();
        if raw.is_empty() {
            return Err(ScraperError::MissingUrl);
        }

        let url = Url::parse(raw)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ScraperError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Validates the URL and headers and turns them into the single request
    /// the scrape makes.
    pub fn build_request(&self) -> ScraperResult<HttpRequest> {
        let mut request = HttpRequest::new(self.target_url()?).with_timeout(self.timeout);

        if let Some(user_agent) = &self.user_agent {
            parse_header(header::USER_AGENT.as_str(), user_agent)?;
            request = request.with_header(header::USER_AGENT.as_str(), user_agent);
        }

        for (name, value) in &self.headers {
            parse_header(name, value)?;
            request = request.with_header(name, value);
        }

        Ok(request)
    }
}
