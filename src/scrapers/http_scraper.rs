use async_trait::async_trait;
use chrono::Utc;
use log::trace;
use encoding_rs::{Encoding, UTF_8};
use reqwest::{header, Client, ClientBuilder};
use std::collections::HashMap;
use std::sync::Arc;

use super::Scraper;
use crate::http::{HttpRequest, HttpResponse, ResponseType};
use crate::{ScraperError, ScraperResult, StatsTracker};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Clone)]
pub struct HttpScraper {
    client: Client,
    stats: Arc<StatsTracker>,
}

impl Default for HttpScraper {
    fn default() -> Self {
        Self::new().expect("Failed to create default HttpScraper")
    }
}

impl HttpScraper {
    pub fn new() -> ScraperResult<Self> {
        let client = ClientBuilder::new()
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            stats: Arc::new(StatsTracker::new()),
        })
    }

    fn extract_headers(response: &reqwest::Response) -> HashMap<String, String> {
        response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|val| (k.to_string(), val.to_string())))
            .collect()
    }
}

/// Decodes `raw` using a byte order mark, then the `charset` declared in
/// `content-type`, then UTF-8. Bytes invalid in that encoding are an error.
pub(crate) fn decode_body(
    headers: &HashMap<String, String>,
    raw: &[u8],
) -> ScraperResult<String> {
    let (encoding, body) = match Encoding::for_bom(raw) {
        Some((encoding, bom_len)) => (encoding, &raw[bom_len..]),
        None => (declared_charset(headers).unwrap_or(UTF_8), raw),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
        .ok_or_else(|| {
            ScraperError::DecodingError(format!("body is not valid {}", encoding.name()))
        })
}

fn declared_charset(headers: &HashMap<String, String>) -> Option<&'static Encoding> {
    headers
        .get("content-type")?
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, value)| Encoding::for_label(value.trim().trim_matches('"').as_bytes()))
}

pub(crate) fn parse_header(
    name: &str,
    value: &str,
) -> ScraperResult<(header::HeaderName, header::HeaderValue)> {
    let name = header::HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| ScraperError::InvalidHeader(format!("{name:?}: {e}")))?;
    let value = header::HeaderValue::from_str(value)
        .map_err(|e| ScraperError::InvalidHeader(format!("{name}: {e}")))?;
    Ok((name, value))
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn fetch_single(&self, request: HttpRequest) -> ScraperResult<HttpResponse> {
        let mut req = self.client.get(request.url.clone());

        for (key, value) in &request.headers {
            let (name, value) = parse_header(key, value)?;
            req = req.header(name, value);
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        let start_time = Utc::now();
        let response = req.send().await?;

        let status = response.status().as_u16();
        let headers = Self::extract_headers(&response);
        let raw_body = response.bytes().await?.to_vec();

        let decoded_body = decode_body(&headers, &raw_body)?;
        trace!("Response body from {}: {}", request.url, decoded_body);

        let elapsed_ms = (Utc::now() - start_time).num_milliseconds();
        let response_type = ResponseType::detect(&headers, &decoded_body);

        Ok(HttpResponse {
            url: request.url,
            status,
            headers,
            raw_body,
            decoded_body,
            timestamp: start_time,
            elapsed_ms,
            response_type,
        })
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    fn set_stats(&mut self, stats: Arc<StatsTracker>) {
        self.stats = stats;
    }
}
