use crate::core::config::{MalformedBlockPolicy, ScrapeConfig};
use crate::http::ResponseType;
use crate::parser::{PageScraper, QuoteRecord};
use crate::stats::StatsTracker;
use crate::Scraper;
use log::{debug, info, warn};
use scraper::Html;
use std::sync::Arc;

use super::{ScraperError, ScraperResult};

/// Fetches one page and extracts its quotes.
pub struct QuoteCrawler {
    scraper: Box<dyn Scraper>,
    stats: Arc<StatsTracker>,
}

impl QuoteCrawler {
    pub fn new(scraper: Box<dyn Scraper>) -> Self {
        let stats = Arc::new(StatsTracker::new());
        let mut scraper = scraper;
        scraper.set_stats(Arc::clone(&stats));

        Self { scraper, stats }
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    pub async fn run(&self, config: &ScrapeConfig) -> ScraperResult<Vec<QuoteRecord>> {
        let mut quotes = Vec::new();
        self.run_into(config, &mut quotes).await?;
        Ok(quotes)
    }

    /// Appends the page's quotes to `quotes` and returns how many were added.
    ///
    /// Configuration is validated before anything is fetched. A non-2xx
    /// response is an error; its body is never parsed. When a malformed
    /// block aborts the run, quotes appended before it stay in `quotes` and
    /// are counted in the stats.
    pub async fn run_into(
        &self,
        config: &ScrapeConfig,
        quotes: &mut Vec<QuoteRecord>,
    ) -> ScraperResult<usize> {
        let request = config.build_request()?;
        let page_scraper = PageScraper::new(&config.selectors)?;

        info!("Scraping quotes from {}", request.url);
        debug!("Selectors: {:?}", config.selectors);

        let response = self.scraper.fetch(request).await?;
        if !response.is_success() {
            return Err(ScraperError::HttpStatus {
                status: response.status,
                url: response.url.to_string(),
            });
        }
        if response.response_type != ResponseType::Html {
            warn!(
                "Response from {} looks like {:?}, parsing as HTML anyway",
                response.url, response.response_type
            );
        }

        let document = Html::parse_document(&response.decoded_body);
        let before = quotes.len();
        let extraction = match config.malformed_policy {
            MalformedBlockPolicy::Abort => page_scraper.scrape_page(&document, quotes).map(|()| 0),
            MalformedBlockPolicy::Skip => {
                Ok(page_scraper.scrape_page_lenient(&document, quotes).len())
            }
        };
        let added = quotes.len() - before;
        let skipped = *extraction.as_ref().unwrap_or(&0);

        self.stats.record_extraction(added, skipped);
        self.stats.finish();
        self.stats.log_summary();

        match extraction {
            Ok(_) => {
                info!(
                    "Extracted {} quotes from {} ({} malformed blocks skipped)",
                    added, response.url, skipped
                );
                Ok(added)
            }
            Err(e) => {
                warn!("Aborted {} after {} quotes: {}", response.url, added, e);
                Err(e)
            }
        }
    }
}
