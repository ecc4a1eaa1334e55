pub mod core;
pub mod http;
pub mod parser;
pub mod scrapers;
pub mod stats;
pub mod storage;

pub use crate::core::{MalformedBlockPolicy, QuoteCrawler, ScrapeConfig};
pub use crate::core::{ScraperError, ScraperResult};
pub use http::{HttpRequest, HttpResponse};
pub use parser::{scrape_page, PageScraper, QuoteRecord, QuoteSelectors};
pub use scrapers::Scraper;
pub use stats::StatsTracker;
pub use storage::{create_sink, RecordSink, SinkType};
