pub mod config;
mod crawler;
mod errors;

#[cfg(test)]
mod tests;

pub use config::{MalformedBlockPolicy, ScrapeConfig};
pub use crawler::QuoteCrawler;
pub use errors::{ScraperError, ScraperResult};
