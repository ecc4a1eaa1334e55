pub mod quotes;
pub mod selectors;

pub use quotes::{scrape_page, PageScraper, QuoteRecord};
pub use selectors::{CompiledSelectors, QuoteSelectors};
