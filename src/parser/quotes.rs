use log::{debug, trace, warn};
use scraper::{ElementRef, Html};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::selectors::{CompiledSelectors, QuoteSelectors};
use crate::{ScraperError, ScraperResult};

/// One quote block extracted from a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    text: String,
    author: String,
    tags: Vec<String>,
}

impl QuoteRecord {
    pub fn new(text: impl Into<String>, author: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            tags,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Tags as a single `"a, b, c"` string, empty when there are none.
    pub fn joined_tags(&self) -> String {
        self.tags.join(", ")
    }
}

// Serialized flat so the same shape works as a CSV row and a JSON object.
impl Serialize for QuoteRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("QuoteRecord", 3)?;
        state.serialize_field("text", &self.text)?;
        state.serialize_field("author", &self.author)?;
        state.serialize_field("tags", &self.joined_tags())?;
        state.end()
    }
}

pub struct PageScraper {
    selectors: CompiledSelectors,
}

impl Default for PageScraper {
    fn default() -> Self {
        Self::new(&QuoteSelectors::default()).expect("default quote selectors are valid")
    }
}

impl PageScraper {
    pub fn new(selectors: &QuoteSelectors) -> ScraperResult<Self> {
        Ok(Self {
            selectors: selectors.compile()?,
        })
    }

    /// Appends one record per quote block to `quotes`, in document order.
    ///
    /// Stops at the first block that is missing its text, author or tag
    /// container and returns `ScraperError::NotFound`. Records from earlier
    /// blocks stay in `quotes`.
    pub fn scrape_page(&self, document: &Html, quotes: &mut Vec<QuoteRecord>) -> ScraperResult<()> {
        let before = quotes.len();
        for (index, block) in document.select(&self.selectors.block).enumerate() {
            let record = self.extract_block(block, index)?;
            trace!("Extracted quote {}: {:?}", index, record);
            quotes.push(record);
        }
        debug!("Extracted {} quotes from page", quotes.len() - before);
        Ok(())
    }

    /// Like [`scrape_page`](Self::scrape_page) but skips malformed blocks.
    /// Returns the errors for the blocks that were skipped.
    pub fn scrape_page_lenient(
        &self,
        document: &Html,
        quotes: &mut Vec<QuoteRecord>,
    ) -> Vec<ScraperError> {
        let mut skipped = Vec::new();
        for (index, block) in document.select(&self.selectors.block).enumerate() {
            match self.extract_block(block, index) {
                Ok(record) => quotes.push(record),
                Err(e) => {
                    warn!("Skipping malformed quote block: {}", e);
                    skipped.push(e);
                }
            }
        }
        skipped
    }

    pub fn extract(&self, document: &Html) -> ScraperResult<Vec<QuoteRecord>> {
        let mut quotes = Vec::new();
        self.scrape_page(document, &mut quotes)?;
        Ok(quotes)
    }

    fn extract_block(&self, block: ElementRef<'_>, index: usize) -> ScraperResult<QuoteRecord> {
        let text = first_text(block, &self.selectors.text).ok_or(ScraperError::NotFound {
            block: index,
            field: "text",
        })?;
        let author = first_text(block, &self.selectors.author).ok_or(ScraperError::NotFound {
            block: index,
            field: "author",
        })?;
        let container = block
            .select(&self.selectors.tags)
            .next()
            .ok_or(ScraperError::NotFound {
                block: index,
                field: "tags",
            })?;

        let tags = container
            .select(&self.selectors.tag)
            .map(|tag| tag.text().collect::<String>())
            .collect();

        Ok(QuoteRecord::new(text, author, tags))
    }
}

fn first_text(element: ElementRef<'_>, selector: &scraper::Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|e| e.text().collect::<String>())
}

/// Extracts quotes with the default selectors into `quotes`.
pub fn scrape_page(document: &Html, quotes: &mut Vec<QuoteRecord>) -> ScraperResult<()> {
    PageScraper::default().scrape_page(document, quotes)
}
