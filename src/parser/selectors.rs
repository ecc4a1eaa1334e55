use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::{ScraperError, ScraperResult};

/// CSS selectors describing where a quote and its metadata live in the page.
///
/// `text`, `author` and `tags` are matched inside each block; `tag` is
/// matched inside the tag container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSelectors {
    pub block: String,
    pub text: String,
    pub author: String,
    pub tags: String,
    pub tag: String,
}

impl Default for QuoteSelectors {
    fn default() -> Self {
        Self {
            block: "div.quote".to_string(),
            text: "span.text".to_string(),
            author: "small.author".to_string(),
            tags: "div.tags".to_string(),
            tag: "a.tag".to_string(),
        }
    }
}

impl QuoteSelectors {
    pub fn with_block(mut self, selector: &str) -> Self {
        self.block = selector.to_string();
        self
    }

    pub fn with_text(mut self, selector: &str) -> Self {
        self.text = selector.to_string();
        self
    }

    pub fn with_author(mut self, selector: &str) -> Self {
        self.author = selector.to_string();
        self
    }

    pub fn with_tags(mut self, selector: &str) -> Self {
        self.tags = selector.to_string();
        self
    }

    pub fn with_tag(mut self, selector: &str) -> Self {
        self.tag = selector.to_string();
        self
    }

    pub fn compile(&self) -> ScraperResult<CompiledSelectors> {
        Ok(CompiledSelectors {
            block: parse_selector(&self.block)?,
            text: parse_selector(&self.text)?,
            author: parse_selector(&self.author)?,
            tags: parse_selector(&self.tags)?,
            tag: parse_selector(&self.tag)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub(crate) block: Selector,
    pub(crate) text: Selector,
    pub(crate) author: Selector,
    pub(crate) tags: Selector,
    pub(crate) tag: Selector,
}

fn parse_selector(selector: &str) -> ScraperResult<Selector> {
    Selector::parse(selector).map_err(|e| ScraperError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
