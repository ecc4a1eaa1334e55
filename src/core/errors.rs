use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Unsupported URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    #[error("No target URL configured")]
    MissingUrl,

    #[error("Request to {url} failed with status {status}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to decode response body: {0}")]
    DecodingError(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Quote block {block} has no {field} element")]
    NotFound { block: usize, field: &'static str },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl ScraperError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScraperError::NotFound { .. })
    }
}

pub type ScraperResult<T> = Result<T, ScraperError>;
