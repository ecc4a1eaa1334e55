pub mod base;
pub mod csv;
pub mod factory;
pub mod json;

pub use base::RecordSink;
pub use self::csv::CsvSink;
pub use factory::{create_sink, SinkType};
pub use json::{JsonLinesSink, JsonSink};
