use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use super::{CsvSink, JsonLinesSink, JsonSink, RecordSink};
use crate::ScraperResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkType {
    #[default]
    Csv,
    Json,
    JsonLines,
}

impl FromStr for SinkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(SinkType::Csv),
            "json" => Ok(SinkType::Json),
            "jsonl" | "ndjson" | "json-lines" => Ok(SinkType::JsonLines),
            other => Err(format!(
                "unknown output format '{other}', expected csv, json or jsonl"
            )),
        }
    }
}

impl fmt::Display for SinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SinkType::Csv => "csv",
            SinkType::Json => "json",
            SinkType::JsonLines => "jsonl",
        };
        f.write_str(name)
    }
}

/// Opens a sink writing to `output`, or to stdout when it is `None` or `-`.
/// Parent directories of a file destination are created.
pub fn create_sink(
    sink_type: SinkType,
    output: Option<&Path>,
) -> ScraperResult<Box<dyn RecordSink>> {
    let writer: Box<dyn Write> = match output {
        Some(path) if path != Path::new("-") => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            Box::new(BufWriter::new(File::create(path)?))
        }
        _ => Box::new(io::stdout().lock()),
    };

    Ok(match sink_type {
        SinkType::Csv => Box::new(CsvSink::new(writer)),
        SinkType::Json => Box::new(JsonSink::new(writer)),
        SinkType::JsonLines => Box::new(JsonLinesSink::new(writer)),
    })
}
