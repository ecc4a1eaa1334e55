use std::io::Write;

use super::RecordSink;
use crate::parser::QuoteRecord;
use crate::ScraperResult;

/// Collects every batch and writes them as one pretty-printed JSON array
/// on `finish`.
pub struct JsonSink<W: Write> {
    writer: W,
    records: Vec<QuoteRecord>,
    finished: bool,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records: Vec::new(),
            finished: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonSink<W> {
    fn write_records(&mut self, records: &[QuoteRecord]) -> ScraperResult<()> {
        self.records.extend_from_slice(records);
        Ok(())
    }

    fn finish(&mut self) -> ScraperResult<()> {
        if self.finished {
            return Ok(());
        }
        serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        self.finished = true;
        Ok(())
    }
}

/// One JSON object per line, so batches can be appended.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn write_records(&mut self, records: &[QuoteRecord]) -> ScraperResult<()> {
        for record in records {
            serde_json::to_writer(&mut self.writer, record)?;
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
