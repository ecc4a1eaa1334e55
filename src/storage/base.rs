use crate::parser::QuoteRecord;
use crate::ScraperResult;

/// Persists extracted records. Extraction never depends on a sink.
///
/// `write_records` may be called any number of times; `finish` must be
/// called once afterwards so sinks that buffer can write their output.
pub trait RecordSink {
    fn write_records(&mut self, records: &[QuoteRecord]) -> ScraperResult<()>;

    fn finish(&mut self) -> ScraperResult<()> {
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn write_records(&mut self, records: &[QuoteRecord]) -> ScraperResult<()> {
        (**self).write_records(records)
    }

    fn finish(&mut self) -> ScraperResult<()> {
        (**self).finish()
    }
}
