use std::io::{self, Write};
use tleproto::{OutputRecord, OUTPUT_HEADER};

/// Writes the look angle table, header first
pub struct LookAngleWriter<W: Write> {
    out: W,
    decimal_count: usize,
    records_written: usize,
}

impl<W: Write> LookAngleWriter<W> {
    pub fn new(mut out: W, decimal_count: usize) -> io::Result<Self> {
        writeln!(out, "{OUTPUT_HEADER}")?;
        Ok(Self {
            out,
            decimal_count,
            records_written: 0,
        })
    }

    pub fn write_record(&mut self, record: &OutputRecord) -> io::Result<()> {
        writeln!(self.out, "{}", record.display(self.decimal_count))?;
        self.records_written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flushes and returns the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
