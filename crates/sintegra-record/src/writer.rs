//! Flat file writer.
//!
//! Joins formatted records into a SINTEGRA file, one record per line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::record::FormattedRecord;

/// Line terminator written after each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    CrLf,
    Lf,
}

impl LineEnding {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            LineEnding::CrLf => b"\r\n",
            LineEnding::Lf => b"\n",
        }
    }
}

/// Options for [`RecordWriter`].
#[derive(Debug, Clone, Default)]
pub struct WriterOptions {
    pub line_ending: LineEnding,
}

/// Writes records to a flat file.
pub struct RecordWriter<W: Write> {
    writer: BufWriter<W>,
    options: WriterOptions,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, WriterOptions::default())
    }

    pub fn with_options(writer: W, options: WriterOptions) -> Self {
        Self {
            writer: BufWriter::new(writer),
            options,
            written: 0,
        }
    }

    /// Write one record followed by the configured line terminator.
    pub fn write_record(&mut self, record: &FormattedRecord) -> Result<()> {
        self.writer.write_all(record.as_bytes())?;
        self.writer.write_all(self.options.line_ending.as_bytes())?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered output and return the record count.
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.written)
    }
}

impl RecordWriter<File> {
    /// Create a flat file for writing.
    pub fn create(path: &Path, options: WriterOptions) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::with_options(file, options))
    }
}

/// Write `records` to the file at `path`.
pub fn write_records<'a>(
    path: &Path,
    records: impl IntoIterator<Item = &'a FormattedRecord>,
    options: WriterOptions,
) -> Result<usize> {
    let mut writer = RecordWriter::create(path, options)?;
    for record in records {
        writer.write_record(record)?;
    }
    writer.finish()
}
