//! CSV export of optimizer runs.
//!
//! One row per improvement of the best-so-far value:
//!
//! ```text
//! suite,fid,iid,dim,run,evaluations,y,best_y
//! PBO,1,1,16,0,1,9,12
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::experiment::RunSummary;

pub const HEADER: &str = "suite,fid,iid,dim,run,evaluations,y,best_y";

/// Writes run improvements as CSV rows, header first
pub struct CsvLogger<W: Write> {
    writer: W,
    header_written: bool,
    rows: usize,
}

impl CsvLogger<BufWriter<File>> {
    /// Create (or truncate) the file at `path`
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> CsvLogger<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
            rows: 0,
        }
    }

    fn ensure_header(&mut self) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.writer, "{}", HEADER)?;
            self.header_written = true;
        }
        Ok(())
    }

    /// Write every improvement of one run.
    ///
    /// `y` is the new best-so-far value, `best_y` the final best of the run.
    pub fn log_run(&mut self, summary: &RunSummary) -> io::Result<()> {
        self.ensure_header()?;

        for improvement in &summary.improvements {
            writeln!(
                self.writer,
                "{},{},{},{},{},{},{},{}",
                summary.suite,
                summary.fid,
                summary.iid,
                summary.dim,
                summary.run,
                improvement.evaluations,
                improvement.y,
                summary.best_y
            )?;
            self.rows += 1;
        }
        Ok(())
    }

    pub fn log_all<'a>(&mut self, summaries: impl IntoIterator<Item = &'a RunSummary>) -> io::Result<()> {
        for summary in summaries {
            self.log_run(summary)?;
        }
        Ok(())
    }

    /// Data rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
