use std::path::Path;

use tokio::{
    fs::File,
    io::{self, AsyncWrite, AsyncWriteExt, BufWriter},
};

use crate::item::Record;
use crate::Result;

/// Newline-delimited JSON sink for finished records.
pub struct FeedWriter {
    out: BufWriter<Box<dyn AsyncWrite + Send + Unpin>>,
    written: usize,
}

impl FeedWriter {
    /// Creates (or truncates) the file at `path`.
    pub async fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).await?;
        Ok(Self::new(Box::new(file)))
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    fn new(out: Box<dyn AsyncWrite + Send + Unpin>) -> Self {
        Self {
            out: BufWriter::new(out),
            written: 0,
        }
    }

    /// Writes one record as a JSON line and flushes it through.
    pub async fn write(&mut self, record: &Record) -> Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        self.out.write_all(&line).await?;
        self.out.flush().await?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes buffered lines. Must be called before dropping the writer.
    pub async fn close(mut self) -> Result<usize> {
        self.out.flush().await?;
        self.out.shutdown().await?;
        Ok(self.written)
    }
}
