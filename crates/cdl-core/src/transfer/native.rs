//! In-process streaming transfer over libcurl.
//!
//! The body is cut into fixed-size chunks; each full chunk is written to the
//! target in order and the cumulative byte count is reported after it.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use super::{Transfer, TransferError};
use crate::config::{CdlConfig, DEFAULT_CHUNK_SIZE};
use crate::control::AbortFlag;
use crate::cookies::CookieStore;

/// Progress callback: cumulative bytes written to the target so far.
pub type ProgressFn = Box<dyn Fn(u64) + Send + Sync>;

pub struct NativeTransfer {
    chunk_size: usize,
    connect_timeout: Duration,
    progress: Option<ProgressFn>,
}

impl Default for NativeTransfer {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, Duration::from_secs(30))
    }
}

impl NativeTransfer {
    pub fn new(chunk_size: usize, connect_timeout: Duration) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            connect_timeout,
            progress: None,
        }
    }

    pub fn from_config(cfg: &CdlConfig) -> Self {
        Self::new(cfg.chunk_size_bytes, cfg.connect_timeout())
    }

    /// Report cumulative bytes after each chunk.
    pub fn with_progress(mut self, progress: impl Fn(u64) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }
}

/// Buffers incoming data and writes it to the file one full chunk at a time.
struct ChunkWriter<'a> {
    file: File,
    buf: Vec<u8>,
    chunk_size: usize,
    written: u64,
    progress: Option<&'a ProgressFn>,
}

impl<'a> ChunkWriter<'a> {
    fn new(file: File, chunk_size: usize, progress: Option<&'a ProgressFn>) -> Self {
        Self {
            file,
            buf: Vec::with_capacity(chunk_size),
            chunk_size,
            written: 0,
            progress,
        }
    }

    fn push(&mut self, mut data: &[u8]) -> io::Result<()> {
        while !data.is_empty() {
            let take = (self.chunk_size - self.buf.len()).min(data.len());
            self.buf.extend_from_slice(&data[..take]);
            data = &data[take..];
            if self.buf.len() == self.chunk_size {
                self.write_chunk()?;
            }
        }
        Ok(())
    }

    fn write_chunk(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.file.write_all(&self.buf)?;
        self.written += self.buf.len() as u64;
        self.buf.clear();
        if let Some(progress) = self.progress {
            progress(self.written);
        }
        Ok(())
    }

    /// Writes the final short chunk and flushes. Returns total bytes written.
    fn finish(mut self) -> io::Result<u64> {
        self.write_chunk()?;
        self.file.flush()?;
        Ok(self.written)
    }
}

impl Transfer for NativeTransfer {
    fn name(&self) -> &'static str {
        "native"
    }

    fn transfer(
        &self,
        url: &str,
        target: &Path,
        cookies: &CookieStore,
        abort: &AbortFlag,
    ) -> Result<(), TransferError> {
        if abort.is_aborted() {
            return Err(TransferError::Aborted);
        }
        tracing::info!("downloading {} -> {}", url, target.display());

        let file = File::create(target)?;
        let mut writer = ChunkWriter::new(file, self.chunk_size, self.progress.as_ref());
        let mut storage_error: Option<io::Error> = None;

        let mut easy = cookies.authenticated_get(url, self.connect_timeout)?;
        easy.progress(true)?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                if abort.is_aborted() {
                    return Ok(0);
                }
                match writer.push(data) {
                    Ok(()) => Ok(data.len()),
                    Err(e) => {
                        storage_error = Some(e);
                        Ok(0) // abort transfer
                    }
                }
            })?;
            // Also fires while stalled, so an abort does not wait for the next byte.
            transfer.progress_function(|_, _, _, _| !abort.is_aborted())?;
            transfer.perform()
        };

        if abort.is_aborted() {
            return Err(TransferError::Aborted);
        }
        if let Some(e) = storage_error {
            return Err(TransferError::Storage(e));
        }
        performed?;

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(TransferError::Http(code));
        }

        let written = writer.finish()?;
        tracing::info!("finished {} ({} bytes)", target.display(), written);
        Ok(())
    }
}
