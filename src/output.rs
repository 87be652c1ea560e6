//! Writing generated license documents

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Errors that can occur when emitting a license document
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Cannot create license file {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write license to standard output: {0}")]
    Stdout(#[source] io::Error),
}

/// Destination for generated documents: a file per document, or a shared stream
pub struct OutputSink<W> {
    stream: W,
}

impl OutputSink<io::Stdout> {
    /// Sink whose stream is the process's standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputSink<W> {
    pub fn new(stream: W) -> Self {
        Self { stream }
    }

    /// Write `text` to `target`, or to the stream when there is no target
    pub fn emit(&mut self, target: Option<&Path>, text: &str) -> Result<(), WriteError> {
        match target {
            Some(path) => write_file(path, text),
            None => {
                self.stream
                    .write_all(text.as_bytes())
                    .and_then(|_| self.stream.flush())
                    .map_err(WriteError::Stdout)
            }
        }
    }

    pub fn into_inner(self) -> W {
        self.stream
    }
}

/// Write `text` to `path`, creating missing parent directories
pub fn write_file(path: &Path, text: &str) -> Result<(), WriteError> {
    let file_error = |source| WriteError::File {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(file_error)?;
    }
    fs::write(path, text).map_err(file_error)?;
    info!(path = %path.display(), "wrote license file");
    Ok(())
}
