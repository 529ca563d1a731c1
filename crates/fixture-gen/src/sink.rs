//! Output destinations for generated tables.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

/// Where a table is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    /// Created, or truncated if it exists
    File(PathBuf),
}

impl OutputTarget {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => OutputTarget::File(path),
            None => OutputTarget::Stdout,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path),
        }
    }
}

/// A buffered writer over the output target.
///
/// Dropping the sink flushes and closes it on every path; call
/// [`OutputSink::finish`] to observe flush errors.
pub struct OutputSink {
    target: OutputTarget,
    writer: BufWriter<Box<dyn Write>>,
}

impl OutputSink {
    pub fn open(target: OutputTarget) -> io::Result<Self> {
        let inner: Box<dyn Write> = match &target {
            OutputTarget::Stdout => Box::new(io::stdout().lock()),
            OutputTarget::File(path) => {
                debug!(path = %path.display(), "Creating output file");
                Box::new(File::create(path)?)
            }
        };
        Ok(Self {
            target,
            writer: BufWriter::new(inner),
        })
    }

    pub fn target(&self) -> &OutputTarget {
        &self.target
    }

    /// Flush buffered output and release the destination.
    pub fn finish(mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl std::fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputSink")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
