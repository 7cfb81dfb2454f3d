//! Stream and Sink — what a destination is and how it is identified.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// A caller-owned, live output stream.
///
/// Clones share the same underlying writer and compare equal; two streams
/// built separately are different destinations even if they wrap the same
/// kind of writer.
#[derive(Clone)]
pub struct Stream {
    name: Arc<str>,
    writer: SharedWriter,
}

impl Stream {
    pub fn new<W>(name: &str, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            name: Arc::from(name),
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    /// The process-wide standard output stream. Every call returns a handle
    /// to the same destination.
    pub fn stdout() -> Self {
        static STDOUT: OnceLock<Stream> = OnceLock::new();
        STDOUT.get_or_init(|| Stream::new("<stdout>", io::stdout())).clone()
    }

    /// The process-wide standard error stream.
    pub fn stderr() -> Self {
        static STDERR: OnceLock<Stream> = OnceLock::new();
        STDERR.get_or_init(|| Stream::new("<stderr>", io::stderr())).clone()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run `f` with exclusive access to the underlying writer.
    pub fn with_writer<T>(&self, f: impl FnOnce(&mut (dyn Write + Send)) -> T) -> T {
        let mut writer = self.writer.lock();
        f(&mut *writer)
    }

    pub fn same_as(&self, other: &Stream) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.writer), Arc::as_ptr(&other.writer))
    }
}

impl PartialEq for Stream {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for Stream {}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Stream").field(&self.name).finish()
    }
}

/// A log destination: either a live stream or a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stream(Stream),
    Path(PathBuf),
}

impl Sink {
    /// Identity of this sink inside a registry. Paths are made absolute
    /// (without touching the filesystem) so `log.txt` and `./log.txt` match.
    pub fn resolved(&self) -> io::Result<Sink> {
        match self {
            Sink::Stream(stream) => Ok(Sink::Stream(stream.clone())),
            Sink::Path(path) => Ok(Sink::Path(resolve_path(path)?)),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Sink::Path(path) => Some(path),
            Sink::Stream(_) => None,
        }
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, Sink::Stream(_))
    }
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Stream(stream) => f.write_str(stream.name()),
            Sink::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<Stream> for Sink {
    fn from(stream: Stream) -> Self {
        Sink::Stream(stream)
    }
}

impl From<&Stream> for Sink {
    fn from(stream: &Stream) -> Self {
        Sink::Stream(stream.clone())
    }
}

impl From<PathBuf> for Sink {
    fn from(path: PathBuf) -> Self {
        Sink::Path(path)
    }
}

impl From<&Path> for Sink {
    fn from(path: &Path) -> Self {
        Sink::Path(path.to_path_buf())
    }
}

impl From<&str> for Sink {
    fn from(path: &str) -> Self {
        Sink::Path(PathBuf::from(path))
    }
}

impl From<String> for Sink {
    fn from(path: String) -> Self {
        Sink::Path(PathBuf::from(path))
    }
}

/// Make `path` absolute and drop `.` components.
pub fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    Ok(absolute
        .components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect())
}
