//! Destination registry — the ordered, deduplicated set of sinks a logger
//! writes to.
//!
//! Streams are borrowed from the caller and never closed here. Paths are
//! opened for append on `add` and owned by the registry until `remove` (or
//! drop) closes them.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::{LoggerError, Result};
use crate::format::ansi::{wrap_and_emit, Color};
use super::stream::{Sink, Stream};

/// Where a destination's bytes go.
enum Target {
    Stream(Stream),
    File { path: PathBuf, file: File },
}

/// A registered target plus its write health.
struct Destination {
    target: Target,
    /// Set on the first failed write and cleared by the next successful one.
    /// While set, further failures are not reported again.
    failing: bool,
}

impl Destination {
    fn new(target: Target) -> Self {
        Self { target, failing: false }
    }

    fn sink(&self) -> Sink {
        match &self.target {
            Target::Stream(stream) => Sink::Stream(stream.clone()),
            Target::File { path, .. } => Sink::Path(path.clone()),
        }
    }

    fn matches(&self, identity: &Sink) -> bool {
        match (&self.target, identity) {
            (Target::Stream(mine), Sink::Stream(other)) => mine.same_as(other),
            (Target::File { path, .. }, Sink::Path(other)) => path == other,
            _ => false,
        }
    }

    fn emit(&mut self, color: bool, start_code: &str, message: &str) -> io::Result<()> {
        match &mut self.target {
            Target::Stream(stream) => {
                stream.with_writer(|w| wrap_and_emit(w, color, start_code, message))
            }
            Target::File { file, .. } => wrap_and_emit(file, color, start_code, message),
        }
    }
}

/// Thread-safe registry. `add`, `remove` and every fan-out take the same
/// lock, so a write never sees a half-updated destination list.
#[derive(Default)]
pub struct DestinationRegistry {
    destinations: Mutex<Vec<Destination>>,
}

impl DestinationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sink. Returns `Ok(false)` if it was already present.
    ///
    /// Paths are opened for append (created if missing) before the registry
    /// is touched, so a failed open leaves it unchanged.
    pub fn add(&self, sink: impl Into<Sink>) -> Result<bool> {
        let identity = resolve(sink.into())?;
        let mut destinations = self.destinations.lock();

        if destinations.iter().any(|d| d.matches(&identity)) {
            return Ok(false);
        }

        let target = match identity {
            Sink::Stream(stream) => Target::Stream(stream),
            Sink::Path(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .map_err(|source| LoggerError::DestinationOpen {
                        path: path.clone(),
                        source,
                    })?;
                Target::File { path, file }
            }
        };
        let destination = Destination::new(target);

        debug!(destination = %destination.sink(), "Added log destination");
        destinations.push(destination);
        Ok(true)
    }

    /// Unregister a sink, closing its file if the registry owns one.
    /// Returns `false` if it was not registered.
    pub fn remove(&self, sink: impl Into<Sink>) -> bool {
        let identity = match resolve(sink.into()) {
            Ok(identity) => identity,
            Err(_) => return false,
        };
        let mut destinations = self.destinations.lock();

        match destinations.iter().position(|d| d.matches(&identity)) {
            Some(index) => {
                // Dropping the destination closes an owned file handle
                let removed = destinations.remove(index);
                debug!(destination = %removed.sink(), "Removed log destination");
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, sink: impl Into<Sink>) -> bool {
        match resolve(sink.into()) {
            Ok(identity) => self.destinations.lock().iter().any(|d| d.matches(&identity)),
            Err(_) => false,
        }
    }

    /// Registered sinks in registration order.
    pub fn list(&self) -> Vec<Sink> {
        self.destinations.lock().iter().map(Destination::sink).collect()
    }

    pub fn len(&self) -> usize {
        self.destinations.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.lock().is_empty()
    }

    /// Write `text` and a newline to every destination.
    pub fn write_line(&self, text: &str) {
        self.write_colored(false, "", text);
    }

    /// Write `text` to every destination, wrapped in `start_code` when
    /// `color` is set.
    ///
    /// A failing destination never stops delivery to the others. A
    /// destination that starts failing is reported once, after the pass, to
    /// tracing and to the destinations that did accept the message. It is
    /// not reported again until a write to it has succeeded.
    pub fn write_colored(&self, color: bool, start_code: &str, text: &str) {
        let mut destinations = self.destinations.lock();

        let mut newly_failed: Vec<(usize, io::Error)> = Vec::new();
        for (index, destination) in destinations.iter_mut().enumerate() {
            match destination.emit(color, start_code, text) {
                Ok(()) => destination.failing = false,
                Err(e) => {
                    if !destination.failing {
                        newly_failed.push((index, e));
                    }
                    destination.failing = true;
                }
            }
        }

        for (index, error) in &newly_failed {
            let sink = destinations[*index].sink();
            warn!(destination = %sink, error = %error, "Failed to write to log destination");

            let notice = format!("Warning: failed to write to log destination {}: {}", sink, error);
            for destination in destinations.iter_mut().filter(|d| !d.failing) {
                let _ = destination.emit(color, Color::Yellow.code(), &notice);
            }
        }
    }
}

fn resolve(sink: Sink) -> Result<Sink> {
    sink.resolved().map_err(|source| LoggerError::DestinationOpen {
        path: sink.path().map(PathBuf::from).unwrap_or_default(),
        source,
    })
}
