//! Logger — the composition root: level gate, sanitizer, color wrapping and
//! destination fan-out behind one emission method per severity.

use parking_lot::RwLock;

use crate::conf::LoggerConfig;
use crate::error::Result;
use crate::format::{self, ansi};
use crate::level::{LogLevel, Severity};
use crate::sink::{DestinationRegistry, Sink, Stream};

/// Construction options for [`Logger`].
#[derive(Debug, Clone)]
pub struct LoggerOptions {
    pub log_level: LogLevel,
    pub color: bool,
    /// Skip the implicit default stream. A primary sink that happens to be
    /// that stream is still registered.
    pub quiet: bool,
    /// Stream registered in addition to the primary sink unless `quiet`.
    pub default_stream: Stream,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            color: false,
            quiet: false,
            default_stream: Stream::stdout(),
        }
    }
}

/// Leveled, synchronous fan-out logger.
///
/// Every call finishes its gate check, sanitization, coloring and the write
/// to every destination before returning. Safe to share between threads.
pub struct Logger {
    destinations: DestinationRegistry,
    level: RwLock<LogLevel>,
    color: bool,
    quiet: bool,
}

impl Logger {
    pub fn new(primary: impl Into<Sink>, options: LoggerOptions) -> Result<Self> {
        let destinations = DestinationRegistry::new();
        destinations.add(primary)?;
        if !options.quiet {
            destinations.add(options.default_stream)?;
        }

        Ok(Self {
            destinations,
            level: RwLock::new(options.log_level),
            color: options.color,
            quiet: options.quiet,
        })
    }

    /// Build a logger from loaded configuration. The configured `log_file`
    /// is the primary sink when set, standard output otherwise.
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        config.validate()?;

        let options = LoggerOptions {
            log_level: config.log_level,
            color: config.color,
            quiet: config.quiet,
            ..LoggerOptions::default()
        };
        let primary = match &config.log_file {
            Some(path) => Sink::from(path.as_str()),
            None => Sink::from(Stream::stdout()),
        };

        let logger = Self::new(primary, options)?;
        for path in &config.destinations {
            logger.add_destination(path.as_str())?;
        }
        Ok(logger)
    }

    // ── Destinations ────────────────────────────────────────────

    /// Register a stream or a file path. Adding a sink twice is a no-op.
    pub fn add_destination(&self, sink: impl Into<Sink>) -> Result<()> {
        self.destinations.add(sink)?;
        Ok(())
    }

    /// Unregister a stream or a file path, closing the file if it was opened
    /// by this logger. Removing an unknown sink does nothing.
    pub fn remove_destination(&self, sink: impl Into<Sink>) {
        self.destinations.remove(sink);
    }

    pub fn destinations(&self) -> Vec<Sink> {
        self.destinations.list()
    }

    // ── Settings ────────────────────────────────────────────────

    pub fn color(&self) -> bool {
        self.color
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn log_level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set_log_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    pub fn is_trace(&self) -> bool {
        self.log_level().is_trace()
    }

    pub fn is_debug(&self) -> bool {
        self.log_level().is_debug()
    }

    pub fn is_verbose(&self) -> bool {
        self.log_level().is_verbose()
    }

    pub fn is_warn(&self) -> bool {
        self.log_level().is_warn()
    }

    // ── Severities ──────────────────────────────────────────────

    pub fn error(&self, message: impl AsRef<[u8]>) {
        self.emit(Severity::Error, message.as_ref());
    }

    /// Emitted as `Warning: <message>`.
    pub fn warn(&self, message: impl AsRef<[u8]>) {
        self.emit(Severity::Warn, message.as_ref());
    }

    pub fn success(&self, message: impl AsRef<[u8]>) {
        self.emit(Severity::Success, message.as_ref());
    }

    pub fn notify(&self, message: impl AsRef<[u8]>) {
        self.emit(Severity::Notify, message.as_ref());
    }

    /// Output relayed from a host. Any color codes it carries are dropped.
    pub fn host_output(&self, message: impl AsRef<[u8]>) {
        self.emit(Severity::HostOutput, message.as_ref());
    }

    /// Emitted at `verbose` and above.
    pub fn debug(&self, message: impl AsRef<[u8]>) {
        self.emit(Severity::Debug, message.as_ref());
    }

    /// Emitted at `trace` only.
    pub fn trace(&self, message: impl AsRef<[u8]>) {
        self.emit(Severity::Trace, message.as_ref());
    }

    fn emit(&self, severity: Severity, message: &[u8]) {
        if !severity.is_enabled_at(self.log_level()) {
            return;
        }

        let text = format::convert(message);
        let mut line = String::with_capacity(severity.prefix().len() + text.len());
        line.push_str(severity.prefix());
        if severity.strips_embedded_color() {
            line.push_str(&ansi::strip_colors(&text));
        } else {
            line.push_str(&text);
        }

        self.optionally_color(severity.color().code(), line);
    }

    // ── Utilities ───────────────────────────────────────────────

    /// Sanitize arbitrary bytes into valid UTF-8 (see [`format::convert`]).
    pub fn convert(&self, bytes: impl AsRef<[u8]>) -> String {
        format::convert(bytes.as_ref()).into_owned()
    }

    pub fn strip_colors_from<I, S>(&self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ansi::strip_colors_from(lines)
    }

    /// Write `message` to every destination, wrapped in `color_code` and the
    /// reset code when color is enabled. No level gate applies.
    pub fn optionally_color(&self, color_code: &str, message: impl AsRef<[u8]>) {
        let text = format::convert(message.as_ref());
        self.destinations.write_colored(self.color, color_code, &text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Color, RESET};
    use crate::sink::registry::tests::{capture_stream, Capture};
    use std::io::{self, Write};
    use std::sync::Arc;

    use mockall::{mock, Sequence};

    mock! {
        pub Io {}
        impl Write for Io {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
            fn flush(&mut self) -> io::Result<()>;
        }
    }

    fn quiet_logger(level: LogLevel, color: bool) -> (Logger, Capture) {
        let (stream, capture) = capture_stream("my_io");
        let logger = Logger::new(
            stream,
            LoggerOptions {
                log_level: level,
                color,
                quiet: true,
                ..LoggerOptions::default()
            },
        )
        .unwrap();
        (logger, capture)
    }

    type Emit = fn(&Logger, &str);

    fn always_on() -> [(&'static str, Emit); 5] {
        [
            ("error", |l: &Logger, m: &str| l.error(m)),
            ("warn", |l: &Logger, m: &str| l.warn(m)),
            ("success", |l: &Logger, m: &str| l.success(m)),
            ("notify", |l: &Logger, m: &str| l.notify(m)),
            ("host_output", |l: &Logger, m: &str| l.host_output(m)),
        ]
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn test_defaults() {
        let (fake_stdout, _) = capture_stream("stdout");
        let (my_io, _) = capture_stream("my_io");
        let logger = Logger::new(
            my_io.clone(),
            LoggerOptions {
                default_stream: fake_stdout.clone(),
                ..LoggerOptions::default()
            },
        )
        .unwrap();

        assert_eq!(logger.destinations(), vec![Sink::Stream(my_io), Sink::Stream(fake_stdout)]);
        assert!(!logger.color());
        assert_eq!(logger.log_level(), LogLevel::Verbose);
    }

    #[test]
    fn test_does_not_duplicate_default_stream() {
        let logger = Logger::new(Stream::stdout(), LoggerOptions::default()).unwrap();
        assert_eq!(logger.destinations(), vec![Sink::Stream(Stream::stdout())]);
    }

    #[test]
    fn test_quiet_skips_only_the_implicit_default() {
        let (fake_stdout, _) = capture_stream("stdout");

        let logger = Logger::new(
            fake_stdout.clone(),
            LoggerOptions {
                quiet: true,
                default_stream: fake_stdout.clone(),
                ..LoggerOptions::default()
            },
        )
        .unwrap();
        assert_eq!(logger.destinations(), vec![Sink::Stream(fake_stdout.clone())]);

        let (other, _) = capture_stream("other");
        let logger = Logger::new(
            other.clone(),
            LoggerOptions {
                quiet: true,
                default_stream: fake_stdout,
                ..LoggerOptions::default()
            },
        )
        .unwrap();
        assert_eq!(logger.destinations(), vec![Sink::Stream(other)]);
    }

    #[test]
    fn test_unopenable_primary_fails_construction() {
        let dir = tempfile::tempdir().unwrap();
        let result = Logger::new(
            dir.path().join("no_such_dir").join("run.log"),
            LoggerOptions { quiet: true, ..LoggerOptions::default() },
        );
        assert!(matches!(result, Err(crate::LoggerError::DestinationOpen { .. })));
    }

    #[test]
    fn test_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("run.log");
        let extra = dir.path().join("extra.log");
        let config = LoggerConfig {
            log_level: LogLevel::Debug,
            quiet: true,
            log_file: Some(primary.to_string_lossy().into_owned()),
            destinations: vec![extra.to_string_lossy().into_owned()],
            ..LoggerConfig::default()
        };

        let logger = Logger::from_config(&config).unwrap();
        logger.debug("configured");

        assert_eq!(logger.log_level(), LogLevel::Debug);
        assert_eq!(logger.destinations().len(), 2);
        assert_eq!(std::fs::read_to_string(&primary).unwrap(), "configured\n");
        assert_eq!(std::fs::read_to_string(&extra).unwrap(), "configured\n");
    }

    // ── Destinations ────────────────────────────────────────────

    #[test]
    fn test_add_destination_opens_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("my_tmp_file");
        let (logger, _) = quiet_logger(LogLevel::Verbose, false);

        logger.add_destination(path.as_path()).unwrap();

        assert!(path.exists());
        let file = logger.destinations().into_iter().find_map(|d| d.path().map(|p| p.to_path_buf()));
        assert!(file.unwrap().ends_with("my_tmp_file"));
    }

    #[test]
    fn test_remove_destinations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("my_file");
        let (stream, _) = capture_stream("my_io");
        let logger = Logger::new(
            stream.clone(),
            LoggerOptions { quiet: true, ..LoggerOptions::default() },
        )
        .unwrap();

        logger.add_destination(path.as_path()).unwrap();
        logger.remove_destination(&stream);
        logger.remove_destination(path.as_path());

        assert!(logger.destinations().is_empty());
    }

    #[test]
    fn test_messages_reach_files_and_streams() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        let (logger, capture) = quiet_logger(LogLevel::Info, false);
        logger.add_destination(path.as_path()).unwrap();

        logger.notify("hello");

        assert_eq!(capture.contents(), "hello\n");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_no_output_without_destinations() {
        let (stream, capture) = capture_stream("my_io");
        let logger = Logger::new(
            stream.clone(),
            LoggerOptions { quiet: true, ..LoggerOptions::default() },
        )
        .unwrap();
        logger.remove_destination(stream);

        logger.error("dropped");
        assert_eq!(capture.contents(), "");
    }

    // ── Utilities ───────────────────────────────────────────────

    #[test]
    fn test_strip_colors_from_arrays() {
        let (logger, _) = quiet_logger(LogLevel::Verbose, false);
        let stripped = logger.strip_colors_from(["\x1b[00;30m text! \x1b[00;00m"]);
        assert_eq!(stripped, vec![" text! "]);
    }

    #[test]
    fn test_convert_strips_invalid_utf8() {
        let (logger, _) = quiet_logger(LogLevel::Verbose, false);
        let mut bytes = "└── jimmy-thelock (\x1b[0;36mv1.0.0\x1b[0m)".as_bytes().to_vec();
        bytes.push(0xAD);
        bytes.push(b'\n');

        assert_eq!(logger.convert(&bytes), "└── jimmy-thelock (\x1b[0;36mv1.0.0\x1b[0m)\n");
        assert_eq!(logger.convert("plain"), "plain");
    }

    #[test]
    fn test_optionally_color_write_sequence() {
        let mut writer = MockIo::new();
        let mut seq = Sequence::new();
        writer.expect_write()
            .withf(|buf| buf == b"\x1b[00;30m")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|buf| Ok(buf.len()));
        writer.expect_write()
            .withf(|buf| buf == b"my string\n")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|buf| Ok(buf.len()));
        writer.expect_write()
            .withf(|buf| buf == RESET.as_bytes())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|buf| Ok(buf.len()));
        writer.expect_flush().returning(|| Ok(()));

        let logger = Logger::new(
            Stream::new("my_io", writer),
            LoggerOptions { color: true, quiet: true, ..LoggerOptions::default() },
        )
        .unwrap();

        logger.optionally_color("\x1b[00;30m", "my string");
    }

    #[test]
    fn test_optionally_color_without_color() {
        let (logger, capture) = quiet_logger(LogLevel::Verbose, false);
        logger.optionally_color(Color::Black.code(), "my string");
        assert_eq!(capture.contents(), "my string\n");
    }

    // ── Level gating ────────────────────────────────────────────

    #[test]
    fn test_trace_level() {
        let (logger, capture) = quiet_logger(LogLevel::parse("trace").unwrap(), true);
        assert!(logger.is_debug());
        assert!(logger.is_trace());
        assert!(logger.is_warn());

        for (name, log) in always_on() {
            log(&logger, name);
        }
        logger.debug("DEBUGGING!");
        logger.trace("TRACING!");

        let out = capture.contents();
        for expected in ["error", "Warning: warn", "success", "notify", "host_output", "DEBUGGING!", "TRACING!"] {
            assert!(out.contains(expected), "missing {:?} in {:?}", expected, out);
        }
        assert_eq!(out.matches(RESET).count(), 7);
    }

    #[test]
    fn test_verbose_level() {
        let (logger, capture) = quiet_logger(LogLevel::parse("verbose").unwrap(), true);
        assert!(!logger.is_trace());
        assert!(!logger.is_debug());
        assert!(logger.is_verbose());
        assert!(logger.is_warn());

        logger.debug("NOT DEBUGGING!");
        logger.trace("NOT TRACING!");

        let out = capture.contents();
        assert!(out.contains("NOT DEBUGGING!"));
        assert!(!out.contains("NOT TRACING!"));
    }

    #[test]
    fn test_debug_level() {
        let (logger, capture) = quiet_logger(LogLevel::parse("debug").unwrap(), true);
        assert!(!logger.is_trace());
        assert!(logger.is_debug());
        assert!(logger.is_warn());

        logger.debug("IMA DEBUGGING!");
        logger.trace("NOT TRACING!");

        let out = capture.contents();
        assert!(out.contains("IMA DEBUGGING!"));
        assert!(!out.contains("NOT TRACING!"));
    }

    #[test]
    fn test_info_level_skips_debug_and_trace() {
        let (logger, capture) = quiet_logger(LogLevel::parse(":info").unwrap(), true);
        assert!(!logger.is_debug());
        assert!(!logger.is_trace());

        logger.debug("NOT DEBUGGING!");
        logger.trace("NOT TRACING!");

        assert_eq!(capture.contents(), "");
    }

    #[test]
    fn test_unconditional_severities_at_every_level() {
        for level in LogLevel::ALL {
            let (logger, capture) = quiet_logger(level, true);
            for (name, log) in always_on() {
                log(&logger, name);
                let out = capture.contents();
                assert!(out.contains(name), "{} not printed at {}", name, level);
            }
            // start code + line + reset for each of the five calls
            assert_eq!(capture.contents().matches(RESET).count(), 5);
        }
    }

    #[test]
    fn test_set_log_level_changes_gate() {
        let (logger, capture) = quiet_logger(LogLevel::Info, false);
        logger.trace("hidden");
        logger.set_log_level(LogLevel::Trace);
        logger.trace("shown");
        assert_eq!(capture.contents(), "shown\n");
    }

    // ── Message shaping ─────────────────────────────────────────

    #[test]
    fn test_severity_colors_and_shapes() {
        let (logger, capture) = quiet_logger(LogLevel::Verbose, true);

        logger.warn("IMA WARNING!");
        assert_eq!(
            capture.contents(),
            format!("{}Warning: IMA WARNING!\n{}", Color::Yellow.code(), RESET)
        );

        capture.0.lock().clear();
        logger.error("ERROR!");
        assert_eq!(capture.contents(), format!("{}ERROR!\n{}", Color::BrightRed.code(), RESET));
    }

    #[test]
    fn test_host_output_is_sanitized_and_uncolored() {
        let (logger, capture) = quiet_logger(LogLevel::Info, false);
        let mut raw = b"\x1b[0;36mv1.1.0\x1b[0m ".to_vec();
        raw.push(0xAD);
        raw.extend_from_slice(b"done");

        logger.host_output(&raw);

        assert_eq!(capture.contents(), "v1.1.0 done\n");
    }

    #[test]
    fn test_error_keeps_embedded_color() {
        let (logger, capture) = quiet_logger(LogLevel::Info, false);
        logger.error("\x1b[01;31mred\x1b[0m");
        assert_eq!(capture.contents(), "\x1b[01;31mred\x1b[0m\n");
    }

    #[test]
    fn test_logger_is_shareable_across_threads() {
        let (logger, capture) = quiet_logger(LogLevel::Verbose, false);
        let logger = Arc::new(logger);

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || logger.notify(format!("worker {}", i)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let out = capture.contents();
        assert_eq!(out.lines().count(), 4);
        assert!(out.lines().all(|l| l.starts_with("worker ")));
    }

    #[test]
    fn test_logger_writes_flush_through_custom_writer() {
        struct Counting(Arc<parking_lot::Mutex<usize>>);
        impl Write for Counting {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                *self.0.lock() += 1;
                Ok(())
            }
        }

        let flushes = Arc::new(parking_lot::Mutex::new(0));
        let logger = Logger::new(
            Stream::new("counting", Counting(Arc::clone(&flushes))),
            LoggerOptions { quiet: true, ..LoggerOptions::default() },
        )
        .unwrap();

        logger.success("one");
        logger.success("two");
        assert_eq!(*flushes.lock(), 2);
    }
}
