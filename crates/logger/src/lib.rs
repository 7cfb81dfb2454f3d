// Leveled, synchronous fan-out logger for the test harness.

// Message shaping
pub mod format;
pub mod level;

// Destinations
pub mod sink;

// Composition and configuration
pub mod conf;
pub mod error;
pub mod logger;

pub use conf::LoggerConfig;
pub use error::LoggerError;
pub use format::{Color, RESET};
pub use level::{LogLevel, Severity};
pub use logger::{Logger, LoggerOptions};
pub use sink::{Sink, Stream};
