// Collaborators that build commands and versions for the harness and hand
// their text to the logger.

pub mod command;
pub mod error;
pub mod options;
pub mod pe_version;
pub mod runtime;
pub mod wrappers;

pub use command::{Command, HostCommand};
pub use error::ScrapeError;
pub use options::Options;
