//! Command value objects produced by the wrappers and handed to hosts.

use std::fmt;

use crate::options::Options;

/// A command name, its arguments and the options controlling how a host
/// runs it.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub command: String,
    pub args: Vec<String>,
    pub options: Options,
}

impl Command {
    pub fn new<I, S>(command: impl Into<String>, args: I, options: Options) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            options,
        }
    }

    /// Arguments rendered as a single string, each preceded by a space
    /// (`" -p --json"`), ready to append to the command name.
    pub fn args_string(&self) -> String {
        self.args.iter().map(|arg| format!(" {}", arg)).collect()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.command, self.args_string())
    }
}

/// A raw command line run verbatim on a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCommand {
    pub command: String,
}

impl HostCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command)
    }
}
