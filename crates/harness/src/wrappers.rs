//! Wrappers — builders for the commands the harness runs on hosts.
//!
//! Each builder only shapes arguments and options into a [`Command`];
//! running it is up to the host layer.

use serde_json::{json, Value};
use tracing::warn;

use crate::command::{Command, HostCommand};
use crate::options::{ensure_map, merge, Options};

/// Options every puppet-ecosystem tool is run with: an `ENV` map (empty
/// unless the caller set one) and `cmdexe` so Windows hosts go through
/// `cmd.exe`.
fn tool_options(mut options: Options) -> Options {
    ensure_map(&mut options, "ENV");
    options.insert("cmdexe".to_string(), Value::Bool(true));
    options
}

pub fn facter<I, S>(args: I, options: Options) -> Command
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Command::new("facter", args, tool_options(options))
}

/// Like [`facter`]; cfacter additionally needs a `HOME`, defaulting to `/`.
pub fn cfacter<I, S>(args: I, options: Options) -> Command
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut options = tool_options(options);
    if let Some(env) = ensure_map(&mut options, "ENV") {
        env.entry("HOME").or_insert_with(|| json!("/"));
    }
    Command::new("cfacter", args, options)
}

pub fn hiera<I, S>(args: I, options: Options) -> Command
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Command::new("hiera", args, tool_options(options))
}

/// `puppet <subcommand> <args>`.
pub fn puppet<I, S>(subcommand: &str, args: I, options: Options) -> Command
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Command::new(format!("puppet {}", subcommand), args, tool_options(options))
}

macro_rules! deprecated_puppet {
    ($($name:ident => $sub:literal),* $(,)?) => {
        $(
            #[deprecated(note = "use `puppet` with the subcommand as first argument")]
            pub fn $name<I, S>(args: I, options: Options) -> Command
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                warn!(
                    "{} is deprecated, use puppet(\"{}\", ...) instead",
                    stringify!($name),
                    $sub
                );
                puppet($sub, args, options)
            }
        )*
    };
}

deprecated_puppet! {
    puppet_resource => "resource",
    puppet_doc => "doc",
    puppet_kick => "kick",
    puppet_cert => "cert",
    puppet_apply => "apply",
    puppet_master => "master",
    puppet_agent => "agent",
    puppet_filebucket => "filebucket",
}

pub fn host_command(command: impl Into<String>) -> HostCommand {
    HostCommand::new(command)
}

fn powershell_defaults() -> Options {
    let mut defaults = Options::new();
    defaults.insert("ExecutionPolicy".into(), json!("Bypass"));
    defaults.insert("InputFormat".into(), json!("None"));
    defaults.insert("NoLogo".into(), json!(""));
    defaults.insert("NoProfile".into(), json!(""));
    defaults.insert("NonInteractive".into(), json!(""));
    defaults
}

/// `powershell.exe` running `command`, with the default non-interactive
/// switches merged with `overrides`. Empty or null values render as bare
/// switches (`-NoLogo`), everything else as `-Key value`.
pub fn powershell(command: &str, overrides: &Options) -> Command {
    let switches = merge(&powershell_defaults(), overrides);

    let mut args: Vec<String> = switches
        .iter()
        .map(|(key, value)| match value {
            Value::Null => format!("-{}", key),
            Value::String(s) if s.is_empty() => format!("-{}", key),
            Value::String(s) => format!("-{} {}", key, s),
            other => format!("-{} {}", key, other),
        })
        .collect();
    args.push(format!("-Command \"{}\"", command));

    Command::new("powershell.exe", args, Options::new())
}
