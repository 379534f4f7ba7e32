//! Command registry
//!
//! [`Action`] owns the root `clap::Command` and one [`CommandEntry`] per
//! registered callable. Registration happens through `&mut self`; once the
//! table is complete any number of dispatches can run through `&self`.

use crate::call::{CallArgs, Callable};
use crate::entry::CommandEntry;
use crate::error::{ActionError, DispatchError, RegistrationError, Result};
use crate::signature::Signature;
use crate::spec::{ArgOverride, Overrides};
use clap::{ArgMatches, Command};
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;

/// Everything needed to register one callable
pub struct Registration<R> {
    callable: Callable<R>,
    aliases: Vec<String>,
    overrides: Overrides,
}

impl<R> Registration<R> {
    pub fn new(callable: Callable<R>) -> Self {
        Self {
            callable,
            aliases: Vec::new(),
            overrides: Overrides::new(),
        }
    }

    /// Add an alternative subcommand name
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Override the derived spec of `parameter`
    ///
    /// Repeated overrides for the same parameter replace each other.
    pub fn override_arg(mut self, parameter: impl Into<String>, overrides: ArgOverride) -> Self {
        self.overrides.insert(parameter.into(), overrides);
        self
    }
}

/// Subcommand registry and dispatcher
///
/// # Example
///
/// ```rust
/// use argaction::{Action, CallArgs, Parameter, Signature};
/// use clap::Command;
///
/// let mut action = Action::new(Command::new("demo"));
/// action
///     .add(
///         Signature::new("concatenate")
///             .param(Parameter::positional("a"))
///             .param(Parameter::positional("b")),
///         |args: CallArgs| format!("{}{}", args.str(0).unwrap_or(""), args.str(1).unwrap_or("")),
///     )
///     .unwrap();
///
/// let result = action
///     .try_run_from(["demo", "concatenate", "one_", "two"])
///     .unwrap();
/// assert_eq!(result, "one_two");
/// ```
pub struct Action<R> {
    command: Command,
    entries: Vec<CommandEntry<R>>,
    /// Name or alias to index into `entries`
    names: HashMap<String, usize>,
}

impl<R> Action<R> {
    /// Wrap `command`, which becomes the parent of every registered subcommand
    pub fn new(command: Command) -> Self {
        let command = command
            .subcommand_required(true)
            .subcommand_value_name("command")
            .disable_help_subcommand(true);

        Self {
            command,
            entries: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Register a callable as a subcommand
    pub fn register(&mut self, registration: Registration<R>) -> Result<()> {
        let Registration {
            callable,
            aliases,
            overrides,
        } = registration;
        let entry = CommandEntry::build(callable, aliases, &overrides)?;

        let mut claimed = HashSet::new();
        for name in entry.names() {
            if let Some(&index) = self.names.get(name) {
                return Err(RegistrationError::NameConflict {
                    name: name.to_string(),
                    owner: self.entries[index].name().to_string(),
                });
            }
            if !claimed.insert(name) {
                return Err(RegistrationError::NameConflict {
                    name: name.to_string(),
                    owner: entry.name().to_string(),
                });
            }
        }

        tracing::debug!(
            command = entry.name(),
            aliases = ?entry.aliases(),
            arguments = entry.specs().len(),
            "registered command"
        );

        let index = self.entries.len();
        for name in entry.names() {
            self.names.insert(name.to_string(), index);
        }
        self.command = std::mem::take(&mut self.command).subcommand(entry.subcommand());
        self.entries.push(entry);

        Ok(())
    }

    /// Register `handler` under `signature` without aliases or overrides
    pub fn add<F>(&mut self, signature: Signature, handler: F) -> Result<()>
    where
        F: Fn(CallArgs) -> R + Send + Sync + 'static,
    {
        self.register(Registration::new(Callable::new(signature, handler)))
    }

    /// Modify the root command, e.g. to add global arguments
    pub fn augment(&mut self, f: impl FnOnce(Command) -> Command) {
        self.command = f(std::mem::take(&mut self.command));
    }

    /// Root command with every registered subcommand
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Entry registered under `name`, which may be an alias
    pub fn entry(&self, name: &str) -> Option<&CommandEntry<R>> {
        self.names.get(name).map(|&index| &self.entries[index])
    }

    pub fn entries(&self) -> &[CommandEntry<R>] {
        &self.entries
    }

    /// Parse without dispatching, so global flags can be read first
    pub fn parse_from<I, T>(&self, args: I) -> std::result::Result<ArgMatches, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.command.clone().try_get_matches_from(args)
    }

    /// Run the entry registered under `name` with the subcommand's matches
    pub fn dispatch(&self, name: &str, matches: &ArgMatches) -> std::result::Result<R, DispatchError> {
        let entry = self
            .entry(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;

        tracing::debug!(command = entry.name(), requested = name, "dispatching command");
        entry.invoke(matches)
    }

    /// Dispatch the subcommand selected in root-level `matches`
    pub fn dispatch_matches(&self, matches: &ArgMatches) -> std::result::Result<R, DispatchError> {
        let (name, sub_matches) = matches.subcommand().ok_or(DispatchError::NoCommand)?;
        self.dispatch(name, sub_matches)
    }

    /// Parse `args` and dispatch; parse failures are returned, not printed
    pub fn try_run_from<I, T>(&self, args: I) -> std::result::Result<R, ActionError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.parse_from(args)?;
        Ok(self.dispatch_matches(&matches)?)
    }

    /// Parse `args` and dispatch; parse failures print usage and exit
    pub fn run_from<I, T>(&self, args: I) -> std::result::Result<R, DispatchError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match self.parse_from(args) {
            Ok(matches) => self.dispatch_matches(&matches),
            Err(error) => error.exit(),
        }
    }

    /// [`run_from`](Self::run_from) over the process arguments
    pub fn run(&self) -> std::result::Result<R, DispatchError> {
        self.run_from(std::env::args_os())
    }
}
