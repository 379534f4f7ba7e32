//! Single-command exposure
//!
//! [`Exposed`] puts one callable's arguments straight onto a command, for
//! programs that are a single function rather than a set of subcommands.

use crate::call::Callable;
use crate::entry::CommandEntry;
use crate::error::{ActionError, DispatchError, Result};
use crate::mapper::{ClaimedNames, SignatureMapper};
use crate::spec::{ArgSpec, Overrides};
use clap::{ArgMatches, Command};
use std::ffi::OsString;

/// A command whose arguments are derived from one callable
#[derive(Debug)]
pub struct Exposed<R> {
    /// Command as supplied, without the derived arguments
    base: Command,
    command: Command,
    entry: CommandEntry<R>,
}

/// `base` with the derived arguments, refusing names `base` already uses
fn assemble(base: &Command, name: &str, specs: &[ArgSpec]) -> Result<Command> {
    let mut claimed = ClaimedNames::of_command(base);
    for spec in specs {
        claimed.claim(name, spec)?;
    }
    Ok(SignatureMapper::apply(base.clone(), specs))
}

impl<R> Exposed<R> {
    pub fn new(command: Command, callable: Callable<R>) -> Result<Self> {
        Self::with_overrides(command, callable, &Overrides::new())
    }

    pub fn with_overrides(command: Command, callable: Callable<R>, overrides: &Overrides) -> Result<Self> {
        let entry = CommandEntry::build(callable, Vec::new(), overrides)?;
        let assembled = assemble(&command, entry.name(), entry.specs())?;

        tracing::debug!(callable = entry.name(), "exposed callable on root command");
        Ok(Self {
            base: command,
            command: assembled,
            entry,
        })
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Modify the command, e.g. to add global arguments
    ///
    /// Fails, leaving the command unchanged, when an added argument takes a
    /// name the callable's arguments already use.
    pub fn augment(&mut self, f: impl FnOnce(Command) -> Command) -> Result<()> {
        let base = f(self.base.clone());
        self.command = assemble(&base, self.entry.name(), self.entry.specs())?;
        self.base = base;
        Ok(())
    }

    pub fn parse_from<I, T>(&self, args: I) -> std::result::Result<ArgMatches, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.command.clone().try_get_matches_from(args)
    }

    pub fn dispatch(&self, matches: &ArgMatches) -> std::result::Result<R, DispatchError> {
        self.entry.invoke(matches)
    }

    pub fn try_run_from<I, T>(&self, args: I) -> std::result::Result<R, ActionError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.parse_from(args)?;
        Ok(self.dispatch(&matches)?)
    }

    /// Parse `args` and invoke the callable; parse failures print usage and exit
    pub fn run_from<I, T>(&self, args: I) -> std::result::Result<R, DispatchError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match self.parse_from(args) {
            Ok(matches) => self.dispatch(&matches),
            Err(error) => error.exit(),
        }
    }

    pub fn run(&self) -> std::result::Result<R, DispatchError> {
        self.run_from(std::env::args_os())
    }
}
