//! Dispatch entries
//!
//! A [`CommandEntry`] owns everything needed to run one callable from parsed
//! matches: the callable itself and the specs derived from its signature.

use crate::call::Callable;
use crate::error::{DispatchError, Result};
use crate::mapper::SignatureMapper;
use crate::signature::Signature;
use crate::spec::{ArgSpec, Overrides};
use clap::{ArgMatches, Command};

/// One registered callable with its derived specs
#[derive(Debug)]
pub struct CommandEntry<R> {
    name: String,
    aliases: Vec<String>,
    callable: Callable<R>,
    specs: Vec<ArgSpec>,
}

impl<R> CommandEntry<R> {
    /// Validate the signature and derive the specs
    pub fn build(callable: Callable<R>, aliases: Vec<String>, overrides: &Overrides) -> Result<Self> {
        let specs = SignatureMapper::derive(callable.signature(), overrides)?;

        Ok(Self {
            name: callable.signature().command_name(),
            aliases,
            callable,
            specs,
        })
    }

    /// Subcommand name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Name followed by the aliases
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn signature(&self) -> &Signature {
        self.callable.signature()
    }

    pub fn specs(&self) -> &[ArgSpec] {
        &self.specs
    }

    /// Subcommand carrying the derived arguments
    pub fn subcommand(&self) -> Command {
        let mut command = Command::new(self.name.clone()).visible_aliases(self.aliases.clone());
        if let Some(doc) = &self.signature().doc {
            command = command.about(doc.clone());
        }
        SignatureMapper::apply(command, &self.specs)
    }

    /// Rebuild the call from `matches` and run the callable
    pub fn invoke(&self, matches: &ArgMatches) -> std::result::Result<R, DispatchError> {
        let args = SignatureMapper::reconstruct(self.signature(), &self.specs, matches)?;
        tracing::trace!(command = %self.name, ?args, "invoking callable");
        Ok(self.callable.call(args))
    }
}
