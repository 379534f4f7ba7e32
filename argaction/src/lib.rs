//! # argaction
//!
//! Expose ordinary functions as `clap` subcommands. A callable is described by
//! a [`Signature`]; the mapper derives its command-line arguments from that
//! description and rebuilds the call from the parsed matches.
//!
//! ## Modules
//!
//! - [`signature`] - Declarative parameter lists
//! - [`value`] - Values passed from the command line to callables
//! - [`spec`] - Argument specifications and overrides
//! - [`mapper`] - Signature to specs, and matches back to call arguments
//! - [`registry`] - The [`Action`] subcommand registry
//! - [`expose`] - Single callable on a command without subcommands
//! - [`error`] - Registration and dispatch errors
//!
//! ## Conventions
//!
//! - A parameter without a default is a required positional argument.
//! - A `Bool` default becomes a flag that negates the default.
//! - A `List` default becomes a repeatable option.
//! - Any other default becomes an option: `-x` for one-character names,
//!   `--long-name` otherwise, with `_` replaced by `-`.
//! - The variadic parameter takes zero or more trailing values.
//!
//! ```rust
//! use argaction::{Action, ArgOverride, CallArgs, Callable, Parameter, Registration, Signature, SpecAction};
//! use clap::Command;
//!
//! let mut action = Action::new(Command::new("demo"));
//! action
//!     .register(
//!         Registration::new(Callable::new(
//!             Signature::new("repeat")
//!                 .doc("repeat the word")
//!                 .param(Parameter::positional("word"))
//!                 .param(Parameter::positional("n").with_default(0)),
//!             |args: CallArgs| -> anyhow::Result<String> {
//!                 Ok(args.str(0)?.repeat(args.int(1)? as usize))
//!             },
//!         ))
//!         .override_arg("n", ArgOverride::new().action(SpecAction::Count)),
//!     )
//!     .unwrap();
//!
//! let output = action.try_run_from(["demo", "repeat", "ab", "-nnn"]).unwrap();
//! assert_eq!(output.unwrap(), "ababab");
//! ```

pub mod call;
pub mod entry;
pub mod error;
pub mod expose;
pub mod mapper;
pub mod registry;
pub mod signature;
pub mod spec;
pub mod value;

pub use call::{ArgKey, CallArgs, Callable, Handler};
pub use entry::CommandEntry;
pub use error::{
    ActionError, CallArgsError, DispatchError, ErrorSeverity, RegistrationError, Result, Severity,
};
pub use expose::Exposed;
pub use mapper::{cli_tokens, to_cli_name, ClaimedNames, SignatureMapper};
pub use registry::{Action, Registration};
pub use signature::{Annotation, ElementType, ParamKind, Parameter, Signature};
pub use spec::{ArgOverride, ArgSpec, Overrides, SpecAction};
pub use value::{ArgValue, ArgValueParser, CustomParseFn, CustomType, EnumMember, EnumTable, ValueType};
