//! Error types for argaction
//!
//! Registration problems are programming errors in how a command was declared
//! and are returned straight from [`Action::register`](crate::Action::register).
//! Dispatch problems come from matches that do not fit the registered
//! commands. Parse failures stay `clap::Error`s so they render as usage
//! messages.

use thiserror::Error;

/// Severity levels for error classification
///
/// - **Warning**: Potential issue but operation can proceed.
/// - **Error**: Operation failed but the program can continue.
/// - **Critical**: The command table is unusable and must be fixed in code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Potential issue but operation can proceed
    Warning,

    /// Operation failed but the program can continue
    Error,

    /// Declaration error, requires a code change
    Critical,
}

/// Trait for error types that have severity levels
///
/// # Example
///
/// ```rust
/// use argaction::{ErrorSeverity, RegistrationError, Severity};
///
/// let error = RegistrationError::MultipleVariadic {
///     command: "spam".to_string(),
/// };
/// assert_eq!(error.severity(), ErrorSeverity::Critical);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}

/// Errors raised while declaring a signature or registering a command
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// A subcommand name or alias is already taken
    #[error("Command name '{name}' is already registered by '{owner}'")]
    NameConflict {
        /// The conflicting name or alias
        name: String,
        /// Canonical name of the command that already owns it
        owner: String,
    },

    /// An override names a parameter the signature does not declare
    #[error("Command '{command}' has no parameter '{parameter}' to override")]
    UnknownParameter {
        /// Command the override was given for
        command: String,
        /// Parameter name used in the override
        parameter: String,
    },

    /// The same parameter name appears twice in a signature
    #[error("Command '{command}' declares parameter '{parameter}' more than once")]
    DuplicateParameter {
        /// Command being declared
        command: String,
        /// Repeated parameter name
        parameter: String,
    },

    /// More than one variadic parameter
    #[error("Command '{command}' declares more than one variadic parameter")]
    MultipleVariadic {
        /// Command being declared
        command: String,
    },

    /// A positional parameter follows the variadic parameter
    #[error("Command '{command}': positional parameter '{parameter}' follows the variadic parameter")]
    PositionalAfterVariadic {
        /// Command being declared
        command: String,
        /// Offending parameter
        parameter: String,
    },

    /// A positional parameter follows a keyword-only parameter
    #[error("Command '{command}': positional parameter '{parameter}' follows a keyword-only parameter")]
    PositionalAfterKeywordOnly {
        /// Command being declared
        command: String,
        /// Offending parameter
        parameter: String,
    },

    /// An enum-annotated parameter defaults to something outside its table
    #[error("Parameter '{parameter}' defaults to '{value}', which is not a member of {enum_name}")]
    InvalidEnumDefault {
        /// Offending parameter
        parameter: String,
        /// Name of the enum table
        enum_name: String,
        /// Rendered default value
        value: String,
    },

    /// A sequence annotation or default is used where it has no meaning
    #[error("Parameter '{parameter}': {reason}")]
    InvalidSequence {
        /// Offending parameter
        parameter: String,
        /// What is wrong with it
        reason: String,
    },

    /// Two arguments of one command share an id, long name or short name
    #[error("Command '{command}': parameter '{parameter}' uses '{token}', which is already taken")]
    ArgumentConflict {
        /// Command being declared
        command: String,
        /// Parameter whose argument clashes
        parameter: String,
        /// The clashing id, `--long` or `-s`
        token: String,
    },
}

impl Severity for RegistrationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Critical
    }
}

/// Errors raised while turning parsed matches back into a call
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// No command is registered under this name or alias
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// The matches carry no subcommand
    #[error("No command given")]
    NoCommand,

    /// A value the signature needs was not present in the matches
    #[error("Missing value for '{id}'")]
    MissingValue {
        /// Argument id that had no value
        id: String,
    },

    /// The matches hold a value of a type the mapper did not produce
    #[error("Invalid value stored for '{id}': {message}")]
    InvalidMatches {
        /// Argument id that could not be read
        id: String,
        /// Underlying clap message
        message: String,
    },

    /// A stored token does not name a member of the parameter's enum
    #[error("'{token}' is not a member of {enum_name}")]
    UnknownMember {
        /// Enum table name
        enum_name: String,
        /// Token that failed to resolve
        token: String,
    },
}

impl Severity for DispatchError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }
}

/// Errors returned by the non-exiting entry points
#[derive(Debug, Error)]
pub enum ActionError {
    /// Command line did not parse; includes `--help` and `--version` requests
    #[error(transparent)]
    Parse(#[from] clap::Error),

    /// Command line parsed but could not be dispatched
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl ActionError {
    /// The clap error kind when this is a parse failure
    pub fn parse_kind(&self) -> Option<clap::error::ErrorKind> {
        match self {
            ActionError::Parse(error) => Some(error.kind()),
            ActionError::Dispatch(_) => None,
        }
    }
}

impl Severity for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::Parse(_) => ErrorSeverity::Error,
            ActionError::Dispatch(error) => error.severity(),
        }
    }
}

/// Errors raised by the typed accessors on [`CallArgs`](crate::CallArgs)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CallArgsError {
    /// No argument at this position or under this keyword
    #[error("No argument {0}")]
    Missing(String),

    /// The argument holds a different kind of value
    #[error("Argument {key} is {found}, expected {expected}")]
    WrongType {
        /// Position or keyword of the argument
        key: String,
        /// Requested kind
        expected: &'static str,
        /// Kind actually stored
        found: &'static str,
    },

    /// The enum member does not convert into the requested Rust enum
    #[error("Argument {key}: {message}")]
    EnumConversion {
        /// Position or keyword of the argument
        key: String,
        /// Message from the `ValueEnum` conversion
        message: String,
    },
}

/// Result type for registration
pub type Result<T> = std::result::Result<T, RegistrationError>;
