//! Command-line argument specifications
//!
//! An [`ArgSpec`] is the mapper's output for one parameter. It is plain data
//! so it can be inspected, overridden with an [`ArgOverride`] and rendered as
//! a `clap::Arg` at the end.

use crate::value::{ArgValue, ArgValueParser, ValueType};
use clap::{Arg, ArgAction};
use indexmap::IndexMap;

/// Per-parameter overrides, keyed by the parameter's original name
pub type Overrides = IndexMap<String, ArgOverride>;

/// What the parser does with an argument's occurrences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecAction {
    /// Store one value
    Set,
    /// Flag storing `true`
    SetTrue,
    /// Flag storing `false`
    SetFalse,
    /// Accumulate every value
    Append,
    /// Count occurrences
    Count,
}

impl SpecAction {
    /// Whether the action consumes values from the command line
    pub fn takes_values(self) -> bool {
        matches!(self, SpecAction::Set | SpecAction::Append)
    }

    fn to_clap(self) -> ArgAction {
        match self {
            SpecAction::Set => ArgAction::Set,
            SpecAction::SetTrue => ArgAction::SetTrue,
            SpecAction::SetFalse => ArgAction::SetFalse,
            SpecAction::Append => ArgAction::Append,
            SpecAction::Count => ArgAction::Count,
        }
    }
}

/// Parser configuration for one parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ArgSpec {
    /// Key the parsed value is stored under
    pub id: String,
    /// Name of the parameter this spec was derived from
    pub parameter: String,
    pub positional: bool,
    pub long: Option<String>,
    pub short: Option<char>,
    pub value_type: ValueType,
    pub choices: Option<Vec<String>>,
    /// Value used when the argument is absent
    pub default: Option<ArgValue>,
    pub action: SpecAction,
    /// Positional or option that accepts several values
    pub multiple: bool,
    pub required: bool,
    pub help: Option<String>,
    pub value_name: Option<String>,
}

impl ArgSpec {
    /// Required positional argument
    pub fn positional(id: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parameter: parameter.into(),
            positional: true,
            long: None,
            short: None,
            value_type: ValueType::String,
            choices: None,
            default: None,
            action: SpecAction::Set,
            multiple: false,
            required: true,
            help: None,
            value_name: None,
        }
    }

    /// Optional argument reached through `long` or `short`
    pub fn option(
        id: impl Into<String>,
        parameter: impl Into<String>,
        long: Option<String>,
        short: Option<char>,
    ) -> Self {
        Self {
            positional: false,
            long,
            short,
            required: false,
            ..Self::positional(id, parameter)
        }
    }

    /// Merge an override over the derived fields; a set field wins
    pub fn merge(&mut self, overrides: &ArgOverride) {
        if let Some(help) = &overrides.help {
            self.help = Some(help.clone());
        }
        if let Some(value_name) = &overrides.value_name {
            self.value_name = Some(value_name.clone());
        }
        if let Some(value_type) = overrides.value_type {
            self.value_type = value_type;
        }
        if let Some(choices) = &overrides.choices {
            self.choices = Some(choices.clone());
        }
        if let Some(default) = &overrides.default {
            self.default = Some(default.clone());
        }
        if let Some(required) = overrides.required {
            self.required = required;
        }
        if overrides.long.is_some() || overrides.short.is_some() {
            self.positional = false;
            if let Some(long) = &overrides.long {
                self.long = Some(long.clone());
            }
            if let Some(short) = overrides.short {
                self.short = Some(short);
            }
            if overrides.required.is_none() {
                self.required = false;
            }
        }
        if let Some(action) = overrides.action {
            self.action = action;
            self.multiple = action == SpecAction::Append;
        }

        // Positionals always consume values, so a flag action turns the
        // argument into an option named after the parameter.
        if self.positional && !self.action.takes_values() {
            self.positional = false;
            self.required = false;
            if self.parameter.chars().count() == 1 {
                self.short = self.parameter.chars().next();
            } else {
                self.long = Some(crate::mapper::to_cli_name(&self.parameter));
            }
        }
    }

    /// Render as a clap argument
    ///
    /// Defaults are not registered with clap; they are applied when the
    /// matches are turned back into call arguments.
    pub fn to_clap_arg(&self) -> Arg {
        let mut arg = Arg::new(self.id.clone()).action(self.action.to_clap());

        if !self.positional {
            if let Some(long) = &self.long {
                arg = arg.long(long.clone());
            }
            if let Some(short) = self.short {
                arg = arg.short(short);
            }
        }

        if self.action.takes_values() {
            arg = arg.value_parser(ArgValueParser::new(self.value_type, self.choices.clone()));
            if self.value_type.accepts_negative_numbers() {
                arg = arg.allow_negative_numbers(true);
            }
            if self.positional && self.multiple {
                arg = arg.num_args(0..);
            } else {
                arg = arg.num_args(1);
            }
        }

        if let Some(value_name) = &self.value_name {
            arg = arg.value_name(value_name.clone());
        }
        if let Some(help) = &self.help {
            arg = arg.help(help.clone());
        }

        arg.required(self.required)
    }
}

/// Structured override for one parameter's derived spec
///
/// Every field is optional. Setting `long` or `short` on a parameter that
/// would otherwise be positional turns it into an option.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgOverride {
    pub help: Option<String>,
    pub short: Option<char>,
    pub long: Option<String>,
    pub value_name: Option<String>,
    pub action: Option<SpecAction>,
    pub value_type: Option<ValueType>,
    pub choices: Option<Vec<String>>,
    pub default: Option<ArgValue>,
    pub required: Option<bool>,
}

impl ArgOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    pub fn value_name(mut self, value_name: impl Into<String>) -> Self {
        self.value_name = Some(value_name.into());
        self
    }

    pub fn action(mut self, action: SpecAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn default_value(mut self, default: impl Into<ArgValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }
}
