//! Signature to command-line mapping and back
//!
//! [`SignatureMapper::derive`] applies a fixed set of conventions to each
//! parameter:
//!
//! - no default: required positional
//! - `Bool` default: flag that stores the negated default
//! - `List` default: repeatable option accumulating values
//! - any other default: option, `-x` for one-character names, `--long-name`
//!   otherwise
//! - variadic: positional accepting zero or more values
//! - keyword-only without a default after the variadic: required option, since
//!   the variadic consumes every remaining positional token
//!
//! [`SignatureMapper::reconstruct`] walks the same parameters over the parsed
//! matches and rebuilds the call arguments.

use crate::call::CallArgs;
use crate::error::{DispatchError, RegistrationError, Result};
use crate::signature::{Annotation, ElementType, ParamKind, Parameter, Signature};
use crate::spec::{ArgSpec, Overrides, SpecAction};
use crate::value::{ArgValue, EnumTable, ValueType};
use clap::parser::MatchesError;
use clap::{ArgMatches, Command};
use std::collections::HashSet;

/// Replace every `_` with `-`
pub fn to_cli_name(name: &str) -> String {
    name.replace('_', "-")
}

/// Converts signatures into argument specs and parsed matches into calls
pub struct SignatureMapper;

impl SignatureMapper {
    /// Derive one spec per parameter and merge the overrides over them
    ///
    /// The signature is validated first. An override for a parameter the
    /// signature does not declare is rejected, and so are two arguments that
    /// end up with the same id, long name or short name, including the
    /// `-h`/`--help` flag every command carries.
    pub fn derive(signature: &Signature, overrides: &Overrides) -> Result<Vec<ArgSpec>> {
        signature.validate()?;

        if let Some(unknown) = overrides
            .keys()
            .find(|name| signature.parameter(name).is_none())
        {
            return Err(RegistrationError::UnknownParameter {
                command: signature.name.clone(),
                parameter: unknown.clone(),
            });
        }

        let mut specs = Vec::with_capacity(signature.params.len());
        let mut after_variadic = false;
        for param in &signature.params {
            let mut spec = derive_spec(param, after_variadic);
            if let Some(overrides) = overrides.get(&param.name) {
                spec.merge(overrides);
            }
            after_variadic |= param.is_variadic();
            specs.push(spec);
        }

        let mut claimed = ClaimedNames::with_help();
        for spec in &specs {
            claimed.claim(&signature.name, spec)?;
        }

        Ok(specs)
    }

    /// Add the specs to `command` as clap arguments
    pub fn apply(command: Command, specs: &[ArgSpec]) -> Command {
        specs
            .iter()
            .fold(command, |command, spec| command.arg(spec.to_clap_arg()))
    }

    /// Rebuild the call arguments from matches produced by `apply`'s command
    pub fn reconstruct(
        signature: &Signature,
        specs: &[ArgSpec],
        matches: &ArgMatches,
    ) -> std::result::Result<CallArgs, DispatchError> {
        let mut args = CallArgs::default();
        let mut rest = Vec::new();

        for param in &signature.params {
            let spec = specs
                .iter()
                .find(|spec| spec.parameter == param.name)
                .ok_or_else(|| DispatchError::MissingValue {
                    id: param.name.clone(),
                })?;
            let value = resolve_enum(param, read_value(spec, matches)?)?;

            match param.kind {
                ParamKind::Positional => args.positional.push(value),
                ParamKind::VarPositional => match value {
                    ArgValue::List(items) => rest = items,
                    single => rest = vec![single],
                },
                ParamKind::KeywordOnly => {
                    args.keyword.insert(param.name.clone(), value);
                }
            }
        }

        args.positional.extend(rest);
        Ok(args)
    }
}

/// Ids and option names in use on one command
#[derive(Debug, Default)]
pub struct ClaimedNames {
    ids: HashSet<String>,
    longs: HashSet<String>,
    shorts: HashSet<char>,
}

impl ClaimedNames {
    /// Only the help flag clap adds to every command
    pub fn with_help() -> Self {
        let mut claimed = Self::default();
        claimed.reserve("help", Some("help"), Some('h'));
        claimed
    }

    /// Names of the arguments already on `command`, with its built-in flags
    pub fn of_command(command: &Command) -> Self {
        let mut claimed = Self::default();
        if !command.is_disable_help_flag_set() {
            claimed.reserve("help", Some("help"), Some('h'));
        }
        if command.get_version().is_some() && !command.is_disable_version_flag_set() {
            claimed.reserve("version", Some("version"), Some('V'));
        }
        for arg in command.get_arguments() {
            claimed.reserve(arg.get_id().as_str(), arg.get_long(), arg.get_short());
        }
        claimed
    }

    fn reserve(&mut self, id: &str, long: Option<&str>, short: Option<char>) {
        self.ids.insert(id.to_string());
        self.longs.extend(long.map(str::to_string));
        self.shorts.extend(short);
    }

    /// Claim the id and option names of `spec`
    pub fn claim(&mut self, command: &str, spec: &ArgSpec) -> Result<()> {
        let conflict = |token: String| RegistrationError::ArgumentConflict {
            command: command.to_string(),
            parameter: spec.parameter.clone(),
            token,
        };

        if !self.ids.insert(spec.id.clone()) {
            return Err(conflict(spec.id.clone()));
        }
        if spec.positional {
            return Ok(());
        }
        if let Some(long) = &spec.long {
            if !self.longs.insert(long.clone()) {
                return Err(conflict(format!("--{long}")));
            }
        }
        if let Some(short) = spec.short {
            if !self.shorts.insert(short) {
                return Err(conflict(format!("-{short}")));
            }
        }
        Ok(())
    }
}

fn derive_spec(param: &Parameter, after_variadic: bool) -> ArgSpec {
    let cli_name = to_cli_name(&param.name);

    if param.kind == ParamKind::VarPositional {
        let (value_type, choices) = scalar_coercion(&param.annotation, None);
        return ArgSpec {
            action: SpecAction::Append,
            multiple: true,
            required: false,
            value_type,
            choices,
            help: param.help.clone(),
            ..ArgSpec::positional(cli_name.clone(), param.name.clone())
        };
    }

    let Some(default) = &param.default else {
        let (value_type, choices) = scalar_coercion(&param.annotation, None);
        if after_variadic {
            let (long, short) = option_names(&param.name);
            return ArgSpec {
                value_type,
                choices,
                required: true,
                help: param.help.clone(),
                value_name: Some(cli_name.to_uppercase()),
                ..ArgSpec::option(param.name.clone(), param.name.clone(), long, short)
            };
        }
        return ArgSpec {
            value_type,
            choices,
            help: param.help.clone(),
            ..ArgSpec::positional(cli_name.clone(), param.name.clone())
        };
    };

    let (long, short) = option_names(&param.name);
    let mut spec = ArgSpec::option(param.name.clone(), param.name.clone(), long, short);

    match default {
        ArgValue::Bool(value) => {
            spec.action = if *value {
                SpecAction::SetFalse
            } else {
                SpecAction::SetTrue
            };
            spec.default = Some(ArgValue::Bool(*value));
        }
        ArgValue::List(_) => {
            let (value_type, choices) = match &param.annotation {
                Annotation::Sequence(ElementType::Scalar(value_type)) => (*value_type, None),
                Annotation::Sequence(ElementType::Enum(table)) => {
                    (ValueType::String, Some(table.names().to_vec()))
                }
                _ => (ValueType::String, None),
            };
            spec.action = SpecAction::Append;
            spec.multiple = true;
            spec.value_type = value_type;
            spec.choices = choices;
            spec.default = Some(ArgValue::empty_list());
            spec.value_name = Some(cli_name.to_uppercase());
        }
        other => {
            let (value_type, choices) = scalar_coercion(&param.annotation, Some(other));
            spec.value_type = value_type;
            spec.choices = choices;
            spec.default = Some(match &param.annotation {
                Annotation::Enum(table) => enum_default(table, other),
                _ => other.clone(),
            });
            spec.value_name = Some(cli_name.to_uppercase());
        }
    }

    spec.help = Some(default_help(param.help.as_deref(), spec.default.as_ref()));
    spec
}

fn option_names(name: &str) -> (Option<String>, Option<char>) {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(short), None) => (None, Some(short)),
        _ => (Some(to_cli_name(name)), None),
    }
}

fn option_flag(name: &str) -> String {
    match option_names(name) {
        (_, Some(short)) => format!("-{short}"),
        (long, None) => format!("--{}", long.unwrap_or_default()),
    }
}

/// Coercion and choices for a single token
///
/// Without an annotation the coercion follows the default's own type.
fn scalar_coercion(
    annotation: &Annotation,
    default: Option<&ArgValue>,
) -> (ValueType, Option<Vec<String>>) {
    match annotation {
        Annotation::Scalar(value_type) => (*value_type, None),
        Annotation::Enum(table) => (ValueType::String, Some(table.names().to_vec())),
        Annotation::Sequence(ElementType::Scalar(value_type)) => (*value_type, None),
        Annotation::Sequence(ElementType::Enum(table)) => {
            (ValueType::String, Some(table.names().to_vec()))
        }
        Annotation::None => (default.map(ValueType::of_value).unwrap_or_default(), None),
    }
}

fn enum_default(table: &EnumTable, default: &ArgValue) -> ArgValue {
    match default {
        ArgValue::Str(name) => table
            .member(name)
            .map(ArgValue::Enum)
            .unwrap_or_else(|| default.clone()),
        other => other.clone(),
    }
}

fn default_help(help: Option<&str>, default: Option<&ArgValue>) -> String {
    let default = default.map(ToString::to_string).unwrap_or_default();
    match help {
        Some(help) => format!("{help} (default: {default})"),
        None => format!("default: {default}"),
    }
}

fn read_value(spec: &ArgSpec, matches: &ArgMatches) -> std::result::Result<ArgValue, DispatchError> {
    let invalid = |error: MatchesError| DispatchError::InvalidMatches {
        id: spec.id.clone(),
        message: error.to_string(),
    };
    let missing = || DispatchError::MissingValue { id: spec.id.clone() };

    match spec.action {
        SpecAction::Set => matches
            .try_get_one::<ArgValue>(&spec.id)
            .map_err(invalid)?
            .cloned()
            .or_else(|| spec.default.clone())
            .ok_or_else(missing),
        SpecAction::SetTrue | SpecAction::SetFalse => matches
            .try_get_one::<bool>(&spec.id)
            .map_err(invalid)?
            .map(|flag| ArgValue::Bool(*flag))
            .or_else(|| spec.default.clone())
            .ok_or_else(missing),
        SpecAction::Count => {
            let base = spec
                .default
                .as_ref()
                .and_then(ArgValue::as_int)
                .unwrap_or(0);
            let count = matches
                .try_get_one::<u8>(&spec.id)
                .map_err(invalid)?
                .copied()
                .unwrap_or(0);
            Ok(ArgValue::Int(base + i64::from(count)))
        }
        SpecAction::Append => match matches.try_get_many::<ArgValue>(&spec.id).map_err(invalid)? {
            Some(values) => Ok(ArgValue::List(values.cloned().collect())),
            None => Ok(spec.default.clone().unwrap_or_else(ArgValue::empty_list)),
        },
    }
}

fn resolve_enum(param: &Parameter, value: ArgValue) -> std::result::Result<ArgValue, DispatchError> {
    let Some(table) = param.annotation.enum_table() else {
        return Ok(value);
    };

    match value {
        ArgValue::List(items) => items
            .into_iter()
            .map(|item| resolve_member(table, item))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(ArgValue::List),
        single => resolve_member(table, single),
    }
}

fn resolve_member(table: &EnumTable, value: ArgValue) -> std::result::Result<ArgValue, DispatchError> {
    let unknown = |token: String| DispatchError::UnknownMember {
        enum_name: table.name().to_string(),
        token,
    };

    match value {
        ArgValue::Enum(member) => Ok(ArgValue::Enum(member)),
        ArgValue::Str(name) => table
            .member(&name)
            .map(ArgValue::Enum)
            .ok_or_else(|| unknown(name)),
        other => Err(unknown(other.to_string())),
    }
}

/// Tokens that make the derived command line reproduce `args`
///
/// Positional values come first, then the variadic tail, then one option per
/// keyword or defaulted parameter whose value differs from its default.
pub fn cli_tokens(signature: &Signature, args: &CallArgs) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut options = Vec::new();
    let mut index = 0;
    let mut after_variadic = false;

    for param in &signature.params {
        let value = match param.kind {
            ParamKind::VarPositional => {
                let tail = args.positional.get(index..).unwrap_or_default();
                tokens.extend(tail.iter().map(ToString::to_string));
                index = args.positional.len();
                after_variadic = true;
                continue;
            }
            ParamKind::Positional => {
                let value = args.positional.get(index).cloned();
                index += 1;
                value
            }
            ParamKind::KeywordOnly => args.keyword.get(&param.name).cloned(),
        };
        let Some(value) = value else { continue };

        let flag = option_flag(&param.name);
        let Some(default) = &param.default else {
            if after_variadic {
                options.push(flag);
                options.push(value.to_string());
            } else {
                tokens.push(value.to_string());
            }
            continue;
        };

        match (default, &value) {
            (ArgValue::Bool(default), ArgValue::Bool(value)) if default != value => {
                options.push(flag);
            }
            (ArgValue::Bool(_), _) => {}
            (_, ArgValue::List(items)) => {
                for item in items {
                    options.push(flag.clone());
                    options.push(item.to_string());
                }
            }
            _ => {
                options.push(flag);
                options.push(value.to_string());
            }
        }
    }

    tokens.extend(options);
    tokens
}
