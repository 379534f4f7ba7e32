//! Values carried from the command line to a callable
//!
//! Every value-taking argument is parsed by [`ArgValueParser`], so the matches
//! always hold [`ArgValue`]s regardless of the declared [`ValueType`].

use clap::builder::{PossibleValue, TypedValueParser};
use clap::error::ErrorKind;
use clap::{Arg, Command, ValueEnum};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// A parsed command-line value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Path(PathBuf),
    Enum(EnumMember),
    List(Vec<ArgValue>),
}

impl ArgValue {
    /// Build a list value from anything convertible to `ArgValue`
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ArgValue>,
    {
        ArgValue::List(items.into_iter().map(Into::into).collect())
    }

    /// An empty list, the default of every sequence option
    pub fn empty_list() -> Self {
        ArgValue::List(Vec::new())
    }

    /// Member value for a `clap::ValueEnum` variant
    ///
    /// Returns `None` for skipped variants that have no possible value.
    pub fn from_enum<E: ValueEnum>(variant: &E) -> Option<Self> {
        let table = EnumTable::of::<E>();
        let name = variant.to_possible_value()?.get_name().to_string();
        table.member(&name).map(ArgValue::Enum)
    }

    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            ArgValue::Str(_) => "a string",
            ArgValue::Int(_) => "an integer",
            ArgValue::Float(_) => "a float",
            ArgValue::Bool(_) => "a bool",
            ArgValue::Path(_) => "a path",
            ArgValue::Enum(_) => "an enum member",
            ArgValue::List(_) => "a list",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ArgValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Float value; integers widen
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ArgValue::Float(value) => Some(*value),
            ArgValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            ArgValue::Path(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumMember> {
        match self {
            ArgValue::Enum(member) => Some(member),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ArgValue]> {
        match self {
            ArgValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Convert an enum member into the Rust enum it was declared from
    pub fn to_enum<E: ValueEnum>(&self) -> Result<E, String> {
        match self {
            ArgValue::Enum(member) => member.to_enum(),
            other => Err(format!("expected an enum member, found {}", other.kind())),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Str(value) => f.write_str(value),
            ArgValue::Int(value) => write!(f, "{value}"),
            ArgValue::Float(value) => write!(f, "{value}"),
            ArgValue::Bool(value) => write!(f, "{value}"),
            ArgValue::Path(value) => write!(f, "{}", value.display()),
            ArgValue::Enum(member) => f.write_str(&member.name),
            ArgValue::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Str(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        ArgValue::Int(i64::from(value))
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<PathBuf> for ArgValue {
    fn from(value: PathBuf) -> Self {
        ArgValue::Path(value)
    }
}

impl From<EnumMember> for ArgValue {
    fn from(value: EnumMember) -> Self {
        ArgValue::Enum(value)
    }
}

impl From<Vec<ArgValue>> for ArgValue {
    fn from(value: Vec<ArgValue>) -> Self {
        ArgValue::List(value)
    }
}

/// One member of an [`EnumTable`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumMember {
    /// Name of the table the member belongs to
    pub enum_name: String,
    /// Member name as written on the command line
    pub name: String,
    /// Declaration order within the table
    pub ordinal: usize,
}

impl EnumMember {
    /// Convert into the `clap::ValueEnum` type with the same member names
    pub fn to_enum<E: ValueEnum>(&self) -> Result<E, String> {
        E::from_str(&self.name, false)
    }
}

impl fmt::Display for EnumMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.enum_name, self.name)
    }
}

/// Explicit enumeration-to-string table for an enum-typed parameter
///
/// The member names double as the allowed choices on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTable {
    name: String,
    members: Vec<String>,
}

impl EnumTable {
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Table built from a `clap::ValueEnum` type
    ///
    /// Skipped variants are left out; the table is named after the type.
    pub fn of<E: ValueEnum>() -> Self {
        let members = E::value_variants()
            .iter()
            .filter_map(ValueEnum::to_possible_value)
            .map(|value| value.get_name().to_string());

        Self::new(short_type_name::<E>(), members)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn names(&self) -> &[String] {
        &self.members
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|member| member == name)
    }

    /// Look a member up by name
    pub fn member(&self, name: &str) -> Option<EnumMember> {
        self.members
            .iter()
            .position(|member| member == name)
            .map(|ordinal| EnumMember {
                enum_name: self.name.clone(),
                name: name.to_string(),
                ordinal,
            })
    }
}

fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full).to_string()
}

/// Parser function behind [`ValueType::Custom`]
pub type CustomParseFn = fn(&str) -> Result<ArgValue, String>;

/// A named user-supplied coercion
#[derive(Clone, Copy)]
pub struct CustomType {
    name: &'static str,
    parse: CustomParseFn,
}

impl CustomType {
    pub const fn new(name: &'static str, parse: CustomParseFn) -> Self {
        Self { name, parse }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parse(&self, raw: &str) -> Result<ArgValue, String> {
        (self.parse)(raw)
    }
}

impl fmt::Debug for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomType").field(&self.name).finish()
    }
}

// Custom types are identified by name.
impl PartialEq for CustomType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Coercion applied to each raw command-line token
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ValueType {
    #[default]
    String,
    Integer,
    Float,
    Bool,
    Path,
    Custom(CustomType),
}

impl ValueType {
    /// The coercion that round-trips a default value of this shape
    pub fn of_value(value: &ArgValue) -> Self {
        match value {
            ArgValue::Int(_) => ValueType::Integer,
            ArgValue::Float(_) => ValueType::Float,
            ArgValue::Bool(_) => ValueType::Bool,
            ArgValue::Path(_) => ValueType::Path,
            ArgValue::Str(_) | ArgValue::Enum(_) | ArgValue::List(_) => ValueType::String,
        }
    }

    /// Name shown in error messages
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::Path => "path",
            ValueType::Custom(custom) => custom.name(),
        }
    }

    /// Whether a token such as `-5` is a value rather than a flag
    pub fn accepts_negative_numbers(&self) -> bool {
        matches!(
            self,
            ValueType::Integer | ValueType::Float | ValueType::Custom(_)
        )
    }

    /// Coerce one raw token
    pub fn parse(&self, raw: &str) -> Result<ArgValue, String> {
        match self {
            ValueType::String => Ok(ArgValue::Str(raw.to_string())),
            ValueType::Integer => raw
                .parse::<i64>()
                .map(ArgValue::Int)
                .map_err(|e| e.to_string()),
            ValueType::Float => raw
                .parse::<f64>()
                .map(ArgValue::Float)
                .map_err(|e| e.to_string()),
            ValueType::Bool => parse_bool(raw).map(ArgValue::Bool),
            ValueType::Path => Ok(ArgValue::Path(PathBuf::from(raw))),
            ValueType::Custom(custom) => custom.parse(raw),
        }
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Ok(true),
        "false" | "no" | "n" | "off" | "0" => Ok(false),
        _ => Err(format!("'{raw}' is not a boolean")),
    }
}

/// clap value parser producing [`ArgValue`]s
///
/// When `choices` is set, the raw token must be one of them before the
/// coercion runs.
#[derive(Debug, Clone)]
pub struct ArgValueParser {
    value_type: ValueType,
    choices: Option<Vec<String>>,
}

impl ArgValueParser {
    pub fn new(value_type: ValueType, choices: Option<Vec<String>>) -> Self {
        Self {
            value_type,
            choices,
        }
    }
}

impl TypedValueParser for ArgValueParser {
    type Value = ArgValue;

    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let Some(raw) = value.to_str() else {
            return Err(clap::Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd));
        };
        let arg_name = arg
            .map(ToString::to_string)
            .unwrap_or_else(|| "...".to_string());

        if let Some(choices) = &self.choices {
            if !choices.iter().any(|choice| choice == raw) {
                let message = format!(
                    "invalid value '{raw}' for '{arg_name}'\n  [possible values: {}]\n",
                    choices.join(", ")
                );
                return Err(clap::Error::raw(ErrorKind::InvalidValue, message).with_cmd(cmd));
            }
        }

        self.value_type.parse(raw).map_err(|reason| {
            let message = format!(
                "invalid {} value '{raw}' for '{arg_name}': {reason}\n",
                self.value_type.name()
            );
            clap::Error::raw(ErrorKind::ValueValidation, message).with_cmd(cmd)
        })
    }

    fn possible_values(&self) -> Option<Box<dyn Iterator<Item = PossibleValue> + '_>> {
        self.choices.as_ref().map(|choices| {
            Box::new(choices.iter().map(|choice| PossibleValue::new(choice.clone())))
                as Box<dyn Iterator<Item = PossibleValue> + '_>
        })
    }
}
