//! Declarative description of a callable's parameters
//!
//! A [`Signature`] is the input to the mapper. It lists parameters in
//! declaration order with their kind, default and annotation, which is all the
//! mapper needs to derive a command line for the callable.

use crate::error::{RegistrationError, Result};
use crate::value::{ArgValue, EnumTable, ValueType};
use std::collections::HashSet;

/// How a parameter receives its value in a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Passed by position
    Positional,
    /// Collects every remaining positional value
    VarPositional,
    /// Passed by name only
    KeywordOnly,
}

/// Element type of a sequence annotation
#[derive(Debug, Clone, PartialEq)]
pub enum ElementType {
    Scalar(ValueType),
    Enum(EnumTable),
}

/// Declared type of a parameter
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Annotation {
    /// No annotation; tokens stay strings unless the default says otherwise
    #[default]
    None,
    Scalar(ValueType),
    Enum(EnumTable),
    Sequence(ElementType),
}

impl Annotation {
    /// Enum table behind the annotation, scalar or element
    pub fn enum_table(&self) -> Option<&EnumTable> {
        match self {
            Annotation::Enum(table) | Annotation::Sequence(ElementType::Enum(table)) => {
                Some(table)
            }
            _ => None,
        }
    }
}

/// One parameter of a callable
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub kind: ParamKind,
    /// `None` marks a parameter without a default
    pub default: Option<ArgValue>,
    pub annotation: Annotation,
    pub help: Option<String>,
}

impl Parameter {
    fn with_kind(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            annotation: Annotation::None,
            help: None,
        }
    }

    pub fn positional(name: impl Into<String>) -> Self {
        Self::with_kind(name, ParamKind::Positional)
    }

    pub fn variadic(name: impl Into<String>) -> Self {
        Self::with_kind(name, ParamKind::VarPositional)
    }

    pub fn keyword_only(name: impl Into<String>) -> Self {
        Self::with_kind(name, ParamKind::KeywordOnly)
    }

    pub fn with_default(mut self, default: impl Into<ArgValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn typed(mut self, value_type: ValueType) -> Self {
        self.annotation = Annotation::Scalar(value_type);
        self
    }

    pub fn enumerated(mut self, table: EnumTable) -> Self {
        self.annotation = Annotation::Enum(table);
        self
    }

    pub fn sequence_of(mut self, element: ElementType) -> Self {
        self.annotation = Annotation::Sequence(element);
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn is_variadic(&self) -> bool {
        self.kind == ParamKind::VarPositional
    }

    pub fn is_keyword_only(&self) -> bool {
        self.kind == ParamKind::KeywordOnly
    }
}

/// Ordered parameter list of a named callable
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub name: String,
    pub doc: Option<String>,
    pub params: Vec<Parameter>,
}

impl Signature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            params: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    /// Subcommand name: the callable's name with `_` replaced by `-`
    pub fn command_name(&self) -> String {
        crate::mapper::to_cli_name(&self.name)
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|param| param.name == name)
    }

    pub fn variadic(&self) -> Option<&Parameter> {
        self.params.iter().find(|param| param.is_variadic())
    }

    /// Check that the parameter list describes a callable that can be mapped
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut after_variadic = false;
        let mut after_keyword = false;

        for param in &self.params {
            if !seen.insert(param.name.as_str()) {
                return Err(RegistrationError::DuplicateParameter {
                    command: self.name.clone(),
                    parameter: param.name.clone(),
                });
            }

            match param.kind {
                ParamKind::Positional if after_variadic => {
                    return Err(RegistrationError::PositionalAfterVariadic {
                        command: self.name.clone(),
                        parameter: param.name.clone(),
                    });
                }
                ParamKind::Positional if after_keyword => {
                    return Err(RegistrationError::PositionalAfterKeywordOnly {
                        command: self.name.clone(),
                        parameter: param.name.clone(),
                    });
                }
                ParamKind::Positional => {}
                ParamKind::VarPositional if after_variadic => {
                    return Err(RegistrationError::MultipleVariadic {
                        command: self.name.clone(),
                    });
                }
                ParamKind::VarPositional => after_variadic = true,
                ParamKind::KeywordOnly => after_keyword = true,
            }

            validate_default(param)?;
        }

        Ok(())
    }
}

fn validate_default(param: &Parameter) -> Result<()> {
    let sequence_error = |reason: &str| RegistrationError::InvalidSequence {
        parameter: param.name.clone(),
        reason: reason.to_string(),
    };

    if param.is_variadic() {
        if param.default.is_some() {
            return Err(sequence_error("a variadic parameter cannot have a default"));
        }
        if matches!(param.annotation, Annotation::Sequence(_)) {
            return Err(sequence_error(
                "a variadic parameter is annotated with its element type",
            ));
        }
        return Ok(());
    }

    match (&param.annotation, &param.default) {
        (Annotation::Sequence(_), Some(ArgValue::List(_))) => Ok(()),
        (Annotation::Sequence(_), _) => Err(sequence_error(
            "a sequence annotation needs a list default",
        )),
        (Annotation::Enum(_), Some(ArgValue::List(_))) => Err(sequence_error(
            "a list default needs a sequence annotation, not an enum",
        )),
        (Annotation::Enum(table), Some(default)) => {
            let is_member = match default {
                ArgValue::Enum(member) => {
                    member.enum_name == table.name() && table.contains(&member.name)
                }
                ArgValue::Str(name) => table.contains(name),
                _ => false,
            };
            if is_member {
                Ok(())
            } else {
                Err(RegistrationError::InvalidEnumDefault {
                    parameter: param.name.clone(),
                    enum_name: table.name().to_string(),
                    value: default.to_string(),
                })
            }
        }
        _ => Ok(()),
    }
}
