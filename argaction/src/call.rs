//! Call arguments and the callables that receive them

use crate::error::CallArgsError;
use crate::signature::Signature;
use crate::value::ArgValue;
use clap::ValueEnum;
use indexmap::IndexMap;
use std::fmt;
use std::path::Path;

/// Arguments rebuilt from the command line
///
/// `positional` holds the positional parameters in declaration order followed
/// by the variadic values. `keyword` holds keyword-only parameters in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    pub positional: Vec<ArgValue>,
    pub keyword: IndexMap<String, ArgValue>,
}

/// Position or keyword naming one argument
pub trait ArgKey {
    fn lookup<'a>(&self, args: &'a CallArgs) -> Option<&'a ArgValue>;

    fn describe(&self) -> String;
}

impl ArgKey for usize {
    fn lookup<'a>(&self, args: &'a CallArgs) -> Option<&'a ArgValue> {
        args.positional.get(*self)
    }

    fn describe(&self) -> String {
        format!("#{self}")
    }
}

impl ArgKey for &str {
    fn lookup<'a>(&self, args: &'a CallArgs) -> Option<&'a ArgValue> {
        args.keyword.get(*self)
    }

    fn describe(&self) -> String {
        format!("'{self}'")
    }
}

impl CallArgs {
    pub fn new(positional: Vec<ArgValue>, keyword: IndexMap<String, ArgValue>) -> Self {
        Self {
            positional,
            keyword,
        }
    }

    pub fn get<K: ArgKey>(&self, key: K) -> Result<&ArgValue, CallArgsError> {
        self.fetch(&key)
    }

    fn fetch<K: ArgKey>(&self, key: &K) -> Result<&ArgValue, CallArgsError> {
        key.lookup(self)
            .ok_or_else(|| CallArgsError::Missing(key.describe()))
    }

    fn typed<'a, K, T>(
        &'a self,
        key: &K,
        expected: &'static str,
        extract: impl FnOnce(&'a ArgValue) -> Option<T>,
    ) -> Result<T, CallArgsError>
    where
        K: ArgKey,
    {
        let value = self.fetch(key)?;
        extract(value).ok_or_else(|| CallArgsError::WrongType {
            key: key.describe(),
            expected,
            found: value.kind(),
        })
    }

    pub fn str<K: ArgKey>(&self, key: K) -> Result<&str, CallArgsError> {
        self.typed(&key, "a string", ArgValue::as_str)
    }

    pub fn int<K: ArgKey>(&self, key: K) -> Result<i64, CallArgsError> {
        self.typed(&key, "an integer", ArgValue::as_int)
    }

    pub fn float<K: ArgKey>(&self, key: K) -> Result<f64, CallArgsError> {
        self.typed(&key, "a float", ArgValue::as_float)
    }

    pub fn bool<K: ArgKey>(&self, key: K) -> Result<bool, CallArgsError> {
        self.typed(&key, "a bool", ArgValue::as_bool)
    }

    pub fn path<K: ArgKey>(&self, key: K) -> Result<&Path, CallArgsError> {
        self.typed(&key, "a path", ArgValue::as_path)
    }

    pub fn list<K: ArgKey>(&self, key: K) -> Result<&[ArgValue], CallArgsError> {
        self.typed(&key, "a list", ArgValue::as_list)
    }

    /// Enum member converted into the `ValueEnum` type it names
    pub fn member<E: ValueEnum, K: ArgKey>(&self, key: K) -> Result<E, CallArgsError> {
        let member = self.typed(&key, "an enum member", ArgValue::as_enum)?;
        member
            .to_enum()
            .map_err(|message| CallArgsError::EnumConversion {
                key: key.describe(),
                message,
            })
    }

    /// Positional values from index `from` on; empty when out of range
    pub fn rest(&self, from: usize) -> &[ArgValue] {
        self.positional.get(from..).unwrap_or_default()
    }
}

/// Boxed handler invoked with the rebuilt arguments
pub type Handler<R> = Box<dyn Fn(CallArgs) -> R + Send + Sync>;

/// A signature paired with the function it describes
pub struct Callable<R> {
    signature: Signature,
    handler: Handler<R>,
}

impl<R> Callable<R> {
    pub fn new<F>(signature: Signature, handler: F) -> Self
    where
        F: Fn(CallArgs) -> R + Send + Sync + 'static,
    {
        Self {
            signature,
            handler: Box::new(handler),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Invoke the handler; its result is returned unchanged
    pub fn call(&self, args: CallArgs) -> R {
        (self.handler)(args)
    }
}

impl<R> fmt::Debug for Callable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
