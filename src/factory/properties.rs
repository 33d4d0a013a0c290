//! Typed access to a map object's property bag.
//!
//! A value present in the map always wins over the recipe default passed to
//! the `*_or` accessors; the default is only used when the key is absent.
//! Present values of the wrong kind are errors rather than silently
//! replaced.

use hashbrown::HashMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;

/// Key-value overrides attached to a map object.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct MapProperties(HashMap<String, Value>);

impl MapProperties {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces `key`, returning the bag for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Reads a number, or `default` when absent.
    ///
    /// # Errors
    /// [`ConfigError::PropertyType`] when the value is not a number.
    pub fn float_or(&self, key: &str, default: f32) -> Result<f32, ConfigError> {
        self.0.get(key).map_or(Ok(default), |value| as_float(key, value))
    }

    /// Reads an integer, or `default` when absent.
    ///
    /// # Errors
    /// [`ConfigError::PropertyType`] when the value is not an integer.
    pub fn int_or(&self, key: &str, default: i32) -> Result<i32, ConfigError> {
        self.0.get(key).map_or(Ok(default), |value| as_int(key, value))
    }

    /// Reads a string, or `default` when absent.
    ///
    /// # Errors
    /// [`ConfigError::PropertyType`] when the value is not a string.
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> Result<&'a str, ConfigError> {
        self.0.get(key).map_or(Ok(default), |value| {
            value.as_str().ok_or_else(|| mismatch(key, "a string"))
        })
    }

    /// Reads a boolean, or `default` when absent.
    ///
    /// # Errors
    /// [`ConfigError::PropertyType`] when the value is not a boolean.
    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        self.0.get(key).map_or(Ok(default), |value| {
            value.as_bool().ok_or_else(|| mismatch(key, "a boolean"))
        })
    }

    /// Reads an integer the recipe cannot default.
    ///
    /// # Errors
    /// [`ConfigError::MissingProperty`] when absent and
    /// [`ConfigError::PropertyType`] when not an integer.
    pub fn required_int(&self, key: &str) -> Result<i32, ConfigError> {
        let value = self
            .0
            .get(key)
            .ok_or_else(|| ConfigError::MissingProperty(key.to_owned()))?;
        as_int(key, value)
    }
}

fn mismatch(key: &str, expected: &'static str) -> ConfigError {
    ConfigError::PropertyType {
        key: key.to_owned(),
        expected,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Map properties are authored as small decimals well inside f32 range."
)]
fn as_float(key: &str, value: &Value) -> Result<f32, ConfigError> {
    value
        .as_f64()
        .map(|number| number as f32)
        .ok_or_else(|| mismatch(key, "a number"))
}

fn as_int(key: &str, value: &Value) -> Result<i32, ConfigError> {
    value
        .as_i64()
        .and_then(|number| i32::try_from(number).ok())
        .ok_or_else(|| mismatch(key, "an integer"))
}
