//! Resolution of raw host-supplied option values against a schema.

use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};
use crate::options::{OptionDescriptor, OptionKind, OptionSchema, SelectDefault};

/// A resolved option value.
///
/// Select options resolve to the chosen value, so compilers only ever see
/// text, integers, and booleans.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Free-form or selected text.
    Text(String),
    /// Integer within its declared bounds.
    Integer(i64),
    /// On/off switch.
    Boolean(bool),
}

impl OptionValue {
    fn to_json(&self) -> Value {
        match self {
            OptionValue::Text(text) => Value::String(text.clone()),
            OptionValue::Integer(value) => Value::Number(Number::from(*value)),
            OptionValue::Boolean(flag) => Value::Bool(*flag),
        }
    }
}

/// The resolved value of every option a backend's schema declares, in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    values: Vec<(String, OptionValue)>,
}

impl OptionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any existing entry of the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: OptionValue) {
        let name = name.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.values.push((name, value)),
        }
    }

    /// Looks a value up by option name.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// The text value of `name`.
    pub fn text(&self, name: &str) -> Result<&str> {
        match self.get(name) {
            Some(OptionValue::Text(text)) => Ok(text),
            _ => Err(lookup(name, "text")),
        }
    }

    /// The integer value of `name`.
    pub fn integer(&self, name: &str) -> Result<i64> {
        match self.get(name) {
            Some(OptionValue::Integer(value)) => Ok(*value),
            _ => Err(lookup(name, "an integer")),
        }
    }

    /// The boolean value of `name`.
    pub fn boolean(&self, name: &str) -> Result<bool> {
        match self.get(name) {
            Some(OptionValue::Boolean(flag)) => Ok(*flag),
            _ => Err(lookup(name, "a boolean")),
        }
    }

    /// Number of resolved options.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw JSON map equivalent of this set, suitable for feeding back
    /// into [`resolve`].
    pub fn to_raw(&self) -> Map<String, Value> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect()
    }
}

fn lookup(option: &str, expected: &'static str) -> Error {
    Error::OptionLookup {
        option: option.to_string(),
        expected,
    }
}

/// Resolves raw host-supplied values against `schema`.
///
/// Missing options take their declared default. Unknown option names, kind
/// mismatches, out-of-range integers, and out-of-list selections are
/// rejected with a [`Error::Validation`] naming the field. Resolution has
/// no side effects and is idempotent: resolving the raw form of a resolved
/// set yields an equal set.
pub fn resolve(schema: &OptionSchema, raw: &Map<String, Value>) -> Result<OptionSet> {
    for name in raw.keys() {
        if schema.find(name).is_none() {
            return Err(Error::validation(name, "unrecognized option"));
        }
    }

    let mut resolved = OptionSet::new();
    for descriptor in schema.descriptors() {
        let value = match raw.get(&descriptor.name) {
            Some(supplied) => resolve_value(descriptor, supplied)?,
            None => default_value(descriptor),
        };
        resolved.insert(descriptor.name.clone(), value);
    }
    Ok(resolved)
}

fn default_value(descriptor: &OptionDescriptor) -> OptionValue {
    match &descriptor.kind {
        OptionKind::Text { default } => OptionValue::Text(default.clone()),
        OptionKind::Integer { default, .. } => OptionValue::Integer(*default),
        OptionKind::Boolean { default } => OptionValue::Boolean(*default),
        OptionKind::Select { values, default } => OptionValue::Text(match default {
            // In range by schema construction.
            SelectDefault::Index(index) => values[*index].clone(),
            SelectDefault::Value(value) => value.clone(),
        }),
    }
}

fn resolve_value(descriptor: &OptionDescriptor, supplied: &Value) -> Result<OptionValue> {
    let name = descriptor.name.as_str();
    match &descriptor.kind {
        OptionKind::Text { .. } => supplied
            .as_str()
            .map(|text| OptionValue::Text(text.to_string()))
            .ok_or_else(|| Error::validation(name, "expected a string")),
        OptionKind::Boolean { .. } => supplied
            .as_bool()
            .map(OptionValue::Boolean)
            .ok_or_else(|| Error::validation(name, "expected a boolean")),
        OptionKind::Integer {
            minimum, maximum, ..
        } => {
            let value = supplied
                .as_i64()
                .ok_or_else(|| Error::validation(name, "expected an integer"))?;
            if let Some(min) = minimum {
                if value < *min {
                    return Err(Error::validation(
                        name,
                        format!("{value} is below the minimum of {min}"),
                    ));
                }
            }
            if let Some(max) = maximum {
                if value > *max {
                    return Err(Error::validation(
                        name,
                        format!("{value} is above the maximum of {max}"),
                    ));
                }
            }
            Ok(OptionValue::Integer(value))
        }
        OptionKind::Select { values, .. } => {
            if let Some(choice) = supplied.as_str() {
                if values.iter().any(|value| value == choice) {
                    Ok(OptionValue::Text(choice.to_string()))
                } else {
                    Err(Error::validation(
                        name,
                        format!("'{choice}' is not one of the permitted values"),
                    ))
                }
            } else if let Some(index) = supplied.as_u64() {
                values
                    .get(index as usize)
                    .map(|value| OptionValue::Text(value.clone()))
                    .ok_or_else(|| {
                        Error::validation(name, format!("index {index} is outside the value list"))
                    })
            } else {
                Err(Error::validation(name, "expected a string or an index"))
            }
        }
    }
}
