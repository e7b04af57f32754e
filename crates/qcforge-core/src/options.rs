//! Option descriptors, schema groups, and the schema JSON document.
//!
//! A backend's configurable surface is declared as an ordered sequence of
//! typed descriptors, optionally partitioned into named tabs. Declaration
//! order is significant — it drives how the host renders the options — and
//! is preserved through serialization.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// How a select default is declared: an index into the value list, or a
/// literal entry of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectDefault {
    /// Zero-based index into the declared values.
    Index(usize),
    /// One of the declared values, spelled out.
    Value(String),
}

/// The typed payload of an option descriptor.
///
/// Each variant carries only the fields meaningful for its kind, so a
/// descriptor can never hold, say, a range constraint on a boolean. The
/// default is checked against the variant's own constraints when the schema
/// is constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionKind {
    /// Free-form text.
    Text {
        /// Value used when the request omits the option.
        default: String,
    },
    /// Integer with optional inclusive bounds.
    Integer {
        /// Value used when the request omits the option.
        default: i64,
        /// Smallest accepted value, if bounded below.
        minimum: Option<i64>,
        /// Largest accepted value, if bounded above.
        maximum: Option<i64>,
    },
    /// On/off switch.
    Boolean {
        /// Value used when the request omits the option.
        default: bool,
    },
    /// One value out of an ordered list.
    Select {
        /// Permitted values, in presentation order.
        values: Vec<String>,
        /// Default selection.
        default: SelectDefault,
    },
}

impl OptionKind {
    /// The kind tag used in the schema JSON document.
    pub fn type_name(&self) -> &'static str {
        match self {
            OptionKind::Text { .. } => "string",
            OptionKind::Integer { .. } => "integer",
            OptionKind::Boolean { .. } => "boolean",
            OptionKind::Select { .. } => "stringList",
        }
    }

    /// The declared default, in its schema JSON form (a select defaulted by
    /// index serializes as that index, not as the value it points at).
    fn default_json(&self) -> Value {
        match self {
            OptionKind::Text { default } => Value::String(default.clone()),
            OptionKind::Integer { default, .. } => Value::Number(Number::from(*default)),
            OptionKind::Boolean { default } => Value::Bool(*default),
            OptionKind::Select { default, .. } => match default {
                SelectDefault::Index(index) => Value::Number(Number::from(*index as u64)),
                SelectDefault::Value(value) => Value::String(value.clone()),
            },
        }
    }
}

/// Declaration of one configurable parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDescriptor {
    /// Option name, as the host displays it and as requests key it.
    pub name: String,
    /// Typed default and constraints.
    pub kind: OptionKind,
    /// Hover text shown by the host, if any.
    pub tool_tip: Option<String>,
    /// Whether the host should hide the option by default.
    pub hide: bool,
}

impl OptionDescriptor {
    fn new(name: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            tool_tip: None,
            hide: false,
        }
    }

    /// Declares a free-form text option.
    pub fn text(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(
            name,
            OptionKind::Text {
                default: default.into(),
            },
        )
    }

    /// Declares an integer option with optional inclusive bounds.
    pub fn integer(
        name: impl Into<String>,
        default: i64,
        minimum: Option<i64>,
        maximum: Option<i64>,
    ) -> Self {
        Self::new(
            name,
            OptionKind::Integer {
                default,
                minimum,
                maximum,
            },
        )
    }

    /// Declares a boolean option.
    pub fn boolean(name: impl Into<String>, default: bool) -> Self {
        Self::new(name, OptionKind::Boolean { default })
    }

    /// Declares a select option defaulted by index.
    pub fn select(name: impl Into<String>, default: usize, values: &[&str]) -> Self {
        Self::new(
            name,
            OptionKind::Select {
                values: values.iter().map(|v| v.to_string()).collect(),
                default: SelectDefault::Index(default),
            },
        )
    }

    /// Declares a select option defaulted by literal value.
    pub fn select_value(name: impl Into<String>, default: &str, values: &[&str]) -> Self {
        Self::new(
            name,
            OptionKind::Select {
                values: values.iter().map(|v| v.to_string()).collect(),
                default: SelectDefault::Value(default.to_string()),
            },
        )
    }

    /// Attaches hover text.
    pub fn tool_tip(mut self, tip: impl Into<String>) -> Self {
        self.tool_tip = Some(tip.into());
        self
    }

    /// Marks the option as hidden by default.
    pub fn hidden(mut self) -> Self {
        self.hide = true;
        self
    }

    /// Checks that the declared default satisfies the descriptor's own
    /// constraints.
    fn check(&self) -> Result<(), SchemaError> {
        match &self.kind {
            OptionKind::Text { .. } | OptionKind::Boolean { .. } => Ok(()),
            OptionKind::Integer {
                default,
                minimum,
                maximum,
            } => {
                let below = minimum.is_some_and(|min| *default < min);
                let above = maximum.is_some_and(|max| *default > max);
                if below || above {
                    Err(SchemaError::DefaultOutOfBounds {
                        option: self.name.clone(),
                        value: *default,
                    })
                } else {
                    Ok(())
                }
            }
            OptionKind::Select { values, default } => {
                if values.is_empty() {
                    return Err(SchemaError::EmptyValues {
                        option: self.name.clone(),
                    });
                }
                match default {
                    SelectDefault::Index(index) if *index >= values.len() => {
                        Err(SchemaError::DefaultIndexOutOfRange {
                            option: self.name.clone(),
                            index: *index,
                            len: values.len(),
                        })
                    }
                    SelectDefault::Value(value) if !values.contains(value) => {
                        Err(SchemaError::DefaultNotInValues {
                            option: self.name.clone(),
                            value: value.clone(),
                        })
                    }
                    _ => Ok(()),
                }
            }
        }
    }

    /// The descriptor's entry in the schema JSON document.
    fn to_json(&self) -> Value {
        let mut entry = Map::new();
        entry.insert(
            "type".to_string(),
            Value::String(self.kind.type_name().to_string()),
        );
        entry.insert("default".to_string(), self.kind.default_json());
        if let OptionKind::Integer {
            minimum, maximum, ..
        } = &self.kind
        {
            if let Some(min) = minimum {
                entry.insert("minimum".to_string(), Value::Number(Number::from(*min)));
            }
            if let Some(max) = maximum {
                entry.insert("maximum".to_string(), Value::Number(Number::from(*max)));
            }
        }
        if let OptionKind::Select { values, .. } = &self.kind {
            entry.insert(
                "values".to_string(),
                Value::Array(values.iter().map(|v| Value::String(v.clone())).collect()),
            );
        }
        if let Some(tip) = &self.tool_tip {
            entry.insert("toolTip".to_string(), Value::String(tip.clone()));
        }
        if self.hide {
            entry.insert("hide".to_string(), Value::Bool(true));
        }
        Value::Object(entry)
    }
}

/// Errors detected when a schema is constructed.
///
/// These are programming errors in a backend's declarations, not request
/// errors, so they surface at schema construction rather than at resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A select option with no values to select from.
    #[error("option '{option}' declares an empty value list")]
    EmptyValues {
        /// Offending option name.
        option: String,
    },

    /// A select default index past the end of the value list.
    #[error("option '{option}' declares default index {index} but only {len} values")]
    DefaultIndexOutOfRange {
        /// Offending option name.
        option: String,
        /// Declared index.
        index: usize,
        /// Number of declared values.
        len: usize,
    },

    /// A select default value absent from the value list.
    #[error("option '{option}' declares default '{value}' which is not one of its values")]
    DefaultNotInValues {
        /// Offending option name.
        option: String,
        /// Declared default.
        value: String,
    },

    /// An integer default outside the descriptor's own bounds.
    #[error("option '{option}' declares default {value} outside its own bounds")]
    DefaultOutOfBounds {
        /// Offending option name.
        option: String,
        /// Declared default.
        value: i64,
    },

    /// The same option name declared twice.
    #[error("option '{name}' is declared more than once")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },
}

/// A group of option descriptors under one tab.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionGroup {
    /// Tab label, if the schema is tabbed.
    pub tab_name: Option<String>,
    /// Descriptors in declaration order.
    pub options: Vec<OptionDescriptor>,
}

/// The full configurable surface of one backend, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSchema {
    groups: Vec<OptionGroup>,
}

impl OptionSchema {
    /// Builds a schema from a single anonymous group.
    pub fn single(options: Vec<OptionDescriptor>) -> Result<Self, SchemaError> {
        Self::checked(vec![OptionGroup {
            tab_name: None,
            options,
        }])
    }

    /// Builds a schema from named tabs.
    pub fn tabbed(tabs: Vec<(&str, Vec<OptionDescriptor>)>) -> Result<Self, SchemaError> {
        Self::checked(
            tabs.into_iter()
                .map(|(name, options)| OptionGroup {
                    tab_name: Some(name.to_string()),
                    options,
                })
                .collect(),
        )
    }

    fn checked(groups: Vec<OptionGroup>) -> Result<Self, SchemaError> {
        let schema = Self { groups };
        let mut seen = Vec::new();
        for descriptor in schema.descriptors() {
            descriptor.check()?;
            if seen.contains(&descriptor.name.as_str()) {
                return Err(SchemaError::DuplicateName {
                    name: descriptor.name.clone(),
                });
            }
            seen.push(descriptor.name.as_str());
        }
        Ok(schema)
    }

    /// The schema's groups, in declaration order.
    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    /// Iterates every descriptor across all groups, in declaration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.groups.iter().flat_map(|group| group.options.iter())
    }

    /// Looks a descriptor up by name.
    pub fn find(&self, name: &str) -> Option<&OptionDescriptor> {
        self.descriptors().find(|descriptor| descriptor.name == name)
    }

    /// The `userOptions` JSON document.
    ///
    /// A single anonymous group serializes as one object keyed by option
    /// name; a tabbed schema serializes as an array of objects, each with a
    /// `tabName` entry ahead of its options.
    pub fn user_options_json(&self) -> Value {
        if let [group] = self.groups.as_slice() {
            if group.tab_name.is_none() {
                return Value::Object(group_entries(group));
            }
        }
        Value::Array(
            self.groups
                .iter()
                .map(|group| {
                    let mut entries = Map::new();
                    if let Some(tab) = &group.tab_name {
                        entries.insert("tabName".to_string(), Value::String(tab.clone()));
                    }
                    entries.extend(group_entries(group));
                    Value::Object(entries)
                })
                .collect(),
        )
    }
}

fn group_entries(group: &OptionGroup) -> Map<String, Value> {
    group
        .options
        .iter()
        .map(|descriptor| (descriptor.name.clone(), descriptor.to_json()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_group_serializes_as_object() {
        let schema = OptionSchema::single(vec![
            OptionDescriptor::text("Title", ""),
            OptionDescriptor::integer("Charge", 0, Some(-9), Some(9)),
        ])
        .unwrap();

        let json = schema.user_options_json();
        let object = json.as_object().unwrap();
        let keys: Vec<_> = object.keys().collect();
        assert_eq!(keys, vec!["Title", "Charge"]);
        assert_eq!(object["Charge"]["type"], "integer");
        assert_eq!(object["Charge"]["minimum"], -9);
        assert_eq!(object["Charge"]["maximum"], 9);
    }

    #[test]
    fn test_tabbed_schema_serializes_as_array() {
        let schema = OptionSchema::tabbed(vec![
            ("Basic", vec![OptionDescriptor::text("Title", "")]),
            (
                "Extra",
                vec![OptionDescriptor::boolean("Verbose Report", false)],
            ),
        ])
        .unwrap();

        let json = schema.user_options_json();
        let tabs = json.as_array().unwrap();
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0]["tabName"], "Basic");
        assert_eq!(
            tabs[0].as_object().unwrap().keys().next().unwrap(),
            "tabName"
        );
        assert_eq!(tabs[1]["Verbose Report"]["type"], "boolean");
    }

    #[test]
    fn test_select_defaults_serialize_by_declaration() {
        let by_index = OptionDescriptor::select("Theory", 1, &["HF", "MP2"]);
        assert_eq!(by_index.to_json()["default"], 1);

        let by_value = OptionDescriptor::select_value("Solvent", "Water", &["OTHER", "Water"]);
        assert_eq!(by_value.to_json()["default"], "Water");
    }

    #[test]
    fn test_tool_tip_and_hide_are_optional_keys() {
        let bare = OptionDescriptor::boolean("COSMO", true);
        let entry = bare.to_json();
        assert!(entry.get("toolTip").is_none());
        assert!(entry.get("hide").is_none());

        let decorated = OptionDescriptor::select("Dispersion", 0, &["None", "D3BJ"])
            .tool_tip("Any added dispersion corrections")
            .hidden();
        let entry = decorated.to_json();
        assert_eq!(entry["toolTip"], "Any added dispersion corrections");
        assert_eq!(entry["hide"], true);
    }

    #[test]
    fn test_default_index_out_of_range_is_rejected() {
        let err = OptionSchema::single(vec![OptionDescriptor::select("Basis", 3, &["a", "b"])])
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DefaultIndexOutOfRange {
                option: "Basis".to_string(),
                index: 3,
                len: 2,
            }
        );
    }

    #[test]
    fn test_default_value_not_in_values_is_rejected() {
        let err = OptionSchema::single(vec![OptionDescriptor::select_value(
            "Solvent",
            "Ether",
            &["Water", "Acetone"],
        )])
        .unwrap_err();
        assert!(matches!(err, SchemaError::DefaultNotInValues { .. }));
    }

    #[test]
    fn test_integer_default_outside_bounds_is_rejected() {
        let err = OptionSchema::single(vec![OptionDescriptor::integer(
            "Multiplicity",
            0,
            Some(1),
            Some(5),
        )])
        .unwrap_err();
        assert!(matches!(err, SchemaError::DefaultOutOfBounds { .. }));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let err = OptionSchema::single(vec![
            OptionDescriptor::text("Title", ""),
            OptionDescriptor::text("Title", "again"),
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateName { .. }));
    }

    #[test]
    fn test_empty_value_list_is_rejected() {
        let err =
            OptionSchema::single(vec![OptionDescriptor::select("Basis", 0, &[])]).unwrap_err();
        assert!(matches!(err, SchemaError::EmptyValues { .. }));
    }
}
