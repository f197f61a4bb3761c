//! Plain values stored in the merged configuration map

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Merged configuration: entry name to resolved value.
pub type ConfigMap = BTreeMap<String, ResolvedValue>;

/// What an entry flattens to once merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedValue {
    /// Value of a single entry.
    Value(Value),
    /// Member name to member value, for a group entry, in member order.
    Group(Map<String, Value>),
}

impl ResolvedValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ResolvedValue::Value(value) => Some(value),
            ResolvedValue::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Map<String, Value>> {
        match self {
            ResolvedValue::Value(_) => None,
            ResolvedValue::Group(members) => Some(members),
        }
    }

    /// Member lookup; always `None` for a single value.
    pub fn get(&self, member: &str) -> Option<&Value> {
        self.as_group().and_then(|members| members.get(member))
    }

    /// Plain JSON rendering, groups become objects.
    pub fn to_json(&self) -> Value {
        match self {
            ResolvedValue::Value(value) => value.clone(),
            ResolvedValue::Group(members) => Value::Object(members.clone()),
        }
    }
}
