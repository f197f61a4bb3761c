//! Single named value

use super::{check_name, EntryError};
use serde_json::Value;

/// A name bound to one opaque value.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleEntry {
    name: String,
    value: Value,
}

impl SingleEntry {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Result<Self, EntryError> {
        Ok(Self { name: check_name(name.into())?, value: value.into() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<&mut Self, EntryError> {
        self.name = check_name(name.into())?;
        Ok(self)
    }

    pub fn set_value(&mut self, value: impl Into<Value>) -> &mut Self {
        self.value = value.into();
        self
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}
