//! Configuration entries
//!
//! An entry is what a configuration file evaluates to: either a single named
//! value or a named group of single values. Entries are transient; the loader
//! turns them into [`ResolvedValue`]s as soon as they are merged.

pub mod group;
pub mod resolved;
pub mod single;

pub use group::GroupEntry;
pub use resolved::{ConfigMap, ResolvedValue};
pub use single::SingleEntry;

/// Errors raised when building an entry by hand.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("entry name must not be empty")]
    EmptyName,
}

pub(crate) fn check_name(name: String) -> Result<String, EntryError> {
    if name.is_empty() {
        return Err(EntryError::EmptyName);
    }
    Ok(name)
}

/// A configuration unit produced by evaluating one file.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEntry {
    Single(SingleEntry),
    Group(GroupEntry),
}

impl ConfigEntry {
    /// Name the entry is stored under in the merged map.
    pub fn name(&self) -> &str {
        match self {
            ConfigEntry::Single(single) => single.name(),
            ConfigEntry::Group(group) => group.name(),
        }
    }

    /// Flatten the entry into the value kept in the merged map.
    ///
    /// A single entry resolves to its value; a group resolves to a mapping of
    /// member name to member value.
    pub fn resolve(&self) -> ResolvedValue {
        match self {
            ConfigEntry::Single(single) => ResolvedValue::Value(single.value().clone()),
            ConfigEntry::Group(group) => ResolvedValue::Group(
                group
                    .members()
                    .iter()
                    .map(|member| (member.name().to_string(), member.value().clone()))
                    .collect(),
            ),
        }
    }
}

impl From<SingleEntry> for ConfigEntry {
    fn from(single: SingleEntry) -> Self {
        ConfigEntry::Single(single)
    }
}

impl From<GroupEntry> for ConfigEntry {
    fn from(group: GroupEntry) -> Self {
        ConfigEntry::Group(group)
    }
}
