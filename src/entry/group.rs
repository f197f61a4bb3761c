//! Named group of single values

use super::{check_name, EntryError, SingleEntry};
use serde_json::Value;

/// An ordered collection of [`SingleEntry`] members keyed by member name.
///
/// Member names are unique: adding a member whose name is already present
/// replaces the existing member in place, so the first position is kept and
/// the last value wins.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupEntry {
    name: String,
    members: Vec<SingleEntry>,
}

impl GroupEntry {
    pub fn new(name: impl Into<String>) -> Result<Self, EntryError> {
        Ok(Self { name: check_name(name.into())?, members: Vec::new() })
    }

    pub fn with_members(
        name: impl Into<String>,
        members: impl IntoIterator<Item = SingleEntry>,
    ) -> Result<Self, EntryError> {
        let mut group = Self::new(name)?;
        group.set_members(members);
        Ok(group)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<&mut Self, EntryError> {
        self.name = check_name(name.into())?;
        Ok(self)
    }

    /// Value of the member named `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.members.iter().find(|member| member.name() == key).map(SingleEntry::value)
    }

    pub fn members(&self) -> &[SingleEntry] {
        &self.members
    }

    /// Insert `member`, replacing any member with the same name.
    pub fn add_member(&mut self, member: SingleEntry) -> &mut Self {
        match self.members.iter_mut().find(|existing| existing.name() == member.name()) {
            Some(existing) => *existing = member,
            None => self.members.push(member),
        }
        self
    }

    /// Drop every member, then add `members` in order.
    pub fn set_members(&mut self, members: impl IntoIterator<Item = SingleEntry>) -> &mut Self {
        self.members.clear();
        for member in members {
            self.add_member(member);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
