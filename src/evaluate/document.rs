//! Structured document evaluator (TOML, YAML, JSON)

use super::{FileEvaluator, Format};
use crate::entry::{ConfigEntry, GroupEntry, SingleEntry};
use crate::error::{LoaderError, Result};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::Path;

/// Top-level shape every document must have.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntryDocument {
    name: String,
    /// `Some(Value::Null)` for an explicit null, `None` when the key is absent.
    #[serde(default, deserialize_with = "present_value")]
    value: Option<Value>,
    #[serde(default)]
    members: Option<MembersDocument>,
}

fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MembersDocument {
    /// `members = [{ name = "x", value = 1 }]`, declaration order kept.
    List(Vec<MemberDocument>),
    /// `[members]` table, read in declaration order.
    Table(Map<String, Value>),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MemberDocument {
    name: String,
    value: Value,
}

/// Evaluates structured documents of one [`Format`] into entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentEvaluator {
    format: Format,
}

impl DocumentEvaluator {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    fn parse(&self, content: &str, source: &Path) -> Result<Value> {
        match self.format {
            Format::Toml => {
                let raw: toml::Value = toml::from_str(content)
                    .map_err(|e| LoaderError::evaluation(source, format!("Invalid TOML: {e}")))?;
                toml_to_json(raw).map_err(|e| LoaderError::evaluation(source, e))
            }
            Format::Yaml => serde_yaml::from_str(content)
                .map_err(|e| LoaderError::evaluation(source, format!("Invalid YAML: {e}"))),
            Format::Json => serde_json::from_str(content)
                .map_err(|e| LoaderError::evaluation(source, format!("Invalid JSON: {e}"))),
        }
    }
}

impl FileEvaluator for DocumentEvaluator {
    fn extension(&self) -> &str {
        self.format.extension()
    }

    fn evaluate(&self, identifier: &str, source: &Path) -> Result<ConfigEntry> {
        let content = fs::read_to_string(source)
            .map_err(|e| LoaderError::evaluation(source, format!("Failed reading file: {e}")))?;

        let raw = self.parse(&content, source)?;
        let entry = entry_from_document(raw, source)?;

        tracing::trace!(identifier, entry = entry.name(), "evaluated {}", source.display());
        Ok(entry)
    }
}

/// Convert a TOML value into a JSON value. Datetimes become their RFC 3339
/// text, as written in the file.
fn toml_to_json(value: toml::Value) -> std::result::Result<Value, String> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| format!("float {f} has no JSON representation"))?,
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(
            items.into_iter().map(toml_to_json).collect::<std::result::Result<_, _>>()?,
        ),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| toml_to_json(value).map(|value| (key, value)))
                .collect::<std::result::Result<Map<_, _>, _>>()?,
        ),
    })
}

/// Map a parsed document onto a [`ConfigEntry`].
fn entry_from_document(raw: Value, source: &Path) -> Result<ConfigEntry> {
    let doc: EntryDocument =
        serde_json::from_value(raw).map_err(|e| LoaderError::bad_parameter(source, e.to_string()))?;
    let bad_entry = |e: crate::entry::EntryError| LoaderError::bad_parameter(source, e.to_string());

    match (doc.value, doc.members) {
        (Some(value), None) => Ok(SingleEntry::new(doc.name, value).map_err(bad_entry)?.into()),
        (None, Some(members)) => {
            let members: Vec<SingleEntry> = match members {
                MembersDocument::List(list) => list
                    .into_iter()
                    .map(|member| SingleEntry::new(member.name, member.value))
                    .collect::<std::result::Result<_, _>>()
                    .map_err(bad_entry)?,
                MembersDocument::Table(table) => table
                    .into_iter()
                    .map(|(name, value)| SingleEntry::new(name, value))
                    .collect::<std::result::Result<_, _>>()
                    .map_err(bad_entry)?,
            };
            Ok(GroupEntry::with_members(doc.name, members).map_err(bad_entry)?.into())
        }
        (Some(_), Some(_)) => Err(LoaderError::bad_parameter(
            source,
            "entry declares both `value` and `members`",
        )),
        (None, None) => Err(LoaderError::bad_parameter(
            source,
            "entry declares neither `value` nor `members`",
        )),
    }
}
