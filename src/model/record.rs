//! Record and field value types
//!
//! A record is an opaque mapping from field name to value with one identity
//! field (`_id`) assigned by the record store.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the identity field as it appears on the wire
pub const ID_FIELD: &str = "_id";

/// Field whose RFC 3339 strings are read back as dates
pub const DATE_FIELD: &str = "date";

/// Stable identity of a record, assigned by the record store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A dynamic field value.
///
/// Deserialization is untagged: JSON `null`, booleans and numbers map to their
/// variants and every string is [`FieldValue::Text`]. Dates are written as
/// RFC 3339 strings and only come back as [`FieldValue::Date`] under
/// [`DATE_FIELD`], when a [`Record`] is deserialized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    #[serde(skip_deserializing)]
    Date(DateTime<Utc>),
    Text(String),
}

impl FieldValue {
    /// Text shown for this value when its cell is not being edited.
    ///
    /// Null renders as an empty string, text and numbers render literally
    /// (`0` renders as `"0"`), everything else falls back to its generic
    /// string form.
    pub fn display_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            other => other.to_string(),
        }
    }

    /// Text placed in the input when an edit session opens.
    ///
    /// Only text and numbers are carried into the input; other kinds start
    /// from an empty input.
    pub fn input_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            _ => String::new(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Type a loaded value by the field it sits in. Text under
    /// [`DATE_FIELD`] that parses as RFC 3339 becomes a date; everything
    /// else is returned unchanged.
    pub fn typed_for_field(self, name: &str) -> FieldValue {
        match self {
            FieldValue::Text(s) if name == DATE_FIELD => {
                match DateTime::parse_from_rfc3339(s.trim()) {
                    Ok(d) => FieldValue::Date(d.with_timezone(&Utc)),
                    Err(_) => FieldValue::Text(s),
                }
            }
            other => other,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Date(d) => write!(f, "{}", d.to_rfc3339()),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(d: DateTime<Utc>) -> Self {
        FieldValue::Date(d)
    }
}

/// A single record as supplied by the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireRecord")]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

#[derive(Deserialize)]
struct WireRecord {
    #[serde(rename = "_id")]
    id: RecordId,
    #[serde(flatten)]
    fields: BTreeMap<String, FieldValue>,
}

impl From<WireRecord> for Record {
    fn from(wire: WireRecord) -> Self {
        let fields = wire
            .fields
            .into_iter()
            .map(|(name, value)| {
                let value = value.typed_for_field(&name);
                (name, value)
            })
            .collect();
        Self { id: wire.id, fields }
    }
}

impl Record {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field assignment
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.set(name, value.into());
        self
    }

    /// Value of a field, `Null` when absent
    pub fn get(&self, name: &str) -> FieldValue {
        if name == ID_FIELD {
            return FieldValue::Text(self.id.to_string());
        }
        self.fields.get(name).cloned().unwrap_or_default()
    }

    /// Set a field. The identity field is never reassigned.
    pub fn set(&mut self, name: &str, value: FieldValue) {
        if name == ID_FIELD {
            tracing::warn!("Ignoring write to identity field of record {}", self.id);
            return;
        }
        self.fields.insert(name.to_string(), value);
    }

    /// Shallow copy of this record with one field overridden
    pub fn patched(&self, name: &str, value: FieldValue) -> Record {
        let mut patch = self.clone();
        patch.set(name, value);
        patch
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
