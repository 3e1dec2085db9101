//! Flat output records.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single cell value of an output record.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    List(Vec<String>),
    /// No value could be extracted. Serialized as `null`, rendered as an empty cell.
    Missing,
}

impl FieldValue {
    /// Render the value as a delimited-text cell.
    pub fn to_cell(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Float(value) if value.fract() == 0.0 => format!("{value:.1}"),
            Self::Float(value) => value.to_string(),
            Self::List(items) => items.join(", "),
            Self::Missing => String::new(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Missing, Self::Text)
    }
}

impl From<Option<i64>> for FieldValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::Missing, Self::Integer)
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::Float)
    }
}

impl From<Option<Vec<String>>> for FieldValue {
    fn from(value: Option<Vec<String>>) -> Self {
        value.map_or(Self::Missing, Self::List)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

/// An ordered mapping from column name to value.
///
/// Field order is insertion order, which the record builders keep equal to the
/// schema order so that every row of one output shares the same columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemRecord {
    fields: Vec<(String, FieldValue)>,
}

impl ItemRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, replacing the value in place if the name already exists.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Column names in record order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.fields.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ItemRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
