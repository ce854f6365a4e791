//! Decoded result rows.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One decoded data row, keyed by the header columns in header order.
///
/// Values past the end of the header are not kept. Serializes as a JSON
/// object with keys in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRecord {
    fields: Vec<(String, String)>,
}

impl ResultRecord {
    pub(crate) fn from_row(header: &[String], mut row: Vec<String>) -> Self {
        row.truncate(header.len());
        let fields = header.iter().cloned().zip(row).collect();
        Self { fields }
    }

    /// Value of the first column named `column`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ResultRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
