//! Point-in-time replication status report

use std::collections::BTreeMap;

use crate::backend::StatusRow;

/// One status report: field name -> value (NULL is `None`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    fields: BTreeMap<String, Option<String>>,
}

impl StatusSnapshot {
    pub fn new(fields: StatusRow) -> Self {
        Self { fields }
    }

    /// Projection with every field name lower-cased
    ///
    /// Values pass through untouched.
    pub fn normalized(&self) -> Self {
        let fields = self
            .fields
            .iter()
            .map(|(name, value)| (name.to_lowercase(), value.clone()))
            .collect();
        Self { fields }
    }

    /// Field lookup by exact name
    ///
    /// Returns `None` both for absent fields and NULL values.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_deref())
    }

    /// Whether the field is present (NULL counts as present)
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Exact, case-sensitive comparison of a field's value
    pub fn field_is(&self, name: &str, expected: &str) -> bool {
        self.get(name) == Some(expected)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<StatusRow> for StatusSnapshot {
    fn from(fields: StatusRow) -> Self {
        Self::new(fields)
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for StatusSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.map(Into::into)))
            .collect();
        Self { fields }
    }
}
