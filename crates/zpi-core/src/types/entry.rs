//! Directory entries and snapshots

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One directory object as returned by the subtree search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Distinguished name
    pub dn: String,

    /// Raw attribute values, multi-valued
    #[serde(default)]
    pub attributes: HashMap<String, Vec<String>>,
}

impl DirectoryEntry {
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: HashMap::new(),
        }
    }

    /// Builder-style helper to add values to an attribute
    pub fn with_attr<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes
            .entry(name.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// All values of an attribute. Names match exactly first, then
    /// ignoring ASCII case.
    pub fn values(&self, name: &str) -> &[String] {
        if let Some(values) = self.attributes.get(name) {
            return values;
        }

        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// First value of an attribute
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(|s| s.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        !self.values(name).is_empty()
    }

    /// Object class membership, case-insensitive as in LDAP
    pub fn has_object_class(&self, object_class_attr: &str, class: &str) -> bool {
        self.values(object_class_attr)
            .iter()
            .any(|oc| oc.eq_ignore_ascii_case(class))
    }
}

/// Immutable set of entries captured by one directory search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Search base the entries were read from
    pub base_dn: String,

    pub entries: Vec<DirectoryEntry>,
}

impl Snapshot {
    pub fn new(base_dn: impl Into<String>, entries: Vec<DirectoryEntry>) -> Self {
        Self {
            base_dn: base_dn.into(),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
