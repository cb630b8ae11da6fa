//! Persisted list of hooked block types a document opted out of
//!
//! Stored in document metadata as a JSON array, e.g. `["tests/my-block"]`.
//! Order is the order of first detection and every type appears once.

use crate::document::Document;
use crate::error::{Error, Result};

/// Ordered, duplicate-free set of hooked block types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    types: Vec<String>,
}

impl IgnoreList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a persisted JSON array. Duplicates collapse onto their first occurrence.
    pub fn from_json(raw: &str, key: &str) -> Result<Self> {
        let types: Vec<String> =
            serde_json::from_str(raw).map_err(|e| Error::InvalidIgnoreList {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        Ok(types.into_iter().collect())
    }

    /// Read the list stored under `key`; a missing or blank value is empty.
    pub fn from_document(document: &Document, key: &str) -> Result<Self> {
        match document.meta(key) {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(raw, key),
            _ => Ok(Self::new()),
        }
    }

    /// Add a type unless already present. Returns whether it was added.
    pub fn insert(&mut self, hooked_type: impl Into<String>) -> bool {
        let hooked_type = hooked_type.into();
        if self.contains(&hooked_type) {
            return false;
        }
        self.types.push(hooked_type);
        true
    }

    pub fn contains(&self, hooked_type: &str) -> bool {
        self.types.iter().any(|t| t == hooked_type)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.types
    }

    /// Encode as the JSON array stored in metadata.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.types)?)
    }
}

impl FromIterator<String> for IgnoreList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut list = Self::new();
        for hooked_type in iter {
            list.insert(hooked_type);
        }
        list
    }
}

/// Merges newly absent hooked types into a document's ignore list.
#[derive(Debug, Clone, Copy)]
pub struct MetadataWriter<'a> {
    key: &'a str,
}

impl<'a> MetadataWriter<'a> {
    pub fn new(key: &'a str) -> Self {
        Self { key }
    }

    /// Union `delta` into the stored list and write it back.
    ///
    /// Returns the types that were not stored before. When that is empty
    /// the document is left untouched. On error nothing is written.
    pub fn apply(&self, document: &mut Document, delta: &[String]) -> Result<Vec<String>> {
        let mut merged = IgnoreList::from_document(document, self.key)?;
        let added: Vec<String> = delta
            .iter()
            .filter(|hooked_type| merged.insert(hooked_type.as_str()))
            .cloned()
            .collect();

        if added.is_empty() {
            return Ok(added);
        }

        let encoded = merged.to_json()?;
        document.set_meta(self.key, encoded);
        Ok(added)
    }
}
