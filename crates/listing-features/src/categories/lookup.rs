//! Exact-match recategorization of free-text labels.

use crate::error::{FeatureError, Result};
use std::collections::{BTreeSet, HashMap};

/// Raw text key -> coarse label, with a default for everything unmapped.
///
/// Keys match verbatim: no trimming, no case folding.
#[derive(Debug, Clone)]
pub struct LookupTable {
    name: String,
    entries: HashMap<String, String>,
    default: String,
}

impl LookupTable {
    /// Create a table. Repeated keys are rejected so a table can never
    /// silently depend on insertion order.
    pub fn new<I, K, V>(name: impl Into<String>, entries: I, default: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let mut map = HashMap::new();
        for (key, value) in entries {
            let key = key.into();
            if map.contains_key(&key) {
                return Err(FeatureError::InvalidCategory(format!(
                    "lookup table '{}' repeats key '{}'",
                    name, key
                )));
            }
            map.insert(key, value.into());
        }

        Ok(Self {
            name,
            entries: map,
            default: default.into(),
        })
    }

    pub(crate) fn from_static(name: &str, entries: &[(&str, &str)], default: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            default: default.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Label used for keys the table does not contain.
    pub fn default_label(&self) -> &str {
        &self.default
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Map a raw value to its coarse label.
    pub fn recategorize(&self, key: &str) -> &str {
        self.entries
            .get(key)
            .map(String::as_str)
            .unwrap_or(&self.default)
    }

    /// Every label this table can produce, the default included.
    pub fn outputs(&self) -> BTreeSet<&str> {
        self.entries
            .values()
            .map(String::as_str)
            .chain(std::iter::once(self.default.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit() -> LookupTable {
        LookupTable::new(
            "fruit",
            [("apple", "pome"), ("pear", "pome"), ("plum", "drupe")],
            "other",
        )
        .unwrap()
    }

    #[test]
    fn test_recategorize_exact_match() {
        let table = fruit();
        assert_eq!(table.recategorize("apple"), "pome");
        assert_eq!(table.recategorize("plum"), "drupe");
    }

    #[test]
    fn test_no_normalization() {
        let table = fruit();
        assert_eq!(table.recategorize("Apple"), "other");
        assert_eq!(table.recategorize(" apple"), "other");
        assert_eq!(table.recategorize(""), "other");
    }

    #[test]
    fn test_outputs_include_default() {
        let table = fruit();
        let outputs = table.outputs();
        assert!(outputs.contains("pome"));
        assert!(outputs.contains("drupe"));
        assert!(outputs.contains("other"));
        assert_eq!(outputs.len(), 3);
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let result = LookupTable::new("fruit", [("apple", "pome"), ("apple", "drupe")], "other");
        assert!(matches!(result, Err(FeatureError::InvalidCategory(_))));
    }
}
