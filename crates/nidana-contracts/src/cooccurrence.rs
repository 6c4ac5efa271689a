//! The static symptom co-occurrence table.

use std::collections::BTreeMap;

use crate::symptom::normalize;

/// Adjacency from a normalized symptom to the symptoms commonly reported
/// alongside it.
///
/// Keys and related symptoms are normalized at construction, so lookups
/// must use normalized input. The related lists keep their declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoOccurrenceTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl CoOccurrenceTable {
    /// Build a table, normalizing every key and related symptom.
    ///
    /// Keys that collapse to the same normalized form are merged in
    /// iteration order.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let mut table: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, related) in entries {
            let slot = table.entry(normalize(key.as_ref())).or_default();
            slot.extend(related.into_iter().map(|r| normalize(r.as_ref())));
        }
        Self { entries: table }
    }

    /// Related symptoms for an already normalized symptom.
    pub fn related(&self, symptom: &str) -> Option<&[String]> {
        self.entries.get(symptom).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
