//! Name tables with passthrough lookup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Immutable string-to-string table.
///
/// Lookups never fail: a key that is not in the table maps to itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameTable {
    entries: BTreeMap<String, String>,
}

impl NameTable {
    /// Create an empty table (every lookup is the identity).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from static `(from, to)` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        pairs.iter().copied().collect()
    }

    /// Look up `name`, falling back to `name` itself.
    pub fn get<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Look up `name` without the passthrough fallback.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Check whether `name` is an explicit key.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries whose target is itself a key mapping somewhere else.
    ///
    /// A table without such entries is a fixed point: applying it twice
    /// gives the same result as applying it once.
    pub fn unstable_entries(&self) -> Vec<(&str, &str)> {
        self.iter()
            .filter(|&(_, v)| self.get(v) != v)
            .collect()
    }

    /// Check whether applying the table twice is a no-op.
    pub fn is_fixed_point(&self) -> bool {
        self.unstable_entries().is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NameTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Raw material name to final material name.
///
/// Composes a canonicalizing name map with a final rename map: a raw name
/// resolves through the name map, then through the rename map. The composed
/// entries are materialized for every key and value of the name map; any
/// other name only goes through the rename map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedMaterialMap {
    table: NameTable,
    renames: NameTable,
}

impl ResolvedMaterialMap {
    /// Compose `names` with `renames` over every key and value of `names`.
    pub fn compose(names: &NameTable, renames: &NameTable) -> Self {
        let resolve = |raw: &str| renames.get(names.get(raw)).to_string();

        let mut entries = BTreeMap::new();
        for (raw, canonical) in names.iter() {
            entries.insert(raw.to_string(), resolve(raw));
            entries
                .entry(canonical.to_string())
                .or_insert_with(|| resolve(canonical));
        }

        Self {
            table: NameTable { entries },
            renames: renames.clone(),
        }
    }

    /// Final name for `raw`, or `raw` itself when it has no mapping.
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        self.table.lookup(raw).unwrap_or_else(|| self.renames.get(raw))
    }

    /// Materialized entries for the name map's keys and values.
    pub fn table(&self) -> &NameTable {
        &self.table
    }
}
