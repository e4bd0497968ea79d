//! Turns one declaration into index records.
//!
//! For every registry entry, each class named by the entry's annotation
//! argument yields one [`IndexValue`] keyed by that class's simple name. The
//! indexer only reads the declaration; storing the result is the caller's
//! job.

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::trace;

use super::registry::{CONCEPT_REGISTRY, RegistryEntry};
use super::value::IndexValue;
use crate::base::simple_name;
use crate::syntax::{Declaration, DeclarationWrapper};

/// Records produced for one declaration, grouped by index key in emission
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexEntries {
    entries: IndexMap<SmolStr, Vec<IndexValue>>,
}

impl IndexEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record under `key`. An identical record already under the key
    /// is not added twice.
    pub fn push(&mut self, key: impl Into<SmolStr>, value: IndexValue) {
        let values = self.entries.entry(key.into()).or_default();
        if !values.contains(&value) {
            values.push(value);
        }
    }

    pub fn get(&self, key: &str) -> &[IndexValue] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &SmolStr> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &[IndexValue])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of records across all keys.
    pub fn record_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl IntoIterator for IndexEntries {
    type Item = (SmolStr, Vec<IndexValue>);
    type IntoIter = indexmap::map::IntoIter<SmolStr, Vec<IndexValue>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Something that contributes index records for a declaration.
pub trait ConceptIndexer: Send + Sync {
    fn index_declaration(&self, declaration: &dyn DeclarationWrapper, out: &mut IndexEntries);
}

/// Indexes every relation listed in a registry table.
#[derive(Debug, Clone, Copy)]
pub struct RegistryIndexer {
    entries: &'static [RegistryEntry],
}

impl RegistryIndexer {
    pub const fn new(entries: &'static [RegistryEntry]) -> Self {
        Self { entries }
    }
}

impl Default for RegistryIndexer {
    fn default() -> Self {
        Self::new(&CONCEPT_REGISTRY)
    }
}

impl ConceptIndexer for RegistryIndexer {
    fn index_declaration(&self, declaration: &dyn DeclarationWrapper, out: &mut IndexEntries) {
        let source = declaration.qualified_name();
        for entry in self.entries {
            for target in declaration.annotation_argument_class_names(entry.annotation, entry.argument)
            {
                let key = simple_name(&target);
                if key.is_empty() {
                    continue;
                }
                trace!(
                    "[DAGGER_INDEX] {} -> {} via {} (key '{}')",
                    source, target, entry.data_type, key
                );
                out.push(key, IndexValue::new(entry.data_type, source.clone()));
            }
        }
    }
}

/// Index one declaration with the registry indexer.
pub fn index_declaration(declaration: &Declaration) -> IndexEntries {
    let mut out = IndexEntries::new();
    RegistryIndexer::default().index_declaration(declaration.wrapper(), &mut out);
    out
}
