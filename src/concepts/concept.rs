//! Registration glue for the Dagger concept.
//!
//! Bundles what the host needs to support Dagger: the indexers that write
//! records, the readers that decode them, and the identification table.

use rayon::prelude::*;

use super::element::ConceptElement;
use super::identify::{DAGGER_IDENTIFIERS, DaggerElementIdentifiers};
use crate::base::QualifiedName;
use crate::index::{
    CONCEPT_REGISTRY, ConceptIndexer, IndexEntries, IndexValueReader, READERS, RegistryIndexer,
};
use crate::syntax::Declaration;

static REGISTRY_INDEXER: RegistryIndexer = RegistryIndexer::new(&CONCEPT_REGISTRY);
static INDEXERS: [&dyn ConceptIndexer; 1] = [&REGISTRY_INDEXER];

#[derive(Clone, Copy)]
pub struct DaggerConcept {
    indexers: &'static [&'static dyn ConceptIndexer],
    readers: &'static [IndexValueReader],
    identifiers: &'static DaggerElementIdentifiers,
}

/// The Dagger concept as the host registers it.
pub static DAGGER_CONCEPT: DaggerConcept = DaggerConcept {
    indexers: &INDEXERS,
    readers: &READERS,
    identifiers: &DAGGER_IDENTIFIERS,
};

impl Default for DaggerConcept {
    fn default() -> Self {
        DAGGER_CONCEPT
    }
}

impl DaggerConcept {
    pub fn indexers(&self) -> &'static [&'static dyn ConceptIndexer] {
        self.indexers
    }

    pub fn value_readers(&self) -> &'static [IndexValueReader] {
        self.readers
    }

    pub fn identifiers(&self) -> &'static DaggerElementIdentifiers {
        self.identifiers
    }

    /// Run every indexer over one declaration.
    pub fn index(&self, declaration: &Declaration) -> IndexEntries {
        let mut out = IndexEntries::new();
        for indexer in self.indexers {
            indexer.index_declaration(declaration.wrapper(), &mut out);
        }
        out
    }

    /// Index many declarations in parallel.
    ///
    /// Only the per-declaration work runs in parallel; the caller applies
    /// the results to its store afterwards.
    pub fn index_all(&self, declarations: &[Declaration]) -> Vec<(QualifiedName, IndexEntries)> {
        declarations
            .par_iter()
            .map(|declaration| (declaration.qualified_name().clone(), self.index(declaration)))
            .collect()
    }

    pub fn identify(&self, declaration: &Declaration) -> Option<ConceptElement> {
        self.identifiers.identify(declaration)
    }
}

impl std::fmt::Debug for DaggerConcept {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DaggerConcept")
            .field("indexers", &self.indexers.len())
            .field("readers", &self.readers.len())
            .finish_non_exhaustive()
    }
}
