//! Sparse inverted index over Dagger annotation arguments.
//!
//! ```text
//! declaration ──indexer──▶ IndexEntries ──▶ IndexStore
//!                (registry: data type → annotation + argument)
//! ```
//!
//! Keys are simple class names, so unrelated classes sharing a simple name
//! share a bucket. Readers of the index must confirm each hit against the
//! source declaration.

mod data_type;
mod error;
mod indexer;
mod registry;
mod store;
mod value;

pub use data_type::RelationDataType;
pub use error::{IndexError, Result};
pub use indexer::{ConceptIndexer, IndexEntries, RegistryIndexer, index_declaration};
pub use registry::{CONCEPT_REGISTRY, RegistryEntry, registry_entry};
pub use store::{INDEX_FORMAT_VERSION, INDEX_MAGIC, InMemoryIndexStore, IndexStore, LoadReport};
pub use value::{IndexValue, IndexValueReader, READERS, reader_for};
