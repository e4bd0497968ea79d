//! # dagger-concepts
//!
//! Indexing and relation resolution for Dagger dependency-injection concepts
//! (Components, Subcomponents and Modules) across Java and Kotlin sources.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Related-element queries, AnalysisHost-style façade
//!   ↓
//! project   → Project symbol lookup (qualified name → declaration)
//!   ↓
//! concepts  → Concept kinds, element identification, registration
//!   ↓
//! index     → Concept registry, index values, indexer, index store
//!   ↓
//! syntax    → Declaration wrappers for Java and Kotlin, header reader
//!   ↓
//! base      → Primitives (FileId, qualified names, annotation names)
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → index → concepts → project → ide)
// ============================================================================

/// Foundation types: FileId, qualified names, source syntax tags
pub mod base;

/// Declaration wrappers: Java and Kotlin class models, header reader
pub mod syntax;

/// Sparse inverted index keyed by simple class names
pub mod index;

/// Dagger concept kinds and element identification
pub mod concepts;

/// Project symbol lookup
pub mod project;

/// IDE features: related Dagger elements
pub mod ide;

// Re-export foundation types
pub use base::{FileId, QualifiedName, SourceSyntax};

pub use concepts::{ConceptElement, ConceptKind, identify};
pub use ide::{Analysis, ConceptHost, RelatedEdge, RelatedElements, RelatedOptions};
pub use index::{IndexValue, RelationDataType};
pub use project::{Origin, SearchScope};
pub use syntax::Declaration;
