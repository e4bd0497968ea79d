//! The project symbol lookup boundary.

use crate::syntax::Declaration;

/// Where a declaration comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Origin {
    /// Source the user edits.
    #[default]
    Project,
    /// A dependency's sources.
    Library,
}

/// Which declarations a lookup may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchScope {
    Project,
    #[default]
    ProjectAndLibraries,
}

impl SearchScope {
    pub fn includes(self, origin: Origin) -> bool {
        match self {
            Self::Project => origin == Origin::Project,
            Self::ProjectAndLibraries => true,
        }
    }
}

/// Resolves a qualified class name to its declaration.
///
/// Returns `None` when nothing in scope has that name, which is the normal
/// outcome for a stale index record. Ambiguity is not modelled.
pub trait SymbolLookup {
    fn resolve(&self, qualified_name: &str, scope: SearchScope) -> Option<Declaration>;
}
