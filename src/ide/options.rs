//! Related-elements query options

use crate::project::SearchScope;

/// Options for a related-elements query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelatedOptions {
    /// Which declarations lookups may resolve to
    pub scope: SearchScope,
    /// Follow the element's own annotation arguments
    pub include_direct: bool,
    /// Search the index for elements that reference this one
    pub include_indexed: bool,
}

impl Default for RelatedOptions {
    fn default() -> Self {
        Self {
            scope: SearchScope::ProjectAndLibraries,
            include_direct: true,
            include_indexed: true,
        }
    }
}

impl RelatedOptions {
    /// Default options restricted to project sources
    pub fn project_only() -> Self {
        Self {
            scope: SearchScope::Project,
            ..Self::default()
        }
    }
}
