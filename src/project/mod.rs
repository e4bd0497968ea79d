//! Project symbol lookup.
//!
//! The resolver never reads files itself. It asks a [`SymbolLookup`] for the
//! declaration behind a qualified name, within a [`SearchScope`].

mod lookup;
mod model;

pub use lookup::{Origin, SearchScope, SymbolLookup};
pub use model::ProjectModel;
