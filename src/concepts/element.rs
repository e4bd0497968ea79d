//! Concept kinds and identified concept elements.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::base::QualifiedName;
use crate::base::constants::{COMPONENT, MODULE, SUBCOMPONENT};
use crate::syntax::{Declaration, DeclarationWrapper};

/// The Dagger declaration kinds the engine models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConceptKind {
    Component,
    Subcomponent,
    Module,
}

impl ConceptKind {
    /// Identification priority order.
    pub const ALL: [Self; 3] = [Self::Component, Self::Subcomponent, Self::Module];

    /// Qualified name of the annotation that marks this kind.
    pub const fn annotation(self) -> &'static str {
        match self {
            Self::Component => COMPONENT,
            Self::Subcomponent => SUBCOMPONENT,
            Self::Module => MODULE,
        }
    }

    /// The kind an annotation marks, if it is one of the Dagger annotations.
    pub fn from_annotation(annotation: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.annotation() == annotation)
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Component => "Component",
            Self::Subcomponent => "Subcomponent",
            Self::Module => "Module",
        }
    }
}

impl fmt::Display for ConceptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A declaration known to play a Dagger role.
///
/// Equality is by kind and underlying declaration, whichever front end
/// produced it.
#[derive(Debug, Clone)]
pub struct ConceptElement {
    kind: ConceptKind,
    declaration: Declaration,
}

impl ConceptElement {
    pub fn new(kind: ConceptKind, declaration: Declaration) -> Self {
        Self { kind, declaration }
    }

    pub fn kind(&self) -> ConceptKind {
        self.kind
    }

    pub fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    pub fn qualified_name(&self) -> &QualifiedName {
        self.declaration.qualified_name()
    }

    pub fn wrapper(&self) -> &dyn DeclarationWrapper {
        self.declaration.wrapper()
    }
}

impl PartialEq for ConceptElement {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.declaration.same_declaration(&other.declaration)
    }
}

impl Eq for ConceptElement {}

impl Hash for ConceptElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.qualified_name().hash(state);
    }
}

impl fmt::Display for ConceptElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.qualified_name())
    }
}
