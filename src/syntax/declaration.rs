//! Tagged declaration variant over both supported syntaxes.

use std::sync::Arc;

use super::java::JavaClass;
use super::kotlin::KotlinClass;
use super::wrapper::DeclarationWrapper;
use crate::base::{QualifiedName, SourceSyntax};

/// A resolved class-like declaration from either front end.
///
/// Cheap to clone; the underlying model is shared.
#[derive(Debug, Clone)]
pub enum Declaration {
    Java(Arc<JavaClass>),
    Kotlin(Arc<KotlinClass>),
}

impl Declaration {
    pub fn syntax(&self) -> SourceSyntax {
        match self {
            Self::Java(_) => SourceSyntax::Java,
            Self::Kotlin(_) => SourceSyntax::Kotlin,
        }
    }

    /// View through the common wrapper boundary.
    pub fn wrapper(&self) -> &dyn DeclarationWrapper {
        match self {
            Self::Java(class) => &**class,
            Self::Kotlin(class) => &**class,
        }
    }

    pub fn qualified_name(&self) -> &QualifiedName {
        self.wrapper().qualified_name()
    }

    /// Whether both denote the same underlying declaration, whichever front
    /// end produced them.
    pub fn same_declaration(&self, other: &Declaration) -> bool {
        self.qualified_name() == other.qualified_name()
    }
}

impl From<JavaClass> for Declaration {
    fn from(class: JavaClass) -> Self {
        Self::Java(Arc::new(class))
    }
}

impl From<KotlinClass> for Declaration {
    fn from(class: KotlinClass) -> Self {
        Self::Kotlin(Arc::new(class))
    }
}
