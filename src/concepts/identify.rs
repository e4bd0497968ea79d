//! Classifies declarations into concept elements.
//!
//! Each syntax gets its own small identification functions, registered in a
//! dispatch table keyed by the [`Declaration`] variant. Enums never identify,
//! whatever they are annotated with. Otherwise the first matching annotation
//! in Component, Subcomponent, Module order decides the kind.

use super::element::{ConceptElement, ConceptKind};
use crate::syntax::{Declaration, DeclarationWrapper, JavaClass, KotlinClass};

pub type JavaIdentifier = fn(&JavaClass) -> Option<ConceptKind>;
pub type KotlinIdentifier = fn(&KotlinClass) -> Option<ConceptKind>;

/// Per-syntax identification functions. The first function returning a kind
/// wins.
#[derive(Debug, Clone, Copy)]
pub struct DaggerElementIdentifiers {
    pub java: &'static [JavaIdentifier],
    pub kotlin: &'static [KotlinIdentifier],
}

impl DaggerElementIdentifiers {
    pub fn identify_kind(&self, declaration: &Declaration) -> Option<ConceptKind> {
        match declaration {
            Declaration::Java(class) => self.java.iter().find_map(|identify| identify(class)),
            Declaration::Kotlin(class) => self.kotlin.iter().find_map(|identify| identify(class)),
        }
    }

    pub fn identify(&self, declaration: &Declaration) -> Option<ConceptElement> {
        let kind = self.identify_kind(declaration)?;
        Some(ConceptElement::new(kind, declaration.clone()))
    }
}

pub static DAGGER_IDENTIFIERS: DaggerElementIdentifiers = DaggerElementIdentifiers {
    java: &[identify_java_class],
    kotlin: &[identify_kotlin_class],
};

fn identify_java_class(class: &JavaClass) -> Option<ConceptKind> {
    if class.is_enum() {
        return None;
    }
    ConceptKind::ALL
        .into_iter()
        .find(|kind| class.annotation(kind.annotation()).is_some())
}

fn identify_kotlin_class(class: &KotlinClass) -> Option<ConceptKind> {
    if class.is_enum() {
        return None;
    }
    ConceptKind::ALL
        .into_iter()
        .find(|kind| class.has_annotation(kind.annotation()))
}

/// Identify with the default dispatch table.
pub fn identify(declaration: &Declaration) -> Option<ConceptElement> {
    DAGGER_IDENTIFIERS.identify(declaration)
}
