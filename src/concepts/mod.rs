//! Dagger concepts: kinds, identification and registration.

mod concept;
mod element;
mod identify;

pub use concept::{DAGGER_CONCEPT, DaggerConcept};
pub use element::{ConceptElement, ConceptKind};
pub use identify::{
    DAGGER_IDENTIFIERS, DaggerElementIdentifiers, JavaIdentifier, KotlinIdentifier, identify,
};
