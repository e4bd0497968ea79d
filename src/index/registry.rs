//! The concept registry: which annotation argument encodes each relation.
//!
//! A process-wide constant table indexed by [`RelationDataType`] id. The
//! const check below fails the build unless every data type has exactly one
//! entry at its own position, so [`registry_entry`] cannot miss.

use super::data_type::RelationDataType;
use crate::base::constants::{
    ARG_DEPENDENCIES, ARG_INCLUDES, ARG_MODULES, ARG_SUBCOMPONENTS, COMPONENT, MODULE,
    SUBCOMPONENT,
};

/// Where one relation data type is written in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    pub data_type: RelationDataType,
    /// Qualified name of the annotation carrying the relation.
    pub annotation: &'static str,
    /// Name of the annotation argument listing the referenced classes.
    pub argument: &'static str,
}

const ENTRIES: [RegistryEntry; RelationDataType::COUNT] = [
    RegistryEntry {
        data_type: RelationDataType::ComponentWithModule,
        annotation: COMPONENT,
        argument: ARG_MODULES,
    },
    RegistryEntry {
        data_type: RelationDataType::ComponentWithDependency,
        annotation: COMPONENT,
        argument: ARG_DEPENDENCIES,
    },
    RegistryEntry {
        data_type: RelationDataType::SubcomponentWithModule,
        annotation: SUBCOMPONENT,
        argument: ARG_MODULES,
    },
    RegistryEntry {
        data_type: RelationDataType::ModuleWithInclude,
        annotation: MODULE,
        argument: ARG_INCLUDES,
    },
    RegistryEntry {
        data_type: RelationDataType::ModuleWithSubcomponent,
        annotation: MODULE,
        argument: ARG_SUBCOMPONENTS,
    },
];

const _: () = {
    let mut i = 0;
    while i < ENTRIES.len() {
        assert!(ENTRIES[i].data_type as usize == i);
        assert!(RelationDataType::ALL[i] as usize == i);
        i += 1;
    }
};

/// The registry, one entry per [`RelationDataType`] in id order.
pub static CONCEPT_REGISTRY: [RegistryEntry; RelationDataType::COUNT] = ENTRIES;

pub fn registry_entry(data_type: RelationDataType) -> &'static RegistryEntry {
    &CONCEPT_REGISTRY[usize::from(data_type.id())]
}
