//! Relation data types.

use std::fmt;

/// A directed, typed relation from one concept to the class it references
/// through an annotation argument.
///
/// The discriminant is the persisted data-type id and must never be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum RelationDataType {
    /// `@Component(modules = ...)`
    ComponentWithModule = 0,
    /// `@Component(dependencies = ...)`
    ComponentWithDependency = 1,
    /// `@Subcomponent(modules = ...)`
    SubcomponentWithModule = 2,
    /// `@Module(includes = ...)`
    ModuleWithInclude = 3,
    /// `@Module(subcomponents = ...)`
    ModuleWithSubcomponent = 4,
}

impl RelationDataType {
    pub const COUNT: usize = 5;

    /// Every data type, in id order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::ComponentWithModule,
        Self::ComponentWithDependency,
        Self::SubcomponentWithModule,
        Self::ModuleWithInclude,
        Self::ModuleWithSubcomponent,
    ];

    pub const fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::ComponentWithModule => "COMPONENT_WITH_MODULE",
            Self::ComponentWithDependency => "COMPONENT_WITH_DEPENDENCY",
            Self::SubcomponentWithModule => "SUBCOMPONENT_WITH_MODULE",
            Self::ModuleWithInclude => "MODULE_WITH_INCLUDE",
            Self::ModuleWithSubcomponent => "MODULE_WITH_SUBCOMPONENT",
        }
    }
}

impl fmt::Display for RelationDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
