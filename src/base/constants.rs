//! Dagger annotation names.

/// `@dagger.Component`
pub const COMPONENT: &str = "dagger.Component";
/// `@dagger.Subcomponent`
pub const SUBCOMPONENT: &str = "dagger.Subcomponent";
/// `@dagger.Module`
pub const MODULE: &str = "dagger.Module";

/// Annotation argument naming the modules of a component or subcomponent.
pub const ARG_MODULES: &str = "modules";
/// Annotation argument naming component dependencies.
pub const ARG_DEPENDENCIES: &str = "dependencies";
/// Annotation argument naming modules included by a module.
pub const ARG_INCLUDES: &str = "includes";
/// Annotation argument naming subcomponents installed by a module.
pub const ARG_SUBCOMPONENTS: &str = "subcomponents";

/// Declared parameter order of an annotation, used to name positional
/// Kotlin arguments. Unknown annotations expose a single `value` parameter.
pub fn annotation_parameters(annotation: &str) -> &'static [&'static str] {
    match annotation {
        COMPONENT => &[ARG_MODULES, ARG_DEPENDENCIES],
        SUBCOMPONENT => &[ARG_MODULES],
        MODULE => &[ARG_INCLUDES, ARG_SUBCOMPONENTS],
        _ => &["value"],
    }
}
