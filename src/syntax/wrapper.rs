//! The declaration boundary the indexer and resolver consume.
//!
//! Front ends expose class-like declarations through [`DeclarationWrapper`]
//! and their annotations through [`AnnotationView`]. Both syntaxes must
//! flatten single class literals and arrays of class literals into the same
//! list, since the index keys and the exact-type filter are built from it.

use crate::base::QualifiedName;

/// One annotation on a declaration.
pub trait AnnotationView {
    /// Qualified name of the annotation class.
    fn qualified_name(&self) -> &str;

    /// Qualified names of the class literals passed to `argument`, in source
    /// order. Absent arguments and non-class values yield an empty list.
    fn argument_class_names(&self, argument: &str) -> Vec<QualifiedName>;
}

/// A class-like declaration (class, interface, object, enum).
pub trait DeclarationWrapper {
    fn qualified_name(&self) -> &QualifiedName;

    fn is_enum(&self) -> bool;

    /// All annotations whose qualified name equals `name`.
    fn annotations_by_name(&self, name: &str) -> Vec<&dyn AnnotationView>;

    fn has_annotation(&self, name: &str) -> bool {
        !self.annotations_by_name(name).is_empty()
    }

    /// Class names referenced by `argument` across every `annotation` on this
    /// declaration.
    fn annotation_argument_class_names(
        &self,
        annotation: &str,
        argument: &str,
    ) -> Vec<QualifiedName> {
        self.annotations_by_name(annotation)
            .into_iter()
            .flat_map(|a| a.argument_class_names(argument))
            .collect()
    }
}
