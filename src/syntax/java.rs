//! Java class model.
//!
//! Mirrors what a Java front end exposes: annotations carry attribute values
//! that are either a class object access (`Foo.class`), an array initializer
//! (`{Foo.class, Bar.class}`) or something else. Java lets a single-element
//! array argument drop the braces, so both shapes are read here.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::wrapper::{AnnotationView, DeclarationWrapper};
use crate::base::QualifiedName;

/// The kind of Java type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JavaClassKind {
    Class,
    Interface,
    Enum,
    /// `@interface`
    Annotation,
}

/// An annotation attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JavaMemberValue {
    /// `Foo.class`, resolved to the qualified name of `Foo`.
    ClassObject(QualifiedName),
    /// `{a, b, c}`
    ArrayInitializer(Vec<JavaMemberValue>),
    /// Any other expression, kept as source text.
    Other(String),
}

impl JavaMemberValue {
    pub fn class_object(name: &str) -> Self {
        Self::ClassObject(QualifiedName::from(name))
    }

    pub fn class_array<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self::ArrayInitializer(names.into_iter().map(Self::class_object).collect())
    }
}

/// An annotation applied to a Java class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaAnnotation {
    qualified_name: QualifiedName,
    /// Attribute name -> value, in source order. A lone positional value is
    /// stored as `value`.
    attributes: IndexMap<SmolStr, JavaMemberValue>,
}

impl JavaAnnotation {
    pub fn new(qualified_name: impl Into<QualifiedName>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Builder-style attribute insertion.
    pub fn with_attribute(mut self, name: &str, value: JavaMemberValue) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn set_attribute(&mut self, name: &str, value: JavaMemberValue) {
        self.attributes.insert(SmolStr::new(name), value);
    }

    pub fn find_attribute_value(&self, name: &str) -> Option<&JavaMemberValue> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &JavaMemberValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl AnnotationView for JavaAnnotation {
    fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    fn argument_class_names(&self, argument: &str) -> Vec<QualifiedName> {
        match self.find_attribute_value(argument) {
            Some(JavaMemberValue::ClassObject(name)) => vec![name.clone()],
            Some(JavaMemberValue::ArrayInitializer(items)) => items
                .iter()
                .filter_map(|item| match item {
                    JavaMemberValue::ClassObject(name) => Some(name.clone()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// A Java class, interface, enum or annotation type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaClass {
    qualified_name: QualifiedName,
    kind: JavaClassKind,
    annotations: Vec<JavaAnnotation>,
}

impl JavaClass {
    pub fn new(qualified_name: impl Into<QualifiedName>, kind: JavaClassKind) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind,
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: JavaAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn kind(&self) -> JavaClassKind {
        self.kind
    }

    pub fn annotations(&self) -> &[JavaAnnotation] {
        &self.annotations
    }

    /// First annotation with the given qualified name.
    pub fn annotation(&self, name: &str) -> Option<&JavaAnnotation> {
        self.annotations
            .iter()
            .find(|a| a.qualified_name.as_ref() == name)
    }
}

impl DeclarationWrapper for JavaClass {
    fn qualified_name(&self) -> &QualifiedName {
        &self.qualified_name
    }

    fn is_enum(&self) -> bool {
        self.kind == JavaClassKind::Enum
    }

    fn annotations_by_name(&self, name: &str) -> Vec<&dyn AnnotationView> {
        self.annotations
            .iter()
            .filter(|a| a.qualified_name.as_ref() == name)
            .map(|a| a as &dyn AnnotationView)
            .collect()
    }

    fn has_annotation(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }
}
