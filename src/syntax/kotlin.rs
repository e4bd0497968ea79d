//! Kotlin class model.
//!
//! Kotlin annotation entries carry value arguments, optionally named. Array
//! parameters are written as collection literals (`[Foo::class]`) or
//! `arrayOf(Foo::class)`; a bare `Foo::class` is tolerated as well.
//! Positional arguments are named by the annotation's declared parameter
//! order.

use smol_str::SmolStr;

use super::wrapper::{AnnotationView, DeclarationWrapper};
use crate::base::QualifiedName;
use crate::base::constants::annotation_parameters;

/// The kind of Kotlin class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KotlinClassKind {
    Class,
    Interface,
    Object,
    EnumClass,
    AnnotationClass,
}

/// An annotation argument expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KtExpression {
    /// `Foo::class`, resolved to the qualified name of `Foo`.
    ClassLiteral(QualifiedName),
    /// `[a, b]`
    CollectionLiteral(Vec<KtExpression>),
    /// `arrayOf(a, b)`
    ArrayOfCall(Vec<KtExpression>),
    /// Any other expression, kept as source text.
    Other(String),
}

impl KtExpression {
    pub fn class_literal(name: &str) -> Self {
        Self::ClassLiteral(QualifiedName::from(name))
    }

    pub fn class_list<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self::CollectionLiteral(names.into_iter().map(Self::class_literal).collect())
    }

    fn collect_class_names(&self, out: &mut Vec<QualifiedName>) {
        match self {
            Self::ClassLiteral(name) => out.push(name.clone()),
            Self::CollectionLiteral(items) | Self::ArrayOfCall(items) => {
                for item in items {
                    if let Self::ClassLiteral(name) = item {
                        out.push(name.clone());
                    }
                }
            }
            Self::Other(_) => {}
        }
    }
}

/// One value argument of an annotation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KtValueArgument {
    pub name: Option<SmolStr>,
    pub expression: KtExpression,
}

impl KtValueArgument {
    pub fn named(name: &str, expression: KtExpression) -> Self {
        Self {
            name: Some(SmolStr::new(name)),
            expression,
        }
    }

    pub fn positional(expression: KtExpression) -> Self {
        Self {
            name: None,
            expression,
        }
    }
}

/// An annotation entry on a Kotlin declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KtAnnotationEntry {
    fq_name: QualifiedName,
    value_arguments: Vec<KtValueArgument>,
}

impl KtAnnotationEntry {
    pub fn new(fq_name: impl Into<QualifiedName>) -> Self {
        Self {
            fq_name: fq_name.into(),
            value_arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, argument: KtValueArgument) -> Self {
        self.value_arguments.push(argument);
        self
    }

    pub fn value_arguments(&self) -> &[KtValueArgument] {
        &self.value_arguments
    }

    /// The expression bound to parameter `name`, named or positional.
    pub fn argument_expression(&self, name: &str) -> Option<&KtExpression> {
        if let Some(named) = self
            .value_arguments
            .iter()
            .find(|arg| arg.name.as_deref() == Some(name))
        {
            return Some(&named.expression);
        }

        let position = annotation_parameters(&self.fq_name)
            .iter()
            .position(|p| *p == name)?;
        self.value_arguments
            .iter()
            .take_while(|arg| arg.name.is_none())
            .nth(position)
            .map(|arg| &arg.expression)
    }
}

impl AnnotationView for KtAnnotationEntry {
    fn qualified_name(&self) -> &str {
        &self.fq_name
    }

    fn argument_class_names(&self, argument: &str) -> Vec<QualifiedName> {
        let mut names = Vec::new();
        if let Some(expression) = self.argument_expression(argument) {
            expression.collect_class_names(&mut names);
        }
        names
    }
}

/// A Kotlin class, interface, object, enum class or annotation class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KotlinClass {
    fq_name: QualifiedName,
    kind: KotlinClassKind,
    annotation_entries: Vec<KtAnnotationEntry>,
}

impl KotlinClass {
    pub fn new(fq_name: impl Into<QualifiedName>, kind: KotlinClassKind) -> Self {
        Self {
            fq_name: fq_name.into(),
            kind,
            annotation_entries: Vec::new(),
        }
    }

    pub fn with_annotation_entry(mut self, entry: KtAnnotationEntry) -> Self {
        self.annotation_entries.push(entry);
        self
    }

    pub fn kind(&self) -> KotlinClassKind {
        self.kind
    }

    pub fn annotation_entries(&self) -> &[KtAnnotationEntry] {
        &self.annotation_entries
    }
}

impl DeclarationWrapper for KotlinClass {
    fn qualified_name(&self) -> &QualifiedName {
        &self.fq_name
    }

    fn is_enum(&self) -> bool {
        self.kind == KotlinClassKind::EnumClass
    }

    fn annotations_by_name(&self, name: &str) -> Vec<&dyn AnnotationView> {
        self.annotation_entries
            .iter()
            .filter(|entry| entry.fq_name.as_ref() == name)
            .map(|entry| entry as &dyn AnnotationView)
            .collect()
    }
}
