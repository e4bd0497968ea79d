//! Related Dagger elements.
//!
//! Answers "which Dagger elements relate to this one" from two directions:
//!
//! - **direct**: classes named in the element's own annotation arguments,
//!   resolved and kept only when they carry the expected Dagger annotation
//! - **indexed**: declarations whose annotation arguments name this element,
//!   found through the simple-name index and confirmed by re-reading the
//!   candidate's argument for this element's exact qualified name
//!
//! Direct edges come first. Queries are fixed depth (at most two hops), so
//! cycles in the component graph need no special handling.

use rustc_hash::FxHashSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::options::RelatedOptions;
use crate::base::constants::{ARG_DEPENDENCIES, ARG_INCLUDES, ARG_MODULES, ARG_SUBCOMPONENTS};
use crate::base::{QualifiedName, index_key_variants};
use crate::concepts::{ConceptElement, ConceptKind, DaggerElementIdentifiers};
use crate::index::{IndexStore, RelationDataType, registry_entry};
use crate::project::{SearchScope, SymbolLookup};

// ============================================================================
// RESULT TYPES
// ============================================================================

/// How an edge is presented and which navigation action opens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relation {
    pub label: &'static str,
    pub action_id: &'static str,
}

impl Relation {
    pub const MODULES_INCLUDED: Self = Self {
        label: "Modules included",
        action_id: "navigate.to.included.modules",
    };
    pub const COMPONENT_DEPENDENCIES: Self = Self {
        label: "Component dependencies",
        action_id: "navigate.to.component.dependencies",
    };
    pub const SUBCOMPONENTS: Self = Self {
        label: "Subcomponents",
        action_id: "navigate.to.subcomponents",
    };
    pub const DEPENDENT_COMPONENTS: Self = Self {
        label: "Dependent components",
        action_id: "navigate.to.dependent.components",
    };
    pub const PARENT_COMPONENTS: Self = Self {
        label: "Parent components",
        action_id: "navigate.to.parent.components",
    };
    pub const INCLUDED_IN_COMPONENTS: Self = Self {
        label: "Included in components",
        action_id: "navigate.to.components.that.include",
    };
    pub const INCLUDED_IN_SUBCOMPONENTS: Self = Self {
        label: "Included in subcomponents",
        action_id: "navigate.to.subcomponents.that.include",
    };
    pub const INCLUDED_IN_MODULES: Self = Self {
        label: "Included in modules",
        action_id: "navigate.to.modules.that.include",
    };
}

/// A directed, labelled edge from the queried element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedEdge {
    pub target: ConceptElement,
    pub relation_label: &'static str,
    pub action_id: &'static str,
}

impl RelatedEdge {
    pub fn new(target: ConceptElement, relation: Relation) -> Self {
        Self {
            target,
            relation_label: relation.label,
            action_id: relation.action_id,
        }
    }
}

/// Result of a related-elements query.
///
/// `Cancelled` carries whatever edges were found before the token fired and
/// means "no answer yet", not "no relations".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelatedElements {
    Complete(Vec<RelatedEdge>),
    Cancelled(Vec<RelatedEdge>),
}

impl RelatedElements {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    pub fn edges(&self) -> &[RelatedEdge] {
        match self {
            Self::Complete(edges) | Self::Cancelled(edges) => edges,
        }
    }

    pub fn into_edges(self) -> Vec<RelatedEdge> {
        match self {
            Self::Complete(edges) | Self::Cancelled(edges) => edges,
        }
    }

    /// Edges carrying `label`, in result order.
    pub fn with_label<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a RelatedEdge> + 'a {
        self.edges().iter().filter(move |e| e.relation_label == label)
    }
}

// ============================================================================
// QUERY
// ============================================================================

/// Compute the elements related to `element`.
pub fn related_elements(
    element: &ConceptElement,
    lookup: &dyn SymbolLookup,
    store: &dyn IndexStore,
    identifiers: &DaggerElementIdentifiers,
    options: &RelatedOptions,
    cancel: &CancellationToken,
) -> RelatedElements {
    let mut search = RelatedSearch {
        lookup,
        store,
        identifiers,
        scope: options.scope,
        cancel,
        edges: Vec::new(),
        seen: FxHashSet::default(),
    };

    let outcome = search.run(element, options);
    debug!(
        "[RELATED] {}: {} edges{}",
        element,
        search.edges.len(),
        if outcome.is_err() { " (cancelled)" } else { "" }
    );

    match outcome {
        Ok(()) => RelatedElements::Complete(search.edges),
        Err(Cancelled) => RelatedElements::Cancelled(search.edges),
    }
}

/// The cancellation token fired.
#[derive(Debug, Clone, Copy)]
struct Cancelled;

type Step<T> = Result<T, Cancelled>;

struct RelatedSearch<'a> {
    lookup: &'a dyn SymbolLookup,
    store: &'a dyn IndexStore,
    identifiers: &'a DaggerElementIdentifiers,
    scope: SearchScope,
    cancel: &'a CancellationToken,
    edges: Vec<RelatedEdge>,
    seen: FxHashSet<(QualifiedName, &'static str)>,
}

impl RelatedSearch<'_> {
    fn run(&mut self, element: &ConceptElement, options: &RelatedOptions) -> Step<()> {
        if options.include_direct {
            self.direct(element)?;
        }
        if options.include_indexed {
            self.indexed(element)?;
        }
        Ok(())
    }

    fn check(&self) -> Step<()> {
        if self.cancel.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    fn push(&mut self, target: ConceptElement, relation: Relation) {
        if self
            .seen
            .insert((target.qualified_name().clone(), relation.label))
        {
            self.edges.push(RelatedEdge::new(target, relation));
        }
    }

    fn push_all(&mut self, targets: Vec<ConceptElement>, relation: Relation) {
        for target in targets {
            self.push(target, relation);
        }
    }

    // ------------------------------------------------------------------------
    // Direct edges
    // ------------------------------------------------------------------------

    fn direct(&mut self, element: &ConceptElement) -> Step<()> {
        let annotation = element.kind().annotation();
        match element.kind() {
            ConceptKind::Component | ConceptKind::Subcomponent => {
                let modules =
                    self.argument_targets(element, annotation, ARG_MODULES, ConceptKind::Module)?;
                self.push_all(modules.clone(), Relation::MODULES_INCLUDED);

                if element.kind() == ConceptKind::Component {
                    let dependencies = self.argument_targets(
                        element,
                        annotation,
                        ARG_DEPENDENCIES,
                        ConceptKind::Component,
                    )?;
                    self.push_all(dependencies, Relation::COMPONENT_DEPENDENCIES);
                }

                for module in &modules {
                    let subcomponents = self.argument_targets(
                        module,
                        ConceptKind::Module.annotation(),
                        ARG_SUBCOMPONENTS,
                        ConceptKind::Subcomponent,
                    )?;
                    self.push_all(subcomponents, Relation::SUBCOMPONENTS);
                }
            }
            ConceptKind::Module => {
                let includes =
                    self.argument_targets(element, annotation, ARG_INCLUDES, ConceptKind::Module)?;
                self.push_all(includes, Relation::MODULES_INCLUDED);

                let subcomponents = self.argument_targets(
                    element,
                    annotation,
                    ARG_SUBCOMPONENTS,
                    ConceptKind::Subcomponent,
                )?;
                self.push_all(subcomponents, Relation::SUBCOMPONENTS);
            }
        }
        Ok(())
    }

    /// Classes named by `element`'s `annotation(argument)` that identify as
    /// `expected`.
    fn argument_targets(
        &self,
        element: &ConceptElement,
        annotation: &str,
        argument: &str,
        expected: ConceptKind,
    ) -> Step<Vec<ConceptElement>> {
        let mut targets = Vec::new();
        for name in element
            .wrapper()
            .annotation_argument_class_names(annotation, argument)
        {
            self.check()?;
            let Some(declaration) = self.lookup.resolve(&name, self.scope) else {
                trace!("[RELATED] {}.{} -> {}: unresolved", element.qualified_name(), argument, name);
                continue;
            };
            match self.identifiers.identify(&declaration) {
                Some(target) if target.kind() == expected => {
                    if !targets.contains(&target) {
                        targets.push(target);
                    }
                }
                other => trace!(
                    "[RELATED] {}.{} -> {}: not a {} ({:?})",
                    element.qualified_name(),
                    argument,
                    name,
                    expected,
                    other.map(|e| e.kind())
                ),
            }
        }
        Ok(targets)
    }

    // ------------------------------------------------------------------------
    // Indexed edges
    // ------------------------------------------------------------------------

    fn indexed(&mut self, element: &ConceptElement) -> Step<()> {
        match element.kind() {
            ConceptKind::Component => {
                let dependents =
                    self.referencing(element, &[RelationDataType::ComponentWithDependency])?;
                self.push_all(dependents, Relation::DEPENDENT_COMPONENTS);
            }
            ConceptKind::Subcomponent => {
                // Parents are reached through the modules that install this
                // subcomponent; the modules themselves are not edges.
                let modules =
                    self.referencing(element, &[RelationDataType::ModuleWithSubcomponent])?;
                for module in &modules {
                    let parents = self.referencing(
                        module,
                        &[
                            RelationDataType::ComponentWithModule,
                            RelationDataType::SubcomponentWithModule,
                        ],
                    )?;
                    self.push_all(parents, Relation::PARENT_COMPONENTS);
                }
            }
            ConceptKind::Module => {
                let components =
                    self.referencing(element, &[RelationDataType::ComponentWithModule])?;
                self.push_all(components, Relation::INCLUDED_IN_COMPONENTS);

                let subcomponents =
                    self.referencing(element, &[RelationDataType::SubcomponentWithModule])?;
                self.push_all(subcomponents, Relation::INCLUDED_IN_SUBCOMPONENTS);

                let modules = self.referencing(element, &[RelationDataType::ModuleWithInclude])?;
                self.push_all(modules, Relation::INCLUDED_IN_MODULES);
            }
        }
        Ok(())
    }

    /// Elements whose annotation argument, for one of `data_types`, names
    /// `element` exactly.
    fn referencing(
        &self,
        element: &ConceptElement,
        data_types: &[RelationDataType],
    ) -> Step<Vec<ConceptElement>> {
        let target = element.qualified_name();
        let mut found = Vec::new();

        for key in index_key_variants(target) {
            self.check()?;
            for value in self.store.get(&key) {
                if !data_types.contains(&value.data_type()) {
                    continue;
                }
                self.check()?;

                let entry = registry_entry(value.data_type());
                let source = value.source_fq_name();
                let Some(declaration) = self.lookup.resolve(source, self.scope) else {
                    trace!("[RELATED] '{}' <- {}: stale record", key, source);
                    continue;
                };
                let Some(candidate) = self.identifiers.identify(&declaration) else {
                    trace!("[RELATED] '{}' <- {}: not a Dagger element", key, source);
                    continue;
                };
                if ConceptKind::from_annotation(entry.annotation) != Some(candidate.kind()) {
                    trace!(
                        "[RELATED] '{}' <- {}: is a {}, record is {}",
                        key,
                        source,
                        candidate.kind(),
                        value.data_type()
                    );
                    continue;
                }

                let referenced = candidate
                    .wrapper()
                    .annotation_argument_class_names(entry.annotation, entry.argument);
                if !referenced.iter().any(|name| name == target) {
                    trace!(
                        "[RELATED] '{}' <- {}: {} does not name {}",
                        key, source, entry.argument, target
                    );
                    continue;
                }

                if !found.contains(&candidate) {
                    found.push(candidate);
                }
            }
        }
        Ok(found)
    }
}
