//! Exact-type filtering: shared simple names, enums, stale records and
//! search scope.

use crate::helpers::concept_helpers::*;
use crate::helpers::source_fixtures::NAME_COLLISION;
use dagger_concepts::ConceptKind;
use dagger_concepts::ide::{ConceptHost, Relation, RelatedOptions};
use dagger_concepts::index::IndexStore;
use rstest::rstest;
use std::io::Cursor;
use tokio_util::sync::CancellationToken;

// =============================================================================
// SHARED SIMPLE NAMES
// =============================================================================

#[test]
fn test_included_module_sees_its_component() {
    let analysis = analysis_from_sources(&NAME_COLLISION);
    let result = related(&analysis, "pkgA.Foo");

    assert_eq!(
        edge_pairs(&result),
        vec![("Included in components".to_string(), "app.AppComponent".to_string())]
    );
}

#[test]
fn test_same_simple_name_module_gets_no_edges() {
    let analysis = analysis_from_sources(&NAME_COLLISION);
    element(&analysis, "pkgB.Foo", ConceptKind::Module);

    // Both modules share the key "Foo".
    assert_eq!(analysis.index().get("Foo").len(), 1);

    let result = related(&analysis, "pkgB.Foo");
    assert!(result.edges().is_empty(), "spurious edges: {:?}", edge_pairs(&result));
}

#[test]
fn test_plain_class_with_shared_name_is_not_an_element() {
    let analysis = analysis_from_sources(&NAME_COLLISION);

    assert!(analysis.declaration("pkgC.Foo").is_some());
    assert!(analysis.element("pkgC.Foo").is_none());
}

#[test]
fn test_component_named_like_module_is_rejected_by_kind() {
    // `b.Target` is a component that happens to share the key of a module.
    let analysis = analysis_from_sources(&[
        (
            "a/Target.java",
            "package a; @dagger.Module class Target {}",
        ),
        (
            "b/Target.java",
            "package b; @dagger.Component(dependencies = a.Target.class) interface Target {}",
        ),
    ]);

    // The dependency names a module, so it is not a component dependency.
    let component = related(&analysis, "b.Target");
    assert!(component.edges().is_empty());

    let module = related(&analysis, "a.Target");
    assert!(module.edges().is_empty());
}

// =============================================================================
// ENUMS
// =============================================================================

#[rstest]
#[case::java("a/Mode.java", "package a; @dagger.Module enum Mode { ON, OFF }")]
#[case::kotlin("a/Mode.kt", "package a\n@dagger.Component\nenum class Mode { ON, OFF }")]
fn test_annotated_enum_is_never_an_element(#[case] path: &str, #[case] source: &str) {
    let analysis = analysis_from_sources(&[
        (path, source),
        (
            "a/App.java",
            "package a; @dagger.Component(modules = Mode.class) interface App {}",
        ),
    ]);

    assert!(analysis.declaration("a.Mode").is_some());
    assert!(analysis.element("a.Mode").is_none());

    let app = related(&analysis, "a.App");
    assert!(targets(&app, Relation::MODULES_INCLUDED.label).is_empty());
}

// =============================================================================
// STALE RECORDS
// =============================================================================

#[test]
fn test_records_from_deleted_sources_are_ignored() {
    let original = host_from_sources(&NAME_COLLISION);
    let mut saved = Vec::new();
    original.save_index(&mut saved).unwrap();

    // Same project without the component, but with the old index loaded.
    let mut host = ConceptHost::new();
    host.set_file_content("pkgA/Foo.java", NAME_COLLISION[1].1).unwrap();
    host.load_index(&mut Cursor::new(saved)).unwrap();
    assert_eq!(host.index().get("Foo").len(), 1);

    let result = related(&host.analysis(), "pkgA.Foo");
    assert!(result.edges().is_empty());
}

#[test]
fn test_records_the_source_no_longer_backs_are_ignored() {
    let original = host_from_sources(&NAME_COLLISION);
    let mut saved = Vec::new();
    original.save_index(&mut saved).unwrap();

    let mut host = host_from_sources(&NAME_COLLISION);
    host.set_file_content(
        "app/AppComponent.java",
        "package app; @dagger.Component(modules = {}) public interface AppComponent {}",
    )
    .unwrap();
    host.load_index(&mut Cursor::new(saved)).unwrap();

    let result = related(&host.analysis(), "pkgA.Foo");
    assert!(result.edges().is_empty());
}

// =============================================================================
// SEARCH SCOPE
// =============================================================================

fn mixed_origin_host() -> ConceptHost {
    let mut host = ConceptHost::new();
    host.set_file_content(
        "app/AppComponent.java",
        "package app; @dagger.Component(modules = lib.LibModule.class) interface AppComponent {}",
    )
    .unwrap();
    host.set_file_content("app/AppModule.java", "package app; @dagger.Module class AppModule {}")
        .unwrap();
    host.set_library_file_content("lib/LibModule.java", "package lib; @dagger.Module class LibModule {}")
        .unwrap();
    host.set_library_file_content(
        "lib/LibComponent.java",
        "package lib; @dagger.Component(modules = app.AppModule.class) interface LibComponent {}",
    )
    .unwrap();
    host
}

#[test]
fn test_default_scope_includes_libraries() {
    let analysis = mixed_origin_host().analysis();

    assert_eq!(
        targets(&related(&analysis, "app.AppComponent"), Relation::MODULES_INCLUDED.label),
        vec!["lib.LibModule"]
    );
    assert_eq!(
        targets(&related(&analysis, "app.AppModule"), Relation::INCLUDED_IN_COMPONENTS.label),
        vec!["lib.LibComponent"]
    );
}

#[test]
fn test_project_scope_excludes_libraries() {
    let analysis = mixed_origin_host().analysis();
    let options = RelatedOptions::project_only();
    let cancel = CancellationToken::new();

    let component = element(&analysis, "app.AppComponent", ConceptKind::Component);
    let result = analysis.related_elements_with(&component, &options, &cancel);
    assert_eq!(result, dagger_concepts::RelatedElements::Complete(Vec::new()));

    let module = element(&analysis, "app.AppModule", ConceptKind::Module);
    let result = analysis.related_elements_with(&module, &options, &cancel);
    assert!(result.edges().is_empty());
}

#[test]
fn test_direct_and_indexed_can_be_disabled() {
    let analysis = analysis_from_sources(&NAME_COLLISION);
    let cancel = CancellationToken::new();
    let component = element(&analysis, "app.AppComponent", ConceptKind::Component);
    let module = element(&analysis, "pkgA.Foo", ConceptKind::Module);

    let direct_only = RelatedOptions {
        include_indexed: false,
        ..RelatedOptions::default()
    };
    assert_eq!(
        analysis.related_elements_with(&component, &direct_only, &cancel).edges().len(),
        1
    );
    assert!(analysis
        .related_elements_with(&module, &direct_only, &cancel)
        .edges()
        .is_empty());

    let indexed_only = RelatedOptions {
        include_direct: false,
        ..RelatedOptions::default()
    };
    assert!(analysis
        .related_elements_with(&component, &indexed_only, &cancel)
        .edges()
        .is_empty());
    assert_eq!(
        analysis.related_elements_with(&module, &indexed_only, &cancel).edges().len(),
        1
    );
}
