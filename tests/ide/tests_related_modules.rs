//! Module, component and dependency relations.

use crate::helpers::concept_helpers::*;
use crate::helpers::source_fixtures::SHARED_MODULE;
use dagger_concepts::ConceptKind;
use dagger_concepts::ide::Relation;
use dagger_concepts::index::IndexStore;
use rstest::rstest;

// =============================================================================
// INDEXED (REVERSE) RELATIONS
// =============================================================================

#[test]
fn test_module_included_in_components_subcomponents_and_modules() {
    let analysis = analysis_from_sources(&SHARED_MODULE);
    let result = related(&analysis, "core.NetworkModule");

    assert_eq!(
        edge_pairs(&result),
        vec![
            ("Modules included".to_string(), "core.HttpModule".to_string()),
            ("Included in components".to_string(), "app.AppComponent".to_string()),
            ("Included in subcomponents".to_string(), "app.FeatureComponent".to_string()),
            ("Included in modules".to_string(), "app.ApiModule".to_string()),
        ]
    );
}

#[test]
fn test_component_including_module_shows_on_module() {
    // Every component naming a module in `modules` appears on that module.
    let analysis = analysis_from_sources(&[
        (
            "a/First.java",
            "package a; @dagger.Component(modules = Shared.class) interface First {}",
        ),
        (
            "a/Second.kt",
            "package a\n@dagger.Component(modules = [Shared::class, Other::class])\ninterface Second",
        ),
        ("a/Shared.kt", "package a\n@dagger.Module\nobject Shared"),
        ("a/Other.kt", "package a\n@dagger.Module\nobject Other"),
    ]);

    let shared = related(&analysis, "a.Shared");
    assert_eq!(
        targets(&shared, Relation::INCLUDED_IN_COMPONENTS.label),
        vec!["a.First", "a.Second"]
    );

    let other = related(&analysis, "a.Other");
    assert_eq!(targets(&other, Relation::INCLUDED_IN_COMPONENTS.label), vec!["a.Second"]);
}

#[test]
fn test_component_dependencies_both_directions() {
    let analysis = analysis_from_sources(&SHARED_MODULE);

    let app = related(&analysis, "app.AppComponent");
    assert_eq!(
        targets(&app, Relation::MODULES_INCLUDED.label),
        vec!["core.NetworkModule"]
    );
    assert_eq!(
        targets(&app, Relation::COMPONENT_DEPENDENCIES.label),
        vec!["app.CoreComponent"]
    );

    let core = related(&analysis, "app.CoreComponent");
    assert_eq!(
        targets(&core, Relation::DEPENDENT_COMPONENTS.label),
        vec!["app.AppComponent"]
    );
    assert_eq!(core.edges().len(), 1);
    assert_eq!(core.edges()[0].action_id, "navigate.to.dependent.components");
}

#[test]
fn test_edges_carry_action_ids() {
    let analysis = analysis_from_sources(&SHARED_MODULE);
    let result = related(&analysis, "core.NetworkModule");

    let actions: Vec<&str> = result.edges().iter().map(|e| e.action_id).collect();
    assert_eq!(
        actions,
        vec![
            "navigate.to.included.modules",
            "navigate.to.components.that.include",
            "navigate.to.subcomponents.that.include",
            "navigate.to.modules.that.include",
        ]
    );
}

// =============================================================================
// ARGUMENT FORMS
// =============================================================================

#[test]
fn test_empty_modules_array_yields_no_module_edges() {
    let mut host = host_from_sources(&[
        (
            "a/Empty.java",
            "package a; @dagger.Component(modules = {}) public interface Empty {}",
        ),
        ("a/Unused.java", "package a; @dagger.Module class Unused {}"),
    ]);
    let analysis = host.analysis();

    let result = related(&analysis, "a.Empty");
    assert!(result.edges().is_empty());
    assert!(targets(&related(&analysis, "a.Unused"), Relation::INCLUDED_IN_COMPONENTS.label).is_empty());

    host.remove_file("a/Empty.java");
    assert_eq!(host.index().record_count(), 0);
}

#[rstest]
#[case::java_single("a/C.java", "package a; @dagger.Component(modules = SingleModule.class) interface C {}")]
#[case::java_array("a/C.java", "package a; @dagger.Component(modules = {SingleModule.class}) interface C {}")]
#[case::kotlin_bare("a/C.kt", "package a\n@dagger.Component(modules = SingleModule::class)\ninterface C")]
#[case::kotlin_collection("a/C.kt", "package a\n@dagger.Component(modules = [SingleModule::class])\ninterface C")]
#[case::kotlin_array_of("a/C.kt", "package a\n@dagger.Component(modules = arrayOf(SingleModule::class))\ninterface C")]
fn test_single_and_array_forms_produce_identical_records(
    #[case] path: &str,
    #[case] source: &str,
) {
    let host = host_from_sources(&[
        (path, source),
        ("a/SingleModule.java", "package a; @dagger.Module class SingleModule {}"),
    ]);

    let records = host.index().get("SingleModule");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source_fq_name().as_ref(), "a.C");
    assert_eq!(
        records[0].data_type(),
        dagger_concepts::RelationDataType::ComponentWithModule
    );

    let analysis = host.analysis();
    element(&analysis, "a.SingleModule", ConceptKind::Module);
    assert_eq!(
        targets(&related(&analysis, "a.SingleModule"), Relation::INCLUDED_IN_COMPONENTS.label),
        vec!["a.C"]
    );
}

// =============================================================================
// RE-INDEXING
// =============================================================================

#[test]
fn test_editing_a_component_supersedes_its_records() {
    let mut host = host_from_sources(&[
        (
            "a/C.java",
            "package a; @dagger.Component(modules = Old.class) interface C {}",
        ),
        ("a/Old.java", "package a; @dagger.Module class Old {}"),
        ("a/New.java", "package a; @dagger.Module class New {}"),
    ]);
    let before = host.analysis();

    host.set_file_content(
        "a/C.java",
        "package a; @dagger.Component(modules = New.class) interface C {}",
    )
    .unwrap();
    let after = host.analysis();

    assert!(host.index().get("Old").is_empty());
    assert!(targets(&related(&after, "a.Old"), Relation::INCLUDED_IN_COMPONENTS.label).is_empty());
    assert_eq!(
        targets(&related(&after, "a.New"), Relation::INCLUDED_IN_COMPONENTS.label),
        vec!["a.C"]
    );

    // The earlier snapshot still answers from the state it was taken at.
    assert_eq!(
        targets(&related(&before, "a.Old"), Relation::INCLUDED_IN_COMPONENTS.label),
        vec!["a.C"]
    );
}

#[test]
fn test_self_inclusion_is_kept_as_written() {
    let analysis = analysis_from_sources(&[(
        "a/Loop.java",
        "package a; @dagger.Module(includes = Loop.class) class Loop {}",
    )]);

    let result = related(&analysis, "a.Loop");
    assert_eq!(
        edge_pairs(&result),
        vec![
            ("Modules included".to_string(), "a.Loop".to_string()),
            ("Included in modules".to_string(), "a.Loop".to_string()),
        ]
    );
}
