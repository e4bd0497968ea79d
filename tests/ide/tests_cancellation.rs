//! Cancellation and concurrent queries.

use crate::helpers::concept_helpers::*;
use crate::helpers::source_fixtures::{SHARED_MODULE, TWO_HOP};
use dagger_concepts::concepts::DAGGER_IDENTIFIERS;
use dagger_concepts::ide::{RelatedElements, RelatedOptions, related_elements};
use dagger_concepts::project::{ProjectModel, SearchScope, SymbolLookup};
use dagger_concepts::{ConceptKind, Declaration};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;

/// Fires `cancel` once `limit` lookups have been answered.
struct CancellingLookup<'a> {
    inner: &'a ProjectModel,
    cancel: &'a CancellationToken,
    limit: usize,
    calls: AtomicUsize,
}

impl SymbolLookup for CancellingLookup<'_> {
    fn resolve(&self, qualified_name: &str, scope: SearchScope) -> Option<Declaration> {
        let result = self.inner.resolve(qualified_name, scope);
        if self.calls.fetch_add(1, Ordering::SeqCst) + 1 >= self.limit {
            self.cancel.cancel();
        }
        result
    }
}

#[test]
fn test_pre_cancelled_query_returns_cancelled() {
    let analysis = analysis_from_sources(&SHARED_MODULE);
    let element = element(&analysis, "core.NetworkModule", ConceptKind::Module);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = analysis.related_elements(&element, &cancel);
    assert!(result.is_cancelled());
    assert_eq!(result, RelatedElements::Cancelled(Vec::new()));
}

#[test]
fn test_cancelled_mid_query_keeps_partial_edges() {
    let analysis = analysis_from_sources(&[
        (
            "a/App.java",
            "package a; @dagger.Component(modules = Other.class, dependencies = Core.class) interface App {}",
        ),
        ("a/Other.java", "package a; @dagger.Module class Other {}"),
        ("a/Core.java", "package a; @dagger.Component interface Core {}"),
    ]);
    let app = element(&analysis, "a.App", ConceptKind::Component);
    let cancel = CancellationToken::new();
    let lookup = CancellingLookup {
        inner: analysis.project(),
        cancel: &cancel,
        limit: 1,
        calls: AtomicUsize::new(0),
    };

    let result = related_elements(
        &app,
        &lookup,
        analysis.index(),
        &DAGGER_IDENTIFIERS,
        &RelatedOptions::default(),
        &cancel,
    );

    assert!(result.is_cancelled());
    assert_eq!(
        edge_pairs(&result),
        vec![("Modules included".to_string(), "a.Other".to_string())]
    );
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);

    // The same query with a fresh token completes.
    let complete = analysis.related_elements(&app, &CancellationToken::new());
    assert!(!complete.is_cancelled());
    assert_eq!(complete.edges().len(), 2);
}

#[test]
fn test_cancellation_is_observed_during_indexed_search() {
    let analysis = analysis_from_sources(&SHARED_MODULE);
    let module = element(&analysis, "core.NetworkModule", ConceptKind::Module);
    let cancel = CancellationToken::new();
    // One lookup for the include, then cancel while the first indexed
    // candidate is being resolved. That candidate still finishes.
    let lookup = CancellingLookup {
        inner: analysis.project(),
        cancel: &cancel,
        limit: 2,
        calls: AtomicUsize::new(0),
    };

    let result = related_elements(
        &module,
        &lookup,
        analysis.index(),
        &DAGGER_IDENTIFIERS,
        &RelatedOptions::default(),
        &cancel,
    );

    assert!(result.is_cancelled());
    assert_eq!(
        edge_pairs(&result),
        vec![
            ("Modules included".to_string(), "core.HttpModule".to_string()),
            ("Included in components".to_string(), "app.AppComponent".to_string()),
        ]
    );
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_concurrent_queries_on_shared_snapshot() {
    let analysis = analysis_from_sources(&TWO_HOP);
    let names = [
        "shop.ShopComponent",
        "shop.CheckoutModule",
        "shop.CheckoutComponent",
        "shop.PaymentModule",
    ];
    let expected: Vec<_> = names.iter().map(|name| related(&analysis, name)).collect();

    let results: Vec<Vec<RelatedElements>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let analysis = analysis.clone();
                scope.spawn(move || {
                    names
                        .iter()
                        .map(|name| related(&analysis, name))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for result in results {
        assert_eq!(result, expected);
    }
}

#[test]
fn test_cancelling_one_query_does_not_affect_another() {
    let analysis = analysis_from_sources(&TWO_HOP);
    let subcomponent = element(&analysis, "shop.CheckoutComponent", ConceptKind::Subcomponent);

    let cancelled = CancellationToken::new();
    cancelled.cancel();
    let live = CancellationToken::new();

    assert!(analysis.related_elements(&subcomponent, &cancelled).is_cancelled());
    let result = analysis.related_elements(&subcomponent, &live);
    assert!(!result.is_cancelled());
    assert_eq!(result.edges().len(), 2);
}
