//! Index persistence through the host.

use crate::helpers::concept_helpers::*;
use crate::helpers::source_fixtures::SHARED_MODULE;
use dagger_concepts::ide::{ConceptHost, Relation};
use dagger_concepts::index::{INDEX_MAGIC, IndexError, IndexStore};
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Seek, SeekFrom};

#[test]
fn test_saved_index_answers_queries_in_fresh_host() {
    let original = host_from_sources(&SHARED_MODULE);
    let mut file = tempfile::tempfile().unwrap();
    original.save_index(&mut BufWriter::new(&mut file)).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    // Declarations only; the index comes from disk.
    let mut host = ConceptHost::new();
    for (path, source) in SHARED_MODULE.iter() {
        host.set_file_content(path, source).unwrap();
    }
    let report = host.load_index(&mut BufReader::new(file)).unwrap();

    assert_eq!(report.loaded, original.index().record_count());
    assert_eq!(report.skipped, 0);
    assert_eq!(host.index().record_count(), original.index().record_count());

    let from_disk = related(&host.analysis(), "core.NetworkModule");
    let in_memory = related(&original.analysis(), "core.NetworkModule");
    assert_eq!(from_disk, in_memory);
}

#[test]
fn test_stale_record_after_reload_is_dropped_at_query_time() {
    let original = host_from_sources(&SHARED_MODULE);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dagger.idx");
    original
        .save_index(&mut BufWriter::new(File::create(&path).unwrap()))
        .unwrap();

    let without_api: Vec<_> = SHARED_MODULE
        .iter()
        .copied()
        .filter(|(path, _)| *path != "app/ApiModule.kt")
        .collect();
    let mut host = host_from_sources(&without_api);
    host.load_index(&mut BufReader::new(File::open(&path).unwrap()))
        .unwrap();

    let result = related(&host.analysis(), "core.NetworkModule");
    assert!(targets(&result, Relation::INCLUDED_IN_MODULES.label).is_empty());
    assert_eq!(
        targets(&result, Relation::INCLUDED_IN_COMPONENTS.label),
        vec!["app.AppComponent"]
    );
}

#[test]
fn test_failed_load_keeps_current_index() {
    let mut host = host_from_sources(&SHARED_MODULE);
    let before = host.index().record_count();

    let mut bytes = INDEX_MAGIC.to_vec();
    bytes.extend_from_slice(&[0, 99]);
    let err = host.load_index(&mut Cursor::new(bytes)).unwrap_err();

    assert!(matches!(
        err,
        IndexError::UnsupportedVersion { found: 99, .. }
    ));
    assert_eq!(host.index().record_count(), before);
    assert_eq!(host.index().get("NetworkModule").len(), 3);
}

#[test]
fn test_rebuild_after_load_drops_stale_records() {
    let original = host_from_sources(&SHARED_MODULE);
    let mut saved = Vec::new();
    original.save_index(&mut saved).unwrap();

    let mut host = host_from_sources(&SHARED_MODULE[..2]);
    host.load_index(&mut Cursor::new(saved)).unwrap();
    assert_eq!(host.index().get("NetworkModule").len(), 3);

    host.rebuild_index();
    assert!(host.index().get("NetworkModule").is_empty());
    assert_eq!(host.index().get("HttpModule").len(), 1);
}
