//! ConceptHost and Analysis: state management for Dagger queries.
//!
//! The `ConceptHost` owns the project model and the index and applies file
//! changes. `Analysis` is an immutable snapshot for querying: it shares the
//! host's state through `Arc`s, and the host copies on write, so a snapshot
//! never sees later changes and can be sent to other threads.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = ConceptHost::new();
//! host.set_file_content("di/AppComponent.java", source)?;
//!
//! let analysis = host.analysis();
//! let element = analysis.element("com.example.AppComponent").unwrap();
//! let related = analysis.related_elements(&element, &CancellationToken::new());
//! ```

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::options::RelatedOptions;
use super::related::{RelatedElements, related_elements};
use crate::base::FileId;
use crate::concepts::{ConceptElement, DAGGER_CONCEPT, DaggerConcept};
use crate::index::{self, InMemoryIndexStore, LoadReport};
use crate::project::{Origin, ProjectModel, SearchScope, SymbolLookup};
use crate::syntax::{Declaration, SyntaxError, parse_file};

/// Owns all mutable state.
///
/// Apply changes via `set_file_content()`, `add_declaration()` and
/// `remove_file()`, then take a snapshot via `analysis()`.
#[derive(Debug, Clone)]
pub struct ConceptHost {
    concept: DaggerConcept,
    project: Arc<ProjectModel>,
    index: Arc<InMemoryIndexStore>,
    /// Map from file path to FileId
    file_id_map: FxHashMap<String, FileId>,
    /// Reverse map from FileId to file path
    file_path_map: FxHashMap<FileId, String>,
    next_file_id: u32,
}

impl Default for ConceptHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ConceptHost {
    pub fn new() -> Self {
        Self::with_concept(DAGGER_CONCEPT)
    }

    pub fn with_concept(concept: DaggerConcept) -> Self {
        Self {
            concept,
            project: Arc::new(ProjectModel::new()),
            index: Arc::new(InMemoryIndexStore::new()),
            file_id_map: FxHashMap::default(),
            file_path_map: FxHashMap::default(),
            next_file_id: 0,
        }
    }

    // ==================== File changes ====================

    /// Parse a project source file and replace its declarations.
    pub fn set_file_content(&mut self, path: &str, content: &str) -> Result<FileId, SyntaxError> {
        self.set_source(path, content, Origin::Project)
    }

    /// Parse a library source file and replace its declarations.
    pub fn set_library_file_content(
        &mut self,
        path: &str,
        content: &str,
    ) -> Result<FileId, SyntaxError> {
        self.set_source(path, content, Origin::Library)
    }

    fn set_source(
        &mut self,
        path: &str,
        content: &str,
        origin: Origin,
    ) -> Result<FileId, SyntaxError> {
        let parsed = parse_file(Path::new(path), content)?;
        Ok(self.set_declarations(path, parsed.declarations, origin))
    }

    /// Parse many files in parallel, then apply them in order.
    ///
    /// Files that cannot be read are skipped and their errors returned.
    pub fn load_sources(&mut self, files: &[(&str, &str)], origin: Origin) -> Vec<SyntaxError> {
        let parsed: Vec<_> = files
            .par_iter()
            .map(|(path, content)| (*path, parse_file(Path::new(path), content)))
            .collect();

        let mut errors = Vec::new();
        for (path, result) in parsed {
            match result {
                Ok(file) => {
                    self.set_declarations(path, file.declarations, origin);
                }
                Err(err) => errors.push(err),
            }
        }
        errors
    }

    /// Replace everything declared in `path` with `declarations`.
    pub fn set_declarations(
        &mut self,
        path: &str,
        declarations: Vec<Declaration>,
        origin: Origin,
    ) -> FileId {
        let file = self.file_id_for(path);
        self.clear_file(file);

        let entries = self.concept.index_all(&declarations);
        let project = Arc::make_mut(&mut self.project);
        for declaration in declarations {
            project.insert(declaration, origin, file);
        }
        let index = Arc::make_mut(&mut self.index);
        for (source, entries) in entries {
            index.replace_source(&source, entries);
        }

        debug!("[HOST] {} ({}) now declares {} classes", path, file, project.declarations_in(file).count());
        file
    }

    /// Add one declaration to `path`, keeping what the file already declares.
    pub fn add_declaration(&mut self, declaration: Declaration, origin: Origin, path: &str) -> FileId {
        let file = self.file_id_for(path);
        let entries = self.concept.index(&declaration);
        let source = declaration.qualified_name().clone();
        Arc::make_mut(&mut self.project).insert(declaration, origin, file);
        Arc::make_mut(&mut self.index).replace_source(&source, entries);
        file
    }

    /// Remove a file and every index record its declarations wrote.
    pub fn remove_file(&mut self, path: &str) {
        if let Some(file) = self.file_id_map.remove(path) {
            self.clear_file(file);
            self.file_path_map.remove(&file);
        }
    }

    fn clear_file(&mut self, file: FileId) {
        if self.project.declarations_in(file).next().is_none() {
            return;
        }
        let removed = Arc::make_mut(&mut self.project).remove_file(file);
        let index = Arc::make_mut(&mut self.index);
        for name in &removed {
            index.remove_source(name);
        }
    }

    fn file_id_for(&mut self, path: &str) -> FileId {
        if let Some(&file) = self.file_id_map.get(path) {
            return file;
        }
        let file = FileId::new(self.next_file_id);
        self.next_file_id += 1;
        self.file_id_map.insert(path.to_string(), file);
        self.file_path_map.insert(file, path.to_string());
        file
    }

    // ==================== Index ====================

    /// Replace the index with a persisted one.
    ///
    /// Records pointing at declarations the project no longer has are kept
    /// and simply resolve to nothing at query time.
    pub fn load_index<R: Read>(&mut self, input: &mut R) -> index::Result<LoadReport> {
        let (store, report) = InMemoryIndexStore::load(input)?;
        self.index = Arc::new(store);
        Ok(report)
    }

    pub fn save_index<W: Write>(&self, out: &mut W) -> index::Result<()> {
        self.index.save(out)
    }

    /// Rebuild the index from every known declaration.
    pub fn rebuild_index(&mut self) {
        let declarations: Vec<Declaration> = self.project.declarations().cloned().collect();
        let mut store = InMemoryIndexStore::new();
        for (source, entries) in self.concept.index_all(&declarations) {
            store.replace_source(&source, entries);
        }
        debug!("[HOST] rebuilt index: {} records", store.record_count());
        self.index = Arc::new(store);
    }

    // ==================== Accessors ====================

    /// Get a consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis {
        Analysis {
            concept: self.concept,
            project: Arc::clone(&self.project),
            index: Arc::clone(&self.index),
        }
    }

    pub fn project(&self) -> &ProjectModel {
        &self.project
    }

    pub fn index(&self) -> &InMemoryIndexStore {
        &self.index
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.file_id_map.contains_key(path)
    }

    pub fn get_file_id(&self, path: &str) -> Option<FileId> {
        self.file_id_map.get(path).copied()
    }

    pub fn get_file_path(&self, file_id: FileId) -> Option<&str> {
        self.file_path_map.get(&file_id).map(|s| s.as_str())
    }

    pub fn file_count(&self) -> usize {
        self.file_id_map.len()
    }
}

/// An immutable snapshot of the host state.
///
/// Cheap to clone. Queries on one snapshot may run concurrently.
#[derive(Debug, Clone)]
pub struct Analysis {
    concept: DaggerConcept,
    project: Arc<ProjectModel>,
    index: Arc<InMemoryIndexStore>,
}

impl Analysis {
    /// Classify a declaration.
    pub fn identify(&self, declaration: &Declaration) -> Option<ConceptElement> {
        self.concept.identify(declaration)
    }

    /// Look up a declaration by qualified name, in project and libraries.
    pub fn declaration(&self, qualified_name: &str) -> Option<Declaration> {
        self.project
            .resolve(qualified_name, SearchScope::ProjectAndLibraries)
    }

    /// Look up and classify a declaration by qualified name.
    pub fn element(&self, qualified_name: &str) -> Option<ConceptElement> {
        self.identify(&self.declaration(qualified_name)?)
    }

    /// Elements related to `element`, with default options.
    pub fn related_elements(
        &self,
        element: &ConceptElement,
        cancel: &CancellationToken,
    ) -> RelatedElements {
        self.related_elements_with(element, &RelatedOptions::default(), cancel)
    }

    pub fn related_elements_with(
        &self,
        element: &ConceptElement,
        options: &RelatedOptions,
        cancel: &CancellationToken,
    ) -> RelatedElements {
        related_elements(
            element,
            self.project.as_ref(),
            self.index.as_ref(),
            self.concept.identifiers(),
            options,
            cancel,
        )
    }

    pub fn project(&self) -> &ProjectModel {
        &self.project
    }

    pub fn index(&self) -> &InMemoryIndexStore {
        &self.index
    }
}
