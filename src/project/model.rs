//! In-memory project model: every known declaration by qualified name.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::lookup::{Origin, SearchScope, SymbolLookup};
use crate::base::{FileId, QualifiedName};
use crate::syntax::Declaration;

#[derive(Debug, Clone)]
struct DeclarationEntry {
    declaration: Declaration,
    origin: Origin,
    file: FileId,
}

/// Declarations by qualified name, with the file each came from.
///
/// A qualified name maps to at most one declaration; inserting a second one
/// replaces the first.
#[derive(Debug, Clone, Default)]
pub struct ProjectModel {
    declarations: FxHashMap<QualifiedName, DeclarationEntry>,
    files: FxHashMap<FileId, Vec<QualifiedName>>,
}

impl ProjectModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a declaration. Returns the declaration it replaced.
    pub fn insert(
        &mut self,
        declaration: Declaration,
        origin: Origin,
        file: FileId,
    ) -> Option<Declaration> {
        let name = declaration.qualified_name().clone();
        let previous = self.declarations.insert(
            name.clone(),
            DeclarationEntry {
                declaration,
                origin,
                file,
            },
        );
        if let Some(previous) = &previous {
            if previous.file != file {
                if let Some(names) = self.files.get_mut(&previous.file) {
                    names.retain(|n| *n != name);
                }
            }
        }
        let names = self.files.entry(file).or_default();
        if !names.contains(&name) {
            names.push(name);
        }
        previous.map(|entry| entry.declaration)
    }

    /// Remove every declaration that came from `file`. Returns their names.
    pub fn remove_file(&mut self, file: FileId) -> Vec<QualifiedName> {
        let names = self.files.remove(&file).unwrap_or_default();
        for name in &names {
            self.declarations.remove(name);
        }
        if !names.is_empty() {
            debug!("[PROJECT] removed {} declarations from {}", names.len(), file);
        }
        names
    }

    pub fn declaration(&self, qualified_name: &str) -> Option<&Declaration> {
        self.declarations.get(qualified_name).map(|e| &e.declaration)
    }

    pub fn origin(&self, qualified_name: &str) -> Option<Origin> {
        self.declarations.get(qualified_name).map(|e| e.origin)
    }

    pub fn file_of(&self, qualified_name: &str) -> Option<FileId> {
        self.declarations.get(qualified_name).map(|e| e.file)
    }

    /// Declarations from `file`, in insertion order.
    pub fn declarations_in(&self, file: FileId) -> impl Iterator<Item = &Declaration> {
        self.files
            .get(&file)
            .into_iter()
            .flatten()
            .filter_map(|name| self.declaration(name))
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values().map(|e| &e.declaration)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl SymbolLookup for ProjectModel {
    fn resolve(&self, qualified_name: &str, scope: SearchScope) -> Option<Declaration> {
        self.declarations
            .get(qualified_name)
            .filter(|entry| scope.includes(entry.origin))
            .map(|entry| entry.declaration.clone())
    }
}
