//! Helpers for scanning `crate::` imports per source layer.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Top-level modules of the crate, in dependency order.
pub const LAYERS: [&str; 6] = ["base", "syntax", "index", "concepts", "project", "ide"];

/// Every `.rs` file under `dir`.
pub fn rust_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "rs"))
        .collect()
}

pub fn read_required_file(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read {}: {}", path.display(), err))
}

/// Layers referenced through `crate::<layer>` on a code line (comments are
/// ignored, so doc links do not count).
pub fn referenced_layers(line: &str) -> Vec<&'static str> {
    let code = line.trim_start();
    if code.starts_with("//") {
        return Vec::new();
    }
    LAYERS
        .iter()
        .copied()
        .filter(|layer| {
            let needle = format!("crate::{layer}");
            code.match_indices(&needle).any(|(at, _)| {
                !code[at + needle.len()..].starts_with(|c: char| c.is_alphanumeric() || c == '_')
            })
        })
        .collect()
}

/// `file:line: crate::<layer>` for every reference from `layer` to a layer
/// outside `allowed`.
pub fn collect_layer_violations(dir: &Path, allowed: &[&str], layer: &str) -> Vec<String> {
    let mut violations = Vec::new();
    for file in rust_files(dir) {
        let content = read_required_file(&file);
        for (number, line) in content.lines().enumerate() {
            for target in referenced_layers(line) {
                if target != layer && !allowed.contains(&target) {
                    violations.push(format!(
                        "  {}:{}: crate::{}",
                        file.display(),
                        number + 1,
                        target
                    ));
                }
            }
        }
    }
    violations
}

pub fn format_violation_list<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| format!("  - {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
