//! Foundation types for the Dagger concept engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Identifier of a loaded source file
//! - [`QualifiedName`] - Cheap-to-clone fully qualified class name
//! - [`SourceSyntax`] - Which front end produced a declaration
//! - Dagger annotation names
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod file_id;
mod name;
mod source_syntax;

pub use file_id::FileId;
pub use name::{QualifiedName, index_key_variants, package_name, simple_name};
pub use source_syntax::SourceSyntax;
