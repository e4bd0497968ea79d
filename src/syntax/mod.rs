//! Declaration models for the two supported source syntaxes.
//!
//! Java and Kotlin classes are modelled separately, the way each front end
//! exposes them, and meet at [`DeclarationWrapper`]. The header reader turns
//! source text into these models.

mod declaration;
mod error;
pub mod java;
pub mod kotlin;
pub mod lexer;
mod reader;
mod wrapper;

pub use declaration::Declaration;
pub use error::SyntaxError;
pub use java::{JavaAnnotation, JavaClass, JavaClassKind, JavaMemberValue};
pub use kotlin::{KotlinClass, KotlinClassKind, KtAnnotationEntry, KtExpression, KtValueArgument};
pub use reader::{Import, ParsedFile, parse_file, parse_source};
pub use wrapper::{AnnotationView, DeclarationWrapper};
