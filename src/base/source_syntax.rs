//! Source syntax tags.

use std::fmt;
use std::path::Path;

/// The front end a declaration was read from.
///
/// The two syntaxes expose structurally different declaration shapes, so
/// anything that needs to look inside a declaration dispatches on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceSyntax {
    Java,
    Kotlin,
}

impl SourceSyntax {
    /// Detect the syntax from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "java" => Some(Self::Java),
            "kt" | "kts" => Some(Self::Kotlin),
            _ => None,
        }
    }

    /// Get the display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Java => "Java",
            Self::Kotlin => "Kotlin",
        }
    }
}

impl fmt::Display for SourceSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
