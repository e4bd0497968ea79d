//! Qualified-name helpers.
//!
//! Class names are dot-separated (`com.example.CoffeeShop`, nested classes as
//! `com.example.Outer.Inner`). The index buckets records by the last segment
//! only, so everything that builds or queries keys goes through here.

use smol_str::SmolStr;
use std::sync::Arc;

/// A fully qualified class name - cheap to clone (just Arc increment).
pub type QualifiedName = Arc<str>;

/// Last dot-separated segment of a qualified name.
///
/// A name without dots is its own simple name.
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Everything before the last dot, or `""` for a name in the default package.
pub fn package_name(qualified: &str) -> &str {
    qualified
        .rsplit_once('.')
        .map(|(package, _)| package)
        .unwrap_or("")
}

/// Index keys under which references to `qualified` may have been recorded.
///
/// The first key is always the simple name. Binary nested names
/// (`Outer$Inner`) additionally yield the segment after the last `$`.
pub fn index_key_variants(qualified: &str) -> Vec<SmolStr> {
    let simple = simple_name(qualified);
    let mut keys = vec![SmolStr::new(simple)];
    if let Some((_, inner)) = simple.rsplit_once('$') {
        if !inner.is_empty() && inner != simple {
            keys.push(SmolStr::new(inner));
        }
    }
    keys
}
