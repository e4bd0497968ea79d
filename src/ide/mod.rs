//! IDE features: related Dagger elements.
//!
//! The recommended way to use this module is through `ConceptHost`:
//!
//! ```ignore
//! use dagger_concepts::ide::ConceptHost;
//!
//! let mut host = ConceptHost::new();
//! host.set_file_content("AppComponent.java", source)?;
//!
//! let analysis = host.analysis();
//! let element = analysis.element("com.example.AppComponent").unwrap();
//! let related = analysis.related_elements(&element, &CancellationToken::new());
//! ```

mod analysis;
mod options;
mod related;

pub use analysis::{Analysis, ConceptHost};
pub use options::RelatedOptions;
pub use related::{RelatedEdge, RelatedElements, Relation, related_elements};
