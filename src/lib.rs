//! pomver: in-place version surgery for Maven POM files
//!
//! A library for rewriting dependency, plugin, parent, project and property
//! versions inside `pom.xml` files without disturbing a single byte outside
//! the replaced text span.
//!
//! # Architecture
//!
//! All rewrite operations compile down to a single primitive: [`SpanEdit`], a
//! verified byte-span replacement inside the document buffer. Intelligence
//! lives in span acquisition: a pull cursor streams XML events over the
//! original bytes while a path stack and compiled scope patterns decide which
//! leaf element's text span gets bookmarked. Each public operation scans the
//! whole document from offset zero and commits at most one replacement.
//!
//! # Safety
//!
//! - Every edit verifies its expected before-text before applying
//! - A replacement is staged during the scan and applied only after it, so a
//!   parse error never leaves the buffer half-modified
//! - Atomic file persistence (tempfile + fsync + rename)
//! - Formatting, comments and attribute order outside the span are preserved
//!   byte-for-byte by construction
//!
//! # Example
//!
//! ```
//! use pomver::PomRewriter;
//!
//! let pom = "<project><dependencies>\
//!     <dependency><groupId>g</groupId><artifactId>a</artifactId>\
//!     <version>1.0</version></dependency>\
//!     </dependencies></project>";
//!
//! let mut rewriter = PomRewriter::parse(pom)?;
//! assert!(rewriter.set_dependency_version("g", "a", "1.0", "2.0")?);
//! assert!(rewriter.as_str().contains("<version>2.0</version>"));
//! # Ok::<(), pomver::PomError>(())
//! ```

pub mod edit;
pub mod pom;

// Re-exports
pub use edit::{atomic_write, EditError, EditResult, EditVerification, SpanEdit};
pub use pom::{
    associated_properties, child_modules, remove_missing_modules, ArtifactAssociation,
    ArtifactCoords, PomError, PomRewriter, PropertyAssociations, Project,
    APACHE_MAVEN_PLUGINS_GROUP_ID,
};
