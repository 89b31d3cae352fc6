//! Error types for dependency resolution.
//!
//! Only structural misuse of the API surfaces as an error: a dependency
//! graph cannot be built over descriptors with blank or duplicate IDs, so
//! [`DependencyResolver::resolve`](crate::resolver::DependencyResolver::resolve)
//! rejects those before any graph work begins.
//!
//! Everything a well-formed input can produce - missing dependencies,
//! version mismatches, cycles - is reported as data on
//! [`Resolution`](crate::resolver::Resolution), never as an error. An
//! unparsable version constraint likewise degrades to "not satisfied"
//! instead of aborting resolution of the rest of the graph.

use thiserror::Error;

/// Structural errors raised before resolution starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolverError {
    /// A descriptor was supplied with an empty (or whitespace-only) plugin ID.
    #[error("plugin descriptor at input position {position} has an empty plugin ID")]
    EmptyPluginId {
        /// Zero-based position of the offending descriptor in the input.
        position: usize,
    },

    /// Two descriptors in the same input share a plugin ID.
    ///
    /// The resolver assumes at most one descriptor per ID; duplicates are a
    /// caller error, not something to silently merge.
    #[error("duplicate plugin ID '{plugin_id}' in descriptor collection")]
    DuplicatePluginId {
        /// The ID that appeared more than once.
        plugin_id: String,
    },
}
