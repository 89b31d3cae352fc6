//! Pluggable version comparison for dependency resolution.
//!
//! The resolver never interprets version or constraint strings itself; it
//! delegates to a [`VersionManager`], injected at construction time. This
//! keeps the graph algorithms independent of the versioning scheme - the
//! bundled [`DefaultVersionManager`] speaks semver ranges, and alternative
//! schemes (date-based versions, OSGi-style ranges) plug in by implementing
//! the same three operations.
//!
//! # Constraint syntax (default implementation)
//!
//! | Syntax | Meaning | Example |
//! |--------|---------|---------|
//! | `1.2.3` | Exact version, strict equality | `"2.0.0"` |
//! | `>=1.0.0` | Single comparator | also `>`, `<`, `<=`, `=` |
//! | `>=1.5.0 & <1.6.0` | All comparators must hold (AND) | range |
//! | `1.0.0 \| >=2.0.0` | Any alternative may hold (OR) | union |
//!
//! An absent constraint always satisfies. An unparsable constraint never
//! satisfies - resolution degrades instead of crashing.

use std::cmp::Ordering;

use anyhow::Result;

mod default;

pub use default::DefaultVersionManager;

/// Strategy for parsing versions and evaluating version constraints.
///
/// Implementations must be stateless (or internally synchronized): a single
/// [`DependencyResolver`](crate::resolver::DependencyResolver) may evaluate
/// constraints from concurrent resolve calls.
pub trait VersionManager {
    /// Whether `version` parses under this manager's versioning scheme.
    fn is_valid_version(&self, version: &str) -> bool;

    /// Whether `version` satisfies `constraint`.
    ///
    /// A blank constraint satisfies unconditionally. An unparsable
    /// constraint or version yields `false`, never a panic or error.
    fn satisfies(&self, version: &str, constraint: &str) -> bool;

    /// Order two version strings.
    ///
    /// Not used by resolution itself (ordering there is purely
    /// graph-driven); offered for callers that need to rank versions.
    ///
    /// # Errors
    ///
    /// Returns an error if either string does not parse as a version.
    fn compare(&self, a: &str, b: &str) -> Result<Ordering>;
}
