//! plugdep - version-aware dependency resolution for plugin systems.
//!
//! Given a collection of plugin descriptors - each with a unique ID, an
//! optional semantic version, and a raw comma-separated dependency string -
//! one call to [`DependencyResolver::resolve`] determines:
//!
//! - which declared dependencies do not exist among the known plugins,
//! - which existing dependencies fail their declared version constraint,
//! - whether the dependency graph contains a cycle,
//! - and, when the graph is acyclic, a load order in which every plugin
//!   appears after everything it depends on.
//!
//! All four outcomes are reported as data on an immutable [`Resolution`]
//! value. Missing dependencies, version mismatches, and cycles are expected
//! anomalies, not errors - the call only fails for structurally invalid
//! input such as a duplicate plugin ID (see [`ResolverError`]).
//!
//! # Architecture
//!
//! - [`descriptor`] - [`PluginDescriptor`] input values and the
//!   [`DependencySpec`] parser for `id[@constraint]` entries
//! - [`version`] - the pluggable [`VersionManager`] comparison strategy and
//!   its semver-backed [`DefaultVersionManager`]
//! - [`resolver`] - the [`DependencyResolver`] orchestrator, edge
//!   validation, and the graph with combined cycle detection and
//!   topological ordering
//! - [`core`](crate::core) - error types
//!
//! Descriptor sourcing (manifest parsing, directory scanning) and what to do
//! with the result (refusing to load broken plugins, diagnostics display)
//! belong to the surrounding plugin-lifecycle manager, not to this crate.
//!
//! # Example
//!
//! ```rust
//! use plugdep::{DependencyResolver, PluginDescriptor};
//!
//! let plugins = vec![
//!     PluginDescriptor::new("editor").with_dependencies("syntax@>=1.0.0"),
//!     PluginDescriptor::new("syntax").with_version("1.2.0"),
//! ];
//!
//! let resolver = DependencyResolver::default();
//! let resolution = resolver.resolve(&plugins)?;
//!
//! assert!(!resolution.has_cyclic_dependency());
//! assert!(resolution.not_found_dependencies().is_empty());
//! assert!(resolution.wrong_version_dependencies().is_empty());
//! assert_eq!(resolution.sorted_plugins(), ["syntax", "editor"]);
//! # Ok::<(), plugdep::ResolverError>(())
//! ```
//!
//! # Concurrency
//!
//! A [`DependencyResolver`] holds no mutable state beyond its injected
//! version manager; every call threads its own bookkeeping, so one instance
//! can serve independent calls concurrently as long as the version manager
//! is itself stateless (the default is).

pub mod core;
pub mod descriptor;
pub mod resolver;
pub mod version;

pub use crate::core::ResolverError;
pub use descriptor::{DependencySpec, PluginDescriptor};
pub use resolver::{DependencyResolver, Resolution};
pub use version::{DefaultVersionManager, VersionManager};
