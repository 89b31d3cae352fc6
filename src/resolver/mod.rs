//! Dependency resolution: validation, cycle detection, and load ordering.
//!
//! [`DependencyResolver`] is the crate's entry point. It is constructed once
//! with a [`VersionManager`] and reused; each [`resolve`] call is a pure
//! function of its descriptor collection, flowing one way:
//!
//! ```text
//! descriptors -> parsed specs -> graph -> anomaly lists + order -> Resolution
//! ```
//!
//! Missing dependencies, failed version constraints, and cycles are expected
//! outcomes reported on the [`Resolution`]; the call itself only errors for
//! structurally invalid input (blank or duplicate plugin IDs). The anomaly
//! lists are computed even when the graph is cyclic.
//!
//! [`resolve`]: DependencyResolver::resolve

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::core::ResolverError;
use crate::descriptor::{DependencySpec, PluginDescriptor};
use crate::version::{DefaultVersionManager, VersionManager};

mod dependency_graph;

use dependency_graph::DependencyGraph;

/// Version assumed for plugins that declare none.
const UNVERSIONED: &str = "0.0.0";

/// Resolves dependency declarations across a plugin set.
///
/// Generic over the injected version-comparison strategy; defaults to the
/// semver-range [`DefaultVersionManager`]. Holds no other state, so a single
/// instance may serve concurrent, independent resolve calls.
pub struct DependencyResolver<V = DefaultVersionManager> {
    version_manager: V,
}

impl Default for DependencyResolver {
    fn default() -> Self {
        Self::new(DefaultVersionManager::new())
    }
}

impl<V: VersionManager> DependencyResolver<V> {
    /// Create a resolver around the given version manager.
    pub fn new(version_manager: V) -> Self {
        Self { version_manager }
    }

    /// Resolve a descriptor collection.
    ///
    /// Runs three phases: structural checks (fail fast, before any graph
    /// work), per-edge validation against known plugins and their versions,
    /// then one graph traversal for cycle detection and load ordering. Input
    /// is never mutated.
    ///
    /// # Errors
    ///
    /// [`ResolverError::EmptyPluginId`] if a descriptor has a blank ID,
    /// [`ResolverError::DuplicatePluginId`] if two descriptors share one.
    pub fn resolve(&self, descriptors: &[PluginDescriptor]) -> Result<Resolution, ResolverError> {
        let known = index_descriptors(descriptors)?;

        let parsed: Vec<(&PluginDescriptor, Vec<DependencySpec>)> =
            descriptors.iter().map(|descriptor| (descriptor, descriptor.dependency_specs())).collect();

        let (not_found, wrong_version) = self.validate_edges(&known, &parsed);

        let mut graph = DependencyGraph::new();
        for descriptor in descriptors {
            graph.add_plugin(&descriptor.plugin_id);
        }
        for (descriptor, specs) in &parsed {
            for spec in specs {
                graph.add_dependency(&descriptor.plugin_id, &spec.plugin_id);
            }
        }
        let outcome = graph.sort();

        debug!(
            plugins = descriptors.len(),
            not_found = not_found.len(),
            wrong_version = wrong_version.len(),
            cyclic = outcome.cyclic,
            "dependency resolution complete"
        );

        Ok(Resolution {
            sorted_plugins: outcome.sorted,
            not_found_dependencies: not_found,
            wrong_version_dependencies: wrong_version,
            cyclic_dependency: outcome.cyclic,
        })
    }

    /// Classify every dependency edge, walking plugins in input order and
    /// each plugin's specs in declaration order. Repeated missing IDs from
    /// different declaring plugins each surface; no deduplication.
    fn validate_edges(
        &self,
        known: &HashMap<&str, &PluginDescriptor>,
        parsed: &[(&PluginDescriptor, Vec<DependencySpec>)],
    ) -> (Vec<String>, Vec<String>) {
        let mut not_found = Vec::new();
        let mut wrong_version = Vec::new();

        for (descriptor, specs) in parsed {
            for spec in specs {
                let Some(target) = known.get(spec.plugin_id.as_str()) else {
                    debug!(
                        plugin = %descriptor.plugin_id,
                        dependency = %spec.plugin_id,
                        "dependency not found"
                    );
                    not_found.push(spec.plugin_id.clone());
                    continue;
                };
                if let Some(constraint) = &spec.constraint {
                    let version = target.version.as_deref().unwrap_or(UNVERSIONED);
                    if !self.version_manager.satisfies(version, constraint) {
                        debug!(
                            plugin = %descriptor.plugin_id,
                            dependency = %spec.plugin_id,
                            version,
                            constraint = %constraint,
                            "dependency version constraint not satisfied"
                        );
                        wrong_version.push(spec.plugin_id.clone());
                    }
                }
            }
        }

        (not_found, wrong_version)
    }
}

/// Build the ID-to-descriptor lookup, rejecting structural misuse.
fn index_descriptors(
    descriptors: &[PluginDescriptor],
) -> Result<HashMap<&str, &PluginDescriptor>, ResolverError> {
    let mut known = HashMap::with_capacity(descriptors.len());
    for (position, descriptor) in descriptors.iter().enumerate() {
        if descriptor.plugin_id.trim().is_empty() {
            return Err(ResolverError::EmptyPluginId { position });
        }
        if known.insert(descriptor.plugin_id.as_str(), descriptor).is_some() {
            return Err(ResolverError::DuplicatePluginId {
                plugin_id: descriptor.plugin_id.clone(),
            });
        }
    }
    Ok(known)
}

/// Immutable outcome of one resolve call.
///
/// Produced fresh per call, with no aliasing into caller-owned structures.
/// When [`has_cyclic_dependency`](Self::has_cyclic_dependency) is true,
/// [`sorted_plugins`](Self::sorted_plugins) is empty - an ordering over a
/// cyclic graph would be meaningless, and cycle detection takes precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    sorted_plugins: Vec<String>,
    not_found_dependencies: Vec<String>,
    wrong_version_dependencies: Vec<String>,
    cyclic_dependency: bool,
}

impl Resolution {
    /// Plugin IDs in load order: every plugin after all plugins it depends
    /// on. A permutation of the input IDs when the graph is acyclic; empty
    /// when it is not.
    pub fn sorted_plugins(&self) -> &[String] {
        &self.sorted_plugins
    }

    /// Declared dependency IDs with no matching plugin, once per declaring
    /// plugin, in declaration order.
    pub fn not_found_dependencies(&self) -> &[String] {
        &self.not_found_dependencies
    }

    /// Dependency IDs whose plugin exists but fails its version constraint.
    pub fn wrong_version_dependencies(&self) -> &[String] {
        &self.wrong_version_dependencies
    }

    /// Whether the dependency graph contains a cycle.
    pub fn has_cyclic_dependency(&self) -> bool {
        self.cyclic_dependency
    }

    /// True when nothing stands in the way of loading: no missing
    /// dependencies, no version mismatches, no cycle.
    pub fn is_clean(&self) -> bool {
        !self.cyclic_dependency
            && self.not_found_dependencies.is_empty()
            && self.wrong_version_dependencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> DependencyResolver {
        DependencyResolver::default()
    }

    #[test]
    fn duplicate_plugin_id_fails_fast() {
        let plugins = vec![
            PluginDescriptor::new("p1"),
            PluginDescriptor::new("p1").with_version("2.0.0"),
        ];
        let err = resolver().resolve(&plugins).unwrap_err();
        assert_eq!(err, ResolverError::DuplicatePluginId { plugin_id: "p1".to_string() });
    }

    #[test]
    fn blank_plugin_id_fails_fast() {
        let plugins = vec![PluginDescriptor::new("p1"), PluginDescriptor::new("   ")];
        let err = resolver().resolve(&plugins).unwrap_err();
        assert_eq!(err, ResolverError::EmptyPluginId { position: 1 });
    }

    #[test]
    fn unversioned_dependency_counts_as_0_0_0() {
        // p2 declares no version, so "p2@>=1.0.0" cannot be satisfied...
        let plugins = vec![
            PluginDescriptor::new("p1").with_dependencies("p2@>=1.0.0"),
            PluginDescriptor::new("p2"),
        ];
        let resolution = resolver().resolve(&plugins).unwrap();
        assert_eq!(resolution.wrong_version_dependencies(), ["p2"]);

        // ...but "p2@0.0.0" is.
        let plugins = vec![
            PluginDescriptor::new("p1").with_dependencies("p2@0.0.0"),
            PluginDescriptor::new("p2"),
        ];
        let resolution = resolver().resolve(&plugins).unwrap();
        assert!(resolution.wrong_version_dependencies().is_empty());
    }

    #[test]
    fn missing_ids_repeat_per_declaring_plugin() {
        let plugins = vec![
            PluginDescriptor::new("p1").with_dependencies("ghost"),
            PluginDescriptor::new("p2").with_dependencies("ghost, other"),
        ];
        let resolution = resolver().resolve(&plugins).unwrap();
        assert_eq!(resolution.not_found_dependencies(), ["ghost", "ghost", "other"]);
    }

    #[test]
    fn missing_dependency_does_not_break_sorting() {
        let plugins = vec![
            PluginDescriptor::new("p1").with_dependencies("ghost, p2"),
            PluginDescriptor::new("p2"),
        ];
        let resolution = resolver().resolve(&plugins).unwrap();
        assert!(!resolution.has_cyclic_dependency());
        assert_eq!(resolution.sorted_plugins(), ["p2", "p1"]);
        assert_eq!(resolution.not_found_dependencies(), ["ghost"]);
    }

    #[test]
    fn anomaly_lists_survive_a_cycle() {
        let plugins = vec![
            PluginDescriptor::new("p1").with_version("1.0.0").with_dependencies("p2, ghost"),
            PluginDescriptor::new("p2").with_version("1.0.0").with_dependencies("p1@>=2.0.0"),
        ];
        let resolution = resolver().resolve(&plugins).unwrap();
        assert!(resolution.has_cyclic_dependency());
        assert!(resolution.sorted_plugins().is_empty());
        assert_eq!(resolution.not_found_dependencies(), ["ghost"]);
        assert_eq!(resolution.wrong_version_dependencies(), ["p1"]);
    }

    #[test]
    fn unparsable_constraint_degrades_to_wrong_version() {
        let plugins = vec![
            PluginDescriptor::new("p1").with_dependencies("p2@not a constraint"),
            PluginDescriptor::new("p2").with_version("1.0.0"),
        ];
        let resolution = resolver().resolve(&plugins).unwrap();
        assert_eq!(resolution.wrong_version_dependencies(), ["p2"]);
        assert!(!resolution.has_cyclic_dependency());
    }

    #[test]
    fn clean_resolution_reports_clean() {
        let plugins = vec![PluginDescriptor::new("p1")];
        assert!(resolver().resolve(&plugins).unwrap().is_clean());

        let plugins = vec![PluginDescriptor::new("p1").with_dependencies("ghost")];
        assert!(!resolver().resolve(&plugins).unwrap().is_clean());
    }

    #[test]
    fn input_is_not_mutated() {
        let plugins = vec![
            PluginDescriptor::new("p1").with_dependencies("p2"),
            PluginDescriptor::new("p2"),
        ];
        let before = plugins.clone();
        resolver().resolve(&plugins).unwrap();
        assert_eq!(plugins, before);
    }
}
