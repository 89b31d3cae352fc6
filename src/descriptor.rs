//! Plugin descriptors and dependency specification parsing.
//!
//! A [`PluginDescriptor`] is the resolver's input unit: a unique ID, an
//! optional semantic version, and a raw dependency declaration string of
//! comma-separated `id[@constraint]` entries, e.g.
//! `"syntax@>=1.0.0, themes, lsp@2.1.0"`. Descriptors usually arrive from a
//! plugin manifest, so the types derive serde traits; how manifests are
//! located and read is the caller's concern.
//!
//! [`DependencySpec::parse_list`] turns the raw string into structured
//! `(plugin ID, optional constraint)` pairs, preserving declaration order.
//! Constraint strings are carried through unparsed - interpreting them is
//! the job of the [`VersionManager`](crate::version::VersionManager).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Describes one loadable plugin as supplied by the caller.
///
/// Immutable once handed to the resolver. A missing `version` is treated as
/// `0.0.0` during constraint checks.
///
/// # Examples
///
/// ```rust
/// use plugdep::PluginDescriptor;
///
/// let plugin = PluginDescriptor::new("editor")
///     .with_version("1.4.2")
///     .with_dependencies("syntax@>=1.0.0, themes");
///
/// assert_eq!(plugin.plugin_id, "editor");
/// assert_eq!(plugin.dependency_specs().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Unique plugin identifier, non-empty.
    pub plugin_id: String,

    /// Semantic version of the plugin, if declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Raw comma-separated dependency declaration, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<String>,
}

impl PluginDescriptor {
    /// Create a descriptor with no version and no dependencies.
    pub fn new(plugin_id: impl Into<String>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            version: None,
            dependencies: None,
        }
    }

    /// Set the declared version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the raw dependency declaration string.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: impl Into<String>) -> Self {
        self.dependencies = Some(dependencies.into());
        self
    }

    /// Parse this descriptor's raw dependency string into specs,
    /// in declaration order. Empty or absent input yields an empty list.
    pub fn dependency_specs(&self) -> Vec<DependencySpec> {
        self.dependencies.as_deref().map_or_else(Vec::new, DependencySpec::parse_list)
    }
}

impl fmt::Display for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.plugin_id, version),
            None => write!(f, "{}", self.plugin_id),
        }
    }
}

/// One parsed dependency declaration: a target plugin ID and an optional
/// version constraint.
///
/// A spec with no constraint is satisfied by any version of the target, so
/// long as the target exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencySpec {
    /// ID of the plugin being depended on.
    pub plugin_id: String,

    /// Raw constraint string (everything after the first `@`), untrimmed of
    /// its semantics - evaluated by the version manager.
    pub constraint: Option<String>,
}

impl DependencySpec {
    /// Parse a raw comma-separated dependency string into specs.
    ///
    /// Each entry is split on its first `@`: the left half is the plugin ID,
    /// the right half (if present) the constraint. Both halves are trimmed.
    /// Blank entries are ignored; entries whose ID trims to empty are
    /// malformed and skipped with a warning, never merged into a neighbor.
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .filter_map(|entry| match entry.parse() {
                Ok(spec) => Some(spec),
                Err(err) => {
                    warn!("skipping malformed dependency entry: {err}");
                    None
                }
            })
            .collect()
    }
}

impl FromStr for DependencySpec {
    type Err = MalformedDependency;

    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let (id, constraint) = match entry.split_once('@') {
            Some((id, constraint)) => (id.trim(), Some(constraint.trim())),
            None => (entry.trim(), None),
        };
        if id.is_empty() {
            return Err(MalformedDependency {
                entry: entry.to_string(),
            });
        }
        Ok(Self {
            plugin_id: id.to_string(),
            constraint: constraint.filter(|c| !c.is_empty()).map(str::to_string),
        })
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.constraint {
            Some(constraint) => write!(f, "{}@{}", self.plugin_id, constraint),
            None => write!(f, "{}", self.plugin_id),
        }
    }
}

/// A dependency entry with an empty plugin ID, e.g. `"@1.0.0"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("dependency entry '{entry}' has an empty plugin ID")]
pub struct MalformedDependency {
    /// The offending raw entry.
    pub entry: String,
}
