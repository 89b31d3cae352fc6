//! Semver-backed default implementation of [`VersionManager`].

use std::cmp::Ordering;

use anyhow::{Context, Result};
use semver::{Version, VersionReq};

use super::VersionManager;

/// Evaluates constraints as semver range expressions.
///
/// A constraint is a `|`-separated list of alternatives (OR); within one
/// alternative, `&` joins comparators that must all hold (AND). An
/// alternative that is a bare version (`"2.0.0"`) requires strict equality,
/// not the caret semantics Cargo gives bare requirements. Versions may carry
/// a leading `v`/`V` prefix, as Git tags commonly do.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultVersionManager;

impl DefaultVersionManager {
    /// Create the default semver manager.
    pub fn new() -> Self {
        Self
    }

    fn parse_version(raw: &str) -> Option<Version> {
        let trimmed = raw.trim();
        let bare = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);
        Version::parse(bare).ok()
    }

    fn alternative_satisfied(version: &Version, alternative: &str) -> bool {
        let alternative = alternative.trim();
        if alternative.is_empty() {
            return false;
        }

        // Bare version means exact match; VersionReq would read it as caret.
        if let Some(exact) = Self::parse_version(alternative) {
            return *version == exact;
        }

        let requirement = alternative.split('&').map(str::trim).collect::<Vec<_>>().join(", ");
        match VersionReq::parse(&requirement) {
            Ok(req) => req.matches(version),
            Err(_) => false,
        }
    }
}

impl VersionManager for DefaultVersionManager {
    fn is_valid_version(&self, version: &str) -> bool {
        Self::parse_version(version).is_some()
    }

    fn satisfies(&self, version: &str, constraint: &str) -> bool {
        let constraint = constraint.trim();
        if constraint.is_empty() {
            return true;
        }
        let Some(version) = Self::parse_version(version) else {
            return false;
        };
        constraint.split('|').any(|alternative| Self::alternative_satisfied(&version, alternative))
    }

    fn compare(&self, a: &str, b: &str) -> Result<Ordering> {
        let left = Self::parse_version(a).with_context(|| format!("invalid version '{a}'"))?;
        let right = Self::parse_version(b).with_context(|| format!("invalid version '{b}'"))?;
        Ok(left.cmp(&right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_versions() {
        let manager = DefaultVersionManager::new();
        assert!(manager.is_valid_version("1.0.0"));
        assert!(manager.is_valid_version("v1.0.0"));
        assert!(manager.is_valid_version("1.2.3-alpha.1"));
        assert!(!manager.is_valid_version("1.0"));
        assert!(!manager.is_valid_version("not-a-version"));
    }

    #[test]
    fn blank_constraint_always_satisfies() {
        let manager = DefaultVersionManager::new();
        assert!(manager.satisfies("1.0.0", ""));
        assert!(manager.satisfies("1.0.0", "   "));
    }

    #[test]
    fn bare_version_requires_exact_match() {
        let manager = DefaultVersionManager::new();
        assert!(manager.satisfies("2.0.0", "2.0.0"));
        // Not caret semantics: 2.1.0 would satisfy "^2.0.0" but not "2.0.0".
        assert!(!manager.satisfies("2.1.0", "2.0.0"));
    }

    #[test]
    fn comparator_ranges_with_and() {
        let manager = DefaultVersionManager::new();
        assert!(manager.satisfies("1.5.3", ">=1.5.0 & <1.6.0"));
        assert!(!manager.satisfies("1.4.0", ">=1.5.0 & <1.6.0"));
        assert!(!manager.satisfies("1.6.0", ">=1.5.0 & <1.6.0"));
    }

    #[test]
    fn single_comparators() {
        let manager = DefaultVersionManager::new();
        assert!(manager.satisfies("2.0.0", ">=1.0.0"));
        assert!(manager.satisfies("0.9.0", "<1.0.0"));
        assert!(manager.satisfies("1.0.0", "=1.0.0"));
        assert!(!manager.satisfies("1.0.0", ">1.0.0"));
    }

    #[test]
    fn or_alternatives() {
        let manager = DefaultVersionManager::new();
        let constraint = "1.0.0 | >=2.0.0";
        assert!(manager.satisfies("1.0.0", constraint));
        assert!(manager.satisfies("2.3.0", constraint));
        assert!(!manager.satisfies("1.5.0", constraint));
    }

    #[test]
    fn caret_and_tilde_still_work() {
        let manager = DefaultVersionManager::new();
        assert!(manager.satisfies("1.9.0", "^1.0.0"));
        assert!(!manager.satisfies("2.0.0", "^1.0.0"));
        assert!(manager.satisfies("1.2.9", "~1.2.0"));
        assert!(!manager.satisfies("1.3.0", "~1.2.0"));
    }

    #[test]
    fn unparsable_inputs_degrade_to_unsatisfied() {
        let manager = DefaultVersionManager::new();
        assert!(!manager.satisfies("1.0.0", ">=x.y.z"));
        assert!(!manager.satisfies("garbage", ">=1.0.0"));
    }

    #[test]
    fn tolerates_v_prefix_on_versions() {
        let manager = DefaultVersionManager::new();
        assert!(manager.satisfies("v1.5.0", ">=1.0.0"));
        assert!(manager.satisfies("V2.0.0", "2.0.0"));
    }

    #[test]
    fn compares_versions() {
        let manager = DefaultVersionManager::new();
        assert_eq!(manager.compare("1.0.0", "2.0.0").unwrap(), Ordering::Less);
        assert_eq!(manager.compare("2.0.0", "2.0.0").unwrap(), Ordering::Equal);
        assert_eq!(manager.compare("v2.1.0", "2.0.9").unwrap(), Ordering::Greater);
        assert!(manager.compare("bogus", "1.0.0").is_err());
    }
}
