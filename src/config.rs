//! Guard and region configuration.
//!
//! Hosts declare which parts of the application are protected, and by what
//! requirement, with [`ProtectedRegions`]. [`GuardConfig`] holds the settings
//! shared by every guard, such as where unauthenticated visitors are sent.

use crate::gate::AccessGate;
use crate::guard::RouteGuard;
use crate::policy::GateRequirement;

/// Login path used when none is configured.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Settings shared by route guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    /// Unauthenticated entry point redirects are sent to
    pub login_path: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }
}

impl GuardConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the login path.
    pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
        self.login_path = login_path.into();
        self
    }
}

/// Per-region access requirements, keyed by path prefix.
///
/// The longest matching prefix decides the requirement for a path. Prefixes
/// match on segment boundaries: `/orders` covers `/orders` and
/// `/orders/42`, but not `/orders-archive`. Query strings and fragments are
/// ignored when matching. Paths no prefix covers are public.
///
/// # Examples
///
/// ```
/// use access_gate::{GateRequirement, ProtectedRegions, RequireVerified, Role};
///
/// let regions = ProtectedRegions::new()
///     .protect("/account", GateRequirement::new().require(RequireVerified(false)))
///     .protect("/catalog/manage", GateRequirement::role(Role::Supplier));
///
/// assert_eq!(
///     regions.requirement_for("/catalog/manage/7").and_then(|r| r.required_role),
///     Some(Role::Supplier)
/// );
/// assert!(regions.requirement_for("/about").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProtectedRegions {
    regions: Vec<(String, GateRequirement)>,
    config: GuardConfig,
}

impl ProtectedRegions {
    /// Creates an empty region table with the default guard configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the guard configuration used by [`guard_for`](Self::guard_for).
    pub fn with_config(mut self, config: GuardConfig) -> Self {
        self.config = config;
        self
    }

    /// Protects every path under `prefix` with `requirement`.
    ///
    /// Protecting the same prefix twice replaces the earlier requirement.
    pub fn protect(mut self, prefix: impl Into<String>, requirement: GateRequirement) -> Self {
        let prefix = normalize_path(&prefix.into());
        match self.regions.iter_mut().find(|(p, _)| *p == prefix) {
            Some(entry) => entry.1 = requirement,
            None => self.regions.push((prefix, requirement)),
        }
        self
    }

    /// Returns the requirement for `path`, or `None` if the path is public.
    ///
    /// The path is normalized the same way prefixes are before matching, so
    /// `orders/1`, `//orders` and `/public/../orders` all fall under `/orders`.
    pub fn requirement_for(&self, path: &str) -> Option<&GateRequirement> {
        let path = normalize_path(strip_query(path));
        self.regions
            .iter()
            .filter(|(prefix, _)| prefix_matches(prefix, &path))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, requirement)| requirement)
    }

    /// Returns a guard for the region covering `path`, or `None` if the path
    /// is public.
    pub fn guard_for(&self, path: &str) -> Option<RouteGuard> {
        self.requirement_for(path).map(|requirement| {
            RouteGuard::new(AccessGate::with_requirement(*requirement))
                .with_config(self.config.clone())
        })
    }

    /// Returns the number of protected prefixes.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if nothing is protected.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

// Rooted, no empty or `.` segments, `..` resolved (never above the root),
// no trailing slash.
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

fn strip_query(path: &str) -> &str {
    match path.find(['?', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    }
}

fn prefix_matches(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
