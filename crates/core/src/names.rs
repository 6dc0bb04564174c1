//! Root namespace and task name resolution.
//!
//! A task name has three surface forms, all denoting a location in the
//! combined namespace of all registered roots:
//!
//! - *Resolved*: `//<physical path>`, the canonical stored form; the
//!   root prefix has already been substituted.
//! - *Root-qualified*: `/<root>/<relative path>`, e.g. `/ROOT1/foo.txt`.
//! - *Unqualified*: no leading slash; implicitly under the default root.
//!
//! Resolution is idempotent and total over the accepted forms; anything
//! else fails with [`Error::InvalidName`].

use crate::constants::{DEFAULT_ROOT, DEFAULT_ROOT_PREFIX, NAME_SEPARATOR, RESOLVED_MARKER};
use crate::errors::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Canonical task identifier: a `//`-prefixed physical path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResolvedName(String);

impl ResolvedName {
    /// Wrap an already-resolved name. Fails if the marker is missing.
    pub fn parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.starts_with(RESOLVED_MARKER) {
            Ok(Self(name))
        } else {
            Err(Error::invalid_name(name, "not in resolved form"))
        }
    }

    /// Get the inner string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The physical path addressed by this name, with the `//` marker
    /// stripped.
    pub fn file_name(&self) -> &str {
        &self.0[RESOLVED_MARKER.len()..]
    }

    /// The physical path as an owned, platform-native path.
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(self.file_name())
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ResolvedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ResolvedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The root namespace: an insertion-ordered map from root identifier to
/// physical path prefix. Every prefix ends with `/`, enforced at
/// registration time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootSet {
    roots: IndexMap<String, String>,
}

impl Default for RootSet {
    fn default() -> Self {
        let mut roots = IndexMap::new();
        roots.insert(DEFAULT_ROOT.to_string(), DEFAULT_ROOT_PREFIX.to_string());
        Self { roots }
    }
}

impl RootSet {
    /// A namespace pre-seeded with the default root `ROOT0 -> "./"`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a root, replacing any previous prefix under the same
    /// identifier. The prefix must end with `/`.
    pub fn insert(&mut self, id: impl Into<String>, prefix: impl Into<String>) -> Result<()> {
        let id = id.into();
        let prefix = prefix.into();
        if !prefix.ends_with(NAME_SEPARATOR) {
            return Err(Error::invalid_root(id, prefix));
        }
        self.roots.insert(id, prefix);
        Ok(())
    }

    /// Look up a root's prefix.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.roots.get(id).map(String::as_str)
    }

    /// Iterate over `(id, prefix)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.roots.iter().map(|(id, p)| (id.as_str(), p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Resolve a name in any accepted surface form to canonical form.
    ///
    /// Matching of root-qualified names requires the full `/<root>/`
    /// pattern, so a root identifier that is a prefix of another
    /// (`ROOT1` vs `ROOT10`) never shadows it, and a name missing the
    /// trailing separator (`/ROOT0abc`) does not resolve.
    pub fn resolve(&self, name: &str) -> Result<ResolvedName> {
        if name.starts_with(RESOLVED_MARKER) {
            return Ok(ResolvedName(name.to_string()));
        }
        if !name.starts_with(NAME_SEPARATOR) {
            return self.resolve(&format!("/{DEFAULT_ROOT}/{name}"));
        }
        for (id, prefix) in &self.roots {
            let pattern = format!("/{id}/");
            if let Some(rest) = name.strip_prefix(&pattern) {
                return Ok(ResolvedName(format!("{RESOLVED_MARKER}{prefix}{rest}")));
            }
        }
        Err(Error::invalid_name(name, "no registered root matches"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_names_pass_through() {
        let roots = RootSet::default();
        assert_eq!(roots.resolve("//test.txt").unwrap().as_str(), "//test.txt");
    }

    #[test]
    fn unqualified_names_use_the_default_root() {
        let roots = RootSet::default();
        assert_eq!(roots.resolve("test.txt").unwrap().as_str(), "//./test.txt");
    }

    #[test]
    fn rooted_names_substitute_the_prefix() {
        let mut roots = RootSet::default();
        roots.insert("ROOT0", "cat/").unwrap();
        roots.insert("ROOT1", "tiger/").unwrap();
        roots.insert("ROOT2", "lion/").unwrap();

        assert_eq!(
            roots.resolve("/ROOT0/test.txt").unwrap().as_str(),
            "//cat/test.txt"
        );
        assert_eq!(
            roots.resolve("/ROOT1/test.txt").unwrap().as_str(),
            "//tiger/test.txt"
        );
        assert_eq!(
            roots.resolve("/ROOT2/test.txt").unwrap().as_str(),
            "//lion/test.txt"
        );
    }

    #[test]
    fn qualified_name_without_separator_is_invalid() {
        let mut roots = RootSet::default();
        roots.insert("ROOT0", "cat/").unwrap();

        let err = roots.resolve("/ROOT0abc").unwrap_err();
        assert!(matches!(err, Error::InvalidName { .. }));
    }

    #[test]
    fn unknown_root_is_invalid() {
        let mut roots = RootSet::default();
        roots.insert("ROOT0", "cat/").unwrap();
        roots.insert("ROOT1", "tiger/").unwrap();

        let err = roots.resolve("/ROOT10/abc").unwrap_err();
        assert!(matches!(err, Error::InvalidName { .. }));
    }

    #[test]
    fn root_identifier_prefixes_do_not_collide() {
        let mut roots = RootSet::default();
        roots.insert("ROOT1", "tiger/").unwrap();
        roots.insert("ROOT10", "lion/").unwrap();

        // ROOT1 is registered first but must not swallow /ROOT10/.
        assert_eq!(
            roots.resolve("/ROOT10/abc").unwrap().as_str(),
            "//lion/abc"
        );
        assert_eq!(roots.resolve("/ROOT1/x").unwrap().as_str(), "//tiger/x");
    }

    #[test]
    fn prefix_must_end_with_separator() {
        let mut roots = RootSet::default();
        let err = roots.insert("ROOT0", "abc").unwrap_err();
        assert!(matches!(err, Error::InvalidRoot { .. }));
    }

    #[test]
    fn file_name_strips_the_marker() {
        let name = ResolvedName::parse("//tiger/test.txt").unwrap();
        assert_eq!(name.file_name(), "tiger/test.txt");
        assert_eq!(name.to_path_buf(), PathBuf::from("tiger/test.txt"));
    }

    #[test]
    fn parse_rejects_unresolved_forms() {
        assert!(ResolvedName::parse("test.txt").is_err());
        assert!(ResolvedName::parse("/ROOT0/test.txt").is_err());
    }
}
