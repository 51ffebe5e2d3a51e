//! Capability probing: is an executable resolvable on the search path?

use std::collections::HashSet;
use std::path::PathBuf;

/// Looks up executables by name.
pub trait Resolver {
    /// Full path of `name` if it resolves, `None` otherwise.
    fn resolve(&self, name: &str) -> Option<PathBuf>;
}

/// Resolver backed by the process `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathResolver;

impl Resolver for PathResolver {
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }
}

/// Resolver that only knows a fixed set of names (for testing).
#[derive(Debug, Clone, Default)]
pub struct MockResolver {
    present: HashSet<String>,
}

impl MockResolver {
    /// Create a resolver where nothing resolves.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver where exactly `names` resolve.
    pub fn with(names: &[&str]) -> Self {
        Self {
            present: names.iter().map(|n| (*n).to_string()).collect(),
        }
    }
}

impl Resolver for MockResolver {
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.present
            .contains(name)
            .then(|| PathBuf::from("/usr/bin").join(name))
    }
}

/// True iff `name` resolves. Absence is a normal result, never an error.
pub fn probe(resolver: &dyn Resolver, name: &str) -> bool {
    let found = resolver.resolve(name);
    match &found {
        Some(path) => log::debug!("probe {name}: {}", path.display()),
        None => log::debug!("probe {name}: not found"),
    }
    found.is_some()
}

/// True iff every name in `names` resolves.
pub fn probe_all<S: AsRef<str>>(resolver: &dyn Resolver, names: &[S]) -> bool {
    names.iter().all(|n| probe(resolver, n.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_resolver_empty() {
        let resolver = MockResolver::new();
        assert!(!probe(&resolver, "ansible"));
    }

    #[test]
    fn test_mock_resolver_known_names() {
        let resolver = MockResolver::with(&["sudo", "ansible"]);
        assert!(probe(&resolver, "sudo"));
        assert!(probe(&resolver, "ansible"));
        assert!(!probe(&resolver, "ansible-playbook"));
    }

    #[test]
    fn test_probe_all_requires_every_name() {
        let resolver = MockResolver::with(&["ansible"]);
        assert!(!probe_all(&resolver, &["ansible", "ansible-playbook"]));

        let resolver = MockResolver::with(&["ansible", "ansible-playbook"]);
        assert!(probe_all(&resolver, &["ansible", "ansible-playbook"]));
    }

    #[test]
    fn test_path_resolver_missing_is_false() {
        assert!(!probe(&PathResolver, "labstrap-definitely-not-installed-xyz"));
    }
}
