//! Dependency-Set Fetcher: collections the entry-point roles require.

use crate::backend::{DependencySource, Engine, Runner};
use crate::environment::Environment;
use crate::error::Result;
use crate::installer::run_checked;
use crate::report;

/// Install the declared dependency set in one engine call.
///
/// Uses the Manifest when present. Otherwise warns and installs the single
/// configured default identifier. Returns the source that was installed.
pub fn install_declared_dependencies(
    env: &Environment,
    runner: &dyn Runner,
) -> Result<DependencySource> {
    let manifest = &env.layout.manifest;
    let source = if manifest.is_file() {
        report::info(&format!("Installing collections from {}", manifest.display()));
        DependencySource::Manifest(manifest.clone())
    } else {
        let id = env.settings.engine.default_dependency.clone();
        report::warn(&format!(
            "{} not found, installing {} only",
            manifest.display(),
            id
        ));
        DependencySource::Identifier(id)
    };

    let engine = Engine::for_env(env);
    run_checked(runner, &engine.install_dependencies(&source), "collection install")?;
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockRunner;
    use crate::environment::Identity;
    use crate::error::ErrorCategory;
    use tempfile::TempDir;

    #[test]
    fn test_missing_manifest_installs_default_only() {
        let tmp = TempDir::new().unwrap();
        let env = Environment::new(tmp.path(), Identity::user(1000)).unwrap();
        let runner = MockRunner::new();

        let source = install_declared_dependencies(&env, &runner).unwrap();

        assert_eq!(source, DependencySource::Identifier("kubernetes.core".to_string()));
        assert_eq!(
            runner.commands(),
            vec!["ansible-galaxy collection install kubernetes.core"]
        );
    }

    #[test]
    fn test_manifest_installs_in_one_call() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("requirements.yml"),
            "collections:\n  - name: pkg.alpha\n  - name: pkg.beta\n  - name: pkg.gamma\n",
        )
        .unwrap();
        let env = Environment::new(tmp.path(), Identity::user(1000)).unwrap();
        let runner = MockRunner::new();

        let source = install_declared_dependencies(&env, &runner).unwrap();

        assert_eq!(source, DependencySource::Manifest(tmp.path().join("requirements.yml")));
        assert_eq!(runner.calls().len(), 1);
        assert_eq!(runner.calls()[0].args[..3], ["collection", "install", "-r"]);
    }

    #[test]
    fn test_install_failure_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let env = Environment::new(tmp.path(), Identity::user(1000)).unwrap();
        let runner = MockRunner::new();
        runner.fail_on("ansible-galaxy", 1);

        let err = install_declared_dependencies(&env, &runner).unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Install);
        assert!(err.to_string().contains("kubernetes.core"));
    }
}
