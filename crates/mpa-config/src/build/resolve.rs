use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::ResolveConfig;

/// Module resolution rules handed to the bundler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOptions {
    pub alias: IndexMap<String, PathBuf>,
    pub extensions: Vec<String>,
    pub main_fields: Vec<String>,
}

impl ResolveOptions {
    /// Resolve alias targets against `root`.
    ///
    /// Each configured package is aliased to the directory of the nearest
    /// installed copy; packages that are not installed are left out.
    pub fn new(root: &Path, config: &ResolveConfig) -> Self {
        let mut alias: IndexMap<String, PathBuf> = config
            .aliases
            .iter()
            .map(|(prefix, dir)| (prefix.clone(), root.join(dir)))
            .collect();

        for package in &config.packages {
            match find_package_dir(root, package) {
                Some(dir) => {
                    tracing::debug!(package = %package, dir = %dir.display(), "aliased package");
                    alias.insert(package.clone(), dir);
                }
                None => {
                    tracing::warn!(
                        package = %package,
                        "package is not installed under node_modules; alias skipped"
                    );
                }
            }
        }

        Self {
            alias,
            extensions: config.extensions.clone(),
            main_fields: config.main_fields.clone(),
        }
    }
}

/// Find `node_modules/<package>` containing a `package.json`, searching
/// `root` and then each of its ancestors.
pub fn find_package_dir(root: &Path, package: &str) -> Option<PathBuf> {
    root.ancestors()
        .map(|dir| dir.join("node_modules").join(package))
        .find(|dir| dir.join("package.json").is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn install(dir: &Path, package: &str) {
        let pkg = dir.join("node_modules").join(package);
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("package.json"), r#"{"name": "pkg"}"#).unwrap();
    }

    #[test]
    fn aliases_are_rooted() {
        let dir = TempDir::new().unwrap();
        let mut config = ResolveConfig::default();
        config.packages.clear();

        let resolve = ResolveOptions::new(dir.path(), &config);
        assert_eq!(resolve.alias["@"], dir.path().join("src"));
        assert_eq!(resolve.alias["@public"], dir.path().join("public"));
        assert_eq!(resolve.main_fields, vec!["svelte", "browser", "module", "main"]);
    }

    #[test]
    fn installed_package_gets_an_alias() {
        let dir = TempDir::new().unwrap();
        install(dir.path(), "svelte");

        let resolve = ResolveOptions::new(dir.path(), &ResolveConfig::default());
        assert_eq!(
            resolve.alias.get("svelte"),
            Some(&dir.path().join("node_modules").join("svelte"))
        );
    }

    #[test]
    fn package_is_found_in_an_ancestor() {
        let dir = TempDir::new().unwrap();
        install(dir.path(), "svelte");
        let nested = dir.path().join("apps").join("site");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            find_package_dir(&nested, "svelte"),
            Some(dir.path().join("node_modules").join("svelte"))
        );
    }

    #[test]
    fn missing_package_is_skipped() {
        let dir = TempDir::new().unwrap();
        let resolve = ResolveOptions::new(dir.path(), &ResolveConfig::default());
        assert!(!resolve.alias.contains_key("svelte"));
    }
}
