//! Page entry discovery.
//!
//! Maps the `src/pages/<page>/<name>.js` convention onto an [`EntryMap`].
//!
//! ```text
//! src/pages/
//! ├── home/
//! │   └── home.js      -> home:  ./src/pages/home/home.js
//! └── about/
//!     └── about.js     -> about: ./src/pages/about/about.js
//! ```

use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use indexmap::map::Entry;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::error::DiscoveryError;

/// `<page>/<name>.js`, both segments ASCII word characters.
static PAGE_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+)/([A-Za-z0-9_]+)\.js$").expect("page entry pattern is valid")
});

/// What to do when one page directory holds more than one entry file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Fail discovery with [`DiscoveryError::DuplicatePage`].
    #[default]
    Reject,
    /// Keep the file that sorts last by path.
    LastWins,
}

/// Page name to entry module path, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryMap(IndexMap<String, String>);

impl EntryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, page: &str) -> Option<&str> {
        self.0.get(page).map(String::as_str)
    }

    pub fn contains(&self, page: &str) -> bool {
        self.0.contains_key(page)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Insert or replace an entry, returning the previous module path.
    pub fn insert(&mut self, page: impl Into<String>, module: impl Into<String>) -> Option<String> {
        self.0.insert(page.into(), module.into())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EntryMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Scans a project root for page entries.
///
/// # Example
///
/// ```no_run
/// use mpa_config::EntryDiscovery;
///
/// let entries = EntryDiscovery::new(".").discover().unwrap();
/// for (page, module) in entries.iter() {
///     println!("{page} -> {module}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct EntryDiscovery {
    root: PathBuf,
    pages_dir: PathBuf,
    duplicates: DuplicatePolicy,
}

impl EntryDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            pages_dir: PathBuf::from(crate::config::DEFAULT_PAGES_DIR),
            duplicates: DuplicatePolicy::default(),
        }
    }

    /// Pages directory relative to the root.
    pub fn pages_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pages_dir = dir.into();
        self
    }

    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Walk the pages directory and build the entry map.
    ///
    /// Files are visited in lexicographic path order. Every `.js` file must
    /// sit exactly one directory below the pages directory; anything else
    /// fails with [`DiscoveryError::StructureMismatch`]. Symlinked page
    /// directories and entry files are followed.
    pub fn discover(&self) -> Result<EntryMap, DiscoveryError> {
        if !is_root_relative(&self.pages_dir) {
            return Err(DiscoveryError::PagesDirOutsideRoot(self.pages_dir.clone()));
        }

        let pages_root = self.root.join(&self.pages_dir);
        if !pages_root.is_dir() {
            return Err(DiscoveryError::MissingPagesDir(pages_root));
        }

        let prefix = slash_path(&self.pages_dir);
        let mut entries: IndexMap<String, String> = IndexMap::new();

        let walker = WalkDir::new(&pages_root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().and_then(|e| e.to_str()) != Some("js") {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&pages_root)
                .map(slash_path)
                .unwrap_or_default();

            let Some(caps) = PAGE_ENTRY.captures(&relative) else {
                return Err(DiscoveryError::StructureMismatch {
                    path: entry.path().to_path_buf(),
                    pages_dir: self.pages_dir.clone(),
                });
            };

            let page = caps[1].to_string();
            let module = if prefix.is_empty() {
                format!("./{relative}")
            } else {
                format!("./{prefix}/{relative}")
            };

            match entries.entry(page) {
                Entry::Vacant(slot) => {
                    tracing::debug!(page = %slot.key(), module = %module, "discovered page");
                    slot.insert(module);
                }
                Entry::Occupied(mut slot) => match self.duplicates {
                    DuplicatePolicy::Reject => {
                        return Err(DiscoveryError::DuplicatePage {
                            page: slot.key().clone(),
                            first: slot.get().clone(),
                            second: module,
                        });
                    }
                    DuplicatePolicy::LastWins => {
                        tracing::debug!(
                            page = %slot.key(),
                            replaced = %slot.get(),
                            module = %module,
                            "page entry replaced"
                        );
                        slot.insert(module);
                    }
                },
            }
        }

        Ok(EntryMap(entries))
    }
}

/// Discover page entries under `<root>/src/pages` with default settings.
pub fn discover_entries(root: impl AsRef<Path>) -> Result<EntryMap, DiscoveryError> {
    EntryDiscovery::new(root).discover()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Whether `path` stays below the directory it is joined onto.
pub(crate) fn is_root_relative(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Render a relative path with `/` separators, dropping `.` components.
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export {};\n").unwrap();
    }

    #[test]
    fn slash_path_drops_current_dir() {
        assert_eq!(slash_path(Path::new("./src/pages")), "src/pages");
        assert_eq!(slash_path(Path::new("")), "");
    }

    #[test]
    fn root_relative_paths() {
        assert!(is_root_relative(Path::new("src/pages")));
        assert!(is_root_relative(Path::new("./src/pages")));
        assert!(!is_root_relative(Path::new("../pages")));
        assert!(!is_root_relative(Path::new("src/../../pages")));
        assert!(!is_root_relative(Path::new("/srv/pages")));
    }

    #[test]
    fn discovers_single_page() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/pages/home/home.js");

        let entries = discover_entries(dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get("home"), Some("./src/pages/home/home.js"));
    }

    #[test]
    fn ignores_non_js_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/pages/home/home.js");
        touch(dir.path(), "src/pages/home/Home.svelte");
        touch(dir.path(), "src/pages/home/style.less");

        let entries = discover_entries(dir.path()).unwrap();
        assert_eq!(entries.pages().collect::<Vec<_>>(), vec!["home"]);
    }

    #[test]
    fn skips_hidden_entries() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/pages/home/home.js");
        touch(dir.path(), "src/pages/.cache/chunk.js");

        let entries = discover_entries(dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn custom_pages_dir_is_reflected_in_module_paths() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app/views/shop/main.js");

        let entries = EntryDiscovery::new(dir.path())
            .pages_dir("./app/views")
            .discover()
            .unwrap();
        assert_eq!(entries.get("shop"), Some("./app/views/shop/main.js"));
    }
}
