//! Property tests: discovery key sets and page plugin generation.

use mpa_config::{BuildMode, EntryMap, PageOptions, discover_entries, generate_page_plugins};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn page_names() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[a-z][a-z0-9_]{0,8}", 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Discovered keys are exactly the page directories holding an entry.
    #[test]
    fn prop_discovered_keys_match_page_dirs(pages in page_names(), file in "[a-z_]{1,6}") {
        let dir = TempDir::new().unwrap();
        let pages_root = dir.path().join("src/pages");
        fs::create_dir_all(&pages_root).unwrap();
        for page in &pages {
            let page_dir = pages_root.join(page);
            fs::create_dir_all(&page_dir).unwrap();
            fs::write(page_dir.join(format!("{file}.js")), "").unwrap();
        }

        let entries = discover_entries(dir.path()).unwrap();
        let keys: BTreeSet<String> = entries.pages().map(str::to_string).collect();
        prop_assert_eq!(&keys, &pages);

        for page in &pages {
            let expected = format!("./src/pages/{page}/{file}.js");
            prop_assert_eq!(entries.get(page), Some(expected.as_str()));
        }
    }

    /// N pages in, N specs out, each `<page>.html` with `[page, commons]`.
    #[test]
    fn prop_one_spec_per_entry(pages in page_names(), production in any::<bool>()) {
        let entries: EntryMap = pages
            .iter()
            .map(|p| (p.clone(), format!("./src/pages/{p}/index.js")))
            .collect();
        let mode = if production { BuildMode::Production } else { BuildMode::Development };

        let specs = generate_page_plugins(&entries, &PageOptions::new(mode));
        prop_assert_eq!(specs.len(), pages.len());

        let filenames: BTreeSet<_> = specs.iter().map(|s| s.filename.clone()).collect();
        prop_assert_eq!(filenames.len(), specs.len());

        for (spec, page) in specs.iter().zip(entries.pages()) {
            prop_assert_eq!(&spec.filename, &format!("{page}.html"));
            prop_assert_eq!(spec.chunks.clone(), vec![page.to_string(), "commons".to_string()]);
        }
    }
}
