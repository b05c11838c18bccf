//! Utilities for loading RON files from a directory.
//!
//! Every `.ron` file in the directory is deserialized into the requested
//! type; files that fail to parse are logged and skipped so one broken file
//! never takes the rest down with it. Files are visited in name order, which
//! makes "the first file wins" well defined for callers.

use bevy::log::warn;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

fn ron_paths(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    paths.sort();
    paths
}

/// Load all `.ron` files from a directory and deserialize them into `T`.
///
/// # Arguments
/// * `path` - Directory path to scan for `.ron` files.
///
/// # Return
/// A `Vec<T>` with every successfully deserialized file, in file name order.
/// A missing directory yields an empty `Vec`.
#[must_use]
pub fn load_ron_files<T: DeserializeOwned>(path: impl AsRef<Path>) -> Vec<T> {
    let mut items = Vec::new();
    for file in ron_paths(path.as_ref()) {
        let content = match std::fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to read {}: {e}", file.display());
                continue;
            }
        };
        match ron::from_str::<T>(&content) {
            Ok(item) => items.push(item),
            Err(e) => warn!("failed to parse {}: {e}", file.display()),
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        value: u32,
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("finisher_arena_ron_{name}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn skips_broken_and_foreign_files() {
        let dir = scratch_dir("skips");
        std::fs::write(dir.join("b.ron"), "(value: 2)").expect("write");
        std::fs::write(dir.join("a.ron"), "(value: 1)").expect("write");
        std::fs::write(dir.join("c.ron"), "(value: \"oops\")").expect("write");
        std::fs::write(dir.join("d.txt"), "(value: 4)").expect("write");

        let items: Vec<Probe> = load_ron_files(&dir);
        assert_eq!(items, vec![Probe { value: 1 }, Probe { value: 2 }]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_directory_is_empty() {
        let items: Vec<Probe> = load_ron_files("definitely/not/here");
        assert!(items.is_empty());
    }
}
