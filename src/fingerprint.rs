use crate::error::Result;
use crate::success;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Mapping from project-relative file path to its content fingerprint.
pub type FingerprintMap = HashMap<String, String>;

// On-disk wrapper; keys are sorted so successive runs diff cleanly.
#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    #[serde(rename = "fingerprintMap", default)]
    fingerprint_map: BTreeMap<String, String>,
}

/// Load the fingerprint store. A missing or unreadable store is not an
/// error: first runs have nothing to load and start from an empty map.
pub fn load(store_path: &Path) -> FingerprintMap {
    let Ok(data) = fs::read_to_string(store_path) else {
        return FingerprintMap::new();
    };
    match serde_json::from_str::<StoreFile>(&data) {
        Ok(store) => {
            success!("Fingerprint store loaded from {}", store_path.display());
            store.fingerprint_map.into_iter().collect()
        }
        Err(_) => FingerprintMap::new(),
    }
}

/// Deterministic fingerprint over a file's identity and size.
///
/// Collision resistance is not a security requirement here; the key only has
/// to change whenever the (path, size) pair changes.
pub fn compute_key(path: &str, size: u64) -> String {
    blake3::hash(format!("{path}{size}").as_bytes())
        .to_hex()
        .to_string()
}

/// Right-biased union: entries in `updates` win, untouched `old` keys survive.
pub fn merge(old: &FingerprintMap, updates: FingerprintMap) -> FingerprintMap {
    let mut merged = old.clone();
    merged.extend(updates);
    merged
}

/// Persist the mapping as pretty-printed JSON with tab indentation, creating
/// parent directories as needed.
pub fn persist(store_path: &Path, map: &FingerprintMap) -> Result<()> {
    if let Some(parent) = store_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let store = StoreFile {
        fingerprint_map: map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
    };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    store.serialize(&mut serializer)?;

    fs::write(store_path, buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_compute_key_is_deterministic() {
        let a = compute_key("src/logo.png", 2048);
        let b = compute_key("src/logo.png", 2048);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_compute_key_changes_with_size() {
        let before = compute_key("src/logo.png", 2048);
        let after = compute_key("src/logo.png", 1024);
        assert_ne!(before, after);
    }

    #[test]
    fn test_compute_key_changes_with_path() {
        assert_ne!(
            compute_key("src/a.png", 100),
            compute_key("src/b.png", 100)
        );
    }

    #[test]
    fn test_load_missing_store_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let map = load(&temp_dir.path().join("image.json"));
        assert!(map.is_empty());
    }

    #[test]
    fn test_load_corrupt_store_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store_path = temp_dir.path().join("image.json");
        std::fs::write(&store_path, "not json at all").unwrap();
        assert!(load(&store_path).is_empty());
    }

    #[test]
    fn test_merge_is_right_biased() {
        let mut old = FingerprintMap::new();
        old.insert("src/a.png".into(), "old-a".into());
        old.insert("src/b.png".into(), "old-b".into());

        let mut updates = FingerprintMap::new();
        updates.insert("src/b.png".into(), "new-b".into());
        updates.insert("src/c.png".into(), "new-c".into());

        let merged = merge(&old, updates);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged["src/a.png"], "old-a");
        assert_eq!(merged["src/b.png"], "new-b");
        assert_eq!(merged["src/c.png"], "new-c");
    }

    #[test]
    fn test_persist_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store_path = temp_dir.path().join("nested").join("image.json");

        let mut map = FingerprintMap::new();
        map.insert("src/a.png".into(), compute_key("src/a.png", 123));
        map.insert("src/b.jpg".into(), compute_key("src/b.jpg", 456));

        persist(&store_path, &map).unwrap();
        let reloaded = load(&store_path);
        assert_eq!(reloaded, map);
    }

    #[test]
    fn test_persist_uses_tab_indented_wrapper() {
        let temp_dir = TempDir::new().unwrap();
        let store_path = temp_dir.path().join("image.json");

        let mut map = FingerprintMap::new();
        map.insert("src/a.png".into(), "abc".into());

        persist(&store_path, &map).unwrap();
        let raw = std::fs::read_to_string(&store_path).unwrap();
        assert!(raw.contains("\"fingerprintMap\""));
        assert!(raw.contains("\n\t"));
    }
}
