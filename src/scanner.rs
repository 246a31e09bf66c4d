use crate::config::ScanPolicy;
use crate::error::Result;
use crate::fingerprint::{self, FingerprintMap};
use crate::{verbose, warn};
use std::path::Path;
use walkdir::WalkDir;

/// A candidate image discovered by the scanner. `path` is project-relative
/// (prefixed with the input directory as given on the command line) and is
/// the key used for fingerprinting and reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: String,
    pub size: u64,
    pub name: String,
}

/// True if at least one regular file exists anywhere below `dir`.
///
/// Cheap pre-check before loading the fingerprint store; an empty tree means
/// there is nothing to compress and the run can bail out early.
pub fn has_any_file(dir: &Path) -> bool {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_type().is_file())
}

/// Walk `input` depth-first and collect the files that need compression.
///
/// A file is a candidate when it satisfies the size and extension policy and
/// its (path, size) fingerprint is absent from `fingerprints` or differs
/// from the stored entry. Policy violations are warnings, not errors.
/// Entries are visited in file-name order so the result is deterministic.
pub fn scan(
    input: &str,
    fingerprints: &FingerprintMap,
    policy: &ScanPolicy,
) -> Result<Vec<FileRecord>> {
    let root = Path::new(input);
    let mut records = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let size = entry.metadata()?.len();
        let extension = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        if size > policy.max_size {
            warn!(
                "{} exceeds the {}MB size limit",
                name,
                policy.max_size / 1024 / 1024
            );
        }
        if !policy.allows_extension(extension) {
            warn!("{} is not an allowed image type", name);
        }
        if size >= policy.max_size || !policy.allows_extension(extension) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .expect("walked entry is always under the scan root");
        let record_path = root.join(relative).to_string_lossy().into_owned();

        let key = fingerprint::compute_key(&record_path, size);
        if fingerprints.get(&record_path) == Some(&key) {
            verbose!("{} unchanged since last run", record_path);
            continue;
        }

        records.push(FileRecord {
            path: record_path,
            size,
            name,
        });
    }

    Ok(records)
}
