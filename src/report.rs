use crate::constants::{FINGERPRINT_FILE, REPORT_FILE};
use crate::error::Result;
use crate::fingerprint::{self, FingerprintMap};
use crate::processing::CompressionResult;
use crate::success;
use crate::utils::{format_size, now_timestamp};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Per-row savings percentage: `round((1 - ratio) * 100)`.
pub fn compression_percent(ratio: f64) -> i64 {
    ((1.0 - ratio) * 100.0).round() as i64
}

/// Aggregate savings percentage across a run.
///
/// Deliberately a sum of the per-file savings, not a weighted average, for
/// compatibility with the historical report format; with many files this can
/// exceed 100%.
pub fn aggregate_percent(results: &[CompressionResult]) -> i64 {
    let total: f64 = results.iter().map(|r| 1.0 - r.ratio).sum();
    (total * 100.0).round() as i64
}

/// Render one report section: a per-file table plus a totals table, each
/// stamped with the given timestamp.
pub fn render(results: &[CompressionResult], timestamp: &str) -> String {
    let mut doc = String::from("# 项目原始图片对比\n\n");

    doc.push_str(&format!("## 图片压缩信息 {timestamp}\n\n"));
    doc.push_str("| 文件名 | 文件体积 | 压缩后体积 | 压缩比 | 文件路径 |\n");
    doc.push_str("| -- | -- | -- | -- | -- |\n");
    for result in results {
        doc.push_str(&format!(
            "| {} | {} | {} | {}% | {} |\n",
            result.name,
            format_size(result.size),
            format_size(result.compressed_size),
            compression_percent(result.ratio),
            result.path,
        ));
    }

    let size_total: u64 = results.iter().map(|r| r.size).sum();
    let compressed_total: u64 = results.iter().map(|r| r.compressed_size).sum();

    doc.push_str(&format!("\n## 总体积变化信息 {timestamp}\n\n"));
    doc.push_str("| 原始总大小 | 压缩后总大小 | 总压缩比 |\n| -- | -- | -- |\n");
    doc.push_str(&format!(
        "| {} | {} | {}% |\n",
        format_size(size_total),
        format_size(compressed_total),
        aggregate_percent(results),
    ));

    doc
}

/// Write the run's two artifacts: the merged fingerprint store and a new
/// section appended to the savings report. Fingerprints for compressed files
/// are re-keyed over (path, compressed size) so the next scan sees them as
/// up to date.
pub fn generate(
    results: &[CompressionResult],
    fingerprints: &FingerprintMap,
    output_dir: &Path,
) -> Result<()> {
    let updates: FingerprintMap = results
        .iter()
        .map(|r| {
            (
                r.path.clone(),
                fingerprint::compute_key(&r.path, r.compressed_size),
            )
        })
        .collect();
    let merged = fingerprint::merge(fingerprints, updates);

    let store_path = output_dir.join(FINGERPRINT_FILE);
    fingerprint::persist(&store_path, &merged)?;
    success!("Fingerprint store written to {}", store_path.display());

    if !output_dir.as_os_str().is_empty() {
        fs::create_dir_all(output_dir)?;
    }
    let report_path = output_dir.join(REPORT_FILE);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&report_path)?;
    file.write_all(render(results, &now_timestamp()).as_bytes())?;
    success!("Compression report written to {}", report_path.display());

    Ok(())
}
