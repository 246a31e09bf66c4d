use crate::error::{Result, SlimError};
use crate::info;
use crate::remote::ShrinkClient;
use crate::scanner::FileRecord;
use async_trait::async_trait;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// A successfully compressed file: the original record plus the compressed
/// size and ratio reported by the service. Created once per worker success
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionResult {
    pub path: String,
    pub name: String,
    pub size: u64,
    pub compressed_size: u64,
    pub ratio: f64,
}

/// The per-file compression seam. The scheduler only sees this trait, so
/// tests can drive it with a stub instead of the network-backed worker.
#[async_trait]
pub trait Compressor: Send + Sync {
    async fn compress(&self, record: &FileRecord) -> Result<CompressionResult>;
}

/// Network-backed worker: reads the file, round-trips it through the remote
/// service, and atomically replaces the original bytes with the compressed
/// ones. No disk side effect happens unless the download completed.
pub struct ShrinkWorker {
    client: ShrinkClient,
}

impl ShrinkWorker {
    pub fn new(client: ShrinkClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Compressor for ShrinkWorker {
    async fn compress(&self, record: &FileRecord) -> Result<CompressionResult> {
        info!("Compressing {}", record.path);

        let bytes = tokio::fs::read(&record.path).await?;
        let output = self.client.upload(bytes, &record.path).await?;
        let data = self.client.download(&output.url).await?;
        replace_file_atomic(Path::new(&record.path), &data)?;

        Ok(CompressionResult {
            path: record.path.clone(),
            name: record.name.clone(),
            size: record.size,
            compressed_size: output.size,
            ratio: output.ratio,
        })
    }
}

/// Replace `path`'s contents with `data` via a temp file in the same
/// directory and an atomic rename, so a partial write can never truncate or
/// corrupt the original.
pub fn replace_file_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| SlimError::Io(e.error))?;
    Ok(())
}
