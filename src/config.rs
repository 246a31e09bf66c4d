use crate::constants::{
    BACKOFF_INCREMENT_SECS, COMPRESS_HOSTS, DEFAULT_BATCH_SIZE, DEFAULT_MAX_RETRIES,
    INITIAL_BACKOFF_SECS, KEYS_ENV_VAR, MAX_BACKOFF_SECS, MAX_FILE_SIZE, SUPPORTED_EXTENSIONS,
};
use crate::error::{Result, SlimError};
use std::fmt;
use std::path::Path;

/// Remote service endpoints and credentials.
///
/// Keys are loaded from the environment and optionally merged from a secret
/// file at startup; they are never embedded in the binary and never logged.
#[derive(Clone)]
pub struct ServiceConfig {
    pub hosts: Vec<String>,
    api_keys: Vec<String>,
}

impl ServiceConfig {
    /// Build the default host pool and read keys from `IMG_SLIM_KEYS`
    /// (comma-separated).
    pub fn from_env() -> Self {
        let api_keys = std::env::var(KEYS_ENV_VAR)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            hosts: COMPRESS_HOSTS.iter().map(|s| s.to_string()).collect(),
            api_keys,
        }
    }

    pub fn with_keys(hosts: Vec<String>, api_keys: Vec<String>) -> Self {
        Self { hosts, api_keys }
    }

    /// Merge additional keys from a JSON array file (the `--secret` flag).
    pub fn merge_secret_file(&mut self, path: &Path) -> Result<()> {
        let data = std::fs::read_to_string(path)?;
        let extra: Vec<String> = serde_json::from_str(&data)
            .map_err(|_| SlimError::InvalidSecretFile(path.to_path_buf()))?;
        self.api_keys.extend(extra);
        Ok(())
    }

    pub fn api_keys(&self) -> &[String] {
        &self.api_keys
    }

    pub fn ensure_keys(&self) -> Result<()> {
        if self.api_keys.is_empty() {
            return Err(SlimError::NoApiKeys);
        }
        Ok(())
    }
}

// Keys are credentials; keep them out of Debug output.
impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("hosts", &self.hosts)
            .field("api_keys", &format_args!("<{} redacted>", self.api_keys.len()))
            .finish()
    }
}

/// Which files the scanner will consider for compression.
#[derive(Debug, Clone)]
pub struct ScanPolicy {
    pub max_size: u64,
    pub extensions: Vec<String>,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            max_size: MAX_FILE_SIZE,
            extensions: SUPPORTED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScanPolicy {
    pub fn allows_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Scheduler knobs: batch size, backoff ramp, and the retry ceiling.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub batch_size: usize,
    pub initial_backoff_secs: u64,
    pub backoff_increment_secs: u64,
    pub max_backoff_secs: u64,
    /// `None` retries forever.
    pub max_retries: Option<u32>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            initial_backoff_secs: INITIAL_BACKOFF_SECS,
            backoff_increment_secs: BACKOFF_INCREMENT_SECS,
            max_backoff_secs: MAX_BACKOFF_SECS,
            max_retries: Some(DEFAULT_MAX_RETRIES),
        }
    }
}
