use crate::config::PipelineOptions;
use crate::error::{Result, SlimError};
use crate::fingerprint::FingerprintMap;
use crate::processing::{CompressionResult, Compressor};
use crate::report;
use crate::scanner::FileRecord;
use crate::{verbose, warn};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;

// Run-wide scheduler state. Owned exclusively by the scheduling loop;
// workers only ever see one FileRecord at a time.
struct RunState {
    queue: Vec<FileRecord>,
    results: Vec<CompressionResult>,
    cursor: usize,
    backoff_secs: u64,
}

/// Drives the whole compression run. Batches execute sequentially with
/// intra-batch fan-out; a failed batch is retried after a backoff wait, and
/// the report is written exactly once after the last batch completes.
pub struct Pipeline<C: Compressor> {
    compressor: C,
    options: PipelineOptions,
    output_dir: PathBuf,
    fingerprints: FingerprintMap,
    report_generated: bool,
}

impl<C: Compressor> Pipeline<C> {
    pub fn new(
        compressor: C,
        options: PipelineOptions,
        output_dir: PathBuf,
        fingerprints: FingerprintMap,
    ) -> Self {
        Self {
            compressor,
            options,
            output_dir,
            fingerprints,
            report_generated: false,
        }
    }

    /// Compress every queued file, then write the fingerprint store and the
    /// savings report. Only a fully successful run reaches the report.
    pub async fn run(&mut self, queue: Vec<FileRecord>) -> Result<()> {
        let results = self.schedule(queue).await?;
        self.finish(&results)
    }

    /// The scheduling loop: slice the queue left-to-right into batches of
    /// `batch_size` and run each batch to completion before the next starts.
    ///
    /// All files of a batch are uploaded concurrently; the loop waits for
    /// every worker to resolve before judging the batch. If any worker
    /// failed, the cursor stays put and the same slice is retried after a
    /// backoff wait, so files that already succeeded in the failed batch are
    /// re-uploaded (at-least-once semantics, safe because re-compressing an
    /// already compressed image changes nothing).
    pub async fn schedule(&self, queue: Vec<FileRecord>) -> Result<Vec<CompressionResult>> {
        let total = queue.len() as u64;
        let mut state = RunState {
            queue,
            results: Vec::new(),
            cursor: 0,
            backoff_secs: self.options.initial_backoff_secs,
        };
        let mut batch_failures = 0u32;

        let progress = ProgressBar::new(total);
        progress.set_style(ProgressStyle::default_bar());

        while state.cursor < state.queue.len() {
            let end = (state.cursor + self.options.batch_size).min(state.queue.len());
            let batch = &state.queue[state.cursor..end];

            match self.run_batch(batch).await {
                Ok(mut results) => {
                    progress.inc(results.len() as u64);
                    state.results.append(&mut results);
                    state.cursor = end;
                    batch_failures = 0;
                    debug_assert!(state.results.len() <= state.queue.len());
                }
                Err(err) => {
                    crate::error!("{err}");
                    batch_failures += 1;
                    if let Some(max) = self.options.max_retries {
                        if batch_failures >= max {
                            progress.abandon();
                            return Err(SlimError::RetriesExhausted(batch_failures));
                        }
                    }
                    self.wait_backoff(state.backoff_secs).await;
                    // The wait grows by a fixed step per failure and never
                    // shrinks for the rest of the run.
                    state.backoff_secs = (state.backoff_secs
                        + self.options.backoff_increment_secs)
                        .min(self.options.max_backoff_secs);
                }
            }
        }

        progress.finish();
        Ok(state.results)
    }

    async fn run_batch(&self, batch: &[FileRecord]) -> Result<Vec<CompressionResult>> {
        verbose!("Dispatching batch of {} files", batch.len());
        let outcomes = join_all(
            batch
                .iter()
                .map(|record| self.compressor.compress(record)),
        )
        .await;
        outcomes.into_iter().collect()
    }

    async fn wait_backoff(&self, secs: u64) {
        for remaining in (1..=secs).rev() {
            warn!("Reconnecting after failure, {remaining}s to go ...");
            sleep(Duration::from_secs(1)).await;
        }
    }

    /// Write the merged fingerprint store and append the savings report.
    /// Guarded so a second invocation is a no-op.
    pub fn finish(&mut self, results: &[CompressionResult]) -> Result<()> {
        if self.report_generated {
            return Ok(());
        }
        self.report_generated = true;
        report::generate(results, &self.fingerprints, &self.output_dir)
    }
}
