use anyhow::Context;
use clap::Parser;
use img_slim::cli::Args;
use img_slim::constants::FINGERPRINT_FILE;
use img_slim::{info, logger, success};
use img_slim::{
    fingerprint, scanner, Pipeline, PipelineOptions, ScanPolicy, ServiceConfig, ShrinkClient,
    ShrinkWorker,
};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::set_quiet_mode(args.quiet);
    logger::set_verbose_mode(args.verbose);
    run(args).await
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut service = ServiceConfig::from_env();
    if let Some(secret) = &args.secret {
        service
            .merge_secret_file(secret)
            .with_context(|| format!("reading secret file {}", secret.display()))?;
    }

    if !scanner::has_any_file(Path::new(&args.input)) {
        img_slim::error!(
            "No files found under {}, choose another input directory",
            args.input
        );
        return Ok(());
    }

    let output_dir = PathBuf::from(&args.output);
    let fingerprints = fingerprint::load(&output_dir.join(FINGERPRINT_FILE));

    let candidates = scanner::scan(&args.input, &fingerprints, &ScanPolicy::default())?;
    if candidates.is_empty() {
        info!("No new images to compress");
        return Ok(());
    }
    info!("{} images queued for compression", candidates.len());

    let client = ShrinkClient::new(service).context("configuring the compression service")?;
    let options = PipelineOptions {
        batch_size: args.batch_size,
        max_retries: (args.max_retries > 0).then_some(args.max_retries),
        ..PipelineOptions::default()
    };

    let mut pipeline = Pipeline::new(ShrinkWorker::new(client), options, output_dir, fingerprints);
    pipeline.run(candidates).await?;
    success!("Compression run complete");

    Ok(())
}
