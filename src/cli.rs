use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_RETRIES};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "img-slim",
    about = "Incremental batch image compression through a remote shrink service",
    long_about = "img-slim walks a directory tree, uploads every new or changed jpg/png \
                  to a remote compression service, overwrites the originals with the \
                  compressed bytes, and records a fingerprint per file so unchanged \
                  images are skipped on the next run. Savings are appended to a \
                  Markdown report.",
    version,
    after_help = "EXAMPLES:\n  \
    img-slim --input assets/images\n  \
    img-slim --input src --output build/meta --secret keys.json\n  \
    IMG_SLIM_KEYS=key1,key2 img-slim -i static -b 10"
)]
pub struct Args {
    #[arg(
        short,
        long,
        default_value = "src",
        help = "Directory tree to compress",
        long_help = "Root of the directory tree to scan for images. Only files below \
                     this directory are considered."
    )]
    pub input: String,

    #[arg(
        short,
        long,
        default_value = "",
        help = "Directory for the fingerprint store and report (default: current directory)",
        long_help = "Where image.json (the fingerprint store) and the compression report \
                     are written. Created if it does not exist."
    )]
    pub output: String,

    #[arg(
        short,
        long,
        help = "JSON file with additional API keys",
        long_help = "Path to a JSON array of API key strings, merged into the key pool \
                     from the IMG_SLIM_KEYS environment variable at startup."
    )]
    pub secret: Option<PathBuf>,

    #[arg(
        short,
        long,
        default_value_t = DEFAULT_BATCH_SIZE,
        help = "Files compressed concurrently per batch",
        long_help = "Number of files per batch. The whole batch is uploaded concurrently \
                     and batches run one after another, so this is also the concurrency cap."
    )]
    pub batch_size: usize,

    #[arg(
        short = 'r',
        long,
        default_value_t = DEFAULT_MAX_RETRIES,
        help = "Attempts per batch before giving up (0 = retry forever)",
        long_help = "How many times a failing batch is attempted before the run aborts. \
                     Pass 0 to retry forever with capped backoff."
    )]
    pub max_retries: u32,

    #[arg(short, long, help = "Suppress all output except errors")]
    pub quiet: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
