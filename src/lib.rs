pub mod batch;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod fingerprint;
pub mod logger;
pub mod processing;
pub mod remote;
pub mod report;
pub mod scanner;
pub mod utils;

pub use batch::Pipeline;
pub use config::{PipelineOptions, ScanPolicy, ServiceConfig};
pub use error::{Result, SlimError};
pub use fingerprint::FingerprintMap;
pub use processing::{CompressionResult, Compressor, ShrinkWorker};
pub use remote::{ShrinkClient, ShrinkOutput};
pub use scanner::FileRecord;
