//! Command Line Interface (CLI) arguments.

use clap::Parser;

/// Decimator command line interface
#[derive(Clone, Debug, Parser)]
pub struct CommandLineArgs {
    /// The IP address on which the server should listen
    #[arg(long, default_value = "0.0.0.0", env = "DECIMATOR_HOST")]
    pub host: String,
    /// The port to which the server should bind
    #[arg(long, default_value_t = 8051, env = "DECIMATOR_PORT")]
    pub port: u16,
    /// Flag indicating whether HTTPS should be used
    #[arg(long, default_value_t = false, env = "DECIMATOR_HTTPS")]
    pub https: bool,
    /// Path to the certificate file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/decimator/certs/cert.pem",
        env = "DECIMATOR_CERT_FILE"
    )]
    pub cert_file: String,
    /// Path to the key file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/decimator/certs/key.pem",
        env = "DECIMATOR_KEY_FILE"
    )]
    pub key_file: String,
    /// Maximum time in seconds to wait for operations to complete upon receiving `ctrl+c` signal.
    #[arg(long, default_value_t = 60, env = "DECIMATOR_SHUTDOWN_TIMEOUT")]
    pub graceful_shutdown_timeout: u64,
    /// Directory holding the file lists and the `las` and `segy` data directories.
    #[arg(long, default_value = "file_data", env = "DECIMATOR_DATA_DIR")]
    pub data_dir: String,
    /// Whether to use Rayon for execution of CPU-bound tasks.
    #[arg(long, default_value_t = false, env = "DECIMATOR_USE_RAYON")]
    pub use_rayon: bool,
    /// Maximum number of concurrent file reads. Defaults to the number of CPUs.
    #[arg(long, env = "DECIMATOR_THREAD_LIMIT")]
    pub thread_limit: Option<usize>,
}

/// Returns parsed command line arguments.
pub fn parse() -> CommandLineArgs {
    CommandLineArgs::parse()
}
