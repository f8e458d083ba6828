use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "gauge", version, about = "Batch metrics evaluation for LLM outputs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the metrics service.
    Serve {
        /// YAML config file; GAUGE_* env vars override it.
        #[arg(long, env = "GAUGE_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Submit a batch of evaluation items from a JSON file.
    Call {
        /// JSON array of evaluation items (question/answer/context).
        #[arg(long)]
        file: PathBuf,
        /// Comma-separated metric names.
        #[arg(long, value_delimiter = ',', required = true)]
        metrics: Vec<String>,
        #[arg(long, default_value = "http://127.0.0.1:8001")]
        server: String,
        /// Defaults to a fresh UUID.
        #[arg(long)]
        process_id: Option<String>,
        #[arg(long, default_value = "cli")]
        user_id: String,
    },
    /// List the metric vocabulary the service supports.
    Metrics {
        #[arg(long, default_value = "http://127.0.0.1:8001")]
        server: String,
    },
}
