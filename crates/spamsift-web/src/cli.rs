use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "spamsift")]
#[command(
    author,
    version,
    about = "Spam email classifier with a single-page web form"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web form and HTTP API
    Serve {
        /// Listen port
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Listen address
        #[arg(short, long, default_value = "127.0.0.1")]
        address: String,

        /// Override the artifact download URL
        #[arg(long)]
        model_url: Option<String>,

        /// Override the artifact cache path
        #[arg(long)]
        model_path: Option<PathBuf>,

        /// Config file path (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Classify one email text and print the result
    Classify {
        /// Email text; read from stdin when omitted
        text: Option<String>,

        /// Override the artifact download URL
        #[arg(long)]
        model_url: Option<String>,

        /// Override the artifact cache path
        #[arg(long)]
        model_path: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}
