//! CLI interface for the hotel sentiment analyzer

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hotel-sentiment")]
#[command(about = "Classify hotel reviews as positive, neutral or negative")]
#[command(long_about = "Analyze a typed hotel review or a TXT, PDF or DOCX file with a pre-trained TF-IDF + logistic regression classifier")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging and detailed output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict the sentiment of a single review
    Predict {
        /// Review file (TXT, PDF, DOCX); takes precedence over --text
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Review text; read from stdin when neither --file nor --text is given
        #[arg(short, long)]
        text: Option<String>,

        /// Output format: console, json, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Directory holding the classifier artifacts
        #[arg(short, long)]
        artifacts: Option<PathBuf>,
    },

    /// Analyze reviews one after another in an interactive session
    Interactive {
        /// Output format: console, json, html
        #[arg(short, long)]
        output: Option<String>,

        /// Directory holding the classifier artifacts
        #[arg(short, long)]
        artifacts: Option<PathBuf>,
    },

    /// Classifier artifact commands
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// Load the classifier bundle and describe it
    Check {
        /// Directory holding the classifier artifacts
        #[arg(short, long)]
        artifacts: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, html", format)),
    }
}
