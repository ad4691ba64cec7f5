//! Hotel sentiment: classify hotel reviews with a pre-trained TF-IDF + logistic regression bundle

use clap::Parser;
use colored::Colorize;
use hotel_sentiment::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use hotel_sentiment::config::{Config, OutputFormat};
use hotel_sentiment::controller::{ReviewController, Submission};
use hotel_sentiment::error::{Result, SentimentError};
use hotel_sentiment::output::formatter::{save_report_to_file, ReportGenerator};
use hotel_sentiment::output::report::PredictionReport;
use hotel_sentiment::processing::bundle::ClassifierBundle;
use hotel_sentiment::session::Session;
use log::{error, info};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process;

/// Exit status when a submission is rejected with a warning
const EXIT_REJECTED: i32 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    // Load configuration
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    match run_command(cli.command, config, cli.config, cli.verbose).await {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("Command failed: {}", e);
            if let SentimentError::StartupConfiguration(_) = e {
                eprintln!("❌ Model files not found or unusable. Ensure the classifier artifacts exist.");
            }
            process::exit(1);
        }
    }
}

async fn run_command(
    command: Commands,
    mut config: Config,
    config_path: Option<PathBuf>,
    verbose: bool,
) -> Result<i32> {
    match command {
        Commands::Predict {
            file,
            text,
            output,
            save,
            artifacts,
        } => {
            apply_overrides(&mut config, artifacts, output)?;

            // The bundle must be usable before any input is accepted
            let bundle = ClassifierBundle::load(&config.models)?;
            let controller = ReviewController::new(&bundle, config.input.min_tokens);

            let submission = match (file, text) {
                (Some(path), text) => Submission {
                    file: Some(path),
                    text: text.unwrap_or_default(),
                },
                (None, Some(text)) => Submission::typed(text),
                (None, None) => Submission::typed(read_stdin_review()?),
            };

            let assessment = match controller.submit(&submission).await {
                Ok(assessment) => assessment,
                Err(e) if e.is_recoverable() => {
                    eprintln!("{}", format!("⚠️  {}", e).yellow());
                    return Ok(EXIT_REJECTED);
                }
                Err(e) => return Err(e),
            };

            let report = PredictionReport::from_assessment(&assessment);
            let generator = ReportGenerator::from_config(&config.output, verbose);
            let rendered = generator.generate_report(&report, &config.output.format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    info!("Saved report to {}", path.display());
                    println!("💾 Saved {} to {}", report.label, path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Interactive { output, artifacts } => {
            apply_overrides(&mut config, artifacts, output)?;

            let bundle = ClassifierBundle::load(&config.models)?;
            let controller = ReviewController::new(&bundle, config.input.min_tokens);
            let generator = ReportGenerator::from_config(&config.output, verbose);

            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut session = Session::new(
                controller,
                generator,
                config.output.format,
                stdin.lock(),
                stdout.lock(),
            )
            .with_colors(config.output.color_output);

            let stats = session.run().await?;
            println!(
                "\n👋 {} submissions: {} predicted, {} rejected",
                stats.submissions, stats.predictions, stats.rejections
            );
        }

        Commands::Models { action } => match action {
            ModelAction::Check { artifacts } => {
                apply_overrides(&mut config, artifacts, None)?;

                println!("📦 Classifier artifacts");
                println!("  • Vectorizer: {}", config.models.vectorizer_path().display());
                println!("  • Model: {}", config.models.model_path().display());
                println!("  • Label encoder: {}", config.models.label_encoder_path().display());

                let bundle = ClassifierBundle::load(&config.models)?;
                let info = bundle.info();

                println!("\n✅ Bundle loaded");
                println!("  • Vocabulary: {} terms", info.vocabulary_size);
                println!("  • Features: {}", info.n_features);
                println!("  • N-gram range: {}..={}", info.ngram_range.0, info.ngram_range.1);
                println!("  • Classes: {:?}", info.classes);
                println!("  • Decoder labels: {}", info.class_names.join(", "));
            }
        },

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Artifacts Directory: {}", config.models.artifacts_dir.display());
                println!("Vectorizer File: {}", config.models.vectorizer_file);
                println!("Model File: {}", config.models.model_file);
                println!("Label Encoder File: {}", config.models.label_encoder_file);
                println!("\nMinimum Words: {}", config.input.min_tokens);
                println!("\nOutput Format: {:?}", config.output.format);
                println!("Colors: {}", config.output.color_output);
                println!("Celebrate Positive Reviews: {}", config.output.celebrate_positive);
                println!("Show Confidence: {}", config.output.show_confidence);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                let path = config_path.unwrap_or_else(Config::config_path);
                Config::default().save_to(&path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                let path = config_path.unwrap_or_else(Config::config_path);
                println!("{}", path.display());
            }
        },
    }

    Ok(0)
}

fn apply_overrides(config: &mut Config, artifacts: Option<PathBuf>, output: Option<String>) -> Result<()> {
    if let Some(dir) = artifacts {
        config.models.artifacts_dir = dir;
    }
    if let Some(format) = output {
        config.output.format = cli::parse_output_format(&format).map_err(SentimentError::InvalidInput)?;
    }
    if config.output.format != OutputFormat::Console {
        config.output.color_output = false;
    }
    Ok(())
}

/// Read a typed multi-line review from stdin
fn read_stdin_review() -> Result<String> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        println!("✍️  Type or paste your review, then press Ctrl-D:");
    }

    let mut text = String::new();
    stdin.read_to_string(&mut text)?;
    Ok(text)
}
