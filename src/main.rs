//! Command-line shell: scan one URL or classify one sentence.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use darkscan::{
    ScanOutcome, ScanReport, Scanner,
    config::Config,
    extractor::ExtractOptions,
};
use tracing_subscriber::EnvFilter;

/// Exit status when the classifier artifacts are unusable.
const EXIT_NEEDS_TRAINING: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "darkscan")]
#[command(version)]
#[command(about = "Scan a web page for dark-pattern phrasing")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Model artifact (overrides DARKSCAN_MODEL_PATH)
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Vectorizer artifact (overrides DARKSCAN_VECTORIZER_PATH)
    #[arg(long, global = true)]
    vectorizer: Option<PathBuf>,

    /// Fetch timeout in seconds, 5-10
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Skip <button> labels when extracting page text
    #[arg(long, global = true)]
    no_buttons: bool,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a live page and scan it
    Url { url: String },
    /// Classify a single sentence
    Text { sentence: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let mut config = Config::from_env()?;
    if let Some(path) = args.model {
        config = config.with_model_path(path);
    }
    if let Some(path) = args.vectorizer {
        config = config.with_vectorizer_path(path);
    }
    if let Some(secs) = args.timeout {
        config = config.with_fetch_timeout_secs(secs)?;
    }

    let scanner = match Scanner::from_config(&config) {
        Ok(scanner) => scanner,
        Err(err) => {
            eprintln!("Model files missing or unusable: {err}");
            eprintln!("Run the training step first, then scan again.");
            return Ok(ExitCode::from(EXIT_NEEDS_TRAINING));
        }
    };
    let scanner = scanner.with_extract_options(ExtractOptions {
        include_buttons: !args.no_buttons,
    });

    let report = match &args.command {
        Command::Url { url } => scanner.scan_url(url).await,
        Command::Text { sentence } => scanner.scan_text(sentence),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &ScanReport) {
    if let ScanOutcome::Unreadable { reason } = &report.outcome {
        println!("Could not read website ({reason}). It might be blocking bots.");
    } else if report.is_clean() {
        println!("No dark patterns detected.");
    } else {
        println!("Found {} unique issues:\n", report.count);
        for (i, sentence) in report.flagged.iter().enumerate() {
            println!("{}. \"{}\"", i + 1, sentence);
        }
    }
    println!(
        "\nScan completed in {:.2} seconds ({} sentences checked)",
        report.elapsed.as_secs_f64(),
        report.candidates
    );
}
