//! articlex - article extraction from HTML pages

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use articlex::{Extractor, ExtractorConfig, Signature, Source};

#[derive(Parser)]
#[command(name = "articlex")]
#[command(version, about = "Extract the main article from HTML pages", long_about = None)]
#[command(after_help = "EXAMPLES:
    articlex text page.html                         Print the article text
    articlex signature https://example.com/post/1   Print the article's tag path
    articlex by-signature 'html body div.post' page.html
    articlex calibrate https://example.com/1 https://example.com/2 https://example.com/3")]
struct Cli {
    /// JSON configuration file (denylist, thresholds, arithmetic, fetch settings)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log selection decisions to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the article as plain text
    Text {
        /// File path or http(s) URL
        input: String,
    },
    /// Print the article's inner HTML
    Html { input: String },
    /// Print the article's signature
    Signature { input: String },
    /// Print the text selected by a known signature
    BySignature { signature: String, input: String },
    /// Find the most common signature across pages of one template
    Calibrate {
        #[arg(required = true)]
        inputs: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "articlex=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ExtractorConfig, String> {
    let Some(path) = path else {
        return Ok(ExtractorConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| format!("invalid config {}: {e}", path.display()))
}

fn run(cli: &Cli) -> Result<ExitCode, String> {
    let extractor = Extractor::new(load_config(cli.config.as_deref())?);

    match &cli.command {
        Command::Text { input } => {
            let text = extractor
                .extract_text(&Source::from_location(input))
                .map_err(|e| e.to_string())?;
            emit(cli.json, &text, || serde_json::json!({ "text": text }));
        }
        Command::Html { input } => {
            let html = extractor
                .extract_html(&Source::from_location(input))
                .map_err(|e| e.to_string())?;
            emit(cli.json, &html, || serde_json::json!({ "html": html }));
        }
        Command::Signature { input } => {
            let signature = extractor
                .extract_signature(&Source::from_location(input))
                .map_err(|e| e.to_string())?;
            emit(cli.json, signature.as_str(), || {
                serde_json::json!({ "signature": signature })
            });
        }
        Command::BySignature { signature, input } => {
            let signature: Signature = signature.parse().map_err(|e: articlex::Error| e.to_string())?;
            let text = extractor
                .extract_text_by_signature(&Source::from_location(input), &signature)
                .map_err(|e| e.to_string())?;
            match text {
                Some(text) => emit(cli.json, &text, || {
                    serde_json::json!({ "signature": signature, "text": text })
                }),
                None => {
                    if cli.json {
                        println!("{}", serde_json::json!({ "signature": signature, "text": null }));
                    } else {
                        eprintln!("no element matches {signature}");
                    }
                    return Ok(ExitCode::from(2));
                }
            }
        }
        Command::Calibrate { inputs } => {
            let report = extractor
                .calibrate_report(inputs.as_slice())
                .map_err(|e| e.to_string())?;
            if cli.json {
                let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
                println!("{json}");
            } else {
                println!("{}", report.signature);
                for entry in &report.tally {
                    eprintln!("{:>4}  {}", entry.count, entry.signature);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn emit(json: bool, plain: &str, value: impl FnOnce() -> serde_json::Value) {
    if json {
        println!("{}", value());
    } else {
        println!("{plain}");
    }
}
