use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use beleg_analyze::{AnalyzeConfig, ReceiptAnalyzer, TextDocument};

/// Analyze a photographed receipt's OCR output into line items and a total.
#[derive(Parser)]
#[command(name = "beleg")]
struct Args {
    /// Path to the OCR document JSON, or "-" for stdin.
    document: PathBuf,

    /// Optional TOML file overriding analysis thresholds.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the output JSON.
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => AnalyzeConfig::default(),
    };

    let raw = if args.document.to_str() == Some("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read document from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&args.document)
            .with_context(|| format!("Failed to read {}", args.document.display()))?
    };

    let doc: TextDocument =
        serde_json::from_str(&raw).context("Document is not valid OCR output JSON")?;

    let analysis = ReceiptAnalyzer::new(config)
        .analyze(&doc)
        .context("Receipt analysis failed")?;
    tracing::info!(
        angle = analysis.angle(),
        prices = analysis.price_blocks().count(),
        columns = analysis.columns().len(),
        items = analysis.items().len(),
        "analysis complete"
    );

    let summary = analysis.summary();
    let out = if args.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{out}");
    Ok(())
}
