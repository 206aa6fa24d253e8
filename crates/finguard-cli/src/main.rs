//! finguard — compliance intent classifier CLI.
//! Entry point for the `finguard` binary.

mod cli;

use std::io::BufRead;

use clap::Parser;
use finguard_common::CatalogConfig;
use finguard_compliance::{build_instruction, ClassificationResult, ComplianceCategory, IntentClassifier};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[derive(Serialize)]
struct ClassifiedLine<'a> {
    text: &'a str,
    #[serde(flatten)]
    result: &'a ClassificationResult,
}

fn render_line(text: &str, result: &ClassificationResult, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string(&ClassifiedLine { text, result })?);
    }
    Ok(format!(
        "{}\t{}\t{}",
        result.category,
        result.matched_pattern.as_deref().unwrap_or("-"),
        text
    ))
}

fn build_classifier(cli: &Cli) -> anyhow::Result<IntentClassifier> {
    let classifier = match CatalogConfig::load(cli.config.as_deref())? {
        Some(config) => IntentClassifier::with_config(&config),
        None => IntentClassifier::default(),
    };
    info!(
        intent_patterns = classifier.catalog().intent_pattern_count(),
        context_markers = classifier.catalog().context.marker_count(),
        "Classifier ready"
    );
    Ok(classifier)
}

fn run_classify(classifier: &IntentClassifier, text: &[String], json: bool) -> anyhow::Result<()> {
    if !text.is_empty() {
        for t in text {
            println!("{}", render_line(t, &classifier.classify(t), json)?);
        }
        return Ok(());
    }

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        println!("{}", render_line(&line, &classifier.classify(&line), json)?);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("finguard=info,warn")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Classify { text, json } => {
            let classifier = build_classifier(&cli)?;
            run_classify(&classifier, text, *json)?;
        }
        Commands::Instruction { category } => {
            let category: ComplianceCategory = category.parse()?;
            if let Some(directive) = build_instruction(category) {
                println!("{directive}");
            }
        }
        Commands::CheckConfig { path } => {
            let config = CatalogConfig::from_path(path)?;
            let classifier = IntentClassifier::with_config(&config);
            println!("catalog: {}", path.display());
            println!("prediction: {} strong, {} weak", config.prediction.strong.len(), config.prediction.weak.len());
            println!("advisory:   {} strong, {} weak", config.advisory.strong.len(), config.advisory.weak.len());
            println!(
                "context:    {} vocabulary, {} suffixes, {} aliases, {} tickers",
                config.context.vocabulary.len(),
                config.context.company_suffixes.len(),
                config.context.company_aliases.len(),
                config.context.tickers.len()
            );
            println!("total intent patterns incl. built-ins: {}", classifier.catalog().intent_pattern_count());
            println!("total context markers incl. built-ins: {}", classifier.catalog().context.marker_count());
        }
    }

    Ok(())
}
