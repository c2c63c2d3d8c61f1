use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use coldiq::config::{self, Config, OutputFormat};
use coldiq::{build_insights, AnalysisInput, AnalysisResult, Catalog, EmailAnalyzer, InsightRecord};
use log::LevelFilter;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use std::process;

const DEFAULT_CONFIG_PATH: &str = "coldiq.yaml";

fn main() {
    let matches = Command::new("coldiq")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Deterministic quality metrics and fix suggestions for cold outreach emails")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path (defaults to ./coldiq.yaml when present)"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Write the default configuration to FILE and exit")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("generate-catalog")
                .long("generate-catalog")
                .value_name("FILE")
                .help("Write the built-in keyword and pattern catalog to FILE and exit")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate the configuration and its catalog")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("subject")
                .short('s')
                .long("subject")
                .value_name("TEXT")
                .help("Subject line to analyze"),
        )
        .arg(
            Arg::new("body")
                .short('b')
                .long("body")
                .value_name("TEXT")
                .help("Email body to analyze")
                .conflicts_with("body-file"),
        )
        .arg(
            Arg::new("body-file")
                .long("body-file")
                .value_name("FILE")
                .help("Read the email body from FILE ('-' for stdin)"),
        )
        .arg(
            Arg::new("batch")
                .long("batch")
                .value_name("FILE")
                .help("Analyze a JSON array of {subject, body} objects")
                .conflicts_with_all(["body", "body-file"]),
        )
        .arg(
            Arg::new("insights")
                .long("insights")
                .value_name("FILE")
                .help("Build an insights report from a JSON array of stored analyses")
                .conflicts_with_all(["body", "body-file", "batch"]),
        )
        .arg(
            Arg::new("cutoff")
                .long("cutoff")
                .value_name("DATE")
                .help("Earliest created_at (ISO-8601) included in insights trend data"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output shape: full or summary (overrides config)"),
        )
        .arg(
            Arg::new("compact")
                .long("compact")
                .help("Print single-line JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if let Some(path) = matches.get_one::<String>("generate-config") {
        exit_on_error(generate_config(path));
        return;
    }

    if let Some(path) = matches.get_one::<String>("generate-catalog") {
        exit_on_error(Catalog::default().save_to_file(path));
        println!("Default catalog written to {path}");
        return;
    }

    let (config, config_path) = match load_configuration(&matches) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            process::exit(1);
        }
    };

    let configured_level = config.log_level();
    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        configured_level.as_ref().copied().unwrap_or(LevelFilter::Info)
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Err(e) = configured_level {
        log::warn!("{e}, using info");
    }

    match &config_path {
        Some(path) => log::info!("Loaded configuration from: {path}"),
        None => log::debug!("No configuration file, using defaults"),
    }

    if matches.get_flag("test-config") {
        exit_on_error(test_config(&config));
        return;
    }

    exit_on_error(run(&matches, &config));
}

fn exit_on_error(result: Result<()>) {
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// An explicit `--config` must load; the default path is optional.
fn load_configuration(matches: &ArgMatches) -> Result<(Config, Option<String>)> {
    let path = match matches.get_one::<String>("config") {
        Some(path) => path.clone(),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => DEFAULT_CONFIG_PATH.to_string(),
        None => return Ok((Config::default(), None)),
    };
    let config = config::load_config(&path)?;
    Ok((config, Some(path)))
}

fn generate_config(path: &str) -> Result<()> {
    config::save_config(&Config::default(), path)?;
    println!("Default configuration written to {path}");
    Ok(())
}

fn test_config(config: &Config) -> Result<()> {
    println!("Testing configuration...");
    let catalog = config.load_catalog()?;
    EmailAnalyzer::from_catalog(&catalog)?;

    match &config.catalog_path {
        Some(path) => println!("Catalog: {path}"),
        None => println!("Catalog: built-in"),
    }
    println!("  Spam keywords:      {}", catalog.spam_keywords.len());
    println!("  Urgency words:      {}", catalog.urgency_words.len());
    println!("  Curiosity patterns: {}", catalog.curiosity_patterns.len());
    println!(
        "  CTA patterns:       {} in {} groups",
        catalog.cta_pattern_count(),
        catalog.cta_groups.len()
    );
    println!("Configuration is valid.");
    Ok(())
}

fn run(matches: &ArgMatches, config: &Config) -> Result<()> {
    let format = match matches.get_one::<String>("format") {
        Some(value) => value.parse::<OutputFormat>()?,
        None => config.output.format,
    };
    let pretty = config.output.pretty && !matches.get_flag("compact");

    if let Some(path) = matches.get_one::<String>("insights") {
        let records: Vec<InsightRecord> = read_json(path)?;
        let cutoff = matches
            .get_one::<String>("cutoff")
            .map(String::as_str)
            .unwrap_or("");
        return print_json(&build_insights(&records, cutoff), pretty);
    }

    let catalog = config.load_catalog()?;
    let analyzer = EmailAnalyzer::from_catalog(&catalog)?;

    if let Some(path) = matches.get_one::<String>("batch") {
        let inputs: Vec<AnalysisInput> = read_json(path)?;
        log::info!("Analyzing {} emails from {}", inputs.len(), path);
        let results: Vec<AnalysisResult> =
            inputs.iter().map(|input| analyzer.analyze_input(input)).collect();
        return match format {
            OutputFormat::Full => print_json(&results, pretty),
            OutputFormat::Summary => {
                let summaries: Vec<_> = results.iter().map(AnalysisResult::to_summary).collect();
                print_json(&summaries, pretty)
            }
        };
    }

    let subject = matches
        .get_one::<String>("subject")
        .map(String::as_str)
        .unwrap_or("");
    let body = match (
        matches.get_one::<String>("body"),
        matches.get_one::<String>("body-file"),
    ) {
        (Some(body), _) => body.clone(),
        (None, Some(path)) => read_text(path)?,
        (None, None) => bail!("Nothing to analyze: pass --body, --body-file, --batch or --insights"),
    };

    let result = analyzer.analyze(subject, &body);
    match format {
        OutputFormat::Full => print_json(&result, pretty),
        OutputFormat::Summary => print_json(&result.to_summary(), pretty),
    }
}

fn read_text(path: &str) -> Result<String> {
    if path == "-" {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let content = read_text(path)?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON from {path}"))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;
    println!("{output}");
    Ok(())
}
