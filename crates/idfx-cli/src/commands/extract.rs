//! Extract command - extract fields from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use idfx_core::models::config::IdfxConfig;
use idfx_core::{DocumentParser, ExtractionReport, FieldStatus};

use super::config::load_config;
use super::read_document;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (.txt or .pdf)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Fail when a required field is missing or invalid
    #[arg(long)]
    strict: bool,

    /// Leave per-field diagnostics out of the output
    #[arg(long)]
    no_diagnostics: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let text = read_document(&args.input, &config)?;
    if text.trim().is_empty() {
        anyhow::bail!("No text found in {}", args.input.display());
    }

    let parser = config.build_parser()?;
    let mut report = parser.parse(&text);
    if args.no_diagnostics || !config.output.include_diagnostics {
        report = report.without_diagnostics();
    }

    let output = format_report(&report, args.format, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    let missing = report.missing_required();
    if !missing.is_empty() {
        eprintln!(
            "{} Missing required fields: {}",
            style("!").yellow(),
            missing.join(", ")
        );
        if args.strict {
            anyhow::bail!("{} required field(s) missing", missing.len());
        }
    }

    Ok(())
}

pub fn format_report(
    report: &ExtractionReport,
    format: OutputFormat,
    config: &IdfxConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if config.output.pretty => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &ExtractionReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["field", "value", "status", "required", "diagnostic"])?;

    for (key, outcome) in report.iter() {
        wtr.write_record([
            key,
            outcome.value.as_deref().unwrap_or(""),
            outcome.status.as_str(),
            if outcome.required { "true" } else { "false" },
            outcome.diagnostic.as_deref().unwrap_or(""),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &ExtractionReport) -> String {
    let width = report.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut output = String::new();

    for (key, outcome) in report.iter() {
        let marker = match outcome.status {
            FieldStatus::Matched => " ",
            FieldStatus::AmbiguousResolved => "?",
            FieldStatus::NoMatch | FieldStatus::InvalidFormat if outcome.required => "!",
            FieldStatus::NoMatch | FieldStatus::InvalidFormat => "-",
        };
        output.push_str(&format!(
            "{} {:<width$}  {}\n",
            marker,
            key,
            outcome.value.as_deref().unwrap_or("-"),
            width = width
        ));
        if let Some(diagnostic) = &outcome.diagnostic {
            output.push_str(&format!("  {:<width$}  ({})\n", "", diagnostic, width = width));
        }
    }

    output.push_str(&format!(
        "\n{} matched, {} ambiguous, {} invalid, {} missing\n",
        report.count(FieldStatus::Matched),
        report.count(FieldStatus::AmbiguousResolved),
        report.count(FieldStatus::InvalidFormat),
        report.count(FieldStatus::NoMatch)
    ));

    output
}
