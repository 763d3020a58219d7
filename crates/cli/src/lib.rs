//! Command-line front end: read a JSON dataset, print the ranked report.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};

use salesrank_analytics::{AnalyzeOptions, RankedSeller, analyze, decode_dataset, decode_options};
use salesrank_observability::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "salesrank", version)]
#[command(about = "Rank sellers by profit and compute rank-based bonuses")]
pub struct Cli {
    /// Log output format on stderr (json or compact)
    #[arg(long, global = true, default_value = "json", env = "SALESRANK_LOG_FORMAT")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a dataset and print the report as a JSON array
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// JSON file with `sellers`, `products` and `purchase_records`
    #[arg(short, long)]
    pub data: PathBuf,

    /// JSON file with analysis options (minProfit, dateFrom, dateTo, bonusRates)
    #[arg(short, long)]
    pub options: Option<PathBuf>,

    /// Drop sellers whose profit is below this value (overrides the options file)
    #[arg(long, env = "SALESRANK_MIN_PROFIT", allow_hyphen_values = true)]
    pub min_profit: Option<f64>,

    /// First receipt date to include, YYYY-MM-DD (overrides the options file)
    #[arg(long, env = "SALESRANK_DATE_FROM")]
    pub date_from: Option<NaiveDate>,

    /// Last receipt date to include, YYYY-MM-DD (overrides the options file)
    #[arg(long, env = "SALESRANK_DATE_TO")]
    pub date_to: Option<NaiveDate>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}

impl AnalyzeArgs {
    /// Options file first, then command-line flags on top.
    pub fn resolve_options(&self) -> anyhow::Result<AnalyzeOptions> {
        let raw = match &self.options {
            Some(path) => read_json(path)?,
            None => json!({}),
        };
        let mut options = decode_options(&raw)
            .with_context(|| format!("invalid options{}", describe(self.options.as_deref())))?;

        if let Some(min_profit) = self.min_profit {
            options.min_profit = Some(min_profit);
        }
        if let Some(from) = self.date_from {
            options.date_from = Some(from);
        }
        if let Some(to) = self.date_to {
            options.date_to = Some(to);
        }
        Ok(options)
    }
}

fn describe(path: Option<&Path>) -> String {
    path.map(|p| format!(" in {}", p.display())).unwrap_or_default()
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Run the `analyze` command and return the report.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<Vec<RankedSeller>> {
    let options = args.resolve_options()?;
    let data = read_json(&args.data)?;
    let dataset = decode_dataset(&data)
        .with_context(|| format!("invalid dataset in {}", args.data.display()))?;

    tracing::debug!(
        sellers = dataset.sellers.len(),
        products = dataset.products.len(),
        receipts = dataset.purchase_records.len(),
        "dataset loaded"
    );

    Ok(analyze(&dataset, &options)?)
}

/// Serialize the report for stdout.
pub fn render(report: &[RankedSeller], pretty: bool) -> anyhow::Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(out)
}
