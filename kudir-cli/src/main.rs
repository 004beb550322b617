use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use kudir_core::{
    PartyRules, SummaryRow, merge_summaries, summarize_contractors, summarize_counterparties,
};
use kudir_ingest::{
    contractor_table, parse_fixed_ledger, parse_named_ledger, parse_summary, read_table,
    summary_table, write_table,
};

/// Fallback output name for `merge` when no --output is given.
const DEFAULT_MERGE_OUTPUT: &str = "total_results.xlsx";

#[derive(Parser, Debug)]
#[command(name = "kudir", version, about = "KUDiR ledger expense summarizer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize expenses per contractor from a fixed-layout ledger export
    Analyze {
        /// Ledger export (.xlsx or .csv)
        file: PathBuf,

        /// Output path (default: result_<name>.xlsx next to the input)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Build a total/tax-base report from a named-column ledger export
    Report {
        /// Ledger export (.xlsx or .csv)
        file: PathBuf,

        /// Output path (default: report_<name>.xlsx next to the input)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Merge per-file summaries into one consolidated report
    Merge {
        /// Summary files produced by `report` (or compatible)
        files: Vec<PathBuf>,

        /// Output path for the consolidated report
        #[arg(long, default_value = DEFAULT_MERGE_OUTPUT)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze { file, output } => analyze(&file, output),
        Command::Report { file, output } => report(&file, output),
        Command::Merge { files, output } => merge(&files, output),
    }
}

fn analyze(file: &Path, output: Option<PathBuf>) -> Result<()> {
    if !file.exists() {
        bail!("file not found: {}", file.display());
    }
    let table = read_table(file)?;
    let records = parse_fixed_ledger(&table);
    let rules = PartyRules::raw()?;
    let totals = summarize_contractors(&records, &rules);

    let output = ensure_tabular_ext(output.unwrap_or_else(|| derived_output(file, "result")));
    write_table(&output, &contractor_table(&totals))
        .with_context(|| format!("writing {}", output.display()))?;

    println!("{} records -> {} contractors", records.len(), totals.len());
    println!("Summary saved: {}", output.display());
    Ok(())
}

fn report(file: &Path, output: Option<PathBuf>) -> Result<()> {
    if !file.exists() {
        bail!("file not found: {}", file.display());
    }
    let table = read_table(file)?;
    let records = parse_named_ledger(&table)
        .with_context(|| format!("parsing {}", file.display()))?;
    let rules = PartyRules::canonical()?;
    let rows = summarize_counterparties(&records, &rules);

    let output = ensure_tabular_ext(output.unwrap_or_else(|| derived_output(file, "report")));
    write_table(&output, &summary_table(&rows))
        .with_context(|| format!("writing {}", output.display()))?;

    println!("{} records -> {} counterparties", records.len(), rows.len());
    println!("Report saved: {}", output.display());
    Ok(())
}

fn merge(files: &[PathBuf], output: PathBuf) -> Result<()> {
    if files.is_empty() {
        bail!("no input files given");
    }

    let mut summaries: Vec<Vec<SummaryRow>> = Vec::new();
    for file in files {
        println!("Processing {}", file.display());
        match read_summary(file) {
            Ok(rows) => summaries.push(rows),
            // Per-file soft failure: report it, keep merging the rest.
            Err(err) => log::warn!("skipping {}: {err:#}", file.display()),
        }
    }
    if summaries.is_empty() {
        bail!("no usable input files");
    }

    let merged = merge_summaries(&summaries);
    let output = ensure_tabular_ext(output);
    write_table(&output, &summary_table(&merged))
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Merged {} of {} files -> {} counterparties",
        summaries.len(),
        files.len(),
        merged.len()
    );
    println!("Consolidated report saved: {}", output.display());
    Ok(())
}

fn read_summary(file: &Path) -> Result<Vec<SummaryRow>> {
    if !file.exists() {
        bail!("file not found");
    }
    let table = read_table(file)?;
    parse_summary(&table)
}

/// `result_<stem>.xlsx` (or `report_<stem>.xlsx`) next to the input file.
fn derived_output(input: &Path, prefix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("summary");
    input.with_file_name(format!("{prefix}_{stem}.xlsx"))
}

/// Append `.xlsx` to output paths without a recognized tabular extension.
fn ensure_tabular_ext(path: PathBuf) -> PathBuf {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("xlsx") | Some("csv") => path,
        _ => PathBuf::from(format!("{}.xlsx", path.display())),
    }
}
