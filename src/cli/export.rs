//! CLI commands for data export
//!
//! Transactions export to CSV or a printable text report; the full data set
//! exports to JSON or YAML. Without `--output` the file goes to the exports
//! directory under a dated default name; `-` writes to stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Subcommand;

use super::{parse_month, today};
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::export::{
    default_export_filename, export_full_json, export_full_yaml, export_transactions_csv,
    export_transactions_text, ExportFormat, FullExport,
};
use crate::models::Transaction;
use crate::services::{TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export transactions to CSV
    Csv {
        /// Output file path ('-' for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only transactions in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Export transactions as a printable text report
    #[command(alias = "text")]
    Txt {
        /// Output file path ('-' for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only transactions in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        /// Report title
        #[arg(long, default_value = "Transaction Report")]
        title: String,
    },

    /// Export all of your data to JSON
    Json {
        /// Output file path ('-' for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export all of your data to YAML
    #[command(alias = "yml")]
    Yaml {
        /// Output file path ('-' for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show what an export would contain without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> SpendwiseResult<()> {
    match cmd {
        ExportCommands::Csv { output, month } => {
            let transactions = select_transactions(storage, month.as_deref())?;
            let target = ExportTarget::resolve(storage, output, ExportFormat::Csv)?;
            let mut writer = target.open()?;
            export_transactions_csv(&transactions, &mut writer)?;
            finish(writer)?;
            target.report(&format!("Exported {} transactions", transactions.len()));
        }

        ExportCommands::Txt {
            output,
            month,
            title,
        } => {
            let transactions = select_transactions(storage, month.as_deref())?;
            let target = ExportTarget::resolve(storage, output, ExportFormat::Txt)?;
            let mut writer = target.open()?;
            export_transactions_text(&transactions, &title, Local::now().naive_local(), &mut writer)?;
            finish(writer)?;
            target.report(&format!("Exported {} transactions", transactions.len()));
        }

        ExportCommands::Json { output, pretty } => {
            let target = ExportTarget::resolve(storage, output, ExportFormat::Json)?;
            let mut writer = target.open()?;
            export_full_json(storage, &mut writer, pretty)?;
            writeln!(writer).map_err(|e| SpendwiseError::Export(e.to_string()))?;
            finish(writer)?;
            target.report("Exported all data");
        }

        ExportCommands::Yaml { output } => {
            let target = ExportTarget::resolve(storage, output, ExportFormat::Yaml)?;
            let mut writer = target.open()?;
            export_full_yaml(storage, &mut writer)?;
            finish(writer)?;
            target.report("Exported all data");
        }

        ExportCommands::Info => handle_export_info(storage)?,
    }

    Ok(())
}

fn select_transactions(storage: &Storage, month: Option<&str>) -> SpendwiseResult<Vec<Transaction>> {
    let mut filter = TransactionFilter::new();
    if month.is_some() {
        let month = parse_month(month)?;
        filter = filter.date_range(month.start_date(), month.end_date());
    }
    TransactionService::new(storage).list(filter)
}

/// Where an export is written
enum ExportTarget {
    Stdout,
    File(PathBuf),
}

impl ExportTarget {
    fn resolve(storage: &Storage, output: Option<PathBuf>, format: ExportFormat) -> SpendwiseResult<Self> {
        match output {
            Some(path) if path.as_os_str() == "-" => Ok(Self::Stdout),
            Some(path) => Ok(Self::File(path)),
            None => {
                let dir = storage.paths().exports_dir();
                std::fs::create_dir_all(&dir).map_err(|e| {
                    SpendwiseError::Export(format!("Failed to create {}: {}", dir.display(), e))
                })?;
                let name = default_export_filename(format.kind(), format.extension(), today());
                Ok(Self::File(dir.join(name)))
            }
        }
    }

    fn open(&self) -> SpendwiseResult<Box<dyn Write>> {
        match self {
            Self::Stdout => Ok(Box::new(BufWriter::new(io::stdout()))),
            Self::File(path) => Ok(Box::new(BufWriter::new(create_file(path)?))),
        }
    }

    /// Print a confirmation for file exports
    fn report(&self, what: &str) {
        if let Self::File(path) = self {
            println!("{} to: {}", what, path.display());
        }
    }
}

fn create_file(path: &Path) -> SpendwiseResult<File> {
    File::create(path).map_err(|e| {
        SpendwiseError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })
}

fn finish(mut writer: Box<dyn Write>) -> SpendwiseResult<()> {
    writer
        .flush()
        .map_err(|e| SpendwiseError::Export(format!("Failed to write export: {}", e)))
}

/// Show export information
fn handle_export_info(storage: &Storage) -> SpendwiseResult<()> {
    let export = FullExport::from_storage(storage)?;

    println!("Export Information");
    println!("==================\n");

    println!("Schema Version: {}", export.schema_version);
    println!("App Version:    {}", export.app_version);
    println!();

    println!("Data Summary:");
    println!("  Transactions:      {}", export.metadata.transaction_count);
    println!("  Budgets:           {}", export.metadata.budget_count);
    println!("  Custom categories: {}", export.metadata.category_count);
    println!();

    if let Some(earliest) = &export.metadata.earliest_transaction {
        println!("Transaction Date Range:");
        println!("  Earliest: {}", earliest);
    }
    if let Some(latest) = &export.metadata.latest_transaction {
        println!("  Latest:   {}", latest);
    }

    println!("\nExport directory: {}", storage.paths().exports_dir().display());

    println!("\nAvailable Export Formats:");
    println!("  csv  - transactions, spreadsheet-compatible");
    println!("  txt  - transactions, printable report");
    println!("  json - all data, machine-readable");
    println!("  yaml - all data, human-readable");

    Ok(())
}
