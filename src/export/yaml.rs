//! YAML Export functionality
//!
//! The same snapshot as the JSON export, in a format that is easier to read.

use std::io::Write;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the user's data to YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> SpendwiseResult<()> {
    let export = FullExport::from_storage(storage)?;
    let err = |e: std::io::Error| SpendwiseError::Export(e.to_string());

    writeln!(writer, "# Spendwise Data Export").map_err(err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(err)?;
    writeln!(writer, "#").map_err(err)?;
    writeln!(writer, "# Contains all of your transactions and budgets. Keep it private.").map_err(err)?;
    writeln!(writer).map_err(err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| SpendwiseError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a YAML export
pub fn read_full_yaml(yaml_str: &str) -> SpendwiseResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| SpendwiseError::Export(e.to_string()))?;
    export.validate().map_err(SpendwiseError::Export)?;
    Ok(export)
}
