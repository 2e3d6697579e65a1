//! CSV export of comparison partitions.
//!
//! File names and column layouts match the report consumers' contract:
//! matched pairs get both sides' fields, one-sided and unkeyed records get
//! plain key/amount/status rows.

use std::path::Path;

use tally_recon::model::{Comparison, TxRecord};
use tally_recon::report::{matched_rows, orphan_rows, MATCHED_HEADER, ORPHAN_HEADER};

use crate::CliError;

pub fn write_exports(dir: &Path, comparison: &Comparison, quiet: bool) -> Result<(), CliError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| CliError::io(format!("cannot create {}: {e}", dir.display())))?;

    write_matched(&dir.join("matched_transactions.csv"), comparison)?;
    write_orphans(
        &dir.join("internal_only_transactions.csv"),
        &comparison.internal_only,
    )?;
    write_orphans(
        &dir.join("provider_only_transactions.csv"),
        &comparison.provider_only,
    )?;

    // Unkeyed buckets are exported only when present.
    if !comparison.unkeyed_internal.is_empty() {
        write_orphans(&dir.join("unkeyed_internal.csv"), &comparison.unkeyed_internal)?;
    }
    if !comparison.unkeyed_provider.is_empty() {
        write_orphans(&dir.join("unkeyed_provider.csv"), &comparison.unkeyed_provider)?;
    }

    if !quiet {
        eprintln!(
            "export: wrote {} matched, {} internal-only, {} provider-only rows to {}",
            comparison.matched.len(),
            comparison.internal_only.len(),
            comparison.provider_only.len(),
            dir.display(),
        );
    }

    Ok(())
}

fn write_matched(path: &Path, comparison: &Comparison) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| CliError::io(format!("cannot create {}: {e}", path.display())))?;

    writer.write_record(MATCHED_HEADER).map_err(write_err)?;
    for row in matched_rows(&comparison.matched) {
        writer.write_record(&row).map_err(write_err)?;
    }
    writer.flush().map_err(|e| CliError::io(format!("write error: {e}")))
}

fn write_orphans(path: &Path, records: &[TxRecord]) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| CliError::io(format!("cannot create {}: {e}", path.display())))?;

    writer.write_record(ORPHAN_HEADER).map_err(write_err)?;
    for row in orphan_rows(records) {
        writer.write_record(&row).map_err(write_err)?;
    }
    writer.flush().map_err(|e| CliError::io(format!("write error: {e}")))
}

fn write_err(e: csv::Error) -> CliError {
    CliError::io(format!("write error: {e}"))
}
