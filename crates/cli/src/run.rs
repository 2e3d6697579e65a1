//! `tally run` / `tally compare` / `tally validate` implementations.

use std::path::{Path, PathBuf};

use tally_recon::config::ColumnMapping;
use tally_recon::normalize::read_records;
use tally_recon::report::build_report;
use tally_recon::{
    ComparePolicy, DuplicatePolicy, ReconConfig, ReconSession, Side, TxRecord,
};

use crate::exit_codes::EXIT_DISCREPANCIES;
use crate::export::write_exports;
use crate::table;
use crate::CliError;

pub struct OutputOpts {
    pub json: bool,
    pub output: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub quiet: bool,
}

pub fn cmd_run(config_path: PathBuf, out: OutputOpts) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", config_path.display())))?;
    let config = ReconConfig::from_toml(&config_str).map_err(CliError::from_recon)?;

    // Source paths resolve relative to the config file's directory.
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let internal = load_source(
        Side::Internal,
        &base_dir.join(&config.internal.file),
        &config.internal.columns,
    )?;
    let provider = load_source(
        Side::Provider,
        &base_dir.join(&config.provider.file),
        &config.provider.columns,
    )?;

    run_reconciliation(
        &config.name,
        internal,
        provider,
        config.policy.duplicates,
        config.policy.compare(),
        out,
    )
}

pub fn cmd_compare(
    internal_path: PathBuf,
    provider_path: PathBuf,
    duplicates: DuplicatePolicy,
    policy: ComparePolicy,
    out: OutputOpts,
) -> Result<(), CliError> {
    if internal_path == provider_path {
        return Err(CliError::args("internal and provider are the same file"));
    }

    let columns = ColumnMapping::default();
    let internal = load_source(Side::Internal, &internal_path, &columns)?;
    let provider = load_source(Side::Provider, &provider_path, &columns)?;

    let name = format!(
        "{} vs {}",
        file_label(&internal_path),
        file_label(&provider_path)
    );
    run_reconciliation(&name, internal, provider, duplicates, policy, out)
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", config_path.display())))?;

    let config = ReconConfig::from_toml(&config_str).map_err(CliError::from_recon)?;
    eprintln!(
        "valid: '{}' — internal '{}', provider '{}', duplicates {}",
        config.name,
        config.internal.file,
        config.provider.file,
        config.policy.duplicates.as_str(),
    );
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn load_source(
    side: Side,
    path: &Path,
    columns: &ColumnMapping,
) -> Result<Vec<TxRecord>, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", path.display())))?;
    read_records(side, &text, columns).map_err(CliError::from_recon)
}

fn run_reconciliation(
    name: &str,
    internal: Vec<TxRecord>,
    provider: Vec<TxRecord>,
    duplicates: DuplicatePolicy,
    policy: ComparePolicy,
    out: OutputOpts,
) -> Result<(), CliError> {
    let session = ReconSession::new(duplicates, policy);
    session.load_internal(internal);
    session.load_provider(provider);

    let comparison = session.compare().map_err(CliError::from_recon)?;
    let report = build_report(name, comparison);

    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = out.output {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
        if !out.quiet {
            eprintln!("wrote {}", path.display());
        }
    }

    if let Some(ref dir) = out.export_dir {
        write_exports(dir, &report.comparison, out.quiet)?;
    }

    if out.json {
        println!("{json_str}");
    }

    if !out.quiet {
        table::print_summary(name, &report.summary);
        table::print_discrepancies(&report.comparison.matched);
    }

    if !report.summary.is_clean() {
        return Err(CliError {
            code: EXIT_DISCREPANCIES,
            message: "discrepancies found".into(),
            hint: None,
        });
    }

    Ok(())
}
