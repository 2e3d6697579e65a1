// tally CLI — reconcile internal-system and provider-statement exports.

mod exit_codes;
mod export;
mod run;
mod table;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use tally_recon::{AmountCompare, ComparePolicy, DuplicatePolicy, ReconError, StatusCompare};

use exit_codes::{
    EXIT_DUPLICATE, EXIT_EMPTY, EXIT_ERROR, EXIT_IO, EXIT_PARSE, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Reconcile internal-system and provider-statement transaction exports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run reconciliation from a TOML config file
    #[command(after_help = "\
Exit code 1 indicates discrepancies: mismatched pairs or records present in
only one source. Unkeyed rows are reported but never change the exit code.

Examples:
  tally run recon.toml
  tally run recon.toml --json
  tally run recon.toml --output report.json --export-dir out/")]
    Run {
        /// Path to the recon TOML config file
        config: PathBuf,

        /// Print the JSON report to stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write matched/one-sided/unkeyed CSVs into this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,

        /// Suppress the human summary on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Reconcile two CSV files directly, no config required
    #[command(after_help = "\
Both files need a header row with transaction_reference, amount and status
columns (in any order; header names are trimmed). Use `tally run` with a
config file to remap column names.

Examples:
  tally compare internal.csv provider.csv
  tally compare internal.csv provider.csv --amount-compare numeric
  tally compare internal.csv provider.csv --duplicates reject --export-dir out/")]
    Compare {
        /// Internal system export CSV
        internal: PathBuf,

        /// Provider statement CSV
        provider: PathBuf,

        /// Duplicate-key policy during index construction
        #[arg(long, value_enum, default_value = "keep-last")]
        duplicates: DuplicatesArg,

        /// Amount comparison mode
        #[arg(long, value_enum, default_value = "exact")]
        amount_compare: AmountArg,

        /// Status comparison mode
        #[arg(long, value_enum, default_value = "exact")]
        status_compare: StatusArg,

        /// Print the JSON report to stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write matched/one-sided/unkeyed CSVs into this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,

        /// Suppress the human summary on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Validate a recon config without running
    #[command(after_help = "\
Examples:
  tally validate recon.toml")]
    Validate {
        /// Path to the recon TOML config file
        config: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DuplicatesArg {
    KeepLast,
    KeepFirst,
    Reject,
}

impl From<DuplicatesArg> for DuplicatePolicy {
    fn from(arg: DuplicatesArg) -> Self {
        match arg {
            DuplicatesArg::KeepLast => Self::KeepLast,
            DuplicatesArg::KeepFirst => Self::KeepFirst,
            DuplicatesArg::Reject => Self::Reject,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AmountArg {
    Exact,
    Numeric,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    Exact,
    CaseInsensitive,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config, json, output, export_dir, quiet } => {
            run::cmd_run(config, run::OutputOpts { json, output, export_dir, quiet })
        }
        Commands::Compare {
            internal,
            provider,
            duplicates,
            amount_compare,
            status_compare,
            json,
            output,
            export_dir,
            quiet,
        } => {
            let policy = ComparePolicy {
                amount: match amount_compare {
                    AmountArg::Exact => AmountCompare::Exact,
                    AmountArg::Numeric => AmountCompare::Numeric,
                },
                status: match status_compare {
                    StatusArg::Exact => StatusCompare::Exact,
                    StatusArg::CaseInsensitive => StatusCompare::CaseInsensitive,
                },
            };
            run::cmd_compare(
                internal,
                provider,
                duplicates.into(),
                policy,
                run::OutputOpts { json, output, export_dir, quiet },
            )
        }
        Commands::Validate { config } => run::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Map an engine error to its exit code.
    pub fn from_recon(err: ReconError) -> Self {
        let code = match &err {
            ReconError::Precondition { .. } => EXIT_EMPTY,
            ReconError::DuplicateKeys(_) => EXIT_DUPLICATE,
            ReconError::MissingColumn { .. }
            | ReconError::Csv { .. }
            | ReconError::ConfigParse(_)
            | ReconError::ConfigValidation(_) => EXIT_PARSE,
            ReconError::Io(_) => EXIT_IO,
            ReconError::Busy => EXIT_ERROR,
        };
        let hint = match &err {
            ReconError::Precondition { .. } => {
                Some("both CSV files must contain at least one row".to_string())
            }
            ReconError::DuplicateKeys(_) => {
                Some("rerun with --duplicates keep-last to collapse them".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }
}
