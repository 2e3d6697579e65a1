//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Success — reconciled, no discrepancies          |
//! | 1    | Discrepancies found                             |
//! | 2    | CLI usage error (bad args)                      |
//! | 3    | Duplicate keys in input (`reject` policy)       |
//! | 4    | Nothing to reconcile (empty input collection)   |
//! | 5    | Parse error (CSV or config)                     |
//! | 6    | IO error (unreadable input, unwritable output)  |

/// Success - command completed and the sources reconciled cleanly.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Discrepancies found: mismatched pairs or one-sided records.
/// Like `diff(1)`, exit 1 means "the sources differ."
pub const EXIT_DISCREPANCIES: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Duplicate keys found in input under the `reject` policy.
pub const EXIT_DUPLICATE: u8 = 3;

/// Either input collection was empty at invocation time.
pub const EXIT_EMPTY: u8 = 4;

/// Parse error reading input files or the config.
pub const EXIT_PARSE: u8 = 5;

/// IO error reading inputs or writing outputs.
pub const EXIT_IO: u8 = 6;
