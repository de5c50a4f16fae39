//! CLI Exit Code Registry
//!
//! Single source of truth for the exit codes of `pricelist`.
//! Scripts running `pricelist search` / `pricelist export` rely on them.
//!
//! | Code | Meaning                                                     |
//! |------|-------------------------------------------------------------|
//! | 0    | Success (including "no results" and "no data to export")    |
//! | 1    | General error (unspecified)                                 |
//! | 2    | Usage error (reported by clap)                              |
//! | 3    | Configuration: bad config file, missing source directory,   |
//! |      | load aborted by `--on-bad-file abort`                       |
//! | 4    | Data: a price or weight could not be turned into a rank     |
//! | 5    | IO: report or terminal output could not be written          |

use pricelist_io::{ExportError, LoadError};

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

// 2 (usage) is emitted by clap before any command runs.

/// Configuration error - nothing can be searched.
pub const EXIT_CONFIG: u8 = 3;

/// Data error - non-numeric price/weight or zero weight.
pub const EXIT_DATA: u8 = 4;

/// IO error - output could not be written.
pub const EXIT_IO: u8 = 5;

/// Map a load failure to its exit code.
pub fn load_exit_code(err: &LoadError) -> u8 {
    match err {
        LoadError::SourceDir { .. } => EXIT_CONFIG,
        // Only reachable under `--on-bad-file abort`
        LoadError::ReadFile { .. } | LoadError::Encoding { .. } | LoadError::Csv { .. } => EXIT_CONFIG,
    }
}

/// Map a report export failure to its exit code.
pub fn export_exit_code(err: &ExportError) -> u8 {
    match err {
        ExportError::Rank(_) => EXIT_DATA,
        ExportError::Io { .. } => EXIT_IO,
    }
}
