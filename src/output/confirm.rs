// src/output/confirm.rs
//! Overwrite confirmation as an injected capability.
//!
//! Headless runs and tests supply a deterministic answer; the CLI asks
//! the controlling terminal. The gate runs before any network call, so
//! a declined answer costs nothing.

use crate::error::AppError;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// The ability to approve overwriting an existing sink file.
pub trait OverwriteConfirm {
    /// Returns whether the file at `path` may be overwritten.
    fn confirm_overwrite(&self, path: &Path) -> Result<bool, AppError>;
}

/// Asks a yes/no question on the controlling terminal.
///
/// Anything other than an affirmative answer declines.
pub struct TerminalConfirm;

impl OverwriteConfirm for TerminalConfirm {
    fn confirm_overwrite(&self, path: &Path) -> Result<bool, AppError> {
        eprint!("{} already exists. Overwrite? [y/N] ", path.display());
        io::stderr().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(is_affirmative(&answer))
    }
}

/// Always approves — used by `--yes` mode.
pub struct AssumeYes;

impl OverwriteConfirm for AssumeYes {
    fn confirm_overwrite(&self, _path: &Path) -> Result<bool, AppError> {
        Ok(true)
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affirmative_answers() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y\n"));
        assert!(is_affirmative("  yes  "));
    }

    #[test]
    fn everything_else_declines() {
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yeah"));
        assert!(!is_affirmative("maybe"));
    }

    #[test]
    fn assume_yes_always_approves() {
        let approved = AssumeYes
            .confirm_overwrite(Path::new("whatever.csv"))
            .unwrap();
        assert!(approved);
    }
}
