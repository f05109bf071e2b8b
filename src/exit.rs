// src/exit.rs
//! Standardized process exit codes for `lectern`.
//!
//! Provides a stable contract for CI jobs and shell automation:
//! `0` means success with nothing to report, `1` means a validator
//! found issues. Operational failures also exit `1`, via the error
//! path in the binary.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum LecternExit {
    /// Operation completed with no findings.
    Success = 0,
    /// A validator found violations (broken links, naming, layout, assets).
    CheckFailed = 1,
}

impl LecternExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Collapses a findings count to an exit status.
    #[must_use]
    pub fn from_findings(count: usize) -> Self {
        if count == 0 {
            Self::Success
        } else {
            Self::CheckFailed
        }
    }
}

impl Termination for LecternExit {
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    fn report(self) -> std::process::ExitCode {
        std::process::ExitCode::from(self.code() as u8)
    }
}
