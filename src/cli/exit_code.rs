use std::process::ExitCode;

use crate::commands::RunResult;

/// Process exit status for the proplint binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Clean run, no errors.
    Success,
    /// The command ran but found error-severity issues.
    Failure,
    /// The command itself failed (bad config, I/O error, ...).
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

pub fn exit_status_from_result(result: &RunResult) -> ExitStatus {
    if result.exit_on_errors && result.error_count > 0 {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    }
}
