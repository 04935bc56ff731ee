use std::process::ExitCode;

/// Process exit status of a tsglot run.
///
/// - `Success` (0): no error-severity issues (warnings alone still succeed)
/// - `Failure` (1): the command found catalogue errors
/// - `Error` (2): the command could not run (bad config, unreadable file, ...)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        let code: u8 = match status {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        };
        ExitCode::from(code)
    }
}
