use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command ran to completion. A migration that stopped on a
///   missing `package.json` or entry file has been reported and still succeeds.
/// - `Failure` (1): Command refused to run (e.g. `init` with an existing config file)
/// - `Error` (2): Command failed due to internal error (I/O error, invalid config, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command ran to completion.
    Success,
    /// Command refused to run.
    Failure,
    /// Command failed due to internal error.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::from(ExitStatus::Success), ExitCode::from(0));
        assert_eq!(ExitCode::from(ExitStatus::Failure), ExitCode::from(1));
        assert_eq!(ExitCode::from(ExitStatus::Error), ExitCode::from(2));
    }
}
