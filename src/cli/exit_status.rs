use std::process::ExitCode;

/// Process exit status of a `sveltedoc` run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every component was documented.
    Success,
    /// At least one component could not be documented.
    Failure,
    /// Nothing was documented: bad config, bad arguments or no input files.
    Error,
}

impl ExitStatus {
    pub fn from_failures(failed: usize) -> Self {
        if failed == 0 {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
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
