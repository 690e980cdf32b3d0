//! Selection modes
//!
//! The caller picks which runners are of interest by connection status and
//! busy flag.

use crate::domain::runner::{Runner, RunnerField};

/// Runner selection criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// Online and idle
    OnlineNotBusy,

    /// Online and running a job
    OnlineBusy,

    /// Online, busy or not
    Online,

    /// Offline
    Offline,

    /// Any other value. Selects nothing.
    Unrecognized(String),
}

impl SelectionMode {
    /// Parse a mode argument
    ///
    /// Never fails: unknown values become [`SelectionMode::Unrecognized`].
    pub fn parse(input: &str) -> Self {
        match input {
            "ONLINE_NBUSY" => SelectionMode::OnlineNotBusy,
            "ONLINE_BUSY" => SelectionMode::OnlineBusy,
            "ONLINE" => SelectionMode::Online,
            "OFFLINE" => SelectionMode::Offline,
            other => SelectionMode::Unrecognized(other.to_string()),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, SelectionMode::Unrecognized(_))
    }

    /// Check whether a runner satisfies this mode
    ///
    /// Only the runner's status and busy flag are considered, and only the
    /// ones the mode needs: `busy` is read for online runners in the busy
    /// modes, and an unrecognized mode reads nothing. A missing field that
    /// has to be read is returned as the error.
    pub fn is_match(&self, runner: &Runner) -> Result<bool, RunnerField> {
        let matched = match self {
            SelectionMode::OnlineNotBusy => runner.status()?.is_online() && !runner.busy()?,
            SelectionMode::OnlineBusy => runner.status()?.is_online() && runner.busy()?,
            SelectionMode::Online => runner.status()?.is_online(),
            SelectionMode::Offline => runner.status()?.is_offline(),
            SelectionMode::Unrecognized(_) => false,
        };
        Ok(matched)
    }
}

impl std::fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionMode::OnlineNotBusy => write!(f, "ONLINE_NBUSY"),
            SelectionMode::OnlineBusy => write!(f, "ONLINE_BUSY"),
            SelectionMode::Online => write!(f, "ONLINE"),
            SelectionMode::Offline => write!(f, "OFFLINE"),
            SelectionMode::Unrecognized(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for SelectionMode {
    fn from(s: &str) -> Self {
        SelectionMode::parse(s)
    }
}

impl From<String> for SelectionMode {
    fn from(s: String) -> Self {
        SelectionMode::parse(&s)
    }
}
