//! Runner domain model
//!
//! Represents a self-hosted CI runner as reported by the runners listing
//! (`{ "runners": [{ "name", "status", "busy", ... }] }`).
//!
//! Runner fields are only required once something reads them: a runner
//! that no mode ever inspects may omit any of them.

use std::io::Read;

use serde::Deserialize;

use crate::error::{FilterError, Result};

/// A runner field that may be absent from the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerField {
    Name,
    Status,
    Busy,
}

impl RunnerField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunnerField::Name => "name",
            RunnerField::Status => "status",
            RunnerField::Busy => "busy",
        }
    }
}

impl std::fmt::Display for RunnerField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A self-hosted runner entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Runner {
    /// Runner name, matched against machine names
    pub name: Option<String>,

    /// Connection status reported for the runner
    pub status: Option<RunnerStatus>,

    /// Whether the runner is executing a job
    pub busy: Option<bool>,
}

impl Runner {
    /// Create a runner with every field present
    pub fn new(name: impl Into<String>, status: RunnerStatus, busy: bool) -> Self {
        Self {
            name: Some(name.into()),
            status: Some(status),
            busy: Some(busy),
        }
    }

    pub fn name(&self) -> std::result::Result<&str, RunnerField> {
        self.name.as_deref().ok_or(RunnerField::Name)
    }

    pub fn status(&self) -> std::result::Result<&RunnerStatus, RunnerField> {
        self.status.as_ref().ok_or(RunnerField::Status)
    }

    pub fn busy(&self) -> std::result::Result<bool, RunnerField> {
        self.busy.ok_or(RunnerField::Busy)
    }
}

/// Status of a runner
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum RunnerStatus {
    /// Runner is connected
    Online,

    /// Runner is not connected
    Offline,

    /// Any other reported value, kept verbatim
    Other(String),
}

impl RunnerStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, RunnerStatus::Online)
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, RunnerStatus::Offline)
    }
}

impl From<&str> for RunnerStatus {
    fn from(s: &str) -> Self {
        match s {
            "online" => RunnerStatus::Online,
            "offline" => RunnerStatus::Offline,
            other => RunnerStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for RunnerStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "online" => RunnerStatus::Online,
            "offline" => RunnerStatus::Offline,
            _ => RunnerStatus::Other(s),
        }
    }
}

impl std::fmt::Display for RunnerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunnerStatus::Online => write!(f, "online"),
            RunnerStatus::Offline => write!(f, "offline"),
            RunnerStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Wire shape of the document, with `runners` optional so its absence can
/// be reported precisely instead of as a generic parse failure
#[derive(Deserialize)]
struct RawDocument {
    runners: Option<Vec<Runner>>,
}

/// Parsed runners listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnersDocument {
    pub runners: Vec<Runner>,
}

impl RunnersDocument {
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let raw: RawDocument = serde_json::from_reader(reader)?;
        Self::validate(raw)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let raw: RawDocument = serde_json::from_str(content)?;
        Self::validate(raw)
    }

    fn validate(raw: RawDocument) -> Result<Self> {
        let runners = raw
            .runners
            .ok_or(FilterError::MissingField { field: "runners" })?;

        tracing::debug!("Parsed {} runner(s)", runners.len());
        Ok(Self { runners })
    }
}
