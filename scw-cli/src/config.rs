//! Configuration module
//!
//! Resolves parsed command-line arguments into the settings used by a run.

use std::path::PathBuf;

use scw_core::{FilterError, MachineTable, SelectionMode};

/// Where the machine table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineSource {
    /// Table compiled into the binary
    Builtin,
    /// JSON file supplied by the deployment
    File(PathBuf),
}

impl MachineSource {
    pub fn load(&self) -> scw_core::Result<MachineTable> {
        match self {
            MachineSource::Builtin => MachineTable::builtin(),
            MachineSource::File(path) => MachineTable::load(path),
        }
    }
}

/// Where the runners document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Runner selection criterion
    pub mode: SelectionMode,

    /// Machine table location
    pub machines: MachineSource,

    /// Runners document location
    pub input: InputSource,
}

impl Config {
    /// Build the configuration from raw argument values
    ///
    /// `mode` is required. An `input` of `-` means standard input.
    pub fn from_args(
        mode: Option<String>,
        machines: Option<PathBuf>,
        input: Option<PathBuf>,
    ) -> scw_core::Result<Self> {
        let mode = mode
            .map(SelectionMode::from)
            .ok_or(FilterError::MissingArgument("MODE"))?;

        let machines = machines
            .map(MachineSource::File)
            .unwrap_or(MachineSource::Builtin);

        let input = match input {
            Some(path) if path.as_os_str() != "-" => InputSource::File(path),
            _ => InputSource::Stdin,
        };

        Ok(Self {
            mode,
            machines,
            input,
        })
    }
}
