//! Machine domain model
//!
//! A machine is a build host that backs a self-hosted runner. Machines are
//! matched to runners by name and reported by their platform identifier.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use crate::error::{FilterError, Result};

/// Machine table compiled into the binary, used when no file is configured
const BUILTIN_TABLE: &str = include_str!("../../config/machines.json");

/// A known build machine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Machine {
    /// Runner name this machine registers under
    pub name: String,

    /// Platform identifier used by the power on/off tooling, kept verbatim
    pub id: String,
}

impl Machine {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// Ordered set of known machines
///
/// Order is significant: when several entries share a runner name, their
/// ids are reported in table order. Duplicate names are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineTable {
    machines: Vec<Machine>,
}

impl MachineTable {
    pub fn new(machines: Vec<Machine>) -> Self {
        Self { machines }
    }

    /// The default table shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_str(BUILTIN_TABLE)
    }

    /// Load a machine table from a JSON file
    ///
    /// The file holds an array of `{ "name": ..., "id": ... }` objects.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| FilterError::MachineTableIo {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Loading machine table from {}", path.display());
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let machines: Vec<Machine> = serde_json::from_reader(reader)
            .map_err(|e| FilterError::InvalidMachineTable(e.to_string()))?;
        Ok(Self::checked(machines))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let machines: Vec<Machine> = serde_json::from_str(content)
            .map_err(|e| FilterError::InvalidMachineTable(e.to_string()))?;
        Ok(Self::checked(machines))
    }

    fn checked(machines: Vec<Machine>) -> Self {
        if machines.is_empty() {
            tracing::warn!("Machine table is empty, no machine will ever be selected");
        }

        let mut seen = HashSet::new();
        for machine in &machines {
            if Uuid::parse_str(&machine.id).is_err() {
                tracing::warn!(
                    "Machine {} has id {:?} which is not a UUID, it will be printed as-is",
                    machine.name,
                    machine.id
                );
            }

            if !seen.insert(machine.name.as_str()) {
                tracing::warn!(
                    "Machine name {} appears more than once, every entry will be reported",
                    machine.name
                );
            }
        }

        Self { machines }
    }

    /// Iterate machines registered under the given runner name, in table order
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Machine> + 'a {
        self.machines.iter().filter(move |m| m.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Machine> {
        self.machines.iter()
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

impl From<Vec<Machine>> for MachineTable {
    fn from(machines: Vec<Machine>) -> Self {
        Self::new(machines)
    }
}
