//! Runner to machine join
//!
//! Resolves which known machines back the runners selected by a mode.

use crate::domain::machine::MachineTable;
use crate::domain::runner::{Runner, RunnerField};
use crate::error::{FilterError, Result};
use crate::selection::SelectionMode;

/// Collect the ids of machines whose runner satisfies `mode`
///
/// Ids are ordered by runner position in `runners`, then by table order
/// for runners backed by several entries. Nothing is deduplicated.
///
/// A runner's `name` is only read once it matched and the table has
/// entries to compare against. A field that has to be read but is absent
/// fails the whole call.
pub fn filter_machines(
    mode: &SelectionMode,
    runners: &[Runner],
    table: &MachineTable,
) -> Result<Vec<String>> {
    let mut ids = Vec::new();

    for (index, runner) in runners.iter().enumerate() {
        let missing = |field: RunnerField| FilterError::MissingRunnerField {
            index,
            field: field.as_str(),
        };

        if !mode.is_match(runner).map_err(missing)? || table.is_empty() {
            continue;
        }

        let name = runner.name().map_err(missing)?;
        ids.extend(table.named(name).map(|machine| machine.id.clone()));
    }

    tracing::debug!(
        "Mode {} selected {} machine(s) from {} runner(s)",
        mode,
        ids.len(),
        runners.len()
    );

    Ok(ids)
}
