//! SCW Machines Core
//!
//! Maps self-hosted CI runners to the build machines that back them.
//!
//! This crate contains:
//! - Domain types: machines (static configuration) and runners (status input)
//! - Selection modes and the runner predicate
//! - The runner to machine join used by the power on/off tooling
//!
//! # Example
//!
//! ```
//! use scw_core::{MachineTable, RunnersDocument, SelectionMode, filter_machines};
//!
//! let table = MachineTable::builtin()?;
//! let doc = RunnersDocument::from_str(
//!     r#"{ "runners": [{ "name": "Ternoa-Build-Machine-0", "status": "online", "busy": false }] }"#,
//! )?;
//!
//! let ids = filter_machines(&SelectionMode::parse("ONLINE_NBUSY"), &doc.runners, &table)?;
//! assert_eq!(ids, vec!["14930b12-a780-4dd0-a131-069f5d6024bd"]);
//! # Ok::<(), scw_core::FilterError>(())
//! ```

pub mod domain;
pub mod error;
pub mod filter;
pub mod selection;

// Re-export commonly used types
pub use domain::machine::{Machine, MachineTable};
pub use domain::runner::{Runner, RunnerField, RunnerStatus, RunnersDocument};
pub use error::{FilterError, Result};
pub use filter::filter_machines;
pub use selection::SelectionMode;
