//! Core domain types
//!
//! Machines are static configuration; runners come from the caller-supplied
//! status document and are never mutated.

pub mod machine;
pub mod runner;
