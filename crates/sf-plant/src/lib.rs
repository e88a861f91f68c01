//! sf-plant: steelmaking route assembly and evaluation.
//!
//! Wires the generic flowsheet devices into fixed plant topologies (H2
//! DRI-EAF, plasma smelting, and a hybrid of the two), resolves layered
//! configuration into concrete feeds and device parameters, and reports
//! mass flows and electricity per route.

pub mod config;
pub mod error;
pub mod plants;
pub mod report;

pub use config::{ConfigEntry, ConfigScope, ConfigValue, PlantKind, Settings};
pub use error::{PlantError, PlantResult};
pub use plants::{Plant, PlantMeta};
pub use report::{evaluate_all, FlowSummary, PlantReport};
