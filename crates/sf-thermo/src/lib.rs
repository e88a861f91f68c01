//! sf-thermo: chemical reference data and mixture thermochemistry.
//!
//! Contains:
//! - species (element/species identity + molar masses)
//! - heat_capacity (Shomate + constant-Cp correlations, latent heats)
//! - table (immutable per-species reference data context)
//! - mixture (multi-species mole maps with conservation-safe operations)
//! - reaction (stoichiometry with element-balance validation)

pub mod error;
pub mod heat_capacity;
pub mod mixture;
pub mod reaction;
pub mod species;
pub mod table;

pub use error::{ThermoError, ThermoResult};
pub use heat_capacity::{ConstantCp, HeatCapacity, LatentHeat, ShomateEquation, ThermoData};
pub use mixture::Mixture;
pub use reaction::Reaction;
pub use species::{Element, Species};
pub use table::{SpeciesData, SpeciesTable};

/// Mole quantities smaller than this are treated as zero.
pub const EPSILON_MOLES: f64 = 1e-9;
