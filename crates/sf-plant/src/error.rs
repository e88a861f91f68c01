//! Plant assembly and evaluation errors.

use sf_flowsheet::FlowsheetError;
use sf_solver::SolverError;
use sf_thermo::ThermoError;
use thiserror::Error;

pub type PlantResult<T> = Result<T, PlantError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlantError {
    /// A configuration entry names a key the schema does not know.
    #[error("Unknown config key \"{key}\"")]
    UnknownConfigKey { key: String },

    /// A configuration entry has the wrong value type for its key.
    #[error("Config key \"{key}\" expects a {expected} value")]
    WrongType { key: String, expected: &'static str },

    /// A configuration value is outside its physical range.
    #[error("Config key \"{key}\": {what}")]
    BadConfig { key: &'static str, what: &'static str },

    #[error(transparent)]
    Thermo(#[from] ThermoError),

    #[error(transparent)]
    Flowsheet(#[from] FlowsheetError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}
