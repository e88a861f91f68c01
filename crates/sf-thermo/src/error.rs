//! Thermochemistry errors.

use thiserror::Error;

/// Result type for thermo operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors that can occur during mixture and enthalpy calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// A placeholder/unresolved species reached a mass or energy evaluation.
    #[error("Unresolved species reached {what}")]
    InvalidSpecies { what: &'static str },

    /// A reaction or split would drive a species quantity below zero.
    #[error("{what} would drive {species} to {moles} mol")]
    NegativeQuantity {
        species: &'static str,
        what: &'static str,
        moles: f64,
    },

    /// Temperature outside the range covered by a correlation.
    #[error("Temperature {t_kelvin} K outside correlation range {min_kelvin}-{max_kelvin} K")]
    OutOfRange {
        t_kelvin: f64,
        min_kelvin: f64,
        max_kelvin: f64,
    },

    /// The species table has no entry for a species.
    #[error("No thermo data for species {species}")]
    MissingData { species: &'static str },

    /// Malformed reference data or stoichiometry.
    #[error("Invalid thermo data: {what}")]
    InvalidData { what: &'static str },

    /// Non-physical values (negative mass, non-finite quantity, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ThermoError::NegativeQuantity {
            species: "Fe2O3",
            what: "reaction",
            moles: -0.5,
        };
        assert!(err.to_string().contains("Fe2O3"));

        let err = ThermoError::OutOfRange {
            t_kelvin: 9000.0,
            min_kelvin: 298.0,
            max_kelvin: 4000.0,
        };
        assert!(err.to_string().contains("9000"));
    }
}
