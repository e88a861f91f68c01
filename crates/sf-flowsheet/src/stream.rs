//! Material streams.

use sf_core::units::Temperature;
use sf_thermo::{Mixture, SpeciesTable, ThermoResult};

/// Bulk phase label carried alongside a stream.
///
/// Phase is advisory routing information; enthalpy comes from the species
/// table (which carries latent heats at the transition temperatures), not
/// from this label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Solid,
    Liquid,
    Gas,
}

/// A material stream: a mixture at a temperature with a bulk phase.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    pub mixture: Mixture,
    pub temp: Temperature,
    pub phase: Phase,
}

impl Stream {
    pub fn new(mixture: Mixture, temp: Temperature, phase: Phase) -> Self {
        Self {
            mixture,
            temp,
            phase,
        }
    }

    pub fn empty(temp: Temperature, phase: Phase) -> Self {
        Self::new(Mixture::new(), temp, phase)
    }

    /// Total enthalpy [J]: formation plus sensible heat at the stream
    /// temperature.
    pub fn enthalpy_j(&self, table: &SpeciesTable) -> ThermoResult<f64> {
        self.mixture.enthalpy_j(table, self.temp.value)
    }

    pub fn total_mass_kg(&self) -> ThermoResult<f64> {
        self.mixture.total_mass_kg()
    }

    pub fn is_empty(&self) -> bool {
        self.mixture.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::units::k;
    use sf_thermo::Species;

    #[test]
    fn stream_enthalpy_tracks_temperature() {
        let table = SpeciesTable::standard().unwrap();
        let mixture = Mixture::from_moles([(Species::N2, 1.0)]).unwrap();
        let cold = Stream::new(mixture.clone(), k(400.0), Phase::Gas);
        let hot = Stream::new(mixture, k(1400.0), Phase::Gas);
        assert!(hot.enthalpy_j(&table).unwrap() > cold.enthalpy_j(&table).unwrap());
    }

    #[test]
    fn empty_stream_has_zero_enthalpy() {
        let table = SpeciesTable::standard().unwrap();
        let stream = Stream::empty(k(900.0), Phase::Gas);
        assert_eq!(stream.enthalpy_j(&table).unwrap(), 0.0);
    }
}
