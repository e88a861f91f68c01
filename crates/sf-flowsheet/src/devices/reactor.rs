//! Single-reaction conversion reactor.

use crate::device::Evaluation;
use crate::error::{FlowsheetError, FlowsheetResult};
use crate::stream::{Phase, Stream};
use sf_core::units::Temperature;
use sf_thermo::{Reaction, Species, SpeciesTable, EPSILON_MOLES};

/// Runs one reaction to a fixed conversion of a key species.
///
/// The extent is `conversion * n_key / |coeff_key|`, capped so no reactant
/// is driven negative (a starved co-reactant limits the reaction instead of
/// erroring).
#[derive(Debug, Clone, PartialEq)]
pub struct ReactorParams {
    pub reaction: Reaction,
    pub key_species: Species,
    pub conversion: f64,
    /// Outlet temperature; `None` keeps the inlet temperature and lets the
    /// duty carry the reaction heat.
    pub outlet_temp: Option<Temperature>,
    pub outlet_phase: Phase,
}

impl ReactorParams {
    pub(crate) fn evaluate(
        &self,
        input: &Stream,
        table: &SpeciesTable,
    ) -> FlowsheetResult<Evaluation> {
        if !(0.0..=1.0).contains(&self.conversion) {
            return Err(FlowsheetError::BadParameter {
                kind: "reactor",
                what: "conversion outside [0, 1]",
            });
        }
        let key_coeff = self.reaction.coeff(self.key_species);
        if key_coeff >= 0.0 {
            return Err(FlowsheetError::BadParameter {
                kind: "reactor",
                what: "key species must be a reactant of the reaction",
            });
        }

        let mut extent = self.conversion * input.mixture.moles(self.key_species) / -key_coeff;
        for (species, coeff) in self.reaction.coeffs() {
            if coeff < 0.0 {
                extent = extent.min(input.mixture.moles(species) / -coeff);
            }
        }
        extent = extent.max(0.0);

        let product = if extent > EPSILON_MOLES {
            input.mixture.react(&self.reaction, extent)?
        } else {
            input.mixture.clone()
        };

        let outlet = Stream::new(
            product,
            self.outlet_temp.unwrap_or(input.temp),
            self.outlet_phase,
        );
        let duty_j = outlet.enthalpy_j(table)? - input.enthalpy_j(table)?;
        Ok(Evaluation {
            outputs: vec![outlet],
            duty_j,
            electricity_j: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::units::k;
    use sf_thermo::Mixture;

    fn table() -> SpeciesTable {
        SpeciesTable::standard().unwrap()
    }

    fn shaft(conversion: f64) -> ReactorParams {
        ReactorParams {
            reaction: Reaction::hematite_h2_reduction().unwrap(),
            key_species: Species::Fe2O3,
            conversion,
            outlet_temp: None,
            outlet_phase: Phase::Solid,
        }
    }

    #[test]
    fn isothermal_reduction_duty_is_endothermic() {
        let input = Stream::new(
            Mixture::from_moles([(Species::Fe2O3, 1.0), (Species::H2, 5.0)]).unwrap(),
            k(973.15),
            Phase::Solid,
        );
        let out = shaft(0.95).evaluate(&input, &table()).unwrap();
        assert!((out.outputs[0].mixture.moles(Species::Fe) - 1.9).abs() < 1e-9);
        assert!(out.duty_j > 0.0);
    }

    #[test]
    fn starved_hydrogen_caps_the_extent() {
        // Only 1.5 mol H2: extent limited to 0.5 even at full conversion.
        let input = Stream::new(
            Mixture::from_moles([(Species::Fe2O3, 1.0), (Species::H2, 1.5)]).unwrap(),
            k(973.15),
            Phase::Solid,
        );
        let out = shaft(1.0).evaluate(&input, &table()).unwrap();
        assert!((out.outputs[0].mixture.moles(Species::Fe) - 1.0).abs() < 1e-9);
        assert!((out.outputs[0].mixture.moles(Species::Fe2O3) - 0.5).abs() < 1e-9);
        assert_eq!(out.outputs[0].mixture.moles(Species::H2), 0.0);
    }

    #[test]
    fn absent_key_species_is_a_no_op() {
        let input = Stream::new(
            Mixture::from_moles([(Species::H2, 2.0)]).unwrap(),
            k(973.15),
            Phase::Gas,
        );
        let out = shaft(0.95).evaluate(&input, &table()).unwrap();
        assert_eq!(out.outputs[0].mixture, input.mixture);
        assert!(out.duty_j.abs() < 1e-9);
    }

    #[test]
    fn conversion_above_one_rejected() {
        let input = Stream::new(Mixture::new(), k(973.15), Phase::Solid);
        assert!(matches!(
            shaft(1.2).evaluate(&input, &table()),
            Err(FlowsheetError::BadParameter { .. })
        ));
    }
}
