//! Two-outlet component splitter.

use crate::device::Evaluation;
use crate::error::{FlowsheetError, FlowsheetResult};
use crate::stream::{Phase, Stream};
use sf_core::units::Temperature;
use sf_thermo::{Species, SpeciesTable};

/// Temperature and phase assigned to one separator outlet.
///
/// `temp: None` passes the inlet temperature through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutletSpec {
    pub temp: Option<Temperature>,
    pub phase: Phase,
}

/// Splits the inlet by per-species fractions into two outlets.
///
/// Species without an override go entirely to the first outlet when
/// `default_to_first` is set, entirely to the second otherwise. The duty is
/// whatever enthalpy change the outlet temperatures impose (a condenser is a
/// separator with a cold first outlet).
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatorParams {
    pub default_to_first: bool,
    /// (species, fraction to first outlet) pairs.
    pub overrides: Vec<(Species, f64)>,
    pub outlets: [OutletSpec; 2],
}

impl SeparatorParams {
    pub(crate) fn evaluate(
        &self,
        input: &Stream,
        table: &SpeciesTable,
    ) -> FlowsheetResult<Evaluation> {
        for (_, fraction) in &self.overrides {
            if !(0.0..=1.0).contains(fraction) {
                return Err(FlowsheetError::BadParameter {
                    kind: "separator",
                    what: "split fraction outside [0, 1]",
                });
            }
        }

        let default = if self.default_to_first { 1.0 } else { 0.0 };
        let (first, second) = input.mixture.split_by(|species| {
            self.overrides
                .iter()
                .find(|(s, _)| *s == species)
                .map(|(_, f)| *f)
                .unwrap_or(default)
        })?;

        let h_in = input.enthalpy_j(table)?;
        let outputs = vec![
            Stream::new(
                first,
                self.outlets[0].temp.unwrap_or(input.temp),
                self.outlets[0].phase,
            ),
            Stream::new(
                second,
                self.outlets[1].temp.unwrap_or(input.temp),
                self.outlets[1].phase,
            ),
        ];
        let h_out = outputs[0].enthalpy_j(table)? + outputs[1].enthalpy_j(table)?;

        Ok(Evaluation {
            outputs,
            duty_j: h_out - h_in,
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

    fn pass_through() -> OutletSpec {
        OutletSpec {
            temp: None,
            phase: Phase::Gas,
        }
    }

    #[test]
    fn splits_by_override_and_default() {
        let input = Stream::new(
            Mixture::from_moles([(Species::H2, 4.0), (Species::H2O, 2.0)]).unwrap(),
            k(500.0),
            Phase::Gas,
        );
        let params = SeparatorParams {
            default_to_first: true,
            overrides: vec![(Species::H2O, 0.25)],
            outlets: [pass_through(), pass_through()],
        };
        let out = params.evaluate(&input, &table()).unwrap();
        assert!((out.outputs[0].mixture.moles(Species::H2) - 4.0).abs() < 1e-12);
        assert!((out.outputs[0].mixture.moles(Species::H2O) - 0.5).abs() < 1e-12);
        assert!((out.outputs[1].mixture.moles(Species::H2O) - 1.5).abs() < 1e-12);
        // Pass-through temperatures mean no duty.
        assert!(out.duty_j.abs() < 1e-9);
    }

    #[test]
    fn condenser_style_outlet_reports_cooling_duty() {
        let input = Stream::new(
            Mixture::from_moles([(Species::H2, 1.0), (Species::H2O, 1.0)]).unwrap(),
            k(900.0),
            Phase::Gas,
        );
        let params = SeparatorParams {
            default_to_first: true,
            overrides: vec![(Species::H2O, 0.0)],
            outlets: [
                OutletSpec {
                    temp: Some(k(320.0)),
                    phase: Phase::Gas,
                },
                OutletSpec {
                    temp: Some(k(320.0)),
                    phase: Phase::Liquid,
                },
            ],
        };
        let out = params.evaluate(&input, &table()).unwrap();
        assert!(out.duty_j < 0.0);
        assert!(out.outputs[1].mixture.moles(Species::H2O) > 0.99);
    }

    #[test]
    fn bad_fraction_rejected() {
        let input = Stream::new(
            Mixture::from_moles([(Species::H2, 1.0)]).unwrap(),
            k(400.0),
            Phase::Gas,
        );
        let params = SeparatorParams {
            default_to_first: true,
            overrides: vec![(Species::H2, 1.5)],
            outlets: [pass_through(), pass_through()],
        };
        assert!(matches!(
            params.evaluate(&input, &table()),
            Err(FlowsheetError::BadParameter { .. })
        ));
    }
}
