//! Electric heater (or cooler, if the target is below the inlet).

use crate::device::Evaluation;
use crate::error::FlowsheetResult;
use crate::stream::Stream;
use sf_core::units::Temperature;
use sf_thermo::SpeciesTable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaterParams {
    pub target_temp: Temperature,
}

impl HeaterParams {
    pub fn new(target_temp: Temperature) -> Self {
        Self { target_temp }
    }

    pub(crate) fn evaluate(
        &self,
        input: &Stream,
        table: &SpeciesTable,
    ) -> FlowsheetResult<Evaluation> {
        let outlet = Stream::new(input.mixture.clone(), self.target_temp, input.phase);
        let duty_j = outlet.enthalpy_j(table)? - input.enthalpy_j(table)?;
        // Heating draws electricity; cooling rejects heat for free.
        let electricity_j = duty_j.max(0.0);
        Ok(Evaluation {
            outputs: vec![outlet],
            duty_j,
            electricity_j,
        })
    }
}
