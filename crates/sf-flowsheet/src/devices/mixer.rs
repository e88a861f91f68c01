//! Stream mixer.

use crate::device::Evaluation;
use crate::error::{FlowsheetError, FlowsheetResult};
use crate::stream::{Phase, Stream};
use sf_core::units::{k, Temperature};
use sf_thermo::{Mixture, SpeciesTable};

/// How the mixer sets its outlet temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MixerOutlet {
    /// Outlet temperature solved so the mix has zero net duty.
    Adiabatic,
    /// Outlet forced to a temperature; the duty makes up the difference.
    Fixed(Temperature),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MixerParams {
    pub inlets: usize,
    pub outlet: MixerOutlet,
    pub phase: Phase,
}

impl MixerParams {
    pub fn adiabatic(inlets: usize, phase: Phase) -> Self {
        Self {
            inlets,
            outlet: MixerOutlet::Adiabatic,
            phase,
        }
    }

    pub fn fixed(inlets: usize, temp: Temperature, phase: Phase) -> Self {
        Self {
            inlets,
            outlet: MixerOutlet::Fixed(temp),
            phase,
        }
    }

    pub(crate) fn evaluate(
        &self,
        inputs: &[Stream],
        table: &SpeciesTable,
    ) -> FlowsheetResult<Evaluation> {
        if self.inlets < 1 {
            return Err(FlowsheetError::BadParameter {
                kind: "mixer",
                what: "needs at least one inlet",
            });
        }

        let mut merged = Mixture::new();
        let mut h_in = 0.0;
        for stream in inputs {
            merged = merged.merge(&stream.mixture);
            h_in += stream.enthalpy_j(table)?;
        }

        match self.outlet {
            MixerOutlet::Fixed(temp) => {
                let outlet = Stream::new(merged, temp, self.phase);
                let duty_j = outlet.enthalpy_j(table)? - h_in;
                Ok(Evaluation {
                    outputs: vec![outlet],
                    duty_j,
                    electricity_j: 0.0,
                })
            }
            MixerOutlet::Adiabatic => {
                let t_out = adiabatic_outlet_kelvin(&merged, h_in, inputs, table)?;
                let outlet = Stream::new(merged, k(t_out), self.phase);
                Ok(Evaluation {
                    outputs: vec![outlet],
                    duty_j: 0.0,
                    electricity_j: 0.0,
                })
            }
        }
    }
}

/// Solve H(T) = h_target by bisection.
///
/// Mixture enthalpy is strictly increasing in temperature, and the target
/// (the sum of inlet enthalpies) always lies between H(min inlet T) and
/// H(max inlet T), so the bracket from the inlet temperatures is valid.
fn adiabatic_outlet_kelvin(
    merged: &Mixture,
    h_target: f64,
    inputs: &[Stream],
    table: &SpeciesTable,
) -> FlowsheetResult<f64> {
    let mut t_lo = f64::INFINITY;
    let mut t_hi = f64::NEG_INFINITY;
    for stream in inputs {
        t_lo = t_lo.min(stream.temp.value);
        t_hi = t_hi.max(stream.temp.value);
    }

    if merged.is_empty() || (t_hi - t_lo) < 1e-9 {
        return Ok(t_lo);
    }

    for _ in 0..200 {
        let t_mid = 0.5 * (t_lo + t_hi);
        let h_mid = merged.enthalpy_j(table, t_mid)?;
        if h_mid < h_target {
            t_lo = t_mid;
        } else {
            t_hi = t_mid;
        }
        if t_hi - t_lo < 1e-9 {
            break;
        }
    }
    Ok(0.5 * (t_lo + t_hi))
}
