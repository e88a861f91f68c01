//! Device specifications and evaluation dispatch.

use crate::devices::furnace::FurnaceParams;
use crate::devices::heater::HeaterParams;
use crate::devices::mixer::MixerParams;
use crate::devices::reactor::ReactorParams;
use crate::devices::separator::SeparatorParams;
use crate::error::{FlowsheetError, FlowsheetResult};
use crate::stream::Stream;
use sf_thermo::SpeciesTable;

/// Result of evaluating one device.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Outlet streams, indexed by output slot.
    pub outputs: Vec<Stream>,
    /// Net heat duty [J]: sum of outlet enthalpies minus inlet enthalpies.
    pub duty_j: f64,
    /// Electricity drawn [J]; zero for devices that are not electrically
    /// heated.
    pub electricity_j: f64,
}

/// Closed set of device behaviors.
///
/// Devices are pure functions from inlet streams to outlet streams plus an
/// energy duty; they hold parameters but no state between evaluations.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceSpec {
    /// N inlets merged into one outlet.
    Mixer(MixerParams),
    /// One inlet split into two outlets by per-species fractions.
    Separator(SeparatorParams),
    /// One inlet brought to a target temperature, electrically.
    Heater(HeaterParams),
    /// One inlet converted by a single reaction at a fixed conversion.
    Reactor(ReactorParams),
    /// Burden + flux in; liquid metal, slag, and offgas out.
    Furnace(FurnaceParams),
}

impl DeviceSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            DeviceSpec::Mixer(_) => "mixer",
            DeviceSpec::Separator(_) => "separator",
            DeviceSpec::Heater(_) => "heater",
            DeviceSpec::Reactor(_) => "reactor",
            DeviceSpec::Furnace(_) => "furnace",
        }
    }

    pub fn input_arity(&self) -> usize {
        match self {
            DeviceSpec::Mixer(params) => params.inlets,
            DeviceSpec::Separator(_) | DeviceSpec::Heater(_) | DeviceSpec::Reactor(_) => 1,
            DeviceSpec::Furnace(_) => 2,
        }
    }

    pub fn output_arity(&self) -> usize {
        match self {
            DeviceSpec::Mixer(_) | DeviceSpec::Heater(_) | DeviceSpec::Reactor(_) => 1,
            DeviceSpec::Separator(_) => 2,
            DeviceSpec::Furnace(_) => 3,
        }
    }

    /// Evaluate the device on its inlet streams (ordered by input slot).
    pub fn evaluate(
        &self,
        inputs: &[Stream],
        table: &SpeciesTable,
    ) -> FlowsheetResult<Evaluation> {
        if inputs.len() != self.input_arity() {
            return Err(FlowsheetError::WrongArity {
                kind: self.kind(),
                expected: self.input_arity(),
                got: inputs.len(),
            });
        }
        match self {
            DeviceSpec::Mixer(params) => params.evaluate(inputs, table),
            DeviceSpec::Separator(params) => params.evaluate(&inputs[0], table),
            DeviceSpec::Heater(params) => params.evaluate(&inputs[0], table),
            DeviceSpec::Reactor(params) => params.evaluate(&inputs[0], table),
            DeviceSpec::Furnace(params) => params.evaluate(&inputs[0], &inputs[1], table),
        }
    }
}
