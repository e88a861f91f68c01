//! Direct-substitution solve over the evaluation order.

use crate::error::{SolverError, SolverResult};
use crate::order::{evaluation_order, EvalGroup};
use nalgebra::DVector;
use sf_core::ids::{DeviceId, StreamId};
use sf_core::numeric::{nearly_equal, Tolerances};
use sf_core::units::{k, Temperature};
use sf_flowsheet::{Flowsheet, Phase, Stream};
use sf_thermo::{Mixture, Species, SpeciesTable};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    pub max_iterations: usize,
    pub tolerances: Tolerances,
    /// Temperature for the initial (empty) tear-stream guesses.
    pub initial_temp: Temperature,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerances: Tolerances {
                abs: 1e-9,
                rel: 1e-9,
            },
            initial_temp: k(298.15),
        }
    }
}

/// Per-device energy accounting from the converged state.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceDuty {
    pub device: DeviceId,
    pub name: String,
    pub duty_j: f64,
    pub electricity_j: f64,
}

/// Converged stream states and duties.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    streams: Vec<Stream>,
    duties: Vec<DeviceDuty>,
    pub iterations: usize,
    pub residual: f64,
}

impl Solution {
    pub fn stream(&self, id: StreamId) -> &Stream {
        &self.streams[id.index() as usize]
    }

    /// Duties in device order.
    pub fn duties(&self) -> &[DeviceDuty] {
        &self.duties
    }

    pub fn total_electricity_j(&self) -> f64 {
        self.duties.iter().map(|d| d.electricity_j).sum()
    }
}

/// Solve the flowsheet: single pass per acyclic device, direct substitution
/// on tear streams for recycle groups.
pub fn solve(
    flowsheet: &Flowsheet,
    table: &SpeciesTable,
    config: &SolverConfig,
) -> SolverResult<Solution> {
    let groups = evaluation_order(flowsheet);
    debug!(groups = groups.len(), devices = flowsheet.device_count(), "solving flowsheet");

    let mut states: Vec<Option<Stream>> = vec![None; flowsheet.stream_count()];
    for (stream_id, contents) in flowsheet.feeds() {
        states[stream_id.index() as usize] = Some(contents.clone());
    }

    let mut duties: Vec<Option<DeviceDuty>> = vec![None; flowsheet.device_count()];
    let mut iterations = 0;
    let mut residual: f64 = 0.0;

    for (group_index, group) in groups.iter().enumerate() {
        if group.cyclic {
            let (group_iters, group_residual) =
                converge_group(flowsheet, table, config, group_index, group, &mut states, &mut duties)?;
            iterations = iterations.max(group_iters);
            residual = residual.max(group_residual);
        } else {
            for device in &group.devices {
                evaluate_device(flowsheet, table, *device, &mut states, &mut duties)?;
            }
        }
    }

    let streams = states
        .into_iter()
        .enumerate()
        .map(|(index, state)| {
            state.ok_or(SolverError::MissingStream {
                stream: StreamId::from_index(index as u32),
            })
        })
        .collect::<SolverResult<Vec<_>>>()?;

    let duties = duties
        .into_iter()
        .enumerate()
        .map(|(index, duty)| {
            duty.ok_or(SolverError::MissingState {
                device: DeviceId::from_index(index as u32),
                slot: 0,
            })
        })
        .collect::<SolverResult<Vec<_>>>()?;

    Ok(Solution {
        streams,
        duties,
        iterations,
        residual,
    })
}

fn evaluate_device(
    flowsheet: &Flowsheet,
    table: &SpeciesTable,
    device: DeviceId,
    states: &mut [Option<Stream>],
    duties: &mut [Option<DeviceDuty>],
) -> SolverResult<()> {
    let node = flowsheet.device(device);

    let mut inputs = Vec::with_capacity(flowsheet.input_streams(device).len());
    for (slot, stream_id) in flowsheet.input_streams(device).iter().enumerate() {
        let state = states[stream_id.index() as usize]
            .clone()
            .ok_or(SolverError::MissingState { device, slot })?;
        inputs.push(state);
    }

    let eval = node.spec.evaluate(&inputs, table)?;
    for (slot, stream_id) in flowsheet.output_streams(device).iter().enumerate() {
        states[stream_id.index() as usize] = Some(eval.outputs[slot].clone());
    }
    duties[device.index() as usize] = Some(DeviceDuty {
        device,
        name: node.name.clone(),
        duty_j: eval.duty_j,
        electricity_j: eval.electricity_j,
    });
    Ok(())
}

fn converge_group(
    flowsheet: &Flowsheet,
    table: &SpeciesTable,
    config: &SolverConfig,
    group_index: usize,
    group: &EvalGroup,
    states: &mut [Option<Stream>],
    duties: &mut [Option<DeviceDuty>],
) -> SolverResult<(usize, f64)> {
    // Empty guesses let the first pass propagate real material around the
    // loop; direct substitution does the rest.
    for tear in &group.tears {
        states[tear.index() as usize] =
            Some(Stream::new(Mixture::new(), config.initial_temp, Phase::Gas));
    }

    let mut residual = f64::INFINITY;
    for iteration in 1..=config.max_iterations {
        let guesses: Vec<Stream> = group
            .tears
            .iter()
            .map(|tear| {
                states[tear.index() as usize]
                    .clone()
                    .ok_or(SolverError::MissingState {
                        device: group.devices[0],
                        slot: 0,
                    })
            })
            .collect::<SolverResult<_>>()?;

        for device in &group.devices {
            evaluate_device(flowsheet, table, *device, states, duties)?;
        }

        let mut converged = true;
        let mut components = Vec::new();
        for (tear, guess) in group.tears.iter().zip(&guesses) {
            let updated = states[tear.index() as usize]
                .as_ref()
                .ok_or(SolverError::MissingState {
                    device: group.devices[0],
                    slot: 0,
                })?;
            converged &= streams_match(guess, updated, config.tolerances);
            push_difference(guess, updated, &mut components);
        }
        residual = DVector::from_vec(components).norm();
        trace!(group = group_index, iteration, residual, "recycle pass");

        if converged {
            debug!(group = group_index, iteration, residual, "recycle converged");
            return Ok((iteration, residual));
        }
    }

    warn!(
        group = group_index,
        iterations = config.max_iterations,
        residual,
        "recycle group hit the iteration cap"
    );
    Err(SolverError::Convergence {
        group: group_index,
        iterations: config.max_iterations,
        residual,
    })
}

fn streams_match(a: &Stream, b: &Stream, tol: Tolerances) -> bool {
    if !nearly_equal(a.temp.value, b.temp.value, tol) {
        return false;
    }
    for species in Species::ALL {
        if !nearly_equal(a.mixture.moles(species), b.mixture.moles(species), tol) {
            return false;
        }
    }
    true
}

fn push_difference(a: &Stream, b: &Stream, components: &mut Vec<f64>) {
    for species in Species::ALL {
        components.push(b.mixture.moles(species) - a.mixture.moles(species));
    }
    components.push(b.temp.value - a.temp.value);
}
