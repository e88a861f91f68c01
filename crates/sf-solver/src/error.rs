//! Solver errors.

use sf_core::ids::{DeviceId, StreamId};
use sf_flowsheet::FlowsheetError;
use thiserror::Error;

pub type SolverResult<T> = Result<T, SolverError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// A device evaluation failed mid-solve.
    #[error(transparent)]
    Flowsheet(#[from] FlowsheetError),

    /// A recycle group did not converge within the iteration budget.
    #[error(
        "Recycle group {group} did not converge after {iterations} iterations \
         (residual {residual:.3e})"
    )]
    Convergence {
        group: usize,
        iterations: usize,
        residual: f64,
    },

    /// An input stream had no value when its consumer was evaluated. This
    /// indicates an ordering bug, not a user error.
    #[error("Device {device} input slot {slot} was evaluated before its producer")]
    MissingState { device: DeviceId, slot: usize },

    /// A stream was never produced by any evaluated device. Like
    /// `MissingState`, an ordering bug rather than a user error.
    #[error("Stream {stream} was never produced during the solve")]
    MissingStream { stream: StreamId },
}
