//! Flowsheet construction and evaluation errors.

use sf_core::ids::DeviceId;
use sf_thermo::ThermoError;
use thiserror::Error;

pub type FlowsheetResult<T> = Result<T, FlowsheetError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowsheetError {
    /// A thermochemistry evaluation inside a device failed.
    #[error(transparent)]
    Thermo(#[from] ThermoError),

    /// A device input slot has no stream connected to it.
    #[error("Device {device} input slot {slot} has no stream connected")]
    UnresolvedStream { device: DeviceId, slot: usize },

    /// A device output slot has no consumer (connect it or mark a product).
    #[error("Device {device} output slot {slot} has no consumer")]
    UnconsumedOutput { device: DeviceId, slot: usize },

    /// Two streams target the same device slot.
    #[error("Device {device} {direction} slot {slot} is connected twice")]
    DuplicateConnection {
        device: DeviceId,
        direction: &'static str,
        slot: usize,
    },

    /// A connection names a slot beyond the device's arity.
    #[error("Device {device} has no {direction} slot {slot} (arity {arity})")]
    SlotOutOfRange {
        device: DeviceId,
        direction: &'static str,
        slot: usize,
        arity: usize,
    },

    /// A device was handed the wrong number of inlet streams.
    #[error("{kind} expects {expected} inlets, got {got}")]
    WrongArity {
        kind: &'static str,
        expected: usize,
        got: usize,
    },

    /// A device parameter is outside its valid range.
    #[error("{kind}: {what}")]
    BadParameter { kind: &'static str, what: &'static str },
}
