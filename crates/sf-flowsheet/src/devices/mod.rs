//! Device behavior implementations.

pub mod furnace;
pub mod heater;
pub mod mixer;
pub mod reactor;
pub mod separator;
