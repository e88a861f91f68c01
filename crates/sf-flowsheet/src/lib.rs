//! sf-flowsheet: process devices and the stream graph connecting them.
//!
//! A [`Flowsheet`] is an arena of devices and directed stream edges built
//! through [`FlowsheetBuilder`], which validates the wiring (every device
//! slot connected exactly once). Each device evaluates its outlet streams
//! and energy duty from its inlet streams alone; walking the graph is the
//! solver's job, not this crate's.

pub mod builder;
pub mod device;
pub mod devices;
pub mod error;
pub mod graph;
pub mod stream;

pub use builder::FlowsheetBuilder;
pub use device::{DeviceSpec, Evaluation};
pub use devices::furnace::FurnaceParams;
pub use devices::heater::HeaterParams;
pub use devices::mixer::{MixerOutlet, MixerParams};
pub use devices::reactor::ReactorParams;
pub use devices::separator::{OutletSpec, SeparatorParams};
pub use error::{FlowsheetError, FlowsheetResult};
pub use graph::{DeviceNode, Endpoint, Flowsheet, StreamEdge};
pub use stream::{Phase, Stream};
