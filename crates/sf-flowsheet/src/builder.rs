//! Flowsheet construction with wiring validation.

use crate::device::DeviceSpec;
use crate::error::{FlowsheetError, FlowsheetResult};
use crate::graph::{DeviceNode, Endpoint, Flowsheet, StreamEdge};
use crate::stream::Stream;
use sf_core::ids::{DeviceId, StreamId};

/// Accumulates devices and stream connections, then validates the wiring.
///
/// `build` succeeds only when every input slot of every device has exactly
/// one incoming stream and every output slot exactly one outgoing stream
/// (a boundary product counts).
#[derive(Debug, Default)]
pub struct FlowsheetBuilder {
    devices: Vec<DeviceNode>,
    streams: Vec<StreamEdge>,
    feeds: Vec<(StreamId, Stream)>,
}

impl FlowsheetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_device(&mut self, name: impl Into<String>, spec: DeviceSpec) -> DeviceId {
        let id = DeviceId::from_index(self.devices.len() as u32);
        self.devices.push(DeviceNode {
            name: name.into(),
            spec,
        });
        id
    }

    /// Connect an output slot of one device to an input slot of another.
    pub fn connect(
        &mut self,
        name: impl Into<String>,
        from: (DeviceId, usize),
        to: (DeviceId, usize),
    ) -> StreamId {
        self.push_stream(
            name,
            Endpoint::Device {
                device: from.0,
                slot: from.1,
            },
            Endpoint::Device {
                device: to.0,
                slot: to.1,
            },
        )
    }

    /// Feed material from the boundary into a device input slot.
    pub fn add_feed(
        &mut self,
        name: impl Into<String>,
        contents: Stream,
        to: (DeviceId, usize),
    ) -> StreamId {
        let id = self.push_stream(
            name,
            Endpoint::Boundary,
            Endpoint::Device {
                device: to.0,
                slot: to.1,
            },
        );
        self.feeds.push((id, contents));
        id
    }

    /// Route a device output slot to the boundary as a product.
    pub fn add_product(&mut self, name: impl Into<String>, from: (DeviceId, usize)) -> StreamId {
        self.push_stream(
            name,
            Endpoint::Device {
                device: from.0,
                slot: from.1,
            },
            Endpoint::Boundary,
        )
    }

    fn push_stream(&mut self, name: impl Into<String>, from: Endpoint, to: Endpoint) -> StreamId {
        let id = StreamId::from_index(self.streams.len() as u32);
        self.streams.push(StreamEdge {
            name: name.into(),
            from,
            to,
        });
        id
    }

    pub fn build(self) -> FlowsheetResult<Flowsheet> {
        let mut inputs: Vec<Vec<Option<StreamId>>> = self
            .devices
            .iter()
            .map(|node| vec![None; node.spec.input_arity()])
            .collect();
        let mut outputs: Vec<Vec<Option<StreamId>>> = self
            .devices
            .iter()
            .map(|node| vec![None; node.spec.output_arity()])
            .collect();

        for (index, edge) in self.streams.iter().enumerate() {
            let id = StreamId::from_index(index as u32);
            if let Endpoint::Device { device, slot } = edge.from {
                claim(&mut outputs, device, slot, id, "output")?;
            }
            if let Endpoint::Device { device, slot } = edge.to {
                claim(&mut inputs, device, slot, id, "input")?;
            }
        }

        let device_inputs = resolve(inputs, |device, slot| FlowsheetError::UnresolvedStream {
            device,
            slot,
        })?;
        let device_outputs = resolve(outputs, |device, slot| FlowsheetError::UnconsumedOutput {
            device,
            slot,
        })?;

        Ok(Flowsheet {
            devices: self.devices,
            streams: self.streams,
            device_inputs,
            device_outputs,
            feeds: self.feeds,
        })
    }
}

fn claim(
    slots: &mut [Vec<Option<StreamId>>],
    device: DeviceId,
    slot: usize,
    stream: StreamId,
    direction: &'static str,
) -> FlowsheetResult<()> {
    let device_slots = &mut slots[device.index() as usize];
    if slot >= device_slots.len() {
        return Err(FlowsheetError::SlotOutOfRange {
            device,
            direction,
            slot,
            arity: device_slots.len(),
        });
    }
    if device_slots[slot].is_some() {
        return Err(FlowsheetError::DuplicateConnection {
            device,
            direction,
            slot,
        });
    }
    device_slots[slot] = Some(stream);
    Ok(())
}

fn resolve(
    slots: Vec<Vec<Option<StreamId>>>,
    missing: impl Fn(DeviceId, usize) -> FlowsheetError,
) -> FlowsheetResult<Vec<Vec<StreamId>>> {
    slots
        .into_iter()
        .enumerate()
        .map(|(device, device_slots)| {
            device_slots
                .into_iter()
                .enumerate()
                .map(|(slot, stream)| {
                    stream.ok_or_else(|| missing(DeviceId::from_index(device as u32), slot))
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::heater::HeaterParams;
    use crate::devices::mixer::MixerParams;
    use crate::stream::Phase;
    use sf_core::units::k;

    fn heater() -> DeviceSpec {
        DeviceSpec::Heater(HeaterParams::new(k(900.0)))
    }

    #[test]
    fn minimal_chain_builds() {
        let mut builder = FlowsheetBuilder::new();
        let h = builder.add_device("preheater", heater());
        builder.add_feed("feed", Stream::empty(k(300.0), Phase::Gas), (h, 0));
        builder.add_product("product", (h, 0));
        let sheet = builder.build().unwrap();
        assert_eq!(sheet.device_count(), 1);
        assert_eq!(sheet.stream_count(), 2);
        assert_eq!(sheet.products().count(), 1);
    }

    #[test]
    fn missing_input_is_unresolved() {
        let mut builder = FlowsheetBuilder::new();
        let h = builder.add_device("preheater", heater());
        builder.add_product("product", (h, 0));
        assert!(matches!(
            builder.build(),
            Err(FlowsheetError::UnresolvedStream { slot: 0, .. })
        ));
    }

    #[test]
    fn dangling_output_is_unconsumed() {
        let mut builder = FlowsheetBuilder::new();
        let h = builder.add_device("preheater", heater());
        builder.add_feed("feed", Stream::empty(k(300.0), Phase::Gas), (h, 0));
        assert!(matches!(
            builder.build(),
            Err(FlowsheetError::UnconsumedOutput { slot: 0, .. })
        ));
    }

    #[test]
    fn double_connection_rejected() {
        let mut builder = FlowsheetBuilder::new();
        let h = builder.add_device("preheater", heater());
        builder.add_feed("a", Stream::empty(k(300.0), Phase::Gas), (h, 0));
        builder.add_feed("b", Stream::empty(k(300.0), Phase::Gas), (h, 0));
        builder.add_product("product", (h, 0));
        assert!(matches!(
            builder.build(),
            Err(FlowsheetError::DuplicateConnection { .. })
        ));
    }

    #[test]
    fn slot_beyond_arity_rejected() {
        let mut builder = FlowsheetBuilder::new();
        let m = builder.add_device(
            "mix",
            DeviceSpec::Mixer(MixerParams::adiabatic(2, Phase::Gas)),
        );
        builder.add_feed("a", Stream::empty(k(300.0), Phase::Gas), (m, 0));
        builder.add_feed("b", Stream::empty(k(300.0), Phase::Gas), (m, 1));
        builder.add_feed("c", Stream::empty(k(300.0), Phase::Gas), (m, 2));
        builder.add_product("product", (m, 0));
        assert!(matches!(
            builder.build(),
            Err(FlowsheetError::SlotOutOfRange { slot: 2, .. })
        ));
    }

    #[test]
    fn dot_rendering_names_devices() {
        let mut builder = FlowsheetBuilder::new();
        let h = builder.add_device("preheater", heater());
        builder.add_feed("feed", Stream::empty(k(300.0), Phase::Gas), (h, 0));
        builder.add_product("product", (h, 0));
        let dot = builder.build().unwrap().to_dot();
        assert!(dot.contains("preheater"));
        assert!(dot.contains("digraph"));
    }
}
