//! Flowsheet arena: devices, stream edges, and slot adjacency.

use crate::device::DeviceSpec;
use crate::stream::Stream;
use sf_core::ids::{DeviceId, StreamId};
use std::fmt::Write as _;

/// One end of a stream edge: either the plant boundary or a device slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Boundary,
    Device { device: DeviceId, slot: usize },
}

/// A directed stream edge between two endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEdge {
    pub name: String,
    pub from: Endpoint,
    pub to: Endpoint,
}

/// A named device instance.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceNode {
    pub name: String,
    pub spec: DeviceSpec,
}

/// Validated flowsheet graph.
///
/// Indices are stable: [`DeviceId`] and [`StreamId`] are arena positions
/// assigned at build time and never change. Construction goes through
/// [`crate::FlowsheetBuilder`], which guarantees every device slot has
/// exactly one stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Flowsheet {
    pub(crate) devices: Vec<DeviceNode>,
    pub(crate) streams: Vec<StreamEdge>,
    /// Per device, per input slot, the incoming stream.
    pub(crate) device_inputs: Vec<Vec<StreamId>>,
    /// Per device, per output slot, the outgoing stream.
    pub(crate) device_outputs: Vec<Vec<StreamId>>,
    /// Boundary feed contents keyed by stream.
    pub(crate) feeds: Vec<(StreamId, Stream)>,
}

impl Flowsheet {
    pub fn device(&self, id: DeviceId) -> &DeviceNode {
        &self.devices[id.index() as usize]
    }

    pub fn devices(&self) -> impl Iterator<Item = (DeviceId, &DeviceNode)> {
        self.devices
            .iter()
            .enumerate()
            .map(|(i, node)| (DeviceId::from_index(i as u32), node))
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn stream(&self, id: StreamId) -> &StreamEdge {
        &self.streams[id.index() as usize]
    }

    pub fn streams(&self) -> impl Iterator<Item = (StreamId, &StreamEdge)> {
        self.streams
            .iter()
            .enumerate()
            .map(|(i, edge)| (StreamId::from_index(i as u32), edge))
    }

    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    /// Incoming streams of a device, ordered by input slot.
    pub fn input_streams(&self, id: DeviceId) -> &[StreamId] {
        &self.device_inputs[id.index() as usize]
    }

    /// Outgoing streams of a device, ordered by output slot.
    pub fn output_streams(&self, id: DeviceId) -> &[StreamId] {
        &self.device_outputs[id.index() as usize]
    }

    /// Boundary feeds as (stream, contents) pairs.
    pub fn feeds(&self) -> &[(StreamId, Stream)] {
        &self.feeds
    }

    /// Streams leaving to the boundary (products), in stream order.
    pub fn products(&self) -> impl Iterator<Item = StreamId> + '_ {
        self.streams().filter_map(|(id, edge)| {
            matches!(edge.to, Endpoint::Boundary).then_some(id)
        })
    }

    /// Graphviz rendering of the topology, one node per device.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph flowsheet {\n  rankdir=LR;\n");
        for (id, node) in self.devices() {
            let _ = writeln!(
                dot,
                "  d{} [label=\"{}\\n({})\" shape=box];",
                id.index(),
                node.name,
                node.spec.kind()
            );
        }
        for (_, edge) in self.streams() {
            let from = match edge.from {
                Endpoint::Boundary => "boundary_in".to_string(),
                Endpoint::Device { device, .. } => format!("d{}", device.index()),
            };
            let to = match edge.to {
                Endpoint::Boundary => "boundary_out".to_string(),
                Endpoint::Device { device, .. } => format!("d{}", device.index()),
            };
            let _ = writeln!(dot, "  {from} -> {to} [label=\"{}\"];", edge.name);
        }
        dot.push_str("}\n");
        dot
    }
}
