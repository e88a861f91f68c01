//! Evaluation ordering via strongly connected components.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use sf_core::ids::{DeviceId, StreamId};
use sf_flowsheet::{Endpoint, Flowsheet};

/// One unit of solver work: either a single device (acyclic) or a recycle
/// group that must be converged together.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalGroup {
    /// Devices in evaluation order (insertion order within a group).
    pub devices: Vec<DeviceId>,
    pub cyclic: bool,
    /// Intra-group streams whose producer comes at or after their consumer
    /// in the group order; these carry the iteration guesses.
    pub tears: Vec<StreamId>,
}

/// Group the flowsheet's devices into evaluation order.
///
/// Tarjan yields components in reverse topological order; reversing gives
/// upstream-first groups. Within a group, devices keep insertion order so
/// repeated solves of the same flowsheet are bit-identical.
pub fn evaluation_order(flowsheet: &Flowsheet) -> Vec<EvalGroup> {
    let mut graph: DiGraph<DeviceId, StreamId> = DiGraph::new();
    let nodes: Vec<NodeIndex> = flowsheet
        .devices()
        .map(|(id, _)| graph.add_node(id))
        .collect();

    for (stream_id, edge) in flowsheet.streams() {
        if let (
            Endpoint::Device { device: from, .. },
            Endpoint::Device { device: to, .. },
        ) = (edge.from, edge.to)
        {
            graph.add_edge(
                nodes[from.index() as usize],
                nodes[to.index() as usize],
                stream_id,
            );
        }
    }

    let mut components = tarjan_scc(&graph);
    components.reverse();

    components
        .into_iter()
        .map(|component| {
            let mut devices: Vec<DeviceId> =
                component.iter().map(|n| graph[*n]).collect();
            devices.sort_by_key(|d| d.index());

            let in_group = |d: DeviceId| devices.contains(&d);
            let position = |d: DeviceId| devices.iter().position(|x| *x == d);

            let mut tears = Vec::new();
            for (stream_id, edge) in flowsheet.streams() {
                if let (
                    Endpoint::Device { device: from, .. },
                    Endpoint::Device { device: to, .. },
                ) = (edge.from, edge.to)
                {
                    if in_group(from) && in_group(to) && position(to) <= position(from) {
                        tears.push(stream_id);
                    }
                }
            }

            let cyclic = devices.len() > 1 || !tears.is_empty();
            EvalGroup {
                devices,
                cyclic,
                tears,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::units::k;
    use sf_flowsheet::{
        DeviceSpec, FlowsheetBuilder, HeaterParams, MixerParams, OutletSpec, Phase,
        SeparatorParams, Stream,
    };

    fn heater() -> DeviceSpec {
        DeviceSpec::Heater(HeaterParams::new(k(600.0)))
    }

    #[test]
    fn straight_chain_is_acyclic_groups() {
        let mut builder = FlowsheetBuilder::new();
        let a = builder.add_device("a", heater());
        let b = builder.add_device("b", heater());
        builder.add_feed("feed", Stream::empty(k(300.0), Phase::Gas), (a, 0));
        builder.connect("mid", (a, 0), (b, 0));
        builder.add_product("out", (b, 0));
        let sheet = builder.build().unwrap();

        let groups = evaluation_order(&sheet);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| !g.cyclic));
        assert_eq!(groups[0].devices, vec![a]);
        assert_eq!(groups[1].devices, vec![b]);
    }

    #[test]
    fn recycle_loop_is_one_cyclic_group_with_a_tear() {
        let mut builder = FlowsheetBuilder::new();
        let mix = builder.add_device(
            "mix",
            DeviceSpec::Mixer(MixerParams::adiabatic(2, Phase::Gas)),
        );
        let split = builder.add_device(
            "split",
            DeviceSpec::Separator(SeparatorParams {
                default_to_first: false,
                overrides: vec![],
                outlets: [
                    OutletSpec {
                        temp: None,
                        phase: Phase::Gas,
                    },
                    OutletSpec {
                        temp: None,
                        phase: Phase::Gas,
                    },
                ],
            }),
        );
        builder.add_feed("feed", Stream::empty(k(300.0), Phase::Gas), (mix, 0));
        builder.connect("to split", (mix, 0), (split, 0));
        let recycle = builder.connect("recycle", (split, 0), (mix, 1));
        builder.add_product("purge", (split, 1));
        let sheet = builder.build().unwrap();

        let groups = evaluation_order(&sheet);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].cyclic);
        assert_eq!(groups[0].devices, vec![mix, split]);
        assert_eq!(groups[0].tears, vec![recycle]);
    }
}
