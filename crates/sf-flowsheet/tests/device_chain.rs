//! Hand-walked evaluation of a heater -> reactor -> separator chain.

use sf_core::units::k;
use sf_flowsheet::{
    DeviceSpec, FlowsheetBuilder, HeaterParams, OutletSpec, Phase, ReactorParams,
    SeparatorParams, Stream,
};
use sf_thermo::{Mixture, Reaction, Species, SpeciesTable};

#[test]
fn shaft_line_mass_and_energy() {
    let table = SpeciesTable::standard().unwrap();

    let mut builder = FlowsheetBuilder::new();
    let heater = builder.add_device("gas preheater", DeviceSpec::Heater(HeaterParams::new(k(973.15))));
    let shaft = builder.add_device(
        "shaft",
        DeviceSpec::Reactor(ReactorParams {
            reaction: Reaction::hematite_h2_reduction().unwrap(),
            key_species: Species::Fe2O3,
            conversion: 0.95,
            outlet_temp: None,
            outlet_phase: Phase::Solid,
        }),
    );
    let split = builder.add_device(
        "gas-solid split",
        DeviceSpec::Separator(SeparatorParams {
            default_to_first: false,
            overrides: vec![(Species::H2, 1.0), (Species::H2O, 1.0)],
            outlets: [
                OutletSpec {
                    temp: None,
                    phase: Phase::Gas,
                },
                OutletSpec {
                    temp: None,
                    phase: Phase::Solid,
                },
            ],
        }),
    );

    let feed = Stream::new(
        Mixture::from_moles([(Species::Fe2O3, 1.0), (Species::H2, 4.5)]).unwrap(),
        k(298.15),
        Phase::Solid,
    );
    builder.add_feed("burden", feed.clone(), (heater, 0));
    builder.connect("hot burden", (heater, 0), (shaft, 0));
    builder.connect("reduced", (shaft, 0), (split, 0));
    builder.add_product("top gas", (split, 0));
    builder.add_product("dri", (split, 1));

    let sheet = builder.build().unwrap();
    assert_eq!(sheet.device_count(), 3);

    // Walk the chain by hand; the acyclic order is the insertion order.
    let mut current = feed;
    let mut total_electricity = 0.0;
    let mut outputs = Vec::new();
    for (id, node) in sheet.devices() {
        let eval = node.spec.evaluate(std::slice::from_ref(&current), &table).unwrap();
        total_electricity += eval.electricity_j;
        if id == split {
            outputs = eval.outputs;
            break;
        }
        current = eval.outputs[0].clone();
    }

    let gas = &outputs[0];
    let dri = &outputs[1];
    // 95% of 1 mol Fe2O3 -> 1.9 mol Fe; 2.85 mol H2 consumed.
    assert!((dri.mixture.moles(Species::Fe) - 1.9).abs() < 1e-9);
    assert!((dri.mixture.moles(Species::Fe2O3) - 0.05).abs() < 1e-9);
    assert!((gas.mixture.moles(Species::H2) - 1.65).abs() < 1e-9);
    assert!((gas.mixture.moles(Species::H2O) - 2.85).abs() < 1e-9);
    assert!(dri.mixture.moles(Species::H2) == 0.0);
    assert!(total_electricity > 0.0);
}
