//! Fixed plant topologies.
//!
//! Each assembler turns resolved [`Settings`] into a validated flowsheet:
//! sized boundary feeds, device parameters, and the recycle wiring for the
//! hydrogen loop. Topologies are code, not configuration; the config only
//! moves the numbers.

use crate::config::{ConfigEntry, PlantKind, Settings};
use crate::error::{PlantError, PlantResult};
use sf_core::ids::DeviceId;
use sf_core::units::k;
use sf_flowsheet::{
    DeviceSpec, Flowsheet, FlowsheetBuilder, FurnaceParams, HeaterParams, MixerParams,
    OutletSpec, Phase, ReactorParams, SeparatorParams, Stream,
};
use sf_thermo::{Mixture, Reaction, Species};
use tracing::debug;

/// Techno-economic context carried alongside the flowsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantMeta {
    pub annual_steel_tonnes: f64,
    pub lifetime_years: f64,
    pub h2_storage: String,
    pub on_premises_h2: bool,
}

/// A named, fully wired plant ready to solve.
#[derive(Debug, Clone)]
pub struct Plant {
    pub name: String,
    pub kind: PlantKind,
    pub flowsheet: Flowsheet,
    pub meta: PlantMeta,
}

impl Plant {
    /// Assemble the topology for `kind` from layered configuration.
    pub fn assemble(kind: PlantKind, entries: &[ConfigEntry]) -> PlantResult<Self> {
        let settings = Settings::resolve(entries, kind)?;
        let meta = PlantMeta {
            annual_steel_tonnes: settings.number("annual steel production tonnes")?,
            lifetime_years: settings.number("plant lifetime years")?,
            h2_storage: settings.text("h2 storage type")?.to_string(),
            on_premises_h2: settings.flag("on premises h2 production")?,
        };

        let (name, flowsheet) = match kind {
            PlantKind::DriEaf => ("H2 DRI-EAF", assemble_dri_eaf(&settings)?),
            PlantKind::Plasma => ("Hydrogen plasma", assemble_plasma(&settings)?),
            PlantKind::Hybrid => ("Hybrid shaft + plasma", assemble_hybrid(&settings)?),
        };
        debug!(
            plant = name,
            devices = flowsheet.device_count(),
            streams = flowsheet.stream_count(),
            "assembled plant"
        );

        Ok(Self {
            name: name.to_string(),
            kind,
            flowsheet,
            meta,
        })
    }
}

/// Shared per-assembly numbers pulled out of settings once.
struct Basis {
    ambient_k: f64,
    reduction_k: f64,
    conversion: f64,
    h2_excess: f64,
    h2_recycle: f64,
    ore: Mixture,
    n_fe2o3: f64,
}

impl Basis {
    fn from_settings(settings: &Settings) -> PlantResult<Self> {
        let conversion = settings.number("reduction conversion")?;
        if !(0.0..=1.0).contains(&conversion) {
            return Err(PlantError::BadConfig {
                key: "reduction conversion",
                what: "must be in [0, 1]",
            });
        }
        let h2_excess = settings.number("h2 excess ratio")?;
        if h2_excess < 1.05 {
            return Err(PlantError::BadConfig {
                key: "h2 excess ratio",
                what: "must be at least 1.05",
            });
        }
        let h2_recycle = settings.number("h2 recycle fraction")?;
        if !(0.0..=0.99).contains(&h2_recycle) {
            return Err(PlantError::BadConfig {
                key: "h2 recycle fraction",
                what: "must be in [0, 0.99]",
            });
        }

        let ore = ore_mixture(settings)?;
        let n_fe2o3 = ore.moles(Species::Fe2O3);
        Ok(Self {
            ambient_k: settings.number("ambient temp k")?,
            reduction_k: settings.number("reduction temp k")?,
            conversion,
            h2_excess,
            h2_recycle,
            ore,
            n_fe2o3,
        })
    }

    fn ore_feed(&self) -> Stream {
        Stream::new(self.ore.clone(), k(self.ambient_k), Phase::Solid)
    }

    fn h2_feed(&self, stoich_mol: f64) -> PlantResult<Stream> {
        let mixture = Mixture::from_moles([(Species::H2, stoich_mol * self.h2_excess)])?;
        Ok(Stream::new(mixture, k(self.ambient_k), Phase::Gas))
    }

    /// Splitter routing the reducing gas away from the solids.
    fn gas_split(&self) -> DeviceSpec {
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
        })
    }

    /// Condenser: knock out the water, recycle most of the hydrogen.
    fn condenser(&self) -> DeviceSpec {
        DeviceSpec::Separator(SeparatorParams {
            default_to_first: false,
            overrides: vec![(Species::H2, self.h2_recycle), (Species::H2O, 0.0)],
            outlets: [
                OutletSpec {
                    temp: Some(k(self.ambient_k)),
                    phase: Phase::Gas,
                },
                OutletSpec {
                    temp: Some(k(self.ambient_k)),
                    phase: Phase::Liquid,
                },
            ],
        })
    }
}

fn furnace_params(settings: &Settings) -> PlantResult<FurnaceParams> {
    let feo_to_slag = settings.number("feo to slag percent")? / 100.0;
    if !(0.0..=1.0).contains(&feo_to_slag) {
        return Err(PlantError::BadConfig {
            key: "feo to slag percent",
            what: "must be in [0, 100]",
        });
    }
    Ok(FurnaceParams {
        conversion: settings.number("reduction conversion")?,
        feo_to_slag,
        electrical_efficiency: settings.number("furnace electrical efficiency")?,
        metal_temp: k(settings.number("metal tap temp k")?),
        slag_temp: k(settings.number("slag temp k")?),
        offgas_temp: k(settings.number("offgas temp k")?),
    })
}

fn ore_mixture(settings: &Settings) -> PlantResult<Mixture> {
    let total_kg = settings.number("feed ore kg")?;
    if !(total_kg > 0.0) {
        return Err(PlantError::BadConfig {
            key: "feed ore kg",
            what: "must be positive",
        });
    }
    let fe2o3 = settings.number("ore fe2o3 mass percent")?;
    let sio2 = settings.number("ore sio2 mass percent")?;
    let al2o3 = settings.number("ore al2o3 mass percent")?;
    for (key, pct) in [
        ("ore fe2o3 mass percent", fe2o3),
        ("ore sio2 mass percent", sio2),
        ("ore al2o3 mass percent", al2o3),
    ] {
        if !(0.0..=100.0).contains(&pct) {
            return Err(PlantError::BadConfig {
                key,
                what: "must be in [0, 100]",
            });
        }
    }
    if fe2o3 + sio2 + al2o3 > 100.0 + 1e-9 {
        return Err(PlantError::BadConfig {
            key: "ore fe2o3 mass percent",
            what: "ore mass percents exceed 100",
        });
    }
    // Unspecified remainder is counted as magnesia gangue.
    let rest = (100.0 - fe2o3 - sio2 - al2o3).max(0.0);
    Ok(Mixture::from_masses([
        (Species::Fe2O3, total_kg * fe2o3 / 100.0),
        (Species::SiO2, total_kg * sio2 / 100.0),
        (Species::Al2O3, total_kg * al2o3 / 100.0),
        (Species::MgO, total_kg * rest / 100.0),
    ])?)
}

/// Flux sized so slag basicity (CaO/SiO2 by mass) hits the target.
fn flux_feed(settings: &Settings, ore: &Mixture) -> PlantResult<Stream> {
    let basicity = settings.number("basicity target")?;
    if basicity < 0.0 {
        return Err(PlantError::BadConfig {
            key: "basicity target",
            what: "must be non-negative",
        });
    }
    let m_sio2 = ore.mass_kg(Species::SiO2)?;
    let mixture = Mixture::from_masses([(Species::CaO, basicity * m_sio2)])?;
    Ok(Stream::new(
        mixture,
        k(settings.number("ambient temp k")?),
        Phase::Solid,
    ))
}

/// Hydrogen loop head: fresh feed mixed with recycle, then preheated.
/// Returns (mixer, heater) with the mixer's slot 1 left open for the
/// recycle connection.
fn h2_loop_head(
    builder: &mut FlowsheetBuilder,
    basis: &Basis,
    label: &str,
    stoich_mol: f64,
) -> PlantResult<(DeviceId, DeviceId)> {
    let mix = builder.add_device(
        format!("{label} H2 mix"),
        DeviceSpec::Mixer(MixerParams::adiabatic(2, Phase::Gas)),
    );
    let heater = builder.add_device(
        format!("{label} H2 preheater"),
        DeviceSpec::Heater(HeaterParams::new(k(basis.reduction_k))),
    );
    builder.add_feed(
        format!("{label} fresh H2"),
        basis.h2_feed(stoich_mol)?,
        (mix, 0),
    );
    builder.connect(format!("{label} mixed H2"), (mix, 0), (heater, 0));
    Ok((mix, heater))
}

/// Shaft DRI into an EAF melt.
fn assemble_dri_eaf(settings: &Settings) -> PlantResult<Flowsheet> {
    let basis = Basis::from_settings(settings)?;
    let mut builder = FlowsheetBuilder::new();

    // Full reduction consumes 3 H2 per Fe2O3.
    let stoich = 3.0 * basis.conversion * basis.n_fe2o3;
    let (h2_mix, h2_heater) = h2_loop_head(&mut builder, &basis, "shaft", stoich)?;

    let burden_mix = builder.add_device(
        "burden mix",
        DeviceSpec::Mixer(MixerParams::fixed(2, k(basis.reduction_k), Phase::Solid)),
    );
    let shaft = builder.add_device(
        "shaft",
        DeviceSpec::Reactor(ReactorParams {
            reaction: Reaction::hematite_h2_reduction()?,
            key_species: Species::Fe2O3,
            conversion: basis.conversion,
            outlet_temp: None,
            outlet_phase: Phase::Solid,
        }),
    );
    let gas_split = builder.add_device("top-gas split", basis.gas_split());
    let condenser = builder.add_device("condenser", basis.condenser());
    let eaf = builder.add_device("EAF", DeviceSpec::Furnace(furnace_params(settings)?));

    builder.add_feed("ore", basis.ore_feed(), (burden_mix, 0));
    builder.connect("hot H2", (h2_heater, 0), (burden_mix, 1));
    builder.connect("burden", (burden_mix, 0), (shaft, 0));
    builder.connect("reduced burden", (shaft, 0), (gas_split, 0));
    builder.connect("top gas", (gas_split, 0), (condenser, 0));
    builder.connect("H2 recycle", (condenser, 0), (h2_mix, 1));
    builder.add_product("condensate", (condenser, 1));

    builder.connect("DRI", (gas_split, 1), (eaf, 0));
    builder.add_feed("flux", flux_feed(settings, &basis.ore)?, (eaf, 1));
    builder.add_product("metal", (eaf, 0));
    builder.add_product("slag", (eaf, 1));
    builder.add_product("offgas", (eaf, 2));

    Ok(builder.build()?)
}

/// Single plasma vessel: ore and hot hydrogen in, metal and slag out, the
/// offgas loop closed through a condenser.
fn assemble_plasma(settings: &Settings) -> PlantResult<Flowsheet> {
    let basis = Basis::from_settings(settings)?;
    let mut builder = FlowsheetBuilder::new();

    // Hematite to wustite takes 1 H2, wustite to metal 2 more.
    let stoich = basis.n_fe2o3 * (1.0 + 2.0 * basis.conversion);
    let (h2_mix, h2_heater) = h2_loop_head(&mut builder, &basis, "plasma", stoich)?;

    let burden_mix = builder.add_device(
        "burden mix",
        DeviceSpec::Mixer(MixerParams::adiabatic(2, Phase::Solid)),
    );
    let furnace = builder.add_device(
        "plasma furnace",
        DeviceSpec::Furnace(furnace_params(settings)?),
    );
    let condenser = builder.add_device("condenser", basis.condenser());

    builder.add_feed("ore", basis.ore_feed(), (burden_mix, 0));
    builder.connect("hot H2", (h2_heater, 0), (burden_mix, 1));
    builder.connect("charge", (burden_mix, 0), (furnace, 0));
    builder.add_feed("flux", flux_feed(settings, &basis.ore)?, (furnace, 1));
    builder.connect("offgas", (furnace, 2), (condenser, 0));
    builder.connect("H2 recycle", (condenser, 0), (h2_mix, 1));

    builder.add_product("metal", (furnace, 0));
    builder.add_product("slag", (furnace, 1));
    builder.add_product("condensate", (condenser, 1));

    Ok(builder.build()?)
}

/// Shaft pre-reduction to wustite, finished in a plasma vessel. Each stage
/// runs its own hydrogen loop.
fn assemble_hybrid(settings: &Settings) -> PlantResult<Flowsheet> {
    let basis = Basis::from_settings(settings)?;
    let pre_pct = settings.number("pre reduction percent")?;
    if !(0.0..=100.0).contains(&pre_pct) {
        return Err(PlantError::BadConfig {
            key: "pre reduction percent",
            what: "must be in [0, 100]",
        });
    }
    // Taking hematite all the way to wustite removes a third of the oxygen,
    // so the wustite conversion is the oxygen-removal target scaled by 3.
    let pre_conversion = (pre_pct * 3.0 / 100.0).min(1.0);

    let mut builder = FlowsheetBuilder::new();

    // Pre-reduction loop.
    let pre_stoich = pre_conversion * basis.n_fe2o3;
    let (pre_mix, pre_heater) = h2_loop_head(&mut builder, &basis, "pre", pre_stoich)?;
    let pre_burden = builder.add_device(
        "pre burden mix",
        DeviceSpec::Mixer(MixerParams::fixed(2, k(basis.reduction_k), Phase::Solid)),
    );
    let pre_shaft = builder.add_device(
        "pre-reduction shaft",
        DeviceSpec::Reactor(ReactorParams {
            reaction: Reaction::hematite_to_wustite()?,
            key_species: Species::Fe2O3,
            conversion: pre_conversion,
            outlet_temp: None,
            outlet_phase: Phase::Solid,
        }),
    );
    let pre_split = builder.add_device("pre top-gas split", basis.gas_split());
    let pre_condenser = builder.add_device("pre condenser", basis.condenser());

    builder.add_feed("ore", basis.ore_feed(), (pre_burden, 0));
    builder.connect("pre hot H2", (pre_heater, 0), (pre_burden, 1));
    builder.connect("pre burden", (pre_burden, 0), (pre_shaft, 0));
    builder.connect("pre-reduced", (pre_shaft, 0), (pre_split, 0));
    builder.connect("pre top gas", (pre_split, 0), (pre_condenser, 0));
    builder.connect("pre H2 recycle", (pre_condenser, 0), (pre_mix, 1));
    builder.add_product("pre condensate", (pre_condenser, 1));

    // Smelting loop: residual hematite plus wustite to metal.
    let smelt_stoich =
        (1.0 - pre_conversion) * basis.n_fe2o3 * 3.0 + 2.0 * pre_conversion * basis.n_fe2o3;
    let (smelt_mix, smelt_heater) = h2_loop_head(&mut builder, &basis, "smelt", smelt_stoich)?;
    let smelt_burden = builder.add_device(
        "smelt burden mix",
        DeviceSpec::Mixer(MixerParams::adiabatic(2, Phase::Solid)),
    );
    let furnace = builder.add_device(
        "plasma furnace",
        DeviceSpec::Furnace(furnace_params(settings)?),
    );
    let smelt_condenser = builder.add_device("smelt condenser", basis.condenser());

    builder.connect("wustite burden", (pre_split, 1), (smelt_burden, 0));
    builder.connect("smelt hot H2", (smelt_heater, 0), (smelt_burden, 1));
    builder.connect("charge", (smelt_burden, 0), (furnace, 0));
    builder.add_feed("flux", flux_feed(settings, &basis.ore)?, (furnace, 1));
    builder.connect("offgas", (furnace, 2), (smelt_condenser, 0));
    builder.connect("smelt H2 recycle", (smelt_condenser, 0), (smelt_mix, 1));

    builder.add_product("metal", (furnace, 0));
    builder.add_product("slag", (furnace, 1));
    builder.add_product("smelt condensate", (smelt_condenser, 1));

    Ok(builder.build()?)
}
