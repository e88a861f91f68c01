//! Reference data table: formation enthalpies and sensible-heat data.

use std::collections::BTreeMap;

use crate::error::{ThermoError, ThermoResult};
use crate::heat_capacity::{HeatCapacity, LatentHeat, ShomateEquation, ThermoData};
use crate::species::Species;

/// Thermochemical reference data for one species.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesData {
    /// Standard enthalpy of formation at 298.15 K [J/mol].
    pub dh_formation_j_per_mol: f64,
    /// Sensible + latent enthalpy correlations.
    pub thermo: ThermoData,
}

/// Immutable lookup table of species reference data.
///
/// Built once (usually via [`SpeciesTable::standard`]) and shared by all
/// enthalpy evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesTable {
    entries: BTreeMap<Species, SpeciesData>,
}

impl SpeciesTable {
    pub fn new(entries: BTreeMap<Species, SpeciesData>) -> Self {
        Self { entries }
    }

    pub fn get(&self, species: Species) -> ThermoResult<&SpeciesData> {
        if species == Species::Unresolved {
            return Err(ThermoError::InvalidSpecies {
                what: "species table lookup",
            });
        }
        self.entries
            .get(&species)
            .ok_or(ThermoError::MissingData {
                species: species.key(),
            })
    }

    pub fn contains(&self, species: Species) -> bool {
        self.entries.contains_key(&species)
    }

    /// Built-in data set covering every species in [`Species::ALL`].
    ///
    /// Formation enthalpies are standard 298.15 K values [J/mol]; heat
    /// capacities are constant averages over the stated ranges except N2,
    /// which carries full NIST Shomate coefficients and anchors the
    /// correlation tests.
    pub fn standard() -> ThermoResult<Self> {
        let mut entries = BTreeMap::new();

        // Iron: solid up to the 1811 K melting point, then liquid.
        entries.insert(
            Species::Fe,
            SpeciesData {
                dh_formation_j_per_mol: 0.0,
                thermo: ThermoData::new(
                    vec![
                        constant(250.0, 1811.0, 25.1)?,
                        constant(1811.0, 4000.0, 46.0)?,
                    ],
                    vec![LatentHeat::new(1811.0, 13_810.0)],
                )?,
            },
        );
        entries.insert(
            Species::FeO,
            SpeciesData {
                dh_formation_j_per_mol: -272.0e3,
                thermo: ThermoData::new(
                    vec![
                        constant(250.0, 1650.0, 48.1)?,
                        constant(1650.0, 4000.0, 68.2)?,
                    ],
                    vec![LatentHeat::new(1650.0, 24_100.0)],
                )?,
            },
        );
        entries.insert(
            Species::Fe2O3,
            SpeciesData {
                dh_formation_j_per_mol: -824.2e3,
                thermo: ThermoData::constant(250.0, 4000.0, 103.9)?,
            },
        );
        entries.insert(
            Species::Fe3O4,
            SpeciesData {
                dh_formation_j_per_mol: -1118.4e3,
                thermo: ThermoData::constant(250.0, 4000.0, 150.7)?,
            },
        );
        entries.insert(
            Species::C,
            SpeciesData {
                dh_formation_j_per_mol: 0.0,
                thermo: ThermoData::constant(250.0, 4000.0, 8.5)?,
            },
        );
        entries.insert(
            Species::CO,
            SpeciesData {
                dh_formation_j_per_mol: -110.53e3,
                thermo: ThermoData::constant(250.0, 4000.0, 29.1)?,
            },
        );
        entries.insert(
            Species::CO2,
            SpeciesData {
                dh_formation_j_per_mol: -393.51e3,
                thermo: ThermoData::constant(250.0, 4000.0, 37.1)?,
            },
        );
        entries.insert(
            Species::H2,
            SpeciesData {
                dh_formation_j_per_mol: 0.0,
                thermo: ThermoData::constant(250.0, 4000.0, 28.84)?,
            },
        );
        // H2O as vapor; the reference state downstream of condensers is
        // handled by the devices, not the table.
        entries.insert(
            Species::H2O,
            SpeciesData {
                dh_formation_j_per_mol: -241.83e3,
                thermo: ThermoData::constant(250.0, 4000.0, 33.58)?,
            },
        );
        entries.insert(
            Species::O2,
            SpeciesData {
                dh_formation_j_per_mol: 0.0,
                thermo: ThermoData::constant(250.0, 4000.0, 29.38)?,
            },
        );
        entries.insert(
            Species::N2,
            SpeciesData {
                dh_formation_j_per_mol: 0.0,
                thermo: ThermoData::new(
                    vec![
                        HeatCapacity::Shomate(ShomateEquation::new(
                            100.0,
                            500.0,
                            [
                                28.98641, 1.853978, -9.647459, 16.63537, 0.000117, -8.671914,
                                226.4168, 0.0,
                            ],
                        )?),
                        HeatCapacity::Shomate(ShomateEquation::new(
                            500.0,
                            2000.0,
                            [
                                19.50583, 19.88705, -8.598535, 1.369784, 0.527601, -4.935202,
                                212.39, 0.0,
                            ],
                        )?),
                        HeatCapacity::Shomate(ShomateEquation::new(
                            2000.0,
                            6000.0,
                            [
                                35.51872, 1.128728, -0.196103, 0.014662, -4.55376, -18.97091,
                                224.981, 0.0,
                            ],
                        )?),
                    ],
                    vec![],
                )?,
            },
        );
        entries.insert(
            Species::Ar,
            SpeciesData {
                dh_formation_j_per_mol: 0.0,
                thermo: ThermoData::constant(250.0, 6000.0, 20.786)?,
            },
        );
        entries.insert(
            Species::CaO,
            SpeciesData {
                dh_formation_j_per_mol: -635.09e3,
                thermo: ThermoData::constant(250.0, 4000.0, 42.1)?,
            },
        );
        entries.insert(
            Species::MgO,
            SpeciesData {
                dh_formation_j_per_mol: -601.6e3,
                thermo: ThermoData::constant(250.0, 4000.0, 37.2)?,
            },
        );
        entries.insert(
            Species::SiO2,
            SpeciesData {
                dh_formation_j_per_mol: -910.7e3,
                thermo: ThermoData::constant(250.0, 4000.0, 44.4)?,
            },
        );
        entries.insert(
            Species::Al2O3,
            SpeciesData {
                dh_formation_j_per_mol: -1675.7e3,
                thermo: ThermoData::constant(250.0, 4000.0, 79.0)?,
            },
        );
        // Calcines above ~1170 K; range kept narrow so overshoot errors out.
        entries.insert(
            Species::CaCO3,
            SpeciesData {
                dh_formation_j_per_mol: -1207.6e3,
                thermo: ThermoData::constant(250.0, 1200.0, 83.5)?,
            },
        );

        Ok(Self::new(entries))
    }
}

fn constant(min_kelvin: f64, max_kelvin: f64, cp_j_per_mol_k: f64) -> ThermoResult<HeatCapacity> {
    Ok(HeatCapacity::Constant(crate::heat_capacity::ConstantCp::new(
        min_kelvin,
        max_kelvin,
        cp_j_per_mol_k,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_all_species() {
        let table = SpeciesTable::standard().unwrap();
        for species in Species::ALL {
            assert!(table.get(species).is_ok(), "{species:?}");
        }
    }

    #[test]
    fn unresolved_lookup_fails() {
        let table = SpeciesTable::standard().unwrap();
        let err = table.get(Species::Unresolved).unwrap_err();
        assert!(matches!(err, ThermoError::InvalidSpecies { .. }));
    }

    #[test]
    fn reduced_table_reports_missing_species() {
        let mut entries = BTreeMap::new();
        entries.insert(
            Species::H2,
            SpeciesData {
                dh_formation_j_per_mol: 0.0,
                thermo: ThermoData::constant(250.0, 4000.0, 28.84).unwrap(),
            },
        );
        let table = SpeciesTable::new(entries);
        assert!(table.contains(Species::H2));
        let err = table.get(Species::Fe).unwrap_err();
        assert!(matches!(err, ThermoError::MissingData { species: "Fe" }));
    }

    #[test]
    fn iron_melting_included_in_sensible_heat() {
        let table = SpeciesTable::standard().unwrap();
        let fe = table.get(Species::Fe).unwrap();
        let below = fe.thermo.delta_h_j(1.0, 298.15, 1810.0).unwrap();
        let above = fe.thermo.delta_h_j(1.0, 298.15, 1812.0).unwrap();
        assert!(above - below > 13_000.0, "latent heat missing");
    }

    #[test]
    fn hematite_reduction_is_endothermic_at_reference() {
        // Fe2O3 + 3 H2 -> 2 Fe + 3 H2O, dH298 = +98.71 kJ/mol
        let table = SpeciesTable::standard().unwrap();
        let dh = 3.0 * table.get(Species::H2O).unwrap().dh_formation_j_per_mol
            - table.get(Species::Fe2O3).unwrap().dh_formation_j_per_mol;
        assert!((dh - 98_710.0).abs() < 1.0);
    }
}
