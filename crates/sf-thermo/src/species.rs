//! Chemical species definitions.

use crate::error::{ThermoError, ThermoResult};

/// Chemical elements tracked for conservation accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    Fe,
    O,
    H,
    C,
    Ca,
    Mg,
    Si,
    Al,
    N,
    Ar,
}

impl Element {
    pub const ALL: [Element; 10] = [
        Element::Fe,
        Element::O,
        Element::H,
        Element::C,
        Element::Ca,
        Element::Mg,
        Element::Si,
        Element::Al,
        Element::N,
        Element::Ar,
    ];

    /// Atomic mass [kg/mol], IUPAC standard atomic weights.
    pub fn molar_mass_kg_per_mol(&self) -> f64 {
        match self {
            Element::Fe => 0.055_845,
            Element::O => 0.015_999,
            Element::H => 0.001_008,
            Element::C => 0.012_011,
            Element::Ca => 0.040_078,
            Element::Mg => 0.024_305,
            Element::Si => 0.028_085,
            Element::Al => 0.026_982,
            Element::N => 0.014_007,
            Element::Ar => 0.039_948,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Element::Fe => "Fe",
            Element::O => "O",
            Element::H => "H",
            Element::C => "C",
            Element::Ca => "Ca",
            Element::Mg => "Mg",
            Element::Si => "Si",
            Element::Al => "Al",
            Element::N => "N",
            Element::Ar => "Ar",
        }
    }
}

/// Chemical species relevant for ironmaking and steelmaking flowsheets.
///
/// `Unresolved` is a bookkeeping placeholder for compositions that have not
/// been assigned yet; every mass or energy evaluation over it fails with
/// [`ThermoError::InvalidSpecies`] rather than contributing silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    /// Metallic iron
    Fe,
    /// Wustite (FeO)
    FeO,
    /// Hematite (Fe₂O₃)
    Fe2O3,
    /// Magnetite (Fe₃O₄)
    Fe3O4,
    /// Carbon (graphite)
    C,
    /// Carbon monoxide
    CO,
    /// Carbon dioxide
    CO2,
    /// Hydrogen
    H2,
    /// Water / steam
    H2O,
    /// Oxygen
    O2,
    /// Nitrogen
    N2,
    /// Argon
    Ar,
    /// Lime (CaO)
    CaO,
    /// Magnesia (MgO)
    MgO,
    /// Silica (SiO₂)
    SiO2,
    /// Alumina (Al₂O₃)
    Al2O3,
    /// Limestone (CaCO₃)
    CaCO3,
    /// Placeholder for an unresolved composition; rejected by evaluations.
    Unresolved,
}

impl Species {
    /// All real species (excludes the `Unresolved` placeholder).
    pub const ALL: [Species; 17] = [
        Species::Fe,
        Species::FeO,
        Species::Fe2O3,
        Species::Fe3O4,
        Species::C,
        Species::CO,
        Species::CO2,
        Species::H2,
        Species::H2O,
        Species::O2,
        Species::N2,
        Species::Ar,
        Species::CaO,
        Species::MgO,
        Species::SiO2,
        Species::Al2O3,
        Species::CaCO3,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Species::Fe => "Fe",
            Species::FeO => "FeO",
            Species::Fe2O3 => "Fe2O3",
            Species::Fe3O4 => "Fe3O4",
            Species::C => "C",
            Species::CO => "CO",
            Species::CO2 => "CO2",
            Species::H2 => "H2",
            Species::H2O => "H2O",
            Species::O2 => "O2",
            Species::N2 => "N2",
            Species::Ar => "Ar",
            Species::CaO => "CaO",
            Species::MgO => "MgO",
            Species::SiO2 => "SiO2",
            Species::Al2O3 => "Al2O3",
            Species::CaCO3 => "CaCO3",
            Species::Unresolved => "<unresolved>",
        }
    }

    /// Elemental composition as (element, atom count) pairs.
    ///
    /// Errors for the `Unresolved` placeholder.
    pub fn composition(&self) -> ThermoResult<&'static [(Element, u32)]> {
        match self {
            Species::Fe => Ok(&[(Element::Fe, 1)]),
            Species::FeO => Ok(&[(Element::Fe, 1), (Element::O, 1)]),
            Species::Fe2O3 => Ok(&[(Element::Fe, 2), (Element::O, 3)]),
            Species::Fe3O4 => Ok(&[(Element::Fe, 3), (Element::O, 4)]),
            Species::C => Ok(&[(Element::C, 1)]),
            Species::CO => Ok(&[(Element::C, 1), (Element::O, 1)]),
            Species::CO2 => Ok(&[(Element::C, 1), (Element::O, 2)]),
            Species::H2 => Ok(&[(Element::H, 2)]),
            Species::H2O => Ok(&[(Element::H, 2), (Element::O, 1)]),
            Species::O2 => Ok(&[(Element::O, 2)]),
            Species::N2 => Ok(&[(Element::N, 2)]),
            Species::Ar => Ok(&[(Element::Ar, 1)]),
            Species::CaO => Ok(&[(Element::Ca, 1), (Element::O, 1)]),
            Species::MgO => Ok(&[(Element::Mg, 1), (Element::O, 1)]),
            Species::SiO2 => Ok(&[(Element::Si, 1), (Element::O, 2)]),
            Species::Al2O3 => Ok(&[(Element::Al, 2), (Element::O, 3)]),
            Species::CaCO3 => Ok(&[(Element::Ca, 1), (Element::C, 1), (Element::O, 3)]),
            Species::Unresolved => Err(ThermoError::InvalidSpecies {
                what: "elemental composition",
            }),
        }
    }

    /// Molar mass [kg/mol], derived from the elemental composition.
    pub fn molar_mass_kg_per_mol(&self) -> ThermoResult<f64> {
        let composition = self.composition()?;
        Ok(composition
            .iter()
            .map(|(element, count)| element.molar_mass_kg_per_mol() * f64::from(*count))
            .sum())
    }

    /// Atom count of one element in one formula unit.
    pub fn atoms_of(&self, element: Element) -> ThermoResult<u32> {
        let composition = self.composition()?;
        Ok(composition
            .iter()
            .find(|(e, _)| *e == element)
            .map(|(_, count)| *count)
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn molar_masses_match_reference() {
        // Hand values from standard atomic weights
        assert!((Species::Fe2O3.molar_mass_kg_per_mol().unwrap() - 0.159_687).abs() < 1e-6);
        assert!((Species::H2.molar_mass_kg_per_mol().unwrap() - 0.002_016).abs() < 1e-6);
        assert!((Species::H2O.molar_mass_kg_per_mol().unwrap() - 0.018_015).abs() < 1e-6);
        assert!((Species::CaCO3.molar_mass_kg_per_mol().unwrap() - 0.100_086).abs() < 1e-6);
    }

    #[test]
    fn unresolved_has_no_molar_mass() {
        let err = Species::Unresolved.molar_mass_kg_per_mol().unwrap_err();
        assert!(matches!(err, ThermoError::InvalidSpecies { .. }));
    }

    #[test]
    fn iron_atom_counts() {
        assert_eq!(Species::Fe.atoms_of(Element::Fe).unwrap(), 1);
        assert_eq!(Species::Fe2O3.atoms_of(Element::Fe).unwrap(), 2);
        assert_eq!(Species::Fe3O4.atoms_of(Element::Fe).unwrap(), 3);
        assert_eq!(Species::H2.atoms_of(Element::Fe).unwrap(), 0);
    }

    #[test]
    fn all_species_have_positive_molar_mass() {
        for species in Species::ALL {
            assert!(species.molar_mass_kg_per_mol().unwrap() > 0.0, "{species:?}");
        }
    }
}
