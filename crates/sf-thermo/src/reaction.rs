//! Reaction stoichiometry.

use crate::error::{ThermoError, ThermoResult};
use crate::species::{Element, Species};
use crate::table::SpeciesTable;

/// A chemical reaction as signed stoichiometric coefficients.
///
/// Negative coefficients are reactants, positive are products. Construction
/// checks element balance so a malformed reaction cannot silently create or
/// destroy mass.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    name: &'static str,
    coeffs: Vec<(Species, f64)>,
}

impl Reaction {
    pub fn new(name: &'static str, coeffs: Vec<(Species, f64)>) -> ThermoResult<Self> {
        let mut has_reactant = false;
        let mut has_product = false;
        for (species, coeff) in &coeffs {
            if *species == Species::Unresolved {
                return Err(ThermoError::InvalidSpecies {
                    what: "reaction stoichiometry",
                });
            }
            if *coeff < 0.0 {
                has_reactant = true;
            } else if *coeff > 0.0 {
                has_product = true;
            }
        }
        if !has_reactant || !has_product {
            return Err(ThermoError::InvalidData {
                what: "reaction needs at least one reactant and one product",
            });
        }

        for element in Element::ALL {
            let mut balance = 0.0;
            for (species, coeff) in &coeffs {
                balance += coeff * f64::from(species.atoms_of(element)?);
            }
            if balance.abs() > 1e-9 {
                return Err(ThermoError::InvalidData {
                    what: "reaction does not balance elements",
                });
            }
        }

        Ok(Self { name, coeffs })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Signed (species, coefficient) pairs.
    pub fn coeffs(&self) -> impl Iterator<Item = (Species, f64)> + '_ {
        self.coeffs.iter().copied()
    }

    /// Coefficient for one species (0 if not involved).
    pub fn coeff(&self, species: Species) -> f64 {
        self.coeffs
            .iter()
            .find(|(s, _)| *s == species)
            .map(|(_, c)| *c)
            .unwrap_or(0.0)
    }

    /// Standard reaction enthalpy at 298.15 K [J per mol extent].
    pub fn dh_reaction_j_per_mol(&self, table: &SpeciesTable) -> ThermoResult<f64> {
        let mut dh = 0.0;
        for (species, coeff) in &self.coeffs {
            dh += coeff * table.get(*species)?.dh_formation_j_per_mol;
        }
        Ok(dh)
    }

    /// Fe2O3 + 3 H2 -> 2 Fe + 3 H2O
    pub fn hematite_h2_reduction() -> ThermoResult<Self> {
        Self::new(
            "hematite H2 reduction",
            vec![
                (Species::Fe2O3, -1.0),
                (Species::H2, -3.0),
                (Species::Fe, 2.0),
                (Species::H2O, 3.0),
            ],
        )
    }

    /// Fe2O3 + H2 -> 2 FeO + H2O
    pub fn hematite_to_wustite() -> ThermoResult<Self> {
        Self::new(
            "hematite to wustite",
            vec![
                (Species::Fe2O3, -1.0),
                (Species::H2, -1.0),
                (Species::FeO, 2.0),
                (Species::H2O, 1.0),
            ],
        )
    }

    /// FeO + H2 -> Fe + H2O
    pub fn wustite_reduction() -> ThermoResult<Self> {
        Self::new(
            "wustite H2 reduction",
            vec![
                (Species::FeO, -1.0),
                (Species::H2, -1.0),
                (Species::Fe, 1.0),
                (Species::H2O, 1.0),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_reactions_balance() {
        Reaction::hematite_h2_reduction().unwrap();
        Reaction::hematite_to_wustite().unwrap();
        Reaction::wustite_reduction().unwrap();
    }

    #[test]
    fn unbalanced_reaction_rejected() {
        let result = Reaction::new(
            "broken",
            vec![
                (Species::Fe2O3, -1.0),
                (Species::H2, -3.0),
                (Species::Fe, 2.0),
                (Species::H2O, 2.0),
            ],
        );
        assert!(matches!(result, Err(ThermoError::InvalidData { .. })));
    }

    #[test]
    fn one_sided_reaction_rejected() {
        let result = Reaction::new("no products", vec![(Species::H2, -1.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn reaction_enthalpies_match_hand_values() {
        let table = SpeciesTable::standard().unwrap();
        // Fe2O3 + 3 H2: 3(-241.83) - (-824.2) = +98.71 kJ/mol
        let dh = Reaction::hematite_h2_reduction()
            .unwrap()
            .dh_reaction_j_per_mol(&table)
            .unwrap();
        assert!((dh - 98_710.0).abs() < 1.0, "dh = {dh}");

        // FeO + H2: -241.83 - (-272.0) = +30.17 kJ/mol
        let dh = Reaction::wustite_reduction()
            .unwrap()
            .dh_reaction_j_per_mol(&table)
            .unwrap();
        assert!((dh - 30_170.0).abs() < 1.0, "dh = {dh}");
    }
}
