//! Multi-species mole maps with conservation-safe operations.

use std::collections::BTreeMap;

use crate::error::{ThermoError, ThermoResult};
use crate::reaction::Reaction;
use crate::species::{Element, Species};
use crate::table::SpeciesTable;
use crate::EPSILON_MOLES;
use sf_core::numeric::ensure_finite;

/// A bag of species with molar amounts.
///
/// The map is ordered by species so iteration (and therefore every sum
/// computed from it) is deterministic. Amounts are non-negative; operations
/// that would drive an amount below zero fail instead of clamping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mixture {
    moles: BTreeMap<Species, f64>,
}

impl Mixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (species, moles) pairs. Amounts must be finite and
    /// non-negative; near-zero entries are dropped.
    pub fn from_moles(pairs: impl IntoIterator<Item = (Species, f64)>) -> ThermoResult<Self> {
        let mut mixture = Self::new();
        for (species, moles) in pairs {
            mixture.add_moles(species, moles)?;
        }
        Ok(mixture)
    }

    /// Build from (species, mass in kg) pairs.
    pub fn from_masses(pairs: impl IntoIterator<Item = (Species, f64)>) -> ThermoResult<Self> {
        let mut mixture = Self::new();
        for (species, mass_kg) in pairs {
            let molar_mass = species.molar_mass_kg_per_mol()?;
            mixture.add_moles(species, mass_kg / molar_mass)?;
        }
        Ok(mixture)
    }

    /// Add moles of a species in place.
    pub fn add_moles(&mut self, species: Species, moles: f64) -> ThermoResult<()> {
        ensure_finite(moles, "moles").map_err(|_| ThermoError::NonPhysical {
            what: "non-finite mole amount",
        })?;
        if moles < 0.0 {
            return Err(ThermoError::NegativeQuantity {
                species: species.key(),
                what: "add_moles",
                moles,
            });
        }
        if moles < EPSILON_MOLES {
            return Ok(());
        }
        *self.moles.entry(species).or_insert(0.0) += moles;
        Ok(())
    }

    pub fn moles(&self, species: Species) -> f64 {
        self.moles.get(&species).copied().unwrap_or(0.0)
    }

    pub fn mass_kg(&self, species: Species) -> ThermoResult<f64> {
        Ok(self.moles(species) * species.molar_mass_kg_per_mol()?)
    }

    pub fn total_moles(&self) -> f64 {
        self.moles.values().sum()
    }

    pub fn total_mass_kg(&self) -> ThermoResult<f64> {
        let mut total = 0.0;
        for (species, moles) in &self.moles {
            total += moles * species.molar_mass_kg_per_mol()?;
        }
        Ok(total)
    }

    pub fn is_empty(&self) -> bool {
        self.moles.is_empty()
    }

    /// Iterate (species, moles) in species order.
    pub fn species(&self) -> impl Iterator<Item = (Species, f64)> + '_ {
        self.moles.iter().map(|(s, n)| (*s, *n))
    }

    /// Combine two mixtures into a new one.
    pub fn merge(&self, other: &Mixture) -> Mixture {
        let mut merged = self.clone();
        for (species, moles) in &other.moles {
            *merged.moles.entry(*species).or_insert(0.0) += moles;
        }
        merged
    }

    /// Split into (taken, remainder) with the same per-species fraction.
    pub fn split(&self, fraction: f64) -> ThermoResult<(Mixture, Mixture)> {
        self.split_by(|_| fraction)
    }

    /// Split into (taken, remainder) with a per-species fraction in [0, 1].
    pub fn split_by(
        &self,
        fraction_of: impl Fn(Species) -> f64,
    ) -> ThermoResult<(Mixture, Mixture)> {
        let mut taken = Mixture::new();
        let mut remainder = Mixture::new();
        for (species, moles) in &self.moles {
            let fraction = fraction_of(*species);
            if !(0.0..=1.0).contains(&fraction) {
                return Err(ThermoError::NonPhysical {
                    what: "split fraction outside [0, 1]",
                });
            }
            taken.add_moles(*species, moles * fraction)?;
            remainder.add_moles(*species, moles * (1.0 - fraction))?;
        }
        Ok((taken, remainder))
    }

    /// Apply a reaction at the given extent [mol] and return the product
    /// mixture. The extent must be non-negative, and no species may be
    /// driven below zero.
    pub fn react(&self, reaction: &Reaction, extent_mol: f64) -> ThermoResult<Mixture> {
        if extent_mol < 0.0 || !extent_mol.is_finite() {
            return Err(ThermoError::NonPhysical {
                what: "reaction extent",
            });
        }
        let mut product = self.clone();
        for (species, coeff) in reaction.coeffs() {
            let n = product.moles.entry(species).or_insert(0.0);
            *n += coeff * extent_mol;
            if *n < -EPSILON_MOLES {
                return Err(ThermoError::NegativeQuantity {
                    species: species.key(),
                    what: reaction.name(),
                    moles: *n,
                });
            }
            if *n < EPSILON_MOLES {
                product.moles.remove(&species);
            }
        }
        Ok(product)
    }

    /// Total enthalpy [J] at `t_kelvin`: formation at 298.15 K plus sensible
    /// (and latent) heat up to the given temperature, summed over species.
    pub fn enthalpy_j(&self, table: &SpeciesTable, t_kelvin: f64) -> ThermoResult<f64> {
        let mut total = 0.0;
        for (species, moles) in &self.moles {
            let data = table.get(*species)?;
            total += moles * data.dh_formation_j_per_mol;
            total += data
                .thermo
                .delta_h_j(*moles, sf_core::units::constants::T_REF_KELVIN, t_kelvin)?;
        }
        Ok(total)
    }

    /// Formation enthalpy [J] at the 298.15 K reference.
    pub fn formation_enthalpy_j(&self, table: &SpeciesTable) -> ThermoResult<f64> {
        let mut total = 0.0;
        for (species, moles) in &self.moles {
            total += moles * table.get(*species)?.dh_formation_j_per_mol;
        }
        Ok(total)
    }

    /// Total moles of one element across all species.
    pub fn element_moles(&self, element: Element) -> ThermoResult<f64> {
        let mut total = 0.0;
        for (species, moles) in &self.moles {
            total += moles * f64::from(species.atoms_of(element)?);
        }
        Ok(total)
    }
}
