//! Heat-capacity correlations and latent heats.
//!
//! Sensible enthalpy is always an integral of Cp between two temperatures,
//! so every correlation exposes `delta_h_j(moles, t0, t1)` rather than a
//! point Cp value.

use crate::error::{ThermoError, ThermoResult};
use crate::EPSILON_MOLES;
use sf_core::numeric::{nearly_equal, Tolerances};

/// The Shomate equation, NIST database convention.
///
/// Coefficients are `[a, b, c, d, e, f, g, h]` with temperature in kK and
/// enthalpy in kJ/mol:
///
/// ```text
/// H(t) - H(298.15) = a·t + b·t²/2 + c·t³/3 + d·t⁴/4 - e/t + f - h
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShomateEquation {
    min_kelvin: f64,
    max_kelvin: f64,
    coeffs: [f64; 8],
}

impl ShomateEquation {
    pub fn new(min_kelvin: f64, max_kelvin: f64, coeffs: [f64; 8]) -> ThermoResult<Self> {
        if !(min_kelvin < max_kelvin) {
            return Err(ThermoError::InvalidData {
                what: "Shomate range must satisfy min < max",
            });
        }
        Ok(Self {
            min_kelvin,
            max_kelvin,
            coeffs,
        })
    }

    fn check_range(&self, t_kelvin: f64) -> ThermoResult<()> {
        if t_kelvin < self.min_kelvin || t_kelvin > self.max_kelvin {
            return Err(ThermoError::OutOfRange {
                t_kelvin,
                min_kelvin: self.min_kelvin,
                max_kelvin: self.max_kelvin,
            });
        }
        Ok(())
    }

    /// Enthalpy change [J] for `moles` heated from `t_initial` to `t_final`.
    pub fn delta_h_j(&self, moles: f64, t_initial: f64, t_final: f64) -> ThermoResult<f64> {
        self.check_range(t_initial)?;
        self.check_range(t_final)?;
        let [a, b, c, d, e, ..] = self.coeffs;
        let t0 = t_initial / 1000.0;
        let t1 = t_final / 1000.0;
        let energy_kj = moles
            * (a * (t1 - t0)
                + b / 2.0 * (t1 * t1 - t0 * t0)
                + c / 3.0 * (t1 * t1 * t1 - t0 * t0 * t0)
                + d / 4.0 * (t1 * t1 * t1 * t1 - t0 * t0 * t0 * t0)
                - e / t1
                + e / t0);
        Ok(energy_kj * 1000.0)
    }
}

/// Heat capacity at constant pressure stored as a constant value.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantCp {
    min_kelvin: f64,
    max_kelvin: f64,
    cp_j_per_mol_k: f64,
}

impl ConstantCp {
    pub fn new(min_kelvin: f64, max_kelvin: f64, cp_j_per_mol_k: f64) -> ThermoResult<Self> {
        if !(min_kelvin < max_kelvin) {
            return Err(ThermoError::InvalidData {
                what: "Cp range must satisfy min < max",
            });
        }
        if cp_j_per_mol_k <= 0.0 || !cp_j_per_mol_k.is_finite() {
            return Err(ThermoError::InvalidData {
                what: "Cp must be positive and finite",
            });
        }
        Ok(Self {
            min_kelvin,
            max_kelvin,
            cp_j_per_mol_k,
        })
    }

    pub fn delta_h_j(&self, moles: f64, t_initial: f64, t_final: f64) -> ThermoResult<f64> {
        for t in [t_initial, t_final] {
            if t < self.min_kelvin || t > self.max_kelvin {
                return Err(ThermoError::OutOfRange {
                    t_kelvin: t,
                    min_kelvin: self.min_kelvin,
                    max_kelvin: self.max_kelvin,
                });
            }
        }
        Ok(moles * self.cp_j_per_mol_k * (t_final - t_initial))
    }
}

/// One heat-capacity correlation segment.
#[derive(Debug, Clone, PartialEq)]
pub enum HeatCapacity {
    Shomate(ShomateEquation),
    Constant(ConstantCp),
}

impl HeatCapacity {
    pub fn min_kelvin(&self) -> f64 {
        match self {
            HeatCapacity::Shomate(s) => s.min_kelvin,
            HeatCapacity::Constant(c) => c.min_kelvin,
        }
    }

    pub fn max_kelvin(&self) -> f64 {
        match self {
            HeatCapacity::Shomate(s) => s.max_kelvin,
            HeatCapacity::Constant(c) => c.max_kelvin,
        }
    }

    pub fn delta_h_j(&self, moles: f64, t_initial: f64, t_final: f64) -> ThermoResult<f64> {
        match self {
            HeatCapacity::Shomate(s) => s.delta_h_j(moles, t_initial, t_final),
            HeatCapacity::Constant(c) => c.delta_h_j(moles, t_initial, t_final),
        }
    }
}

/// Latent heat of a phase transition (melting, boiling).
#[derive(Debug, Clone, PartialEq)]
pub struct LatentHeat {
    pub temp_kelvin: f64,
    pub latent_heat_j_per_mol: f64,
}

impl LatentHeat {
    pub fn new(temp_kelvin: f64, latent_heat_j_per_mol: f64) -> Self {
        Self {
            temp_kelvin,
            latent_heat_j_per_mol,
        }
    }
}

/// Sensible + latent enthalpy data for one species.
///
/// Holds a list of heat-capacity segments with contiguous, non-overlapping
/// temperature ranges, plus latent heats at transition temperatures within
/// the covered range.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermoData {
    segments: Vec<HeatCapacity>,
    latent_heats: Vec<LatentHeat>,
    min_kelvin: f64,
    max_kelvin: f64,
}

impl ThermoData {
    pub fn new(
        mut segments: Vec<HeatCapacity>,
        mut latent_heats: Vec<LatentHeat>,
    ) -> ThermoResult<Self> {
        if segments.is_empty() {
            return Err(ThermoError::InvalidData {
                what: "thermo data needs at least one heat-capacity segment",
            });
        }

        segments.sort_by(|a, b| a.min_kelvin().total_cmp(&b.min_kelvin()));
        let range_tol = Tolerances {
            abs: 1e-6,
            rel: 1e-9,
        };
        for pair in segments.windows(2) {
            if !nearly_equal(pair[0].max_kelvin(), pair[1].min_kelvin(), range_tol) {
                return Err(ThermoError::InvalidData {
                    what: "heat-capacity segments must be contiguous (gap or overlap)",
                });
            }
        }

        let min_kelvin = segments[0].min_kelvin();
        let max_kelvin = segments[segments.len() - 1].max_kelvin();

        latent_heats.sort_by(|a, b| a.temp_kelvin.total_cmp(&b.temp_kelvin));
        for latent in &latent_heats {
            if latent.temp_kelvin < min_kelvin || latent.temp_kelvin > max_kelvin {
                return Err(ThermoError::InvalidData {
                    what: "latent heat temperature outside heat-capacity range",
                });
            }
        }

        Ok(Self {
            segments,
            latent_heats,
            min_kelvin,
            max_kelvin,
        })
    }

    /// Single constant-Cp segment, no phase transitions.
    pub fn constant(min_kelvin: f64, max_kelvin: f64, cp_j_per_mol_k: f64) -> ThermoResult<Self> {
        Self::new(
            vec![HeatCapacity::Constant(ConstantCp::new(
                min_kelvin,
                max_kelvin,
                cp_j_per_mol_k,
            )?)],
            vec![],
        )
    }

    pub fn min_kelvin(&self) -> f64 {
        self.min_kelvin
    }

    pub fn max_kelvin(&self) -> f64 {
        self.max_kelvin
    }

    /// Enthalpy change [J] for `moles` taken from `t_initial` to `t_final`,
    /// spanning segment boundaries and adding latent heats crossed.
    pub fn delta_h_j(&self, moles: f64, t_initial: f64, t_final: f64) -> ThermoResult<f64> {
        for t in [t_initial, t_final] {
            if t < self.min_kelvin || t > self.max_kelvin {
                return Err(ThermoError::OutOfRange {
                    t_kelvin: t,
                    min_kelvin: self.min_kelvin,
                    max_kelvin: self.max_kelvin,
                });
            }
        }

        if moles.abs() < EPSILON_MOLES {
            return Ok(0.0);
        }

        // Integrate upward and flip at the end; keeps the segment walk simple.
        let flip = t_final < t_initial;
        let (mut t_lo, t_hi) = if flip {
            (t_final, t_initial)
        } else {
            (t_initial, t_final)
        };

        let mut delta_h = 0.0;

        for latent in &self.latent_heats {
            if t_lo <= latent.temp_kelvin && latent.temp_kelvin < t_hi {
                delta_h += moles * latent.latent_heat_j_per_mol;
            }
        }

        for segment in &self.segments {
            if segment.min_kelvin() <= t_lo && t_lo <= segment.max_kelvin() {
                if t_hi <= segment.max_kelvin() {
                    delta_h += segment.delta_h_j(moles, t_lo, t_hi)?;
                    break;
                }
                delta_h += segment.delta_h_j(moles, t_lo, segment.max_kelvin())?;
                t_lo = segment.max_kelvin();
            }
        }

        Ok(if flip { -delta_h } else { delta_h })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n2_shomate() -> ThermoData {
        // NIST nitrogen gas coefficients, three ranges
        ThermoData::new(
            vec![
                HeatCapacity::Shomate(
                    ShomateEquation::new(
                        100.0,
                        500.0,
                        [
                            28.98641, 1.853978, -9.647459, 16.63537, 0.000117, -8.671914,
                            226.4168, 0.0,
                        ],
                    )
                    .unwrap(),
                ),
                HeatCapacity::Shomate(
                    ShomateEquation::new(
                        500.0,
                        2000.0,
                        [
                            19.50583, 19.88705, -8.598535, 1.369784, 0.527601, -4.935202,
                            212.39, 0.0,
                        ],
                    )
                    .unwrap(),
                ),
                HeatCapacity::Shomate(
                    ShomateEquation::new(
                        2000.0,
                        6000.0,
                        [
                            35.51872, 1.128728, -0.196103, 0.014662, -4.55376, -18.97091,
                            224.981, 0.0,
                        ],
                    )
                    .unwrap(),
                ),
            ],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn shomate_matches_nist_tabulation() {
        // NIST: H°(1000 K) − H°(298.15 K) = 21.463 kJ/mol for N2
        let dh = n2_shomate().delta_h_j(1.0, 298.15, 1000.0).unwrap();
        assert!((dh - 21_463.0).abs() < 100.0, "dh = {dh}");
    }

    #[test]
    fn shomate_spans_segment_boundary() {
        let data = n2_shomate();
        let across = data.delta_h_j(1.0, 400.0, 600.0).unwrap();
        let stepped = data.delta_h_j(1.0, 400.0, 500.0).unwrap()
            + data.delta_h_j(1.0, 500.0, 600.0).unwrap();
        assert!((across - stepped).abs() < 1e-6);
    }

    #[test]
    fn delta_h_is_antisymmetric() {
        let data = n2_shomate();
        let up = data.delta_h_j(2.0, 300.0, 1500.0).unwrap();
        let down = data.delta_h_j(2.0, 1500.0, 300.0).unwrap();
        assert!((up + down).abs() < 1e-9);
        assert!(up > 0.0);
    }

    #[test]
    fn latent_heat_counted_once_per_crossing() {
        let data = ThermoData::new(
            vec![
                HeatCapacity::Constant(ConstantCp::new(250.0, 1811.0, 25.1).unwrap()),
                HeatCapacity::Constant(ConstantCp::new(1811.0, 4000.0, 46.0).unwrap()),
            ],
            vec![LatentHeat::new(1811.0, 13_810.0)],
        )
        .unwrap();

        let below = data.delta_h_j(1.0, 298.15, 1800.0).unwrap();
        let across = data.delta_h_j(1.0, 298.15, 1822.0).unwrap();
        // 11 K of solid Cp + latent + 11 K of liquid Cp
        let expected = below + 11.0 * 25.1 + 13_810.0 + 11.0 * 46.0;
        assert!((across - expected).abs() < 1e-6, "across = {across}");
    }

    #[test]
    fn out_of_range_is_an_error() {
        let data = ThermoData::constant(298.0, 2000.0, 30.0).unwrap();
        let err = data.delta_h_j(1.0, 298.15, 2500.0).unwrap_err();
        assert!(matches!(err, ThermoError::OutOfRange { .. }));
    }

    #[test]
    fn gapped_segments_rejected() {
        let result = ThermoData::new(
            vec![
                HeatCapacity::Constant(ConstantCp::new(250.0, 1000.0, 25.0).unwrap()),
                HeatCapacity::Constant(ConstantCp::new(1100.0, 4000.0, 30.0).unwrap()),
            ],
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn zero_moles_zero_enthalpy() {
        let data = ThermoData::constant(250.0, 4000.0, 30.0).unwrap();
        assert_eq!(data.delta_h_j(0.0, 300.0, 2000.0).unwrap(), 0.0);
    }
}
