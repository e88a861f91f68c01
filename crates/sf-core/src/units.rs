// sf-core/src/units.rs

use uom::si::f64::{
    Energy as UomEnergy, Mass as UomMass,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Energy = UomEnergy;
pub type Mass = UomMass;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn j(v: f64) -> Energy {
    use uom::si::energy::joule;
    Energy::new::<joule>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

pub mod constants {
    /// Thermochemical reference temperature (K), the zero point for
    /// sensible-enthalpy integrals.
    pub const T_REF_KELVIN: f64 = 298.15;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _t = k(1873.15);
        let _e = j(1.0e9);
        let _m = kg(1000.0);
    }

    #[test]
    fn temperature_si_value_is_kelvin() {
        assert_eq!(k(298.15).value, 298.15);
    }

    #[test]
    fn mass_si_value_is_kilograms() {
        assert_eq!(kg(1600.0).value, 1600.0);
    }
}
