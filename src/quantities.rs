//! Dimensioned scalars.
//!
//! Re-exports the `uom` quantities this crate actually needs and adds the
//! handful the SI catalogue has no named type for, following the teacher's
//! own `astrodynamics.rs` trick of reusing a dimensionally-equal `uom`
//! quantity (there: `Velocity` standing in for specific energy) rather than
//! hand-rolling a full dimensional-analysis system. A literal dimension
//! *vector* with compile-time arithmetic would need nightly
//! `generic_const_exprs`; this crate instead follows `uom`'s own approach of
//! a finite, named set of concrete quantities.

pub use uom::si::f64::{
    AvailableEnergy as SpecificEnergy, Angle, AngularVelocity as AngularFrequency, DiffusionCoefficient as SpecificAngularMomentum, Length,
    Mass, Time, Velocity,
};

use std::ops::{Add, Div, Mul, Sub};

/// Standard gravitational parameter `mu = G * M`, in m^3/s^2.
///
/// `uom` has no named quantity of dimension L^3 T^-2, so this is a small
/// newtype rather than a type alias; it carries the SI value directly the
/// way the teacher's `MU_EARTH`/`MU_MOON` constants do in `constants.rs`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct GravitationalParameter(f64);

impl GravitationalParameter {
    /// Builds a gravitational parameter from an SI value (m^3/s^2).
    ///
    /// # Panics
    ///
    /// Panics if `value_si` is not finite and strictly positive: a
    /// non-positive gravitational parameter cannot be a primary body for
    /// Kepler propagation.
    #[must_use]
    pub fn from_si(value_si: f64) -> Self {
        assert!(
            value_si.is_finite() && value_si > 0.0,
            "GravitationalParameter must be finite and positive, got {value_si}"
        );
        Self(value_si)
    }

    #[must_use]
    pub fn from_km3_per_s2(value: f64) -> Self {
        Self::from_si(value * 1.0e9)
    }

    #[must_use]
    pub const fn value_si(self) -> f64 {
        self.0
    }

    /// `G * mass`, as used when a body's original data gives a mass rather
    /// than a gravitational parameter directly (e.g. the Jovian moons in
    /// the solar-system fixture).
    #[must_use]
    pub fn from_mass(mass: Mass) -> Self {
        use uom::si::mass::kilogram;
        const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;
        Self::from_si(GRAVITATIONAL_CONSTANT * mass.get::<kilogram>())
    }
}

impl Add for GravitationalParameter {
    type Output = GravitationalParameter;

    fn add(self, rhs: GravitationalParameter) -> GravitationalParameter {
        GravitationalParameter::from_si(self.0 + rhs.0)
    }
}

impl Sub for GravitationalParameter {
    type Output = GravitationalParameter;

    fn sub(self, rhs: GravitationalParameter) -> GravitationalParameter {
        GravitationalParameter::from_si(self.0 - rhs.0)
    }
}

impl Mul<f64> for GravitationalParameter {
    type Output = GravitationalParameter;

    fn mul(self, rhs: f64) -> GravitationalParameter {
        GravitationalParameter::from_si(self.0 * rhs)
    }
}

impl Div<f64> for GravitationalParameter {
    type Output = GravitationalParameter;

    fn div(self, rhs: f64) -> GravitationalParameter {
        GravitationalParameter::from_si(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::mass::kilogram;

    #[test]
    fn from_km3_per_s2_matches_si_conversion() {
        let mu = GravitationalParameter::from_km3_per_s2(398_600.4418);
        assert!((mu.value_si() - 398_600.4418e9).abs() < 1.0);
    }

    #[test]
    #[should_panic(expected = "positive")]
    fn rejects_non_positive_value() {
        let _ = GravitationalParameter::from_si(0.0);
    }

    #[test]
    fn from_mass_is_proportional_to_mass() {
        let one_kg = GravitationalParameter::from_mass(Mass::new::<kilogram>(1.0));
        let ten_kg = GravitationalParameter::from_mass(Mass::new::<kilogram>(10.0));
        assert!((ten_kg.value_si() - 10.0 * one_kg.value_si()).abs() < 1e-20);
    }

    #[test]
    fn arithmetic_combines_values() {
        let a = GravitationalParameter::from_si(10.0);
        let b = GravitationalParameter::from_si(4.0);
        assert_eq!((a + b).value_si(), 14.0);
        assert_eq!((a - b).value_si(), 6.0);
        assert_eq!((a * 2.0).value_si(), 20.0);
        assert_eq!((a / 2.0).value_si(), 5.0);
    }
}
