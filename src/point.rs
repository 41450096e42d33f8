//! Affine points.
//!
//! An affine point is not a vector: two points subtract to a vector, but two
//! points do not add. `nalgebra` draws exactly this line between its own
//! `Point` and `Vector` types; this module does the same for the quantities
//! this crate needs an affine point over (time, and eventually position).

use std::ops::{Add, Sub};

use crate::grassmann::Displacement;
use crate::quantities::Time;

/// A point in an affine space modeled on displacement type `V`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Point<V> {
    from_origin: V,
}

impl<V: Copy> Point<V> {
    #[must_use]
    pub fn from_origin(from_origin: V) -> Self {
        Self { from_origin }
    }

    #[must_use]
    pub fn displacement_from_origin(self) -> V {
        self.from_origin
    }
}

impl<V: Add<Output = V> + Copy> Add<V> for Point<V> {
    type Output = Point<V>;

    fn add(self, rhs: V) -> Point<V> {
        Point::from_origin(self.from_origin + rhs)
    }
}

impl<V: Sub<Output = V> + Copy> Sub for Point<V> {
    type Output = V;

    fn sub(self, rhs: Point<V>) -> V {
        self.from_origin - rhs.from_origin
    }
}

/// A point in time. The origin is the Julian epoch (JD 0.0); see
/// [`Instant::from_julian_date`].
pub type Instant = Point<Time>;

const SECONDS_PER_DAY: f64 = 86_400.0;

impl Instant {
    /// Builds an `Instant` from a Julian Date, the convention the original
    /// solar-system fixture uses for its single sample epoch
    /// (`JulianDate(2436116.3115)`, the Sputnik launch).
    #[must_use]
    pub fn from_julian_date(julian_date: f64) -> Self {
        use uom::si::time::second;
        Self::from_origin(Time::new::<second>(julian_date * SECONDS_PER_DAY))
    }

    #[must_use]
    pub fn julian_date(self) -> f64 {
        use uom::si::time::second;
        self.from_origin.get::<second>() / SECONDS_PER_DAY
    }
}

/// A point in space, tagged with the frame it is measured in.
pub type Position<F> = Point<Displacement<F>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtracting_instants_gives_a_duration() {
        use uom::si::time::day;
        let a = Instant::from_julian_date(2436117.0);
        let b = Instant::from_julian_date(2436116.0);
        let elapsed = a - b;
        assert!((elapsed.get::<day>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn julian_date_round_trips() {
        let jd = 2436116.3115;
        let instant = Instant::from_julian_date(jd);
        assert!((instant.julian_date() - jd).abs() < 1e-9);
    }

    #[test]
    fn adding_a_duration_advances_the_instant() {
        use uom::si::time::day;
        let start = Instant::from_julian_date(2436116.3115);
        let later = start + Time::new::<day>(1.0);
        assert!((later.julian_date() - (start.julian_date() + 1.0)).abs() < 1e-9);
    }
}
