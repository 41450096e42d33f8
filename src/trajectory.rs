//! Appendable, time-ordered trajectories.
//!
//! Grounded in the original fixture's repeated
//! `trajectory->Append(time, DegreesOfFreedom<...>(position, velocity))`
//! call sites: a trajectory is built up one timestamped sample at a time and
//! queried for its most recent state.

use crate::frames::Frame;
use crate::grassmann::{Displacement, VelocityVec};
use crate::point::{Instant, Position};

/// A position and velocity at a single instant, both tagged with frame `F`.
#[derive(Clone, Copy, Debug)]
pub struct DegreesOfFreedom<F> {
    pub position: Position<F>,
    pub velocity: VelocityVec<F>,
}

impl<F> DegreesOfFreedom<F> {
    #[must_use]
    pub fn new(position: Position<F>, velocity: VelocityVec<F>) -> Self {
        Self { position, velocity }
    }
}

/// A displacement and velocity relative to some other body, both tagged
/// with frame `F` — what `KeplerOrbit` is built from and what
/// `Plugin::celestial_displacement_from_parent` returns.
#[derive(Clone, Copy, Debug)]
pub struct RelativeDegreesOfFreedom<F> {
    pub displacement: Displacement<F>,
    pub velocity: VelocityVec<F>,
}

impl<F> RelativeDegreesOfFreedom<F> {
    #[must_use]
    pub fn new(displacement: Displacement<F>, velocity: VelocityVec<F>) -> Self {
        Self { displacement, velocity }
    }
}

/// An append-only history of [`DegreesOfFreedom`], keyed by strictly
/// increasing [`Instant`]s.
#[derive(Clone, Debug)]
pub struct Trajectory<F: Frame> {
    samples: Vec<(Instant, DegreesOfFreedom<F>)>,
}

impl<F: Frame> Trajectory<F> {
    #[must_use]
    pub fn new() -> Self {
        Self { samples: Vec::new() }
    }

    /// Appends a sample.
    ///
    /// # Panics
    ///
    /// Panics if `time` is not strictly after the trajectory's last sample,
    /// matching the original `Trajectory::Append`'s monotonicity
    /// requirement.
    pub fn append(&mut self, time: Instant, degrees_of_freedom: DegreesOfFreedom<F>) {
        if let Some((last_time, _)) = self.samples.last() {
            assert!(
                time.julian_date() > last_time.julian_date(),
                "Trajectory::append called with a non-increasing time"
            );
        }
        self.samples.push((time, degrees_of_freedom));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// # Panics
    ///
    /// Panics if the trajectory has no samples.
    #[must_use]
    pub fn last_time(&self) -> Instant {
        self.samples.last().expect("Trajectory::last_time called on an empty trajectory").0
    }

    /// # Panics
    ///
    /// Panics if the trajectory has no samples.
    #[must_use]
    pub fn last_degrees_of_freedom(&self) -> DegreesOfFreedom<F> {
        self.samples.last().expect("Trajectory::last_degrees_of_freedom called on an empty trajectory").1
    }

    /// # Panics
    ///
    /// Panics if the trajectory has no samples.
    #[must_use]
    pub fn last_position(&self) -> Position<F> {
        self.last_degrees_of_freedom().position
    }

    /// # Panics
    ///
    /// Panics if the trajectory has no samples.
    #[must_use]
    pub fn last_velocity(&self) -> VelocityVec<F> {
        self.last_degrees_of_freedom().velocity
    }

    #[must_use]
    pub fn samples(&self) -> &[(Instant, DegreesOfFreedom<F>)] {
        &self.samples
    }
}

impl<F: Frame> Default for Trajectory<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::IcrfJ2000Ecliptic;
    use crate::grassmann::{Displacement, VelocityVec};
    use crate::r3_element::R3Element;

    fn sample_at(jd: f64) -> (Instant, DegreesOfFreedom<IcrfJ2000Ecliptic>) {
        let position = Position::from_origin(Displacement::from_r3(R3Element::new(1.0, 2.0, 3.0)));
        let velocity = VelocityVec::from_r3(R3Element::zero());
        (Instant::from_julian_date(jd), DegreesOfFreedom::new(position, velocity))
    }

    #[test]
    fn new_trajectory_is_empty() {
        let trajectory: Trajectory<IcrfJ2000Ecliptic> = Trajectory::new();
        assert!(trajectory.is_empty());
    }

    #[test]
    fn append_tracks_the_most_recent_sample() {
        let mut trajectory: Trajectory<IcrfJ2000Ecliptic> = Trajectory::new();
        let (t0, dof0) = sample_at(2436116.0);
        let (t1, dof1) = sample_at(2436117.0);
        trajectory.append(t0, dof0);
        trajectory.append(t1, dof1);
        assert_eq!(trajectory.len(), 2);
        assert!((trajectory.last_time().julian_date() - t1.julian_date()).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "non-increasing")]
    fn append_rejects_non_increasing_time() {
        let mut trajectory: Trajectory<IcrfJ2000Ecliptic> = Trajectory::new();
        let (t0, dof0) = sample_at(2436117.0);
        let (t1, dof1) = sample_at(2436116.0);
        trajectory.append(t0, dof0);
        trajectory.append(t1, dof1);
    }

    #[test]
    fn last_position_and_velocity_match_last_degrees_of_freedom() {
        let mut trajectory: Trajectory<IcrfJ2000Ecliptic> = Trajectory::new();
        let (t0, dof0) = sample_at(2436116.0);
        let (t1, dof1) = sample_at(2436117.0);
        trajectory.append(t0, dof0);
        trajectory.append(t1, dof1);
        let last = trajectory.last_degrees_of_freedom();
        assert_eq!(
            trajectory.last_position().displacement_from_origin().coordinates(),
            last.position.displacement_from_origin().coordinates()
        );
        assert_eq!(trajectory.last_velocity().coordinates(), last.velocity.coordinates());
    }

    #[test]
    #[should_panic(expected = "last_degrees_of_freedom called on an empty trajectory")]
    fn last_position_panics_on_empty_trajectory() {
        let trajectory: Trajectory<IcrfJ2000Ecliptic> = Trajectory::new();
        let _ = trajectory.last_position();
    }
}
