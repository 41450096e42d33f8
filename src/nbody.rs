//! A minimal mutual-gravity integrator.
//!
//! The original `NBodySystem<Frame>`'s actual integration scheme (a
//! symplectic partitioned Runge-Kutta method) is explicitly out of scope for
//! this crate — nothing here is a contract on step count or numerical
//! scheme. This is a fixed-step leapfrog (kick-drift-kick) integrator, just
//! concrete enough that [`crate::plugin::Plugin::advance_time`] has
//! something real to call.

use crate::body::MassiveBody;
use crate::frames::Frame;
use crate::grassmann::VelocityVec;
use crate::point::{Instant, Position};
use crate::r3_element::R3Element;
use crate::trajectory::{DegreesOfFreedom, Trajectory};

/// Advances a set of massive bodies' trajectories under their mutual
/// gravity.
pub struct NBodySystem<F> {
    _frame: std::marker::PhantomData<F>,
}

impl<F: Frame> NBodySystem<F> {
    #[must_use]
    pub fn new() -> Self {
        assert!(F::IS_INERTIAL, "NBodySystem requires an inertial frame, got {}", F::NAME);
        Self { _frame: std::marker::PhantomData }
    }

    /// Integrates `trajectories` (one per body, in the same order as
    /// `bodies`) forward to `target_time` using a fixed number of
    /// leapfrog steps.
    ///
    /// # Panics
    ///
    /// Panics if `bodies` and `trajectories` have different lengths, if any
    /// trajectory is empty, or if `target_time` is not after every
    /// trajectory's current last sample.
    pub fn advance(&self, bodies: &[MassiveBody], trajectories: &mut [Trajectory<F>], target_time: Instant, steps: u32) {
        assert_eq!(bodies.len(), trajectories.len(), "NBodySystem::advance: bodies/trajectories length mismatch");
        assert!(steps > 0, "NBodySystem::advance: steps must be positive");

        let start_time = trajectories
            .iter()
            .map(Trajectory::last_time)
            .fold(None, |acc: Option<Instant>, t| match acc {
                None => Some(t),
                Some(existing) => {
                    assert!((existing.julian_date() - t.julian_date()).abs() < 1e-9, "NBodySystem::advance: trajectories are not synchronized");
                    Some(existing)
                }
            })
            .expect("NBodySystem::advance called with no trajectories");

        let total_seconds = (target_time - start_time).get::<uom::si::time::second>();
        assert!(total_seconds > 0.0, "NBodySystem::advance: target_time must be after the current state");
        let dt = total_seconds / f64::from(steps);

        let mut positions: Vec<R3Element> = trajectories
            .iter()
            .map(|t| t.last_degrees_of_freedom().position.displacement_from_origin().coordinates())
            .collect();
        let mut velocities: Vec<R3Element> = trajectories
            .iter()
            .map(|t| t.last_degrees_of_freedom().velocity.coordinates())
            .collect();

        for step in 0..steps {
            let accelerations = mutual_accelerations(bodies, &positions);
            for i in 0..positions.len() {
                velocities[i] = velocities[i] + accelerations[i] * (dt / 2.0);
                positions[i] = positions[i] + velocities[i] * dt;
            }
            let accelerations = mutual_accelerations(bodies, &positions);
            for i in 0..positions.len() {
                velocities[i] = velocities[i] + accelerations[i] * (dt / 2.0);
            }

            let time = Instant::from_julian_date(start_time.julian_date() + (f64::from(step) + 1.0) * dt / 86_400.0);
            for (trajectory, (&position, &velocity)) in trajectories.iter_mut().zip(positions.iter().zip(velocities.iter())) {
                trajectory.append(
                    time,
                    DegreesOfFreedom::new(
                        Position::from_origin(crate::grassmann::Displacement::from_r3(position)),
                        VelocityVec::from_r3(velocity),
                    ),
                );
            }
        }
    }
}

impl<F: Frame> Default for NBodySystem<F> {
    fn default() -> Self {
        Self::new()
    }
}

const GRAVITATIONAL_SOFTENING_METERS: f64 = 1.0;

fn mutual_accelerations(bodies: &[MassiveBody], positions: &[R3Element]) -> Vec<R3Element> {
    let mut accelerations = vec![R3Element::zero(); positions.len()];
    for i in 0..positions.len() {
        for j in 0..positions.len() {
            if i == j {
                continue;
            }
            let delta = positions[j] - positions[i];
            let distance = delta.norm().max(GRAVITATIONAL_SOFTENING_METERS);
            let mu_j = bodies[j].gravitational_parameter().value_si();
            accelerations[i] = accelerations[i] + delta * (mu_j / distance.powi(3));
        }
    }
    accelerations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::IcrfJ2000Ecliptic;
    use crate::grassmann::{Displacement, VelocityVec};
    use crate::quantities::GravitationalParameter;

    fn circular_two_body_setup() -> (Vec<MassiveBody>, Vec<Trajectory<IcrfJ2000Ecliptic>>) {
        let mu_primary = GravitationalParameter::from_si(398_600.4418e9);
        let primary = MassiveBody::new(mu_primary);
        let satellite = MassiveBody::new(GravitationalParameter::from_si(1.0));

        let epoch = Instant::from_julian_date(2436116.3115);
        let r = 7_000_000.0;
        let v = (mu_primary.value_si() / r).sqrt();

        let mut primary_trajectory = Trajectory::new();
        primary_trajectory.append(
            epoch,
            DegreesOfFreedom::new(
                Position::from_origin(Displacement::from_r3(R3Element::zero())),
                VelocityVec::from_r3(R3Element::zero()),
            ),
        );

        let mut satellite_trajectory = Trajectory::new();
        satellite_trajectory.append(
            epoch,
            DegreesOfFreedom::new(
                Position::from_origin(Displacement::from_r3(R3Element::new(r, 0.0, 0.0))),
                VelocityVec::from_r3(R3Element::new(0.0, v, 0.0)),
            ),
        );

        (vec![primary, satellite], vec![primary_trajectory, satellite_trajectory])
    }

    #[test]
    fn advance_appends_one_sample_per_step() {
        let (bodies, mut trajectories) = circular_two_body_setup();
        let system: NBodySystem<IcrfJ2000Ecliptic> = NBodySystem::new();
        let target = Instant::from_julian_date(2436116.3115 + 0.01);
        system.advance(&bodies, &mut trajectories, target, 10);
        assert_eq!(trajectories[0].len(), 11);
        assert_eq!(trajectories[1].len(), 11);
    }

    #[test]
    fn short_circular_arc_roughly_preserves_radius() {
        let (bodies, mut trajectories) = circular_two_body_setup();
        let system: NBodySystem<IcrfJ2000Ecliptic> = NBodySystem::new();
        let target = Instant::from_julian_date(2436116.3115 + 0.001);
        system.advance(&bodies, &mut trajectories, target, 50);
        let satellite_end = trajectories[1].last_degrees_of_freedom();
        let r = satellite_end.position.displacement_from_origin().coordinates().norm();
        assert!((r - 7_000_000.0).abs() / 7_000_000.0 < 1e-3);
    }
}
