//! Keplerian elements and the two-body conic they describe.
//!
//! Field-for-field grounded in `physics/kepler_orbit.hpp`'s
//! `KeplerianElements<Frame>`: an over-determined record where the caller
//! supplies exactly one member of each redundant family (shape, size,
//! anomaly) and every other field is filled in by `elements_at_epoch()`, or
//! left `NaN` when it does not apply to the conic's type (`period` is `NaN`
//! for a hyperbola, `turning_angle` is `NaN` for an ellipse, and so on).

use crate::frames::Frame;
use crate::grassmann::{Displacement, VelocityVec};
use crate::point::Instant;
use crate::quantities::GravitationalParameter;
use crate::r3_element::R3Element;
use crate::trajectory::RelativeDegreesOfFreedom;

/// One redundant choice of conic shape, from the eight shape/size elements
/// `physics/kepler_orbit.hpp` declares as mutually-redundant `optional`s.
/// `mean_motion`, `period`, and the four `hyperbolic_*` members are not
/// valid inputs here — they are always *outputs*, filled by
/// `elements_at_epoch()` and `NaN` on the conic type they don't apply to.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub enum Shape {
    Eccentricity(f64),
    SemiMajorAxis(f64),
    SemiMinorAxis(f64),
    SemiLatusRectum(f64),
    PeriapsisDistance(f64),
    SpecificEnergy(f64),
    CharacteristicEnergy(f64),
    SpecificAngularMomentum(f64),
}

/// One redundant choice of conic size, from the same eight-element family
/// as [`Shape`]. Shape and size play a symmetric mathematical role — any
/// two distinct members of the family pin down the conic — but are kept as
/// separate enums so the API documents "supply one shape-like pick and one
/// size-like pick" rather than "supply any two of eight interchangeable
/// things".
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub enum Size {
    Eccentricity(f64),
    SemiMajorAxis(f64),
    SemiMinorAxis(f64),
    SemiLatusRectum(f64),
    PeriapsisDistance(f64),
    SpecificEnergy(f64),
    CharacteristicEnergy(f64),
    SpecificAngularMomentum(f64),
}

/// One redundant choice of anomaly at epoch.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub enum Anomaly {
    TrueAnomaly(f64),
    MeanAnomaly(f64),
    HyperbolicMeanAnomaly(f64),
}

/// The caller-supplied, under-determined description of a conic: exactly
/// one shape, one size, and one anomaly, plus the three orientation angles,
/// which are never redundant.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct KeplerianElementsInput {
    pub shape: Shape,
    pub size: Size,
    pub anomaly: Anomaly,
    pub inclination: f64,
    pub longitude_of_ascending_node: f64,
    pub argument_of_periapsis: f64,
}

/// The full, over-determined record `elements_at_epoch()` produces: every
/// field `kepler_orbit.hpp`'s `KeplerianElements<Frame>` has, computed from
/// whichever subset the caller originally supplied. Fields that only apply
/// to one conic type are `NaN` on the other.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct KeplerianElements {
    pub eccentricity: f64,
    pub semi_major_axis: f64,
    pub semi_minor_axis: f64,
    pub semi_latus_rectum: f64,
    pub periapsis_distance: f64,
    pub specific_energy: f64,
    pub characteristic_energy: f64,
    pub specific_angular_momentum: f64,
    /// `NaN` for a hyperbolic conic.
    pub mean_motion: f64,
    /// `NaN` for a hyperbolic conic.
    pub period: f64,
    /// `NaN` for an elliptic conic.
    pub hyperbolic_mean_motion: f64,
    /// `NaN` for an elliptic conic.
    pub hyperbolic_excess_velocity: f64,
    /// `NaN` for an elliptic conic.
    pub asymptotic_true_anomaly: f64,
    /// `NaN` for an elliptic conic.
    pub turning_angle: f64,
    pub inclination: f64,
    pub longitude_of_ascending_node: f64,
    pub argument_of_periapsis: f64,
    pub true_anomaly: f64,
    pub time_since_periapsis: f64,
    /// `NaN` for a hyperbolic conic.
    pub mean_anomaly: f64,
    /// `NaN` for an elliptic conic.
    pub hyperbolic_mean_anomaly: f64,
}

impl KeplerianElements {
    #[must_use]
    pub fn is_elliptic(&self) -> bool {
        self.eccentricity < 1.0
    }

    #[must_use]
    pub fn is_hyperbolic(&self) -> bool {
        self.eccentricity > 1.0
    }
}

/// A shape or size pick, reduced to the one or two of {signed semi-major
/// axis, eccentricity, semi-latus rectum, periapsis distance, semi-minor
/// axis} it directly fixes. [`Shape::SpecificEnergy`]/[`Shape::CharacteristicEnergy`]
/// collapse to [`Constraint::SemiMajorAxis`] (both are linear in `1/a`, per
/// `a = -mu/(2*specific_energy)` and `a = -mu/characteristic_energy`) and
/// [`Shape::SpecificAngularMomentum`] collapses to [`Constraint::SemiLatusRectum`]
/// (`p = h^2/mu`), so [`combine_constraints`] only has to handle the five
/// cases below.
#[derive(Clone, Copy)]
enum Constraint {
    Eccentricity(f64),
    SemiMajorAxis(f64),
    SemiLatusRectum(f64),
    PeriapsisDistance(f64),
    SemiMinorAxis(f64),
}

fn shape_to_constraint(shape: Shape, mu: f64) -> Constraint {
    match shape {
        Shape::Eccentricity(e) => Constraint::Eccentricity(e),
        Shape::SemiMajorAxis(a) => Constraint::SemiMajorAxis(a),
        Shape::SemiMinorAxis(b) => Constraint::SemiMinorAxis(b),
        Shape::SemiLatusRectum(p) => Constraint::SemiLatusRectum(p),
        Shape::PeriapsisDistance(q) => Constraint::PeriapsisDistance(q),
        Shape::SpecificEnergy(specific_energy) => Constraint::SemiMajorAxis(-mu / (2.0 * specific_energy)),
        Shape::CharacteristicEnergy(characteristic_energy) => Constraint::SemiMajorAxis(-mu / characteristic_energy),
        Shape::SpecificAngularMomentum(h) => Constraint::SemiLatusRectum(h * h / mu),
    }
}

fn size_to_constraint(size: Size, mu: f64) -> Constraint {
    match size {
        Size::Eccentricity(e) => Constraint::Eccentricity(e),
        Size::SemiMajorAxis(a) => Constraint::SemiMajorAxis(a),
        Size::SemiMinorAxis(b) => Constraint::SemiMinorAxis(b),
        Size::SemiLatusRectum(p) => Constraint::SemiLatusRectum(p),
        Size::PeriapsisDistance(q) => Constraint::PeriapsisDistance(q),
        Size::SpecificEnergy(specific_energy) => Constraint::SemiMajorAxis(-mu / (2.0 * specific_energy)),
        Size::CharacteristicEnergy(characteristic_energy) => Constraint::SemiMajorAxis(-mu / characteristic_energy),
        Size::SpecificAngularMomentum(h) => Constraint::SemiLatusRectum(h * h / mu),
    }
}

/// Solves for (signed semi-major axis, eccentricity) given two independent
/// constraints, using `a < 0` for hyperbolic orbits throughout (so that
/// `p = a * (1 - e^2)`, `q = a * (1 - e)`, and `b^2 = |a| * p` all hold
/// without a separate hyperbolic formula).
///
/// # Panics
///
/// Panics if the two constraints do not jointly determine a unique conic —
/// either because they are redundant (e.g. two semi-major-axis-equivalent
/// picks) or because, for a pair like semi-minor axis and semi-latus
/// rectum, `b^2 = |a| * p` alone cannot tell an ellipse from a hyperbola.
fn combine_constraints(first: Constraint, second: Constraint) -> (f64, f64) {
    use Constraint::{Eccentricity, PeriapsisDistance, SemiLatusRectum, SemiMajorAxis, SemiMinorAxis};
    match (first, second) {
        (Eccentricity(e), SemiMajorAxis(a)) | (SemiMajorAxis(a), Eccentricity(e)) => (a, e),
        (Eccentricity(e), SemiLatusRectum(p)) | (SemiLatusRectum(p), Eccentricity(e)) => (p / (1.0 - e * e), e),
        (Eccentricity(e), PeriapsisDistance(q)) | (PeriapsisDistance(q), Eccentricity(e)) => (q / (1.0 - e), e),
        (Eccentricity(e), SemiMinorAxis(b)) | (SemiMinorAxis(b), Eccentricity(e)) => {
            let magnitude = b / (1.0 - e * e).abs().sqrt();
            (if e < 1.0 { magnitude } else { -magnitude }, e)
        }
        (SemiMajorAxis(a), SemiLatusRectum(p)) | (SemiLatusRectum(p), SemiMajorAxis(a)) => (a, (1.0 - p / a).sqrt()),
        (SemiMajorAxis(a), PeriapsisDistance(q)) | (PeriapsisDistance(q), SemiMajorAxis(a)) => (a, 1.0 - q / a),
        (SemiMajorAxis(a), SemiMinorAxis(b)) | (SemiMinorAxis(b), SemiMajorAxis(a)) => {
            let p = b * b / a.abs();
            (a, (1.0 - p / a).sqrt())
        }
        (SemiLatusRectum(p), PeriapsisDistance(q)) | (PeriapsisDistance(q), SemiLatusRectum(p)) => {
            let e = p / q - 1.0;
            (q / (1.0 - e), e)
        }
        _ => panic!("KeplerianElementsInput: shape/size combination does not determine a unique conic"),
    }
}

fn shape_and_size_to_semi_major_axis_and_eccentricity(shape: Shape, size: Size, mu: f64) -> (f64, f64) {
    combine_constraints(shape_to_constraint(shape, mu), size_to_constraint(size, mu))
}

/// A two-body conic orbit: a primary's gravitational parameter, an epoch,
/// and the elements (or state vectors) at that epoch.
#[derive(Clone, Copy, Debug)]
pub struct KeplerOrbit<F> {
    gravitational_parameter: GravitationalParameter,
    epoch: Instant,
    elements_at_epoch: KeplerianElements,
    _frame: std::marker::PhantomData<F>,
}

impl<F: Frame> KeplerOrbit<F> {
    /// Builds an orbit from an under-determined [`KeplerianElementsInput`].
    ///
    /// # Panics
    ///
    /// Panics if `F` is not inertial, or if the input's shape/size
    /// combination is not one this crate supports.
    #[must_use]
    pub fn from_elements(gravitational_parameter: GravitationalParameter, epoch: Instant, input: KeplerianElementsInput) -> Self {
        assert!(F::IS_INERTIAL, "KeplerOrbit requires an inertial frame, got {}", F::NAME);
        let mu = gravitational_parameter.value_si();
        let (semi_major_axis, eccentricity) = shape_and_size_to_semi_major_axis_and_eccentricity(input.shape, input.size, mu);
        let true_anomaly = match input.anomaly {
            Anomaly::TrueAnomaly(nu) => nu,
            Anomaly::MeanAnomaly(m) => {
                assert!(eccentricity < 1.0, "MeanAnomaly requires an elliptic orbit");
                mean_anomaly_to_true_anomaly_elliptic(m, eccentricity)
            }
            Anomaly::HyperbolicMeanAnomaly(m) => {
                assert!(eccentricity > 1.0, "HyperbolicMeanAnomaly requires a hyperbolic orbit");
                mean_anomaly_to_true_anomaly_hyperbolic(m, eccentricity)
            }
        };
        let elements_at_epoch = complete_elements(mu, semi_major_axis, eccentricity, true_anomaly, input);
        Self {
            gravitational_parameter,
            epoch,
            elements_at_epoch,
            _frame: std::marker::PhantomData,
        }
    }

    /// Builds an orbit from a state vector (relative position and velocity)
    /// at `epoch`, the Lambert-free constructor `kepler_orbit.hpp` also
    /// provides.
    ///
    /// # Panics
    ///
    /// Panics if `F` is not inertial or the state vector is degenerate
    /// (zero displacement, or a displacement and velocity that are
    /// parallel, which carries no angular momentum and so describes no
    /// conic).
    #[must_use]
    pub fn from_state_vectors(gravitational_parameter: GravitationalParameter, epoch: Instant, state: RelativeDegreesOfFreedom<F>) -> Self {
        assert!(F::IS_INERTIAL, "KeplerOrbit requires an inertial frame, got {}", F::NAME);
        let mu = gravitational_parameter.value_si();
        let r_vec = state.displacement.coordinates();
        let v_vec = state.velocity.coordinates();
        let r = r_vec.norm();
        assert!(r > 0.0, "KeplerOrbit::from_state_vectors: zero displacement");
        let v2 = v_vec.dot(v_vec);

        let h_vec = r_vec.cross(v_vec);
        let h2 = h_vec.dot(h_vec);
        assert!(h2 > 0.0, "KeplerOrbit::from_state_vectors: displacement and velocity are parallel");

        let energy = v2 / 2.0 - mu / r;
        let semi_major_axis = -mu / (2.0 * energy);

        let e_vec = (v_vec.cross(h_vec)) / mu - r_vec / r;
        let eccentricity = e_vec.norm();

        let node_vec = R3Element::new(0.0, 0.0, 1.0).cross(h_vec);
        let inclination = (h_vec.z / h2.sqrt()).acos();

        let longitude_of_ascending_node = if node_vec.norm() < 1e-12 {
            0.0
        } else {
            let raan = (node_vec.x / node_vec.norm()).acos();
            if node_vec.y < 0.0 {
                2.0 * std::f64::consts::PI - raan
            } else {
                raan
            }
        };

        let argument_of_periapsis = if node_vec.norm() < 1e-12 || eccentricity < 1e-12 {
            0.0
        } else {
            let cos_arg = (node_vec.dot(e_vec) / (node_vec.norm() * eccentricity)).clamp(-1.0, 1.0);
            let arg = cos_arg.acos();
            if e_vec.z < 0.0 {
                2.0 * std::f64::consts::PI - arg
            } else {
                arg
            }
        };

        let true_anomaly = if eccentricity < 1e-12 {
            0.0
        } else {
            let cos_nu = (e_vec.dot(r_vec) / (eccentricity * r)).clamp(-1.0, 1.0);
            let nu = cos_nu.acos();
            if r_vec.dot(v_vec) < 0.0 {
                2.0 * std::f64::consts::PI - nu
            } else {
                nu
            }
        };

        let input = KeplerianElementsInput {
            shape: Shape::Eccentricity(eccentricity),
            size: Size::SemiMajorAxis(semi_major_axis),
            anomaly: Anomaly::TrueAnomaly(true_anomaly),
            inclination,
            longitude_of_ascending_node,
            argument_of_periapsis,
        };
        let elements_at_epoch = complete_elements(mu, semi_major_axis, eccentricity, true_anomaly, input);

        Self {
            gravitational_parameter,
            epoch,
            elements_at_epoch,
            _frame: std::marker::PhantomData,
        }
    }

    #[must_use]
    pub fn elements_at_epoch(&self) -> KeplerianElements {
        self.elements_at_epoch
    }

    #[must_use]
    pub fn epoch(&self) -> Instant {
        self.epoch
    }

    /// The state vector at `time`, propagated by solving Kepler's equation
    /// for the anomaly at `time` and converting back to perifocal, then
    /// inertial, coordinates.
    ///
    /// # Panics
    ///
    /// Panics if Newton's method fails to converge within a generous
    /// iteration budget — this should only happen for a pathologically
    /// supplied eccentricity (e.g. exactly 1.0, a parabola, which this
    /// crate does not model).
    #[must_use]
    pub fn state_vectors(&self, time: Instant) -> RelativeDegreesOfFreedom<F> {
        let elements = self.elements_at_epoch;
        let mu = self.gravitational_parameter.value_si();
        let dt = (time - self.epoch).get::<uom::si::time::second>();

        let (true_anomaly, r) = if elements.is_elliptic() {
            let n = elements.mean_motion;
            let m = elements.mean_anomaly + n * dt;
            let e = solve_kepler_equation_elliptic(m, elements.eccentricity);
            let nu = eccentric_anomaly_to_true_anomaly_elliptic(e, elements.eccentricity);
            let r = elements.semi_major_axis * (1.0 - elements.eccentricity * e.cos());
            (nu, r)
        } else {
            let n = elements.hyperbolic_mean_motion;
            let m = elements.hyperbolic_mean_anomaly + n * dt;
            let h = solve_kepler_equation_hyperbolic(m, elements.eccentricity);
            let nu = eccentric_anomaly_to_true_anomaly_hyperbolic(h, elements.eccentricity);
            let r = elements.semi_major_axis * (1.0 - elements.eccentricity * h.cosh());
            (nu, r)
        };

        let p = elements.semi_latus_rectum;
        let perifocal_position = R3Element::new(r * true_anomaly.cos(), r * true_anomaly.sin(), 0.0);
        let perifocal_velocity = R3Element::new(-true_anomaly.sin(), elements.eccentricity + true_anomaly.cos(), 0.0) * (mu / p).sqrt();

        let rotation = perifocal_to_inertial_rotation(elements.inclination, elements.longitude_of_ascending_node, elements.argument_of_periapsis);
        let displacement_r3 = rotation(perifocal_position);
        let velocity_r3 = rotation(perifocal_velocity);

        RelativeDegreesOfFreedom::new(
            Displacement::from_r3(displacement_r3),
            VelocityVec::from_r3(velocity_r3),
        )
    }
}

fn complete_elements(mu: f64, semi_major_axis: f64, eccentricity: f64, true_anomaly: f64, input: KeplerianElementsInput) -> KeplerianElements {
    let semi_latus_rectum = semi_major_axis * (1.0 - eccentricity * eccentricity);
    let periapsis_distance = semi_major_axis * (1.0 - eccentricity);
    let specific_energy = -mu / (2.0 * semi_major_axis);
    let specific_angular_momentum = (mu * semi_latus_rectum).sqrt();

    let is_elliptic = eccentricity < 1.0;

    let semi_minor_axis = if is_elliptic {
        semi_major_axis * (1.0 - eccentricity * eccentricity).sqrt()
    } else {
        semi_major_axis.abs() * (eccentricity * eccentricity - 1.0).sqrt()
    };

    let mean_motion = if is_elliptic { (mu / semi_major_axis.powi(3)).sqrt() } else { f64::NAN };
    let period = if is_elliptic { 2.0 * std::f64::consts::PI / mean_motion } else { f64::NAN };

    // C3 = -mu/a is well-defined (and negative) for a bound orbit too, unlike
    // the four hyperbolic-only members below.
    let characteristic_energy = -mu / semi_major_axis;

    let hyperbolic_mean_motion = if !is_elliptic { (mu / (-semi_major_axis).powi(3)).sqrt() } else { f64::NAN };
    let hyperbolic_excess_velocity = if !is_elliptic { characteristic_energy.sqrt() } else { f64::NAN };
    let asymptotic_true_anomaly = if !is_elliptic { (-1.0 / eccentricity).acos() } else { f64::NAN };
    let turning_angle = if !is_elliptic { 2.0 * (1.0 / eccentricity).asin() } else { f64::NAN };

    let mean_anomaly = if is_elliptic {
        true_anomaly_to_mean_anomaly_elliptic(true_anomaly, eccentricity)
    } else {
        f64::NAN
    };
    let hyperbolic_mean_anomaly = if !is_elliptic {
        true_anomaly_to_mean_anomaly_hyperbolic(true_anomaly, eccentricity)
    } else {
        f64::NAN
    };

    let time_since_periapsis = if is_elliptic {
        mean_anomaly / mean_motion
    } else {
        hyperbolic_mean_anomaly / hyperbolic_mean_motion
    };

    KeplerianElements {
        eccentricity,
        semi_major_axis,
        semi_minor_axis,
        semi_latus_rectum,
        periapsis_distance,
        specific_energy,
        characteristic_energy,
        specific_angular_momentum,
        mean_motion,
        period,
        hyperbolic_mean_motion,
        hyperbolic_excess_velocity,
        asymptotic_true_anomaly,
        turning_angle,
        inclination: input.inclination,
        longitude_of_ascending_node: input.longitude_of_ascending_node,
        argument_of_periapsis: input.argument_of_periapsis,
        true_anomaly,
        time_since_periapsis,
        mean_anomaly,
        hyperbolic_mean_anomaly,
    }
}

fn perifocal_to_inertial_rotation(inclination: f64, longitude_of_ascending_node: f64, argument_of_periapsis: f64) -> impl Fn(R3Element) -> R3Element {
    let (sin_o, cos_o) = longitude_of_ascending_node.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();
    let (sin_w, cos_w) = argument_of_periapsis.sin_cos();

    let r11 = cos_o * cos_w - sin_o * sin_w * cos_i;
    let r12 = -cos_o * sin_w - sin_o * cos_w * cos_i;
    let r21 = sin_o * cos_w + cos_o * sin_w * cos_i;
    let r22 = -sin_o * sin_w + cos_o * cos_w * cos_i;
    let r31 = sin_w * sin_i;
    let r32 = cos_w * sin_i;

    move |p: R3Element| R3Element::new(r11 * p.x + r12 * p.y, r21 * p.x + r22 * p.y, r31 * p.x + r32 * p.y)
}

/// Solves `M = E - e sin E` for `E` by Newton's method.
///
/// # Panics
///
/// Panics if the iteration fails to converge within 100 steps.
fn solve_kepler_equation_elliptic(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut e = if eccentricity < 0.8 { mean_anomaly } else { std::f64::consts::PI };
    for _ in 0..100 {
        let f = e - eccentricity * e.sin() - mean_anomaly;
        let f_prime = 1.0 - eccentricity * e.cos();
        let delta = f / f_prime;
        e -= delta;
        if delta.abs() < 1e-14 {
            return e;
        }
    }
    panic!("Kepler's equation (elliptic) did not converge for M={mean_anomaly}, e={eccentricity}");
}

/// Solves `M = e sinh H - H` for `H` by Newton's method.
///
/// # Panics
///
/// Panics if the iteration fails to converge within 100 steps.
fn solve_kepler_equation_hyperbolic(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut h = mean_anomaly.signum() * (2.0 * mean_anomaly.abs() / eccentricity).asinh();
    for _ in 0..100 {
        let f = eccentricity * h.sinh() - h - mean_anomaly;
        let f_prime = eccentricity * h.cosh() - 1.0;
        let delta = f / f_prime;
        h -= delta;
        if delta.abs() < 1e-14 {
            return h;
        }
    }
    panic!("Kepler's equation (hyperbolic) did not converge for M={mean_anomaly}, e={eccentricity}");
}

fn eccentric_anomaly_to_true_anomaly_elliptic(e: f64, eccentricity: f64) -> f64 {
    2.0 * ((1.0 + eccentricity).sqrt() * (e / 2.0).sin()).atan2((1.0 - eccentricity).sqrt() * (e / 2.0).cos())
}

fn eccentric_anomaly_to_true_anomaly_hyperbolic(h: f64, eccentricity: f64) -> f64 {
    2.0 * (((eccentricity + 1.0) / (eccentricity - 1.0)).sqrt() * (h / 2.0).tanh()).atan()
}

fn true_anomaly_to_mean_anomaly_elliptic(true_anomaly: f64, eccentricity: f64) -> f64 {
    let e = 2.0 * (((1.0 - eccentricity) / (1.0 + eccentricity)).sqrt() * (true_anomaly / 2.0).tan()).atan();
    e - eccentricity * e.sin()
}

fn true_anomaly_to_mean_anomaly_hyperbolic(true_anomaly: f64, eccentricity: f64) -> f64 {
    let h = 2.0 * ((true_anomaly / 2.0).tan() / ((eccentricity + 1.0) / (eccentricity - 1.0)).sqrt()).atanh();
    eccentricity * h.sinh() - h
}

fn mean_anomaly_to_true_anomaly_elliptic(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let e = solve_kepler_equation_elliptic(mean_anomaly, eccentricity);
    eccentric_anomaly_to_true_anomaly_elliptic(e, eccentricity)
}

fn mean_anomaly_to_true_anomaly_hyperbolic(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let h = solve_kepler_equation_hyperbolic(mean_anomaly, eccentricity);
    eccentric_anomaly_to_true_anomaly_hyperbolic(h, eccentricity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::IcrfJ2000Ecliptic;
    use crate::grassmann::{Displacement, VelocityVec};
    use approx::assert_relative_eq;

    const MU_EARTH: f64 = 398_600.4418e9;

    #[test]
    fn circular_orbit_state_vectors_have_constant_radius() {
        let mu = GravitationalParameter::from_si(MU_EARTH);
        let epoch = Instant::from_julian_date(2436116.3115);
        let input = KeplerianElementsInput {
            shape: Shape::Eccentricity(0.0),
            size: Size::SemiMajorAxis(7_000_000.0),
            anomaly: Anomaly::TrueAnomaly(0.0),
            inclination: 0.0,
            longitude_of_ascending_node: 0.0,
            argument_of_periapsis: 0.0,
        };
        let orbit = KeplerOrbit::<IcrfJ2000Ecliptic>::from_elements(mu, epoch, input);
        let elements = orbit.elements_at_epoch();
        assert!(elements.is_elliptic());
        assert_relative_eq!(elements.semi_major_axis, 7_000_000.0, max_relative = 1e-9);

        let quarter_period = Instant::from_julian_date(epoch.julian_date() + elements.period / 86_400.0 / 4.0);
        let state = orbit.state_vectors(quarter_period);
        let r = state.displacement.coordinates().norm();
        assert!((r - 7_000_000.0).abs() / 7_000_000.0 < 1e-6);
    }

    #[test]
    fn from_state_vectors_round_trips_through_elements() {
        let mu = GravitationalParameter::from_si(MU_EARTH);
        let epoch = Instant::from_julian_date(2436116.3115);
        let displacement = Displacement::<IcrfJ2000Ecliptic>::from_r3(R3Element::new(7_000_000.0, 0.0, 0.0));
        let speed = (MU_EARTH / 7_000_000.0_f64).sqrt();
        let velocity = VelocityVec::<IcrfJ2000Ecliptic>::from_r3(R3Element::new(0.0, speed, 0.0));
        let state = RelativeDegreesOfFreedom::new(displacement, velocity);

        let orbit = KeplerOrbit::from_state_vectors(mu, epoch, state);
        let recovered = orbit.state_vectors(epoch);

        assert!((recovered.displacement.coordinates().x - 7_000_000.0).abs() < 1.0);
        assert!((recovered.displacement.coordinates().y).abs() < 1.0);
        assert!((recovered.velocity.coordinates().y - speed).abs() < 1e-6);
    }

    #[test]
    fn hyperbolic_orbit_has_nan_period_and_finite_turning_angle() {
        let mu = GravitationalParameter::from_si(MU_EARTH);
        let epoch = Instant::from_julian_date(2436116.3115);
        let input = KeplerianElementsInput {
            shape: Shape::Eccentricity(1.5),
            size: Size::PeriapsisDistance(7_000_000.0),
            anomaly: Anomaly::TrueAnomaly(0.0),
            inclination: 0.0,
            longitude_of_ascending_node: 0.0,
            argument_of_periapsis: 0.0,
        };
        let orbit = KeplerOrbit::<IcrfJ2000Ecliptic>::from_elements(mu, epoch, input);
        let elements = orbit.elements_at_epoch();
        assert!(elements.is_hyperbolic());
        assert!(elements.period.is_nan());
        assert!(elements.turning_angle.is_finite());
        assert!(elements.mean_anomaly.is_nan());
    }

    #[test]
    #[should_panic(expected = "parallel")]
    fn from_state_vectors_rejects_degenerate_radial_trajectory() {
        let mu = GravitationalParameter::from_si(MU_EARTH);
        let epoch = Instant::from_julian_date(2436116.3115);
        let displacement = Displacement::<IcrfJ2000Ecliptic>::from_r3(R3Element::new(7_000_000.0, 0.0, 0.0));
        let velocity = VelocityVec::<IcrfJ2000Ecliptic>::from_r3(R3Element::new(100.0, 0.0, 0.0));
        let state = RelativeDegreesOfFreedom::new(displacement, velocity);
        let _ = KeplerOrbit::from_state_vectors(mu, epoch, state);
    }
}
