//! Reference frame tags.
//!
//! Every geometric value in this crate (`R3Element` excepted — it is the
//! untyped substrate) carries its frame as a type parameter. A frame is a
//! zero-sized marker; mixing frames is rejected at compile time because
//! there is simply no `impl` that accepts two different `F`s at once.

use std::fmt::Debug;

/// A compile-time-only reference frame tag.
///
/// `IS_INERTIAL` mirrors the `static_assert(Frame::is_inertial, ...)` guard
/// Principia's `KeplerOrbit<Frame>` places on its template parameter: Kepler
/// propagation is only meaningful in an inertial frame, and a rotating frame
/// (like [`AliceSun`]) must not be used there.
pub trait Frame: Copy + Clone + Debug + PartialEq + Eq + 'static {
    const IS_INERTIAL: bool;
    const NAME: &'static str;
}

/// The ecliptic, solar-system-barycentric inertial frame every physics
/// computation in this crate runs in.
///
/// Axes: X toward the J2000 mean equinox projected onto the ecliptic, Z along
/// the ecliptic pole, Y completing a right-handed triad.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IcrfJ2000Ecliptic;

impl Frame for IcrfJ2000Ecliptic {
    const IS_INERTIAL: bool = true;
    const NAME: &'static str = "ICRFJ2000Ecliptic";
}

/// The host's left-handed display frame.
///
/// `AliceSun` is obtained from [`IcrfJ2000Ecliptic`] by an XZY axis
/// permutation composed with a rotation about the celestial pole by the
/// plugin's current planetarium angle (see [`crate::plugin::Plugin`]). It is
/// not inertial — the planetarium angle changes over time — so it must never
/// be used as a [`crate::kepler_orbit::KeplerOrbit`] frame.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AliceSun;

impl Frame for AliceSun {
    const IS_INERTIAL: bool = false;
    const NAME: &'static str = "AliceSun";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ecliptic_is_inertial() {
        assert!(IcrfJ2000Ecliptic::IS_INERTIAL);
    }

    #[test]
    fn alice_sun_is_not_inertial() {
        assert!(!AliceSun::IS_INERTIAL);
    }

    // Frame-safety is enforced at compile time: this would not type-check if
    // uncommented, since `Displacement<IcrfJ2000Ecliptic>` and
    // `Displacement<AliceSun>` do not implement `Add` against each other.
    //
    // ```compile_fail
    // use astrogator_core::grassmann::Displacement;
    // use astrogator_core::frames::{AliceSun, IcrfJ2000Ecliptic};
    // use astrogator_core::r3_element::R3Element;
    //
    // let inertial: Displacement<IcrfJ2000Ecliptic> =
    //     Displacement::from_r3(R3Element::zero());
    // let display: Displacement<AliceSun> = Displacement::from_r3(R3Element::zero());
    // let _ = inertial + display;
    // ```
}
