//! Linear maps between frames.
//!
//! The original C++ `LinearMap<FromFrame, ToFrame>` wanted a templated
//! virtual `operator()` that could apply itself to a `Vector`, `Bivector`, or
//! `Trivector` of any scalar type — C++ cannot declare a templated virtual
//! method, so `Geometry/LinearMap.hpp` ships the interface with the
//! multivector-application methods commented out and only `Determinant()`
//! left as the actual virtual method. We hit the same wall in Rust for a
//! different reason (a trait object's methods cannot be generic), and take
//! the same way out: `LinearMap` is small and concrete (`apply_r3`,
//! `determinant`), and grade-specific application lives as free functions in
//! [`crate::grassmann`].

use nalgebra::UnitQuaternion;

use crate::r3_element::R3Element;
use crate::sign::Sign;

/// A linear map from `From`'s coordinate space to `To`'s.
pub trait LinearMap<From, To> {
    fn apply_r3(&self, v: R3Element) -> R3Element;
    fn determinant(&self) -> Sign;
}

/// The identity map on a single frame.
#[derive(Clone, Copy, Debug)]
pub struct Identity<F> {
    _frame: std::marker::PhantomData<F>,
}

impl<F> Identity<F> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _frame: std::marker::PhantomData,
        }
    }
}

impl<F> Default for Identity<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> LinearMap<F, F> for Identity<F> {
    fn apply_r3(&self, v: R3Element) -> R3Element {
        v
    }

    fn determinant(&self) -> Sign {
        Sign::Positive
    }
}

/// One of the six ways to relabel the axes of R3, per
/// `Permutation<ICRFJ2000Ecliptic, AliceSun>::XZY` in the original plugin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinatePermutation {
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

impl CoordinatePermutation {
    const fn order(self) -> [usize; 3] {
        match self {
            CoordinatePermutation::Xyz => [0, 1, 2],
            CoordinatePermutation::Xzy => [0, 2, 1],
            CoordinatePermutation::Yxz => [1, 0, 2],
            CoordinatePermutation::Yzx => [1, 2, 0],
            CoordinatePermutation::Zxy => [2, 0, 1],
            CoordinatePermutation::Zyx => [2, 1, 0],
        }
    }

    /// Even permutations (cyclic relabelings) preserve orientation; the
    /// three transposition-like relabelings (XZY, YXZ, ZYX) reverse it.
    const fn is_even(self) -> bool {
        matches!(self, CoordinatePermutation::Xyz | CoordinatePermutation::Yzx | CoordinatePermutation::Zxy)
    }
}

/// A frame-to-frame map that relabels axes. Grounded in the plugin's use of
/// `Permutation<ICRFJ2000Ecliptic, AliceSun>::XZY` as the physics-to-display
/// handedness flip.
#[derive(Clone, Copy, Debug)]
pub struct Permutation<From, To> {
    permutation: CoordinatePermutation,
    _from: std::marker::PhantomData<From>,
    _to: std::marker::PhantomData<To>,
}

impl<From, To> Permutation<From, To> {
    #[must_use]
    pub fn new(permutation: CoordinatePermutation) -> Self {
        Self {
            permutation,
            _from: std::marker::PhantomData,
            _to: std::marker::PhantomData,
        }
    }
}

impl<From, To> LinearMap<From, To> for Permutation<From, To> {
    fn apply_r3(&self, v: R3Element) -> R3Element {
        v.reorder(self.permutation.order())
    }

    fn determinant(&self) -> Sign {
        if self.permutation.is_even() {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// A proper rotation from `From`'s coordinates to `To`'s, wrapping a unit
/// quaternion exactly as the teacher's `rotation_helper.rs` builds
/// frame-tagged rotations from a `UnitQuaternion`.
#[derive(Clone, Copy, Debug)]
pub struct Rotation<From, To> {
    quaternion: UnitQuaternion<f64>,
    _from: std::marker::PhantomData<From>,
    _to: std::marker::PhantomData<To>,
}

impl<From, To> Rotation<From, To> {
    #[must_use]
    pub fn new(quaternion: UnitQuaternion<f64>) -> Self {
        Self {
            quaternion,
            _from: std::marker::PhantomData,
            _to: std::marker::PhantomData,
        }
    }

    #[must_use]
    pub fn about_z_axis(angle_radians: f64) -> Self {
        Self::new(UnitQuaternion::from_axis_angle(&nalgebra::Vector3::z_axis(), angle_radians))
    }

    #[must_use]
    pub fn quaternion(self) -> UnitQuaternion<f64> {
        self.quaternion
    }

    #[must_use]
    pub fn inverse(self) -> Rotation<To, From> {
        Rotation::new(self.quaternion.inverse())
    }

    #[must_use]
    pub fn compose<Between>(self, other: Rotation<Between, From>) -> Rotation<Between, To> {
        Rotation::new(self.quaternion * other.quaternion)
    }
}

impl<From, To> LinearMap<From, To> for Rotation<From, To> {
    fn apply_r3(&self, v: R3Element) -> R3Element {
        let rotated = self.quaternion * nalgebra::Vector3::new(v.x, v.y, v.z);
        R3Element::new(rotated.x, rotated.y, rotated.z)
    }

    fn determinant(&self) -> Sign {
        Sign::Positive
    }
}

/// A rotation optionally composed with a reflection (negation of every
/// coordinate through the origin).
#[derive(Clone, Copy, Debug)]
pub struct OrthogonalMap<From, To> {
    rotation: Rotation<From, To>,
    reflects: bool,
}

impl<From, To> OrthogonalMap<From, To> {
    #[must_use]
    pub fn from_rotation(rotation: Rotation<From, To>) -> Self {
        Self { rotation, reflects: false }
    }

    #[must_use]
    pub fn reflected(rotation: Rotation<From, To>) -> Self {
        Self { rotation, reflects: true }
    }
}

impl<From, To> LinearMap<From, To> for OrthogonalMap<From, To> {
    fn apply_r3(&self, v: R3Element) -> R3Element {
        let rotated = self.rotation.apply_r3(v);
        if self.reflects {
            -rotated
        } else {
            rotated
        }
    }

    fn determinant(&self) -> Sign {
        if self.reflects {
            -self.rotation.determinant()
        } else {
            self.rotation.determinant()
        }
    }
}
