//! Frame-tagged, dimension-tagged multivectors over R3.
//!
//! A [`Vector`] is a grade-1 (polar) multivector, a [`Bivector`] is grade-2
//! (axial — the image of a cross product), and a [`Trivector`] is grade-3
//! (the pseudoscalar, the image of a scalar triple product). All three wrap
//! an [`R3Element`] with a frame tag `F` and a dimension tag `D`; two values
//! of different `D` or different `F` simply have no shared `impl`, so mixing
//! them is a compile error rather than a runtime one.
//!
//! `D` is a zero-sized marker, not a real quantity — see [`crate::quantities`]
//! for why a literal compile-time dimension vector is not attempted on
//! stable Rust. Only the dimension pairs this crate's operations actually
//! need have `impl`s; there is no generic `Mul<Vector<D2, F>> for Vector<D1, F>`.

use std::marker::PhantomData;
use std::ops::{Add, Neg, Sub};

use crate::frames::Frame;
use crate::quantities::{Length, SpecificAngularMomentum, Velocity};
use crate::r3_element::R3Element;

/// Marker for a length-dimensioned multivector component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthDim;
/// Marker for a speed-dimensioned multivector component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeedDim;
/// Marker for a specific-angular-momentum-dimensioned multivector component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpecificAngularMomentumDim;
/// Marker for a dimensionless multivector component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimensionlessDim;

/// A grade-1 multivector: `R3Element` tagged with a dimension `D` and a
/// frame `F`.
#[derive(Clone, Copy, Debug)]
pub struct Vector<D, F> {
    coordinates: R3Element,
    _dimension: PhantomData<D>,
    _frame: PhantomData<F>,
}

/// A grade-2 (axial) multivector, the image of [`Vector::wedge`].
#[derive(Clone, Copy, Debug)]
pub struct Bivector<D, F> {
    coordinates: R3Element,
    _dimension: PhantomData<D>,
    _frame: PhantomData<F>,
}

/// A grade-3 (pseudoscalar) multivector, the image of a scalar triple
/// product.
#[derive(Clone, Copy, Debug)]
pub struct Trivector<D, F> {
    coordinate: f64,
    _dimension: PhantomData<D>,
    _frame: PhantomData<F>,
}

/// A point-displacement, the most common [`Vector`] instantiation.
pub type Displacement<F> = Vector<LengthDim, F>;
/// A velocity, addable only to another velocity in the same frame.
pub type VelocityVec<F> = Vector<SpeedDim, F>;

macro_rules! multivector_common {
    ($ty:ident, $field:ident) => {
        impl<D, F> $ty<D, F> {
            #[must_use]
            pub fn from_r3(coordinates: R3Element) -> Self {
                Self {
                    $field: coordinates,
                    _dimension: PhantomData,
                    _frame: PhantomData,
                }
            }

            #[must_use]
            pub fn coordinates(self) -> R3Element {
                self.$field
            }

            #[must_use]
            pub fn zero() -> Self {
                Self::from_r3(R3Element::zero())
            }
        }

        impl<D, F> PartialEq for $ty<D, F> {
            fn eq(&self, other: &Self) -> bool {
                self.$field == other.$field
            }
        }

        impl<D, F> Add for $ty<D, F> {
            type Output = $ty<D, F>;

            fn add(self, rhs: $ty<D, F>) -> $ty<D, F> {
                $ty::from_r3(self.$field + rhs.$field)
            }
        }

        impl<D, F> Sub for $ty<D, F> {
            type Output = $ty<D, F>;

            fn sub(self, rhs: $ty<D, F>) -> $ty<D, F> {
                $ty::from_r3(self.$field - rhs.$field)
            }
        }

        impl<D, F> Neg for $ty<D, F> {
            type Output = $ty<D, F>;

            fn neg(self) -> $ty<D, F> {
                $ty::from_r3(-self.$field)
            }
        }
    };
}

multivector_common!(Vector, coordinates);
multivector_common!(Bivector, coordinates);

impl<D, F> Trivector<D, F> {
    #[must_use]
    pub fn from_scalar(coordinate: f64) -> Self {
        Self {
            coordinate,
            _dimension: PhantomData,
            _frame: PhantomData,
        }
    }

    #[must_use]
    pub fn coordinate(self) -> f64 {
        self.coordinate
    }
}

impl<D, F> PartialEq for Trivector<D, F> {
    fn eq(&self, other: &Self) -> bool {
        self.coordinate == other.coordinate
    }
}

impl<D, F> Add for Trivector<D, F> {
    type Output = Trivector<D, F>;

    fn add(self, rhs: Trivector<D, F>) -> Trivector<D, F> {
        Trivector::from_scalar(self.coordinate + rhs.coordinate)
    }
}

impl<F: Frame> Vector<LengthDim, F> {
    #[must_use]
    pub fn from_length_components(x: Length, y: Length, z: Length) -> Self {
        use uom::si::length::meter;
        Self::from_r3(R3Element::new(x.get::<meter>(), y.get::<meter>(), z.get::<meter>()))
    }

    #[must_use]
    pub fn norm(self) -> Length {
        use uom::si::length::meter;
        Length::new::<meter>(self.coordinates.norm())
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::from_r3(self.coordinates * factor)
    }

    #[must_use]
    pub fn unit_vector(self) -> Self {
        self.scale(1.0 / self.coordinates.norm())
    }

    /// Inner product of two displacements, in m^2 — deliberately left as a
    /// plain `f64` rather than a named `uom` quantity, since nothing else in
    /// this crate consumes an area quantity.
    #[must_use]
    pub fn inner_product(self, other: Self) -> f64 {
        self.coordinates.dot(other.coordinates)
    }

    #[must_use]
    pub fn wedge(self, other: Self) -> Bivector<DimensionlessDim, F> {
        Bivector::from_r3(self.coordinates.cross(other.coordinates))
    }
}

impl<F: Frame> Vector<SpeedDim, F> {
    #[must_use]
    pub fn from_speed_components(x: Velocity, y: Velocity, z: Velocity) -> Self {
        use uom::si::velocity::meter_per_second;
        Self::from_r3(R3Element::new(
            x.get::<meter_per_second>(),
            y.get::<meter_per_second>(),
            z.get::<meter_per_second>(),
        ))
    }

    #[must_use]
    pub fn norm(self) -> Velocity {
        use uom::si::velocity::meter_per_second;
        Velocity::new::<meter_per_second>(self.coordinates.norm())
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::from_r3(self.coordinates * factor)
    }
}

impl<F: Frame> Vector<DimensionlessDim, F> {
    /// The specific angular momentum `r x v`, a dimensioned bivector built
    /// from a displacement wedged with a velocity.
    #[must_use]
    pub fn specific_angular_momentum(
        displacement: Displacement<F>,
        velocity: VelocityVec<F>,
    ) -> Bivector<SpecificAngularMomentumDim, F> {
        Bivector::from_r3(displacement.coordinates.cross(velocity.coordinates))
    }
}

impl<F: Frame> Bivector<SpecificAngularMomentumDim, F> {
    #[must_use]
    pub fn norm(self) -> SpecificAngularMomentum {
        use uom::si::diffusion_coefficient::square_meter_per_second;
        SpecificAngularMomentum::new::<square_meter_per_second>(self.coordinates.norm())
    }
}

/// Applies a linear map to a [`Vector`], reinterpreting the result in the
/// map's target frame. Kept as a free function (not a method on
/// [`crate::linear_map::LinearMap`]) per the redesign note that a linear
/// map's trait object must not be generic over the multivector grade it
/// transforms.
pub fn apply_vector<D, From, To>(map: &dyn crate::linear_map::LinearMap<From, To>, v: Vector<D, From>) -> Vector<D, To> {
    Vector::from_r3(map.apply_r3(v.coordinates))
}

/// Applies a linear map to a [`Bivector`]. Bivectors are axial: an
/// orientation-reversing map must additionally flip the sign of the image,
/// which [`crate::linear_map::LinearMap::determinant`] exists to report.
pub fn apply_bivector<D, From, To>(map: &dyn crate::linear_map::LinearMap<From, To>, b: Bivector<D, From>) -> Bivector<D, To> {
    let transformed = map.apply_r3(b.coordinates);
    let sign = map.determinant().to_f64();
    Bivector::from_r3(transformed * sign)
}

/// Applies a linear map to a [`Trivector`]. The pseudoscalar scales by the
/// map's determinant, not by its action on a basis vector.
pub fn apply_trivector<D, From, To>(map: &dyn crate::linear_map::LinearMap<From, To>, t: Trivector<D, From>) -> Trivector<D, To> {
    Trivector::from_scalar(t.coordinate * map.determinant().to_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::IcrfJ2000Ecliptic;

    type TestVector = Vector<LengthDim, IcrfJ2000Ecliptic>;

    #[test]
    fn addition_is_componentwise() {
        let a = TestVector::from_r3(R3Element::new(1.0, 2.0, 3.0));
        let b = TestVector::from_r3(R3Element::new(4.0, 5.0, 6.0));
        assert_eq!((a + b).coordinates(), R3Element::new(5.0, 7.0, 9.0));
    }

    #[test]
    fn wedge_of_orthonormal_basis_vectors_is_unit() {
        let x = TestVector::from_r3(R3Element::new(1.0, 0.0, 0.0));
        let y = TestVector::from_r3(R3Element::new(0.0, 1.0, 0.0));
        let z = x.wedge(y);
        assert_eq!(z.coordinates(), R3Element::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn unit_vector_has_unit_norm() {
        use uom::si::length::meter;
        let v = TestVector::from_r3(R3Element::new(3.0, 4.0, 0.0));
        let u = v.unit_vector();
        assert!((u.norm().get::<meter>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn specific_angular_momentum_is_perpendicular_to_both_inputs() {
        let r = Displacement::<IcrfJ2000Ecliptic>::from_r3(R3Element::new(7000.0, 0.0, 0.0));
        let v = VelocityVec::<IcrfJ2000Ecliptic>::from_r3(R3Element::new(0.0, 7.5, 0.0));
        let h = Vector::<DimensionlessDim, IcrfJ2000Ecliptic>::specific_angular_momentum(r, v);
        assert_eq!(h.coordinates(), R3Element::new(0.0, 0.0, 52500.0));
    }
}
