//! Gravitating bodies.
//!
//! The original distinguishes `Body` from `MassiveBody` by inheritance
//! (`MassiveBody : public Body`, with `Body` additionally allowing a zero
//! gravitational parameter for massless test particles). Rust has no
//! implementation inheritance, and the distinction here is really a
//! validity invariant (can this body be a Kepler primary or not), so
//! `MassiveBody` is a tagged newtype around `Body` rather than a supertype.

use crate::quantities::GravitationalParameter;

/// A body with a gravitational parameter, possibly zero (a massless
/// particle, such as a vessel).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    gravitational_parameter: f64,
}

impl Body {
    #[must_use]
    pub fn massive(gravitational_parameter: GravitationalParameter) -> Self {
        Self {
            gravitational_parameter: gravitational_parameter.value_si(),
        }
    }

    #[must_use]
    pub fn massless() -> Self {
        Self { gravitational_parameter: 0.0 }
    }

    #[must_use]
    pub fn is_massive(self) -> bool {
        self.gravitational_parameter > 0.0
    }

    #[must_use]
    pub fn gravitational_parameter(self) -> GravitationalParameter {
        GravitationalParameter::from_si(self.gravitational_parameter.max(f64::MIN_POSITIVE))
    }
}

/// A [`Body`] known, by construction, to have a strictly positive
/// gravitational parameter — the only kind of body that can serve as a
/// [`crate::kepler_orbit::KeplerOrbit`] primary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassiveBody {
    gravitational_parameter: GravitationalParameter,
}

impl MassiveBody {
    #[must_use]
    pub fn new(gravitational_parameter: GravitationalParameter) -> Self {
        Self { gravitational_parameter }
    }

    #[must_use]
    pub fn gravitational_parameter(self) -> GravitationalParameter {
        self.gravitational_parameter
    }

    #[must_use]
    pub fn as_body(self) -> Body {
        Body::massive(self.gravitational_parameter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn massless_body_is_not_massive() {
        assert!(!Body::massless().is_massive());
    }

    #[test]
    fn massive_body_is_massive() {
        let mu = GravitationalParameter::from_si(398_600.4418e9);
        assert!(Body::massive(mu).is_massive());
    }

    #[test]
    fn massive_body_converts_to_an_equivalent_body() {
        let mu = GravitationalParameter::from_si(398_600.4418e9);
        let massive = MassiveBody::new(mu);
        assert_eq!(massive.as_body(), Body::massive(mu));
    }
}
