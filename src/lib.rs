//! An N-body astrodynamics core.
//!
//! A typed geometry layer ([`r3_element`], [`sign`], [`grassmann`],
//! [`frames`], [`linear_map`], [`point`]) underlies a Keplerian
//! element-to-state-vector conic model ([`kepler_orbit`]), a canonical
//! eighteen-body solar-system fixture with bit-exact HORIZONS data
//! ([`solar_system`]), a minimal mutual-gravity integrator ([`nbody`]), and
//! a plugin façade ([`plugin`]) that exposes celestial and vessel state in a
//! rotating display frame to a spaceflight simulator host.
//!
//! # Frame safety
//!
//! Every geometric value carries its reference frame as a type parameter.
//! There is no `impl` that lets values tagged with two different frames
//! interact, so mixing a physics-frame displacement with a display-frame
//! one is a compile error, not a runtime assertion.
//!
//! # Module dependency order
//!
//! Leaves first: [`quantities`], [`r3_element`], [`sign`] have no
//! dependencies within this crate; [`grassmann`] builds on the first two;
//! [`frames`] and [`linear_map`] build on [`sign`] and [`r3_element`];
//! [`point`] and [`body`] build on [`quantities`] and [`grassmann`];
//! [`trajectory`] and [`kepler_orbit`] build on all of the above;
//! [`solar_system`] and [`nbody`] build on [`body`] and [`trajectory`]; and
//! [`plugin`] sits on top of everything.

pub mod body;
pub mod frames;
pub mod grassmann;
pub mod kepler_orbit;
pub mod linear_map;
pub mod nbody;
pub mod plugin;
pub mod point;
pub mod quantities;
pub mod r3_element;
pub mod sign;
pub mod solar_system;
pub mod trajectory;

pub use body::{Body, MassiveBody};
pub use frames::{AliceSun, Frame, IcrfJ2000Ecliptic};
pub use grassmann::{Bivector, Displacement, Trivector, Vector, VelocityVec};
pub use kepler_orbit::{KeplerOrbit, KeplerianElements, KeplerianElementsInput};
pub use linear_map::{Identity, LinearMap, OrthogonalMap, Permutation, Rotation};
pub use nbody::NBodySystem;
pub use plugin::Plugin;
pub use point::{Instant, Point, Position};
pub use r3_element::R3Element;
pub use sign::Sign;
pub use solar_system::SolarSystem;
pub use trajectory::{DegreesOfFreedom, RelativeDegreesOfFreedom, Trajectory};
