//! The plugin façade: celestial/vessel bookkeeping in the physics frame,
//! exposed to the host in the rotating display frame.
//!
//! Grounded in `ksp_plugin_test/plugin_test.cpp`'s `PluginTest` fixture and
//! its two tests: `Initialisation` (insert every solar-system body, then
//! check `CelestialDisplacementFromParent`/`CelestialParentRelativeVelocity`
//! round-trip back through the inverse looking glass) and `VesselInsertion`
//! (construct a circular-orbit state offset in `AliceSun` coordinates and
//! check it reads back unchanged).

use std::collections::HashMap;

use crate::body::MassiveBody;
use crate::frames::{AliceSun, IcrfJ2000Ecliptic};
use crate::grassmann::{Displacement, VelocityVec};
use crate::kepler_orbit::KeplerOrbit;
use crate::linear_map::{CoordinatePermutation, LinearMap, Permutation, Rotation};
use crate::nbody::NBodySystem;
use crate::point::{Instant, Position};
use crate::quantities::{Angle, GravitationalParameter};
use crate::r3_element::R3Element;
use crate::sign::Sign;
use crate::trajectory::{DegreesOfFreedom, RelativeDegreesOfFreedom, Trajectory};

/// A celestial body's index, as assigned by the host (matches the
/// original's bare `int`/`Index` typedef).
pub type CelestialIndex = u32;

/// A vessel's globally-unique identifier, as assigned by the host.
pub type Guid = String;

/// The physics-to-display map: the permutation the original calls
/// `Permutation<ICRFJ2000Ecliptic, AliceSun>::XZY`, composed with a
/// rotation about the ecliptic pole by the plugin's current planetarium
/// angle.
struct LookingGlass {
    rotation: Rotation<IcrfJ2000Ecliptic, IcrfJ2000Ecliptic>,
    permutation: Permutation<IcrfJ2000Ecliptic, AliceSun>,
}

impl LookingGlass {
    fn new(planetarium_rotation: Angle) -> Self {
        use uom::si::angle::radian;
        Self {
            rotation: Rotation::about_z_axis(planetarium_rotation.get::<radian>()),
            permutation: Permutation::new(CoordinatePermutation::Xzy),
        }
    }

    fn inverse_apply_r3(&self, v: R3Element) -> R3Element {
        // XZY is its own inverse as a relabeling.
        let unpermuted = v.reorder([0, 2, 1]);
        self.rotation.inverse().apply_r3(unpermuted)
    }
}

impl LinearMap<IcrfJ2000Ecliptic, AliceSun> for LookingGlass {
    fn apply_r3(&self, v: R3Element) -> R3Element {
        self.permutation.apply_r3(self.rotation.apply_r3(v))
    }

    fn determinant(&self) -> Sign {
        self.rotation.determinant() * self.permutation.determinant()
    }
}

struct CelestialEntry {
    parent: Option<CelestialIndex>,
    body: MassiveBody,
    trajectory: Trajectory<IcrfJ2000Ecliptic>,
}

struct VesselEntry {
    parent: CelestialIndex,
    trajectory: Trajectory<IcrfJ2000Ecliptic>,
    orbit: Option<KeplerOrbit<IcrfJ2000Ecliptic>>,
    kept_this_step: bool,
}

/// The plugin: the host's sole entry point into this crate's physics.
///
/// Lifecycle: construct with [`Plugin::new`], call [`Plugin::insert_celestial`]
/// for every non-Sun body, call [`Plugin::end_initialisation`] exactly once,
/// then drive the simulation with [`Plugin::advance_time`] and query it with
/// the `*_from_parent`/`*_relative_velocity` methods.
pub struct Plugin {
    sun_index: CelestialIndex,
    initialized: bool,
    current_time: Instant,
    planetarium_rotation: Angle,
    celestials: HashMap<CelestialIndex, CelestialEntry>,
    vessels: HashMap<Guid, VesselEntry>,
    nbody: NBodySystem<IcrfJ2000Ecliptic>,
}

impl Plugin {
    #[must_use]
    pub fn new(initial_time: Instant, sun_index: CelestialIndex, sun_gravitational_parameter: GravitationalParameter, planetarium_rotation: Angle) -> Self {
        let mut celestials = HashMap::new();
        let mut sun_trajectory = Trajectory::new();
        sun_trajectory.append(
            initial_time,
            DegreesOfFreedom::new(
                Position::from_origin(Displacement::from_r3(R3Element::zero())),
                VelocityVec::from_r3(R3Element::zero()),
            ),
        );
        celestials.insert(
            sun_index,
            CelestialEntry {
                parent: None,
                body: MassiveBody::new(sun_gravitational_parameter),
                trajectory: sun_trajectory,
            },
        );
        Self {
            sun_index,
            initialized: false,
            current_time: initial_time,
            planetarium_rotation,
            celestials,
            vessels: HashMap::new(),
            nbody: NBodySystem::new(),
        }
    }

    fn looking_glass(&self) -> LookingGlass {
        LookingGlass::new(self.planetarium_rotation)
    }

    /// Inserts a celestial body, given its state relative to its parent in
    /// `AliceSun` coordinates.
    ///
    /// # Panics
    ///
    /// Panics if called after [`Plugin::end_initialisation`], if `index` is
    /// already present, or if `parent_index` is unknown.
    pub fn insert_celestial(
        &mut self,
        index: CelestialIndex,
        gravitational_parameter: GravitationalParameter,
        parent_index: CelestialIndex,
        from_parent_position: Displacement<AliceSun>,
        from_parent_velocity: VelocityVec<AliceSun>,
    ) {
        assert!(!self.initialized, "Plugin::insert_celestial called after EndInitialisation");
        assert!(!self.celestials.contains_key(&index), "Plugin::insert_celestial: index {index} already present");
        let parent_dof = self
            .celestials
            .get(&parent_index)
            .unwrap_or_else(|| panic!("Plugin::insert_celestial: unknown parent index {parent_index}"))
            .trajectory
            .last_degrees_of_freedom();

        let looking_glass = self.looking_glass();
        let displacement_icrf = Displacement::from_r3(looking_glass.inverse_apply_r3(from_parent_position.coordinates()));
        let velocity_icrf = VelocityVec::from_r3(looking_glass.inverse_apply_r3(from_parent_velocity.coordinates()));

        let position = Position::from_origin(parent_dof.position.displacement_from_origin() + displacement_icrf);
        let velocity = parent_dof.velocity + velocity_icrf;

        let mut trajectory = Trajectory::new();
        trajectory.append(self.current_time, DegreesOfFreedom::new(position, velocity));

        self.celestials.insert(
            index,
            CelestialEntry {
                parent: Some(parent_index),
                body: MassiveBody::new(gravitational_parameter),
                trajectory,
            },
        );
    }

    /// Seals celestial insertion; no further [`Plugin::insert_celestial`]
    /// calls are permitted.
    ///
    /// # Panics
    ///
    /// Panics if already called.
    pub fn end_initialisation(&mut self) {
        assert!(!self.initialized, "Plugin::end_initialisation called twice");
        self.initialized = true;
    }

    fn celestial_relative_degrees_of_freedom(&self, index: CelestialIndex) -> RelativeDegreesOfFreedom<IcrfJ2000Ecliptic> {
        let entry = self.celestials.get(&index).unwrap_or_else(|| panic!("Plugin: unknown celestial index {index}"));
        let parent_index = entry.parent.unwrap_or_else(|| panic!("Plugin: celestial index {index} has no parent"));
        let parent_dof = self.celestials[&parent_index].trajectory.last_degrees_of_freedom();
        let child_dof = entry.trajectory.last_degrees_of_freedom();
        RelativeDegreesOfFreedom::new(
            child_dof.position.displacement_from_origin() - parent_dof.position.displacement_from_origin(),
            child_dof.velocity - parent_dof.velocity,
        )
    }

    #[must_use]
    pub fn celestial_displacement_from_parent(&self, index: CelestialIndex) -> Displacement<AliceSun> {
        let relative = self.celestial_relative_degrees_of_freedom(index);
        crate::grassmann::apply_vector(&self.looking_glass(), relative.displacement)
    }

    #[must_use]
    pub fn celestial_parent_relative_velocity(&self, index: CelestialIndex) -> VelocityVec<AliceSun> {
        let relative = self.celestial_relative_degrees_of_freedom(index);
        crate::grassmann::apply_vector(&self.looking_glass(), relative.velocity)
    }

    /// Registers a vessel as orbiting `parent_index`, or keeps an existing
    /// one alive for this simulation step.
    ///
    /// Returns `true` if this is a newly seen vessel, `false` if it already
    /// existed (in which case it is simply marked as kept).
    pub fn insert_or_keep_vessel(&mut self, guid: Guid, parent_index: CelestialIndex) -> bool {
        assert!(self.celestials.contains_key(&parent_index), "Plugin::insert_or_keep_vessel: unknown parent index {parent_index}");
        if let Some(entry) = self.vessels.get_mut(&guid) {
            entry.parent = parent_index;
            entry.kept_this_step = true;
            false
        } else {
            self.vessels.insert(
                guid,
                VesselEntry {
                    parent: parent_index,
                    trajectory: Trajectory::new(),
                    orbit: None,
                    kept_this_step: true,
                },
            );
            true
        }
    }

    /// Sets a vessel's state relative to its parent, in `AliceSun`
    /// coordinates; this also determines the vessel's Kepler orbit for
    /// subsequent [`Plugin::advance_time`] calls.
    ///
    /// # Panics
    ///
    /// Panics if `guid` was never passed to
    /// [`Plugin::insert_or_keep_vessel`].
    pub fn set_vessel_state_offset(&mut self, guid: &str, displacement: Displacement<AliceSun>, velocity: VelocityVec<AliceSun>) {
        let looking_glass = self.looking_glass();
        let displacement_icrf = Displacement::from_r3(looking_glass.inverse_apply_r3(displacement.coordinates()));
        let velocity_icrf = VelocityVec::from_r3(looking_glass.inverse_apply_r3(velocity.coordinates()));

        let entry = self.vessels.get_mut(guid).unwrap_or_else(|| panic!("Plugin::set_vessel_state_offset: unknown vessel {guid}"));
        let parent_dof = self.celestials[&entry.parent].trajectory.last_degrees_of_freedom();

        let position = Position::from_origin(parent_dof.position.displacement_from_origin() + displacement_icrf);
        let velocity_abs = parent_dof.velocity + velocity_icrf;

        entry.trajectory = Trajectory::new();
        entry.trajectory.append(self.current_time, DegreesOfFreedom::new(position, velocity_abs));

        let mu = self.celestials[&entry.parent].body.gravitational_parameter();
        entry.orbit = Some(KeplerOrbit::from_state_vectors(
            mu,
            self.current_time,
            RelativeDegreesOfFreedom::new(displacement_icrf, velocity_icrf),
        ));
    }

    fn vessel_relative_degrees_of_freedom(&self, guid: &str) -> RelativeDegreesOfFreedom<IcrfJ2000Ecliptic> {
        let entry = self.vessels.get(guid).unwrap_or_else(|| panic!("Plugin: unknown vessel {guid}"));
        let parent_dof = self.celestials[&entry.parent].trajectory.last_degrees_of_freedom();
        let vessel_dof = entry.trajectory.last_degrees_of_freedom();
        RelativeDegreesOfFreedom::new(
            vessel_dof.position.displacement_from_origin() - parent_dof.position.displacement_from_origin(),
            vessel_dof.velocity - parent_dof.velocity,
        )
    }

    #[must_use]
    pub fn vessel_displacement_from_parent(&self, guid: &str) -> Displacement<AliceSun> {
        let relative = self.vessel_relative_degrees_of_freedom(guid);
        crate::grassmann::apply_vector(&self.looking_glass(), relative.displacement)
    }

    #[must_use]
    pub fn vessel_parent_relative_velocity(&self, guid: &str) -> VelocityVec<AliceSun> {
        let relative = self.vessel_relative_degrees_of_freedom(guid);
        crate::grassmann::apply_vector(&self.looking_glass(), relative.velocity)
    }

    /// Advances celestial bodies under their mutual gravity (via
    /// [`NBodySystem`]) and vessels along their Kepler orbits, to
    /// `target_time`. Vessels not kept alive by
    /// [`Plugin::insert_or_keep_vessel`] since the previous call are
    /// dropped first.
    ///
    /// # Panics
    ///
    /// Panics if `target_time` is not after the plugin's current time.
    pub fn advance_time(&mut self, target_time: Instant, planetarium_rotation: Angle) {
        assert!(target_time.julian_date() > self.current_time.julian_date(), "Plugin::advance_time: target_time must be in the future");

        self.vessels.retain(|_, entry| entry.kept_this_step);
        for entry in self.vessels.values_mut() {
            entry.kept_this_step = false;
        }

        let mut indices: Vec<CelestialIndex> = self.celestials.keys().copied().collect();
        indices.sort_unstable();
        let bodies: Vec<MassiveBody> = indices.iter().map(|i| self.celestials[i].body).collect();
        let mut trajectories: Vec<Trajectory<IcrfJ2000Ecliptic>> = indices.iter().map(|i| self.celestials[i].trajectory.clone()).collect();
        self.nbody.advance(&bodies, &mut trajectories, target_time, 16);
        for (i, trajectory) in indices.into_iter().zip(trajectories.into_iter()) {
            self.celestials.get_mut(&i).unwrap().trajectory = trajectory;
        }

        for entry in self.vessels.values_mut() {
            if let Some(orbit) = &entry.orbit {
                let relative = orbit.state_vectors(target_time);
                let parent_dof = self.celestials[&entry.parent].trajectory.last_degrees_of_freedom();
                let position = Position::from_origin(parent_dof.position.displacement_from_origin() + relative.displacement);
                let velocity = parent_dof.velocity + relative.velocity;
                entry.trajectory.append(target_time, DegreesOfFreedom::new(position, velocity));
            }
        }

        self.current_time = target_time;
        self.planetarium_rotation = planetarium_rotation;
    }

    #[must_use]
    pub fn current_time(&self) -> Instant {
        self.current_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r3_element::R3Element;

    const SUN_INDEX: CelestialIndex = 0;
    const EARTH_INDEX: CelestialIndex = 1;
    const MU_SUN: f64 = 1.327_124_400_419_393_8e20;
    const MU_EARTH: f64 = 398_600.4418e9;

    fn fresh_plugin() -> Plugin {
        use uom::si::angle::radian;
        Plugin::new(
            Instant::from_julian_date(2436116.3115),
            SUN_INDEX,
            GravitationalParameter::from_si(MU_SUN),
            Angle::new::<radian>(1.0),
        )
    }

    #[test]
    fn insert_and_seal_round_trips_celestial_state() {
        let mut plugin = fresh_plugin();
        let from_parent_position = Displacement::<AliceSun>::from_r3(R3Element::new(1.5e11, 0.0, 0.0));
        let from_parent_velocity = VelocityVec::<AliceSun>::from_r3(R3Element::new(0.0, 29_800.0, 0.0));
        plugin.insert_celestial(EARTH_INDEX, GravitationalParameter::from_si(MU_EARTH), SUN_INDEX, from_parent_position, from_parent_velocity);
        plugin.end_initialisation();

        let displacement = plugin.celestial_displacement_from_parent(EARTH_INDEX);
        let velocity = plugin.celestial_parent_relative_velocity(EARTH_INDEX);

        assert!((displacement.coordinates().x - from_parent_position.coordinates().x).abs() < 1.0);
        assert!((velocity.coordinates().y - from_parent_velocity.coordinates().y).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "after EndInitialisation")]
    fn insert_celestial_after_seal_panics() {
        let mut plugin = fresh_plugin();
        plugin.end_initialisation();
        plugin.insert_celestial(
            EARTH_INDEX,
            GravitationalParameter::from_si(MU_EARTH),
            SUN_INDEX,
            Displacement::from_r3(R3Element::zero()),
            VelocityVec::from_r3(R3Element::zero()),
        );
    }

    #[test]
    fn circular_vessel_orbit_reads_back_unchanged() {
        let mut plugin = fresh_plugin();
        plugin.insert_celestial(
            EARTH_INDEX,
            GravitationalParameter::from_si(MU_EARTH),
            SUN_INDEX,
            Displacement::from_r3(R3Element::new(1.5e11, 0.0, 0.0)),
            VelocityVec::from_r3(R3Element::new(0.0, 29_800.0, 0.0)),
        );
        plugin.end_initialisation();

        let guid = "Test Satellite".to_string();
        let inserted = plugin.insert_or_keep_vessel(guid.clone(), EARTH_INDEX);
        assert!(inserted);

        let displacement = Displacement::<AliceSun>::from_r3(R3Element::new(3_111_000.0, 4_400_000.0, 3_810_000.0));
        let tangent = displacement.wedge(Displacement::<AliceSun>::from_r3(R3Element::new(1.0, 2.0, 3.0)));
        let tangent_r3 = tangent.coordinates();
        let unit_tangent_r3 = tangent_r3 / tangent_r3.norm();

        let unit_displacement_r3 = displacement.coordinates() / displacement.coordinates().norm();
        assert!(unit_tangent_r3.dot(unit_displacement_r3).abs() < 1e-9);

        let speed = (MU_EARTH / displacement.coordinates().norm()).sqrt();
        let velocity = VelocityVec::<AliceSun>::from_r3(unit_tangent_r3 * speed);

        plugin.set_vessel_state_offset(&guid, displacement, velocity);

        let read_back_displacement = plugin.vessel_displacement_from_parent(&guid);
        let read_back_velocity = plugin.vessel_parent_relative_velocity(&guid);

        assert!((read_back_displacement.coordinates().x - displacement.coordinates().x).abs() < 1e-3);
        assert!((read_back_velocity.coordinates().norm() - velocity.coordinates().norm()).abs() < 1e-6);
    }

    #[test]
    fn insert_or_keep_vessel_returns_false_for_an_existing_vessel() {
        let mut plugin = fresh_plugin();
        plugin.insert_celestial(
            EARTH_INDEX,
            GravitationalParameter::from_si(MU_EARTH),
            SUN_INDEX,
            Displacement::from_r3(R3Element::new(1.5e11, 0.0, 0.0)),
            VelocityVec::from_r3(R3Element::new(0.0, 29_800.0, 0.0)),
        );
        plugin.end_initialisation();
        let guid = "Recurring Vessel".to_string();
        assert!(plugin.insert_or_keep_vessel(guid.clone(), EARTH_INDEX));
        assert!(!plugin.insert_or_keep_vessel(guid, EARTH_INDEX));
    }
}
