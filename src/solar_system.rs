//! The canonical eighteen-body solar-system fixture.
//!
//! Bit-for-bit grounded in `testing_utilities/solar_system_body.hpp`: the
//! gravitational parameters (or, for four of the Jovian/Neptunian/dwarf
//! bodies, the masses the original source gives instead) and the single
//! HORIZONS barycentric state-vector sample at the Sputnik launch epoch
//! (`JulianDate(2436116.3115)`) are reproduced to the last printed digit.

use crate::body::MassiveBody;
use crate::frames::IcrfJ2000Ecliptic;
use crate::grassmann::{Displacement, VelocityVec};
use crate::point::{Instant, Position};
use crate::quantities::{GravitationalParameter, Mass};
use crate::r3_element::R3Element;
use crate::trajectory::{DegreesOfFreedom, Trajectory};

/// Index of a body within a [`SolarSystem`], in the order the original
/// fixture enumerates them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyIndex {
    Sun,
    Jupiter,
    Saturn,
    Neptune,
    Uranus,
    Earth,
    Venus,
    Mars,
    Mercury,
    Ganymede,
    Titan,
    Callisto,
    Io,
    Moon,
    Europa,
    Triton,
    Eris,
    Pluto,
}

const BODY_COUNT: usize = 18;

const ALL_INDICES: [BodyIndex; BODY_COUNT] = [
    BodyIndex::Sun,
    BodyIndex::Jupiter,
    BodyIndex::Saturn,
    BodyIndex::Neptune,
    BodyIndex::Uranus,
    BodyIndex::Earth,
    BodyIndex::Venus,
    BodyIndex::Mars,
    BodyIndex::Mercury,
    BodyIndex::Ganymede,
    BodyIndex::Titan,
    BodyIndex::Callisto,
    BodyIndex::Io,
    BodyIndex::Moon,
    BodyIndex::Europa,
    BodyIndex::Triton,
    BodyIndex::Eris,
    BodyIndex::Pluto,
];

fn km3_per_s2(value: f64) -> GravitationalParameter {
    GravitationalParameter::from_km3_per_s2(value)
}

fn from_kilograms(value: f64) -> GravitationalParameter {
    use uom::si::mass::kilogram;
    GravitationalParameter::from_mass(Mass::new::<kilogram>(value))
}

fn gravitational_parameter(index: BodyIndex) -> GravitationalParameter {
    match index {
        BodyIndex::Sun => km3_per_s2(1.3271244004193938e11),
        BodyIndex::Jupiter => km3_per_s2(126_686_511.0),
        BodyIndex::Saturn => km3_per_s2(37_931_207.8),
        BodyIndex::Neptune => km3_per_s2(6_835_107.0),
        BodyIndex::Uranus => km3_per_s2(5_793_966.0),
        BodyIndex::Earth => km3_per_s2(398_600.440),
        BodyIndex::Venus => km3_per_s2(324_858.63),
        BodyIndex::Mars => km3_per_s2(42_828.3),
        BodyIndex::Mercury => km3_per_s2(22_032.09),
        BodyIndex::Ganymede => from_kilograms(1482e20),
        BodyIndex::Titan => km3_per_s2(8978.13),
        BodyIndex::Callisto => from_kilograms(1076e20),
        BodyIndex::Io => from_kilograms(893.3e20),
        BodyIndex::Moon => km3_per_s2(4902.798),
        BodyIndex::Europa => from_kilograms(479.7e20),
        BodyIndex::Triton => from_kilograms(214.7e20),
        BodyIndex::Eris => from_kilograms(1.67e22),
        BodyIndex::Pluto => from_kilograms(1.307e22),
    }
}

/// Barycentric displacement (km) and ecliptic velocity (km/s) at the
/// Sputnik launch epoch, from HORIZONS.
fn state_at_sputnik_launch_km(index: BodyIndex) -> ([f64; 3], [f64; 3]) {
    match index {
        BodyIndex::Sun => (
            [1.138350928138014e+06, 6.177753685036716e+05, -3.770941657504326e+04],
            [-5.067456621846211e-03, 1.259599196445122e-02, 9.778588606052481e-05],
        ),
        BodyIndex::Jupiter => (
            [-7.950209667306620e+08, -1.784285526424396e+08, 1.853825132237791e+07],
            [2.709330231918198e+00, -1.213073724288562e+01, -1.088748435062713e-02],
        ),
        BodyIndex::Saturn => (
            [-3.774715321901159e+08, -1.451892263379818e+09, 4.040621083792380e+07],
            [8.817029873536633e+00, -2.466058486223613e+00, -3.068419809533604e-01],
        ),
        BodyIndex::Neptune => (
            [-3.810689792831146e+09, -2.456423858579051e+09, 1.383694320077938e+08],
            [2.913267720085410e+00, -4.535247383721019e+00, 2.589759251085161e-02],
        ),
        BodyIndex::Uranus => (
            [-1.729995609344851e+09, 2.159967050539728e+09, 3.048735047038063e+07],
            [-5.366539669972795e+00, -4.575802196749351e+00, 5.261322980347850e-02],
        ),
        BodyIndex::Earth => (
            [1.475150112055673e+08, 3.144435102288270e+07, -3.391764309344300e+04],
            [-6.635753510543799e+00, 2.904321639216012e+01, 3.125252418990812e-03],
        ),
        BodyIndex::Venus => (
            [6.084974577091119e+07, -9.037413730207849e+07, -4.719158908401959e+06],
            [2.903958257174759e+01, 1.910383147602264e+01, -1.418780340302349e+00],
        ),
        BodyIndex::Mars => (
            [-2.440047184660406e+08, -2.002994580992744e+07, 5.577600092368793e+06],
            [2.940381268511949e+00, -2.206625841382794e+01, -5.348179460834037e-01],
        ),
        BodyIndex::Mercury => (
            [-3.013851560892715e+07, 3.823388939456400e+07, 5.907240907643730e+06],
            [-4.731017449071709e+01, -2.918747853895398e+01, 1.963450229872517e+00],
        ),
        BodyIndex::Ganymede => (
            [-7.942681422941415e+08, -1.776681035234876e+08, 1.857215495334835e+07],
            [-5.026319376504355e+00, -4.481735740234995e+00, 1.326192167761359e-01],
        ),
        BodyIndex::Titan => (
            [-3.771930512714775e+08, -1.452931696594699e+09, 4.091643033375849e+07],
            [1.433381483669744e+01, -1.422590492527597e+00, -1.375826555026097e+00],
        ),
        BodyIndex::Callisto => (
            [-7.951805452047400e+08, -1.802957437059298e+08, 1.847154088070625e+07],
            [1.091928199422218e+01, -1.278098875182818e+01, 5.878649120351949e-02],
        ),
        BodyIndex::Io => (
            [-7.946073188298367e+08, -1.783491436977172e+08, 1.854699192614355e+07],
            [-5.049684272040893e-01, 4.916473261567652e+00, 5.469177855959977e-01],
        ),
        BodyIndex::Moon => (
            [1.478545271460863e+08, 3.122566749814625e+07, 1.500491219719345e+03],
            [-6.099833968412930e+00, 2.985006033154299e+01, -1.952438319420470e-02],
        ),
        BodyIndex::Europa => (
            [-7.944180333947762e+08, -1.787346439588362e+08, 1.853675837527557e+07],
            [8.811255547505889e+00, 5.018147960240774e-02, 6.162195631257494e-01],
        ),
        BodyIndex::Triton => (
            [-3.810797098554279e+09, -2.456691608348630e+09, 1.381629136719314e+08],
            [-1.047462448797063e+00, -4.404556713303486e+00, 1.914469843538767e+00],
        ),
        BodyIndex::Eris => (
            [1.317390066862979e+10, 2.221403321600002e+09, -5.736076877456254e+09],
            [4.161883594267296e-01, 1.872714752602233e+00, 1.227093842948539e+00],
        ),
        BodyIndex::Pluto => (
            [-4.406985590968750e+09, 2.448731153209013e+09, 1.012525975599311e+09],
            [-1.319871918266467e+00, -5.172112237151897e+00, 9.407707128142039e-01],
        ),
    }
}

const SPUTNIK_LAUNCH_JULIAN_DATE: f64 = 2436116.3115;

/// Julian Date of the launch of Простейший Спутник-1, the epoch the
/// fixture's single HORIZONS sample is taken at.
#[must_use]
pub fn sputnik_launch_time() -> Instant {
    Instant::from_julian_date(SPUTNIK_LAUNCH_JULIAN_DATE)
}

/// The eighteen-body solar-system fixture.
///
/// `massive_bodies()` and `massless_bodies()` transfer ownership exactly
/// once, matching the original's `std::move(massive_bodies_)`: a second
/// call returns an empty `Vec` rather than panicking or re-cloning, since
/// the original's moved-from vector is likewise silently empty afterward.
/// `trajectories()` is unaffected by that move — see `DESIGN.md` for why.
pub struct SolarSystem {
    massive_bodies: Vec<MassiveBody>,
    massive_bodies_taken: bool,
    trajectories: Vec<(BodyIndex, Trajectory<IcrfJ2000Ecliptic>)>,
}

impl SolarSystem {
    /// Builds the eighteen canonical bodies with no attached trajectories.
    #[must_use]
    pub fn new() -> Self {
        let massive_bodies = ALL_INDICES.iter().map(|&index| MassiveBody::new(gravitational_parameter(index))).collect();
        Self {
            massive_bodies,
            massive_bodies_taken: false,
            trajectories: Vec::new(),
        }
    }

    /// Builds the fixture with each body's single HORIZONS sample at the
    /// Sputnik launch epoch appended to its trajectory.
    #[must_use]
    pub fn at_sputnik_launch() -> Self {
        let mut system = Self::new();
        let epoch = sputnik_launch_time();
        for &index in &ALL_INDICES {
            let (position_km, velocity_km_per_s) = state_at_sputnik_launch_km(index);
            let position_m = R3Element::new(position_km[0] * 1000.0, position_km[1] * 1000.0, position_km[2] * 1000.0);
            let velocity_m_per_s = R3Element::new(velocity_km_per_s[0] * 1000.0, velocity_km_per_s[1] * 1000.0, velocity_km_per_s[2] * 1000.0);

            let mut trajectory = Trajectory::new();
            trajectory.append(
                epoch,
                DegreesOfFreedom::new(
                    Position::from_origin(Displacement::from_r3(position_m)),
                    VelocityVec::from_r3(velocity_m_per_s),
                ),
            );
            system.trajectories.push((index, trajectory));
        }
        system
    }

    /// Transfers ownership of the massive bodies, in fixture order. Returns
    /// an empty `Vec` if called more than once.
    pub fn massive_bodies(&mut self) -> Vec<MassiveBody> {
        if self.massive_bodies_taken {
            return Vec::new();
        }
        self.massive_bodies_taken = true;
        std::mem::take(&mut self.massive_bodies)
    }

    /// This fixture has no massless bodies (no vessels); present for
    /// parity with the original's `massless_bodies()`.
    pub fn massless_bodies(&mut self) -> Vec<()> {
        Vec::new()
    }

    #[must_use]
    pub fn trajectories(&self) -> &[(BodyIndex, Trajectory<IcrfJ2000Ecliptic>)] {
        &self.trajectories
    }

    #[must_use]
    pub fn trajectory_of(&self, index: BodyIndex) -> Option<&Trajectory<IcrfJ2000Ecliptic>> {
        self.trajectories.iter().find(|(i, _)| *i == index).map(|(_, t)| t)
    }

    /// The parent body of `index`.
    ///
    /// # Panics
    ///
    /// Panics for [`BodyIndex::Sun`] (the Sun has no parent), matching the
    /// original `LOG(FATAL) << "The Sun has no parent"`.
    #[must_use]
    pub fn parent(index: BodyIndex) -> BodyIndex {
        match index {
            BodyIndex::Sun => panic!("The Sun has no parent"),
            BodyIndex::Jupiter
            | BodyIndex::Saturn
            | BodyIndex::Neptune
            | BodyIndex::Uranus
            | BodyIndex::Earth
            | BodyIndex::Venus
            | BodyIndex::Mars
            | BodyIndex::Mercury
            | BodyIndex::Eris
            | BodyIndex::Pluto => BodyIndex::Sun,
            BodyIndex::Ganymede | BodyIndex::Callisto | BodyIndex::Io | BodyIndex::Europa => BodyIndex::Jupiter,
            BodyIndex::Titan => BodyIndex::Saturn,
            BodyIndex::Moon => BodyIndex::Earth,
            BodyIndex::Triton => BodyIndex::Neptune,
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_eighteen_bodies() {
        let mut system = SolarSystem::new();
        assert_eq!(system.massive_bodies().len(), BODY_COUNT);
    }

    #[test]
    fn massive_bodies_transfers_ownership_once() {
        let mut system = SolarSystem::new();
        assert_eq!(system.massive_bodies().len(), BODY_COUNT);
        assert_eq!(system.massive_bodies().len(), 0);
    }

    #[test]
    fn earth_gravitational_parameter_matches_horizons() {
        let mut system = SolarSystem::new();
        let bodies = system.massive_bodies();
        let earth = bodies[BodyIndex::Earth as usize];
        assert!((earth.gravitational_parameter().value_si() - 398_600.440e9).abs() < 1.0);
    }

    #[test]
    fn ganymede_gravitational_parameter_is_derived_from_mass() {
        let mu = gravitational_parameter(BodyIndex::Ganymede);
        // G * 1.482e23 kg, to a loose tolerance since G itself is only
        // known to a handful of significant figures.
        assert!((mu.value_si() - 9890.0e9).abs() / 9890.0e9 < 1e-2);
    }

    #[test]
    fn at_sputnik_launch_attaches_one_sample_per_body() {
        let system = SolarSystem::at_sputnik_launch();
        assert_eq!(system.trajectories().len(), BODY_COUNT);
        for (_, trajectory) in system.trajectories() {
            assert_eq!(trajectory.len(), 1);
        }
    }

    #[test]
    fn earth_position_at_sputnik_launch_matches_horizons() {
        let system = SolarSystem::at_sputnik_launch();
        let trajectory = system.trajectory_of(BodyIndex::Earth).unwrap();
        let dof = trajectory.last_degrees_of_freedom();
        let r = dof.position.displacement_from_origin().coordinates();
        assert!((r.x - 1.475150112055673e+11).abs() < 1.0);
        assert!((r.y - 3.144435102288270e+10).abs() < 1.0);
        assert!((r.z - -3.391764309344300e+07).abs() < 1.0);
    }

    #[test]
    fn trajectories_survive_after_massive_bodies_is_taken() {
        let mut system = SolarSystem::at_sputnik_launch();
        let _ = system.massive_bodies();
        assert_eq!(system.trajectories().len(), BODY_COUNT);
    }

    #[test]
    #[should_panic(expected = "no parent")]
    fn sun_has_no_parent() {
        let _ = SolarSystem::parent(BodyIndex::Sun);
    }

    #[test]
    fn moons_parent_is_earth() {
        assert_eq!(SolarSystem::parent(BodyIndex::Moon), BodyIndex::Earth);
    }

    #[test]
    fn ganymede_parent_is_jupiter() {
        assert_eq!(SolarSystem::parent(BodyIndex::Ganymede), BodyIndex::Jupiter);
    }
}
