//! Look angle corrections applied after the engine and before the visibility filter

use na::{Rotation3, Unit, Vector3};
use tletypes::prelude::*;

pub const SEA_LEVEL_PRESSURE_MBAR: f64 = 1013.25;
pub const STANDARD_TEMPERATURE_C: f64 = 15.0;

/// International standard atmosphere pressure at `height_m` above sea level
pub fn barometric_pressure_mbar(height_m: f64) -> f64 {
    const T0: f64 = 288.15;
    const LAPSE_RATE: f64 = 0.0065;
    const G: f64 = 9.80665;
    const MOLAR_MASS: f64 = 0.0289644;
    const GAS_CONSTANT: f64 = 8.3144598;

    SEA_LEVEL_PRESSURE_MBAR
        * (1.0 - (LAPSE_RATE * height_m) / T0).powf((G * MOLAR_MASS) / (GAS_CONSTANT * LAPSE_RATE))
}

/// Bennett atmospheric refraction
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Refraction {
    pub temperature_c: f64,
    pub pressure_mbar: f64,
}

impl Refraction {
    pub fn for_site(site: &GroundSite) -> Self {
        Self {
            temperature_c: STANDARD_TEMPERATURE_C,
            pressure_mbar: barometric_pressure_mbar(site.height_m()),
        }
    }

    /// Apparent elevation for a geometric elevation, unchanged at or below -1 degree
    pub fn apply(&self, elevation_deg: f64) -> f64 {
        if elevation_deg <= -1.0 {
            return elevation_deg;
        }
        let arcmin = (self.pressure_mbar / 1010.0)
            * (283.0 / (273.0 + self.temperature_c))
            * (1.02
                / (elevation_deg.to_radians() + (10.3 / (elevation_deg + 5.11)).to_radians())
                    .tan());
        elevation_deg + arcmin / 60.0
    }
}

/// Antenna mount tilt.
/// The look direction is rotated by `tilt_deg` about the horizontal axis
/// pointing at `azimuth_deg`.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Tilt {
    pub tilt_deg: f64,
    pub azimuth_deg: f64,
}

impl Tilt {
    pub fn new(tilt_deg: f64, azimuth_deg: f64) -> Self {
        Self {
            tilt_deg,
            azimuth_deg,
        }
    }

    pub fn is_level(&self) -> bool {
        self.tilt_deg == 0.0
    }

    /// Returns the tilted (azimuth, elevation) in degrees
    pub fn apply(&self, azimuth_deg: f64, elevation_deg: f64) -> (f64, f64) {
        if self.is_level() {
            return (azimuth_deg, elevation_deg);
        }

        let (sin_az, cos_az) = azimuth_deg.to_radians().sin_cos();
        let (sin_el, cos_el) = elevation_deg.to_radians().sin_cos();
        // East, north, up
        let look = Vector3::new(cos_el * sin_az, cos_el * cos_az, sin_el);

        let (sin_axis, cos_axis) = self.azimuth_deg.to_radians().sin_cos();
        let axis = Unit::new_normalize(Vector3::new(sin_axis, cos_axis, 0.0));
        let tilted = Rotation3::from_axis_angle(&axis, self.tilt_deg.to_radians()) * look;

        let elevation_deg = tilted.z.clamp(-1.0, 1.0).asin().to_degrees();
        let mut azimuth_deg = tilted.x.atan2(tilted.y).to_degrees().rem_euclid(360.0);
        if azimuth_deg >= 360.0 {
            azimuth_deg -= 360.0;
        }
        (azimuth_deg, elevation_deg)
    }
}

/// Refraction first, then tilt
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Corrections {
    refraction: Option<Refraction>,
    tilt: Tilt,
}

impl Corrections {
    pub fn new(refraction: Option<Refraction>, tilt: Tilt) -> Self {
        Self { refraction, tilt }
    }

    pub fn is_identity(&self) -> bool {
        self.refraction.is_none() && self.tilt.is_level()
    }

    pub fn apply(&self, topo: Topo) -> Topo {
        let elevation_deg = self
            .refraction
            .map(|r| r.apply(topo.elevation_deg))
            .unwrap_or(topo.elevation_deg);
        let (azimuth_deg, elevation_deg) = self.tilt.apply(topo.azimuth_deg, elevation_deg);
        Topo {
            azimuth_deg,
            elevation_deg,
            ..topo
        }
    }
}
