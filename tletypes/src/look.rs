use crate::time::Timestamp;
use derive_more::Display;

type Vector3 = na::Vector3<f64>;

/// Earth-centered inertial state at an instant (TEME, as produced by SGP4)
#[derive(Copy, Clone, PartialEq, Debug, Display)]
#[display(
    fmt = "{{t: {}, pos: {}, vel: {}}}",
    "timestamp",
    "position",
    "velocity"
)]
pub struct EciState {
    pub timestamp: Timestamp,
    /// Position [km]
    pub position: Vector3,
    /// Velocity [km/s]
    pub velocity: Vector3,
}

/// Topocentric look angle from a ground site
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Display)]
#[display(
    fmt = "{{az: {}, el: {}, range: {} km}}",
    "azimuth_deg",
    "elevation_deg",
    "range_km"
)]
pub struct Topo {
    /// Azimuth [deg], [0, 360) clockwise from north
    pub azimuth_deg: f64,
    /// Elevation [deg], [-90, 90]
    pub elevation_deg: f64,
    pub range_km: f64,
    /// Positive when the satellite moves away from the site
    pub range_rate_km_per_sec: f64,
}

impl Topo {
    /// At or above the local horizon
    pub fn is_visible(&self) -> bool {
        self.azimuth_deg >= 0.0 && self.elevation_deg >= 0.0
    }
}
