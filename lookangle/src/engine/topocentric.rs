//! TEME to topocentric azimuth/elevation/range

use chrono::NaiveDate;
use na::{Matrix3, Rotation3, Vector3};
use nav_types::{ECEF, WGS84};
use std::f64::consts::TAU;
use tletypes::prelude::*;

/// Earth rotation rate [rad/s]
pub const EARTH_ROTATION_RATE: f64 = 7.292_115_146_706_979e-5;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Greenwich mean sidereal time [rad], IAU 1982 model
pub fn gmst(t: &Timestamp) -> f64 {
    let micros_since_j2000 = NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .and_then(|j2000| (*t - j2000).num_microseconds())
        .unwrap_or_default();
    let days = micros_since_j2000 as f64 / 1e6 / SECONDS_PER_DAY;
    let c = days / DAYS_PER_JULIAN_CENTURY;

    let seconds = 67_310.548_41 + (876_600.0 * 3600.0 + 8_640_184.812_866) * c + 0.093_104 * c * c
        - 6.2e-6 * c * c * c;
    (seconds.rem_euclid(SECONDS_PER_DAY) / SECONDS_PER_DAY) * TAU
}

/// Site position, earth fixed [km]
pub fn site_ecef(site: &GroundSite) -> Vector3<f64> {
    let pos = ECEF::from(WGS84::from_degrees_and_meters(
        site.latitude_deg,
        site.longitude_deg,
        site.height_m(),
    ));
    Vector3::new(pos.x(), pos.y(), pos.z()) / 1000.0
}

/// Rows are the east, north and up unit vectors of the site, earth fixed
fn enu_rotation(site: &GroundSite) -> Matrix3<f64> {
    let (sin_lat, cos_lat) = site.latitude_deg.to_radians().sin_cos();
    let (sin_lon, cos_lon) = site.longitude_deg.to_radians().sin_cos();
    Matrix3::new(
        -sin_lon,
        cos_lon,
        0.0,
        -sin_lat * cos_lon,
        -sin_lat * sin_lon,
        cos_lat,
        cos_lat * cos_lon,
        cos_lat * sin_lon,
        sin_lat,
    )
}

pub fn look_angle(site: &GroundSite, eci: &EciState) -> Topo {
    let theta = gmst(&eci.timestamp);
    let to_ecef = Rotation3::from_axis_angle(&Vector3::z_axis(), -theta);
    let omega = Vector3::new(0.0, 0.0, EARTH_ROTATION_RATE);

    let pos = to_ecef * eci.position;
    let vel = to_ecef * eci.velocity - omega.cross(&pos);

    let rho = pos - site_ecef(site);
    let range_km = rho.norm();
    let enu = enu_rotation(site) * rho;

    let mut azimuth_deg = enu.x.atan2(enu.y).to_degrees().rem_euclid(360.0);
    if azimuth_deg >= 360.0 {
        azimuth_deg -= 360.0;
    }
    let elevation_deg = (enu.z / range_km).clamp(-1.0, 1.0).asin().to_degrees();

    Topo {
        azimuth_deg,
        elevation_deg,
        range_km,
        range_rate_km_per_sec: rho.dot(&vel) / range_km,
    }
}
