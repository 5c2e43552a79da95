use derive_more::Display;

/// A fixed observer on the earth
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Display)]
#[display(
    fmt = "{{lat: {}, lon: {}, height: {} km}}",
    "latitude_deg",
    "longitude_deg",
    "height_km"
)]
pub struct GroundSite {
    /// Geodetic latitude [deg]
    pub latitude_deg: f64,
    /// Geodetic longitude [deg], east positive
    pub longitude_deg: f64,
    /// Height above the WGS84 ellipsoid [km]
    pub height_km: f64,
}

impl GroundSite {
    pub fn new(latitude_deg: f64, longitude_deg: f64, height_km: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            height_km,
        }
    }

    pub fn height_m(&self) -> f64 {
        self.height_km * 1000.0
    }
}
