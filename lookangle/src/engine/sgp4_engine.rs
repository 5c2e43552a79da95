use super::{topocentric, EngineError, PropagationEngine};
use chrono::Duration;
use na::Vector3;
use tletypes::prelude::*;
use tracing::debug;

/// SGP4/SDP4 propagation of a single TLE set.
/// Deep-space (SDP4) terms are selected automatically from the mean motion.
pub struct Sgp4Engine {
    elements: sgp4::Elements,
    constants: sgp4::Constants,
}

impl Sgp4Engine {
    pub fn new(tle: &TwoLineElementSet) -> Result<Self, EngineError> {
        let elements = sgp4::Elements::from_tle(
            Some(tle.satellite_name.clone()),
            tle.line1.as_bytes(),
            tle.line2.as_bytes(),
        )
        .map_err(|e| EngineError::Elements(e.to_string()))?;
        let constants = sgp4::Constants::from_elements(&elements)
            .map_err(|e| EngineError::Elements(e.to_string()))?;

        debug!(
            satellite = %tle,
            norad_id = elements.norad_id,
            epoch = %elements.datetime,
            mean_motion = elements.mean_motion,
            "Loaded SGP4 elements"
        );

        Ok(Self {
            elements,
            constants,
        })
    }

    /// Epoch as parsed by the propagator, to the microsecond
    pub fn epoch(&self) -> Timestamp {
        self.elements.datetime
    }
}

impl PropagationEngine for Sgp4Engine {
    fn position_eci(&self, minutes: MinutesSinceEpoch) -> Result<EciState, EngineError> {
        let prediction = self
            .constants
            .propagate(sgp4::MinutesSinceEpoch(minutes.as_minutes()))
            .map_err(|e| EngineError::Propagation {
                minutes: minutes.as_minutes(),
                reason: e.to_string(),
            })?;

        let micros = (minutes.as_minutes() * 60e6).round() as i64;
        Ok(EciState {
            timestamp: self.elements.datetime + Duration::microseconds(micros),
            position: Vector3::from(prediction.position),
            velocity: Vector3::from(prediction.velocity),
        })
    }

    fn look_angle(&self, site: &GroundSite, eci: &EciState) -> Topo {
        topocentric::look_angle(site, eci)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn d091() -> TwoLineElementSet {
        TwoLineElementSet::new(
            "D091",
            "1 44078U 19072A   25237.00127315  .00000014  00000-0  40313-4 0  1239",
            "2 44078  98.2808 291.9629 0018719  34.1424  38.1671 14.43768520337337",
        )
    }

    #[test]
    fn epoch_matches_tle() {
        let engine = Sgp4Engine::new(&d091()).unwrap();
        let expected =
            NaiveDateTime::parse_from_str("2025-08-25 00:01:50", "%Y-%m-%d %H:%M:%S").unwrap();
        assert!((engine.epoch() - expected).num_milliseconds().abs() <= 1);
    }

    #[test]
    fn low_earth_orbit_state() {
        let engine = Sgp4Engine::new(&d091()).unwrap();
        for minutes in [0.0, 45.5, 90.0, 1440.0] {
            let eci = engine.position_eci(MinutesSinceEpoch(minutes)).unwrap();
            let r = eci.position.norm();
            let v = eci.velocity.norm();
            assert!((6_900.0..7_300.0).contains(&r), "|r| = {r} km at {minutes} min");
            assert!((7.0..8.0).contains(&v), "|v| = {v} km/s at {minutes} min");
        }
    }

    #[test]
    fn state_timestamp_advances_with_minutes() {
        let engine = Sgp4Engine::new(&d091()).unwrap();
        let a = engine.position_eci(MinutesSinceEpoch(10.0)).unwrap();
        let b = engine.position_eci(MinutesSinceEpoch(10.5)).unwrap();
        assert_eq!((b.timestamp - a.timestamp).num_milliseconds(), 30_000);
    }

    #[test]
    fn look_angle_ranges() {
        let engine = Sgp4Engine::new(&d091()).unwrap();
        let site = GroundSite::new(17.268660, 78.496172, 0.0);
        for step in 0..200 {
            let eci = engine
                .position_eci(MinutesSinceEpoch(step as f64 * 7.3))
                .unwrap();
            let topo = engine.look_angle(&site, &eci);
            assert!((0.0..360.0).contains(&topo.azimuth_deg), "{topo}");
            assert!((-90.0..=90.0).contains(&topo.elevation_deg), "{topo}");
            assert!(topo.range_km > 0.0);
        }
    }

    #[test]
    fn bad_elements_rejected() {
        let mut tle = d091();
        tle.line2 = "2 44078  98.2808".to_string();
        assert!(matches!(
            Sgp4Engine::new(&tle),
            Err(EngineError::Elements(_))
        ));
    }
}
