//! The orbital mechanics seam.
//!
//! The pass predictor only needs two things from an engine: the inertial
//! state of the satellite some minutes after its TLE epoch, and the look
//! angle of that state from a ground site. Anything implementing
//! [`PropagationEngine`] can drive a prediction, the SGP4 implementation is
//! the one used by the binary.

use tletypes::prelude::*;

pub use self::sgp4_engine::Sgp4Engine;

pub mod sgp4_engine;
pub mod topocentric;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Failed to load orbital elements. {0}")]
    Elements(String),
    #[error("Propagation failed at {minutes} minutes past epoch. {reason}")]
    Propagation { minutes: f64, reason: String },
}

pub trait PropagationEngine {
    /// Inertial state `minutes` after the TLE epoch, valid for non-negative minutes
    fn position_eci(&self, minutes: MinutesSinceEpoch) -> Result<EciState, EngineError>;

    /// Topocentric look angle of `eci` from `site`
    fn look_angle(&self, site: &GroundSite, eci: &EciState) -> Topo;
}

impl<T: PropagationEngine + ?Sized> PropagationEngine for &T {
    fn position_eci(&self, minutes: MinutesSinceEpoch) -> Result<EciState, EngineError> {
        (**self).position_eci(minutes)
    }

    fn look_angle(&self, site: &GroundSite, eci: &EciState) -> Topo {
        (**self).look_angle(site, eci)
    }
}
