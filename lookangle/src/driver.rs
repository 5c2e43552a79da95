//! Time-stepped pass prediction over a sampling window

use crate::{
    correction::{Corrections, Refraction, Tilt},
    engine::{EngineError, PropagationEngine},
    Error,
};
use std::iter::FusedIterator;
use tleproto::{decode_epoch, validate_tle_set, OutputRecord};
use tletypes::prelude::*;
use tracing::{debug, info};

#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct PredictionOptions {
    /// Apply Bennett refraction to elevations before the visibility filter
    pub atmospheric_correction: bool,
    pub tilt: Tilt,
}

/// A visible look angle
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Sample {
    pub timestamp: Timestamp,
    pub minutes_since_epoch: MinutesSinceEpoch,
    pub topo: Topo,
}

impl Sample {
    pub fn record(&self) -> OutputRecord {
        OutputRecord::new(
            self.timestamp,
            self.topo.azimuth_deg,
            self.topo.elevation_deg,
        )
    }
}

/// Lazy sequence of the visible samples of a window, in increasing time order.
///
/// Construction validates the TLE and decodes its epoch, so a predictor that
/// exists never fails on bad input. An engine failure is yielded once as an
/// `Err` item and ends the sequence.
pub struct PassPredictor<'a, E> {
    engine: E,
    site: &'a GroundSite,
    epoch: Epoch,
    window: TimeWindow,
    corrections: Corrections,
    base_offset_ms: i64,
    index: u64,
    done: bool,
}

impl<'a, E: PropagationEngine> PassPredictor<'a, E> {
    pub fn new(
        engine: E,
        tle: &TwoLineElementSet,
        site: &'a GroundSite,
        window: TimeWindow,
        options: PredictionOptions,
    ) -> Result<Self, Error> {
        Self::with_engine_from(tle, site, window, options, |_| Ok(engine))
    }

    /// `build_engine` is only called once the TLE has been validated and its
    /// epoch decoded
    pub fn with_engine_from<F>(
        tle: &TwoLineElementSet,
        site: &'a GroundSite,
        window: TimeWindow,
        options: PredictionOptions,
        build_engine: F,
    ) -> Result<Self, Error>
    where
        F: FnOnce(&TwoLineElementSet) -> Result<E, EngineError>,
    {
        validate_tle_set(tle)?;
        let epoch = decode_epoch(tle)?;
        let engine = build_engine(tle)?;
        info!(satellite = %tle, %epoch, "Decoded TLE epoch");

        let clamped = window.clamped_to(&epoch);
        if clamped.start() != window.start() {
            info!(
                requested = %window.start(),
                start = %clamped.start(),
                "Start time precedes the TLE epoch, starting at the epoch"
            );
        }
        let base_offset_ms = epoch.millis_until(&clamped.start());

        let refraction = options
            .atmospheric_correction
            .then(|| Refraction::for_site(site));
        let corrections = Corrections::new(refraction, options.tilt);
        debug!(window = %clamped, base_offset_ms, ?corrections, "Prediction window");

        Ok(Self {
            engine,
            site,
            epoch,
            window: clamped,
            corrections,
            base_offset_ms,
            index: 0,
            done: false,
        })
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// The window actually sampled, after clamping to the epoch
    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    fn sample(&self, index: u64, timestamp: Timestamp) -> Result<Sample, Error> {
        let minutes =
            MinutesSinceEpoch::from_millis(self.base_offset_ms + self.window.offset_ms(index));
        let eci = self.engine.position_eci(minutes)?;
        let topo = self.corrections.apply(self.engine.look_angle(self.site, &eci));
        Ok(Sample {
            timestamp,
            minutes_since_epoch: minutes,
            topo,
        })
    }
}

impl<'a, E: PropagationEngine> Iterator for PassPredictor<'a, E> {
    type Item = Result<Sample, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let index = self.index;
            let Some(timestamp) = self.window.instant(index) else {
                self.done = true;
                break;
            };
            self.index += 1;

            match self.sample(index, timestamp) {
                Ok(sample) if sample.topo.is_visible() => return Some(Ok(sample)),
                Ok(_) => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

impl<'a, E: PropagationEngine> FusedIterator for PassPredictor<'a, E> {}
