use chrono::{Duration, NaiveDateTime};
use derive_more::{Display, From};
use std::fmt;

/// Wall-clock instant. Configuration, epoch and output times are all UTC.
pub type Timestamp = NaiveDateTime;

pub const MILLIS_PER_MINUTE: i64 = 60_000;

/// Reference time of a TLE, decoded from the line 1 epoch field
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, From)]
pub struct Epoch(Timestamp);

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

impl Epoch {
    pub fn as_timestamp(&self) -> Timestamp {
        self.0
    }

    /// Signed milliseconds from the epoch to `t`
    pub fn millis_until(&self, t: &Timestamp) -> i64 {
        (*t - self.0).num_milliseconds()
    }
}

/// Elapsed time since a TLE epoch, the propagation engine's time argument
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Display)]
#[display(fmt = "{} min", "_0")]
pub struct MinutesSinceEpoch(pub f64);

impl MinutesSinceEpoch {
    /// Whole minutes and the sub-minute remainder are combined separately so
    /// large offsets keep their millisecond precision.
    pub fn from_millis(ms: i64) -> Self {
        let whole = ms.div_euclid(MILLIS_PER_MINUTE);
        let rem = ms.rem_euclid(MILLIS_PER_MINUTE);
        MinutesSinceEpoch(whole as f64 + rem as f64 / MILLIS_PER_MINUTE as f64)
    }

    pub fn as_minutes(&self) -> f64 {
        self.0
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Display)]
pub enum WindowError {
    #[display(fmt = "Time resolution must be greater than zero")]
    ZeroStep,
}

impl std::error::Error for WindowError {}

/// Sampling window. `end` is exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Display)]
#[display(fmt = "{{start: {}, end: {}, step: {} ms}}", "start", "end", "step_ms")]
pub struct TimeWindow {
    start: Timestamp,
    end: Timestamp,
    step_ms: u32,
}

impl TimeWindow {
    pub fn new(start: Timestamp, end: Timestamp, step_ms: u32) -> Result<Self, WindowError> {
        if step_ms == 0 {
            return Err(WindowError::ZeroStep);
        }
        Ok(Self {
            start,
            end,
            step_ms,
        })
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn step_ms(&self) -> u32 {
        self.step_ms
    }

    /// The same window starting no earlier than `epoch`
    pub fn clamped_to(&self, epoch: &Epoch) -> Self {
        Self {
            start: self.start.max(epoch.as_timestamp()),
            ..*self
        }
    }

    /// Millisecond offset of sample `index` from the window start
    pub fn offset_ms(&self, index: u64) -> i64 {
        index as i64 * i64::from(self.step_ms)
    }

    /// Wall-clock instant of sample `index`, `None` once past the end
    pub fn instant(&self, index: u64) -> Option<Timestamp> {
        let t = self
            .start
            .checked_add_signed(Duration::milliseconds(self.offset_ms(index)))?;
        (t < self.end).then_some(t)
    }
}
