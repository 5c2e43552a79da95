//! Output file records, `HH MM SS.mmm AAA.DDDD EE.DDDD`

use chrono::Timelike;
use std::fmt;
use tletypes::prelude::*;

/// One visible look angle sample as written to the output file
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct OutputRecord {
    pub timestamp: Timestamp,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
}

impl OutputRecord {
    pub fn new(timestamp: Timestamp, azimuth_deg: f64, elevation_deg: f64) -> Self {
        Self {
            timestamp,
            azimuth_deg,
            elevation_deg,
        }
    }

    /// Format with `decimal_count` fractional digits on both angles
    pub fn display(&self, decimal_count: usize) -> RecordDisplay<'_> {
        RecordDisplay {
            record: self,
            decimal_count,
        }
    }
}

pub struct RecordDisplay<'a> {
    record: &'a OutputRecord,
    decimal_count: usize,
}

impl<'a> fmt::Display for RecordDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.record.timestamp;
        let dc = self.decimal_count;

        // Zero-padded to 3 integer digits for azimuth, 2 for elevation
        let az = format!("{:.*}", dc, self.record.azimuth_deg);
        let el = format!("{:.*}", dc, self.record.elevation_deg);

        write!(
            f,
            "{:02} {:02} {:02}.{:03} {:0>az_width$} {:0>el_width$}",
            t.hour(),
            t.minute(),
            t.second(),
            t.nanosecond() / 1_000_000,
            az,
            el,
            az_width = 4 + dc,
            el_width = 3 + dc,
        )
    }
}
