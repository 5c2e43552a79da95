//! Run configuration.
//!
//! Two file formats are accepted. The key-value format (`KEY = VALUE` lines)
//! is the default, a `.toml` extension selects TOML with the same keys in
//! kebab-case (`SITE_LAT` becomes `site-lat`).

use crate::{correction::Tilt, driver::PredictionOptions};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tleproto::{parse_config_entries, ConfigEntries, TIMESTAMP_FORMAT};
use tletypes::prelude::*;
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "look_angle_configuration.txt";

pub const TLE_NAME: &str = "TLE_NAME";
pub const TLE_LINE1: &str = "TLE_LINE1";
pub const TLE_LINE2: &str = "TLE_LINE2";
pub const OUTPUT_FILENAME: &str = "OUTPUT_FILENAME";
pub const SITE_LAT: &str = "SITE_LAT";
pub const SITE_LON: &str = "SITE_LON";
pub const SITE_HEIGHT: &str = "SITE_HEIGHT";
pub const START_TIME: &str = "START_TIME";
pub const END_TIME: &str = "END_TIME";
pub const TLE_TIME_RESOLUTION: &str = "TLE_TIME_RESOLUTION";
pub const ATMOSPHERIC_CORRECTION: &str = "ATMOSPHERIC_CORRECTION";
pub const DECIMAL_COUNT: &str = "DECIMAL_COUNT";
pub const TILT_DEG: &str = "TILT_DEG";
pub const TILT_AZIMUTH_DEG: &str = "TILT_AZIMUTH_DEG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{}'. {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse configuration. {0}")]
    Parse(String),
    #[error("Failed to parse TOML configuration. {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid value '{value}' for configuration key {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("Site latitude {0} is outside [-90, 90]")]
    Latitude(f64),
}

/// The configuration file as written, before timestamps are parsed
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RawConfig {
    pub tle_name: String,
    pub tle_line1: String,
    pub tle_line2: String,
    pub output_filename: String,
    pub site_lat: f64,
    pub site_lon: f64,
    /// [km]
    pub site_height: f64,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// [ms]
    pub tle_time_resolution: u32,
    pub atmospheric_correction: bool,
    pub decimal_count: u8,
    pub tilt_deg: f64,
    pub tilt_azimuth_deg: f64,
}

impl RawConfig {
    /// Missing and empty entries keep their defaults
    pub fn from_entries(entries: &ConfigEntries) -> Result<Self, ConfigError> {
        let text = |key: &str| {
            entries
                .get(key)
                .filter(|v| !v.is_empty())
                .map(|v| v.to_owned())
        };

        Ok(Self {
            tle_name: text(TLE_NAME).unwrap_or_default(),
            tle_line1: text(TLE_LINE1).unwrap_or_default(),
            tle_line2: text(TLE_LINE2).unwrap_or_default(),
            output_filename: text(OUTPUT_FILENAME).unwrap_or_default(),
            site_lat: parse_entry(entries, SITE_LAT)?.unwrap_or_default(),
            site_lon: parse_entry(entries, SITE_LON)?.unwrap_or_default(),
            site_height: parse_entry(entries, SITE_HEIGHT)?.unwrap_or_default(),
            start_time: text(START_TIME),
            end_time: text(END_TIME),
            tle_time_resolution: parse_entry(entries, TLE_TIME_RESOLUTION)?.unwrap_or_default(),
            atmospheric_correction: entries
                .get(ATMOSPHERIC_CORRECTION)
                .map(|v| v == "1")
                .unwrap_or(false),
            decimal_count: parse_entry(entries, DECIMAL_COUNT)?.unwrap_or_default(),
            tilt_deg: parse_entry(entries, TILT_DEG)?.unwrap_or_default(),
            tilt_azimuth_deg: parse_entry(entries, TILT_AZIMUTH_DEG)?.unwrap_or_default(),
        })
    }
}

fn parse_entry<T: FromStr>(
    entries: &ConfigEntries,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match entries.get(key).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key,
                value: value.clone(),
            }),
    }
}

fn parse_timestamp(
    key: &'static str,
    value: Option<&str>,
) -> Result<Option<Timestamp>, ConfigError> {
    value
        .map(|v| {
            NaiveDateTime::parse_from_str(v, TIMESTAMP_FORMAT).map_err(|_| {
                ConfigError::InvalidValue {
                    key,
                    value: v.to_owned(),
                }
            })
        })
        .transpose()
}

#[derive(Clone, PartialEq, Debug)]
pub struct LookAngleConfig {
    pub tle: TwoLineElementSet,
    pub output_path: PathBuf,
    pub site: GroundSite,
    /// `None` starts at the TLE epoch
    pub start_time: Option<Timestamp>,
    /// `None` gives an empty window
    pub end_time: Option<Timestamp>,
    pub time_resolution_ms: u32,
    pub decimal_count: u8,
    pub options: PredictionOptions,
}

impl LookAngleConfig {
    /// Loads a key-value file, or a TOML file when the extension is `.toml`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = if path.extension().map(|e| e == "toml").unwrap_or(false) {
            Self::from_toml_str(&content)?
        } else {
            Self::from_key_value_str(&content)?
        };
        info!(
            path = %path.display(),
            satellite = %cfg.tle,
            site = %cfg.site,
            "Loaded configuration"
        );
        Ok(cfg)
    }

    pub fn from_key_value_str(s: &str) -> Result<Self, ConfigError> {
        let (rem, entries) =
            parse_config_entries(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if !rem.is_empty() {
            return Err(ConfigError::Parse(format!(
                "Unparsed configuration content '{}'",
                rem.lines().next().unwrap_or(rem)
            )));
        }
        Self::try_from(RawConfig::from_entries(&entries)?)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(s)?;
        Self::try_from(raw)
    }

    /// The requested sampling window, before clamping to the TLE epoch
    pub fn time_window(&self) -> Result<TimeWindow, WindowError> {
        TimeWindow::new(
            self.start_time.unwrap_or(NaiveDateTime::MIN),
            self.end_time.unwrap_or(NaiveDateTime::MIN),
            self.time_resolution_ms,
        )
    }
}

impl TryFrom<RawConfig> for LookAngleConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        if !(-90.0..=90.0).contains(&raw.site_lat) {
            return Err(ConfigError::Latitude(raw.site_lat));
        }
        let start_time = parse_timestamp(START_TIME, raw.start_time.as_deref())?;
        let end_time = parse_timestamp(END_TIME, raw.end_time.as_deref())?;

        Ok(Self {
            tle: TwoLineElementSet::new(raw.tle_name, raw.tle_line1, raw.tle_line2),
            output_path: PathBuf::from(raw.output_filename),
            site: GroundSite::new(raw.site_lat, raw.site_lon, raw.site_height),
            start_time,
            end_time,
            time_resolution_ms: raw.tle_time_resolution,
            decimal_count: raw.decimal_count,
            options: PredictionOptions {
                atmospheric_correction: raw.atmospheric_correction,
                tilt: Tilt::new(raw.tilt_deg, raw.tilt_azimuth_deg),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const KEY_VALUE: &str = indoc! {r#"
        # D091 over the site
        TLE_NAME = D091
        TLE_LINE1 = 1 44078U 19072A   25237.00127315  .00000014  00000-0  40313-4 0  1239
        TLE_LINE2 = 2 44078  98.2808 291.9629 0018719  34.1424  38.1671 14.43768520337337
        OUTPUT_FILENAME = D091_look_angles.txt
        SITE_LAT = 17.268660
        SITE_LON = 78.496172
        SITE_HEIGHT = 0
        START_TIME = 2025-08-25 16:17:11
        END_TIME = 2025-08-25 16:31:10
        TLE_TIME_RESOLUTION = 1000
        ATMOSPHERIC_CORRECTION = 0
        DECIMAL_COUNT = 4
    "#};

    const TOML: &str = indoc! {r#"
        tle-name = "D091"
        tle-line1 = "1 44078U 19072A   25237.00127315  .00000014  00000-0  40313-4 0  1239"
        tle-line2 = "2 44078  98.2808 291.9629 0018719  34.1424  38.1671 14.43768520337337"
        output-filename = "D091_look_angles.txt"
        site-lat = 17.268660
        site-lon = 78.496172
        site-height = 0.0
        start-time = "2025-08-25 16:17:11"
        end-time = "2025-08-25 16:31:10"
        tle-time-resolution = 1000
        atmospheric-correction = false
        decimal-count = 4
    "#};

    fn ts(s: &str) -> Timestamp {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn key_value_config() {
        let cfg = LookAngleConfig::from_key_value_str(KEY_VALUE).unwrap();
        assert_eq!(cfg.tle.satellite_name, "D091");
        assert_eq!(cfg.tle.line1.len(), 69);
        assert_eq!(cfg.tle.line2.len(), 69);
        assert_eq!(cfg.output_path, PathBuf::from("D091_look_angles.txt"));
        assert_eq!(cfg.site, GroundSite::new(17.268660, 78.496172, 0.0));
        assert_eq!(cfg.start_time, Some(ts("2025-08-25 16:17:11")));
        assert_eq!(cfg.end_time, Some(ts("2025-08-25 16:31:10")));
        assert_eq!(cfg.time_resolution_ms, 1000);
        assert_eq!(cfg.decimal_count, 4);
        assert_eq!(cfg.options, PredictionOptions::default());
    }

    #[test]
    fn toml_matches_key_value() {
        assert_eq!(
            LookAngleConfig::from_toml_str(TOML).unwrap(),
            LookAngleConfig::from_key_value_str(KEY_VALUE).unwrap()
        );
    }

    #[test]
    fn atmospheric_correction_only_for_one() {
        for (value, expected) in [("1", true), ("0", false), ("true", false), ("", false)] {
            let s = format!("ATMOSPHERIC_CORRECTION = {value}");
            let cfg = LookAngleConfig::from_key_value_str(&s).unwrap();
            assert_eq!(cfg.options.atmospheric_correction, expected, "{value}");
        }
    }

    #[test]
    fn missing_keys_use_defaults() {
        let cfg = LookAngleConfig::from_key_value_str("").unwrap();
        assert_eq!(cfg.tle, TwoLineElementSet::default());
        assert_eq!(cfg.site, GroundSite::default());
        assert_eq!(cfg.start_time, None);
        assert_eq!(cfg.end_time, None);
        assert_eq!(cfg.decimal_count, 0);
        assert!(cfg.options.tilt.is_level());
        assert_eq!(cfg.time_window(), Err(WindowError::ZeroStep));
    }

    #[test]
    fn missing_times_clamp_to_epoch_and_empty_window() {
        let cfg = LookAngleConfig::from_key_value_str("TLE_TIME_RESOLUTION = 10").unwrap();
        let epoch = Epoch::from(ts("2025-08-25 00:01:50"));
        let w = cfg.time_window().unwrap().clamped_to(&epoch);
        assert_eq!(w.start(), epoch.as_timestamp());
        assert_eq!(w.instant(0), None);
    }

    #[test]
    fn lone_carriage_return_keeps_later_keys() {
        let cfg = LookAngleConfig::from_key_value_str(
            "SITE_LON = 5\rX\nSITE_LAT = 12\nDECIMAL_COUNT = 3\n",
        )
        .unwrap();
        assert_eq!(cfg.site, GroundSite::new(12.0, 5.0, 0.0));
        assert_eq!(cfg.decimal_count, 3);
    }

    #[test]
    fn tilt_keys() {
        let cfg =
            LookAngleConfig::from_key_value_str("TILT_DEG = 2.5\nTILT_AZIMUTH_DEG = 180").unwrap();
        assert_eq!(cfg.options.tilt, Tilt::new(2.5, 180.0));
    }

    #[test]
    fn invalid_values_are_errors() {
        let err = LookAngleConfig::from_key_value_str("SITE_LAT = north").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: SITE_LAT, .. }));

        let err = LookAngleConfig::from_key_value_str("START_TIME = 25/08/2025").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: START_TIME, .. }));

        let err = LookAngleConfig::from_key_value_str("TLE_TIME_RESOLUTION = -1").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: TLE_TIME_RESOLUTION,
                ..
            }
        ));

        let err = LookAngleConfig::from_key_value_str("SITE_LAT = 91").unwrap_err();
        assert!(matches!(err, ConfigError::Latitude(_)));
    }

    #[test]
    fn load_missing_file() {
        let err = LookAngleConfig::load("does/not/exist.txt").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
