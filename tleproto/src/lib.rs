pub use crate::checksum::{is_valid_line, line_checksum, validate_tle_set, TleError, TleLine};
pub use crate::epoch::{decode_epoch, decode_epoch_field, encode_epoch_field, EpochError};
pub use crate::parser::{
    parse_config_entries, parse_epoch_field, parse_unstructured_tle_set, ConfigEntries,
    ParseError,
};
pub use crate::record::OutputRecord;

pub mod checksum;
pub mod epoch;
pub mod parser;
pub mod record;

/// Configuration and command line timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// First line of every output file.
/// The column names are historical, the columns hold azimuth and elevation.
pub const OUTPUT_HEADER: &str = "HH mm ss.zzz Longitude Latitude";

pub const COMMENT_TOKEN: &str = "#";
pub const KEY_VALUE_DELIMITER: char = '=';
