//! TLE line length and modulo-10 checksum validation

use std::fmt;
use tletypes::tle::{TwoLineElementSet, TLE_LINE_LENGTH};
use tracing::debug;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TleLine {
    Line1,
    Line2,
}

impl fmt::Display for TleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TleLine::Line1 => f.write_str("line 1"),
            TleLine::Line2 => f.write_str("line 2"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TleError {
    #[error("TLE {line} has {len} characters, expected {}", TLE_LINE_LENGTH)]
    Length { line: TleLine, len: usize },
    #[error("TLE {line} checksum character '{found}' is not a digit")]
    ChecksumCharacter { line: TleLine, found: char },
    #[error("TLE {line} checksum mismatch, line says {expected} but the sum gives {computed}")]
    Checksum {
        line: TleLine,
        expected: u32,
        computed: u32,
    },
}

/// Modulo-10 sum of the first 68 characters.
/// Digits count their value, '-' counts one, everything else counts zero.
pub fn line_checksum(line: &str) -> u32 {
    let sum: u32 = line
        .chars()
        .take(TLE_LINE_LENGTH - 1)
        .map(|c| match c {
            '-' => 1,
            c => c.to_digit(10).unwrap_or(0),
        })
        .sum();
    sum % 10
}

fn validate_line(line: &str, which: TleLine) -> Result<(), TleError> {
    let len = line.chars().count();
    if len != TLE_LINE_LENGTH {
        return Err(TleError::Length { line: which, len });
    }

    // Length was checked above
    let last = line.chars().last().unwrap_or_default();
    let expected = last.to_digit(10).ok_or(TleError::ChecksumCharacter {
        line: which,
        found: last,
    })?;
    let computed = line_checksum(line);
    debug!(line = %which, computed, expected, "TLE checksum");

    if computed == expected {
        Ok(())
    } else {
        Err(TleError::Checksum {
            line: which,
            expected,
            computed,
        })
    }
}

/// True if the line is 69 characters long and its checksum digit matches
pub fn is_valid_line(line: &str) -> bool {
    validate_line(line, TleLine::Line1).is_ok()
}

/// Both element lines must pass
pub fn validate_tle_set(tle: &TwoLineElementSet) -> Result<(), TleError> {
    validate_line(&tle.line1, TleLine::Line1)?;
    validate_line(&tle.line2, TleLine::Line2)
}
