//! nom parsers for TLE set files, the TLE epoch field and key-value configuration files

use crate::{COMMENT_TOKEN, KEY_VALUE_DELIMITER};
use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_till},
    character::complete::{line_ending, not_line_ending},
    combinator::{eof, opt, verify},
    error::ErrorKind,
    multi::fold_many0,
    sequence::terminated,
    Err::Error,
};
use std::collections::HashMap;
use tletypes::prelude::*;
use tracing::warn;

pub type Result<I, O, E = ParseError<I>> = std::result::Result<(I, O), nom::Err<E>>;

/// Key-value pairs of a configuration file, later entries win
pub type ConfigEntries = HashMap<String, String>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ParseError<I> {
    #[error("Invalid epoch year")]
    EpochYear,
    #[error("Invalid epoch day of year")]
    EpochDay,
    #[error("Parse error")]
    Nom(I, ErrorKind),
}

pub fn parse_unstructured_tle_set(set: &str) -> Result<&str, Vec<TwoLineElementSet>> {
    let (s, tle_set) = fold_many0(
        tle,
        Vec::new,
        |mut tle_set: Vec<TwoLineElementSet>, tle| {
            tle_set.push(tle);
            tle_set
        },
    )(set)?;
    Ok((s, tle_set))
}

fn tle(s: &str) -> Result<&str, TwoLineElementSet> {
    let (s, name) = not_line_ending(s)?;
    let (s, _) = line_ending(s)?;
    let (s, line1) = not_line_ending(s)?;
    let (s, _) = line_ending(s)?;
    let (s, line2) = verify(not_line_ending, |l: &str| !l.is_empty())(s)?;
    let (s, _) = alt((line_ending, eof))(s)?;
    let (s, _) = opt(line_ending)(s)?;
    Ok((
        s,
        TwoLineElementSet {
            satellite_name: name.trim().to_string(),
            line1: line1.to_string(),
            line2: line2.to_string(),
        },
    ))
}

/// `YYDDD.DDDDDDDD`, returns the 2-digit year and the fractional day of year
pub fn parse_epoch_field(s: &str) -> Result<&str, (u8, f64)> {
    let (s, yy) = epoch_year(s)?;
    let (s, day) = epoch_day(s)?;
    Ok((s, (yy, day)))
}

fn epoch_year(s: &str) -> Result<&str, u8> {
    let (s, yy) = take(2usize)(s)?;
    let yy = yy
        .trim()
        .parse::<u8>()
        .map_err(|_| Error(ParseError::EpochYear))?;
    Ok((s, yy))
}

fn epoch_day(s: &str) -> Result<&str, f64> {
    let (s, day) = take(12usize)(s)?;
    let day = day
        .trim()
        .parse::<f64>()
        .map_err(|_| Error(ParseError::EpochDay))?;
    Ok((s, day))
}

/// A line in a key-value configuration file
#[derive(Clone, Debug, PartialEq)]
enum ConfigLine<'a> {
    Entry(&'a str, &'a str),
    Blank,
    Unsupported(&'a str),
}

pub fn parse_config_entries(cfg: &str) -> Result<&str, ConfigEntries> {
    use ConfigLine::*;

    fold_many0(config_line, ConfigEntries::new, |mut entries, line| {
        match line {
            Entry(key, value) => {
                entries.insert(key.to_string(), value.to_string());
            }
            Blank => (),
            Unsupported(line) => {
                warn!(line = line, "Ignoring configuration line");
            }
        }
        entries
    })(cfg)
}

/// Lines end at `\n`, `\r\n` or a lone `\r`
fn config_line(s: &str) -> Result<&str, ConfigLine> {
    let (s, line) = alt((
        terminated(config_line_content, alt((line_ending, tag("\r")))),
        verify(config_line_content, |l: &str| !l.is_empty()),
    ))(s)?;
    Ok((s, classify_config_line(line)))
}

fn config_line_content(s: &str) -> Result<&str, &str> {
    take_till(|c: char| c == '\r' || c == '\n')(s)
}

fn classify_config_line(line: &str) -> ConfigLine {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_TOKEN) {
        return ConfigLine::Blank;
    }

    let mut parts = line.split(KEY_VALUE_DELIMITER);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => ConfigLine::Entry(key.trim(), value.trim()),
        _ => ConfigLine::Unsupported(line),
    }
}

impl<I> nom::error::ParseError<I> for ParseError<I> {
    fn from_error_kind(s: I, kind: ErrorKind) -> Self {
        ParseError::Nom(s, kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const TLE_SET: &str = indoc! {r#"GEO1
        1 37481U 11019A   23190.45078927 -.00000009  00000-0  00000+0 0  9991
        2 37481   2.3847  40.6385 0001640  70.7486  43.7146  1.00272292 44578

        GEO2
        1 39120U 13011A   23190.50177227 -.00000262  00000-0  00000+0 0  9997
        2 39120   2.3950  38.7964 0001772  68.0002 323.0070  1.00271163 37822
        "#};

    const CONFIG: &str = indoc! {r#"
        # Look angle configuration
        TLE_NAME = D091
        TLE_LINE1 = 1 44078U 19072A   25237.00127315  .00000014  00000-0  40313-4 0  1239
        TLE_LINE2=2 44078  98.2808 291.9629 0018719  34.1424  38.1671 14.43768520337337

        SITE_LAT = 17.268660
        START_TIME = 2025-08-25 16:17:11
        NOT A KEY VALUE LINE
        A = B = C
        DECIMAL_COUNT = 2
        DECIMAL_COUNT = 4"#};

    #[test]
    fn parse_tle() {
        let (s, tle_set) = parse_unstructured_tle_set(TLE_SET).unwrap();
        assert!(s.is_empty());
        assert_eq!(tle_set.len(), 2);
        assert_eq!(tle_set[0].satellite_name, "GEO1");
        assert_eq!(tle_set[1].satellite_name, "GEO2");
        assert_eq!(tle_set[1].line2.len(), 69);
    }

    #[test]
    fn parse_tle_without_trailing_newline() {
        let (s, tle_set) = parse_unstructured_tle_set(TLE_SET.trim_end()).unwrap();
        assert!(s.is_empty());
        assert_eq!(tle_set.len(), 2);
    }

    #[test]
    fn parse_epoch() {
        assert_eq!(
            parse_epoch_field("25237.00127315"),
            Ok(("", (25, 237.00127315)))
        );
        assert_eq!(
            parse_epoch_field("23190.45078927 -.00000009"),
            Ok((" -.00000009", (23, 190.45078927)))
        );
        assert_eq!(
            parse_epoch_field("2X237.00127315"),
            Err(Error(ParseError::EpochYear))
        );
        assert_eq!(
            parse_epoch_field("25237.0012731X"),
            Err(Error(ParseError::EpochDay))
        );
        assert!(parse_epoch_field("25237.00").is_err());
    }

    #[test]
    fn classify_lines() {
        assert_eq!(classify_config_line("   "), ConfigLine::Blank);
        assert_eq!(classify_config_line(" # A = B"), ConfigLine::Blank);
        assert_eq!(
            classify_config_line(" SITE_LON =  78.496172 "),
            ConfigLine::Entry("SITE_LON", "78.496172")
        );
        assert_eq!(classify_config_line("EMPTY ="), ConfigLine::Entry("EMPTY", ""));
        assert_eq!(
            classify_config_line("A = B = C"),
            ConfigLine::Unsupported("A = B = C")
        );
    }

    #[test]
    fn parse_config() {
        let (s, entries) = parse_config_entries(CONFIG).unwrap();
        assert_eq!(s, "");
        assert_eq!(entries.len(), 6);
        assert_eq!(entries["TLE_NAME"], "D091");
        assert_eq!(
            entries["TLE_LINE2"],
            "2 44078  98.2808 291.9629 0018719  34.1424  38.1671 14.43768520337337"
        );
        assert_eq!(entries["START_TIME"], "2025-08-25 16:17:11");
        assert_eq!(entries["DECIMAL_COUNT"], "4");
        assert!(!entries.contains_key("A"));
    }

    #[test]
    fn parse_crlf_config() {
        let (s, entries) = parse_config_entries("SITE_LAT = 1.5\r\nSITE_LON = 2\r\n").unwrap();
        assert_eq!(s, "");
        assert_eq!(entries["SITE_LAT"], "1.5");
        assert_eq!(entries["SITE_LON"], "2");
    }

    #[test]
    fn lone_carriage_return_ends_a_line() {
        let (s, entries) =
            parse_config_entries("SITE_LON = 5\rX\nSITE_LAT = 12\nDECIMAL_COUNT = 3\n").unwrap();
        assert_eq!(s, "");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries["SITE_LON"], "5");
        assert_eq!(entries["SITE_LAT"], "12");
        assert_eq!(entries["DECIMAL_COUNT"], "3");

        let (s, entries) = parse_config_entries("A = 1\rB = 2").unwrap();
        assert_eq!(s, "");
        assert_eq!(entries["B"], "2");
    }

    #[test]
    fn parse_empty_config() {
        let (s, entries) = parse_config_entries("").unwrap();
        assert_eq!(s, "");
        assert!(entries.is_empty());
    }
}
