//! Parse, validate and decode every entry of a TLE set file

use tleproto::*;

const TLE_SET: &str = include_str!("../test_fixtures/sat_tle.txt");

#[test]
fn tle_set_file() {
    let (rest, tle_set) = parse_unstructured_tle_set(TLE_SET).unwrap();
    assert_eq!(rest, "");
    assert_eq!(tle_set.len(), 3);

    let names: Vec<&str> = tle_set.iter().map(|t| t.satellite_name.as_str()).collect();
    assert_eq!(names, ["D091", "GEO1", "GEO2"]);

    for tle in tle_set.iter() {
        validate_tle_set(tle).unwrap_or_else(|e| panic!("{tle}: {e}"));
    }

    let epochs: Vec<String> = tle_set
        .iter()
        .map(|t| decode_epoch(t).unwrap().to_string())
        .collect();
    assert_eq!(
        epochs,
        [
            "2025-08-25 00:01:50.000",
            "2023-07-09 10:49:08.192",
            "2023-07-09 12:02:33.124"
        ]
    );

    // Epochs of the two GEO entries are ~1h13m apart
    let geo1 = decode_epoch(&tle_set[1]).unwrap();
    let geo2 = decode_epoch(&tle_set[2]).unwrap();
    assert_eq!(geo1.millis_until(&geo2.as_timestamp()), 4_404_932);
}

#[test]
fn corrupted_entry_fails_validation() {
    let corrupted = TLE_SET.replacen("98.2808", "98.2809", 1);
    let (_, tle_set) = parse_unstructured_tle_set(&corrupted).unwrap();
    assert_eq!(
        validate_tle_set(&tle_set[0]),
        Err(TleError::Checksum {
            line: TleLine::Line2,
            expected: 7,
            computed: 8,
        })
    );
    assert!(validate_tle_set(&tle_set[1]).is_ok());
}
