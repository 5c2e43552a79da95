// cargo run --bin tle-check -- tleproto/test_fixtures/sat_tle.txt

use clap::Parser;
use std::path::PathBuf;
use tleproto::{
    decode_epoch, encode_epoch_field, line_checksum, parse_unstructured_tle_set,
    validate_tle_set,
};

/// Validate the checksums and decode the epochs of a TLE set file
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// TLE set file, a name line followed by two element lines per entry
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    let content = std::fs::read_to_string(&opts.input)?;
    let (rem, tle_set) =
        parse_unstructured_tle_set(&content).map_err(|e| format!("Failed to parse TLE set. {e}"))?;
    if !rem.trim().is_empty() {
        eprintln!("Ignoring unparsed trailing content:\n{rem}");
    }

    let mut invalid = 0;
    for tle in tle_set.iter() {
        println!("{tle}");
        println!(
            "  checksums: line 1 {}, line 2 {}",
            line_checksum(&tle.line1),
            line_checksum(&tle.line2)
        );
        match validate_tle_set(tle) {
            Ok(()) => println!("  valid"),
            Err(e) => {
                invalid += 1;
                println!("  INVALID: {e}");
            }
        }
        match decode_epoch(tle) {
            Ok(epoch) => println!(
                "  epoch: {epoch} ({})",
                encode_epoch_field(&epoch.as_timestamp())
            ),
            Err(e) => println!("  epoch: {e}"),
        }
    }

    println!("{} entries, {invalid} invalid", tle_set.len());
    if invalid != 0 {
        return Err(format!("{invalid} invalid TLE entries").into());
    }
    Ok(())
}
