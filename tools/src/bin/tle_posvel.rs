// cargo run --bin tle-posvel -- --span 1440 --step 360 tleproto/test_fixtures/sat_tle.txt

use clap::Parser;
use lookangle_lib::engine::{PropagationEngine, Sgp4Engine};
use std::path::PathBuf;
use tleproto::{parse_unstructured_tle_set, validate_tle_set};
use tletypes::prelude::{EciState, MinutesSinceEpoch};

/// Print SGP4 position and velocity tables at fixed offsets from each TLE epoch
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Last offset from epoch [min]
    #[arg(short = 's', long, default_value_t = 1440)]
    span: u32,

    /// Offset step [min]
    #[arg(short = 't', long, default_value_t = 360)]
    step: u32,

    /// TLE set file, a name line followed by two element lines per entry
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();
    if opts.step == 0 {
        return Err("Step must be greater than zero".into());
    }

    let content = std::fs::read_to_string(&opts.input)?;
    let (_, tle_set) =
        parse_unstructured_tle_set(&content).map_err(|e| format!("Failed to parse TLE set. {e}"))?;

    for tle in tle_set.iter() {
        validate_tle_set(tle)?;
        let engine = Sgp4Engine::new(tle)?;

        let offsets: Vec<u32> = (0..=opts.span).step_by(opts.step as usize).collect();
        let states = offsets
            .iter()
            .map(|m| engine.position_eci(MinutesSinceEpoch(f64::from(*m))))
            .collect::<Result<Vec<EciState>, _>>()?;

        println!("{}", tle.satellite_name);
        println!("{}", tle.line1);
        println!("{}\n", tle.line2);

        println!("  TSINCE            X                Y                Z\n");
        for (m, s) in offsets.iter().zip(states.iter()) {
            println!(
                "{:8}.00  {:16.8} {:16.8} {:16.8}",
                m, s.position.x, s.position.y, s.position.z
            );
        }

        println!("\n                    XDOT             YDOT             ZDOT\n");
        for s in states.iter() {
            println!(
                "             {:16.8} {:16.8} {:16.8}",
                s.velocity.x, s.velocity.y, s.velocity.z
            );
        }
        println!();
    }

    Ok(())
}
