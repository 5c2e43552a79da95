use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use lookangle_lib::{
    config::{LookAngleConfig, DEFAULT_CONFIG_FILE},
    run::run_config,
};

#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Override the configured output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Look angle configuration file.
    ///
    /// Key-value format, or TOML when the file has a `.toml` extension.
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let mut cfg = LookAngleConfig::load(&opts.config)?;
    if let Some(output) = opts.output {
        info!(path = %output.display(), "Overriding output file");
        cfg.output_path = output;
    }

    let records = run_config(&cfg)?;
    println!(
        "Wrote {records} look angles for '{}' to '{}'",
        cfg.tle.satellite_name,
        cfg.output_path.display()
    );

    Ok(())
}
