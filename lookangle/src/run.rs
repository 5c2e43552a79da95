use crate::{
    config::LookAngleConfig,
    driver::PassPredictor,
    engine::{PropagationEngine, Sgp4Engine},
    output::LookAngleWriter,
    Error,
};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
};
use tracing::info;

/// Writes the visible samples of a predictor as a look angle table.
/// Returns the number of records written.
pub fn write_table<E, W>(
    predictor: PassPredictor<'_, E>,
    out: W,
    decimal_count: usize,
) -> Result<usize, WriteTableError>
where
    E: PropagationEngine,
    W: Write,
{
    let mut writer = LookAngleWriter::new(out, decimal_count)?;
    for sample in predictor {
        writer.write_record(&sample?.record())?;
    }
    let records = writer.records_written();
    writer.finish()?;
    Ok(records)
}

#[derive(Debug, thiserror::Error)]
pub enum WriteTableError {
    #[error(transparent)]
    Prediction(#[from] Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Runs the prediction described by `cfg` into its output file.
///
/// Nothing is created on disk until the TLE has been validated and the
/// propagator initialized.
pub fn run_config(cfg: &LookAngleConfig) -> Result<usize, Error> {
    let window = cfg.time_window()?;
    let predictor = PassPredictor::with_engine_from(
        &cfg.tle,
        &cfg.site,
        window,
        cfg.options,
        Sgp4Engine::new,
    )?;

    let output_error = |source| Error::Output {
        path: cfg.output_path.clone(),
        source,
    };
    let file = File::create(&cfg.output_path).map_err(output_error)?;
    let records = write_table(
        predictor,
        BufWriter::new(file),
        usize::from(cfg.decimal_count),
    )
    .map_err(|e| match e {
        WriteTableError::Prediction(e) => e,
        WriteTableError::Io(e) => output_error(e),
    })?;

    info!(
        records,
        path = %cfg.output_path.display(),
        "Wrote look angles"
    );
    Ok(records)
}
