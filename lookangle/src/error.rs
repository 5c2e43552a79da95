use crate::{config::ConfigError, engine::EngineError};
use std::path::PathBuf;
use tleproto::{EpochError, TleError};
use tletypes::prelude::WindowError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Tle(#[from] TleError),
    #[error(transparent)]
    Epoch(#[from] EpochError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Window(#[from] WindowError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to write output file '{}'. {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
