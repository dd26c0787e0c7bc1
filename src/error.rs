use thiserror::Error;

use crate::detector::ConfigError;
use crate::driver::RunError;

/// Crate-level convenience error.
///
/// Not a "god error": it is a thin wrapper over the per-concern errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Run(#[from] RunError),
}
