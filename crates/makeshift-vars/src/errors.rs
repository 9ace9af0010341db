use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VarsError {
    #[error("unable to read {}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("variable `{var}` could not be resolved after {rounds} rounds")]
    InterpolationStalled { var: String, rounds: usize },
}

pub type VarsResult<T> = anyhow::Result<T>;
