use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("library directory {} does not exist", .0.display())]
    MissingLibrary(PathBuf),

    #[error("unknown library `{0}`")]
    UnknownLibrary(String),

    #[error("unable to write {}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("rendering the descriptor of {0} failed")]
    Render(String),
}
