use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to read `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("rows in `{path}` failed validation")]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unable to walk snapshot root")]
    Walk(#[from] walkdir::Error),
    #[error("snapshot root `{0}` does not exist")]
    MissingRoot(PathBuf),
}
