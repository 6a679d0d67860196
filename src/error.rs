use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures; everything best-effort (backups, resource copies, anchor
/// shortfalls) is reported on stdout instead and the run continues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no Keil project (*.uvprojx) found under {0}")]
    ProjectNotFound(PathBuf),
    #[error("cannot read {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot instantiate Makefile skeleton from {path}")]
    Skeleton {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
