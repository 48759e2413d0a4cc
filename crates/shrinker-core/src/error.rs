use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Root path '{}' does not exist or is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Error listing directory {}: {source}", .path.display())]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading volume statistics for {}: {source}", .path.display())]
    VolumeStat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Threshold '{0}' is not a whole number of gigabytes")]
    InvalidThreshold(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Could not start deletion workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
