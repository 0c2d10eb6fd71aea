use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason} in {content:?}")]
    Parse {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("no benchmark records found after the header")]
    NoRecords,

    #[error("record {index} has a parallel time of 0 ns, speed-up is undefined")]
    ZeroTime { index: usize },

    #[error("failed to draw chart: {0}")]
    Plot(String),

    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
