use std::path::PathBuf;
use thiserror::Error;

use crate::record::Device;

/// Which canonical axis came up empty when intersecting two tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    Models,
    Tests,
}

impl std::fmt::Display for AxisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            AxisKind::Models => write!(f, "models"),
            AxisKind::Tests => write!(f, "tests"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("No benchmark results found.")]
    NoResults,
    #[error("folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),
    #[error("could not find a results CSV in {}", .0.display())]
    ResultsFileNotFound(PathBuf),
    #[error("failed to parse {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{device} results are missing required column '{column}'")]
    MissingColumn { device: Device, column: String },
    #[error("no common {0} between GPU and CPU results")]
    EmptyIntersection(AxisKind),
    #[error("nothing to plot: the model axis is empty")]
    EmptyAxis,
    #[error("failed to render {}: {message}", path.display())]
    Render { path: PathBuf, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn csv<P: Into<PathBuf>>(path: P, source: csv::Error) -> Self {
        Error::Csv {
            path: path.into(),
            source,
        }
    }

    pub fn missing_column<T: Into<String>>(device: Device, column: T) -> Self {
        Error::MissingColumn {
            device,
            column: column.into(),
        }
    }

    pub fn render<P: Into<PathBuf>, T: ToString>(path: P, message: T) -> Self {
        Error::Render {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
