//! Error type shared by every module of the crate.

use pyo3::PyErr;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Possible errors of the plotter.
#[derive(Error, Debug)]
pub enum Error {
    /// The Python library "matplotlib" was not found.
    #[error("The matplotlib library has not been found.\n\
Please install it.  See https://matplotlib.org/\n\
If you use Anaconda, see https://github.com/PyO3/pyo3/issues/1554")]
    NoMatplotlib,

    /// The path contains an element that is not a directory or does
    /// not exist.
    #[error("A path contains an element that is not a directory or does not exist")]
    FileNotFound,

    /// Permission denied to access or create the filesystem path.
    #[error("Permission denied to access or create the filesystem path")]
    PermissionDenied,

    /// A name (axis label or subfigure name) is used more than once in a
    /// layout.  `first` and `second` are the paths of both occurrences.
    #[error("The name {name:?} is used more than once (at {first} and at {second})")]
    DuplicateName { name: String, first: String, second: String },

    /// A mosaic is empty, not rectangular, has a label that does not
    /// span a rectangle, or has ratios of the wrong length.
    #[error("Malformed mosaic in {owner:?}: {reason}")]
    MalformedMosaic { owner: String, reason: String },

    /// A group does not declare `nrows * ncols` children.
    #[error("Group {owner:?}: {reason}")]
    GroupShape { owner: String, reason: String },

    /// Bad input to an alignment or scaling routine.
    #[error("Invalid values: {0}")]
    InvalidValues(String),

    /// The requested number of animation frames cannot be selected from
    /// the data.
    #[error("Cannot select {frames} frames out of {len} data points")]
    InvalidFrameCount { len: usize, frames: usize },

    /// No axis or subfigure has this name.
    #[error("The name {0:?} does not exist")]
    UnknownName(String),

    /// Two collections that should pair up element-wise do not.
    #[error("{0}")]
    Mismatch(String),

    /// Other Python errors.
    #[error("Python error: {0}")]
    Python(#[from] PyErr),
}
