//! Error type shared by the OBJ parser and the attribute expander.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("Failed to read OBJ source {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `line` is 1-based; `content` is the raw line as read.
    #[error("Malformed OBJ line {line}: {reason} ('{content}')")]
    Parse {
        line: usize,
        content: String,
        reason: String,
    },

    /// `face` is the 0-based position of the face in declaration order.
    #[error("Invalid geometry in face {face}: {reason}")]
    InvalidGeometry { face: usize, reason: String },
}

pub type GeometryResult<T> = Result<T, GeometryError>;
