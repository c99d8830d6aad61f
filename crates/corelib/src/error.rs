//! Core shared errors (renderer-agnostic).

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Unknown render mode '{0}' (expected mesh, plain, textured or bump)")]
    UnknownRenderMode(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
