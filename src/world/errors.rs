use std::io;

use thiserror::Error;

use super::grid::{MAX_DOORS, MAX_GRID_SPAN};

/// Misuse while building a room: surfaced to whatever is constructing the
/// world, never to a player mid-move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("'{0}' is not a valid door direction")]
    InvalidDirection(String),

    #[error("room already has the maximum of {max} doors", max = MAX_DOORS)]
    DoorLimit,

    #[error("a grid {0} cells across exceeds the limit of {max}", max = MAX_GRID_SPAN)]
    GridTooLarge(i64),

    #[error("room '{0}' not found")]
    UnknownRoom(String),

    #[error("room '{0}' has no grid")]
    NotAGridRoom(String),
}

/// Failure while reading a world description.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid world: {0}")]
    Invalid(String),

    #[error("build error: {0}")]
    Build(#[from] BuildError),
}

impl LoadError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        LoadError::Invalid(msg.into())
    }
}
