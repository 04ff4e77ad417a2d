//! Error type shared by clip decoding, catalog loading and the player.

use std::io;

use thiserror::Error;

/// Errors produced while loading, fetching or selecting motion clips.
#[derive(Debug, Error)]
pub enum ClipError {
    /// Buffer length is not a whole number of frames.
    #[error("malformed clip: {len} bytes is not a multiple of the {stride}-byte frame stride")]
    MalformedClip { len: usize, stride: usize },
    #[error("clip contains no frames")]
    EmptyClip,
    #[error("unknown clip family '{0}'")]
    UnknownFamily(String),
    #[error("unknown clip '{0}'")]
    UnknownClip(String),
    #[error("failed to fetch clip at {path}: {source}")]
    Fetch {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("catalog error: {0}")]
    Catalog(String),
}
