use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while building sheets and clips or driving playback.
#[derive(Debug, Error)]
pub enum AnimationError {
    /// A tile index lies outside the sheet grid.
    #[error("tile index {index} is out of range for a sheet of {tile_count} tiles")]
    OutOfRange {
        /// Offending index.
        index: usize,
        /// `rows * cols` of the sheet.
        tile_count: usize,
    },
    /// Update or query issued while no clip is active.
    #[error("no active clip; call switch() with a registered clip first")]
    NoActiveClip,
    /// A clip was created without any frames.
    #[error("clip '{name}' has no frames")]
    EmptyClip {
        /// Clip name.
        name: String,
    },
    /// A clip was created with an empty name.
    #[error("clip name must not be empty")]
    UnnamedClip,
    /// Grid or tile dimensions are zero.
    #[error("invalid spritesheet: {0}")]
    InvalidSheet(String),
    /// Manifest file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Manifest file is not valid JSON for the expected shape.
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        /// Manifest path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// Manifest parsed but describes something unusable.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
}
