//! Error types for the orchestration core.
//!
//! Playback rejection is not an `Error`: a blocked `play()` is an
//! expected outcome handled by [`crate::MusicPlayer`].

use crate::cms::CmsError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A track needs at least one control point.
    #[error("track has no control points")]
    EmptyTrack,

    #[error("control point progress must be finite, got {0}")]
    NonFiniteProgress(f32),

    #[error("control points must be sorted by progress ({prev} > {next})")]
    UnsortedControlPoints { prev: f32, next: f32 },

    #[error("scroll range for '{element}' must satisfy 0 <= start < end <= 1 (got {start}..{end})")]
    InvalidRange {
        element: String,
        start: f32,
        end: f32,
    },

    #[error("cadence needs at least one {0}")]
    EmptySequence(&'static str),

    #[error("section '{0}' is already mounted")]
    DuplicateSection(String),

    #[error("invalid inset '{0}'")]
    InvalidInset(String),

    #[error("config: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error(transparent)]
    Cms(#[from] CmsError),
}
