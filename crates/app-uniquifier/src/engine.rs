use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::adjustments::AdjustmentSet;

/// Anything that can turn a source video into an adjusted copy.
///
/// Implementations load `source`, apply the speed, brightness and contrast
/// adjustments to the video (and speed and volume to the audio track, when
/// there is one), and write the result to `destination`, replacing any file
/// already there. Resources acquired for a file are released before
/// returning, whatever the outcome.
pub trait MediaEngine {
    fn transform(
        &self,
        source: &Path,
        destination: &Path,
        adjustments: &AdjustmentSet,
    ) -> Result<(), TransformError>;
}

#[derive(Debug, Error)]
pub enum TransformError {
    /// The source is missing or could not be inspected by ffprobe.
    #[error("failed to load {path:?}: {message}")]
    Load { path: PathBuf, message: String },
    /// The adjustments cannot be applied to this media, or ffmpeg reported
    /// that setting up one of the filters failed.
    #[error("failed to apply adjustments to {path:?}: {message}")]
    Filter { path: PathBuf, message: String },
    /// Any other failure while encoding or writing the destination.
    #[error("failed to encode {path:?}: {message}")]
    Encode { path: PathBuf, message: String },
}

impl TransformError {
    pub fn load<P: Into<PathBuf>, M: ToString>(path: P, message: M) -> Self {
        Self::Load {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn filter<P: Into<PathBuf>, M: ToString>(path: P, message: M) -> Self {
        Self::Filter {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn encode<P: Into<PathBuf>, M: ToString>(path: P, message: M) -> Self {
        Self::Encode {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
