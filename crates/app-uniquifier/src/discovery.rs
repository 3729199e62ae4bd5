use std::{
    fs, io,
    path::{Path, PathBuf},
};

use app_helpers::paths::has_extension_in;
use app_logger::trace;
use thiserror::Error;

/// Extensions recognised as videos, compared without regard to case.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "wmv", "flv"];

#[derive(Debug, Error)]
#[error("failed to list videos in {path:?}: {source}")]
pub struct DiscoveryError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

#[must_use]
pub fn is_video_file(path: &Path) -> bool {
    path.is_file() && has_extension_in(path, VIDEO_EXTENSIONS)
}

/// Lists the video files directly inside `dir`, sorted by file name.
///
/// Sub-directories are not descended into.
pub fn discover_media_files(dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let wrap = |source| DiscoveryError {
        path: dir.into(),
        source,
    };

    let mut videos = Vec::new();
    for entry in fs::read_dir(dir).map_err(wrap)? {
        let path = entry.map_err(wrap)?.path();

        if is_video_file(&path) {
            videos.push(path);
        } else {
            trace!("Skipping {path:?}");
        }
    }

    videos.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(videos)
}
