use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use app_helpers::paths::base_name;
use app_logger::{error, info};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to write video names to {path:?}: {source}")]
pub struct ManifestError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

/// Writes the base name of every video, one per line and in the given
/// order, replacing whatever `destination` held before.
pub fn write_manifest<P: AsRef<Path>>(
    videos: &[P],
    destination: &Path,
) -> Result<(), ManifestError> {
    let wrap = |source| ManifestError {
        path: destination.into(),
        source,
    };

    let mut out = BufWriter::new(fs::File::create(destination).map_err(wrap)?);
    for video in videos {
        let name = base_name(video.as_ref()).unwrap_or_default();
        writeln!(out, "{name}").map_err(wrap)?;
    }
    out.flush().map_err(wrap)?;

    Ok(())
}

/// [`write_manifest`], logging the result instead of returning the error.
pub fn save_video_names<P: AsRef<Path>>(videos: &[P], destination: &Path) -> bool {
    match write_manifest(videos, destination) {
        Ok(()) => {
            info!("Video names saved to {destination:?}");
            true
        }
        Err(e) => {
            error!("Error while saving video names: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_base_name_per_line_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("video_names.txt");

        write_manifest(
            &["in/b.mp4", "in/a.final.MOV", "/abs/путь/видео.mkv"],
            &manifest,
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&manifest).unwrap(),
            "b\na.final\nвидео\n"
        );
    }

    #[test]
    fn existing_manifest_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("video_names.txt");
        fs::write(&manifest, "old\nlines\nhere\n").unwrap();

        write_manifest(&["clip.mp4"], &manifest).unwrap();

        assert_eq!(fs::read_to_string(&manifest).unwrap(), "clip\n");
    }

    #[test]
    fn unwritable_destination_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("missing").join("video_names.txt");

        assert!(write_manifest(&["clip.mp4"], &manifest).is_err());
        assert!(!save_video_names(&["clip.mp4"], &manifest));
    }
}
