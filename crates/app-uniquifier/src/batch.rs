use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use app_helpers::{dirs::ensure_dir, paths::display_file_name};
use app_logger::{error, info};
use rand::Rng;
use thiserror::Error;

use crate::{
    discovery::{discover_media_files, DiscoveryError},
    engine::MediaEngine,
    manifest::save_video_names,
    transform::adjust_video,
};

/// How many of the attempted videos were processed successfully.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub attempted: usize,
    pub succeeded: usize,
}

impl BatchResult {
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }

    pub(crate) fn record(&mut self, success: bool) {
        self.attempted += 1;
        if success {
            self.succeeded += 1;
        }
    }
}

impl fmt::Display for BatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "successfully processed {} of {} files",
            self.succeeded, self.attempted
        )
    }
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to create output folder {path:?}: {source}")]
    OutputFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

/// Creates `output_folder` when missing and reports it.
pub fn prepare_output_folder(output_folder: &Path) -> Result<(), BatchError> {
    let created = ensure_dir(output_folder).map_err(|source| BatchError::OutputFolder {
        path: output_folder.into(),
        source,
    })?;

    if created {
        info!("Created output folder: {output_folder:?}");
    }

    Ok(())
}

/// Path of the processed copy of `source`: same file name, inside `output_folder`.
#[must_use]
pub fn output_path_for(source: &Path, output_folder: &Path) -> PathBuf {
    source
        .file_name()
        .map_or_else(|| output_folder.join(source), |name| output_folder.join(name))
}

/// Whether writing to `destination` would replace `source` itself.
///
/// Both paths are compared after resolving links and relative parts; the
/// output folder must already exist.
#[must_use]
pub fn is_same_file(source: &Path, destination: &Path) -> bool {
    let resolved_destination = match (destination.parent(), destination.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            fs::canonicalize(parent).map(|parent| parent.join(name))
        }
        _ => fs::canonicalize(destination),
    };

    match (fs::canonicalize(source), resolved_destination) {
        (Ok(source), Ok(destination)) => source == destination,
        _ => false,
    }
}

/// Writes the adjusted copy of `video` into `output_folder`.
///
/// A video that would be written over itself is refused and counts as failed.
pub(crate) fn process_video<E, R>(
    engine: &E,
    rng: &mut R,
    video: &Path,
    output_folder: &Path,
) -> bool
where
    E: MediaEngine + ?Sized,
    R: Rng + ?Sized,
{
    let destination = output_path_for(video, output_folder);

    if is_same_file(video, &destination) {
        error!(
            "Refusing to process {}: the output would overwrite the input file",
            display_file_name(video)
        );
        return false;
    }

    adjust_video(engine, rng, video, &destination).is_ok()
}

/// Processes every video directly inside `input_folder`, one at a time.
///
/// The manifest is written once, before any video is touched, and lists
/// every discovered video whether or not it ends up processed. A video that
/// fails is skipped. Only a missing output folder or an unreadable input
/// folder stop the batch.
pub fn process_video_folder<E, R>(
    engine: &E,
    rng: &mut R,
    input_folder: &Path,
    output_folder: &Path,
    manifest_path: &Path,
) -> Result<BatchResult, BatchError>
where
    E: MediaEngine + ?Sized,
    R: Rng + ?Sized,
{
    prepare_output_folder(output_folder)?;

    let videos = discover_media_files(input_folder)?;

    if videos.is_empty() {
        info!("No video files found in {input_folder:?}");
        return Ok(BatchResult::default());
    }

    info!("Found {} video files to process", videos.len());

    save_video_names(&videos, manifest_path);

    let mut result = BatchResult::default();
    for video in &videos {
        info!("");
        info!("Processing file: {}", display_file_name(video));
        result.record(process_video(engine, rng, video, output_folder));
    }

    info!("");
    info!("Processing finished: {result}.");

    Ok(result)
}
