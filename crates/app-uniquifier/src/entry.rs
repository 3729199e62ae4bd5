use std::path::{Path, PathBuf};

use app_logger::info;
use rand::Rng;

use crate::{
    batch::{prepare_output_folder, process_video, process_video_folder, BatchError, BatchResult},
    engine::MediaEngine,
    manifest::save_video_names,
};

/// Name of the output folder used when none is given.
pub const DEFAULT_OUTPUT_FOLDER: &str = "processed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub input_path: PathBuf,
    pub output_folder: Option<PathBuf>,
    pub manifest_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    File(PathBuf),
    Folder(PathBuf),
}

impl Target {
    /// Anything that is not an existing file is handled as a folder; a bad
    /// folder is only noticed once it is listed.
    #[must_use]
    pub fn resolve(input_path: &Path) -> Self {
        if input_path.is_file() {
            Self::File(input_path.into())
        } else {
            Self::Folder(input_path.into())
        }
    }

    /// `processed` in the working directory for a single file, or next to
    /// the input folder.
    #[must_use]
    pub fn default_output_folder(&self) -> PathBuf {
        match self {
            Self::File(_) => PathBuf::from(DEFAULT_OUTPUT_FOLDER),
            Self::Folder(folder) => folder.parent().map_or_else(
                || PathBuf::from(DEFAULT_OUTPUT_FOLDER),
                |parent| parent.join(DEFAULT_OUTPUT_FOLDER),
            ),
        }
    }
}

pub fn run<E, R>(engine: &E, rng: &mut R, options: &RunOptions) -> Result<BatchResult, BatchError>
where
    E: MediaEngine + ?Sized,
    R: Rng + ?Sized,
{
    let target = Target::resolve(&options.input_path);
    let output_folder = options
        .output_folder
        .clone()
        .unwrap_or_else(|| target.default_output_folder());

    match target {
        Target::File(video) => {
            process_single_video(engine, rng, &video, &output_folder, &options.manifest_path)
        }
        Target::Folder(folder) => {
            process_video_folder(engine, rng, &folder, &output_folder, &options.manifest_path)
        }
    }
}

pub fn process_single_video<E, R>(
    engine: &E,
    rng: &mut R,
    video: &Path,
    output_folder: &Path,
    manifest_path: &Path,
) -> Result<BatchResult, BatchError>
where
    E: MediaEngine + ?Sized,
    R: Rng + ?Sized,
{
    prepare_output_folder(output_folder)?;

    save_video_names(&[video], manifest_path);

    info!("Processing single file: {video:?}");

    let mut result = BatchResult::default();
    result.record(process_video(engine, rng, video, output_folder));

    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;
    use crate::testing::RecordingEngine;

    #[test]
    fn existing_file_is_a_single_target() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("clip.mp4");
        fs::write(&video, b"video").unwrap();

        assert_eq!(Target::resolve(&video), Target::File(video));
        assert_eq!(
            Target::resolve(dir.path()),
            Target::Folder(dir.path().into())
        );
        assert_eq!(
            Target::resolve(&dir.path().join("missing")),
            Target::Folder(dir.path().join("missing"))
        );
    }

    #[test]
    fn default_output_folders() {
        assert_eq!(
            Target::File("/videos/clip.mp4".into()).default_output_folder(),
            PathBuf::from("processed")
        );
        assert_eq!(
            Target::Folder("/home/user/videos".into()).default_output_folder(),
            PathBuf::from("/home/user/processed")
        );
        assert_eq!(
            Target::Folder("videos".into()).default_output_folder(),
            PathBuf::from("processed")
        );
        assert_eq!(
            Target::Folder("/".into()).default_output_folder(),
            PathBuf::from("processed")
        );
    }

    #[test]
    fn single_file_rerun_overwrites_manifest_and_output() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("clip.mp4");
        fs::write(&video, b"video").unwrap();
        let options = RunOptions {
            input_path: video.clone(),
            output_folder: Some(dir.path().join("out")),
            manifest_path: dir.path().join("video_names.txt"),
        };
        let output = dir.path().join("out").join("clip.mp4");
        let engine = RecordingEngine::default();
        let mut rng = ChaCha20Rng::seed_from_u64(11);

        let first = run(&engine, &mut rng, &options).unwrap();
        let first_output = fs::read_to_string(&output).unwrap();
        let second = run(&engine, &mut rng, &options).unwrap();
        let second_output = fs::read_to_string(&output).unwrap();

        assert_eq!(first.succeeded, 1);
        assert_eq!(second.succeeded, 1);
        assert_eq!(
            fs::read_to_string(&options.manifest_path).unwrap(),
            "clip\n"
        );
        assert_ne!(first_output, second_output);
        assert_eq!(engine.sources(), vec![video.clone(), video]);
    }

    #[test]
    fn single_file_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("broken.mp4");
        fs::write(&video, b"not a video").unwrap();
        let options = RunOptions {
            input_path: video,
            output_folder: Some(dir.path().join("out")),
            manifest_path: dir.path().join("video_names.txt"),
        };

        let result = run(
            &RecordingEngine::failing_for(["broken.mp4"]),
            &mut ChaCha20Rng::seed_from_u64(1),
            &options,
        )
        .unwrap();

        assert_eq!(result.attempted, 1);
        assert_eq!(result.succeeded, 0);
        assert_eq!(
            fs::read_to_string(&options.manifest_path).unwrap(),
            "broken\n"
        );
        assert!(dir.path().join("out").is_dir());
    }

    #[test]
    fn single_file_into_its_own_folder_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("clip.mp4");
        fs::write(&video, "ORIGINAL").unwrap();
        let options = RunOptions {
            input_path: video.clone(),
            output_folder: Some(dir.path().into()),
            manifest_path: dir.path().join("video_names.txt"),
        };
        let engine = RecordingEngine::default();

        let result = run(&engine, &mut ChaCha20Rng::seed_from_u64(1), &options).unwrap();

        assert_eq!(result.attempted, 1);
        assert_eq!(result.succeeded, 0);
        assert_eq!(fs::read_to_string(&video).unwrap(), "ORIGINAL");
        assert!(engine.calls().is_empty());
    }

    #[test]
    fn single_file_manifest_failure_does_not_stop_processing() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("clip.mp4");
        fs::write(&video, b"video").unwrap();
        let manifest = dir.path().join("missing").join("video_names.txt");
        let engine = RecordingEngine::default();

        let result = process_single_video(
            &engine,
            &mut ChaCha20Rng::seed_from_u64(1),
            &video,
            &dir.path().join("out"),
            &manifest,
        )
        .unwrap();

        assert_eq!(result.attempted, 1);
        assert_eq!(result.succeeded, 1);
        assert!(!manifest.exists());
        assert!(dir.path().join("out").join("clip.mp4").is_file());
    }

    #[test]
    fn folder_target_runs_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("videos");
        fs::create_dir(&input).unwrap();
        for name in ["a.mp4", "b.txt", "c.MOV"] {
            fs::write(input.join(name), b"video").unwrap();
        }
        let options = RunOptions {
            input_path: input,
            output_folder: None,
            manifest_path: dir.path().join("video_names.txt"),
        };

        let result = run(
            &RecordingEngine::default(),
            &mut ChaCha20Rng::seed_from_u64(1),
            &options,
        )
        .unwrap();

        assert_eq!(result.attempted, 2);
        assert_eq!(
            fs::read_to_string(&options.manifest_path).unwrap(),
            "a\nc\n"
        );
        assert!(dir.path().join("processed").join("a.mp4").is_file());
        assert!(dir.path().join("processed").join("c.MOV").is_file());
    }

    #[test]
    fn missing_input_surfaces_as_discovery_error() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions {
            input_path: dir.path().join("nowhere"),
            output_folder: Some(dir.path().join("out")),
            manifest_path: dir.path().join("video_names.txt"),
        };

        let result = run(
            &RecordingEngine::default(),
            &mut ChaCha20Rng::seed_from_u64(1),
            &options,
        );

        assert!(matches!(result, Err(BatchError::Discovery(_))));
    }
}
