use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
    process,
};

use app_helpers::{
    dirs::create_work_dir,
    ffprobe::{self, FfProbeResult},
};
use app_logger::{debug, trace};

use crate::{
    adjustments::AdjustmentSet,
    engine::{MediaEngine, TransformError},
};

/// Contrast is stretched around this level, with no luminance offset.
const CONTRAST_PIVOT: u8 = 127;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderSettings {
    pub video_codec: String,
    pub audio_codec: String,
    pub threads: u32,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            video_codec: "h264_nvenc".to_string(),
            audio_codec: "aac".to_string(),
            threads: 64,
        }
    }
}

/// [`MediaEngine`] backed by the `ffprobe` and `ffmpeg` executables.
#[derive(Debug, Clone)]
pub struct FfmpegEngine {
    ffmpeg_path: PathBuf,
    ffprobe_path: PathBuf,
    encoder: EncoderSettings,
    cache_dir: PathBuf,
}

impl FfmpegEngine {
    #[must_use]
    pub fn new<P, Q, C>(ffmpeg_path: P, ffprobe_path: Q, cache_dir: C) -> Self
    where
        P: Into<PathBuf>,
        Q: Into<PathBuf>,
        C: Into<PathBuf>,
    {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            ffprobe_path: ffprobe_path.into(),
            encoder: EncoderSettings::default(),
            cache_dir: cache_dir.into(),
        }
    }

    #[must_use]
    pub fn with_encoder(mut self, encoder: EncoderSettings) -> Self {
        self.encoder = encoder;
        self
    }

    fn load(&self, source: &Path) -> Result<LoadedMedia, TransformError> {
        if !source.is_file() {
            return Err(TransformError::load(source, "file does not exist"));
        }

        let info = ffprobe::ffprobe(&self.ffprobe_path, source)
            .map_err(|e| TransformError::load(source, e))?;

        Ok(LoadedMedia {
            path: source.into(),
            info,
        })
    }

    fn encode(
        &self,
        media: &LoadedMedia,
        filters: &FilterChains,
        destination: &Path,
    ) -> Result<(), TransformError> {
        let file_name = destination
            .file_name()
            .ok_or_else(|| TransformError::encode(destination, "destination has no file name"))?;

        let work_dir = create_work_dir(&self.cache_dir, "uniquify")
            .map_err(|e| TransformError::encode(destination, format!("no work directory: {e}")))?;
        defer! {
            trace!("Deleting {path:?}", path = work_dir);
            if let Err(e) = fs::remove_dir_all(&work_dir) {
                debug!("Failed to delete {work_dir:?}: {e:?}");
            }
        }
        let work_file = work_dir.join(file_name);

        let mut cmd = process::Command::new(&self.ffmpeg_path);
        let cmd = cmd.args(encode_args(&media.path, filters, &self.encoder, &work_file));
        debug!("Running `ffmpeg' command: {cmd:?}");

        let output = cmd
            .output()
            .map_err(|e| TransformError::encode(destination, format!("failed to run ffmpeg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            trace!("`ffmpeg' stderr: {stderr}");

            let message = format!("ffmpeg exited with {}: {stderr}", output.status);
            return Err(if mentions_filter(&stderr) {
                TransformError::filter(&media.path, message)
            } else {
                TransformError::encode(destination, message)
            });
        }

        if !work_file.is_file() {
            return Err(TransformError::encode(
                destination,
                "ffmpeg finished without writing an output file",
            ));
        }

        trace!("Copying {work_file:?} to {destination:?}");
        fs::copy(&work_file, destination).map_err(|e| {
            TransformError::encode(destination, format!("failed to copy {work_file:?}: {e}"))
        })?;

        Ok(())
    }
}

impl MediaEngine for FfmpegEngine {
    fn transform(
        &self,
        source: &Path,
        destination: &Path,
        adjustments: &AdjustmentSet,
    ) -> Result<(), TransformError> {
        let media = self.load(source)?;
        let filters = FilterChains::new(&media, adjustments)?;
        trace!("Filters for {source:?}: {filters:?}");

        self.encode(&media, &filters, destination)
    }
}

#[derive(Debug)]
struct LoadedMedia {
    path: PathBuf,
    info: FfProbeResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FilterChains {
    video: String,
    audio: Option<String>,
}

impl FilterChains {
    fn new(media: &LoadedMedia, adjustments: &AdjustmentSet) -> Result<Self, TransformError> {
        if !media.info.has_video() {
            return Err(TransformError::filter(&media.path, "no video stream to adjust"));
        }

        let factors = [
            adjustments.speed,
            adjustments.brightness,
            adjustments.contrast,
            adjustments.volume,
        ];
        if factors.iter().any(|x| !x.is_finite()) || adjustments.speed <= 0.0 {
            return Err(TransformError::filter(
                &media.path,
                format!("unusable adjustments: {adjustments:?}"),
            ));
        }

        Ok(Self {
            video: video_filter(adjustments),
            audio: media.info.has_audio().then(|| audio_filter(adjustments)),
        })
    }
}

fn video_filter(adjustments: &AdjustmentSet) -> String {
    let brightness = adjustments.brightness;
    let contrast = format!(
        "clip(val+{c:.6}*(val-{CONTRAST_PIVOT}),0,255)",
        c = adjustments.contrast
    );

    [
        format!("setpts=PTS/{:.6}", adjustments.speed),
        format!("colorchannelmixer=rr={brightness:.6}:gg={brightness:.6}:bb={brightness:.6}"),
        format!("lutrgb=r='{contrast}':g='{contrast}':b='{contrast}'"),
        "format=yuv420p".to_string(),
    ]
    .join(",")
}

fn audio_filter(adjustments: &AdjustmentSet) -> String {
    format!(
        "atempo={:.6},volume={:.6}",
        adjustments.speed, adjustments.volume
    )
}

fn encode_args(
    source: &Path,
    filters: &FilterChains,
    encoder: &EncoderSettings,
    output: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-y".into(),
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-i".into(),
        source.into(),
        "-filter:v".into(),
        filters.video.clone().into(),
    ];

    match &filters.audio {
        Some(audio) => {
            args.extend(["-filter:a".into(), audio.into()]);
        }
        None => args.push("-an".into()),
    }

    args.extend([
        "-c:v".into(),
        encoder.video_codec.clone().into(),
        "-threads".into(),
        encoder.threads.to_string().into(),
    ]);

    if filters.audio.is_some() {
        args.extend(["-c:a".into(), encoder.audio_codec.clone().into()]);
    }

    args.push(output.into());

    args
}

/// ffmpeg messages that are only printed when a filter cannot be set up.
const FILTER_FAILURE_MARKERS: &[&str] = &[
    "Error initializing filter",
    "Error initializing complex filters",
    "Error reinitializing filters",
    "No such filter",
    "Error applying option",
    "Failed to configure input pad",
    "Failed to configure output pad",
];

fn mentions_filter(stderr: &str) -> bool {
    FILTER_FAILURE_MARKERS
        .iter()
        .any(|marker| stderr.contains(marker))
}
