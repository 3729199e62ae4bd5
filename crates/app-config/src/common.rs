use std::path::PathBuf;

use clap::{Args, ValueEnum, ValueHint};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Args)]
#[allow(clippy::struct_field_names)]
pub struct ProgramPathConfig {
    #[arg(long, default_value = None, env = "VIDEO_UNIQUIFIER_FFMPEG", value_hint = ValueHint::FilePath)]
    /// Path to the ffmpeg executable.
    ///
    /// If not provided, ffmpeg will be searched for in $PATH
    pub ffmpeg_path: Option<PathBuf>,

    #[arg(long, default_value = None, env = "VIDEO_UNIQUIFIER_FFPROBE", value_hint = ValueHint::FilePath)]
    /// Path to the ffprobe executable.
    ///
    /// If not provided, ffprobe will be searched for in $PATH
    pub ffprobe_path: Option<PathBuf>,
}
impl ProgramPathConfig {
    pub(crate) fn merge(&mut self, config: &Self) -> &Self {
        if let Some(ffmpeg_path) = config.ffmpeg_path.as_ref() {
            self.ffmpeg_path = Some(ffmpeg_path.clone());
        }

        if let Some(ffprobe_path) = config.ffprobe_path.as_ref() {
            self.ffprobe_path = Some(ffprobe_path.clone());
        }

        self
    }
}

pub const DEFAULT_VIDEO_CODEC: &str = "h264_nvenc";
pub const DEFAULT_AUDIO_CODEC: &str = "aac";
pub const DEFAULT_ENCODER_THREADS: u32 = 64;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Args)]
pub struct EncoderConfig {
    #[arg(long, default_value = None, value_name = "CODEC")]
    /// The ffmpeg video encoder used for the output files.
    ///
    /// Defaults to the hardware accelerated `h264_nvenc'
    pub video_codec: Option<String>,

    #[arg(long, default_value = None, value_name = "CODEC")]
    /// The ffmpeg audio encoder used when the input has an audio track.
    ///
    /// Defaults to `aac'
    pub audio_codec: Option<String>,

    #[arg(long, default_value = None, value_name = "COUNT")]
    /// Number of threads the encoder may use.
    ///
    /// Defaults to 64
    pub threads: Option<u32>,
}
impl EncoderConfig {
    pub(crate) fn merge(&mut self, config: &Self) -> &Self {
        if let Some(video_codec) = config.video_codec.as_ref() {
            self.video_codec = Some(video_codec.clone());
        }

        if let Some(audio_codec) = config.audio_codec.as_ref() {
            self.audio_codec = Some(audio_codec.clone());
        }

        if let Some(threads) = config.threads {
            self.threads = Some(threads);
        }

        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Args)]
pub struct LoggingConfig {
    #[arg(long, ignore_case = true, default_value = None, env = "VIDEO_UNIQUIFIER_LOG_LEVEL")]
    /// How much progress information to print.
    pub log_level: Option<LogLevel>,
}
impl LoggingConfig {
    pub(crate) fn merge(&mut self, config: &Self) -> &Self {
        if let Some(log_level) = config.log_level {
            self.log_level = Some(log_level);
        }

        self
    }
}
