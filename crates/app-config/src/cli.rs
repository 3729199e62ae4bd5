use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum, ValueHint};
use serde::{Deserialize, Serialize};

use crate::{
    common::{EncoderConfig, LoggingConfig, ProgramPathConfig},
    Config,
};

pub const DEFAULT_MANIFEST_FILE: &str = "video_names.txt";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(
    name = "video-uniquifier",
    version,
    about = "Make videos unique by slightly changing their speed, brightness, contrast and volume."
)]
pub struct CliArgs {
    #[command(flatten)]
    pub app: AppArgs,

    #[command(flatten, next_help_heading = Some("Program paths"))]
    pub paths: ProgramPathConfig,

    #[command(flatten, next_help_heading = Some("Encoder config"))]
    pub encoder: EncoderConfig,

    #[command(flatten, next_help_heading = Some("Logging config"))]
    pub logging: LoggingConfig,
}

impl CliArgs {
    pub(crate) fn merge_into_config(&self, config: &mut Config) {
        if let Some(ffmpeg_path) = &self.paths.ffmpeg_path {
            eprintln!(
                "Found ffmpeg path from arguments: {:?}",
                ffmpeg_path.display()
            );
        }

        if let Some(ffprobe_path) = &self.paths.ffprobe_path {
            eprintln!(
                "Found ffprobe path from arguments: {:?}",
                ffprobe_path.display()
            );
        }

        config.dependencies.merge(&self.paths);
        config.encoder.merge(&self.encoder);
        config.logging.merge(&self.logging);

        if let Some(input_path) = &self.app.input_path {
            config.run.input_path = input_path.into();
        }
        config.run.output_folder = self.app.output_folder.clone();
        config.run.txt_file = self.app.txt_file.clone();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ValueEnum)]
pub enum DumpType {
    Toml,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct AppArgs {
    #[arg(required_unless_present = "dump_config", value_hint = ValueHint::AnyPath)]
    /// Path to a folder with video files or to a single video file.
    pub input_path: Option<PathBuf>,

    #[arg(long = "output_folder", visible_alias = "output-folder", default_value = None, value_hint = ValueHint::DirPath)]
    /// Folder for the processed videos.
    ///
    /// Defaults to a `processed' folder in the current directory for a single
    /// file, or next to the input folder for a folder of videos.
    pub output_folder: Option<PathBuf>,

    #[arg(long = "txt_file", visible_alias = "txt-file", default_value = DEFAULT_MANIFEST_FILE, value_hint = ValueHint::FilePath)]
    /// Text file the names of the found videos are written to.
    pub txt_file: PathBuf,

    #[arg(short='c', long, default_value = None, env = "VIDEO_UNIQUIFIER_CONFIG", value_hint = ValueHint::FilePath)]
    /// Location of the configuration file.
    ///
    /// By default should be in the os-appropriate config directory
    /// under the name `video-uniquifier/config.toml`
    pub config_path: Option<PathBuf>,

    #[arg(long, ignore_case = true, value_name = "FORMAT")]
    /// Dump the configuration to stdout and exit.
    ///
    /// Useful for debugging.
    /// When dumped with the `toml` format, can be used as a config file.
    #[allow(clippy::option_option)]
    pub dump_config: Option<Option<DumpType>>,
}
