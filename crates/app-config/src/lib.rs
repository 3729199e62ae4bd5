use std::env;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use directories::ProjectDirs;
use file::FileConfiguration;
use lazy_static::lazy_static;
use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use which::which;

pub use crate::{
    cli::{CliArgs, DumpType, DEFAULT_MANIFEST_FILE},
    common::{
        EncoderConfig, LogLevel, LoggingConfig, ProgramPathConfig, DEFAULT_AUDIO_CODEC,
        DEFAULT_ENCODER_THREADS, DEFAULT_VIDEO_CODEC,
    },
};

mod cli;
mod common;
mod file;

pub static APPLICATION_NAME: &str = "video-uniquifier";
pub static ORGANIZATION_NAME: &str = "allypost";
pub static ORGANIZATION_QUALIFIER: &str = "net";

lazy_static! {
    pub static ref CONFIG: Config = Config::new();
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,

    #[serde(skip)]
    pub run: RunConfig,

    pub dependencies: ProgramPathConfig,

    pub encoder: EncoderConfig,

    pub logging: LoggingConfig,
}

impl Config {
    #[must_use]
    pub fn get_config_dir() -> Option<PathBuf> {
        Self::get_project_dir().map(|x| x.config_dir().into())
    }

    #[must_use]
    pub fn get_cache_dir() -> PathBuf {
        Self::get_project_dir().map_or_else(
            || env::temp_dir().join(APPLICATION_NAME),
            |x| x.cache_dir().into(),
        )
    }

    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        Self::get_cache_dir()
    }

    fn get_project_dir() -> Option<ProjectDirs> {
        ProjectDirs::from(ORGANIZATION_QUALIFIER, ORGANIZATION_NAME, APPLICATION_NAME)
    }

    fn new() -> Self {
        let args = CliArgs::parse();

        let config = match Self::from_args(&args) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Invalid configuration: {e:#}");
                std::process::exit(1);
            }
        };

        if let Some(dump_type) = &args.app.dump_config {
            let dumped = match dump_type.clone().unwrap_or(DumpType::Toml) {
                DumpType::Toml => toml::to_string_pretty(&config).map_err(|e| anyhow!(e)),
                DumpType::Json => serde_json::to_string_pretty(&config).map_err(|e| anyhow!(e)),
            };

            match dumped {
                Ok(dumped) => println!("{dumped}"),
                Err(e) => {
                    eprintln!("Failed to dump configuration: {e}");
                    std::process::exit(1);
                }
            }
            std::process::exit(0);
        }

        config
    }

    /// Builds the configuration from parsed arguments, layered over the
    /// config file and resolved against `$PATH`.
    pub fn from_args(args: &CliArgs) -> anyhow::Result<Self> {
        let mut config = Self::default();
        let (config_path, file_config) = FileConfiguration::new(args.app.config_path.as_deref())?;
        config.app.config_path = config_path;

        config.merge_file_config(&file_config);
        config.merge_args(args);

        {
            if config.dependencies.ffmpeg_path.is_none() {
                config.dependencies.ffmpeg_path =
                    Some(which("ffmpeg").map_err(|e| anyhow!("ffmpeg not found: {}", e))?);
            }

            if config.dependencies.ffprobe_path.is_none() {
                config.dependencies.ffprobe_path =
                    Some(which("ffprobe").map_err(|e| anyhow!("ffprobe not found: {}", e))?);
            }
        }

        if !config.run.input_path.as_os_str().is_empty() {
            config.run.input_path = config
                .run
                .input_path
                .try_resolve()
                .map_err(|e| anyhow!("Failed to resolve {:?}: {}", config.run.input_path, e))?
                .into();
        }

        Ok(config)
    }

    fn merge_args(&mut self, args: &CliArgs) -> &Self {
        args.merge_into_config(self);

        self
    }

    fn merge_file_config(&mut self, file_config: &FileConfiguration) -> &Self {
        file_config.merge_into_config(self);

        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub config_path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub output_folder: Option<PathBuf>,
    pub txt_file: PathBuf,
}

impl EncoderConfig {
    #[must_use]
    pub fn video_codec(&self) -> &str {
        self.video_codec.as_deref().unwrap_or(DEFAULT_VIDEO_CODEC)
    }

    #[must_use]
    pub fn audio_codec(&self) -> &str {
        self.audio_codec.as_deref().unwrap_or(DEFAULT_AUDIO_CODEC)
    }

    #[must_use]
    pub fn threads(&self) -> u32 {
        self.threads.unwrap_or(DEFAULT_ENCODER_THREADS)
    }
}

impl LoggingConfig {
    #[must_use]
    pub fn log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }
}
