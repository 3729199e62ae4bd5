use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

use crate::{
    common::{EncoderConfig, LoggingConfig, ProgramPathConfig},
    Config,
};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FileConfiguration {
    pub dependencies: Option<ProgramPathConfig>,

    pub encoder: Option<EncoderConfig>,

    pub logging: Option<LoggingConfig>,
}

impl FileConfiguration {
    pub(crate) fn new(config_path: Option<&Path>) -> anyhow::Result<(PathBuf, Self)> {
        let config_path = match config_path {
            Some(config_path) if !Self::is_default_config_path(config_path) => config_path.into(),
            _ => Self::create_default_config_file()?,
        };

        let config = Self::load_from_file(&config_path)?;

        Ok((config_path, config))
    }

    pub(crate) fn merge_into_config(&self, config: &mut Config) {
        if let Some(dependencies) = &self.dependencies {
            if let Some(ffmpeg_path) = &dependencies.ffmpeg_path {
                eprintln!("Found ffmpeg path from config file: {ffmpeg_path:?}");
            }

            if let Some(ffprobe_path) = &dependencies.ffprobe_path {
                eprintln!("Found ffprobe path from config file: {ffprobe_path:?}");
            }

            config.dependencies.merge(dependencies);
        }

        if let Some(encoder) = &self.encoder {
            config.encoder.merge(encoder);
        }

        if let Some(logging) = &self.logging {
            config.logging.merge(logging);
        }
    }

    pub(crate) fn load_from_file<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let p = path.as_ref();

        if !p.is_file() {
            anyhow::bail!("Config file {:?} does not exist or is not a file", &p);
        }

        let config_file =
            fs::read_to_string(p).with_context(|| format!("Failed to read config file {p:?}"))?;

        toml::from_str::<Self>(&config_file)
            .map_err(|e| anyhow!("Error parsing config file {p:?}: {e}"))
    }

    fn create_default_config_file() -> anyhow::Result<PathBuf> {
        let file = Self::default_config_path().ok_or_else(|| {
            anyhow!(
                "Failed to get config directory. Please pass a config file with --config-path \
                 or the VIDEO_UNIQUIFIER_CONFIG environment variable"
            )
        })?;

        let config_dir: PathBuf = file
            .parent()
            .ok_or_else(|| {
                anyhow!(
                    "Failed to get parent directory of config file. Is the config file in root?"
                )
            })?
            .into();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        if !file.exists() {
            eprintln!("Config file not found. Creating one at {file:?}");
            fs::write(&file, include_bytes!("./config.toml"))
                .with_context(|| format!("Failed to create config file {file:?}"))?;
        }

        Ok(file)
    }

    fn default_config_path() -> Option<PathBuf> {
        Config::get_config_dir().map(|x| x.join("config.toml"))
    }

    fn is_default_config_path<P>(path: P) -> bool
    where
        P: AsRef<Path>,
    {
        let p = path.as_ref().as_os_str();

        p.is_empty()
            || Self::default_config_path().map_or(false, |default| p == default.as_os_str())
    }
}
