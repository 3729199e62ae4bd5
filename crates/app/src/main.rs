use std::process::exit;

use anyhow::anyhow;
use app_config::{Config, LogLevel, APPLICATION_NAME, CONFIG};
use app_logger::{error, trace, LevelFilter, LoggerConfig};
use app_uniquifier::{EncoderSettings, FfmpegEngine, RunOptions};

fn main() {
    let config: &Config = &CONFIG;

    let log_suffix = config
        .run
        .input_path
        .file_name()
        .map(|x| x.to_string_lossy().into_owned())
        .unwrap_or_default();

    if app_logger::init(
        LoggerConfig::builder()
            .program_name(APPLICATION_NAME)
            .name_suffix(&log_suffix)
            .stdout_log_level(level_filter(config.logging.log_level())),
    )
    .is_err()
    {
        eprintln!("Failed to initialize logger.");
        exit(1);
    }

    trace!("Config: {:?}", config);

    let engine = build_engine(config).unwrap_or_else(|e| {
        error!("{e}");
        exit(1);
    });

    let options = RunOptions {
        input_path: config.run.input_path.clone(),
        output_folder: config.run.output_folder.clone(),
        manifest_path: config.run.txt_file.clone(),
    };

    match app_uniquifier::run(&engine, &mut rand::thread_rng(), &options) {
        Ok(result) => {
            trace!("Run finished: {result:?}");
        }
        Err(e) => {
            error!("{e}");
            exit(1);
        }
    }
}

fn build_engine(config: &Config) -> anyhow::Result<FfmpegEngine> {
    let ffmpeg_path = config
        .dependencies
        .ffmpeg_path
        .clone()
        .ok_or_else(|| anyhow!("Failed to get `ffmpeg' path from configuration"))?;
    let ffprobe_path = config
        .dependencies
        .ffprobe_path
        .clone()
        .ok_or_else(|| anyhow!("Failed to get `ffprobe' path from configuration"))?;
    trace!("`ffmpeg' binary: {ffmpeg_path:?}, `ffprobe' binary: {ffprobe_path:?}");

    let encoder = EncoderSettings {
        video_codec: config.encoder.video_codec().to_string(),
        audio_codec: config.encoder.audio_codec().to_string(),
        threads: config.encoder.threads(),
    };

    Ok(FfmpegEngine::new(ffmpeg_path, ffprobe_path, config.cache_dir()).with_encoder(encoder))
}

const fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Off => LevelFilter::Off,
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}
