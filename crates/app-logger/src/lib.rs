use std::{env, fs, path::PathBuf};

pub use log::{debug, error, info, trace, warn, LevelFilter};
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        file::FileAppender,
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};
use sanitize_filename::sanitize_with_options;

/// Progress lines are user facing, so stdout only carries the message.
const STDOUT_PATTERN: &str = "{m}{n}";
const FILE_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:<5} {t} - {m}{n}";

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggerConfigBuilder<'a> {
    config: LoggerConfig<'a>,
}

impl<'a> LoggerConfigBuilder<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name_suffix(mut self, name_suffix: &'a str) -> Self {
        self.config.name_suffix = Some(name_suffix);
        self
    }

    #[must_use]
    pub fn program_name(mut self, program_name: &'a str) -> Self {
        self.config.program_name = Some(program_name);
        self
    }

    #[must_use]
    pub fn stdout_log_level(mut self, log_level: LevelFilter) -> Self {
        self.config.stdout_log_level = Some(log_level);
        self
    }

    #[must_use]
    pub fn build(self) -> LoggerConfig<'a> {
        self.config
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggerConfig<'a> {
    pub(crate) name_suffix: Option<&'a str>,
    pub(crate) program_name: Option<&'a str>,
    pub(crate) stdout_log_level: Option<LevelFilter>,
}

impl<'a> From<LoggerConfigBuilder<'a>> for LoggerConfig<'a> {
    fn from(builder: LoggerConfigBuilder<'a>) -> Self {
        builder.build()
    }
}

impl LoggerConfig<'_> {
    #[must_use]
    pub fn builder() -> LoggerConfigBuilder<'static> {
        LoggerConfigBuilder::new()
    }
}

/// Installs the global logger: plain progress lines on stdout and a
/// timestamped log file in the temp directory.
pub fn init<'a, T: Into<LoggerConfig<'a>>>(cfg: T) -> anyhow::Result<log4rs::Handle> {
    let cfg: LoggerConfig = cfg.into();

    let log_file = log_file_path(&cfg);
    fs::create_dir_all(log_file.parent().ok_or_else(|| {
        anyhow::anyhow!(
            "Failed to get parent directory of log file path: {:?}",
            &log_file
        )
    })?)?;

    let config = Config::builder();
    let config = {
        let log = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
            .build(&log_file)?;
        config.appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(FILE_LOG_LEVEL)))
                .build("logfile", Box::new(log)),
        )
    };
    let config = {
        let stdout = ConsoleAppender::builder()
            .target(Target::Stdout)
            .encoder(Box::new(PatternEncoder::new(STDOUT_PATTERN)))
            .build();
        let log_level = cfg.stdout_log_level.unwrap_or(LevelFilter::Info);
        config.appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("stdout", Box::new(stdout)),
        )
    };
    let config = config.build(
        Root::builder()
            .appender("logfile")
            .appender("stdout")
            .build(LevelFilter::Trace),
    )?;

    let handle = log4rs::init_config(config)?;

    debug!("Logging to {:?}", &log_file);

    Ok(handle)
}

fn log_file_path(config: &LoggerConfig) -> PathBuf {
    env::temp_dir().join(log_file_name(config))
}

fn log_file_name(config: &LoggerConfig) -> String {
    let program_name = config
        .program_name
        .map_or_else(|| env!("CARGO_PKG_NAME").to_string(), ToString::to_string);

    let mut file_name = program_name;

    if let Some(suffix) = config.name_suffix {
        file_name = format!("{file_name}_{suffix}");
    }

    file_name = format!("{file_name}.log");

    sanitize_with_options(
        file_name,
        sanitize_filename::Options {
            truncate: true,
            replacement: "^",
            ..Default::default()
        },
    )
}
