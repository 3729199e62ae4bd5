use std::{
    path::{Path, PathBuf},
    process,
};

use app_logger::{debug, trace};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FfProbeResult {
    #[serde(default)]
    pub streams: Vec<Stream>,
    #[serde(default)]
    pub format: Format,
}

impl FfProbeResult {
    #[must_use]
    pub fn stream_of_type(&self, codec_type: &str) -> Option<&Stream> {
        self.streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some(codec_type))
    }

    #[must_use]
    pub fn has_video(&self) -> bool {
        self.stream_of_type("video").is_some()
    }

    #[must_use]
    pub fn has_audio(&self) -> bool {
        self.stream_of_type("audio").is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Stream {
    pub codec_type: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Format {
    #[serde(default)]
    pub filename: String,
}

#[derive(Debug, Error)]
pub enum FfProbeError {
    #[error("failed to run ffprobe: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("ffprobe exited with {status}: {stderr}")]
    Status {
        status: process::ExitStatus,
        stderr: String,
    },
    #[error("failed to parse ffprobe output: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Runs `ffprobe` on `file_path` and parses its stream and format listing.
pub fn ffprobe<P: AsRef<Path>>(
    ffprobe_path: &Path,
    file_path: P,
) -> Result<FfProbeResult, FfProbeError> {
    let file_path: PathBuf = file_path.as_ref().into();

    let mut cmd = process::Command::new(ffprobe_path);
    let cmd = cmd
        .args(["-v", "error"])
        .args(["-print_format", "json"])
        .arg("-show_streams")
        .arg("-show_format")
        .arg(&file_path);
    debug!("Running `ffprobe' command: {cmd:?}");

    let output = cmd.output().map_err(FfProbeError::Spawn)?;

    if !output.status.success() {
        return Err(FfProbeError::Status {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let res = parse(&output.stdout)?;
    trace!("ffprobe result for {file_path:?}: {res:?}");

    Ok(res)
}

pub fn parse(stdout: &[u8]) -> Result<FfProbeResult, FfProbeError> {
    serde_json::from_slice(stdout).map_err(FfProbeError::Parse)
}
