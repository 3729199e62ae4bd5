#[macro_use(defer)]
extern crate scopeguard;

pub mod adjustments;
pub mod batch;
pub mod discovery;
pub mod engine;
pub mod entry;
pub mod ffmpeg;
pub mod manifest;
pub mod transform;

#[cfg(test)]
mod testing;

pub use adjustments::AdjustmentSet;
pub use batch::{process_video_folder, BatchError, BatchResult};
pub use engine::{MediaEngine, TransformError};
pub use entry::{run, RunOptions, Target};
pub use ffmpeg::{EncoderSettings, FfmpegEngine};
