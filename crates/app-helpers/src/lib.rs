pub mod dirs;
pub mod ffprobe;
pub mod id;
pub mod paths;
