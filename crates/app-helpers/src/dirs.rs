use std::{
    fs, io,
    path::{Path, PathBuf},
};

use app_logger::trace;

use crate::id::time_thread_id;

/// Creates a fresh, uniquely named directory under `base`.
///
/// The caller owns the directory and is responsible for removing it.
pub fn create_work_dir<P: AsRef<Path>>(base: P, prefix: &str) -> io::Result<PathBuf> {
    let work_dir = base
        .as_ref()
        .join(format!("{prefix}-{id}", id = time_thread_id()));

    trace!("Creating work directory {work_dir:?}");
    fs::create_dir_all(&work_dir)?;

    Ok(work_dir)
}

/// Creates `dir` (and parents) when it does not exist yet.
///
/// Returns `true` when the directory had to be created.
pub fn ensure_dir<P: AsRef<Path>>(dir: P) -> io::Result<bool> {
    let dir = dir.as_ref();

    if dir.is_dir() {
        return Ok(false);
    }

    fs::create_dir_all(dir)?;

    Ok(true)
}
