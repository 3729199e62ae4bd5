use std::{ffi::OsStr, path::Path};

/// File name without its directory and extension.
///
/// `videos/clip.final.mp4` becomes `clip.final`.
#[must_use]
pub fn base_name(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

/// The file name of `path` for messages, or the whole path when it has none.
#[must_use]
pub fn display_file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Whether the extension of `path` is one of `extensions`, ignoring case.
///
/// `extensions` are given without the leading dot.
#[must_use]
pub fn has_extension_in(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map_or(false, |extension| {
            extensions
                .iter()
                .any(|wanted| extension.eq_ignore_ascii_case(wanted))
        })
}
