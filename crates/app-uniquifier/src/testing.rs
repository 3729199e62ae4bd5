use std::{
    cell::RefCell,
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    adjustments::AdjustmentSet,
    engine::{MediaEngine, TransformError},
};

type Call = (PathBuf, PathBuf, AdjustmentSet);

/// Writes the adjustments as the "video" and remembers every call.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    failing: HashSet<String>,
    calls: RefCell<Vec<Call>>,
}

impl RecordingEngine {
    /// Sources with one of these file names fail to load.
    pub fn failing_for<I, S>(file_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            failing: file_names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn sources(&self) -> Vec<PathBuf> {
        self.calls.borrow().iter().map(|(s, _, _)| s.clone()).collect()
    }
}

impl MediaEngine for RecordingEngine {
    fn transform(
        &self,
        source: &Path,
        destination: &Path,
        adjustments: &AdjustmentSet,
    ) -> Result<(), TransformError> {
        self.calls
            .borrow_mut()
            .push((source.into(), destination.into(), *adjustments));

        let file_name = source
            .file_name()
            .map(|x| x.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.failing.contains(&file_name) {
            return Err(TransformError::load(source, "unreadable media"));
        }

        fs::write(destination, adjustments.to_string())
            .map_err(|e| TransformError::encode(destination, e))
    }
}
