use std::path::Path;

use app_helpers::paths::display_file_name;
use app_logger::{error, info};
use rand::Rng;

use crate::{
    adjustments::AdjustmentSet,
    engine::{MediaEngine, TransformError},
};

/// The adjustments that were applied, or why the file could not be processed.
pub type TransformOutcome = Result<AdjustmentSet, TransformError>;

/// Draws a fresh [`AdjustmentSet`] for `source`, reports it and has `engine`
/// write the adjusted copy to `destination`.
///
/// Failures are logged here with the file name; the caller only has to
/// decide whether the outcome counts as a success.
pub fn adjust_video<E, R>(
    engine: &E,
    rng: &mut R,
    source: &Path,
    destination: &Path,
) -> TransformOutcome
where
    E: MediaEngine + ?Sized,
    R: Rng + ?Sized,
{
    let adjustments = AdjustmentSet::random(rng);
    let name = display_file_name(source);

    info!("Generated parameters for {name}:");
    info!("  speed: +{:.0}%", adjustments.speed_percent());
    info!("  brightness: +{:.0}%", adjustments.brightness_percent());
    info!("  contrast: +{:.0}%", adjustments.contrast_percent());
    info!("  volume: +{:.0}%", adjustments.volume_percent());

    match engine.transform(source, destination, &adjustments) {
        Ok(()) => {
            info!("Saved {name} to {destination:?}");
            Ok(adjustments)
        }
        Err(e) => {
            error!("Error while processing video {name}: {e}");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;
    use crate::testing::RecordingEngine;

    #[test]
    fn applies_generated_adjustments() {
        let engine = RecordingEngine::default();
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("clip.mp4");

        let outcome = adjust_video(
            &engine,
            &mut ChaCha20Rng::seed_from_u64(1),
            Path::new("in/clip.mp4"),
            &destination,
        );

        let applied = outcome.unwrap();
        assert!(applied.is_in_range());
        assert_eq!(
            engine.calls(),
            vec![(PathBuf::from("in/clip.mp4"), destination.clone(), applied)]
        );
        assert!(destination.is_file());
    }

    #[test]
    fn engine_failures_become_the_outcome() {
        let engine = RecordingEngine::failing_for(["broken.mp4"]);
        let dir = tempfile::tempdir().unwrap();

        let outcome = adjust_video(
            &engine,
            &mut ChaCha20Rng::seed_from_u64(1),
            Path::new("in/broken.mp4"),
            &dir.path().join("broken.mp4"),
        );

        assert!(matches!(outcome, Err(TransformError::Load { .. })));
    }

    #[test]
    fn each_call_draws_new_adjustments() {
        let engine = RecordingEngine::default();
        let dir = tempfile::tempdir().unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(9);

        let first = adjust_video(&engine, &mut rng, Path::new("a.mp4"), &dir.path().join("a.mp4"));
        let second = adjust_video(&engine, &mut rng, Path::new("a.mp4"), &dir.path().join("a.mp4"));

        assert_ne!(first.unwrap(), second.unwrap());
    }
}
