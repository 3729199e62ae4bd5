use std::{fmt, ops::RangeInclusive};

use rand::Rng;

/// Multipliers for speed, brightness and volume are drawn from `(1.01, 1.10]`.
pub const FACTOR_RANGE: RangeInclusive<f64> = 1.01..=1.10;
/// The contrast amount is drawn from `(0.01, 0.10]`.
pub const CONTRAST_RANGE: RangeInclusive<f64> = 0.01..=0.10;

/// The four adjustments applied to a single video.
///
/// A fresh set is drawn for every file and thrown away once the file is done.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentSet {
    /// Playback speed multiplier, shared by the video and audio tracks.
    pub speed: f64,
    /// Per-channel luminance multiplier.
    pub brightness: f64,
    /// Contrast amount around mid-grey, with no luminance offset.
    pub contrast: f64,
    /// Audio amplitude multiplier.
    pub volume: f64,
}

impl AdjustmentSet {
    /// Draws each factor independently and uniformly from its range.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            speed: sample_above_start(rng, &FACTOR_RANGE),
            brightness: sample_above_start(rng, &FACTOR_RANGE),
            contrast: sample_above_start(rng, &CONTRAST_RANGE),
            volume: sample_above_start(rng, &FACTOR_RANGE),
        }
    }

    /// Whether every factor lies inside the range it is drawn from.
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        let in_range = |range: &RangeInclusive<f64>, value: f64| {
            value > *range.start() && value <= *range.end()
        };

        in_range(&FACTOR_RANGE, self.speed)
            && in_range(&FACTOR_RANGE, self.brightness)
            && in_range(&CONTRAST_RANGE, self.contrast)
            && in_range(&FACTOR_RANGE, self.volume)
    }

    #[must_use]
    pub fn speed_percent(&self) -> f64 {
        (self.speed - 1.0) * 100.0
    }

    #[must_use]
    pub fn brightness_percent(&self) -> f64 {
        (self.brightness - 1.0) * 100.0
    }

    #[must_use]
    pub fn contrast_percent(&self) -> f64 {
        self.contrast * 100.0
    }

    #[must_use]
    pub fn volume_percent(&self) -> f64 {
        (self.volume - 1.0) * 100.0
    }
}

impl fmt::Display for AdjustmentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "speed +{:.0}%, brightness +{:.0}%, contrast +{:.0}%, volume +{:.0}%",
            self.speed_percent(),
            self.brightness_percent(),
            self.contrast_percent(),
            self.volume_percent(),
        )
    }
}

// `gen_range` may return the start of the range; the start is excluded here.
fn sample_above_start<R: Rng + ?Sized>(rng: &mut R, range: &RangeInclusive<f64>) -> f64 {
    loop {
        let value = rng.gen_range(range.clone());
        if value > *range.start() {
            return value;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;

    #[test]
    fn factors_stay_inside_their_ranges() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);

        for _ in 0..10_000 {
            let set = AdjustmentSet::random(&mut rng);

            assert!(set.speed > 1.01 && set.speed <= 1.10, "{set:?}");
            assert!(set.brightness > 1.01 && set.brightness <= 1.10, "{set:?}");
            assert!(set.contrast > 0.01 && set.contrast <= 0.10, "{set:?}");
            assert!(set.volume > 1.01 && set.volume <= 1.10, "{set:?}");
            assert!(set.is_in_range());
        }
    }

    #[test]
    fn same_seed_gives_same_adjustments() {
        let a = AdjustmentSet::random(&mut ChaCha20Rng::seed_from_u64(42));
        let b = AdjustmentSet::random(&mut ChaCha20Rng::seed_from_u64(42));

        assert_eq!(a, b);
    }

    #[test]
    fn consecutive_draws_differ() {
        let mut rng = rand::thread_rng();

        assert_ne!(
            AdjustmentSet::random(&mut rng),
            AdjustmentSet::random(&mut rng)
        );
    }

    #[test]
    fn out_of_range_sets_are_detected() {
        let set = AdjustmentSet {
            speed: 1.0,
            brightness: 1.05,
            contrast: 0.05,
            volume: 1.05,
        };

        assert!(!set.is_in_range());
    }

    #[test]
    fn report_shows_percentage_deltas() {
        let set = AdjustmentSet {
            speed: 1.07,
            brightness: 1.031,
            contrast: 0.05,
            volume: 1.1,
        };

        assert_eq!(
            set.to_string(),
            "speed +7%, brightness +3%, contrast +5%, volume +10%"
        );
    }
}
