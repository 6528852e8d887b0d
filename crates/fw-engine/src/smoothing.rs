use fw_core::feature::{FeatureSet, TIMBRE_BANDS};

/// Exponential moving average smoothing with attack/release asymmetry.
///
/// Fast attack (responds quickly to increases), slow release (decays
/// slowly). Intended for the per-rendered-frame polling loop, where raw
/// per-call features flicker.
///
/// # Example
/// ```
/// use fw_engine::smoothing::FeatureSmoother;
/// let smoother = FeatureSmoother::new(0.3);
/// ```
pub struct FeatureSmoother {
    attack: f32,
    release: f32,
    prev: FeatureSet,
    initialized: bool,
}

impl FeatureSmoother {
    /// Create a new smoother.
    ///
    /// `alpha` controls base responsiveness. Attack = alpha * 2, release =
    /// alpha * 0.5.
    #[must_use]
    pub fn new(alpha: f32) -> Self {
        let a = alpha.clamp(0.01, 1.0);
        Self {
            attack: (a * 2.0).min(1.0),
            release: (a * 0.5).max(0.01),
            prev: FeatureSet::default(),
            initialized: false,
        }
    }

    /// Smooth with attack/release asymmetry per feature.
    ///
    /// The first call passes the input through unchanged.
    pub fn smooth(&mut self, current: &FeatureSet) -> FeatureSet {
        if !self.initialized {
            self.prev = *current;
            self.initialized = true;
            return *current;
        }

        let mut smoothed = *current;

        smoothed.tempo = self.ar(current.tempo, self.prev.tempo);
        smoothed.energy = self.ar(current.energy, self.prev.energy);
        smoothed.valence = self.ar(current.valence, self.prev.valence);
        smoothed.spectral_centroid =
            self.ar(current.spectral_centroid, self.prev.spectral_centroid);
        smoothed.spectral_rolloff = self.ar(current.spectral_rolloff, self.prev.spectral_rolloff);
        smoothed.zero_crossing_rate =
            self.ar(current.zero_crossing_rate, self.prev.zero_crossing_rate);

        for i in 0..TIMBRE_BANDS {
            smoothed.mfcc[i] = self.ar(current.mfcc[i], self.prev.mfcc[i]);
        }

        // Nothing to smooth for the (absent) key.
        smoothed.key = current.key;

        self.prev = smoothed;
        smoothed
    }

    /// Attack/release smoothing for a single value.
    #[inline(always)]
    fn ar(&self, current: f32, previous: f32) -> f32 {
        let alpha = if current > previous {
            self.attack
        } else {
            self.release
        };
        alpha * current + (1.0 - alpha) * previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_energy(energy: f32) -> FeatureSet {
        FeatureSet {
            energy,
            ..FeatureSet::default()
        }
    }

    #[test]
    fn first_sample_passes_through() {
        let mut smoother = FeatureSmoother::new(0.3);
        let out = smoother.smooth(&with_energy(0.7));
        assert!((out.energy - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn attack_is_faster_than_release() {
        let mut rising = FeatureSmoother::new(0.3);
        rising.smooth(&with_energy(0.0));
        let up = rising.smooth(&with_energy(1.0)).energy;

        let mut falling = FeatureSmoother::new(0.3);
        falling.smooth(&with_energy(1.0));
        let down = falling.smooth(&with_energy(0.0)).energy;

        // Rising covers more of the gap in one step than falling does.
        assert!(up > 1.0 - down, "attack {up} vs release drop {down}");
    }

    #[test]
    fn release_decays_gradually() {
        let mut smoother = FeatureSmoother::new(0.3);
        smoother.smooth(&with_energy(1.0));
        let out = smoother.smooth(&with_energy(0.0)).energy;
        assert!(out > 0.0 && out < 1.0);
    }
}
