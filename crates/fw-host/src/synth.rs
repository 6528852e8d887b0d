use anyhow::Result;
use fw_core::config::TransformConfig;
use fw_core::traits::SignalBinding;

use crate::transform::SpectrumTransform;

/// Générateur déterministe : sinus à phase continue, ou silence.
///
/// Sert de binding de test et de repli silencieux. L'horloge interne avance
/// d'une fenêtre par snapshot rafraîchi, comme une source vivante.
///
/// # Example
/// ```
/// use fw_host::synth::SyntheticBinding;
/// let binding = SyntheticBinding::sine(440.0, 0.8, 44100);
/// assert_eq!(binding.sample_rate(), 44100);
/// ```
pub struct SyntheticBinding {
    frequency: f32,
    amplitude: f32,
    sample_rate: u32,
    /// Sample clock, monotonically advancing.
    clock: usize,
    window: Vec<f32>,
    transform: Option<SpectrumTransform>,
}

impl SyntheticBinding {
    /// Sine generator at `frequency` Hz with peak `amplitude` [0.0, 1.0].
    #[must_use]
    pub fn sine(frequency: f32, amplitude: f32, sample_rate: u32) -> Self {
        Self {
            frequency,
            amplitude: amplitude.clamp(0.0, 1.0),
            sample_rate,
            clock: 0,
            window: Vec::new(),
            transform: None,
        }
    }

    /// Silent source : flat waveform at zero amplitude.
    #[must_use]
    pub fn silence(sample_rate: u32) -> Self {
        Self::sine(0.0, 0.0, sample_rate)
    }

    /// Sample rate of the generated signal, for `initialize()`.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Synthesize the next window and advance the sample clock.
    fn fill_window(&mut self) {
        let start = self.clock;
        let rate = self.sample_rate.max(1) as f32;
        for (i, slot) in self.window.iter_mut().enumerate() {
            let t = (start + i) as f32 / rate;
            *slot = self.amplitude * (std::f32::consts::TAU * self.frequency * t).sin();
        }
        self.clock += self.window.len();
    }
}

impl SignalBinding for SyntheticBinding {
    fn bind(&mut self, config: &TransformConfig) -> Result<()> {
        config.validate()?;
        self.transform = Some(SpectrumTransform::new(config));
        self.window = vec![0.0; config.window_size];
        self.clock = 0;
        Ok(())
    }

    fn refresh_spectrum(&mut self, out: &mut [u8]) {
        self.fill_window();
        if let Some(transform) = self.transform.as_mut() {
            transform.process(&self.window);
            transform.write_spectrum_bytes(out);
        } else {
            out.fill(0);
        }
    }

    fn refresh_waveform(&mut self, out: &mut [u8]) {
        self.fill_window();
        SpectrumTransform::write_waveform_bytes(&self.window, out);
    }

    fn unbind(&mut self) {
        self.transform = None;
        self.window.clear();
    }
}

#[cfg(test)]
mod tests {
    use fw_core::config::TransformConfig;
    use fw_engine::FeatureEngine;

    use super::*;

    fn engine_with(binding: SyntheticBinding) -> FeatureEngine {
        let _ = env_logger::builder().is_test(true).try_init();
        let sample_rate = binding.sample_rate();
        let mut engine = FeatureEngine::new();
        engine
            .initialize(Box::new(binding), sample_rate, TransformConfig::default())
            .expect("bind synthetic source");
        engine
    }

    #[test]
    fn silence_yields_documented_defaults() {
        let mut engine = engine_with(SyntheticBinding::silence(44100));
        let features = engine.extract_features().expect("extract");

        assert_eq!(features.tempo, 120.0);
        assert_eq!(features.energy, 0.0);
        assert_eq!(features.spectral_rolloff, 1.0);
        assert_eq!(features.spectral_centroid, 0.0);
    }

    #[test]
    fn sine_features_stay_in_contract_ranges() {
        let mut engine = engine_with(SyntheticBinding::sine(440.0, 0.8, 44100));
        let f = engine.extract_features().expect("extract");

        assert!((40.0..=200.0).contains(&f.tempo));
        assert!((0.0..=1.0).contains(&f.energy));
        assert!((0.0..=1.0).contains(&f.valence));
        assert!((0.0..=1.0).contains(&f.spectral_centroid));
        assert!((0.0..=1.0).contains(&f.spectral_rolloff));
        assert!((0.0..=1.0).contains(&f.zero_crossing_rate));
        assert!(f.mfcc.iter().all(|&b| (0.0..=1.0).contains(&b)));
        assert!(f.key.is_none());
    }

    #[test]
    fn louder_sine_reads_louder() {
        let mut quiet_engine = engine_with(SyntheticBinding::sine(440.0, 0.2, 44100));
        let mut loud_engine = engine_with(SyntheticBinding::sine(440.0, 0.6, 44100));

        let quiet = quiet_engine.extract_features().expect("quiet").energy;
        let loud = loud_engine.extract_features().expect("loud").energy;
        assert!(loud > quiet, "expected {loud} > {quiet}");
    }

    #[test]
    fn sine_spectrum_peaks_near_expected_bin() {
        let mut engine = engine_with(SyntheticBinding::sine(1000.0, 1.0, 44100));
        let spectrum = engine.frequency_data().expect("spectrum");

        let hottest = spectrum
            .iter()
            .enumerate()
            .max_by_key(|&(_, &b)| b)
            .map(|(i, _)| i)
            .unwrap_or(0);
        // 1000Hz @ 44100, window 2048 ⇒ bin ≈ 46.
        assert!(
            (43..=49).contains(&hottest),
            "peak bin {hottest}, expected ≈46"
        );
    }

    #[test]
    fn clock_advances_between_snapshots() {
        let mut binding = SyntheticBinding::sine(440.0, 0.8, 44100);
        binding.bind(&TransformConfig::default()).expect("bind");
        let mut a = vec![0u8; 1024];
        let mut b = vec![0u8; 1024];
        binding.refresh_waveform(&mut a);
        binding.refresh_waveform(&mut b);
        // 2048 samples elapse between the two reads ; 440Hz is not phase
        // aligned to that hop, so the snapshots differ.
        assert_ne!(a, b);
    }
}
