use fw_core::config::TransformConfig;
use realfft::RealFftPlanner;

/// Primitive de transformée : FFT réelle fenêtrée, lissage temporel du
/// spectre, mapping décibels → octets.
///
/// Pre-allocates the FFT plan and scratch buffers for a zero-allocation
/// refresh path. Shared by every binding in this crate.
///
/// # Example
/// ```
/// use fw_core::config::TransformConfig;
/// use fw_host::transform::SpectrumTransform;
///
/// let transform = SpectrumTransform::new(&TransformConfig::default());
/// assert_eq!(transform.bin_count(), 1024);
/// ```
pub struct SpectrumTransform {
    fft_size: usize,
    input_buf: Vec<f32>,
    spectrum_buf: Vec<realfft::num_complex::Complex<f32>>,
    scratch: Vec<realfft::num_complex::Complex<f32>>,
    plan: std::sync::Arc<dyn realfft::RealToComplex<f32>>,
    /// Hann window coefficients.
    window: Vec<f32>,
    /// Per-bin exponentially smoothed magnitudes (Nyquist bin dropped).
    smoothed: Vec<f32>,
    smoothing: f32,
    min_db: f32,
    max_db: f32,
}

impl SpectrumTransform {
    /// Create a transform for the given window/smoothing/decibel range.
    ///
    /// # Panics
    /// Panics if `config.window_size` is 0.
    #[must_use]
    pub fn new(config: &TransformConfig) -> Self {
        let size = config.window_size;
        assert!(size > 0, "transform window must be > 0");

        let mut planner = RealFftPlanner::<f32>::new();
        let plan = planner.plan_fft_forward(size);

        let input_buf = plan.make_input_vec();
        let spectrum_buf = plan.make_output_vec();
        let scratch = plan.make_scratch_vec();

        // Hann window
        let window: Vec<f32> = (0..size)
            .map(|i| {
                0.5 * (1.0
                    - (2.0 * std::f32::consts::PI * i as f32 / (size as f32 - 1.0)).cos())
            })
            .collect();

        Self {
            fft_size: size,
            input_buf,
            spectrum_buf,
            scratch,
            plan,
            window,
            smoothed: vec![0.0; size / 2],
            smoothing: config.smoothing,
            min_db: config.min_decibels,
            max_db: config.max_decibels,
        }
    }

    /// Process one window of samples and update the smoothed spectrum.
    ///
    /// Shorter inputs are zero-padded. On an FFT failure the previous
    /// smoothed state is kept.
    pub fn process(&mut self, samples: &[f32]) {
        let n = self.fft_size.min(samples.len());

        // Copy and window
        for (i, slot) in self.input_buf.iter_mut().enumerate() {
            *slot = if i < n {
                samples[i] * self.window[i]
            } else {
                0.0
            };
        }

        if self
            .plan
            .process_with_scratch(&mut self.input_buf, &mut self.spectrum_buf, &mut self.scratch)
            .is_err()
        {
            return;
        }

        // Per-bin magnitude with exponential time smoothing.
        let tau = self.smoothing;
        for (k, smoothed) in self.smoothed.iter_mut().enumerate() {
            let c = self.spectrum_buf[k];
            let mag = (c.re * c.re + c.im * c.im).sqrt() / self.fft_size as f32;
            *smoothed = tau * *smoothed + (1.0 - tau) * mag;
        }
    }

    /// Write the smoothed spectrum as bytes.
    ///
    /// Each magnitude in decibels is mapped linearly from
    /// `[min_decibels, max_decibels]` onto [0, 255]. Silence maps to 0.
    pub fn write_spectrum_bytes(&self, out: &mut [u8]) {
        let range = self.max_db - self.min_db;
        for (slot, &s) in out.iter_mut().zip(self.smoothed.iter()) {
            let db = if s > 0.0 {
                20.0 * s.log10()
            } else {
                f32::NEG_INFINITY
            };
            let norm = ((db - self.min_db) / range).clamp(0.0, 1.0);
            *slot = (norm * 255.0) as u8;
        }
    }

    /// Write the tail of `samples` as centered waveform bytes
    /// (128 = zero amplitude). Missing samples read as silence.
    pub fn write_waveform_bytes(samples: &[f32], out: &mut [u8]) {
        out.fill(128);
        let tail = samples.len().saturating_sub(out.len());
        for (slot, &s) in out.iter_mut().zip(samples[tail..].iter()) {
            *slot = (s.clamp(-1.0, 1.0) * 128.0 + 128.0).clamp(0.0, 255.0) as u8;
        }
    }

    /// Transform window size.
    #[must_use]
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of spectrum bins exposed (half the window).
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.smoothed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(len: usize, freq: f32, sample_rate: f32, amplitude: f32) -> Vec<f32> {
        (0..len)
            .map(|i| amplitude * (std::f32::consts::TAU * freq * i as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn silence_maps_to_zero_bytes() {
        let mut transform = SpectrumTransform::new(&TransformConfig::default());
        transform.process(&[0.0; 2048]);

        let mut out = vec![0xAAu8; transform.bin_count()];
        transform.write_spectrum_bytes(&mut out);
        assert!(out.iter().all(|&b| b == 0));
    }

    #[test]
    fn sine_energy_lands_near_expected_bin() {
        let config = TransformConfig::default();
        let mut transform = SpectrumTransform::new(&config);
        // 1000Hz @ 44100 with a 2048 window ⇒ bin ≈ 1000 / (44100/2048) ≈ 46.
        transform.process(&sine(2048, 1000.0, 44100.0, 1.0));

        let mut out = vec![0u8; transform.bin_count()];
        transform.write_spectrum_bytes(&mut out);

        let hottest = out
            .iter()
            .enumerate()
            .max_by_key(|&(_, &b)| b)
            .map(|(i, _)| i)
            .unwrap_or(0);
        assert!(
            (44..=48).contains(&hottest),
            "peak bin {hottest}, expected ≈46"
        );
    }

    #[test]
    fn smoothing_carries_energy_across_frames() {
        let config = TransformConfig {
            smoothing: 0.8,
            ..TransformConfig::default()
        };
        let mut transform = SpectrumTransform::new(&config);
        transform.process(&sine(2048, 1000.0, 44100.0, 1.0));
        // Signal stops, but the smoothed spectrum decays instead of dropping.
        transform.process(&[0.0; 2048]);

        let mut out = vec![0u8; transform.bin_count()];
        transform.write_spectrum_bytes(&mut out);
        assert!(out.iter().any(|&b| b > 0), "smoothed spectrum vanished");
    }

    #[test]
    fn waveform_bytes_are_centered() {
        let mut out = vec![0u8; 4];
        SpectrumTransform::write_waveform_bytes(&[0.0, 1.0, -1.0, 0.5], &mut out);
        assert_eq!(out, vec![128, 255, 0, 192]);
    }

    #[test]
    fn waveform_bytes_take_the_tail() {
        let samples: Vec<f32> = vec![0.0, 0.0, 0.0, 1.0, 1.0];
        let mut out = vec![0u8; 2];
        SpectrumTransform::write_waveform_bytes(&samples, &mut out);
        assert_eq!(out, vec![255, 255]);
    }

    #[test]
    fn short_input_pads_to_silence_on_missing_waveform() {
        let mut out = vec![0u8; 4];
        SpectrumTransform::write_waveform_bytes(&[1.0], &mut out);
        // One real sample, three silent slots.
        assert_eq!(out.iter().filter(|&&b| b == 128).count(), 3);
        assert_eq!(out[0], 255);
    }
}
