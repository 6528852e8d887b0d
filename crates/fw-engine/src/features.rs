// Per-snapshot descriptors over the byte-domain buffers : loudness,
// brightness, high-frequency extent, percussiveness, and the valence
// heuristic combining them.

/// Empirical headroom factor applied to the raw RMS so that
/// moderate-loudness material does not saturate at 1.0 prematurely.
pub const RMS_HEADROOM: f32 = 2.0;

/// Fraction of total spectral energy that defines the rolloff point.
pub const ROLLOFF_FRACTION: f32 = 0.85;

/// Rolloff reported when the energy threshold is unreachable (near-silent
/// spectrum). Degenerate input is a data condition, not an error.
pub const ROLLOFF_FALLBACK: f32 = 1.0;

/// Centroid reported when the spectrum carries no energy at all.
pub const CENTROID_FALLBACK: f32 = 0.0;

/// Weight of loudness in the valence heuristic.
pub const VALENCE_ENERGY_WEIGHT: f32 = 0.6;
/// Weight of brightness in the valence heuristic.
pub const VALENCE_BRIGHTNESS_WEIGHT: f32 = 0.4;

/// Short-term loudness from the byte waveform, clamped [0.0, 1.0].
///
/// Each sample is normalized from [0, 255] to [-1.0, 1.0] via
/// `(b - 128) / 128`, squared-averaged, rooted, then scaled by
/// [`RMS_HEADROOM`].
///
/// # Example
/// ```
/// use fw_engine::features::rms_energy;
/// assert_eq!(rms_energy(&[128u8; 1024]), 0.0);
/// ```
#[must_use]
pub fn rms_energy(waveform: &[u8]) -> f32 {
    if waveform.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = waveform
        .iter()
        .map(|&b| {
            let s = (f32::from(b) - 128.0) / 128.0;
            s * s
        })
        .sum();
    ((sum_sq / waveform.len() as f32).sqrt() * RMS_HEADROOM).clamp(0.0, 1.0)
}

/// Amplitude-weighted mean bin index, normalized by bin count.
///
/// A brightness proxy. Returns [`CENTROID_FALLBACK`] when total energy is
/// zero.
#[must_use]
pub fn spectral_centroid(spectrum: &[u8]) -> f32 {
    if spectrum.is_empty() {
        return CENTROID_FALLBACK;
    }
    let total: f32 = spectrum.iter().map(|&m| f32::from(m)).sum();
    if total <= 0.0 {
        return CENTROID_FALLBACK;
    }
    let weighted: f32 = spectrum
        .iter()
        .enumerate()
        .map(|(i, &m)| i as f32 * f32::from(m))
        .sum();
    (weighted / total / spectrum.len() as f32).clamp(0.0, 1.0)
}

/// Smallest bin index at which cumulative energy reaches
/// [`ROLLOFF_FRACTION`] of the total, normalized by bin count.
///
/// A high-frequency-extent proxy. Returns [`ROLLOFF_FALLBACK`] when the
/// threshold is unreachable.
#[must_use]
pub fn spectral_rolloff(spectrum: &[u8]) -> f32 {
    let total: f32 = spectrum.iter().map(|&m| f32::from(m)).sum();
    if total <= 0.0 {
        return ROLLOFF_FALLBACK;
    }
    let threshold = total * ROLLOFF_FRACTION;
    let mut cumulative = 0.0f32;
    for (i, &m) in spectrum.iter().enumerate() {
        cumulative += f32::from(m);
        if cumulative >= threshold {
            return i as f32 / spectrum.len() as f32;
        }
    }
    ROLLOFF_FALLBACK
}

/// Sign changes of the centered waveform across consecutive samples,
/// normalized by buffer length. A percussiveness/noisiness proxy.
#[must_use]
pub fn zero_crossing_rate(waveform: &[u8]) -> f32 {
    if waveform.len() < 2 {
        return 0.0;
    }
    let mut crossings = 0usize;
    for pair in waveform.windows(2) {
        let a = i16::from(pair[0]) - 128;
        let b = i16::from(pair[1]) - 128;
        if a * b < 0 {
            crossings += 1;
        }
    }
    crossings as f32 / waveform.len() as f32
}

/// Heuristic emotional positivity : loudness and brightness combined
/// linearly, clamped [0.0, 1.0]. Not a validated psychoacoustic model.
#[must_use]
pub fn valence(energy: f32, spectral_centroid: f32) -> f32 {
    (energy * VALENCE_ENERGY_WEIGHT + spectral_centroid * VALENCE_BRIGHTNESS_WEIGHT)
        .clamp(0.0, 1.0)
}
