use fw_core::feature::TIMBRE_BANDS;

/// Log-compression base. A saturated band (average magnitude 255) maps
/// exactly to 1.0.
const LOG_BASE: f32 = 256.0;

/// Coarse 13-band timbre approximation over the magnitude spectrum.
///
/// Partitions the bins into [`TIMBRE_BANDS`] contiguous equal-width bands
/// (the trailing remainder folds into the last band), averages the
/// magnitude per band, then log-compresses with `ln(avg + 1) / ln(256)` to
/// approximate perceptual loudness scaling.
///
/// This is explicitly a coarse stand-in for MFCC : no mel-scale warping,
/// no discrete cosine transform.
///
/// # Example
/// ```
/// use fw_engine::timbre::timbre_bands;
/// let bands = timbre_bands(&[0u8; 1024]);
/// assert_eq!(bands.len(), 13);
/// assert!(bands.iter().all(|&b| b == 0.0));
/// ```
#[must_use]
pub fn timbre_bands(spectrum: &[u8]) -> [f32; TIMBRE_BANDS] {
    let mut bands = [0.0f32; TIMBRE_BANDS];
    if spectrum.is_empty() {
        return bands;
    }

    let band_width = (spectrum.len() / TIMBRE_BANDS).max(1);
    for (b, band) in bands.iter_mut().enumerate() {
        let lo = b * band_width;
        let hi = if b == TIMBRE_BANDS - 1 {
            spectrum.len()
        } else {
            ((b + 1) * band_width).min(spectrum.len())
        };
        if lo >= hi {
            continue;
        }
        let sum: f32 = spectrum[lo..hi].iter().map(|&m| f32::from(m)).sum();
        let avg = sum / (hi - lo) as f32;
        *band = (avg + 1.0).ln() / LOG_BASE.ln();
    }
    bands
}
