/// Nombre de bandes de timbre dans l'approximation MFCC grossière.
pub const TIMBRE_BANDS: usize = 13;

/// Descripteurs perceptuels et acoustiques d'une frame d'analyse.
///
/// Écrit par le moteur d'extraction, lu par les modules génératifs en aval
/// (construction de prompt, paramètres de visualisation).
/// Taille fixe, Copy, jamais alloué dynamiquement.
///
/// # Example
/// ```
/// use fw_core::feature::FeatureSet;
/// let f = FeatureSet::default();
/// assert_eq!(f.mfcc.len(), 13);
/// assert!(f.key.is_none());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FeatureSet {
    /// Tempo estimé en BPM, clampé [40.0, 200.0].
    pub tempo: f32,
    /// Loudness court-terme dérivée du RMS [0.0, 1.0].
    pub energy: f32,
    /// Positivité émotionnelle heuristique [0.0, 1.0].
    pub valence: f32,
    /// Centroïde spectral normalisé [0.0, 1.0] (brillance du timbre).
    pub spectral_centroid: f32,
    /// Étendue haute-fréquence normalisée [0.0, 1.0].
    pub spectral_rolloff: f32,
    /// Taux de passage par zéro [0.0, 1.0] (proxy de percussivité).
    pub zero_crossing_rate: f32,
    /// Bandes de timbre log-compressées [0.0, 1.0] chacune.
    /// Approximation grossière — ni warping mel, ni DCT.
    pub mfcc: [f32; TIMBRE_BANDS],
    /// Tonalité musicale. La détection n'est pas implémentée ; toujours `None`.
    pub key: Option<&'static str>,
}
