use fw_core::config::TransformConfig;
use fw_core::feature::FeatureSet;
use fw_core::traits::SignalBinding;

use crate::error::EngineError;
use crate::features;
use crate::sampler::SpectralSampler;
use crate::session::AnalysisSession;
use crate::tempo;
use crate::timbre;

/// Moteur d'extraction : orchestre les cinq calculateurs sur une session.
///
/// State machine : `Uninitialized --initialize--> Initialized
/// --disconnect--> Uninitialized`. Toute méthode d'analyse hors d'une
/// session échoue avec [`EngineError::NotInitialized`] — jamais un résultat
/// zéro silencieux.
///
/// # Example
/// ```
/// use fw_core::config::TransformConfig;
/// use fw_core::traits::SignalBinding;
/// use fw_engine::FeatureEngine;
///
/// struct Flat;
/// impl SignalBinding for Flat {
///     fn bind(&mut self, _: &TransformConfig) -> anyhow::Result<()> { Ok(()) }
///     fn refresh_spectrum(&mut self, out: &mut [u8]) { out.fill(0); }
///     fn refresh_waveform(&mut self, out: &mut [u8]) { out.fill(128); }
///     fn unbind(&mut self) {}
/// }
///
/// let mut engine = FeatureEngine::new();
/// engine.initialize(Box::new(Flat), 44100, TransformConfig::default()).unwrap();
/// let features = engine.extract_features().unwrap();
/// assert_eq!(features.tempo, 120.0);
/// assert_eq!(features.energy, 0.0);
/// ```
#[derive(Default)]
pub struct FeatureEngine {
    session: Option<AnalysisSession>,
}

impl FeatureEngine {
    /// Create an engine in the `Uninitialized` state.
    #[must_use]
    pub fn new() -> Self {
        Self { session: None }
    }

    /// Bind a signal and allocate the session buffers.
    ///
    /// Teardown-then-create : une session existante est déconnectée d'abord,
    /// jamais cumulée.
    ///
    /// # Errors
    /// [`EngineError::Config`] for an invalid transform configuration,
    /// [`EngineError::Bind`] if the binding rejects it. On error the engine
    /// is left uninitialized.
    pub fn initialize(
        &mut self,
        binding: Box<dyn SignalBinding>,
        sample_rate: u32,
        config: TransformConfig,
    ) -> Result<(), EngineError> {
        config.validate()?;
        self.disconnect();

        let session = AnalysisSession::bind(binding, sample_rate, config)?;
        log::info!(
            "Analysis session initialized @ {sample_rate}Hz, {} bins",
            session.bin_count()
        );
        self.session = Some(session);
        Ok(())
    }

    /// Release the session buffers and unbind the source.
    ///
    /// Safe to call multiple times ; a no-op when uninitialized.
    pub fn disconnect(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.unbind();
            log::info!("Analysis session disconnected");
        }
    }

    /// `true` between `initialize()` and `disconnect()`.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// Pull-based sampler over the live session buffers.
    ///
    /// # Errors
    /// [`EngineError::NotInitialized`] outside a session.
    pub fn sampler(&mut self) -> Result<SpectralSampler<'_>, EngineError> {
        self.session
            .as_mut()
            .map(AnalysisSession::sampler)
            .ok_or(EngineError::NotInitialized)
    }

    /// Fresh magnitude-spectrum snapshot, one byte per bin (0–255).
    ///
    /// # Errors
    /// [`EngineError::NotInitialized`] outside a session.
    pub fn frequency_data(&mut self) -> Result<&[u8], EngineError> {
        let session = self.session.as_mut().ok_or(EngineError::NotInitialized)?;
        Ok(session.refresh_frequency())
    }

    /// Fresh waveform snapshot, one byte per sample (128 = zero amplitude).
    ///
    /// # Errors
    /// [`EngineError::NotInitialized`] outside a session.
    pub fn time_domain_data(&mut self) -> Result<&[u8], EngineError> {
        let session = self.session.as_mut().ok_or(EngineError::NotInitialized)?;
        Ok(session.refresh_time_domain())
    }

    /// Extract one [`FeatureSet`] from the live signal.
    ///
    /// Fans out to the five calculators in sequence (tempo, energy,
    /// spectral descriptors, timbre, valence). Each pulls a fresh snapshot
    /// through the sampler rather than sharing one atomic capture : under a
    /// fast-moving signal the descriptors may reflect slightly different
    /// instants of the same frame.
    ///
    /// # Errors
    /// [`EngineError::NotInitialized`] outside a session.
    pub fn extract_features(&mut self) -> Result<FeatureSet, EngineError> {
        let session = self.session.as_mut().ok_or(EngineError::NotInitialized)?;
        let sample_rate = session.sample_rate();
        let mut sampler = session.sampler();

        let tempo = tempo::estimate_bpm(sampler.time_domain_data(), sample_rate);
        let energy = features::rms_energy(sampler.time_domain_data());
        let spectral_centroid = features::spectral_centroid(sampler.frequency_data());
        let spectral_rolloff = features::spectral_rolloff(sampler.frequency_data());
        let zero_crossing_rate = features::zero_crossing_rate(sampler.time_domain_data());
        let mfcc = timbre::timbre_bands(sampler.frequency_data());
        let valence = features::valence(energy, spectral_centroid);

        Ok(FeatureSet {
            tempo,
            energy,
            valence,
            spectral_centroid,
            spectral_rolloff,
            zero_crossing_rate,
            mfcc,
            // Key detection is deliberately unimplemented.
            key: None,
        })
    }
}
