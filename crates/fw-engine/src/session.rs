use fw_core::config::TransformConfig;
use fw_core::traits::SignalBinding;

use crate::error::EngineError;
use crate::sampler::SpectralSampler;

/// Session d'analyse : binding + configuration + deux buffers réutilisables.
///
/// Les buffers (spectre, forme d'onde) sont alloués une fois à la liaison,
/// longueur = bin count, et vivent exactement aussi longtemps que la session.
/// Tous les calculateurs supposent `frequency_data.len() == time_data.len()`.
pub struct AnalysisSession {
    binding: Box<dyn SignalBinding>,
    sample_rate: u32,
    config: TransformConfig,
    frequency_data: Vec<u8>,
    time_data: Vec<u8>,
}

impl AnalysisSession {
    /// Bind a signal and allocate the two snapshot buffers.
    pub(crate) fn bind(
        mut binding: Box<dyn SignalBinding>,
        sample_rate: u32,
        config: TransformConfig,
    ) -> Result<Self, EngineError> {
        binding.bind(&config).map_err(EngineError::Bind)?;
        let bin_count = config.bin_count();
        Ok(Self {
            binding,
            sample_rate,
            config,
            frequency_data: vec![0; bin_count],
            time_data: vec![128; bin_count],
        })
    }

    /// Sample rate of the bound source, Hz.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of spectrum bins (half the transform window).
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.frequency_data.len()
    }

    /// Transform configuration this session was bound with.
    #[must_use]
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Create a pull-based sampler lending per-call views of the buffers.
    pub fn sampler(&mut self) -> SpectralSampler<'_> {
        SpectralSampler::new(self)
    }

    /// Refresh the magnitude spectrum through the binding.
    pub(crate) fn refresh_frequency(&mut self) -> &[u8] {
        self.binding.refresh_spectrum(&mut self.frequency_data);
        &self.frequency_data
    }

    /// Refresh the time-domain waveform through the binding.
    pub(crate) fn refresh_time_domain(&mut self) -> &[u8] {
        self.binding.refresh_waveform(&mut self.time_data);
        &self.time_data
    }

    /// Détache le binding. Appelé exactement une fois par le teardown.
    pub(crate) fn unbind(&mut self) {
        self.binding.unbind();
    }
}
