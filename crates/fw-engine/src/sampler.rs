use crate::session::AnalysisSession;

/// Accesseur pull-based sur les snapshots fréquence/temps d'une session.
///
/// Chaque appel ré-échantillonne l'état vivant via le binding — aucun cache
/// entre les appels. Les vues retournées empruntent la session : il est
/// impossible d'en retenir une au-delà d'un cycle disconnect/initialize.
pub struct SpectralSampler<'s> {
    session: &'s mut AnalysisSession,
}

impl<'s> SpectralSampler<'s> {
    pub(crate) fn new(session: &'s mut AnalysisSession) -> Self {
        Self { session }
    }

    /// Current magnitude spectrum, one byte per bin (0–255).
    ///
    /// Length = bin count. Refreshed on every call.
    pub fn frequency_data(&mut self) -> &[u8] {
        self.session.refresh_frequency()
    }

    /// Current waveform, one byte per sample (0–255, 128 = zero amplitude).
    ///
    /// Length = bin count. Refreshed on every call.
    pub fn time_domain_data(&mut self) -> &[u8] {
        self.session.refresh_time_domain()
    }
}
