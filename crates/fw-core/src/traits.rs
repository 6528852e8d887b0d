use anyhow::Result;

use crate::config::TransformConfig;

/// Liaison vers une source audio vivante et sa primitive de transformée.
///
/// Implémenté par : `LiveBinding`, `FileBinding`, `SyntheticBinding`.
/// Le moteur ne crée jamais la source sous-jacente — il s'y attache,
/// et la source se rafraîchit à chaque appel.
///
/// Modèle single-thread, pull-based : aucun `Send` requis, un binding peut
/// détenir un handle de stream plateforme non-`Send`.
///
/// # Example
/// ```
/// use fw_core::config::TransformConfig;
/// use fw_core::traits::SignalBinding;
///
/// struct DummyBinding;
/// impl SignalBinding for DummyBinding {
///     fn bind(&mut self, _config: &TransformConfig) -> anyhow::Result<()> { Ok(()) }
///     fn refresh_spectrum(&mut self, out: &mut [u8]) { out.fill(0); }
///     fn refresh_waveform(&mut self, out: &mut [u8]) { out.fill(128); }
///     fn unbind(&mut self) {}
/// }
/// ```
pub trait SignalBinding {
    /// Câble source → transformée → sortie pour la configuration donnée.
    ///
    /// # Errors
    /// Retourne une erreur si la liaison refuse la configuration.
    fn bind(&mut self, config: &TransformConfig) -> Result<()>;

    /// Rafraîchit et écrit le spectre de magnitude courant.
    ///
    /// Un octet par bin (0–255). CONTRAT : ne doit PAS allouer. `out` est
    /// pré-alloué par la session, longueur = bin count.
    fn refresh_spectrum(&mut self, out: &mut [u8]);

    /// Rafraîchit et écrit la forme d'onde courante.
    ///
    /// Un octet par sample (0–255, 128 = amplitude zéro). Même contrat et
    /// même longueur que [`SignalBinding::refresh_spectrum`].
    fn refresh_waveform(&mut self, out: &mut [u8]);

    /// Détache la source. Idempotent.
    fn unbind(&mut self);
}
