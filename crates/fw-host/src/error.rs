use thiserror::Error;

/// Errors originating from the host bindings.
#[derive(Error, Debug)]
pub enum HostError {
    /// No audio input device found.
    #[error("Aucun périphérique audio d'entrée trouvé")]
    NoInputDevice,

    /// Decoded file contains no samples.
    #[error("Fichier audio vide")]
    EmptyAudioFile,

    /// Audio decode error.
    #[error("Erreur de décodage : {0}")]
    Decode(String),
}
