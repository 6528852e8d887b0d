use thiserror::Error;

/// Errors originating from the extraction engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Analysis method called before `initialize` or after `disconnect`.
    /// A usage-ordering defect : deterministic, never retried.
    #[error("Session non initialisée : appeler initialize() avant l'analyse")]
    NotInitialized,

    /// The signal binding rejected the transform configuration.
    #[error("Liaison du signal impossible")]
    Bind(#[source] anyhow::Error),

    /// Invalid transform configuration.
    #[error(transparent)]
    Config(#[from] fw_core::CoreError),
}
