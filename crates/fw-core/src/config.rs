use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Configuration de la transformée fréquentielle à taille fixe.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use fw_core::config::TransformConfig;
/// let config = TransformConfig::default();
/// assert_eq!(config.window_size, 2048);
/// assert_eq!(config.bin_count(), 1024);
/// ```
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TransformConfig {
    /// Taille de fenêtre de la transformée, en samples. Puissance de deux.
    pub window_size: usize,
    /// Constante de lissage temporel du spectre [0.0, 1.0).
    /// 0.0 = spectre brut, 0.9 = très lissé.
    pub smoothing: f32,
    /// Plancher de la dynamique en décibels (mappé sur l'octet 0).
    pub min_decibels: f32,
    /// Plafond de la dynamique en décibels (mappé sur l'octet 255).
    pub max_decibels: f32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            window_size: 2048,
            smoothing: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

impl TransformConfig {
    /// Plus petite fenêtre acceptée.
    pub const MIN_WINDOW: usize = 32;

    /// Nombre de bins du spectre : la moitié de la fenêtre.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.window_size / 2
    }

    /// Clamp numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.smoothing = self.smoothing.clamp(0.0, 0.99);
    }

    /// Validate structural constraints that cannot be clamped.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] for a non-power-of-two or undersized
    /// window, an inverted decibel range, or an out-of-range smoothing
    /// constant.
    pub fn validate(&self) -> std::result::Result<(), CoreError> {
        if self.window_size < Self::MIN_WINDOW || !self.window_size.is_power_of_two() {
            return Err(CoreError::Config(format!(
                "window_size doit être une puissance de deux >= {}, reçu {}",
                Self::MIN_WINDOW,
                self.window_size
            )));
        }
        if self.max_decibels <= self.min_decibels {
            return Err(CoreError::Config(format!(
                "plage de décibels inversée : [{}, {}]",
                self.min_decibels, self.max_decibels
            )));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(CoreError::Config(format!(
                "smoothing doit être dans [0.0, 1.0), reçu {}",
                self.smoothing
            )));
        }
        Ok(())
    }
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if the merged
/// configuration is invalid.
///
/// # Example
/// ```no_run
/// use fw_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/analysis.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<TransformConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let mut config: TransformConfig = toml::from_str(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?;

    config.clamp_all();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TransformConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bin_count(), 1024);
    }

    #[test]
    fn validate_rejects_non_power_of_two_window() {
        let config = TransformConfig {
            window_size: 1000,
            ..TransformConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_decibel_range() {
        let config = TransformConfig {
            min_decibels: -30.0,
            max_decibels: -100.0,
            ..TransformConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn clamp_all_bounds_smoothing() {
        let mut config = TransformConfig {
            smoothing: 3.0,
            ..TransformConfig::default()
        };
        config.clamp_all();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_merges_partial_toml_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "window_size = 1024\nsmoothing = 0.5").expect("write config");

        let config = load_config(file.path()).expect("load config");
        assert_eq!(config.window_size, 1024);
        assert!((config.smoothing - 0.5).abs() < f32::EPSILON);
        // Untouched fields keep their defaults.
        assert!((config.min_decibels + 100.0).abs() < f32::EPSILON);
        assert!((config.max_decibels + 30.0).abs() < f32::EPSILON);
    }
}
