use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use fw_core::config::TransformConfig;
use fw_core::traits::SignalBinding;

use crate::decode;
use crate::error::HostError;
use crate::transform::SpectrumTransform;

/// Tête de lecture partagée entre l'hôte et un [`FileBinding`].
///
/// L'hôte est le maître : il avance la position (lecture temps réel ou
/// boucle batch) ; chaque refresh du binding lit la fenêtre qui se termine
/// à la position courante. Atomique — zero-alloc, zero-lock.
#[derive(Clone)]
pub struct Playhead {
    pos: Arc<AtomicUsize>,
    sample_rate: u32,
    total_samples: usize,
}

impl Playhead {
    fn new(sample_rate: u32, total_samples: usize) -> Self {
        Self {
            pos: Arc::new(AtomicUsize::new(0)),
            sample_rate,
            total_samples,
        }
    }

    /// Position courante en samples.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos.load(Ordering::Relaxed)
    }

    /// Position courante en secondes.
    #[must_use]
    pub fn pos_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.position() as f64 / f64::from(self.sample_rate)
    }

    /// Avance de `samples`, en bouclant en fin de morceau.
    pub fn advance(&self, samples: usize) {
        let next = (self.position() + samples) % self.total_samples;
        self.pos.store(next, Ordering::Relaxed);
    }

    /// Saute à une position absolue en samples (modulo la longueur).
    pub fn seek_to(&self, sample: usize) {
        self.pos.store(sample % self.total_samples, Ordering::Relaxed);
    }
}

/// Binding sur un fichier audio décodé.
///
/// La fenêtre d'analyse se termine à la tête de lecture, avec bouclage en
/// début de morceau — les refreshes ne font jamais avancer la position.
pub struct FileBinding {
    samples: Arc<Vec<f32>>,
    sample_rate: u32,
    playhead: Playhead,
    window_buf: Vec<f32>,
    transform: Option<SpectrumTransform>,
}

impl FileBinding {
    /// Decode an audio file into a binding.
    ///
    /// # Errors
    /// Returns an error if the file cannot be decoded or contains no
    /// samples.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let (samples, sample_rate) = decode::decode_file(path.as_ref())?;
        Self::from_samples(samples, sample_rate)
    }

    /// Wrap pre-decoded mono samples.
    ///
    /// # Errors
    /// Returns [`HostError::EmptyAudioFile`] for an empty sample vector.
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        if samples.is_empty() {
            return Err(HostError::EmptyAudioFile.into());
        }
        let playhead = Playhead::new(sample_rate, samples.len());
        Ok(Self {
            samples: Arc::new(samples),
            sample_rate,
            playhead,
            window_buf: Vec::new(),
            transform: None,
        })
    }

    /// Sample rate of the decoded track, for `initialize()`.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total decoded samples.
    #[must_use]
    pub fn total_samples(&self) -> usize {
        self.samples.len()
    }

    /// Handle partagé sur la tête de lecture.
    #[must_use]
    pub fn playhead(&self) -> Playhead {
        self.playhead.clone()
    }

    /// Fill the analysis window ending at the current playhead, wrapping
    /// backwards past the start of the track.
    fn fill_window(&mut self) {
        let size = self.window_buf.len();
        if size == 0 {
            return;
        }
        let total = self.samples.len() as i64;
        let pos = (self.playhead.position() as i64) % total;
        for (i, slot) in self.window_buf.iter_mut().enumerate() {
            let idx = (pos - size as i64 + i as i64).rem_euclid(total) as usize;
            *slot = self.samples[idx];
        }
    }
}

impl SignalBinding for FileBinding {
    fn bind(&mut self, config: &TransformConfig) -> Result<()> {
        config.validate()?;
        self.transform = Some(SpectrumTransform::new(config));
        self.window_buf = vec![0.0; config.window_size];
        Ok(())
    }

    fn refresh_spectrum(&mut self, out: &mut [u8]) {
        self.fill_window();
        if let Some(transform) = self.transform.as_mut() {
            transform.process(&self.window_buf);
            transform.write_spectrum_bytes(out);
        } else {
            out.fill(0);
        }
    }

    fn refresh_waveform(&mut self, out: &mut [u8]) {
        self.fill_window();
        SpectrumTransform::write_waveform_bytes(&self.window_buf, out);
    }

    fn unbind(&mut self) {
        self.transform = None;
        self.window_buf.clear();
    }
}
