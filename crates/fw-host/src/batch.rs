use std::path::Path;

use anyhow::Result;
use fw_core::config::TransformConfig;
use fw_core::timeline::FeatureTimeline;
use fw_engine::FeatureEngine;

use crate::file::FileBinding;

/// Analyse offline d'un morceau entier : une `FeatureSet` par frame cible.
///
/// Décode le fichier une fois, puis avance la tête de lecture frame par
/// frame à travers un [`FeatureEngine`].
///
/// # Errors
/// Returns an error if decoding or binding fails.
///
/// # Example
/// ```no_run
/// use fw_core::config::TransformConfig;
/// use fw_host::batch::analyze_file;
/// let timeline = analyze_file("track.mp3", 30, TransformConfig::default()).unwrap();
/// println!("{} frames", timeline.total_frames());
/// ```
pub fn analyze_file(
    path: impl AsRef<Path>,
    target_fps: u32,
    config: TransformConfig,
) -> Result<FeatureTimeline> {
    let binding = FileBinding::from_path(path)?;
    analyze_binding(binding, target_fps, config)
}

/// Drive a [`FileBinding`] frame by frame through a [`FeatureEngine`].
///
/// # Errors
/// Returns an error if the engine rejects the configuration or binding.
pub fn analyze_binding(
    binding: FileBinding,
    target_fps: u32,
    config: TransformConfig,
) -> Result<FeatureTimeline> {
    let fps = target_fps.max(1);
    let sample_rate = binding.sample_rate();
    let total_samples = binding.total_samples();
    let playhead = binding.playhead();

    let frame_duration = 1.0 / fps as f32;
    let samples_per_frame = (sample_rate as f32 * frame_duration) as usize;

    // Zero division protection
    if samples_per_frame == 0 {
        return Ok(FeatureTimeline {
            frames: Vec::new(),
            frame_duration,
            sample_rate,
        });
    }

    let mut engine = FeatureEngine::new();
    engine.initialize(Box::new(binding), sample_rate, config)?;

    let num_frames = total_samples.div_ceil(samples_per_frame);
    let mut frames = Vec::with_capacity(num_frames);
    for frame in 0..num_frames {
        playhead.seek_to(frame * samples_per_frame);
        frames.push(engine.extract_features()?);
    }
    engine.disconnect();

    log::info!(
        "Batch analysis: {} frames @ {fps}fps from {total_samples} samples",
        frames.len()
    );

    Ok(FeatureTimeline {
        frames,
        frame_duration,
        sample_rate,
    })
}
