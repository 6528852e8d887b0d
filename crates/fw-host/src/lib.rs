// Host-side signal bindings and offline analysis for FeelWave.
//
// The engine consumes a `SignalBinding` ; this crate provides the concrete
// ones (live capture, decoded file, synthetic generator) plus the spectrum
// transform they share and the offline batch driver.

pub mod batch;
pub mod capture;
pub mod decode;
pub mod error;
pub mod file;
pub mod synth;
pub mod transform;

pub use capture::LiveBinding;
pub use error::HostError;
pub use file::{FileBinding, Playhead};
pub use synth::SyntheticBinding;
pub use transform::SpectrumTransform;
