use anyhow::Result;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use fw_core::config::TransformConfig;
use fw_core::traits::SignalBinding;
use rtrb::{Consumer, RingBuffer};

use crate::error::HostError;
use crate::transform::SpectrumTransform;

/// Live-input binding : capture cpal alimentant la transformée.
///
/// The audio callback downmixes to mono and pushes into a lock-free ring
/// buffer ; each refresh drains the ring into a rolling analysis window.
/// The capture stream stops when the binding is dropped.
///
/// # Example
/// ```no_run
/// use fw_host::capture::LiveBinding;
/// let binding = LiveBinding::start_default().unwrap();
/// println!("capture @ {}Hz", binding.sample_rate());
/// ```
pub struct LiveBinding {
    _stream: cpal::Stream,
    consumer: Consumer<f32>,
    sample_rate: u32,
    /// Rolling window of the most recent samples, `window_size` long once
    /// bound.
    window: Vec<f32>,
    transform: Option<SpectrumTransform>,
}

impl LiveBinding {
    /// Start capturing from the default input device.
    ///
    /// # Errors
    /// Returns an error if no input device is available or the stream
    /// cannot be built.
    pub fn start_default() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(HostError::NoInputDevice)?;

        let config = device.default_input_config()?;
        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;

        // Ring buffer : 2 seconds of audio @ sample_rate
        let (mut producer, consumer) = RingBuffer::new(sample_rate as usize * 2);

        let stream = device.build_input_stream(
            &config.into(),
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                // Downmix to mono and push into ring buffer
                for chunk in data.chunks(channels) {
                    let mono: f32 = chunk.iter().sum::<f32>() / channels as f32;
                    let _ = producer.push(mono);
                }
            },
            |err| {
                log::error!("Audio input stream error: {err}");
            },
            None,
        )?;

        stream.play()?;
        log::info!("Audio capture started @ {sample_rate}Hz");

        Ok(Self {
            _stream: stream,
            consumer,
            sample_rate,
            window: Vec::new(),
            transform: None,
        })
    }

    /// The sample rate of the capture stream, for `initialize()`.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Drain newly captured samples into the rolling window, keeping the
    /// most recent `window_size` of them.
    fn drain_ring(&mut self) {
        while let Ok(sample) = self.consumer.pop() {
            self.window.push(sample);
        }
        let size = self
            .transform
            .as_ref()
            .map_or(0, SpectrumTransform::fft_size);
        if size > 0 && self.window.len() > size {
            self.window.drain(..self.window.len() - size);
        }
    }
}

impl SignalBinding for LiveBinding {
    fn bind(&mut self, config: &TransformConfig) -> Result<()> {
        config.validate()?;
        self.transform = Some(SpectrumTransform::new(config));
        self.window = vec![0.0; config.window_size];
        Ok(())
    }

    fn refresh_spectrum(&mut self, out: &mut [u8]) {
        self.drain_ring();
        if let Some(transform) = self.transform.as_mut() {
            transform.process(&self.window);
            transform.write_spectrum_bytes(out);
        } else {
            out.fill(0);
        }
    }

    fn refresh_waveform(&mut self, out: &mut [u8]) {
        self.drain_ring();
        SpectrumTransform::write_waveform_bytes(&self.window, out);
    }

    fn unbind(&mut self) {
        self.transform = None;
        self.window.clear();
    }
}
