use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use fw_engine::{features, tempo, timbre};

fn synthetic_waveform(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| (128.0 + 100.0 * (i as f32 * 0.13).sin()) as u8)
        .collect()
}

fn synthetic_spectrum(len: usize) -> Vec<u8> {
    (0..len).map(|i| (255 - (i * 7) % 256) as u8).collect()
}

fn bench_calculators(c: &mut Criterion) {
    let waveform = synthetic_waveform(1024);
    let spectrum = synthetic_spectrum(1024);

    c.bench_function("estimate_bpm_1024", |b| {
        b.iter(|| tempo::estimate_bpm(black_box(&waveform), 44100));
    });

    c.bench_function("rms_energy_1024", |b| {
        b.iter(|| features::rms_energy(black_box(&waveform)));
    });

    c.bench_function("spectral_descriptors_1024", |b| {
        b.iter(|| {
            let centroid = features::spectral_centroid(black_box(&spectrum));
            let rolloff = features::spectral_rolloff(black_box(&spectrum));
            let zcr = features::zero_crossing_rate(black_box(&waveform));
            (centroid, rolloff, zcr)
        });
    });

    c.bench_function("timbre_bands_1024", |b| {
        b.iter(|| timbre::timbre_bands(black_box(&spectrum)));
    });
}

criterion_group!(benches, bench_calculators);
criterion_main!(benches);
