//! Signal generators and spectrum helpers shared by the tests and benchmarks
//! in this workspace.
//!
//! Everything here allocates, so none of it belongs on an audio thread.

use std::ops::Range;

use num::Complex;
use num_traits::cast;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use realfft::RealFftPlanner;


/// Fills `buffer` with uniform noise in `[-1, 1)`.
///
/// The generator is seeded with a constant, so every call produces the same
/// sequence.
pub fn fill_with_white_noise(buffer: &mut [f32]) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(420);
    for sample in buffer.iter_mut() {
        *sample = rng.gen_range(-1.0..1.0);
    }
}

/// Deterministic white noise, see [`fill_with_white_noise`].
#[must_use]
pub fn white_noise(len: usize) -> Vec<f32> {
    let mut buffer = vec![0.0; len];
    fill_with_white_noise(&mut buffer);
    buffer
}

/// A unit-amplitude sine, `increment` is in cycles per sample.
#[must_use]
pub fn sine(len: usize, increment: f32) -> Vec<f32> {
    let mut buffer = vec![0f32; len];
    let mut phase = 0f64;
    let increment = f64::from(increment) * std::f64::consts::TAU;
    for sample in &mut buffer {
        *sample = phase.sin() as f32;
        phase += increment;
    }
    buffer
}

/// A single unit sample followed by `len - 1` zeros.
#[must_use]
pub fn impulse(len: usize) -> Vec<f32> {
    let mut buffer = vec![0f32; len];
    if let Some(first) = buffer.first_mut() {
        *first = 1.0;
    }
    buffer
}

/// Sum of squares.
#[must_use]
pub fn power(data: &[f32]) -> f32 {
    data.iter().map(|x| x * x).sum()
}

/// Applies a Hamming window to the data.
///
/// # Panics
///
/// If the data is longer than 2^23 samples.
fn hamming(data: &mut [f32]) {
    let increment = std::f32::consts::TAU / cast::<usize, f32>(data.len()).unwrap();
    for (index, sample) in data.iter_mut().enumerate() {
        *sample *= 0.54 - 0.46 * (cast::<usize, f32>(index).unwrap() * increment).cos();
    }
}

/// Hamming-windowed real FFT.
///
/// Note that this will thrash `data`.
///
/// # Panics
///
/// If the FFT planner rejects the buffer, which only happens for an empty
/// input.
pub fn windowed_rfft(data: &mut [f32]) -> Vec<Complex<f32>> {
    hamming(data);
    let mut planner = RealFftPlanner::<f32>::new();
    let r2c = planner.plan_fft_forward(data.len());
    let mut spectrum = r2c.make_output_vec();
    r2c.process(data, &mut spectrum).unwrap();
    spectrum
}

/// Total energy of the spectrum over `bins`.
#[must_use]
pub fn band_power(spectrum: &[Complex<f32>], bins: Range<usize>) -> f32 {
    spectrum[bins].iter().map(Complex::norm_sqr).sum()
}
