//! Random draws used by the simulation.

use rand::Rng;

/// Integer percentage in `[min, max]` as a fraction, e.g. `percent(rng, -100, 100)`
/// yields one of `-1.00, -0.99, ..., 1.00`.
pub fn percent<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> f32 {
    rng.gen_range(min..=max) as f32 / 100.0
}

/// True with the given probability, clamped to `[0, 1]`.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f32) -> bool {
    let probability = if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    };
    rng.gen_bool(probability as f64)
}

/// Number of items to emit this frame for an expected `rate` per frame.
///
/// The integer part is always emitted; one more is emitted with probability
/// equal to the fractional part, so the long-run mean equals `rate`.
pub fn stochastic_count<R: Rng + ?Sized>(rng: &mut R, rate: f32) -> usize {
    if rate.is_nan() || rate <= 0.0 {
        return 0;
    }
    let whole = rate.floor();
    let mut count = whole as usize;
    if chance(rng, rate - whole) {
        count += 1;
    }
    count
}
