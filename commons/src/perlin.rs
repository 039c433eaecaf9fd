use crate::M;
use noise::{utils::*, Perlin, Seedable};

/// Weights for `octaves` layers where each layer contributes `persistence` times the previous.
pub fn octave_weights(octaves: usize, persistence: f64) -> Vec<f64> {
    (0..octaves).map(|i| persistence.powi(i as i32)).collect()
}

/// Sum of Perlin layers, layer `i` sampled at frequency `2^i` and seeded with `seed + i`.
pub fn stacked_perlin_noise(width: usize, height: usize, seed: u32, weights: &[f64]) -> M<f64> {
    let perlin = Perlin::new();
    weights
        .iter()
        .enumerate()
        .filter(|(_, weight)| **weight != 0.0)
        .fold(M::zeros(width, height), |acc, (i, weight)| {
            let frequency = 2f64.powi(i as i32);
            let layer = perlin_noise(&perlin, frequency, seed.wrapping_add(i as u32), width, height);
            acc + layer * *weight
        })
}

fn perlin_noise(
    perlin: &Perlin,
    frequency: f64,
    seed: u32,
    width: usize,
    height: usize,
) -> M<f64> {
    let perlin = perlin.set_seed(seed);
    let noise = PlaneMapBuilder::new(&perlin)
        .set_x_bounds(-frequency / 2.0, frequency / 2.0)
        .set_y_bounds(-frequency / 2.0, frequency / 2.0)
        .set_size(width, height)
        .build();
    M::from_fn(width, height, |x, y| noise.get_value(x, y))
}
