//! Token sampling: temperature scaling and nucleus (top-p) filtering.

use rand::{
    SeedableRng,
    distributions::{Distribution, WeightedIndex},
    rngs::StdRng,
};
use serde::Serialize;

/// Generation settings passed to a pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingParams {
    pub max_new_tokens: usize,
    pub temperature: f64,
    pub top_p: f64,
    pub do_sample: bool,
    /// Fixed RNG seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 700,
            temperature: 0.7,
            top_p: 0.9,
            do_sample: true,
            seed: None,
        }
    }
}

pub struct Sampler {
    temperature: f64,
    top_p: f64,
    do_sample: bool,
    rng: StdRng,
}

impl Sampler {
    pub fn new(params: &SamplingParams) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            temperature: params.temperature,
            top_p: params.top_p,
            do_sample: params.do_sample,
            rng,
        }
    }

    /// Picks the next token id from last-position logits.
    pub fn sample(&mut self, logits: &[f32]) -> usize {
        if logits.is_empty() {
            return 0;
        }
        if !self.do_sample || self.temperature <= 0.0 {
            return argmax(logits);
        }

        let inv_t = 1.0 / self.temperature;
        let scaled: Vec<f64> = logits.iter().map(|&v| v as f64 * inv_t).collect();
        let mut probs = softmax(&scaled);
        if self.top_p < 1.0 {
            probs = top_p_filter(&probs, self.top_p);
        }

        match WeightedIndex::new(&probs) {
            Ok(dist) => dist.sample(&mut self.rng),
            // all-zero or non-finite weights
            Err(_) => argmax(logits),
        }
    }
}

fn argmax(data: &[f32]) -> usize {
    data.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn softmax(logits: &[f64]) -> Vec<f64> {
    let max_val = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mut probs: Vec<f64> = logits.iter().map(|&v| (v - max_val).exp()).collect();
    let sum: f64 = probs.iter().sum();
    if sum > 0.0 {
        for p in probs.iter_mut() {
            *p /= sum;
        }
    }
    probs
}

/// Keeps the smallest set of most likely tokens whose mass reaches `p`,
/// renormalized. At least one token always survives.
fn top_p_filter(probs: &[f64], p: f64) -> Vec<f64> {
    let mut indexed: Vec<(usize, f64)> = probs.iter().cloned().enumerate().collect();
    indexed.sort_unstable_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut cumsum = 0.0;
    let mut cutoff = indexed.len();
    for (i, &(_, prob)) in indexed.iter().enumerate() {
        cumsum += prob;
        if cumsum >= p {
            cutoff = i + 1;
            break;
        }
    }

    let mut filtered = vec![0.0; probs.len()];
    for &(idx, prob) in &indexed[..cutoff] {
        filtered[idx] = prob;
    }
    let sum: f64 = filtered.iter().sum();
    if sum > 0.0 {
        for v in filtered.iter_mut() {
            *v /= sum;
        }
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(temperature: f64, top_p: f64, do_sample: bool) -> SamplingParams {
        SamplingParams {
            max_new_tokens: 8,
            temperature,
            top_p,
            do_sample,
            seed: Some(7),
        }
    }

    #[test]
    fn greedy_when_sampling_disabled() {
        let mut sampler = Sampler::new(&params(0.7, 0.9, false));
        for _ in 0..10 {
            assert_eq!(sampler.sample(&[0.1, 0.5, 0.3, 0.9, 0.2]), 3);
        }
    }

    #[test]
    fn zero_temperature_is_greedy() {
        let mut sampler = Sampler::new(&params(0.0, 1.0, true));
        assert_eq!(sampler.sample(&[1.0, 5.0, 3.0]), 1);
    }

    #[test]
    fn nucleus_excludes_tail() {
        // softmax([4, 3, -4, -4]) ≈ [0.731, 0.269, 0.0002, 0.0002]
        let mut sampler = Sampler::new(&params(1.0, 0.9, true));
        for _ in 0..200 {
            let tok = sampler.sample(&[4.0, 3.0, -4.0, -4.0]);
            assert!(tok == 0 || tok == 1, "sampled tail token {tok}");
        }
    }

    #[test]
    fn top_p_filter_keeps_single_dominant_token() {
        let filtered = top_p_filter(&[0.95, 0.03, 0.02], 0.9);
        assert_eq!(filtered, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn top_p_filter_renormalizes() {
        let filtered = top_p_filter(&[0.5, 0.3, 0.2], 0.75);
        assert!((filtered[0] - 0.625).abs() < 1e-9);
        assert!((filtered[1] - 0.375).abs() < 1e-9);
        assert_eq!(filtered[2], 0.0);
    }

    #[test]
    fn seeded_sampler_is_reproducible() {
        let logits = [1.0, 1.0, 1.0, 1.0, 1.0];
        let mut a = Sampler::new(&params(0.7, 0.9, true));
        let mut b = Sampler::new(&params(0.7, 0.9, true));
        let seq_a: Vec<usize> = (0..32).map(|_| a.sample(&logits)).collect();
        let seq_b: Vec<usize> = (0..32).map(|_| b.sample(&logits)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn empty_logits() {
        let mut sampler = Sampler::new(&SamplingParams::default());
        assert_eq!(sampler.sample(&[]), 0);
    }
}
