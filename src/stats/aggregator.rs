//! Mean trend and 95% confidence interval per x value.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::grouping::group_by_x;
use crate::config::{CiMethod, PlotConfig};

/// Nominal coverage of every interval this module produces.
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// Two-sided standard normal quantile for `CONFIDENCE_LEVEL`.
const Z_95: f64 = 1.959_963_984_540_054;

/// Mean of y and its confidence bounds at one x value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub x: f64,
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    method: CiMethod,
    bootstrap_samples: usize,
    seed: u64,
}

impl Aggregator {
    pub fn new(method: CiMethod, bootstrap_samples: usize, seed: u64) -> Self {
        Self {
            method,
            bootstrap_samples: bootstrap_samples.max(1),
            seed,
        }
    }

    pub fn from_config(config: &PlotConfig) -> Self {
        Self::new(config.ci_method, config.bootstrap_samples, config.seed)
    }

    /// Reduce `(x, y)` pairs to one curve point per distinct x, ascending.
    ///
    /// The bootstrap generator is reseeded for every curve, so a curve only
    /// depends on its own points and not on what was aggregated before.
    pub fn curve(&self, points: &[(f64, f64)]) -> Vec<CurvePoint> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        group_by_x(points)
            .into_iter()
            .map(|(x, ys)| {
                if let Some(value) = constant_value(&ys) {
                    return CurvePoint {
                        x,
                        mean: value,
                        lower: value,
                        upper: value,
                    };
                }
                let mean = mean(&ys);
                let (lower, upper) = match self.method {
                    CiMethod::Normal => normal_interval(&ys, mean),
                    CiMethod::Bootstrap => bootstrap_interval(&ys, mean, self.bootstrap_samples, &mut rng),
                };
                CurvePoint { x, mean, lower, upper }
            })
            .collect()
    }
}

/// The shared value when every sample is equal. Summing them again would
/// leave rounding error in the mean and a spurious non-zero width.
fn constant_value(values: &[f64]) -> Option<f64> {
    let first = *values.first()?;
    values.iter().all(|v| *v == first).then_some(first)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// `mean ± z * s / sqrt(n)`; a single sample gives a zero-width interval.
fn normal_interval(values: &[f64], mean: f64) -> (f64, f64) {
    let n = values.len();
    if n < 2 {
        return (mean, mean);
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let half_width = Z_95 * (variance / n as f64).sqrt();
    (mean - half_width, mean + half_width)
}

/// Percentile bootstrap of the mean.
fn bootstrap_interval(values: &[f64], mean: f64, samples: usize, rng: &mut StdRng) -> (f64, f64) {
    let n = values.len();
    if n < 2 {
        return (mean, mean);
    }

    let mut means: Vec<f64> = (0..samples)
        .map(|_| (0..n).map(|_| values[rng.gen_range(0..n)]).sum::<f64>() / n as f64)
        .collect();
    means.sort_by(f64::total_cmp);

    let tail = (1.0 - CONFIDENCE_LEVEL) / 2.0;
    (percentile(&means, tail), percentile(&means, 1.0 - tail))
}

/// Linearly interpolated quantile `q` in `[0, 1]` of ascending `sorted`.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
