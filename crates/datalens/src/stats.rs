//! Descriptive statistics: running moments, quartiles, histograms and correlation.

use serde::{Deserialize, Serialize};

// =============================================================================
// STREAMING STATISTICS
// =============================================================================
// Welford's online algorithm for computing mean and variance in a single pass.

/// Streaming statistics accumulator using Welford's algorithm.
#[derive(Debug, Clone)]
pub struct StreamingStats {
    count: usize,
    mean: f64,
    m2: f64, // Sum of squared differences from mean
    min: f64,
    max: f64,
}

impl StreamingStats {
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Add a value using Welford's online algorithm.
    pub fn add(&mut self, value: f64) {
        self.count += 1;

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;

        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean of the values seen so far, if any.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Sample variance (n - 1 denominator).
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count > 1).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Convert to a summary, or None when no values were added.
    pub fn summary(&self) -> Option<NumericSummary> {
        if self.count == 0 {
            return None;
        }
        Some(NumericSummary {
            count: self.count,
            mean: self.mean,
            std_dev: self.sample_variance().map(f64::sqrt),
            min: self.min,
            max: self.max,
        })
    }
}

impl Default for StreamingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<f64> for StreamingStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = StreamingStats::new();
        for value in iter {
            stats.add(value);
        }
        stats
    }
}

/// Summary statistics for a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    /// Number of present values.
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; None with fewer than two values.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
}

/// Arithmetic mean, or None for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    values.iter().copied().collect::<StreamingStats>().mean()
}

// =============================================================================
// QUARTILES
// =============================================================================

/// Five-number summary drawn alongside a histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub min: f64,
    /// First quartile (25th percentile).
    pub q1: f64,
    pub median: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
    pub max: f64,
}

impl BoxSummary {
    /// Compute the summary, or None for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Some(Self {
            min: sorted[0],
            q1: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q3: quantile_sorted(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }

    /// Calculate the interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Quantile with linear interpolation between closest ranks.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

// =============================================================================
// HISTOGRAM
// =============================================================================

/// Equal-width bin edges spanning `[min, max]`.
///
/// Returns `bins + 1` edges, or two edges around a single value when the data
/// is constant. Empty input yields no edges.
pub fn bin_edges(values: &[f64], bins: usize) -> Vec<f64> {
    let Some(stats) = values.iter().copied().collect::<StreamingStats>().summary() else {
        return Vec::new();
    };

    let bins = bins.max(1);
    if stats.max == stats.min {
        return vec![stats.min - 0.5, stats.max + 0.5];
    }

    let width = (stats.max - stats.min) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| stats.min + width * i as f64).collect();
    edges.push(stats.max);
    edges
}

/// Count values into the bins described by `edges`.
///
/// Bins are half-open except the last, which includes its upper edge. Values
/// outside the edges are ignored.
pub fn histogram_counts(values: &[f64], edges: &[f64]) -> Vec<usize> {
    if edges.len() < 2 {
        return Vec::new();
    }

    let bins = edges.len() - 1;
    let mut counts = vec![0; bins];
    let (low, high) = (edges[0], edges[bins]);

    for &value in values {
        if value < low || value > high {
            continue;
        }
        // Binary search over edges keeps uneven edges correct
        let search = edges.binary_search_by(|e| {
            e.partial_cmp(&value).unwrap_or(std::cmp::Ordering::Less)
        });
        let index = match search {
            Ok(i) => i.min(bins - 1),
            Err(i) => i - 1,
        };
        counts[index] += 1;
    }

    counts
}

// =============================================================================
// CORRELATION
// =============================================================================

/// Pearson correlation over the rows where both values are present.
///
/// Returns None with fewer than two complete pairs or when either side has
/// zero variance.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
