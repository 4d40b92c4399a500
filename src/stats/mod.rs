//! Empirical distributions and binning helpers

use itertools::Itertools;
use serde::Serialize;

use crate::error::{NetError, Result};

/// Probability of every integer value `0..=max`, i.e. bin counts over the
/// list length
pub fn discrete_distribution(values: &[usize]) -> Result<Vec<f64>> {
    let max = values
        .iter()
        .copied()
        .max()
        .ok_or(NetError::EmptyInput("value list"))?;

    let mut counts = vec![0usize; max + 1];
    for &value in values {
        counts[value] += 1;
    }
    let n = values.len() as f64;
    Ok(counts.into_iter().map(|c| c as f64 / n).collect())
}

fn unique_sorted(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .copied()
        .sorted_by(|a, b| a.total_cmp(b))
        .dedup()
        .collect()
}

/// `P(X < x)` at every distinct value `x`
pub fn cdf(values: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    if values.is_empty() {
        return Err(NetError::EmptyInput("value list"));
    }
    let n = values.len() as f64;
    let points = unique_sorted(values);
    let probabilities = points
        .iter()
        .map(|&x| values.iter().filter(|&&v| v < x).count() as f64 / n)
        .collect();
    Ok((points, probabilities))
}

/// `P(X >= x)` at every distinct value `x`
pub fn ccdf(values: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    let (points, below) = cdf(values)?;
    Ok((points, below.into_iter().map(|p| 1.0 - p).collect()))
}

/// `n_bins` evenly spaced edges from `start` to `end` inclusive
pub fn lin_bins(start: f64, end: f64, n_bins: usize) -> Vec<f64> {
    match n_bins {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n_bins - 1) as f64;
            (0..n_bins).map(|i| start + i as f64 * step).collect()
        }
    }
}

fn log_space(start: f64, end: f64, n: usize) -> Vec<f64> {
    lin_bins(start.log10(), end.log10(), n)
        .into_iter()
        .map(|exponent| 10f64.powf(exponent))
        .collect()
}

/// `n_lin` unit-width linear edges from `start`, followed by `n_log`
/// logarithmically spaced edges up to `end`
pub fn log_bins(start: f64, end: f64, n_log: usize, n_lin: usize) -> Result<Vec<f64>> {
    if start <= 0.0 || end <= start {
        return Err(NetError::InvalidParameter(format!(
            "log bins need 0 < start < end, got {} and {}",
            start, end
        )));
    }
    let mut edges: Vec<f64> = (0..n_lin).map(|i| start + i as f64).collect();
    edges.extend(log_space(start + n_lin as f64, end, n_log));
    Ok(edges)
}

/// Log bins from 1.5 to `1.5 * max_degree`, ten per full decade
pub fn lin_log_bins(max_degree: usize) -> Vec<f64> {
    let top = 1.5 * max_degree as f64;
    if max_degree == 0 {
        return Vec::new();
    }
    // round-off must not lose a whole decade at exact powers of ten
    let decades = (top.log10() - 1.5f64.log10() + 1e-9).floor().max(0.0) as usize;
    log_space(1.5, top, decades * 10)
}

/// Per-bin mean and count of `values` grouped by `x`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinnedStatistic {
    pub edges: Vec<f64>,
    /// Mean of the values in each bin, `None` for empty bins
    pub mean: Vec<Option<f64>>,
    pub count: Vec<usize>,
}

impl BinnedStatistic {
    /// Probability density per bin, normalised by the points that fell
    /// inside the edges
    pub fn density(&self) -> Vec<f64> {
        let total: usize = self.count.iter().sum();
        self.count
            .iter()
            .zip(self.edges.windows(2))
            .map(|(&c, w)| {
                if total == 0 {
                    0.0
                } else {
                    c as f64 / (total as f64 * (w[1] - w[0]))
                }
            })
            .collect()
    }
}

/// Bin `values` by the matching `x` into half-open bins `[e_i, e_{i+1})`; the
/// last bin also includes its right edge. Points outside the edges are
/// dropped.
pub fn binned_statistic(x: &[f64], values: &[f64], edges: &[f64]) -> Result<BinnedStatistic> {
    if edges.len() < 2 {
        return Err(NetError::InvalidParameter(
            "at least two bin edges are required".to_string(),
        ));
    }
    if !edges.windows(2).all(|w| w[0] < w[1]) {
        return Err(NetError::InvalidParameter(
            "bin edges must be strictly increasing".to_string(),
        ));
    }
    if x.len() != values.len() {
        return Err(NetError::InvalidParameter(format!(
            "x and values differ in length: {} vs {}",
            x.len(),
            values.len()
        )));
    }

    let n_bins = edges.len() - 1;
    let last = edges[n_bins];
    let mut sums = vec![0.0; n_bins];
    let mut count = vec![0usize; n_bins];

    for (&xi, &value) in x.iter().zip(values) {
        if xi < edges[0] || xi > last {
            continue;
        }
        let bin = if xi == last {
            n_bins - 1
        } else {
            edges.partition_point(|&e| e <= xi) - 1
        };
        sums[bin] += value;
        count[bin] += 1;
    }

    let mean = sums
        .into_iter()
        .zip(&count)
        .map(|(sum, &c)| (c > 0).then(|| sum / c as f64))
        .collect();

    Ok(BinnedStatistic {
        edges: edges.to_vec(),
        mean,
        count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_normalises_counts() {
        let dist = discrete_distribution(&[1, 1, 2, 4]).unwrap();
        assert_eq!(dist, vec![0.0, 0.5, 0.25, 0.0, 0.25]);
        assert!(discrete_distribution(&[]).is_err());
    }

    #[test]
    fn cdf_counts_strictly_smaller_values() {
        let (points, cdf) = cdf(&[3.0, 1.0, 2.0, 2.0]).unwrap();
        assert_eq!(points, vec![1.0, 2.0, 3.0]);
        assert_eq!(cdf, vec![0.0, 0.25, 0.75]);
    }

    #[test]
    fn ccdf_starts_at_one() {
        let (_, ccdf) = ccdf(&[3.0, 1.0, 2.0, 2.0]).unwrap();
        assert_eq!(ccdf, vec![1.0, 0.75, 0.25]);
    }

    #[test]
    fn linear_and_log_edges() {
        assert_eq!(lin_bins(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let edges = log_bins(1.0, 1000.0, 4, 0).unwrap();
        for (edge, expected) in edges.iter().zip([1.0, 10.0, 100.0, 1000.0]) {
            assert!((edge - expected).abs() < 1e-9 * expected);
        }

        let edges = log_bins(1.0, 100.0, 3, 2).unwrap();
        assert_eq!(edges[..2], [1.0, 2.0]);
        assert!((edges[2] - 3.0).abs() < 1e-12);
        assert!((edges[4] - 100.0).abs() < 1e-9);
        assert!(log_bins(0.0, 10.0, 3, 0).is_err());
    }

    #[test]
    fn density_ignores_points_outside_the_edges() {
        let x = [1.0, 1.0, 2.0, 3.0, 5.0];
        let stat = binned_statistic(&x, &x, &[1.5, 2.5, 4.5]).unwrap();
        assert_eq!(stat.count, vec![1, 1]);
        assert_eq!(stat.density(), vec![0.5, 0.25]);

        let empty = binned_statistic(&[9.0], &[9.0], &[0.0, 1.0]).unwrap();
        assert_eq!(empty.density(), vec![0.0]);
    }

    #[test]
    fn lin_log_bins_cover_the_degree_range() {
        let edges = lin_log_bins(1000);
        assert_eq!(edges.len(), 30);
        assert!((edges[0] - 1.5).abs() < 1e-12);
        assert!((edges[29] - 1500.0).abs() < 1e-9);
        assert!(lin_log_bins(0).is_empty());
    }

    #[test]
    fn binned_means_and_counts() {
        let x = [0.5, 1.5, 1.7, 2.0, 5.0];
        let values = [1.0, 2.0, 4.0, 6.0, 100.0];
        let stat = binned_statistic(&x, &values, &[0.0, 1.0, 2.0]).unwrap();
        assert_eq!(stat.count, vec![1, 3]);
        assert_eq!(stat.mean, vec![Some(1.0), Some(4.0)]);

        let stat = binned_statistic(&[0.5], &[1.0], &[0.0, 1.0, 2.0]).unwrap();
        assert_eq!(stat.mean[1], None);
        assert!(binned_statistic(&x, &values, &[1.0]).is_err());
    }
}
