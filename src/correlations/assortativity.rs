//! Degree correlations: assortativity, joint degree counts and nearest
//! neighbour degree

use std::collections::BTreeMap;

use ndarray::Array2;
use statrs::statistics::Statistics;

use crate::error::{NetError, Result};
use crate::graph::Network;

/// Degrees at both ends of every edge, each undirected edge in both
/// orientations: `2m` pairs
pub fn edge_degree_pairs(network: &Network) -> (Vec<f64>, Vec<f64>) {
    let edges = network.edges();
    let mut x = Vec::with_capacity(2 * edges.len());
    let mut y = Vec::with_capacity(2 * edges.len());

    for &(u, v) in &edges {
        x.push(network.degree(u) as f64);
        y.push(network.degree(v) as f64);
    }
    for &(u, v) in &edges {
        x.push(network.degree(v) as f64);
        y.push(network.degree(u) as f64);
    }
    (x, y)
}

/// Pearson correlation of edge-end degrees. Returns 0 when either side has
/// no variance.
pub fn assortativity(x_degrees: &[f64], y_degrees: &[f64]) -> Result<f64> {
    if x_degrees.len() != y_degrees.len() {
        return Err(NetError::InvalidParameter(format!(
            "degree sequences differ in length: {} vs {}",
            x_degrees.len(),
            y_degrees.len()
        )));
    }
    if x_degrees.len() < 2 {
        return Err(NetError::EmptyInput("edge degree pairs"));
    }

    let sx = x_degrees.std_dev();
    let sy = y_degrees.std_dev();
    if sx == 0.0 || sy == 0.0 {
        return Ok(0.0);
    }
    Ok(x_degrees.covariance(y_degrees) / (sx * sy))
}

/// Counts of edge-end degree pairs on the grid `[kmin, kmax]^2`; entry
/// `(i, j)` counts pairs `(kmin + i, kmin + j)`. Returns `kmin` alongside.
pub fn joint_degree_counts(x_degrees: &[f64], y_degrees: &[f64]) -> Result<(usize, Array2<usize>)> {
    let all = x_degrees.iter().chain(y_degrees);
    let kmin = all.clone().fold(f64::INFINITY, |a, &b| a.min(b));
    let kmax = all.fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    if !kmin.is_finite() {
        return Err(NetError::EmptyInput("edge degree pairs"));
    }

    let (kmin, kmax) = (kmin as usize, kmax as usize);
    let size = kmax - kmin + 1;
    let mut counts = Array2::<usize>::zeros((size, size));
    for (&x, &y) in x_degrees.iter().zip(y_degrees) {
        counts[[x as usize - kmin, y as usize - kmin]] += 1;
    }
    Ok((kmin, counts))
}

/// Average degree of each node's neighbours; 0 for isolated nodes
pub fn nearest_neighbor_degree(network: &Network) -> Vec<f64> {
    network
        .nodes()
        .map(|node| {
            let k = network.degree(node);
            if k == 0 {
                return 0.0;
            }
            let total: usize = network.neighbors(node).map(|n| network.degree(n)).sum();
            total as f64 / k as f64
        })
        .collect()
}

/// Mean of `y` for every distinct `x`, with each distinct value its own bin.
/// Returns the sorted distinct values and their means.
pub fn simple_bin_average(x: &[usize], y: &[f64]) -> (Vec<usize>, Vec<f64>) {
    let mut bins: BTreeMap<usize, (f64, usize)> = BTreeMap::new();
    for (&key, &value) in x.iter().zip(y) {
        let entry = bins.entry(key).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    bins.into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(leaves: usize) -> Network {
        let mut network = Network::with_nodes(leaves + 1, false);
        for leaf in 1..=leaves as u32 {
            network.add_edge(0, leaf).unwrap();
        }
        network
    }

    #[test]
    fn pairs_cover_both_orientations() {
        let (x, y) = edge_degree_pairs(&star(3));
        assert_eq!(x.len(), 6);
        assert_eq!(x[..3], [3.0, 3.0, 3.0]);
        assert_eq!(y[3..], [3.0, 3.0, 3.0]);
    }

    #[test]
    fn star_is_disassortative() {
        let (x, y) = edge_degree_pairs(&star(4));
        let r = assortativity(&x, &y).unwrap();
        assert!((r + 1.0).abs() < 1e-9, "r = {}", r);
    }

    #[test]
    fn regular_graph_has_zero_assortativity() {
        let mut ring = Network::with_nodes(5, false);
        for i in 0..5u32 {
            ring.add_edge(i, (i + 1) % 5).unwrap();
        }
        let (x, y) = edge_degree_pairs(&ring);
        assert_eq!(assortativity(&x, &y).unwrap(), 0.0);
    }

    #[test]
    fn joint_counts_are_symmetric() {
        let (x, y) = edge_degree_pairs(&star(3));
        let (kmin, counts) = joint_degree_counts(&x, &y).unwrap();
        assert_eq!(kmin, 1);
        assert_eq!(counts.dim(), (3, 3));
        assert_eq!(counts[[0, 2]], 3);
        assert_eq!(counts[[2, 0]], 3);
        assert_eq!(counts.sum(), 6);
    }

    #[test]
    fn knn_of_star() {
        let knn = nearest_neighbor_degree(&star(3));
        assert_eq!(knn, vec![1.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn bin_average_groups_equal_keys() {
        let (bins, means) = simple_bin_average(&[3, 1, 1, 3, 2], &[1.0, 2.0, 4.0, 3.0, 5.0]);
        assert_eq!(bins, vec![1, 2, 3]);
        assert_eq!(means, vec![3.0, 5.0, 2.0]);
    }
}
