//! Centrality measures and PageRank

pub mod measures;
pub mod pagerank;

pub use measures::{betweenness, closeness, degree_centrality, edge_betweenness, eigenvector, k_shell};
pub use pagerank::{damping_sweep, power_iteration, random_walk};

/// The `k` highest scoring nodes, best first; ties go to the lower index
pub fn top_k(scores: &[f64], k: usize) -> Vec<(u32, f64)> {
    let mut ranked: Vec<(u32, f64)> = scores
        .iter()
        .enumerate()
        .map(|(node, &score)| (node as u32, score))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_k_orders_by_score() {
        let ranked = top_k(&[0.1, 0.5, 0.5, 0.2], 3);
        assert_eq!(ranked, vec![(1, 0.5), (2, 0.5), (3, 0.2)]);
        assert_eq!(top_k(&[1.0], 5).len(), 1);
    }
}
