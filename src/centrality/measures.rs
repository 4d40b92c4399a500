//! Node and edge centrality measures on the compressed adjacency

use std::collections::{HashMap, VecDeque};

use rayon::prelude::*;

use crate::error::{NetError, Result};
use crate::graph::CompressedGraph;

/// Degree of every node; in plus out degree for directed graphs
pub fn degree_centrality(graph: &CompressedGraph) -> Vec<f64> {
    let mut degree: Vec<f64> = (0..graph.node_count)
        .map(|node| graph.out_degree(node) as f64)
        .collect();
    if graph.directed {
        let incoming = graph.transpose();
        for (node, d) in degree.iter_mut().enumerate() {
            *d += incoming.out_degree(node) as f64;
        }
    }
    degree
}

/// Shortest-path DAG from one source, as built by Brandes' algorithm
struct ShortestPaths {
    /// Nodes in non-decreasing distance from the source
    order: Vec<usize>,
    /// For each node, its predecessors on shortest paths
    predecessors: Vec<Vec<usize>>,
    /// Number of shortest paths from the source
    sigma: Vec<f64>,
}

fn shortest_paths(graph: &CompressedGraph, source: usize) -> ShortestPaths {
    let n = graph.node_count;
    let mut order = Vec::with_capacity(n);
    let mut predecessors = vec![Vec::new(); n];
    let mut sigma = vec![0.0; n];
    let mut distance: Vec<i64> = vec![-1; n];

    sigma[source] = 1.0;
    distance[source] = 0;
    let mut queue = VecDeque::from([source]);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        for &w in graph.outgoing_edges(v) {
            let w = w as usize;
            if distance[w] < 0 {
                distance[w] = distance[v] + 1;
                queue.push_back(w);
            }
            if distance[w] == distance[v] + 1 {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    ShortestPaths {
        order,
        predecessors,
        sigma,
    }
}

/// Betweenness centrality by Brandes' algorithm, normalised by
/// `(n-1)(n-2)` ordered pairs. Graphs with fewer than three nodes score 0.
pub fn betweenness(graph: &CompressedGraph) -> Vec<f64> {
    let n = graph.node_count;
    if n <= 2 {
        return vec![0.0; n];
    }

    let raw = (0..n)
        .into_par_iter()
        .map(|source| {
            let paths = shortest_paths(graph, source);
            let mut delta = vec![0.0; n];
            let mut contribution = vec![0.0; n];
            for &w in paths.order.iter().rev() {
                for &v in &paths.predecessors[w] {
                    delta[v] += paths.sigma[v] / paths.sigma[w] * (1.0 + delta[w]);
                }
                if w != source {
                    contribution[w] += delta[w];
                }
            }
            contribution
        })
        .reduce(|| vec![0.0; n], sum_vectors);

    let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
    raw.into_iter().map(|b| b * scale).collect()
}

/// Edge betweenness by Brandes' algorithm, normalised by `n(n-1)` ordered
/// pairs.
///
/// Undirected edges are keyed `(min, max)`; directed ones `(source, target)`.
/// Output is sorted by key.
pub fn edge_betweenness(graph: &CompressedGraph) -> Vec<((u32, u32), f64)> {
    let n = graph.node_count;
    let stored = graph.stored_edge_count();

    let raw = (0..n)
        .into_par_iter()
        .map(|source| {
            let paths = shortest_paths(graph, source);
            let mut delta = vec![0.0; n];
            let mut contribution = vec![0.0; stored];
            for &w in paths.order.iter().rev() {
                for &v in &paths.predecessors[w] {
                    let c = paths.sigma[v] / paths.sigma[w] * (1.0 + delta[w]);
                    if let Some(slot) = edge_slot(graph, v, w) {
                        contribution[slot] += c;
                    }
                    delta[v] += c;
                }
            }
            contribution
        })
        .reduce(|| vec![0.0; stored], sum_vectors);

    let scale = if n > 1 {
        1.0 / (n * (n - 1)) as f64
    } else {
        0.0
    };

    let mut scores: HashMap<(u32, u32), f64> = HashMap::with_capacity(stored);
    for v in 0..n {
        let start = graph.offsets[v] as usize;
        for (i, &w) in graph.outgoing_edges(v).iter().enumerate() {
            let v = v as u32;
            let key = if graph.directed { (v, w) } else { (v.min(w), v.max(w)) };
            *scores.entry(key).or_insert(0.0) += raw[start + i] * scale;
        }
    }

    let mut scores: Vec<_> = scores.into_iter().collect();
    scores.sort_by_key(|&(key, _)| key);
    scores
}

/// Position of edge `v -> w` in the adjacency array
fn edge_slot(graph: &CompressedGraph, v: usize, w: usize) -> Option<usize> {
    graph
        .outgoing_edges(v)
        .binary_search(&(w as u32))
        .ok()
        .map(|i| graph.offsets[v] as usize + i)
}

fn sum_vectors(mut a: Vec<f64>, b: Vec<f64>) -> Vec<f64> {
    for (x, y) in a.iter_mut().zip(b) {
        *x += y;
    }
    a
}

/// Hop distances from `source`, `None` for unreachable nodes
fn distances(graph: &CompressedGraph, source: usize) -> Vec<Option<usize>> {
    let mut distance = vec![None; graph.node_count];
    distance[source] = Some(0);
    let mut queue = VecDeque::from([source]);
    while let Some(v) = queue.pop_front() {
        let next = distance[v].map_or(0, |d| d + 1);
        for &w in graph.outgoing_edges(v) {
            let w = w as usize;
            if distance[w].is_none() {
                distance[w] = Some(next);
                queue.push_back(w);
            }
        }
    }
    distance
}

/// Closeness centrality, `(r-1)/sum(d)` scaled by `(r-1)/(n-1)` where `r` is
/// the number of nodes that can reach the node.
///
/// Directed graphs use incoming distances. Isolated nodes score 0.
pub fn closeness(graph: &CompressedGraph) -> Vec<f64> {
    let n = graph.node_count;
    let reversed;
    let search = if graph.directed {
        reversed = graph.transpose();
        &reversed
    } else {
        graph
    };

    (0..n)
        .into_par_iter()
        .map(|node| {
            let reached: Vec<usize> = distances(search, node).into_iter().flatten().collect();
            let total: usize = reached.iter().sum();
            let r = reached.len();
            if total > 0 && n > 1 {
                let r = (r - 1) as f64;
                (r / total as f64) * (r / (n - 1) as f64)
            } else {
                0.0
            }
        })
        .collect()
}

/// Eigenvector centrality by power iteration on `A + I`.
///
/// Starts from the uniform vector, L2-normalises after each round, and stops
/// once the L1 change drops below `n * tolerance`.
pub fn eigenvector(graph: &CompressedGraph, tolerance: f64, max_iterations: usize) -> Result<Vec<f64>> {
    let n = graph.node_count;
    if n == 0 {
        return Err(NetError::EmptyGraph);
    }

    let mut x = vec![1.0 / n as f64; n];
    for iteration in 0..max_iterations {
        let last = x.clone();
        for (node, &value) in last.iter().enumerate() {
            for &neighbor in graph.outgoing_edges(node) {
                x[neighbor as usize] += value;
            }
        }

        let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
        let norm = if norm == 0.0 { 1.0 } else { norm };
        x.iter_mut().for_each(|v| *v /= norm);

        let change: f64 = x.iter().zip(&last).map(|(a, b)| (a - b).abs()).sum();
        log::debug!("eigenvector iteration {}: change {:.3e}", iteration + 1, change);
        if change < n as f64 * tolerance {
            return Ok(x);
        }
    }

    Err(NetError::NoConvergence {
        iterations: max_iterations,
    })
}

/// k-shell index of every node: the largest k whose k-core contains it.
///
/// Peels nodes of minimum remaining degree, raising k whenever the minimum
/// exceeds it. Directed graphs peel on in-degree plus out-degree.
pub fn k_shell(graph: &CompressedGraph) -> Vec<usize> {
    let n = graph.node_count;
    let incoming = graph.directed.then(|| graph.transpose());
    let mut degree: Vec<usize> = (0..n)
        .map(|node| graph.out_degree(node) + incoming.as_ref().map_or(0, |t| t.out_degree(node)))
        .collect();
    let mut removed = vec![false; n];
    let mut shell = vec![0; n];
    let mut remaining = n;
    let mut k = 0;

    while remaining > 0 {
        let min_degree = (0..n)
            .filter(|&node| !removed[node])
            .map(|node| degree[node])
            .min()
            .unwrap_or(0);
        k = k.max(min_degree);

        let mut stack: Vec<usize> = (0..n)
            .filter(|&node| !removed[node] && degree[node] <= k)
            .collect();
        while let Some(node) = stack.pop() {
            if removed[node] {
                continue;
            }
            removed[node] = true;
            shell[node] = k;
            remaining -= 1;
            let predecessors = incoming.as_ref().map_or(&[][..], |t| t.outgoing_edges(node));
            for &neighbor in graph.outgoing_edges(node).iter().chain(predecessors) {
                let neighbor = neighbor as usize;
                if !removed[neighbor] {
                    degree[neighbor] -= 1;
                    if degree[neighbor] <= k {
                        stack.push(neighbor);
                    }
                }
            }
        }
    }

    shell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Network;

    fn compressed(n: usize, edges: &[(u32, u32)]) -> CompressedGraph {
        let mut network = Network::with_nodes(n, false);
        for &(u, v) in edges {
            network.add_edge(u, v).unwrap();
        }
        CompressedGraph::from_network(&network)
    }

    fn path() -> CompressedGraph {
        compressed(4, &[(0, 1), (1, 2), (2, 3)])
    }

    fn star() -> CompressedGraph {
        compressed(5, &[(0, 1), (0, 2), (0, 3), (0, 4)])
    }

    #[test]
    fn degree_counts_neighbors() {
        assert_eq!(degree_centrality(&star()), vec![4.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn betweenness_on_path_and_star() {
        let b = betweenness(&path());
        assert!(b[0].abs() < 1e-12);
        assert!((b[1] - 2.0 / 3.0).abs() < 1e-12);
        assert!((b[2] - 2.0 / 3.0).abs() < 1e-12);

        let b = betweenness(&star());
        assert!((b[0] - 1.0).abs() < 1e-12);
        assert!(b[1..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn edge_betweenness_peaks_on_the_bridge() {
        let scores = edge_betweenness(&path());
        assert_eq!(scores.len(), 3);
        let lookup: HashMap<_, _> = scores.into_iter().collect();
        assert!((lookup[&(1, 2)] - 8.0 / 12.0).abs() < 1e-12);
        assert!((lookup[&(0, 1)] - 0.5).abs() < 1e-12);
        assert!((lookup[&(2, 3)] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn closeness_on_path() {
        let c = closeness(&path());
        assert!((c[0] - 0.5).abs() < 1e-12);
        assert!((c[1] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn closeness_of_isolated_node_is_zero() {
        let c = closeness(&compressed(3, &[(0, 1)]));
        assert_eq!(c[2], 0.0);
        // reach 1 of 2 others at distance 1
        assert!((c[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn eigenvector_on_triangle_is_uniform() {
        let graph = compressed(3, &[(0, 1), (1, 2), (2, 0)]);
        let x = eigenvector(&graph, 1e-6, 100).unwrap();
        for v in x {
            assert!((v - 1.0 / 3f64.sqrt()).abs() < 1e-9);
        }
    }

    #[test]
    fn eigenvector_favours_the_hub() {
        let x = eigenvector(&star(), 1e-6, 1000).unwrap();
        assert!(x[1..].iter().all(|&leaf| x[0] > leaf));
    }

    #[test]
    fn eigenvector_reports_non_convergence() {
        let result = eigenvector(&star(), 1e-12, 1);
        assert!(matches!(result, Err(NetError::NoConvergence { iterations: 1 })));
    }

    #[test]
    fn k_shell_separates_pendants() {
        let graph = compressed(5, &[(0, 1), (1, 2), (2, 0), (0, 3), (3, 4)]);
        assert_eq!(k_shell(&graph), vec![2, 2, 2, 1, 1]);
    }

    #[test]
    fn k_shell_counts_in_and_out_links_when_directed() {
        let mut network = Network::with_nodes(4, true);
        for (u, v) in [(0, 1), (1, 2), (2, 0), (3, 0)] {
            network.add_edge(u, v).unwrap();
        }
        let graph = CompressedGraph::from_network(&network);
        assert_eq!(k_shell(&graph), vec![2, 2, 2, 1]);
    }
}
