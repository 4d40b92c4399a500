//! Breadth-first frontier expansion with loop accounting

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;
use statrs::statistics::Statistics;

use crate::error::{NetError, Result};
use crate::graph::CompressedGraph;

/// The state of a layer-by-layer breadth-first search
#[derive(Debug, Clone)]
pub struct Frontier {
    /// Every node reached so far, boundary included
    pub visited: HashSet<u32>,
    /// Nodes reached in the last expansion
    pub boundary: HashSet<u32>,
}

impl Frontier {
    /// Start a search at `start`
    pub fn new(start: u32) -> Self {
        Self {
            visited: HashSet::from([start]),
            boundary: HashSet::from([start]),
        }
    }

    /// Fraction of boundary edges that close loops.
    ///
    /// Counts the edges from the boundary into the visited set, subtracts the
    /// one edge per boundary node a tree would have, and divides by the count.
    /// Returns 0 when only the start node is visited or there are no such edges.
    pub fn loop_edge_fraction(&self, graph: &CompressedGraph) -> f64 {
        if self.visited.len() == 1 {
            return 0.0;
        }

        let edge_count: usize = self
            .boundary
            .iter()
            .map(|&node| {
                graph
                    .outgoing_edges(node as usize)
                    .iter()
                    .filter(|&neighbor| {
                        self.visited.contains(neighbor) || self.boundary.contains(neighbor)
                    })
                    .count()
            })
            .sum();

        if edge_count == 0 {
            return 0.0;
        }
        let loop_count = edge_count.saturating_sub(self.boundary.len());
        loop_count as f64 / edge_count as f64
    }

    /// Advance one layer: unvisited neighbours of the boundary become the new
    /// boundary
    pub fn expand(&mut self, graph: &CompressedGraph) {
        let mut new_boundary = HashSet::new();
        for &node in &self.boundary {
            for &neighbor in graph.outgoing_edges(node as usize) {
                if self.visited.insert(neighbor) {
                    new_boundary.insert(neighbor);
                }
            }
        }
        self.boundary = new_boundary;
    }
}

/// Per-depth averages over many breadth-first searches
#[derive(Debug, Clone, Serialize)]
pub struct BreadthFirstProfile {
    /// Mean boundary size at each depth 0..=max_depth
    pub node_count: Vec<f64>,
    /// Mean loop-edge fraction at each depth
    pub loop_edge_fraction: Vec<f64>,
    /// Tree expectation avg_degree^depth
    pub node_count_theoretical: Vec<f64>,
}

/// Run `number_of_samples` searches from random start nodes up to
/// `max_depth`, recording boundary size and loop fraction before each
/// expansion, and average them per depth.
pub fn sample_breadth_first_search<R: Rng + ?Sized>(
    graph: &CompressedGraph,
    avg_degree: f64,
    number_of_samples: usize,
    max_depth: usize,
    rng: &mut R,
) -> Result<BreadthFirstProfile> {
    if graph.node_count == 0 {
        return Err(NetError::EmptyGraph);
    }
    if number_of_samples == 0 {
        return Err(NetError::EmptyInput("number_of_samples"));
    }

    let mut node_count = vec![Vec::with_capacity(number_of_samples); max_depth + 1];
    let mut loop_fraction = vec![Vec::with_capacity(number_of_samples); max_depth + 1];

    for _ in 0..number_of_samples {
        let start = rng.gen_range(0..graph.node_count) as u32;
        let mut frontier = Frontier::new(start);

        for depth in 0..=max_depth {
            let boundary_size = frontier.boundary.len() as f64;
            let fraction = frontier.loop_edge_fraction(graph);
            frontier.expand(graph);

            node_count[depth].push(boundary_size);
            loop_fraction[depth].push(fraction);
        }
    }

    Ok(BreadthFirstProfile {
        node_count: node_count.iter().map(|v| v.mean()).collect(),
        loop_edge_fraction: loop_fraction.iter().map(|v| v.mean()).collect(),
        node_count_theoretical: (0..=max_depth)
            .map(|d| avg_degree.powi(d as i32))
            .collect(),
    })
}
