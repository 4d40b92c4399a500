//! Mutable graph representation used by the generators and loaders

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};

/// A graph stored as an arena of node labels plus an adjacency index.
///
/// Nodes are dense `u32` indices into the arena. For undirected graphs the
/// adjacency sets are kept symmetric; directed graphs additionally keep the
/// reverse (in-neighbour) index. Edge weights are optional and keyed by the
/// node pair, ordered `(min, max)` when undirected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    directed: bool,
    labels: Vec<String>,
    index: HashMap<String, u32>,
    out_adj: Vec<BTreeSet<u32>>,
    in_adj: Vec<BTreeSet<u32>>,
    weights: HashMap<(u32, u32), f64>,
    edge_count: usize,
}

impl Network {
    /// Create an empty undirected network
    pub fn undirected() -> Self {
        Self::empty(false)
    }

    /// Create an empty directed network
    pub fn directed() -> Self {
        Self::empty(true)
    }

    fn empty(directed: bool) -> Self {
        Self {
            directed,
            labels: Vec::new(),
            index: HashMap::new(),
            out_adj: Vec::new(),
            in_adj: Vec::new(),
            weights: HashMap::new(),
            edge_count: 0,
        }
    }

    /// Create a network with `n` isolated nodes labelled `0..n`
    pub fn with_nodes(n: usize, directed: bool) -> Self {
        let mut network = Self::empty(directed);
        for node in 0..n {
            network.add_node(&node.to_string());
        }
        network
    }

    /// Get or create the node with the given label
    pub fn add_node(&mut self, label: &str) -> u32 {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }

        let idx = self.labels.len() as u32;
        self.index.insert(label.to_string(), idx);
        self.labels.push(label.to_string());
        self.out_adj.push(BTreeSet::new());
        if self.directed {
            self.in_adj.push(BTreeSet::new());
        }
        idx
    }

    /// Look up a node by label
    pub fn node_id(&self, label: &str) -> Option<u32> {
        self.index.get(label).copied()
    }

    /// Label of a node
    pub fn label(&self, node: u32) -> &str {
        &self.labels[node as usize]
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        !self.weights.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Iterate over all node indices
    pub fn nodes(&self) -> impl Iterator<Item = u32> {
        0..self.labels.len() as u32
    }

    fn check(&self, node: u32) -> Result<()> {
        if (node as usize) < self.labels.len() {
            Ok(())
        } else {
            Err(NetError::UnknownNode(node))
        }
    }

    fn key(&self, u: u32, v: u32) -> (u32, u32) {
        if self.directed || u <= v {
            (u, v)
        } else {
            (v, u)
        }
    }

    /// Insert an edge. Self-loops and existing edges are rejected and
    /// reported as `Ok(false)`.
    pub fn add_edge(&mut self, u: u32, v: u32) -> Result<bool> {
        self.check(u)?;
        self.check(v)?;
        if u == v || self.out_adj[u as usize].contains(&v) {
            return Ok(false);
        }

        self.out_adj[u as usize].insert(v);
        if self.directed {
            self.in_adj[v as usize].insert(u);
        } else {
            self.out_adj[v as usize].insert(u);
        }
        self.edge_count += 1;
        Ok(true)
    }

    /// Insert an edge and attach a weight to it
    pub fn add_weighted_edge(&mut self, u: u32, v: u32, weight: f64) -> Result<bool> {
        let inserted = self.add_edge(u, v)?;
        if inserted {
            let key = self.key(u, v);
            self.weights.insert(key, weight);
        }
        Ok(inserted)
    }

    /// Remove an edge, returning whether it was present
    pub fn remove_edge(&mut self, u: u32, v: u32) -> bool {
        if (u as usize) >= self.labels.len() || !self.out_adj[u as usize].remove(&v) {
            return false;
        }

        if self.directed {
            self.in_adj[v as usize].remove(&u);
        } else {
            self.out_adj[v as usize].remove(&u);
        }
        let key = self.key(u, v);
        self.weights.remove(&key);
        self.edge_count -= 1;
        true
    }

    pub fn has_edge(&self, u: u32, v: u32) -> bool {
        self.out_adj
            .get(u as usize)
            .map_or(false, |adj| adj.contains(&v))
    }

    /// Weight of an edge, if the edge exists and carries one
    pub fn weight(&self, u: u32, v: u32) -> Option<f64> {
        self.weights.get(&self.key(u, v)).copied()
    }

    /// Out-neighbours (all neighbours for undirected graphs)
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = u32> + '_ {
        self.out_adj[node as usize].iter().copied()
    }

    /// In-neighbours (all neighbours for undirected graphs)
    pub fn in_neighbors(&self, node: u32) -> impl Iterator<Item = u32> + '_ {
        let adj = if self.directed {
            &self.in_adj[node as usize]
        } else {
            &self.out_adj[node as usize]
        };
        adj.iter().copied()
    }

    pub fn out_degree(&self, node: u32) -> usize {
        self.out_adj[node as usize].len()
    }

    pub fn in_degree(&self, node: u32) -> usize {
        if self.directed {
            self.in_adj[node as usize].len()
        } else {
            self.out_adj[node as usize].len()
        }
    }

    /// Total degree: in + out for directed graphs
    pub fn degree(&self, node: u32) -> usize {
        if self.directed {
            self.out_degree(node) + self.in_degree(node)
        } else {
            self.out_degree(node)
        }
    }

    /// Sum of incident edge weights, unweighted edges counting as 1
    pub fn strength(&self, node: u32) -> f64 {
        self.neighbors(node)
            .map(|v| self.weight(node, v).unwrap_or(1.0))
            .sum()
    }

    /// All edges; undirected edges are listed once as `(u, v)` with `u < v`
    pub fn edges(&self) -> Vec<(u32, u32)> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for u in self.nodes() {
            for v in self.neighbors(u) {
                if self.directed || u < v {
                    edges.push((u, v));
                }
            }
        }
        edges
    }

    /// Nodes that are neither `node` itself nor adjacent to it
    pub fn non_neighbors(&self, node: u32) -> Vec<u32> {
        let adj = &self.out_adj[node as usize];
        self.nodes()
            .filter(|&v| v != node && !adj.contains(&v))
            .collect()
    }

    /// Undirected petgraph view; node weights are the arena indices and edge
    /// weights default to 1
    pub fn to_petgraph(&self) -> UnGraph<u32, f64> {
        let mut graph = UnGraph::with_capacity(self.node_count(), self.edge_count);
        for node in self.nodes() {
            graph.add_node(node);
        }
        for (u, v) in self.edges() {
            if self.directed && u > v && self.has_edge(v, u) {
                continue;
            }
            let w = self.weight(u, v).unwrap_or(1.0);
            graph.update_edge(NodeIndex::new(u as usize), NodeIndex::new(v as usize), w);
        }
        graph
    }
}
