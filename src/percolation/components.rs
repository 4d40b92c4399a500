//! Connected components and component-size statistics

use std::collections::{BTreeMap, HashMap};

use crate::graph::Network;

/// Component size -> number of components of that size
pub type ComponentSizeDistribution = BTreeMap<usize, usize>;

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Size of each set, valid at the roots
    size: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            size: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut current = x;
        while current != root {
            let next = self.parent[current as usize];
            self.parent[current as usize] = root;
            current = next;
        }
        root
    }

    /// Union the sets containing x and y, returning the size of the merged set
    pub fn union(&mut self, x: u32, y: u32) -> u32 {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return self.size[root_x as usize];
        }

        // Union by size: attach smaller tree under root of larger tree
        let (big, small) = if self.size[root_x as usize] >= self.size[root_y as usize] {
            (root_x, root_y)
        } else {
            (root_y, root_x)
        };
        self.parent[small as usize] = big;
        self.size[big as usize] += self.size[small as usize];
        self.size[big as usize]
    }

    /// Get the size of the set containing x
    pub fn size(&mut self, x: u32) -> u32 {
        let root = self.find(x);
        self.size[root as usize]
    }
}

/// Connected components (weakly connected for directed graphs), largest first
pub fn connected_components(network: &Network) -> Vec<Vec<u32>> {
    let mut sets = DisjointSets::new(network.node_count());
    for (u, v) in network.edges() {
        sets.union(u, v);
    }

    let mut by_root: HashMap<u32, Vec<u32>> = HashMap::new();
    for node in network.nodes() {
        let root = sets.find(node);
        by_root.entry(root).or_default().push(node);
    }

    let mut components: Vec<Vec<u32>> = by_root.into_values().collect();
    components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));
    components
}

/// Nodes of the largest connected component (empty for an empty graph)
pub fn giant_component(network: &Network) -> Vec<u32> {
    connected_components(network)
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// Unnormalised component size distribution of a network
pub fn component_size_distribution(network: &Network) -> ComponentSizeDistribution {
    let mut dist = ComponentSizeDistribution::new();
    for component in connected_components(network) {
        *dist.entry(component.len()).or_insert(0) += 1;
    }
    dist
}

/// Largest component size in a distribution, 0 when it is empty
pub fn largest_component_size(dist: &ComponentSizeDistribution) -> usize {
    dist.keys().next_back().copied().unwrap_or(0)
}

/// Susceptibility: the second moment of the component sizes with the giant
/// component excluded, (sum s^2 n_s - S^2) / (sum s n_s - S).
///
/// Returns 0 when nothing remains after removing the giant component.
pub fn susceptibility(dist: &ComponentSizeDistribution) -> f64 {
    let giant = largest_component_size(dist) as f64;
    let (numerator, denominator) = dist.iter().fold((0.0, 0.0), |(num, den), (&size, &freq)| {
        let size = size as f64;
        let freq = freq as f64;
        (num + size * size * freq, den + size * freq)
    });

    let numerator = numerator - giant * giant;
    let denominator = denominator - giant;
    if denominator <= 0.0 {
        return 0.0;
    }
    numerator / denominator
}
