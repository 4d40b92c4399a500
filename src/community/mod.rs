//! Community partitions and their comparison

pub mod metrics;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use metrics::{entropy, mutual_information, variation_of_information};

/// A hard partition: community label -> member node ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub communities: BTreeMap<usize, Vec<u32>>,
}

impl Partition {
    /// Build a partition from communities labelled 0, 1, ...
    pub fn from_communities<I>(communities: I) -> Self
    where
        I: IntoIterator<Item = Vec<u32>>,
    {
        Self {
            communities: communities.into_iter().enumerate().collect(),
        }
    }

    /// Total number of nodes over all communities
    pub fn node_count(&self) -> usize {
        self.communities.values().map(Vec::len).sum()
    }

    pub fn len(&self) -> usize {
        self.communities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    /// Community sizes in label order
    pub fn sizes(&self) -> Vec<usize> {
        self.communities.values().map(Vec::len).collect()
    }
}

impl FromIterator<(usize, Vec<u32>)> for Partition {
    fn from_iter<I: IntoIterator<Item = (usize, Vec<u32>)>>(iter: I) -> Self {
        Self {
            communities: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_nodes() {
        let partition = Partition::from_communities(vec![vec![1, 2, 3], vec![4]]);
        assert_eq!(partition.node_count(), 4);
        assert_eq!(partition.len(), 2);
        assert_eq!(partition.sizes(), vec![3, 1]);
    }
}
