//! Information-theoretic comparison of partitions

use std::collections::HashSet;

use crate::community::Partition;
use crate::error::{NetError, Result};

fn check_sizes(a: &Partition, b: &Partition) -> Result<f64> {
    let (left, right) = (a.node_count(), b.node_count());
    if left != right {
        return Err(NetError::PartitionMismatch { left, right });
    }
    Ok(left as f64)
}

/// Shannon entropy (bits) of the community size distribution
pub fn entropy(partition: &Partition) -> f64 {
    let n = partition.node_count() as f64;
    -partition
        .communities
        .values()
        .map(Vec::len)
        .filter(|&size| size > 0)
        .map(|size| {
            let share = size as f64 / n;
            share * share.log2()
        })
        .sum::<f64>()
}

/// Mutual information (bits) between two partitions of the same node set
pub fn mutual_information(a: &Partition, b: &Partition) -> Result<f64> {
    let n = check_sizes(a, b)?;

    let b_sets: Vec<(usize, HashSet<u32>)> = b
        .communities
        .values()
        .map(|nodes| (nodes.len(), nodes.iter().copied().collect()))
        .collect();

    let mut mi = 0.0;
    for a_nodes in a.communities.values() {
        let n1 = a_nodes.len() as f64;
        for (n2, b_set) in &b_sets {
            let shared = a_nodes.iter().filter(|&node| b_set.contains(node)).count();
            if shared == 0 {
                continue;
            }
            let shared = shared as f64;
            mi += shared / n * (shared * n / (n1 * *n2 as f64)).log2();
        }
    }
    Ok(mi)
}

/// Variation of information: H(A) + H(B) - 2 I(A; B)
pub fn variation_of_information(a: &Partition, b: &Partition) -> Result<f64> {
    let mi = mutual_information(a, b)?;
    Ok(entropy(a) + entropy(b) - 2.0 * mi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise_partitions() -> (Partition, Partition) {
        let first = Partition::from_communities(vec![(1..=9).collect(), vec![10, 11, 12]]);
        let second = Partition::from_communities(vec![
            (1..=7).collect(),
            vec![8, 9, 10],
            vec![11, 12],
        ]);
        (first, second)
    }

    #[test]
    fn known_values() {
        let (first, second) = exercise_partitions();
        assert!((entropy(&first) - 0.811_278).abs() < 1e-6);
        assert!((mutual_information(&first, &second).unwrap() - 0.581_704).abs() < 1e-6);
        assert!((variation_of_information(&first, &second).unwrap() - 1.032_301).abs() < 1e-6);
    }

    #[test]
    fn self_distance_is_zero() {
        let (first, second) = exercise_partitions();
        assert!(variation_of_information(&first, &first).unwrap().abs() < 1e-12);
        assert!(variation_of_information(&second, &second).unwrap().abs() < 1e-12);
    }

    #[test]
    fn distance_is_symmetric() {
        let (first, second) = exercise_partitions();
        let ab = variation_of_information(&first, &second).unwrap();
        let ba = variation_of_information(&second, &first).unwrap();
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn single_community_has_no_entropy() {
        let partition = Partition::from_communities(vec![vec![1, 2, 3]]);
        assert_eq!(entropy(&partition), 0.0);
    }

    #[test]
    fn mismatched_partitions_fail() {
        let a = Partition::from_communities(vec![vec![1, 2]]);
        let b = Partition::from_communities(vec![vec![1]]);
        assert!(matches!(
            variation_of_information(&a, &b),
            Err(NetError::PartitionMismatch { left: 2, right: 1 })
        ));
    }
}
