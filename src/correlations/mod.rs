//! Degree and weight-topology correlations

pub mod assortativity;
pub mod weights;

pub use assortativity::{
    assortativity, edge_degree_pairs, joint_degree_counts, nearest_neighbor_degree,
    simple_bin_average,
};
pub use weights::{average_link_weight, link_overlaps, link_weights, strengths};
