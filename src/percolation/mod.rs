//! Percolation and robustness analysis

pub mod bfs;
pub mod components;
pub mod removal;
pub mod sweep;

pub use components::{
    component_size_distribution, connected_components, giant_component,
    largest_component_size, susceptibility, ComponentSizeDistribution, DisjointSets,
};
