//! Random graph generators
//!
//! Every generator takes its random number generator explicitly, so a run is
//! reproducible from a single seed.

pub mod barabasi_albert;
pub mod erdos_renyi;
pub mod watts_strogatz;

pub use barabasi_albert::{barabasi_albert, complete_graph, degree_probability, PreferentialAttachment};
pub use erdos_renyi::{
    er_network, er_properties, er_properties_theoretical, gnp, realization_seed, ErProperties,
};
pub use watts_strogatz::{
    doubling_probabilities, ring, small_world_sweep, watts_strogatz, RewiringStats, SmallWorld,
    SmallWorldPoint,
};
