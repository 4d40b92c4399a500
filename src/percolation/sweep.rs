//! Percolation transition in Erdos-Renyi networks

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{NetError, Result};
use crate::generators::erdos_renyi::{er_network, realization_seed};
use crate::percolation::components::{
    component_size_distribution, largest_component_size, susceptibility,
};

/// Giant component size and susceptibility at one average degree
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercolationPoint {
    pub avg_degree: f64,
    pub giant_size: usize,
    pub susceptibility: f64,
}

/// Average degrees 0, step, 2*step, ... below `max_k`
pub fn degree_steps(max_k: f64, step: f64) -> Result<Vec<f64>> {
    if step <= 0.0 || !step.is_finite() {
        return Err(NetError::InvalidParameter(format!(
            "step must be positive, got {}",
            step
        )));
    }
    let count = (max_k / step).ceil().max(0.0) as usize;
    Ok((0..count)
        .map(|i| i as f64 * step)
        .filter(|&k| k < max_k)
        .collect())
}

/// Build one ER network of `net_size` nodes per average degree in
/// `[0, max_k)` and measure its giant component and susceptibility.
pub fn er_percolation(net_size: usize, max_k: f64, step: f64, seed: u64) -> Result<Vec<PercolationPoint>> {
    let steps = degree_steps(max_k, step)?;
    log::info!(
        "Percolation sweep over {} average degrees with {} nodes",
        steps.len(),
        net_size
    );

    steps
        .into_par_iter()
        .enumerate()
        .map(|(i, k)| {
            let mut rng = StdRng::seed_from_u64(realization_seed(seed, i));
            let network = er_network(net_size, k, &mut rng)?;
            let dist = component_size_distribution(&network);
            Ok(PercolationPoint {
                avg_degree: k,
                giant_size: largest_component_size(&dist),
                susceptibility: susceptibility(&dist),
            })
        })
        .collect()
}
