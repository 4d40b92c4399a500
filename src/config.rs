//! Configuration management for the network analyzer

/// Default parameters for the analyses
#[derive(Debug, Clone)]
pub struct Config {
    /// Seed for the random number generators
    pub seed: u64,

    /// PageRank damping factor
    pub damping: f64,

    /// Number of steps taken by the PageRank random walker
    pub walk_steps: usize,

    /// Number of power iteration rounds
    pub iterations: usize,

    /// Number of random start nodes for breadth-first sampling
    pub bfs_samples: usize,

    /// Maximum breadth-first search depth
    pub max_depth: usize,

    /// Number of realizations per ensemble estimate
    pub realizations: usize,

    /// Number of bins used for binned statistics
    pub bins: usize,

    /// Tolerance for eigenvector centrality
    pub eigenvector_tolerance: f64,

    /// Number of worker threads (0 = all available cores)
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 42,
            damping: 0.85,
            walk_steps: 10_000,
            iterations: 10,
            bfs_samples: 100,
            max_depth: 15,
            realizations: 100,
            bins: 50,
            eigenvector_tolerance: 1e-1,
            threads: 0,
        }
    }
}

impl Config {
    /// Create a configuration with a custom seed and damping factor
    pub fn new(seed: u64, damping: f64) -> Self {
        Self {
            seed,
            damping,
            ..Self::default()
        }
    }

    /// Number of worker threads to use, resolving 0 to the core count
    pub fn worker_threads(&self) -> usize {
        if self.threads > 0 {
            self.threads
        } else {
            num_cpus::get()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_course_parameters() {
        let config = Config::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.damping, 0.85);
        assert_eq!(config.max_depth, 15);
    }

    #[test]
    fn explicit_threads_are_kept() {
        let config = Config {
            threads: 3,
            ..Config::new(7, 0.5)
        };
        assert_eq!(config.worker_threads(), 3);
        assert_eq!(config.seed, 7);
    }
}
