//! Core library functions for the network science analyzer

pub mod centrality;
pub mod community;
pub mod config;
pub mod correlations;
pub mod data;
pub mod error;
pub mod generators;
pub mod graph;
pub mod percolation;
pub mod stats;
pub mod storage;
pub mod viz;

pub use error::{NetError, Result};
