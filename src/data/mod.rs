//! Data loading and preprocessing

pub mod communities;
pub mod coords;
pub mod edgelist;
pub mod preprocessing;

pub use edgelist::{load_edge_list, EdgeListOptions};
