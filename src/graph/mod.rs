//! Graph representation and algorithms module

pub mod algorithms;
pub mod builder;
pub mod compressed;
pub mod network;

pub use builder::GraphBuilder;
pub use compressed::CompressedGraph;
pub use network::Network;
