//! Whitespace-delimited edge list files

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{NetError, Result};
use crate::graph::{GraphBuilder, Network};

/// How an edge list should be interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeListOptions {
    /// Treat `a b` as a directed edge a -> b
    pub directed: bool,
    /// Require and keep a third weight column
    pub weighted: bool,
}

impl EdgeListOptions {
    pub fn undirected() -> Self {
        Self::default()
    }

    pub fn directed() -> Self {
        Self {
            directed: true,
            weighted: false,
        }
    }

    pub fn weighted() -> Self {
        Self {
            directed: false,
            weighted: true,
        }
    }
}

/// Parse `node_a node_b [weight]` lines. Blank lines and `#` comments are
/// skipped; extra columns are ignored unless a weight is required.
pub fn parse_edge_list<R: BufRead>(reader: R, options: EdgeListOptions) -> Result<Network> {
    let mut builder = GraphBuilder::new(options.directed);

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let (src, dst) = match (fields.next(), fields.next()) {
            (Some(src), Some(dst)) => (src, dst),
            _ => {
                return Err(NetError::Parse {
                    line: line_no,
                    msg: format!("expected two node ids, got {:?}", trimmed),
                })
            }
        };

        if options.weighted {
            let raw = fields
                .next()
                .ok_or(NetError::MissingWeight { line: line_no })?;
            let weight: f64 = raw.parse().map_err(|_| NetError::Parse {
                line: line_no,
                msg: format!("invalid weight {:?}", raw),
            })?;
            builder.add_weighted_edge(src, dst, weight)?;
        } else {
            builder.add_edge(src, dst)?;
        }
    }

    builder.build()
}

/// Load an edge list file
pub fn load_edge_list<P: AsRef<Path>>(path: P, options: EdgeListOptions) -> Result<Network> {
    let path = path.as_ref();
    log::info!("Reading edge list: {}", path.display());

    let file = File::open(path)?;
    let network = parse_edge_list(BufReader::new(file), options)?;

    log::info!(
        "Loaded network with {} nodes and {} edges",
        network.node_count(),
        network.edge_count()
    );
    Ok(network)
}
