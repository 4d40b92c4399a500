//! Results persistence module

use anyhow::Result;
use serde::Serialize;
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::graph::{algorithms, Network};
use crate::stats;

/// Write `value` as pretty JSON to `<output_dir>/<name>.json`
pub fn save_json<T: Serialize>(value: &T, output_dir: &str, name: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let path = Path::new(output_dir).join(format!("{}.json", name));
    let mut file = File::create(&path)?;
    file.write_all(to_string_pretty(value)?.as_bytes())?;

    log::info!("Saved {}", path.display());
    Ok(path)
}

/// Save size, density, degree and clustering statistics of a network
pub fn save_network_summary(network: &Network, name: &str, output_dir: &str) -> Result<PathBuf> {
    log::info!("Saving summary for {}", name);

    let degrees = algorithms::degrees(network);
    let (clustering, average_clustering) = algorithms::clustering_and_average_clustering(network);
    let degree_distribution = if degrees.is_empty() {
        Vec::new()
    } else {
        stats::discrete_distribution(&degrees)?
    };
    let avg_degree = if network.node_count() == 0 {
        0.0
    } else {
        degrees.iter().sum::<usize>() as f64 / network.node_count() as f64
    };

    let summary = json!({
        "name": name,
        "directed": network.is_directed(),
        "node_count": network.node_count(),
        "edge_count": network.edge_count(),
        "density": algorithms::density(network),
        "avg_degree": avg_degree,
        "max_degree": degrees.iter().max().copied().unwrap_or(0),
        "average_clustering": average_clustering,
        "degree_distribution": degree_distribution,
        "clustering": clustering,
    });

    save_json(&summary, output_dir, &format!("{}_summary", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_is_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().to_str().unwrap();

        let mut network = Network::with_nodes(3, false);
        network.add_edge(0, 1).unwrap();
        network.add_edge(1, 2).unwrap();
        network.add_edge(2, 0).unwrap();

        let path = save_network_summary(&network, "triangle", output_dir).unwrap();
        let text = fs::read_to_string(path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["node_count"], 3);
        assert_eq!(value["density"], 1.0);
        assert_eq!(value["average_clustering"], 1.0);
    }

    #[test]
    fn save_json_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let path = save_json(&vec![1, 2, 3], nested.to_str().unwrap(), "numbers").unwrap();
        assert!(path.ends_with("numbers.json"));
        assert_eq!(fs::read_to_string(path).unwrap().split_whitespace().count(), 5);
    }
}
