use std::fs;
use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;

use netsci_analyzer::centrality::{edge_betweenness, pagerank, top_k};
use netsci_analyzer::community::{entropy, mutual_information, variation_of_information};
use netsci_analyzer::data::communities::load_partition;
use netsci_analyzer::data::{load_edge_list, EdgeListOptions};
use netsci_analyzer::generators::{barabasi_albert, watts_strogatz};
use netsci_analyzer::graph::{algorithms, CompressedGraph};
use netsci_analyzer::percolation::{component_size_distribution, susceptibility};
use netsci_analyzer::storage;
use netsci_analyzer::NetError;

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn weighted_edge_list_to_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "net.edg",
        "# toy network\na b 1.0\nb c 2.0\n\nc a 3.0\nc d 0.5\n",
    );

    let network = load_edge_list(&path, EdgeListOptions::weighted()).unwrap();
    assert_eq!(network.node_count(), 4);
    assert_eq!(network.edge_count(), 4);
    assert!(network.is_weighted());

    let c = network.node_id("c").unwrap();
    assert_eq!(network.strength(c), 5.5);

    let output = dir.path().join("out");
    let summary = storage::save_network_summary(&network, "net", output.to_str().unwrap()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(summary).unwrap()).unwrap();
    assert_eq!(value["edge_count"], 4);
    assert_eq!(value["max_degree"], 3);
}

#[test]
fn missing_weight_names_the_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.edg", "a b 1.0\nb c\n");
    match load_edge_list(&path, EdgeListOptions::weighted()) {
        Err(NetError::MissingWeight { line }) => assert_eq!(line, 2),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn exercise_partitions_have_known_variation_of_information() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_file(&dir, "test1.txt", "1 2 3 4 5 6 7 8 9\n10 11 12\n");
    let second = write_file(&dir, "test2.txt", "# three communities\n1 2 3 4 5 6 7\n8 9 10\n11 12\n");

    let a = load_partition(first).unwrap();
    let b = load_partition(second).unwrap();

    assert!((entropy(&a) - 0.8112781).abs() < 1e-6);
    assert!((entropy(&b) - 1.3844315).abs() < 1e-6);
    assert!((mutual_information(&a, &b).unwrap() - 0.5817042).abs() < 1e-6);

    let vi = variation_of_information(&a, &b).unwrap();
    assert!((vi - 1.0323013).abs() < 1e-6);
    assert_eq!(vi, variation_of_information(&b, &a).unwrap());
    assert!(variation_of_information(&a, &a).unwrap().abs() < 1e-12);
}

#[test]
fn directed_pagerank_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "web.edg", "0 1\n1 2\n2 0\n0 2\n3 0\n");
    let network = load_edge_list(&path, EdgeListOptions::directed()).unwrap();
    let graph = CompressedGraph::from_network(&network);

    let power = pagerank::power_iteration(&graph, 0.85, 100).unwrap();
    let best = top_k(&power, 1)[0].0;
    // 0 collects from both 2 and the source-only node 3
    assert_eq!(network.label(best), "0");

    let mut rng = StdRng::seed_from_u64(11);
    let walk = pagerank::random_walk(&graph, 0.85, 50_000, &mut rng).unwrap();
    assert!((walk.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    for (w, p) in walk.iter().zip(&power) {
        assert!((w - p).abs() < 0.03);
    }
}

#[test]
fn generated_networks_meet_their_invariants() {
    let mut rng = StdRng::seed_from_u64(42);

    let grown = barabasi_albert(500, 2, 3, &mut rng).unwrap();
    assert_eq!(grown.network.node_count(), 500);
    assert_eq!(grown.network.edge_count(), 3 + 2 * (500 - 3));

    let small_world = watts_strogatz(1000, 5, 1.0, &mut rng).unwrap();
    assert_eq!(small_world.stats.total_edges, 5000);
    assert_eq!(small_world.stats.rewired_edges, 5000);

    let dist = component_size_distribution(&small_world.network);
    let covered: usize = dist.iter().map(|(size, count)| size * count).sum();
    assert_eq!(covered, 1000);
    assert!(susceptibility(&dist) >= 0.0);
}

#[test]
fn spanning_tree_and_bridge_betweenness() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "barbell.edg",
        "0 1 5\n1 2 5\n2 0 5\n2 3 1\n3 4 5\n4 5 5\n5 3 5\n",
    );
    let network = load_edge_list(&path, EdgeListOptions::weighted()).unwrap();

    let maximum = algorithms::maximum_spanning_edges(&network);
    assert_eq!(maximum.len(), 5);
    assert!(maximum.iter().any(|&(_, _, w)| w == 1.0));

    let graph = CompressedGraph::from_network(&network);
    let scores = edge_betweenness(&graph);
    let (bridge, _) = scores
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .copied()
        .unwrap();
    let (u, v) = bridge;
    let mut labels = [network.label(u), network.label(v)];
    labels.sort();
    assert_eq!(labels, ["2", "3"]);
}
