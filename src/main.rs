use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

use netsci_analyzer::centrality::{self, pagerank};
use netsci_analyzer::community::{self, Partition};
use netsci_analyzer::config::Config;
use netsci_analyzer::correlations;
use netsci_analyzer::data::communities::load_partition;
use netsci_analyzer::data::coords::{circular_layout, load_coordinates, Coordinates};
use netsci_analyzer::data::preprocessing::giant_component_subgraph;
use netsci_analyzer::data::{load_edge_list, EdgeListOptions};
use netsci_analyzer::generators::{self, ErProperties};
use netsci_analyzer::graph::{algorithms, CompressedGraph, Network};
use netsci_analyzer::percolation::bfs::sample_breadth_first_search;
use netsci_analyzer::percolation::removal::{edge_order, simulate_edge_removal, RemovalOrder};
use netsci_analyzer::percolation::sweep::er_percolation;
use netsci_analyzer::stats;
use netsci_analyzer::storage;
use netsci_analyzer::viz;

#[derive(Parser, Debug)]
#[clap(
    name = "netsci-analyzer",
    about = "Network science toolkit: random graph models, percolation, centrality and communities"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Output directory for results
    #[clap(long, global = true, default_value = "results")]
    output_dir: String,

    /// Seed for all random number generators
    #[clap(long, global = true, default_value = "42")]
    seed: u64,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, global = true, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short, global = true)]
    verbose: bool,
}

/// Edge list input shared by the commands that read a network
#[derive(clap::Args, Debug)]
struct Input {
    /// Whitespace-delimited edge list
    #[clap(long)]
    input: PathBuf,

    /// Treat edges as directed
    #[clap(long)]
    directed: bool,

    /// Read a weight from the third column
    #[clap(long)]
    weighted: bool,
}

impl Input {
    fn load(&self) -> Result<Network> {
        let options = EdgeListOptions {
            directed: self.directed,
            weighted: self.weighted,
        };
        let network = load_edge_list(&self.input, options)?;
        log::info!(
            "Loaded {} with {} nodes and {} edges",
            self.input.display(),
            network.node_count(),
            network.edge_count()
        );
        Ok(network)
    }

    fn name(&self) -> String {
        self.input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "network".to_string())
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Density, clustering, degree distribution and path lengths of a network
    Properties {
        #[clap(flatten)]
        input: Input,
    },

    /// Simulated and closed-form ER properties as a function of p
    ErEnsemble {
        /// Number of nodes
        #[clap(long, default_value = "3")]
        n: usize,

        /// Spacing of the p values in [0, 1]
        #[clap(long, default_value = "0.05")]
        step: f64,

        /// Realizations per p
        #[clap(long)]
        realizations: Option<usize>,
    },

    /// Relative clustering and path length of Watts-Strogatz networks
    SmallWorld {
        #[clap(long, default_value = "1000")]
        n: usize,

        /// Neighbours on each side in the base ring
        #[clap(long, default_value = "5")]
        m: usize,
    },

    /// Grow a Barabasi-Albert network and bin its degree distribution
    Ba {
        #[clap(long, default_value = "10000")]
        n: usize,

        /// Edges added with each new node
        #[clap(long, default_value = "1")]
        m: usize,

        /// Size of the complete seed graph
        #[clap(long, default_value = "3")]
        seed_size: usize,

        /// Also write the network as GraphML on a circular layout
        #[clap(long)]
        graphml: bool,
    },

    /// Giant component and susceptibility of ER networks across average degrees
    Percolation {
        #[clap(long, default_value = "10000")]
        n: usize,

        /// Largest average degree (exclusive)
        #[clap(long, default_value = "3.0")]
        max_k: f64,

        #[clap(long, default_value = "0.1")]
        step: f64,
    },

    /// Breadth-first frontier sizes and loop fractions in an ER network
    Bfs {
        #[clap(long, default_value = "10000")]
        n: usize,

        #[clap(long, default_value = "2.0")]
        avg_degree: f64,

        #[clap(long)]
        samples: Option<usize>,

        #[clap(long)]
        max_depth: Option<usize>,
    },

    /// Giant component size while edges are removed in several orders
    Tolerance {
        #[clap(flatten)]
        input: Input,

        /// Removal orders to simulate (all when omitted)
        #[clap(long, value_enum)]
        order: Vec<RemovalOrder>,
    },

    /// PageRank by random walk and by power iteration
    Pagerank {
        #[clap(flatten)]
        input: Input,

        #[clap(long)]
        damping: Option<f64>,

        /// Random walk length
        #[clap(long)]
        steps: Option<usize>,

        /// Power iteration rounds
        #[clap(long)]
        iterations: Option<usize>,

        /// Damping factors for a random-walk sweep
        #[clap(long, value_delimiter = ',')]
        sweep: Vec<f64>,

        /// Bincode coordinate map for the GraphML export
        #[clap(long)]
        coords: Option<PathBuf>,

        /// Number of top nodes to report
        #[clap(long, default_value = "5")]
        top: usize,
    },

    /// Degree, betweenness, closeness, eigenvector and k-shell centralities
    Centrality {
        #[clap(flatten)]
        input: Input,

        /// Eigenvector centrality tolerance
        #[clap(long)]
        tolerance: Option<f64>,

        /// Bincode coordinate map for the GraphML exports
        #[clap(long)]
        coords: Option<PathBuf>,
    },

    /// Degree correlations and nearest-neighbour degree
    Assortativity {
        #[clap(flatten)]
        input: Input,
    },

    /// Link weights, strengths, overlaps and spanning trees of a weighted network
    Weights {
        #[clap(flatten)]
        input: Input,

        /// Number of bins for the binned averages
        #[clap(long)]
        bins: Option<usize>,
    },

    /// Entropies and pairwise variation of information of partitions
    Communities {
        /// Community files, one community per line
        #[clap(required = true, num_args = 2..)]
        partitions: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config = Config {
        seed: args.seed,
        threads: args.threads,
        ..Config::default()
    };

    let num_threads = config.worker_threads();
    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Output: {}", args.output_dir);
    std::fs::create_dir_all(&args.output_dir)?;
    let out = args.output_dir.as_str();

    match &args.command {
        Command::Properties { input } => run_properties(input, out)?,
        Command::ErEnsemble {
            n,
            step,
            realizations,
        } => run_er_ensemble(*n, *step, realizations.unwrap_or(config.realizations), &config, out)?,
        Command::SmallWorld { n, m } => run_small_world(*n, *m, &config, out)?,
        Command::Ba {
            n,
            m,
            seed_size,
            graphml,
        } => run_ba(*n, *m, *seed_size, *graphml, &config, out)?,
        Command::Percolation { n, max_k, step } => {
            let points = er_percolation(*n, *max_k, *step, config.seed)?;
            storage::save_json(&points, out, "percolation")?;
            let k: Vec<f64> = points.iter().map(|p| p.avg_degree).collect();
            let giant: Vec<f64> = points.iter().map(|p| p.giant_size as f64).collect();
            let chi: Vec<f64> = points.iter().map(|p| p.susceptibility).collect();
            viz::write_series_csv(
                &Path::new(out).join("percolation.csv"),
                &["avg_degree", "giant_size", "susceptibility"],
                &[&k, &giant, &chi],
            )?;
        }
        Command::Bfs {
            n,
            avg_degree,
            samples,
            max_depth,
        } => run_bfs(
            *n,
            *avg_degree,
            samples.unwrap_or(config.bfs_samples),
            max_depth.unwrap_or(config.max_depth),
            &config,
            out,
        )?,
        Command::Tolerance { input, order } => run_tolerance(input, order, &config, out)?,
        Command::Pagerank {
            input,
            damping,
            steps,
            iterations,
            sweep,
            coords,
            top,
        } => {
            let config = Config {
                damping: damping.unwrap_or(config.damping),
                walk_steps: steps.unwrap_or(config.walk_steps),
                iterations: iterations.unwrap_or(config.iterations),
                ..config.clone()
            };
            run_pagerank(input, &config, sweep, coords.as_deref(), *top, out)?
        }
        Command::Centrality {
            input,
            tolerance,
            coords,
        } => run_centrality(
            input,
            tolerance.unwrap_or(config.eigenvector_tolerance),
            coords.as_deref(),
            out,
        )?,
        Command::Assortativity { input } => run_assortativity(input, out)?,
        Command::Weights { input, bins } => run_weights(input, bins.unwrap_or(config.bins), out)?,
        Command::Communities { partitions } => run_communities(partitions, out)?,
    }

    log::info!("Analysis complete. Results saved to {}", out);

    Ok(())
}

fn run_properties(input: &Input, out: &str) -> Result<()> {
    let network = input.load()?;
    let name = input.name();
    storage::save_network_summary(&network, &name, out)?;

    let degrees = algorithms::degrees(&network);
    let (clustering, average_clustering) = algorithms::clustering_and_average_clustering(&network);
    log::info!("density: {:.6}", algorithms::density(&network));
    log::info!("average clustering: {:.6}", average_clustering);

    let degree_values: Vec<f64> = degrees.iter().map(|&k| k as f64).collect();
    let (points, below) = stats::cdf(&degree_values)?;
    let (_, above) = stats::ccdf(&degree_values)?;
    viz::write_series_csv(
        &Path::new(out).join(format!("{}_degree_cdf.csv", name)),
        &["degree", "cdf", "ccdf"],
        &[&points, &below, &above],
    )?;
    viz::write_series_csv(
        &Path::new(out).join(format!("{}_degree_clustering.csv", name)),
        &["degree", "clustering"],
        &[&degree_values, &clustering],
    )?;

    let giant = giant_component_subgraph(&network);
    let path_length = algorithms::average_shortest_path_length(&giant)?;
    let diameter = algorithms::diameter(&giant)?;
    log::info!(
        "giant component: {} nodes, average shortest path {:.4}, diameter {}",
        giant.node_count(),
        path_length,
        diameter
    );

    let paths = json!({
        "giant_component_size": giant.node_count(),
        "average_shortest_path_length": path_length,
        "diameter": diameter,
    });
    storage::save_json(&paths, out, &format!("{}_paths", name))?;
    Ok(())
}

#[derive(Serialize)]
struct ErEnsembleRow {
    p: f64,
    simulated: ErProperties,
    theoretical: Option<ErProperties>,
}

fn run_er_ensemble(n: usize, step: f64, realizations: usize, config: &Config, out: &str) -> Result<()> {
    if step <= 0.0 {
        return Err(anyhow!("step must be positive, got {}", step));
    }
    let count = (1.0 / step + 1e-9).floor() as usize + 1;
    let mut rows = Vec::with_capacity(count);

    for i in 0..count {
        let p = (i as f64 * step).min(1.0);
        log::info!("calculating for n={} p={:.3}", n, p);
        let simulated =
            generators::er_properties(n, p, realizations, generators::realization_seed(config.seed, i))?;
        let theoretical = (n == 3).then(|| generators::er_properties_theoretical(p));
        rows.push(ErEnsembleRow {
            p,
            simulated,
            theoretical,
        });
    }

    storage::save_json(&rows, out, &format!("er_properties_{}", n))?;
    Ok(())
}

fn run_small_world(n: usize, m: usize, config: &Config, out: &str) -> Result<()> {
    let ps = generators::doubling_probabilities();
    let points = generators::small_world_sweep(n, m, &ps, config.seed)?;
    for point in &points {
        log::info!(
            "p={:.3}: relative C {:.4}, relative L {:.4}",
            point.p,
            point.relative_clustering,
            point.relative_path_length
        );
    }

    storage::save_json(&points, out, "small_world")?;
    let c: Vec<f64> = points.iter().map(|p| p.relative_clustering).collect();
    let l: Vec<f64> = points.iter().map(|p| p.relative_path_length).collect();
    viz::write_series_csv(
        &Path::new(out).join("small_world.csv"),
        &["p", "relative_clustering", "relative_path_length"],
        &[&ps, &c, &l],
    )?;
    Ok(())
}

fn run_ba(n: usize, m: usize, seed_size: usize, graphml: bool, config: &Config, out: &str) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let grown = generators::barabasi_albert(n, m, seed_size, &mut rng)?;
    let network = &grown.network;

    let degrees: Vec<f64> = algorithms::degrees(network).iter().map(|&k| k as f64).collect();
    let max_degree = degrees.iter().copied().fold(0.0, f64::max) as usize;
    log::info!(
        "BA network: {} nodes, {} edges, max degree {}",
        network.node_count(),
        network.edge_count(),
        max_degree
    );

    let edges = stats::lin_log_bins(max_degree);
    if edges.len() >= 2 {
        let centers = stats::binned_statistic(&degrees, &degrees, &edges)?;
        let density = centers.density();
        let mut k = Vec::new();
        let mut pk = Vec::new();
        let mut pk_theoretical = Vec::new();
        for (&mean, &p) in centers.mean.iter().zip(&density) {
            if let Some(center) = mean {
                k.push(center);
                pk.push(p);
                pk_theoretical.push(generators::degree_probability(m, center));
            }
        }
        viz::write_series_csv(
            &Path::new(out).join("ba_degree_distribution.csv"),
            &["k", "pk", "pk_theoretical"],
            &[k.as_slice(), pk.as_slice(), pk_theoretical.as_slice()],
        )?;
    } else {
        log::warn!("max degree {} is too small for logarithmic binning", max_degree);
    }

    let summary = json!({
        "n": n,
        "m": m,
        "seed_size": seed_size,
        "edge_count": network.edge_count(),
        "max_degree": max_degree,
    });
    storage::save_json(&summary, out, "ba")?;

    if graphml {
        let coords = circular_layout(network.labels());
        viz::write_graphml(
            &Path::new(out).join("ba.graphml"),
            network,
            Some(("degree", degrees.as_slice())),
            Some(&coords),
        )?;
    }
    Ok(())
}

fn run_bfs(n: usize, avg_degree: f64, samples: usize, max_depth: usize, config: &Config, out: &str) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let network = generators::er_network(n, avg_degree, &mut rng)?;
    let graph = CompressedGraph::from_network(&network);
    let profile = sample_breadth_first_search(&graph, avg_degree, samples, max_depth, &mut rng)?;

    storage::save_json(&profile, out, "bfs")?;
    let depth: Vec<f64> = (0..=max_depth).map(|d| d as f64).collect();
    viz::write_series_csv(
        &Path::new(out).join("bfs.csv"),
        &["depth", "node_count", "node_count_theoretical", "loop_edge_fraction"],
        &[
            &depth,
            &profile.node_count,
            &profile.node_count_theoretical,
            &profile.loop_edge_fraction,
        ],
    )?;
    Ok(())
}

fn run_tolerance(input: &Input, orders: &[RemovalOrder], config: &Config, out: &str) -> Result<()> {
    let network = input.load()?;
    let orders = if orders.is_empty() {
        RemovalOrder::ALL.to_vec()
    } else {
        orders.to_vec()
    };
    let n = network.node_count() as f64;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut curves = serde_json::Map::new();

    for order in orders {
        log::info!("Removing edges in {} order", order.name());
        let edges = edge_order(&network, order, &mut rng);
        let sizes = simulate_edge_removal(&network, &edges);
        let total = edges.len().max(1) as f64;

        let removed: Vec<f64> = (1..=sizes.len()).map(|i| i as f64 / total).collect();
        let giant: Vec<f64> = sizes.iter().map(|&s| s as f64 / n).collect();
        viz::write_series_csv(
            &Path::new(out).join(format!("tolerance_{}.csv", order.name())),
            &["fraction_removed", "giant_fraction"],
            &[&removed, &giant],
        )?;
        curves.insert(order.name().to_string(), json!(sizes));
    }

    storage::save_json(&curves, out, &format!("{}_tolerance", input.name()))?;
    Ok(())
}

fn coordinates_for(network: &Network, coords: Option<&Path>) -> Result<Coordinates> {
    Ok(match coords {
        Some(path) => load_coordinates(path)?,
        None => circular_layout(network.labels()),
    })
}

fn run_pagerank(
    input: &Input,
    config: &Config,
    sweep: &[f64],
    coords: Option<&Path>,
    top: usize,
    out: &str,
) -> Result<()> {
    let network = input.load()?;
    let name = input.name();
    let graph = CompressedGraph::from_network(&network);
    let mut rng = StdRng::seed_from_u64(config.seed);

    let walk = pagerank::random_walk(&graph, config.damping, config.walk_steps, &mut rng)?;
    let power = pagerank::power_iteration(&graph, config.damping, config.iterations)?;

    let incoming = graph.transpose();
    let in_degree: Vec<f64> = (0..graph.node_count).map(|v| incoming.out_degree(v) as f64).collect();
    let out_degree: Vec<f64> = (0..graph.node_count).map(|v| graph.out_degree(v) as f64).collect();

    let mut top_nodes = serde_json::Map::new();
    for (ranking, scores) in [("pagerank", &power), ("in_degree", &in_degree), ("out_degree", &out_degree)] {
        let ranked: Vec<_> = centrality::top_k(scores, top)
            .into_iter()
            .map(|(node, score)| json!({ "node": network.label(node), "score": score }))
            .collect();
        if let Some(first) = ranked.first() {
            log::info!("top by {}: {}", ranking, first["node"]);
        }
        top_nodes.insert(ranking.to_string(), json!(ranked));
    }

    let result = json!({
        "damping": config.damping,
        "walk_steps": config.walk_steps,
        "iterations": config.iterations,
        "random_walk": walk,
        "power_iteration": power,
        "top": top_nodes,
    });
    storage::save_json(&result, out, &format!("{}_pagerank", name))?;

    let coords = coordinates_for(&network, coords)?;
    viz::write_graphml(
        &Path::new(out).join(format!("{}_pagerank.graphml", name)),
        &network,
        Some(("pagerank", power.as_slice())),
        Some(&coords),
    )?;

    if !sweep.is_empty() {
        let scores = pagerank::damping_sweep(&graph, sweep, config.walk_steps, config.seed)?;
        let headers: Vec<String> = sweep.iter().map(|d| format!("d={}", d)).collect();
        let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
        let columns: Vec<&[f64]> = scores.iter().map(Vec::as_slice).collect();
        viz::write_series_csv(
            &Path::new(out).join(format!("{}_pagerank_sweep.csv", name)),
            &headers,
            &columns,
        )?;
    }
    Ok(())
}

fn run_centrality(input: &Input, tolerance: f64, coords: Option<&Path>, out: &str) -> Result<()> {
    let network = input.load()?;
    let name = input.name();
    let graph = CompressedGraph::from_network(&network);

    let k_shell: Vec<f64> = centrality::k_shell(&graph).into_iter().map(|k| k as f64).collect();
    let measures: Vec<(&str, Vec<f64>)> = vec![
        ("degree", centrality::degree_centrality(&graph)),
        ("betweenness", centrality::betweenness(&graph)),
        ("closeness", centrality::closeness(&graph)),
        ("eigenvector", centrality::eigenvector(&graph, tolerance, 1000)?),
        ("k_shell", k_shell),
    ];

    let coords = coordinates_for(&network, coords)?;
    let mut result = serde_json::Map::new();
    for (measure, values) in &measures {
        if let Some(&(node, score)) = centrality::top_k(values, 1).first() {
            log::info!("highest {}: {} ({:.6})", measure, network.label(node), score);
        }
        viz::write_graphml(
            &Path::new(out).join(format!("{}_{}.graphml", name, measure)),
            &network,
            Some((*measure, values.as_slice())),
            Some(&coords),
        )?;
        result.insert(measure.to_string(), json!(values));
    }

    storage::save_json(&result, out, &format!("{}_centrality", name))?;
    Ok(())
}

fn run_assortativity(input: &Input, out: &str) -> Result<()> {
    let network = input.load()?;
    let name = input.name();

    let (x, y) = correlations::edge_degree_pairs(&network);
    let r = correlations::assortativity(&x, &y)?;
    log::info!("assortativity of {}: {:.6}", name, r);

    let (kmin, counts) = correlations::joint_degree_counts(&x, &y)?;
    let joint: Vec<Vec<usize>> = counts.outer_iter().map(|row| row.to_vec()).collect();

    let degrees = algorithms::degrees(&network);
    let knn = correlations::nearest_neighbor_degree(&network);
    let (bins, bin_average) = correlations::simple_bin_average(&degrees, &knn);

    let result = json!({
        "assortativity": r,
        "joint_degree_kmin": kmin,
        "joint_degree_counts": joint,
        "degrees": degrees,
        "nearest_neighbor_degree": knn,
        "knn_bins": bins,
        "knn_bin_average": bin_average,
    });
    storage::save_json(&result, out, &format!("{}_assortativity", name))?;
    Ok(())
}

fn run_weights(input: &Input, bins: usize, out: &str) -> Result<()> {
    let network = input.load()?;
    let name = input.name();
    if !network.is_weighted() {
        log::warn!("{} has no weights; every link counts as 1", name);
    }

    let weights = correlations::link_weights(&network);
    let strengths = correlations::strengths(&network);
    let degrees: Vec<f64> = algorithms::degrees(&network).iter().map(|&k| k as f64).collect();

    for (label, values) in [("weight", &weights), ("strength", &strengths), ("degree", &degrees)] {
        if values.is_empty() {
            continue;
        }
        let (x, p) = stats::ccdf(values)?;
        viz::write_series_csv(
            &Path::new(out).join(format!("{}_{}_ccdf.csv", name, label)),
            &[label, "ccdf"],
            &[&x, &p],
        )?;
    }

    // Average link weight against degree, on log bins
    let max_degree = degrees.iter().copied().fold(0.0, f64::max);
    if max_degree > 1.0 {
        let edges = stats::log_bins(1.0, max_degree, bins.max(2), 0)?;
        let average_weight = correlations::average_link_weight(&network);
        let binned = stats::binned_statistic(&degrees, &average_weight, &edges)?;
        storage::save_json(&binned, out, &format!("{}_weight_per_degree", name))?;
    }

    // Overlap against weight, on linear bins
    let overlaps = correlations::link_overlaps(&network);
    let (w_min, w_max) = weights
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &w| (lo.min(w), hi.max(w)));
    if w_max > w_min {
        let edges = stats::lin_bins(w_min, w_max, bins.max(2));
        let binned = stats::binned_statistic(&weights, &overlaps, &edges)?;
        storage::save_json(&binned, out, &format!("{}_overlap_per_weight", name))?;
    }

    let minimum = algorithms::minimum_spanning_edges(&network);
    let maximum = algorithms::maximum_spanning_edges(&network);
    let overlap = algorithms::spanning_tree_overlap(&network);
    log::info!(
        "spanning trees: {} edges, {} shared by the maximum tree and the heaviest edges",
        maximum.len(),
        overlap
    );

    let giant = giant_component_subgraph(&network);
    let (_, average_clustering) = algorithms::clustering_and_average_clustering(&network);
    let summary = json!({
        "node_count": network.node_count(),
        "edge_count": network.edge_count(),
        "density": algorithms::density(&network),
        "diameter": algorithms::diameter(&giant)?,
        "average_clustering": average_clustering,
        "minimum_spanning_edges": minimum,
        "maximum_spanning_edges": maximum,
        "spanning_tree_overlap": overlap,
    });
    storage::save_json(&summary, out, &format!("{}_weights", name))?;
    Ok(())
}

fn run_communities(paths: &[PathBuf], out: &str) -> Result<()> {
    let partitions: Vec<(String, Partition)> = paths
        .iter()
        .map(|path| -> Result<(String, Partition)> {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok((name, load_partition(path)?))
        })
        .collect::<Result<_>>()?;

    let mut entropies = serde_json::Map::new();
    for (name, partition) in &partitions {
        let h = community::entropy(partition);
        log::info!("{}: {} communities, H = {:.6}", name, partition.len(), h);
        entropies.insert(name.clone(), json!(h));
    }

    let mut pairs = Vec::new();
    for (i, (name_a, a)) in partitions.iter().enumerate() {
        for (name_b, b) in &partitions[i + 1..] {
            let mi = community::mutual_information(a, b)?;
            let vi = community::variation_of_information(a, b)?;
            log::info!("{} vs {}: MI = {:.6}, VI = {:.6}", name_a, name_b, mi, vi);
            pairs.push(json!({
                "a": name_a,
                "b": name_b,
                "mutual_information": mi,
                "variation_of_information": vi,
            }));
        }
    }

    let result = json!({ "entropy": entropies, "pairs": pairs });
    storage::save_json(&result, out, "communities")?;
    Ok(())
}
