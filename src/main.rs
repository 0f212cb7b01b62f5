//! Rich-club model CLI.
//!
//! Generates one network, prints its node and edge counts, and writes a GML
//! file and a rich-club plot into the output directory.
//!
//! ```text
//! richclub-model 200 1.0 --seed 7
//! nodes: 251
//! edges: 644
//! ```

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use richclub_model::config::{GeneratorConfig, MidpointAngle, NeighborSearch, RichClubConfig};
use richclub_model::error::ModelError;
use richclub_model::export::{ArtifactName, save_gml, save_rich_club_plot};
use richclub_model::generator::Generator;

/// Random spatial network generator with rich-club analysis.
#[derive(Parser)]
#[command(name = "richclub-model", version, about)]
struct Cli {
    /// Number of randomly placed nodes.
    node_count: u32,

    /// Weighted distance at which a connection is split by a midpoint node.
    #[arg(allow_negative_numbers = true)]
    limit: f64,

    /// Neighbors selected per placed node.
    #[arg(long, default_value_t = 3)]
    k: usize,

    /// Radius of the embedding disk.
    #[arg(long, default_value_t = 10.0)]
    radius: f64,

    /// RNG seed (default: random, logged so the run can be repeated).
    #[arg(long)]
    seed: Option<u64>,

    /// Double-edge swaps per edge for the rich-club reference graph.
    #[arg(long, default_value_t = 500)]
    swap_factor: u64,

    /// Directory for the GML and plot files.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Neighbor search strategy.
    #[arg(long, value_enum, default_value_t = SearchArg::Indexed)]
    search: SearchArg,

    /// Recover midpoint angles with atan(y/x) instead of atan2.
    #[arg(long)]
    legacy_midpoint_angle: bool,

    /// Log debug output to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SearchArg {
    Indexed,
    Exhaustive,
}

impl From<SearchArg> for NeighborSearch {
    fn from(arg: SearchArg) -> Self {
        match arg {
            SearchArg::Indexed => NeighborSearch::Indexed,
            SearchArg::Exhaustive => NeighborSearch::Exhaustive,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    process::exit(run(cli));
}

/// Generate and export one network.
///
/// Returns exit code: 0 = success, 1 = rich-club computation failed,
/// 3 = I/O error.
fn run(cli: Cli) -> i32 {
    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, nodes = cli.node_count, limit = cli.limit, "starting run");

    let config = GeneratorConfig {
        node_count: cli.node_count,
        limit: cli.limit,
        k: cli.k,
        disk_radius: cli.radius,
        midpoint_angle: if cli.legacy_midpoint_angle {
            MidpointAngle::Legacy
        } else {
            MidpointAngle::Quadrant
        },
        neighbor_search: cli.search.into(),
    };

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let network = Generator::new(config).generate(&mut rng);
    let graph = network.graph();

    println!("nodes: {}", graph.node_count());
    println!("edges: {}", graph.edge_count());
    tracing::debug!(histogram = ?graph.degree_histogram(), "degree distribution");

    let name = ArtifactName::new(cli.node_count, cli.limit);

    if let Err(e) = save_gml(graph, &name, &cli.output_dir, &mut rng) {
        eprintln!("Error: failed to write GML: {}", e);
        return 3;
    }

    let rich_club = RichClubConfig {
        q: cli.swap_factor,
        ..RichClubConfig::default()
    };
    match save_rich_club_plot(graph, &name, &cli.output_dir, &rich_club, &mut rng) {
        Ok(_) => 0,
        Err(ModelError::Io(e)) => {
            eprintln!("Error: failed to write rich-club plot: {}", e);
            3
        }
        Err(e) => {
            eprintln!("Error: rich-club coefficient failed: {}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["richclub-model", "200", "1.5"]).unwrap();
        assert_eq!(cli.node_count, 200);
        assert_eq!(cli.limit, 1.5);
        assert_eq!(cli.k, 3);
        assert_eq!(cli.radius, 10.0);
        assert_eq!(cli.swap_factor, 500);
        assert!(cli.seed.is_none());
        assert!(!cli.legacy_midpoint_angle);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["richclub-model", "abc", "1.0"]).is_err());
        assert!(Cli::try_parse_from(["richclub-model", "10"]).is_err());
    }

    #[test]
    fn test_run_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "richclub-model",
            "50",
            "3.0",
            "--seed",
            "4",
            "--swap-factor",
            "20",
            "--output-dir",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(run(cli), 0);

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names.len(), 2);
        assert!(names.iter().any(|n| n.ends_with(".gml")));
        assert!(names.iter().any(|n| n.ends_with("_rich-club.svg")));
    }

    #[test]
    fn test_run_reports_rich_club_failure() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "richclub-model",
            "2",
            "1.0",
            "--seed",
            "1",
            "--output-dir",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(run(cli), 1);
        // The GML is written before the rich-club step fails.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_run_reports_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let cli = Cli::try_parse_from([
            "richclub-model",
            "5",
            "1.0",
            "--seed",
            "1",
            "--output-dir",
            missing.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(run(cli), 3);
    }
}
