//! Writing generated networks to disk.
//!
//! Artifacts are named after the run parameters plus a random suffix drawn
//! from the run's RNG:
//!
//! - `richclubModelN{N}limit{limit}rand{s}.gml`
//! - `richclubModelN{N}limit{limit}rand{s}_rich-club.svg`
//!
//! Each file draws its own suffix, so the two names usually differ.

pub mod gml;
pub mod plot;

pub use gml::{GmlDocument, to_gml};
pub use plot::{PlotStyle, RichClubPlot};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::Rng;

use crate::config::RichClubConfig;
use crate::error::ModelResult;
use crate::graph::DiskGraph;
use crate::metrics::{RichClubCurve, rich_club_coefficient};

/// Run parameters that go into artifact file names.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArtifactName {
    pub node_count: u32,
    pub limit: f64,
}

impl ArtifactName {
    pub fn new(node_count: u32, limit: f64) -> Self {
        Self { node_count, limit }
    }

    /// `richclubModelN{N}limit{limit}rand{suffix}`.
    pub fn stem(&self, suffix: u32) -> String {
        format!(
            "richclubModelN{}limit{:?}rand{}",
            self.node_count, self.limit, suffix
        )
    }

    pub fn gml_file(&self, suffix: u32) -> String {
        format!("{}.gml", self.stem(suffix))
    }

    pub fn plot_file(&self, suffix: u32) -> String {
        format!("{}_rich-club.svg", self.stem(suffix))
    }
}

/// Random file name suffix in `1..=99`.
pub fn draw_suffix<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(1..100)
}

fn write_artifact(path: &Path, contents: impl std::fmt::Display) -> ModelResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write!(writer, "{contents}")?;
    writer.flush()?;
    Ok(())
}

/// Write `graph` as GML into `dir`. Returns the path written.
pub fn save_gml<R: Rng + ?Sized>(
    graph: &DiskGraph,
    name: &ArtifactName,
    dir: &Path,
    rng: &mut R,
) -> ModelResult<PathBuf> {
    let path = dir.join(name.gml_file(draw_suffix(rng)));
    write_artifact(&path, GmlDocument::new(graph))?;
    tracing::info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "wrote GML"
    );
    Ok(path)
}

/// Compute the rich-club curve of `graph` and plot it as SVG into `dir`.
///
/// The curve is computed before the file name suffix is drawn. Nothing is
/// written when the computation fails.
pub fn save_rich_club_plot<R: Rng + ?Sized>(
    graph: &DiskGraph,
    name: &ArtifactName,
    dir: &Path,
    config: &RichClubConfig,
    rng: &mut R,
) -> ModelResult<(PathBuf, RichClubCurve)> {
    let curve = rich_club_coefficient(graph, config, rng)?;
    let path = dir.join(name.plot_file(draw_suffix(rng)));
    let title = format!("Rich club, N = {}, limit = {:?}", name.node_count, name.limit);
    write_artifact(&path, RichClubPlot::new(&curve, title))?;
    tracing::info!(path = %path.display(), points = curve.points.len(), "wrote rich-club plot");
    Ok((path, curve))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::error::ModelError;
    use crate::generator::Generator;
    use crate::graph::PolarCoord;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_artifact_names() {
        let name = ArtifactName::new(200, 1.0);
        assert_eq!(name.stem(7), "richclubModelN200limit1.0rand7");
        assert_eq!(name.gml_file(7), "richclubModelN200limit1.0rand7.gml");
        assert_eq!(
            name.plot_file(42),
            "richclubModelN200limit1.0rand42_rich-club.svg"
        );
        assert_eq!(ArtifactName::new(5, 0.25).stem(1), "richclubModelN5limit0.25rand1");
    }

    #[test]
    fn test_suffix_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1000 {
            let s = draw_suffix(&mut rng);
            assert!((1..100).contains(&s));
        }
    }

    #[test]
    fn test_save_gml() {
        let dir = tempfile::tempdir().unwrap();
        let mut graph = DiskGraph::new();
        let a = graph.add_node(PolarCoord::new(1.0, 0.0));
        let b = graph.add_node(PolarCoord::new(2.0, 1.0));
        graph.add_edge(a, b);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let path = save_gml(&graph, &ArtifactName::new(2, 1.0), dir.path(), &mut rng).unwrap();

        let file_name = path.file_name().unwrap().to_str().unwrap();
        assert!(file_name.starts_with("richclubModelN2limit1.0rand"));
        assert!(file_name.ends_with(".gml"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), to_gml(&graph));
    }

    #[test]
    fn test_save_plot() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let network = Generator::new(GeneratorConfig::new(40, 5.0)).generate(&mut rng);
        let config = RichClubConfig { q: 20, normalized: true };

        let (path, curve) = save_rich_club_plot(
            network.graph(),
            &ArtifactName::new(40, 5.0),
            dir.path(),
            &config,
            &mut rng,
        )
        .unwrap();

        assert!(curve.normalized);
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(path.to_str().unwrap().ends_with("_rich-club.svg"));
    }

    #[test]
    fn test_plot_not_written_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut graph = DiskGraph::new();
        graph.add_node(PolarCoord::new(1.0, 0.0));

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = save_rich_club_plot(
            &graph,
            &ArtifactName::new(1, 1.0),
            dir.path(),
            &RichClubConfig::default(),
            &mut rng,
        );

        assert!(matches!(result, Err(ModelError::TooFewNodes { nodes: 1 })));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = save_gml(&DiskGraph::new(), &ArtifactName::new(0, 1.0), &missing, &mut rng);
        assert!(matches!(result, Err(ModelError::Io(_))));
    }
}
