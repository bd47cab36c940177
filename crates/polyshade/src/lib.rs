#![warn(missing_docs)]

//! Hidden-line analysis for convex polyhedra under parallel projection.
//!
//! Every facet edge starts fully visible. Each non-vertical facet casts a
//! shadow prism along the projection direction, and the parts of an edge
//! inside it are removed. What is left are the edge's *gaps*: the visible
//! sub-intervals of its `[0, 1]` parameter range.
//!
//! On top of that, facets with partly hidden boundaries are collected and
//! their projected perimeters summed, skipping those centred in the
//! exclusion square around the origin.
//!
//! # Example
//!
//! ```
//! use polyshade::{GeomFile, Orientation, ShadowConfig};
//!
//! let text = "1.0 0 0 0\n4 1 4\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 1 2 3 4\n";
//! let geom = GeomFile::parse(text).unwrap();
//! let mut poly = geom.polyhedron(Orientation::Identity, ShadowConfig::default()).unwrap();
//! let report = poly.analyze();
//! assert_eq!(report.hidden_edges, 0);
//! ```

pub mod config;
pub mod edge;
pub mod error;
pub mod facet;
pub mod geom;
pub mod interval;
pub mod polyhedron;
pub mod types;

pub use config::{ShadowConfig, DEFAULT_EXCLUSION_HALF_EXTENT, DEFAULT_NOISE_FLOOR};
pub use edge::Edge;
pub use error::{Result, ShadowError};
pub use facet::{Facet, HalfSpace, ShadowVolume};
pub use geom::{GeomFile, Orientation};
pub use interval::Interval;
pub use polyhedron::{Polyhedron, PolyhedronDescription};
pub use types::{Point2D, ShadowReport, VisibleSegment};

pub use polyshade_math::{Point3, Transform, Vec3};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const SIMPLE_1: &str = include_str!("../data/simple_1.geom");
    const SIMPLE_2: &str = include_str!("../data/simple_2.geom");
    const BOX_SIMPLE: &str = include_str!("../data/box_simple.geom");

    fn analyze(text: &str, parallel: bool) -> (Polyhedron, ShadowReport) {
        let geom = GeomFile::parse(text).unwrap();
        let config = ShadowConfig {
            parallel,
            ..Default::default()
        };
        let mut poly = geom.polyhedron(Orientation::Identity, config).unwrap();
        let report = poly.analyze();
        (poly, report)
    }

    #[test]
    fn test_simple_1_perimeter() {
        let (_, report) = analyze(SIMPLE_1, false);
        assert_abs_diff_eq!(report.perimeter, 0.0, epsilon = 1e-4);
        // The plate is partly hidden, but centred inside the exclusion square.
        assert_eq!(report.partial_facets, vec![6]);
    }

    #[test]
    fn test_simple_2_perimeter() {
        let (_, report) = analyze(SIMPLE_2, false);
        assert_abs_diff_eq!(report.perimeter, 15.03224, epsilon = 1e-4);
        assert_eq!(report.partial_facets, vec![6, 7]);
        assert_eq!(report.facet_count, 10);
        assert_eq!(report.edge_count, 38);
    }

    #[test]
    fn test_box_simple_perimeter() {
        let (poly, report) = analyze(BOX_SIMPLE, false);
        assert_abs_diff_eq!(report.perimeter, 4.0, epsilon = 1e-4);
        assert_eq!(report.partial_facets, vec![6]);

        // Plate edge 9 -> 10 loses its first quarter under the box.
        let edge = &poly.edges_of(6).unwrap()[1];
        assert_eq!(edge.gaps().len(), 1);
        assert_abs_diff_eq!(edge.gaps()[0].begin, 0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(edge.gaps()[0].end, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parallel_matches_sequential_on_fixtures() {
        for text in [SIMPLE_1, SIMPLE_2, BOX_SIMPLE] {
            let (seq_poly, seq) = analyze(text, false);
            let (par_poly, par) = analyze(text, true);
            assert_eq!(seq.perimeter, par.perimeter);
            assert_eq!(seq.partial_facets, par.partial_facets);
            for (a, b) in seq_poly.edges().iter().zip(par_poly.edges()) {
                assert_eq!(a.gaps(), b.gaps());
            }
        }
    }

    #[test]
    fn test_rotated_fixture_keeps_gaps_well_formed() {
        let geom = GeomFile::parse(SIMPLE_2).unwrap();
        let mut poly = geom
            .polyhedron(Orientation::Rotated, ShadowConfig::default())
            .unwrap();
        poly.compute_shadows();

        for edge in poly.edges() {
            for gap in edge.gaps() {
                assert!(gap.begin >= 0.0 && gap.end <= 1.0 && gap.begin < gap.end);
            }
            for pair in edge.gaps().windows(2) {
                assert!(pair[0].end <= pair[1].begin);
            }
        }
        let pieces: usize = poly.edges().iter().map(|e| e.gaps().len()).sum();
        assert_eq!(poly.visible_segments().len(), pieces);
    }

    #[test]
    fn test_report_serializes() {
        let (_, report) = analyze(BOX_SIMPLE, false);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["partial_facets"], serde_json::json!([6]));
        assert_eq!(json["edge_count"], 28);
    }
}
