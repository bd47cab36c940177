//! Serializable output records handed to reporting and rendering code.

use polyshade_math::Point3;
use serde::{Deserialize, Serialize};

/// A point on the projection plane, in unscaled units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point2D {
    /// Create a new 2D point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// True if the point lies in the closed square `[-h, h] x [-h, h]`.
    pub fn within_square(&self, half_extent: f64) -> bool {
        (-half_extent..=half_extent).contains(&self.x)
            && (-half_extent..=half_extent).contains(&self.y)
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// One visible piece of an edge, ready for a line-drawing collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibleSegment {
    /// Index of the edge in [`Polyhedron::edges`](crate::Polyhedron::edges).
    pub edge: usize,
    /// Start point `[x, y, z]`.
    pub start: [f64; 3],
    /// End point `[x, y, z]`.
    pub end: [f64; 3],
}

impl VisibleSegment {
    /// Create a segment from two 3D points.
    pub fn new(edge: usize, start: Point3, end: Point3) -> Self {
        Self {
            edge,
            start: [start.x, start.y, start.z],
            end: [end.x, end.y, end.z],
        }
    }
}

/// Summary of a full shadow analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadowReport {
    /// Sum of projected perimeters of the counted partially visible facets.
    pub perimeter: f64,
    /// Indices of the partially visible facets.
    pub partial_facets: Vec<usize>,
    /// Number of facets.
    pub facet_count: usize,
    /// Number of edges (one per facet side).
    pub edge_count: usize,
    /// Number of edges with nothing left visible.
    pub hidden_edges: usize,
    /// Number of visible edge pieces.
    pub visible_segments: usize,
}
