//! The polyhedron: builds edges and facets, runs the shadow pass, and
//! aggregates the perimeter of partially visible facets.

use log::{debug, trace};
use polyshade_math::{Point3, Vec3};
use rayon::prelude::*;

use crate::config::ShadowConfig;
use crate::edge::Edge;
use crate::error::{Result, ShadowError};
use crate::facet::{Facet, ShadowVolume};
use crate::types::{Point2D, ShadowReport, VisibleSegment};

/// Raw polyhedron geometry: positioned vertices and facets as 0-based
/// vertex index lists.
#[derive(Debug, Clone, Default)]
pub struct PolyhedronDescription {
    /// Vertex positions, already rotated and scaled.
    pub vertices: Vec<Point3>,
    /// Ordered vertex indices of each facet.
    pub facets: Vec<Vec<usize>>,
}

/// Orthonormal frame of the projection plane.
///
/// For the default direction `+z` the axes are exactly `x` and `y`, so
/// projecting just drops the z coordinate.
#[derive(Debug, Clone, Copy)]
struct ScreenFrame {
    u: Vec3,
    w: Vec3,
    homothety: f64,
}

impl ScreenFrame {
    fn new(direction: &Vec3, homothety: f64) -> Self {
        let d = direction.normalize();
        let helper = if d.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
        let u = (helper - d * helper.dot(&d)).normalize();
        let w = d.cross(&u);
        Self { u, w, homothety }
    }

    fn project(&self, p: &Point3) -> Point2D {
        Point2D::new(
            p.coords.dot(&self.u) / self.homothety,
            p.coords.dot(&self.w) / self.homothety,
        )
    }
}

/// A polyhedron prepared for self-shadowing analysis.
///
/// Each facet owns its own boundary edges: an edge shared by two facets
/// appears twice, once per facet, in facet order.
#[derive(Debug, Clone)]
pub struct Polyhedron {
    config: ShadowConfig,
    direction: Vec3,
    vertices: Vec<Point3>,
    edges: Vec<Edge>,
    facets: Vec<Facet>,
    facet_sizes: Vec<usize>,
    shadows_applied: bool,
    partial_facets: Vec<usize>,
}

impl Polyhedron {
    /// Build a polyhedron from its description.
    ///
    /// Fails on invalid settings, an empty description, out-of-range vertex
    /// indices, or facets with fewer than three distinct vertices.
    pub fn new(description: &PolyhedronDescription, config: ShadowConfig) -> Result<Self> {
        config.validate()?;

        let vertices = &description.vertices;
        if vertices.is_empty() {
            return Err(ShadowError::invalid("no vertices"));
        }
        if description.facets.is_empty() {
            return Err(ShadowError::invalid("no facets"));
        }
        if let Some(index) = vertices
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(ShadowError::invalid(format!(
                "vertex {} has a non-finite coordinate",
                index
            )));
        }

        let mut edges = Vec::new();
        let mut facets = Vec::with_capacity(description.facets.len());
        let mut facet_sizes = Vec::with_capacity(description.facets.len());

        for (facet_index, indices) in description.facets.iter().enumerate() {
            if indices.len() < 3 {
                return Err(ShadowError::invalid(format!(
                    "facet {} has {} vertices, at least 3 required",
                    facet_index,
                    indices.len()
                )));
            }

            let mut points = Vec::with_capacity(indices.len());
            for &index in indices {
                let point = vertices.get(index).ok_or_else(|| {
                    ShadowError::invalid(format!(
                        "facet {} references vertex {} of {}",
                        facet_index,
                        index,
                        vertices.len()
                    ))
                })?;
                points.push(*point);
            }

            let mut distinct: Vec<Point3> = Vec::with_capacity(points.len());
            for p in &points {
                if !distinct.contains(p) {
                    distinct.push(*p);
                }
            }
            if distinct.len() < 3 {
                return Err(ShadowError::invalid(format!(
                    "facet {} has only {} distinct vertices",
                    facet_index,
                    distinct.len()
                )));
            }

            let n = points.len();
            for k in 0..n {
                edges.push(Edge::new(points[(k + n - 1) % n], points[k]));
            }
            facet_sizes.push(n);
            facets.push(Facet::new(points));
        }

        Ok(Self {
            direction: config.direction(),
            config,
            vertices: vertices.clone(),
            edges,
            facets,
            facet_sizes,
            shadows_applied: false,
            partial_facets: Vec::new(),
        })
    }

    /// Settings this polyhedron was built with.
    pub fn config(&self) -> &ShadowConfig {
        &self.config
    }

    /// Vertex positions.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// All edges, grouped by facet in facet order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// All facets.
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Number of boundary edges of each facet.
    pub fn facet_sizes(&self) -> &[usize] {
        &self.facet_sizes
    }

    /// The boundary edges of facet `index`, or `None` if out of range.
    pub fn edges_of(&self, index: usize) -> Option<&[Edge]> {
        let size = *self.facet_sizes.get(index)?;
        let start: usize = self.facet_sizes[..index].iter().sum();
        Some(&self.edges[start..start + size])
    }

    /// Subtract every facet's shadow from every edge.
    ///
    /// Repeated calls do nothing: shadowing is idempotent.
    pub fn compute_shadows(&mut self) {
        if self.shadows_applied {
            return;
        }

        let volumes: Vec<ShadowVolume> = self
            .facets
            .iter()
            .filter_map(|facet| facet.shadow_volume(&self.direction))
            .collect();
        debug!(
            "shadow pass: {} edges against {} shading facets ({} vertical)",
            self.edges.len(),
            volumes.len(),
            self.facets.len() - volumes.len()
        );

        let shade = |edge: &mut Edge| {
            for volume in &volumes {
                edge.apply_shadow_volume(volume);
            }
        };
        if self.config.parallel {
            self.edges.par_iter_mut().for_each(shade);
        } else {
            self.edges.iter_mut().for_each(shade);
        }

        self.shadows_applied = true;
    }

    /// Find facets whose boundary is neither fully hidden nor fully exposed.
    ///
    /// Runs the shadow pass first if needed.
    pub fn classify_facets(&mut self) -> &[usize] {
        self.compute_shadows();

        let noise_floor = self.config.noise_floor;
        let mut partial = Vec::new();
        let mut start = 0;
        for (index, &size) in self.facet_sizes.iter().enumerate() {
            let edges = &self.edges[start..start + size];
            start += size;
            if edges.iter().any(|e| is_partially_visible(e, noise_floor)) {
                partial.push(index);
            }
        }

        debug!(
            "{} of {} facets partially visible",
            partial.len(),
            self.facets.len()
        );
        self.partial_facets = partial;
        &self.partial_facets
    }

    /// Sum the projected perimeters of partially visible facets whose
    /// projected center lies outside the exclusion square.
    ///
    /// Classifies facets first.
    pub fn perimeter(&mut self) -> f64 {
        self.classify_facets();

        let frame = ScreenFrame::new(&self.direction, self.config.homothety);
        let half_extent = self.config.exclusion_half_extent;
        let mut total = 0.0;
        for &index in &self.partial_facets {
            let outline: Vec<Point2D> = self.facets[index]
                .vertices()
                .iter()
                .map(|p| frame.project(p))
                .collect();
            let center = outline_center(&outline);
            if center.within_square(half_extent) {
                trace!("facet {} excluded, center ({}, {})", index, center.x, center.y);
                continue;
            }
            let perimeter = outline_perimeter(&outline);
            trace!("facet {} adds perimeter {}", index, perimeter);
            total += perimeter;
        }

        total
    }

    /// Partially visible facets found by the last classification.
    pub fn partial_facets(&self) -> &[usize] {
        &self.partial_facets
    }

    /// Full analysis: shadows, classification, perimeter and counts.
    pub fn analyze(&mut self) -> ShadowReport {
        let perimeter = self.perimeter();

        ShadowReport {
            perimeter,
            partial_facets: self.partial_facets.clone(),
            facet_count: self.facets.len(),
            edge_count: self.edges.len(),
            hidden_edges: self.edges.iter().filter(|e| e.is_hidden()).count(),
            visible_segments: self.edges.iter().map(|e| e.gaps().len()).sum(),
        }
    }

    /// Every visible piece of every edge, for drawing.
    pub fn visible_segments(&self) -> Vec<VisibleSegment> {
        self.edges
            .iter()
            .enumerate()
            .flat_map(|(index, edge)| {
                edge.visible_parts()
                    .map(move |(start, end)| VisibleSegment::new(index, start, end))
            })
            .collect()
    }
}

/// More than one gap left, or a single one that is neither the whole edge
/// nor below the noise floor.
fn is_partially_visible(edge: &Edge, noise_floor: f64) -> bool {
    match edge.gaps() {
        [] => false,
        [gap] => noise_floor < gap.length() && gap.length() < 1.0,
        _ => true,
    }
}

fn outline_center(outline: &[Point2D]) -> Point2D {
    let n = outline.len() as f64;
    let (x, y) = outline
        .iter()
        .fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
    Point2D::new(x / n, y / n)
}

fn outline_perimeter(outline: &[Point2D]) -> f64 {
    let n = outline.len();
    (0..n)
        .map(|k| outline[(k + n - 1) % n].distance(&outline[k]))
        .sum()
}
