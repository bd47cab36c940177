//! Reader for the `.geom` polyhedron text format.
//!
//! ```text
//! <homothety> <alpha> <beta> <gamma>      # Euler angles in degrees
//! <nv> <nf> <ne>
//! <x> <y> <z>                             # nv vertex lines
//! <size> <i1> ... <isize>                 # nf facet lines, 1-based indices
//! ```
//!
//! Blank lines are ignored. `ne` is informational only.

use std::path::Path;
use std::str::FromStr;

use log::{debug, warn};
use polyshade_math::{Point3, Transform};

use crate::config::ShadowConfig;
use crate::error::{Result, ShadowError};
use crate::polyhedron::{Polyhedron, PolyhedronDescription};

/// How vertices are positioned when building a polyhedron from a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Scale only; the Euler angles are ignored. Used for perimeter runs.
    #[default]
    Identity,
    /// Rotate by the file's Euler angles, then scale. Used for drawing.
    Rotated,
}

/// Parsed contents of a `.geom` file, before any transform.
#[derive(Debug, Clone)]
pub struct GeomFile {
    /// Homothety coefficient.
    pub homothety: f64,
    /// Euler angles `[alpha, beta, gamma]` in degrees.
    pub angles: [f64; 3],
    /// Vertices as written in the file.
    pub vertices: Vec<Point3>,
    /// Facets as 0-based vertex indices.
    pub facets: Vec<Vec<usize>>,
    /// Edge count declared in the header.
    pub edge_count: usize,
}

impl GeomFile {
    /// Read and parse a `.geom` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!("loading {}", path.display());
        Self::parse(&text)
    }

    /// Parse `.geom` text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = Lines::new(text);

        let (line, header) = lines.next_fields("header")?;
        expect_fields(line, &header, 4, "header")?;
        let homothety: f64 = parse_field(line, header[0], "homothety")?;
        if !homothety.is_finite() || homothety <= 0.0 {
            return Err(ShadowError::parse(line, "homothety must be positive"));
        }
        let angles: [f64; 3] = [
            parse_field(line, header[1], "alpha")?,
            parse_field(line, header[2], "beta")?,
            parse_field(line, header[3], "gamma")?,
        ];
        if !angles.iter().all(|a| a.is_finite()) {
            return Err(ShadowError::parse(line, "Euler angles must be finite"));
        }

        let (line, counts) = lines.next_fields("counts")?;
        expect_fields(line, &counts, 3, "counts")?;
        let nv: usize = parse_field(line, counts[0], "vertex count")?;
        let nf: usize = parse_field(line, counts[1], "facet count")?;
        let edge_count: usize = parse_field(line, counts[2], "edge count")?;

        let mut vertices = Vec::with_capacity(nv);
        for _ in 0..nv {
            let (line, fields) = lines.next_fields("vertex")?;
            expect_fields(line, &fields, 3, "vertex")?;
            let vertex = Point3::new(
                parse_field(line, fields[0], "x")?,
                parse_field(line, fields[1], "y")?,
                parse_field(line, fields[2], "z")?,
            );
            if !vertex.coords.iter().all(|c| c.is_finite()) {
                return Err(ShadowError::parse(line, "vertex coordinates must be finite"));
            }
            vertices.push(vertex);
        }

        let mut facets = Vec::with_capacity(nf);
        for _ in 0..nf {
            let (line, fields) = lines.next_fields("facet")?;
            let size: usize = parse_field(line, fields[0], "facet size")?;
            if fields.len() - 1 != size {
                return Err(ShadowError::parse(
                    line,
                    format!("facet declares {} vertices, lists {}", size, fields.len() - 1),
                ));
            }

            let mut indices = Vec::with_capacity(size);
            for field in &fields[1..] {
                let index: usize = parse_field(line, field, "vertex index")?;
                if index == 0 || index > nv {
                    return Err(ShadowError::parse(
                        line,
                        format!("vertex index {} out of range 1..={}", index, nv),
                    ));
                }
                indices.push(index - 1);
            }
            facets.push(indices);
        }

        if let Ok((line, _)) = lines.next_fields("end of input") {
            return Err(ShadowError::parse(line, "unexpected data after last facet"));
        }

        let sides: usize = facets.iter().map(Vec::len).sum();
        if sides != edge_count {
            warn!(
                "header declares {} edges, facets have {} sides",
                edge_count, sides
            );
        }
        debug!("parsed {} vertices, {} facets", vertices.len(), facets.len());

        Ok(Self {
            homothety,
            angles,
            vertices,
            facets,
            edge_count,
        })
    }

    /// Vertex transform for the given orientation.
    pub fn transform(&self, orientation: Orientation) -> Transform {
        let scale = Transform::uniform_scale(self.homothety);
        match orientation {
            Orientation::Identity => scale,
            Orientation::Rotated => {
                let [alpha, beta, gamma] = self.angles.map(f64::to_radians);
                scale.then(&Transform::euler_zyz(alpha, beta, gamma))
            }
        }
    }

    /// Positioned vertices and facets.
    pub fn description(&self, orientation: Orientation) -> PolyhedronDescription {
        let transform = self.transform(orientation);
        PolyhedronDescription {
            vertices: self
                .vertices
                .iter()
                .map(|p| transform.apply_point(p))
                .collect(),
            facets: self.facets.clone(),
        }
    }

    /// Default settings carrying this file's homothety.
    pub fn config(&self) -> ShadowConfig {
        ShadowConfig::with_homothety(self.homothety)
    }

    /// Build a polyhedron. The file's homothety replaces the one in `config`.
    pub fn polyhedron(&self, orientation: Orientation, config: ShadowConfig) -> Result<Polyhedron> {
        let config = ShadowConfig {
            homothety: self.homothety,
            ..config
        };
        Polyhedron::new(&self.description(orientation), config)
    }
}

/// Non-blank lines split into whitespace-separated fields.
struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
    last: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
            last: 0,
        }
    }

    fn next_fields(&mut self, what: &str) -> Result<(usize, Vec<&'a str>)> {
        for (index, line) in self.inner.by_ref() {
            self.last = index + 1;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if !fields.is_empty() {
                return Ok((index + 1, fields));
            }
        }
        Err(ShadowError::parse(
            self.last + 1,
            format!("unexpected end of input, expected {}", what),
        ))
    }
}

fn expect_fields(line: usize, fields: &[&str], count: usize, what: &str) -> Result<()> {
    if fields.len() != count {
        return Err(ShadowError::parse(
            line,
            format!("{} needs {} fields, found {}", what, count, fields.len()),
        ));
    }
    Ok(())
}

fn parse_field<T: FromStr>(line: usize, field: &str, what: &str) -> Result<T> {
    field
        .parse()
        .map_err(|_| ShadowError::parse(line, format!("invalid {}: {:?}", what, field)))
}
