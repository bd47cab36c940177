//! Polyhedron facets and the half-spaces bounding their shadow.

use polyshade_math::{centroid, Point3, Vec3};

/// A plane given by a point on it and its outward normal.
///
/// Points with `normal · (p - point) < 0` are on the shadow side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfSpace {
    /// A point on the boundary plane.
    pub point: Point3,
    /// Outward normal.
    pub normal: Vec3,
}

impl HalfSpace {
    /// Create a half-space.
    pub fn new(point: Point3, normal: Vec3) -> Self {
        Self { point, normal }
    }

    /// Signed (unnormalised) distance of `p` from the boundary plane.
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&(p - self.point))
    }
}

/// The prism a non-vertical facet shades: one side half-space per boundary
/// edge plus the facet's own supporting plane.
#[derive(Debug, Clone)]
pub struct ShadowVolume {
    /// Side half-spaces; the k-th contains the edge from vertex `k-1` to `k`.
    pub sides: Vec<HalfSpace>,
    /// Supporting plane, normal oriented toward the viewer.
    pub horizontal: HalfSpace,
}

/// A planar convex polygon of the polyhedron surface.
#[derive(Debug, Clone)]
pub struct Facet {
    vertices: Vec<Point3>,
}

impl Facet {
    /// Create a facet from its ordered vertices.
    ///
    /// Vertex count and distinctness are validated by
    /// [`Polyhedron::new`](crate::Polyhedron::new).
    pub fn new(vertices: Vec<Point3>) -> Self {
        Self { vertices }
    }

    /// Ordered vertices.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Number of vertices (and of boundary edges).
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True if the facet has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Arithmetic mean of the vertices.
    pub fn center(&self) -> Point3 {
        centroid(&self.vertices).unwrap_or_else(Point3::origin)
    }

    /// Normal of the supporting plane, oriented so that its dot product
    /// with `direction` is non-negative.
    ///
    /// Only the first three vertices are used. If they are collinear the
    /// normal is zero even when later vertices span an area, and the facet
    /// then counts as vertical.
    pub fn horizontal_normal(&self, direction: &Vec3) -> Vec3 {
        if self.vertices.len() < 3 {
            return Vec3::zeros();
        }
        let v0 = self.vertices[0];
        let n = (self.vertices[1] - v0).cross(&(self.vertices[2] - v0));
        if n.dot(direction) < 0.0 {
            -n
        } else {
            n
        }
    }

    /// True if the supporting plane is parallel to `direction`.
    ///
    /// Zero-area facets have a zero normal and count as vertical; a NaN
    /// product does too, so such facets never cast a shadow.
    pub fn is_vertical(&self, direction: &Vec3) -> bool {
        let d = self.horizontal_normal(direction).dot(direction);
        !(d.abs() > 0.0)
    }

    /// Outward side normals, one per vertex.
    ///
    /// The k-th normal belongs to the side plane through the edge from
    /// vertex `k-1` to vertex `k` (vertex 0's predecessor is the last one)
    /// and points away from the facet center.
    pub fn vertical_normals(&self, direction: &Vec3) -> Vec<Vec3> {
        let center = self.center();
        let n = self.vertices.len();
        (0..n)
            .map(|k| {
                let prev = self.vertices[(k + n - 1) % n];
                let normal = (self.vertices[k] - prev).cross(direction);
                if normal.dot(&(prev - center)) < 0.0 {
                    -normal
                } else {
                    normal
                }
            })
            .collect()
    }

    /// Half-spaces bounding this facet's shadow, or `None` for a vertical
    /// facet, which shades nothing.
    pub fn shadow_volume(&self, direction: &Vec3) -> Option<ShadowVolume> {
        if self.is_vertical(direction) {
            return None;
        }
        let sides = self
            .vertices
            .iter()
            .zip(self.vertical_normals(direction))
            .map(|(&point, normal)| HalfSpace::new(point, normal))
            .collect();
        Some(ShadowVolume {
            sides,
            horizontal: HalfSpace::new(self.vertices[0], self.horizontal_normal(direction)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z() -> Vec3 {
        Vec3::new(0.0, 0.0, 1.0)
    }

    fn square(z: f64) -> Facet {
        Facet::new(vec![
            Point3::new(0.0, 0.0, z),
            Point3::new(1.0, 0.0, z),
            Point3::new(1.0, 1.0, z),
            Point3::new(0.0, 1.0, z),
        ])
    }

    #[test]
    fn test_center() {
        let c = square(2.0).center();
        assert!((c - Point3::new(0.5, 0.5, 2.0)).norm() < 1e-12);
    }

    #[test]
    fn test_horizontal_normal_faces_viewer() {
        let ccw = square(0.0);
        let mut cw_vertices = ccw.vertices().to_vec();
        cw_vertices.reverse();
        let cw = Facet::new(cw_vertices);

        for facet in [ccw, cw] {
            let n = facet.horizontal_normal(&z());
            assert!(n.dot(&z()) > 0.0);
            assert!(n.x.abs() < 1e-12 && n.y.abs() < 1e-12);
        }
    }

    #[test]
    fn test_vertical_facet() {
        let wall = Facet::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ]);
        assert!(wall.is_vertical(&z()));
        assert!(wall.shadow_volume(&z()).is_none());
        assert!(!square(0.0).is_vertical(&z()));
    }

    #[test]
    fn test_collinear_facet_casts_no_shadow() {
        let sliver = Facet::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        ]);
        assert_eq!(sliver.horizontal_normal(&z()), Vec3::zeros());
        assert!(sliver.is_vertical(&z()));
    }

    #[test]
    fn test_collinear_leading_vertices_count_as_vertical() {
        // The quad has area, but its first three vertices lie on one line.
        let quad = Facet::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ]);
        assert_eq!(quad.horizontal_normal(&z()), Vec3::zeros());
        assert!(quad.shadow_volume(&z()).is_none());
    }

    #[test]
    fn test_vertical_normals_point_outward() {
        let facet = square(0.0);
        let normals = facet.vertical_normals(&z());
        assert_eq!(normals.len(), 4);

        let center = facet.center();
        let n = facet.len();
        for (k, normal) in normals.iter().enumerate() {
            // Edge midpoint lies on the side plane, center on the inner side.
            let prev = facet.vertices()[(k + n - 1) % n];
            let mid = Point3::from((prev.coords + facet.vertices()[k].coords) / 2.0);
            assert!(normal.dot(&(mid - center)) > 0.0);
            assert!(normal.dot(&z()).abs() < 1e-12);
        }

        // Side 0 is the edge from the last vertex (0,1) to the first (0,0): x = 0.
        assert!(normals[0].x < 0.0 && normals[0].y.abs() < 1e-12);
    }

    #[test]
    fn test_shadow_volume_planes() {
        let facet = square(3.0);
        let volume = facet.shadow_volume(&z()).unwrap();
        assert_eq!(volume.sides.len(), 4);
        assert_eq!(volume.horizontal.point, facet.vertices()[0]);

        // Below the facet and inside its outline: shadow side of every plane.
        let p = Point3::new(0.5, 0.5, 0.0);
        assert!(volume.horizontal.signed_distance(&p) < 0.0);
        assert!(volume.sides.iter().all(|h| h.signed_distance(&p) < 0.0));
    }
}
