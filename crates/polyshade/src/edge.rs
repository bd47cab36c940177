//! Polyhedron edges and their visible parts.

use polyshade_math::{Point3, Vec3};

use crate::facet::{Facet, HalfSpace, ShadowVolume};
use crate::interval::Interval;

/// A straight edge parameterised on `[0, 1]`, together with the parts of it
/// that are still visible ("gaps").
///
/// Gaps start as the whole edge and only shrink as shadows are applied.
/// They stay sorted by `begin`, pairwise disjoint and non-degenerate.
#[derive(Debug, Clone)]
pub struct Edge {
    begin: Point3,
    end: Point3,
    gaps: Vec<Interval>,
}

impl Edge {
    /// Create a fully visible edge.
    pub fn new(begin: Point3, end: Point3) -> Self {
        Self {
            begin,
            end,
            gaps: vec![Interval::FULL],
        }
    }

    /// Start point (parameter 0).
    pub fn begin(&self) -> Point3 {
        self.begin
    }

    /// End point (parameter 1).
    pub fn end(&self) -> Point3 {
        self.end
    }

    /// Visible sub-intervals, sorted by `begin`.
    pub fn gaps(&self) -> &[Interval] {
        &self.gaps
    }

    /// Point at parameter `t`: `begin * (1 - t) + end * t`.
    pub fn point_at(&self, t: f64) -> Point3 {
        Point3::from(self.begin.coords * (1.0 - t) + self.end.coords * t)
    }

    /// Part of the edge on the shadow side of `half_space`.
    ///
    /// Returns `None` when both endpoints are on the kept side or on the
    /// boundary plane, so the edge gets no shadow from this plane.
    pub fn clip_against_plane(&self, half_space: &HalfSpace) -> Option<Interval> {
        let f0 = half_space.signed_distance(&self.begin);
        let f1 = half_space.signed_distance(&self.end);

        if f0 >= 0.0 && f1 >= 0.0 {
            return None;
        }
        if f0 < 0.0 && f1 < 0.0 {
            return Some(Interval::FULL);
        }

        let x = -f0 / (f1 - f0);
        if f0 < 0.0 {
            Some(Interval::new(0.0, x))
        } else {
            Some(Interval::new(x, 1.0))
        }
    }

    /// Interval of this edge occluded by the facet bounded by `volume`, if any.
    pub fn shade(&self, volume: &ShadowVolume) -> Option<Interval> {
        let mut shade = Interval::FULL;
        for side in &volume.sides {
            shade = shade.intersect(&self.clip_against_plane(side)?);
            if shade.is_degenerate() {
                return None;
            }
        }
        shade = shade.intersect(&self.clip_against_plane(&volume.horizontal)?);
        (!shade.is_degenerate()).then_some(shade)
    }

    /// Remove the shadow cast by `facet` viewed along `direction`.
    pub fn apply_shadow(&mut self, facet: &Facet, direction: &Vec3) {
        if let Some(volume) = facet.shadow_volume(direction) {
            self.apply_shadow_volume(&volume);
        }
    }

    /// Remove the shadow cast by a facet whose half-spaces are precomputed.
    pub fn apply_shadow_volume(&mut self, volume: &ShadowVolume) {
        let Some(shade) = self.shade(volume) else {
            return;
        };
        self.gaps = self
            .gaps
            .iter()
            .flat_map(|gap| gap.subtract(&shade))
            .filter(|gap| !gap.is_degenerate())
            .collect();
    }

    /// Endpoints of each visible part, in gap order.
    pub fn visible_parts(&self) -> impl Iterator<Item = (Point3, Point3)> + '_ {
        self.gaps
            .iter()
            .map(|gap| (self.point_at(gap.begin), self.point_at(gap.end)))
    }

    /// True if nothing of the edge remains visible.
    pub fn is_hidden(&self) -> bool {
        self.gaps.is_empty()
    }

    /// True if the whole edge is still visible.
    pub fn is_fully_visible(&self) -> bool {
        matches!(self.gaps.as_slice(), [gap] if gap.begin <= 0.0 && gap.end >= 1.0)
    }
}
