//! One-dimensional segments over an edge's parameter domain `[0, 1]`.

use serde::{Deserialize, Serialize};

/// A closed sub-range `[begin, end]` of an edge parameter.
///
/// An interval with `begin >= end` is degenerate and stands for "nothing".
/// Operations never fail; they may return degenerate results that callers
/// filter out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower bound.
    pub begin: f64,
    /// Upper bound.
    pub end: f64,
}

impl Interval {
    /// The whole edge, `[0, 1]`.
    pub const FULL: Self = Self {
        begin: 0.0,
        end: 1.0,
    };

    /// Create a new interval.
    pub fn new(begin: f64, end: f64) -> Self {
        Self { begin, end }
    }

    /// True iff the interval contains no interior (`begin >= end`).
    pub fn is_degenerate(&self) -> bool {
        self.begin >= self.end
    }

    /// Length of the interval, zero when degenerate.
    pub fn length(&self) -> f64 {
        (self.end - self.begin).max(0.0)
    }

    /// Intersection with `other`. May be degenerate.
    pub fn intersect(&self, other: &Interval) -> Interval {
        Interval {
            begin: self.begin.max(other.begin),
            end: self.end.min(other.end),
        }
    }

    /// `self` minus `other`, as the left and right remainders.
    ///
    /// Always returns exactly two intervals; either may be degenerate when
    /// nothing remains on that side.
    pub fn subtract(&self, other: &Interval) -> [Interval; 2] {
        [
            Interval::new(self.begin, self.end.min(other.begin)),
            Interval::new(self.begin.max(other.end), self.end),
        ]
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::FULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn samples() -> Vec<Interval> {
        vec![
            Interval::new(0.0, 1.0),
            Interval::new(0.0, 0.25),
            Interval::new(0.2, 0.6),
            Interval::new(0.5, 0.75),
            Interval::new(0.75, 1.0),
            Interval::new(0.9, 0.95),
            Interval::new(1.0, 0.0),
        ]
    }

    #[test]
    fn test_degenerate() {
        assert!(!Interval::FULL.is_degenerate());
        assert!(Interval::new(0.5, 0.5).is_degenerate());
        assert!(Interval::new(1.0, 0.0).is_degenerate());
        assert_eq!(Interval::new(1.0, 0.0).length(), 0.0);
    }

    #[test]
    fn test_intersect_is_commutative() {
        for a in samples() {
            for b in samples() {
                assert_eq!(a.intersect(&b), b.intersect(&a));
            }
        }
    }

    #[test]
    fn test_intersect_degenerate_iff_disjoint() {
        for a in samples() {
            for b in samples() {
                let overlap = !a.is_degenerate()
                    && !b.is_degenerate()
                    && a.begin < b.end
                    && b.begin < a.end;
                assert_eq!(
                    a.intersect(&b).is_degenerate(),
                    !overlap,
                    "{:?} and {:?}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_intersect_does_not_touch_operands() {
        let a = Interval::new(0.0, 0.5);
        let b = Interval::new(0.25, 1.0);
        let c = a.intersect(&b);
        assert_eq!(c, Interval::new(0.25, 0.5));
        assert_eq!(a, Interval::new(0.0, 0.5));
    }

    #[test]
    fn test_subtract_inner() {
        let [left, right] = Interval::FULL.subtract(&Interval::new(0.25, 0.5));
        assert_eq!(left, Interval::new(0.0, 0.25));
        assert_eq!(right, Interval::new(0.5, 1.0));
    }

    #[test]
    fn test_subtract_lengths() {
        let a = Interval::new(0.1, 0.9);
        for b in [
            Interval::new(0.1, 0.2),
            Interval::new(0.3, 0.6),
            Interval::new(0.7, 0.9),
            Interval::new(0.1, 0.9),
        ] {
            let total: f64 = a
                .subtract(&b)
                .iter()
                .filter(|s| !s.is_degenerate())
                .map(Interval::length)
                .sum();
            assert_abs_diff_eq!(total, a.length() - b.length(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_subtract_covering() {
        let parts = Interval::new(0.3, 0.4).subtract(&Interval::FULL);
        assert!(parts.iter().all(Interval::is_degenerate));
    }

    #[test]
    fn test_subtract_disjoint_keeps_receiver() {
        let a = Interval::new(0.0, 0.3);
        let kept: Vec<_> = a
            .subtract(&Interval::new(0.5, 0.8))
            .into_iter()
            .filter(|s| !s.is_degenerate())
            .collect();
        assert_eq!(kept, vec![a]);
    }
}
