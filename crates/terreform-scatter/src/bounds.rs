//! Axis-aligned rectangle over the terrain footprint.

use glam::Vec2;

/// An axis-aligned rectangle. `min <= max` on both axes by construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    min: Vec2,
    max: Vec2,
}

impl Bounds {
    /// Builds the rectangle spanned by two corners, in any order.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest rectangle containing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    /// Lower corner.
    pub fn min(&self) -> Vec2 {
        self.min
    }

    /// Upper corner.
    pub fn max(&self) -> Vec2 {
        self.max
    }

    /// Extent along X.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Extent along the second axis (local Z).
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Width times height.
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Centre point.
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Returns `true` if the rectangle has zero area.
    pub fn is_empty(&self) -> bool {
        self.area() <= 0.0
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Returns `true` if `other` lies entirely inside `self`.
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Moves every side inward by `margin`.
    ///
    /// Returns `None` when the margin would invert the rectangle. A margin of exactly
    /// half the width or height yields a zero-area rectangle.
    pub fn shrink(&self, margin: f32) -> Option<Self> {
        let min = self.min + Vec2::splat(margin);
        let max = self.max - Vec2::splat(margin);
        (min.x <= max.x && min.y <= max.y).then_some(Self { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_orders_corners() {
        let b = Bounds::new(Vec2::new(3.0, -1.0), Vec2::new(-2.0, 4.0));
        assert_eq!(b.min(), Vec2::new(-2.0, -1.0));
        assert_eq!(b.max(), Vec2::new(3.0, 4.0));
        assert_eq!(b.area(), 25.0);
    }

    #[test]
    fn test_from_points_empty_is_none() {
        assert!(Bounds::from_points(Vec::<Vec2>::new()).is_none());
        let b = Bounds::from_points([Vec2::ONE, Vec2::ZERO, Vec2::new(0.5, 2.0)]).unwrap();
        assert_eq!(b, Bounds::new(Vec2::ZERO, Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_shrink_inverts_to_none() {
        let b = Bounds::new(Vec2::ZERO, Vec2::new(4.0, 2.0));
        let s = b.shrink(0.5).unwrap();
        assert_eq!(s, Bounds::new(Vec2::splat(0.5), Vec2::new(3.5, 1.5)));
        assert!(b.contains_bounds(&s));

        let flat = b.shrink(1.0).unwrap();
        assert!(flat.is_empty());
        assert!(b.shrink(1.01).is_none());
    }
}
