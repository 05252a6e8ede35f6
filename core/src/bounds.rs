//! Axis-aligned bounding boxes.

use glam::Vec3;

/// An axis-aligned bounding box given by its minimum and maximum corners.
///
/// The box over an empty point set is defined as a degenerate box with both
/// corners at the origin, so empty meshes always carry valid bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Degenerate box with both corners at the origin.
    pub const ZERO: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    /// Create a bounding box from explicit corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Compute the component-wise min/max box over a set of points.
    ///
    /// Returns [`Aabb::ZERO`] for an empty set.
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut iter = points.iter();
        let Some(first) = iter.next() else {
            return Self::ZERO;
        };

        let mut min = *first;
        let mut max = *first;
        for p in iter {
            min = min.min(*p);
            max = max.max(*p);
        }
        Self { min, max }
    }

    /// Center of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths of the box.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Check whether a point lies inside the box (inclusive).
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}
