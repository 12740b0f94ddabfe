// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides geometric primitive shapes for spatial calculations.
//!
//! This module contains the axis-aligned rectangle used for entity bounds
//! and the overlap tests the combat and steering code rely on.

use super::Vec2;

/// Represents an axis-aligned rectangle, defined by its minimum and maximum
/// corner points.
///
/// It is the bounding shape every collidable entity exposes, and the input
/// to both overlap tests used during combat resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// The corner of the rectangle with the smallest coordinates on both axes.
    pub min: Vec2,
    /// The corner of the rectangle with the largest coordinates on both axes.
    pub max: Vec2,
}

impl Rect {
    /// Creates a new `Rect` from two corner points.
    ///
    /// This constructor automatically ensures that the `min` field holds the
    /// component-wise minimum and `max` holds the component-wise maximum,
    /// regardless of the order the points are passed in.
    #[inline]
    pub fn from_min_max(min_pt: Vec2, max_pt: Vec2) -> Self {
        Self {
            min: Vec2::new(min_pt.x.min(max_pt.x), min_pt.y.min(max_pt.y)),
            max: Vec2::new(min_pt.x.max(max_pt.x), min_pt.y.max(max_pt.y)),
        }
    }

    /// Creates a new `Rect` from a center point and its full size.
    ///
    /// The provided `size` will be made non-negative.
    #[inline]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Returns the center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Returns the full size of the rectangle.
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Returns `true` if `point` lies inside the rectangle (inclusive).
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Returns `true` if this rectangle and `other` overlap.
    ///
    /// Touching edges count as an overlap, matching the permissive hit
    /// detection used by the combat code.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Clamps `point` into the rectangle.
    #[inline]
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    /// Returns a copy of the rectangle translated by `offset`.
    #[inline]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Returns a copy of the rectangle grown by `margin` on every side.
    #[inline]
    pub fn inflated(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }
}

/// Tests whether `point` lies inside the axis-aligned ellipse centered at
/// `center` with half-axes `radii`.
///
/// The test is performed in normalized space, so degenerate radii reject
/// every point instead of dividing by zero.
#[inline]
pub fn ellipse_contains(center: Vec2, radii: Vec2, point: Vec2) -> bool {
    if radii.x <= 0.0 || radii.y <= 0.0 {
        return false;
    }
    let dx = (point.x - center.x) / radii.x;
    let dy = (point.y - center.y) / radii.y;
    dx * dx + dy * dy <= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_min_max_reorders_corners() {
        let r = Rect::from_min_max(Vec2::new(4.0, 1.0), Vec2::new(0.0, 3.0));
        assert_eq!(r.min, Vec2::new(0.0, 1.0));
        assert_eq!(r.max, Vec2::new(4.0, 3.0));
    }

    #[test]
    fn overlap_detection() {
        let a = Rect::from_center_size(Vec2::ZERO, Vec2::splat(2.0));
        let b = Rect::from_center_size(Vec2::new(1.5, 0.0), Vec2::splat(2.0));
        let c = Rect::from_center_size(Vec2::new(5.0, 0.0), Vec2::splat(2.0));

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn touching_edges_overlap() {
        let a = Rect::from_min_max(Vec2::ZERO, Vec2::splat(1.0));
        let b = Rect::from_min_max(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn clamp_point_into_bounds() {
        let r = Rect::from_min_max(Vec2::ZERO, Vec2::splat(10.0));
        assert_eq!(r.clamp_point(Vec2::new(-3.0, 25.0)), Vec2::new(0.0, 10.0));
        assert_eq!(r.clamp_point(Vec2::new(5.0, 5.0)), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn ellipse_containment() {
        let center = Vec2::ZERO;
        let radii = Vec2::new(4.0, 2.0);

        assert!(ellipse_contains(center, radii, Vec2::new(3.9, 0.0)));
        assert!(ellipse_contains(center, radii, Vec2::new(0.0, -1.9)));
        // Inside the bounding rectangle but outside the ellipse.
        assert!(!ellipse_contains(center, radii, Vec2::new(3.5, 1.8)));
    }

    #[test]
    fn degenerate_ellipse_rejects_everything() {
        assert!(!ellipse_contains(Vec2::ZERO, Vec2::ZERO, Vec2::ZERO));
    }
}
