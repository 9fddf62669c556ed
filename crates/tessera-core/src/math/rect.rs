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

//! Provides the axis-aligned rectangle used for collision bounds and camera mapping.

use super::Point;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle on the integer grid.
///
/// The rectangle spans `[x0, x1)` horizontally and `[y0, y1)` vertically when
/// used for drawing. Overlap tests, however, treat both bounds as inclusive,
/// so rectangles that merely share an edge are reported as overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rectangle {
    /// The left edge.
    pub x0: i32,
    /// The top edge.
    pub y0: i32,
    /// The right edge.
    pub x1: i32,
    /// The bottom edge.
    pub y1: i32,
}

impl Rectangle {
    /// Creates a rectangle from its two corners.
    #[inline]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Creates a rectangle from its top-left corner and a size.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_core::math::Rectangle;
    /// let r = Rectangle::from_origin_size(5, 5, 10, 10);
    /// assert_eq!(r, Rectangle::new(5, 5, 15, 15));
    /// ```
    #[inline]
    pub const fn from_origin_size(x0: i32, y0: i32, width: i32, height: i32) -> Self {
        Self {
            x0,
            y0,
            x1: x0 + width,
            y1: y0 + height,
        }
    }

    /// Returns the top-left corner.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    /// Returns the horizontal extent (`x1 - x0`).
    #[inline]
    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    /// Returns the vertical extent (`y1 - y0`).
    #[inline]
    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// Returns this rectangle moved by `offset`.
    #[inline]
    pub fn translated(&self, offset: Point) -> Self {
        Self {
            x0: self.x0 + offset.x,
            y0: self.y0 + offset.y,
            x1: self.x1 + offset.x,
            y1: self.y1 + offset.y,
        }
    }

    /// Checks if this rectangle overlaps another one.
    ///
    /// The test is closed on every edge: `a.x0 <= b.x1 && b.x0 <= a.x1` and the
    /// same on the y axis. Rectangles that only touch are overlapping.
    #[inline]
    pub fn overlaps(&self, other: &Rectangle) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_origin_size() {
        let r = Rectangle::from_origin_size(-2, 3, 4, 5);
        assert_eq!(r, Rectangle::new(-2, 3, 2, 8));
        assert_eq!(r.width(), 4);
        assert_eq!(r.height(), 5);
        assert_eq!(r.origin(), Point::new(-2, 3));
    }

    #[test]
    fn test_rect_translated() {
        let r = Rectangle::new(0, 0, 10, 10).translated(Point::new(5, -5));
        assert_eq!(r, Rectangle::new(5, -5, 15, 5));
    }

    #[test]
    fn test_overlap_partial() {
        let a = Rectangle::from_origin_size(0, 0, 10, 10);
        let b = Rectangle::from_origin_size(5, 5, 10, 10);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlap_contained() {
        let outer = Rectangle::new(0, 0, 100, 100);
        let inner = Rectangle::new(40, 40, 50, 50);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_overlap_touching_edges_count() {
        let a = Rectangle::new(0, 0, 10, 10);
        // Shares the vertical edge x = 10.
        assert!(a.overlaps(&Rectangle::new(10, 0, 20, 10)));
        // Shares the horizontal edge y = 10.
        assert!(a.overlaps(&Rectangle::new(0, 10, 10, 20)));
        // Shares only the corner (10, 10).
        assert!(a.overlaps(&Rectangle::new(10, 10, 20, 20)));
    }

    #[test]
    fn test_no_overlap_when_separated_on_one_axis() {
        let a = Rectangle::new(0, 0, 10, 10);
        assert!(!a.overlaps(&Rectangle::new(11, 0, 20, 10)));
        assert!(!a.overlaps(&Rectangle::new(0, 11, 10, 20)));
        assert!(!a.overlaps(&Rectangle::new(-20, -20, -1, -1)));
        assert!(!a.overlaps(&Rectangle::new(100, 100, 110, 110)));
    }

    #[test]
    fn test_overlap_matches_interval_condition_on_grid() {
        let a = Rectangle::from_origin_size(0, 0, 4, 4);
        for x in -6..=6 {
            for y in -6..=6 {
                let b = Rectangle::from_origin_size(x, y, 2, 2);
                let expected = a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1;
                assert_eq!(a.overlaps(&b), expected, "mismatch at ({x}, {y})");
                assert_eq!(b.overlaps(&a), expected, "asymmetric at ({x}, {y})");
            }
        }
    }
}
