// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use crate::geometry::point::Point;

/// An axis-aligned bounding box, `min <= max` component-wise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point,
    pub max: Point,
}

impl Aabb {
    pub const fn new(min: Point, max: Point) -> Self {
        Aabb { min, max }
    }

    /// The unit cube `[0, 1]^3`.
    pub const fn unit_cube() -> Self {
        Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 1.0))
    }

    /// Build the smallest AABB containing two points.
    pub fn from_points(a: &Point, b: &Point) -> Self {
        Aabb::new(a.min(b), a.max(b))
    }

    /// The sup-norm `eps`-ball around `p`, as a box.
    pub fn around(p: &Point, eps: f64) -> Self {
        Aabb::new(
            Point::new(p.x - eps, p.y - eps, p.z - eps),
            Point::new(p.x + eps, p.y + eps, p.z + eps),
        )
    }

    /// A box is usable as a hashing domain only if its extent is finite
    /// and strictly positive along every axis.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.max.x > self.min.x
            && self.max.y > self.min.y
            && self.max.z > self.min.z
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.min(&other.min), self.max.max(&other.max))
    }

    /// Grow this box to enclose every box in `volumes`.
    pub fn enclosing(&self, volumes: &[Aabb]) -> Aabb {
        let mut b = *self;
        for v in volumes {
            b = b.union(v);
        }
        b
    }

    /// Exact axis-aligned intersection test with inclusive bounds: boxes
    /// that merely touch are considered intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.max.x >= other.min.x
            && other.max.x >= self.min.x
            && self.max.y >= other.min.y
            && other.max.y >= self.min.y
            && self.max.z >= other.min.z
            && other.max.z >= self.min.z
    }

    pub fn extent(&self, axis: usize) -> f64 {
        match axis {
            0 => self.max.x - self.min.x,
            1 => self.max.y - self.min.y,
            _ => self.max.z - self.min.z,
        }
    }

    pub fn volume(&self) -> f64 {
        self.extent(0) * self.extent(1) * self.extent(2)
    }

    /// The 8 octant sub-boxes splitting this box in half along each axis.
    ///
    /// Octant `i` takes the upper x-half iff bit 0 of `i` is set, the
    /// upper y-half iff bit 1 is set, the upper z-half iff bit 2 is set.
    /// This matches the bit ordering of the Morton encoding and of
    /// [`NodeKey::children`](crate::spatial::node_key::NodeKey::children).
    pub fn child_boxes(&self) -> [Aabb; 8] {
        let mid = Point::new(
            0.5 * (self.min.x + self.max.x),
            0.5 * (self.min.y + self.max.y),
            0.5 * (self.min.z + self.max.z),
        );
        std::array::from_fn(|i| {
            let min = Point::new(
                if i & 1 == 0 { self.min.x } else { mid.x },
                if i & 2 == 0 { self.min.y } else { mid.y },
                if i & 4 == 0 { self.min.z } else { mid.z },
            );
            let max = Point::new(
                if i & 1 == 0 { mid.x } else { self.max.x },
                if i & 2 == 0 { mid.y } else { self.max.y },
                if i & 4 == 0 { mid.z } else { self.max.z },
            );
            Aabb::new(min, max)
        })
    }
}
