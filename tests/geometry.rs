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

use hashgeo::geometry::{Aabb, Point};

#[test]
fn aabb_from_points_orders_the_corners() {
    let a = Aabb::from_points(&Point::new(2.0, -1.0, 0.5), &Point::new(0.0, 1.0, -0.5));
    assert_eq!(Point::new(0.0, -1.0, -0.5), a.min);
    assert_eq!(Point::new(2.0, 1.0, 0.5), a.max);
}

#[test]
fn aabb_union_covers_both_operands() {
    let a = Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 1.0));
    let b = Aabb::new(Point::new(-1.0, 0.5, 0.5), Point::new(0.5, 2.0, 0.75));
    let u = a.union(&b);
    assert_eq!(Point::new(-1.0, 0.0, 0.0), u.min);
    assert_eq!(Point::new(1.0, 2.0, 1.0), u.max);
}

#[test]
fn aabb_intersection_is_inclusive() {
    let a = Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 1.0));
    let touching = Aabb::new(Point::new(1.0, 0.0, 0.0), Point::new(2.0, 1.0, 1.0));
    let disjoint = Aabb::new(Point::new(1.5, 0.0, 0.0), Point::new(2.0, 1.0, 1.0));
    assert!(a.intersects(&touching));
    assert!(touching.intersects(&a));
    assert!(!a.intersects(&disjoint));
}

#[test]
fn aabb_validity_requires_positive_finite_extents() {
    assert!(Aabb::unit_cube().is_valid());
    let flat = Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 0.0, 1.0));
    assert!(!flat.is_valid());
    let inverted = Aabb::new(Point::new(1.0, 1.0, 1.0), Point::new(0.0, 0.0, 0.0));
    assert!(!inverted.is_valid());
    let unbounded = Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(f64::INFINITY, 1.0, 1.0));
    assert!(!unbounded.is_valid());
}

#[test]
fn child_boxes_follow_the_morton_bit_order() {
    let cube = Aabb::unit_cube();
    let children = cube.child_boxes();
    // Bit 0 selects the upper x-half, bit 1 the y-half, bit 2 the z-half.
    assert_eq!(Point::new(0.0, 0.0, 0.0), children[0].min);
    assert_eq!(Point::new(0.5, 0.0, 0.0), children[1].min);
    assert_eq!(Point::new(0.0, 0.5, 0.0), children[2].min);
    assert_eq!(Point::new(0.0, 0.0, 0.5), children[4].min);
    assert_eq!(Point::new(0.5, 0.5, 0.5), children[7].min);
    for c in &children {
        assert!((c.volume() - 0.125).abs() < 1.0e-12);
    }
}

#[test]
fn within_eps_is_a_per_axis_test() {
    let p = Point::new(0.0, 0.0, 0.0);
    // Euclidean distance exceeds eps, but every axis is within it.
    assert!(p.within_eps(&Point::new(1.0e-3, 1.0e-3, 1.0e-3), 1.0e-3));
    assert!(!p.within_eps(&Point::new(2.0e-3, 0.0, 0.0), 1.0e-3));
}

#[test]
fn around_builds_the_sup_norm_ball() {
    let b = Aabb::around(&Point::new(0.5, 0.5, 0.5), 0.25);
    assert_eq!(Point::new(0.25, 0.25, 0.25), b.min);
    assert_eq!(Point::new(0.75, 0.75, 0.75), b.max);
}
