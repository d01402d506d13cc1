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

use crate::geometry::{Aabb, Point};

/// A 30-bit Morton code of a point relative to a bounding box.
///
/// 10 bits per axis; the low 3 bits select the leaf-level octant, the most
/// significant used triple the coarsest.
pub type SpatialHash = u32;

/// Buckets per axis. 32-bit keys are large enough for `2^10` buckets
/// along each dimension.
pub const BITS_PER_DIM: u32 = 10;
pub const NUM_LEAF_BUCKETS: u32 = 1 << BITS_PER_DIM;

/// Fold `pos` into `[min, max)` periodically and scale it to a bucket
/// index in `[0, num_buckets)`. Positions outside the interval wrap.
fn compute_bucket(min: f64, max: f64, pos: f64, num_buckets: u32) -> u32 {
    debug_assert!(max > min);
    let extent = max - min;
    let mut folded_pos = (pos - min) % extent;
    if folded_pos < 0.0 {
        folded_pos += extent;
    }
    // Rounding can land exactly on num_buckets when folded_pos / extent
    // rounds up to 1.0; clamp into range.
    let bucket = (num_buckets as f64 * folded_pos / extent) as u32;
    bucket.min(num_buckets - 1)
}

/// Spread the low 10 bits of `a` so that consecutive bits land 3 apart.
fn part_1_by_2(mut a: u32) -> u32 {
    a &= 0x0000_03ff; // a = ---- ---- ---- ---- ---- --98 7654 3210
    a = (a ^ (a << 16)) & 0xff00_00ff; // a = ---- --98 ---- ---- ---- ---- 7654 3210
    a = (a ^ (a << 8)) & 0x0300_f00f; // a = ---- --98 ---- ---- 7654 ---- ---- 3210
    a = (a ^ (a << 4)) & 0x030c_30c3; // a = ---- --98 ---- 76-- --54 ---- 32-- --10
    a = (a ^ (a << 2)) & 0x0924_9249; // a = ---- 9--8 --7- -6-- 5--4 --3- -2-- 1--0
    a
}

/// 3-way bit interleave of three 10-bit values into one 30-bit code.
fn morton_encode(a: u32, b: u32, c: u32) -> u32 {
    part_1_by_2(a) | (part_1_by_2(b) << 1) | (part_1_by_2(c) << 2)
}

/// Morton code of `p` relative to `bbox`.
///
/// Points outside `bbox` are valid inputs: each axis is folded
/// periodically into the box extent before bucketing.
pub fn compute_hash(bbox: &Aabb, p: &Point) -> SpatialHash {
    let a = compute_bucket(bbox.min.x, bbox.max.x, p.x, NUM_LEAF_BUCKETS);
    let b = compute_bucket(bbox.min.y, bbox.max.y, p.y, NUM_LEAF_BUCKETS);
    let c = compute_bucket(bbox.min.z, bbox.max.z, p.z, NUM_LEAF_BUCKETS);
    morton_encode(a, b, c)
}
