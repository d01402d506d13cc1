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

use crate::error::{Error, Result};
use crate::geometry::Aabb;
use crate::spatial::hash::{SpatialHash, compute_hash};

/// Deepest addressable octree level; level 0 is the root.
pub const MAX_DEPTH: u32 = 10;

/// Identifier of a node in the implicit (pointer-free) octree.
///
/// The `3 * L` low bits (`L` = level) hold the child path from the root,
/// one octant triple per level, followed by a single sentinel bit at
/// position `3 * L` marking the level boundary. The root is `1`. Children
/// of a key `k` are `k << 3 | i` for octants `i` in `0..8`, the parent is
/// `k >> 3`. Keys order first by level (the sentinel dominates), then by
/// path within a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey(u32);

impl NodeKey {
    pub const ROOT: NodeKey = NodeKey(1);

    /// Validate a raw key: exactly one sentinel bit above the path bits,
    /// and nothing beyond the maximum depth.
    pub fn from_raw(raw: u32) -> Result<NodeKey> {
        let key = NodeKey(raw);
        if key.is_valid() {
            Ok(key)
        } else {
            Err(Error::InvalidNodeKey(raw))
        }
    }

    pub fn raw(&self) -> u32 {
        self.0
    }

    /// True iff the highest set bit sits at a position divisible by 3 and
    /// no deeper than `3 * MAX_DEPTH`.
    pub fn is_valid(&self) -> bool {
        if self.0 == 0 {
            return false;
        }
        let high_bit = 31 - self.0.leading_zeros();
        high_bit % 3 == 0 && high_bit <= 3 * MAX_DEPTH
    }

    /// Level of the node; the position of the sentinel bit divided by 3.
    pub fn level(&self) -> u32 {
        debug_assert!(self.is_valid());
        (31 - self.0.leading_zeros()) / 3
    }

    pub fn parent(&self) -> NodeKey {
        debug_assert!(self.is_valid() && self.0 != 1);
        NodeKey(self.0 >> 3)
    }

    /// The 8 child keys, in octant order matching
    /// [`Aabb::child_boxes`](crate::geometry::Aabb::child_boxes).
    pub fn children(&self) -> [NodeKey; 8] {
        debug_assert!(self.is_valid() && self.level() < MAX_DEPTH);
        std::array::from_fn(|i| NodeKey((self.0 << 3) | i as u32))
    }

    /// The child path with the sentinel stripped.
    fn path(&self) -> u32 {
        self.0 ^ (1 << (3 * self.level()))
    }

    /// Inclusive start of the leaf-resolution Morton range owned by this
    /// node.
    pub fn begin(&self) -> SpatialHash {
        self.path() << (3 * (MAX_DEPTH - self.level()))
    }

    /// Exclusive end of the leaf-resolution Morton range owned by this
    /// node. For the root this is `2^30`.
    pub fn end(&self) -> SpatialHash {
        (self.path() + 1) << (3 * (MAX_DEPTH - self.level()))
    }

    /// Reconstruct the cell of this node within `root_box` by descending
    /// the octant path.
    pub fn cell(&self, root_box: &Aabb) -> Aabb {
        let level = self.level();
        let path = self.path();
        let mut b = *root_box;
        for depth in 1..=level {
            let octant = (path >> (3 * (level - depth))) & 0x7;
            b = b.child_boxes()[octant as usize];
        }
        b
    }

    /// The smallest node whose cell contains both corners of `b` when
    /// hashed into `root_box`.
    ///
    /// Both corner hashes are shifted right a triple at a time until they
    /// agree; the common prefix plus the sentinel is the answer. Corners
    /// outside `root_box` fold periodically, like every hash.
    pub fn smallest_containing(root_box: &Aabb, b: &Aabb) -> NodeKey {
        let mut lo = compute_hash(root_box, &b.min);
        let mut hi = compute_hash(root_box, &b.max);
        let mut level = MAX_DEPTH;
        while lo != hi {
            lo >>= 3;
            hi >>= 3;
            level -= 1;
        }
        NodeKey((1 << (3 * level)) | lo)
    }
}
