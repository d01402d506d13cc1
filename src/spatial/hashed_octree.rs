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

use std::ops::Range;

use log::debug;

use crate::error::{Error, Result};
use crate::geometry::{Aabb, Point};
use crate::mesh::vertex_array::VertexArray;
use crate::spatial::Visit;
use crate::spatial::hash::{SpatialHash, compute_hash};
use crate::spatial::node_key::{MAX_DEPTH, NodeKey};

/// Descent below a node stops once its cell volume falls under this
/// multiple of `eps^3`; the whole node range is scanned instead. Trades
/// traversal depth against candidate count.
const VOLUME_PRUNE_RATIO: f64 = 100.0;

/// A point index backed by a hash-sorted array.
///
/// Every stored point carries its 30-bit Morton code relative to `bbox`;
/// the arrays stay sorted by that code across insertions, so the points
/// under any octree node form one contiguous index range.
#[derive(Clone, Debug)]
pub struct HashedOctree<D> {
    vertices: VertexArray<D>,
    hashes: Vec<SpatialHash>,
    bbox: Aabb,
}

impl<D> HashedOctree<D> {
    pub fn new(bbox: Aabb) -> Result<Self> {
        if !bbox.is_valid() {
            return Err(Error::InvalidBoundingBox {
                min: bbox.min,
                max: bbox.max,
            });
        }
        Ok(HashedOctree {
            vertices: VertexArray::new(),
            hashes: Vec::new(),
            bbox,
        })
    }

    pub fn bbox(&self) -> &Aabb {
        &self.bbox
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn vertices(&self) -> &VertexArray<D> {
        &self.vertices
    }

    /// Hashes, ascending. Parallel to [`Self::vertices`].
    pub fn hashes(&self) -> &[SpatialHash] {
        &self.hashes
    }

    pub fn point(&self, i: usize) -> Point {
        self.vertices.point(i)
    }

    /// Insert the vertices of `va` in `range`, keeping the structure
    /// sorted by hash.
    ///
    /// The batch is hashed and sorted on its own, then merged linearly
    /// against the existing arrays; the structure as a whole is never
    /// re-sorted. Indices into this octree obtained before the call are
    /// invalidated.
    pub fn insert(&mut self, va: &VertexArray<D>, range: Range<usize>)
    where
        D: Clone,
    {
        debug_assert!(range.end <= va.len());
        if range.is_empty() {
            return;
        }
        let mut staged: Vec<(SpatialHash, usize)> = range
            .map(|i| (compute_hash(&self.bbox, &va.point(i)), i))
            .collect();
        staged.sort_unstable();

        let old_len = self.len();
        let total = old_len + staged.len();
        let mut merged = VertexArray::with_capacity(total);
        let mut merged_hashes: Vec<SpatialHash> = Vec::with_capacity(total);

        let mut i = 0;
        let mut j = 0;
        while i < old_len && j < staged.len() {
            if self.hashes[i] < staged[j].0 {
                merged_hashes.push(self.hashes[i]);
                merged.push(self.point(i), self.vertices.data(i).clone());
                i += 1;
            } else {
                let (h, m) = staged[j];
                merged_hashes.push(h);
                merged.push(va.point(m), va.data(m).clone());
                j += 1;
            }
        }
        while i < old_len {
            merged_hashes.push(self.hashes[i]);
            merged.push(self.point(i), self.vertices.data(i).clone());
            i += 1;
        }
        while j < staged.len() {
            let (h, m) = staged[j];
            merged_hashes.push(h);
            merged.push(va.point(m), va.data(m).clone());
            j += 1;
        }
        debug_assert!(merged_hashes.is_sorted());

        debug!(
            "octree merge: {} existing + {} new points",
            old_len,
            merged_hashes.len() - old_len
        );
        self.hashes = merged_hashes;
        self.vertices = merged;
    }

    /// Visit the indices of all points within sup-norm `eps` of `p`.
    ///
    /// Traversal starts at the smallest node covering the `eps`-box
    /// around `p` and descends only into child cells that overlap it.
    /// The visitor may return [`Visit::Stop`] to end the traversal early;
    /// the final verdict is returned.
    pub fn visit_near_points<F>(&self, p: &Point, eps: f64, mut visitor: F) -> Visit
    where
        F: FnMut(usize) -> Visit,
    {
        debug_assert!(eps >= 0.0);
        if self.hashes.is_empty() {
            return Visit::Continue;
        }
        let eps_box = Aabb::around(p, eps);
        let start = NodeKey::smallest_containing(&self.bbox, &eps_box);
        let cell = start.cell(&self.bbox);
        self.visit_node(start, &cell, p, eps, &eps_box, &mut visitor)
    }

    fn visit_node<F>(
        &self,
        key: NodeKey,
        cell: &Aabb,
        p: &Point,
        eps: f64,
        eps_box: &Aabb,
        visitor: &mut F,
    ) -> Visit
    where
        F: FnMut(usize) -> Visit,
    {
        if key.level() == MAX_DEPTH || cell.volume() <= VOLUME_PRUNE_RATIO * eps * eps * eps {
            return self.scan_node_range(key, p, eps, visitor);
        }
        let children = key.children();
        let child_cells = cell.child_boxes();
        for i in 0..8 {
            if child_cells[i].intersects(eps_box)
                && self.visit_node(children[i], &child_cells[i], p, eps, eps_box, visitor)
                    == Visit::Stop
            {
                return Visit::Stop;
            }
        }
        Visit::Continue
    }

    /// Scan the contiguous hash range owned by `key`, filtering
    /// candidates by actual coordinate distance.
    fn scan_node_range<F>(&self, key: NodeKey, p: &Point, eps: f64, visitor: &mut F) -> Visit
    where
        F: FnMut(usize) -> Visit,
    {
        let begin = key.begin();
        let end = key.end();
        let lo = self.hashes.partition_point(|&h| h < begin);
        let hi = self.hashes.partition_point(|&h| h < end);
        for i in lo..hi {
            if self.point(i).within_eps(p, eps) && visitor(i) == Visit::Stop {
                return Visit::Stop;
            }
        }
        Visit::Continue
    }

    /// Remove points that duplicate an earlier point to within `eps`.
    ///
    /// Points are scanned in ascending index order; a point near any
    /// earlier survivor is marked, its payload is handed to `dtor`, and
    /// the arrays are compacted preserving the survivors' order. Points
    /// whose only near earlier neighbors were themselves removed are
    /// kept, so this removes fewer points than marking against every
    /// earlier point would. With chains of pairwise-near points the
    /// surviving set depends on the stored order; only pairs of
    /// survivors are guaranteed to be more than `eps` apart.
    pub fn delete_duplicates(&mut self, eps: f64, dtor: impl FnMut(D)) {
        let n = self.len();
        let mut duplicate = vec![false; n];
        for i in 0..n {
            let p = self.point(i);
            self.visit_near_points(&p, eps, |j| {
                if j < i && !duplicate[j] {
                    duplicate[i] = true;
                    Visit::Stop
                } else {
                    Visit::Continue
                }
            });
        }
        let removed = duplicate.iter().filter(|&&d| d).count();
        if removed == 0 {
            return;
        }
        let keep: Vec<bool> = duplicate.iter().map(|&d| !d).collect();
        self.vertices.compact(&keep, dtor);
        let mut r = 0;
        self.hashes.retain(|_| {
            let k = keep[r];
            r += 1;
            k
        });
        debug_assert!(self.hashes.is_sorted());
        debug!("octree dedup: removed {} of {} points", removed, n);
    }
}
