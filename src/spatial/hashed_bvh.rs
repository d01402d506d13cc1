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

use log::debug;

use crate::error::{Error, Result};
use crate::geometry::Aabb;
use crate::spatial::Visit;
use crate::spatial::node_key::{MAX_DEPTH, NodeKey};

/// Number of levels at which volumes are stored, `0..NUM_LEVELS`. The
/// deepest stored level must keep one level of children addressable for
/// the recursion, so it is one short of the key depth.
const NUM_LEVELS: usize = MAX_DEPTH as usize;

/// One node of the derived subtree-count tree. Children are arena
/// indices; a missing child means an empty subtree.
#[derive(Clone, Debug)]
struct CountNode {
    size: usize,
    children: [Option<usize>; 8],
}

impl CountNode {
    fn new() -> Self {
        CountNode {
            size: 0,
            children: [None; 8],
        }
    }
}

/// A bounding-volume index keyed by smallest enclosing octree node.
///
/// Volumes are partitioned by the level of that node and each level slice
/// is kept sorted by key, so the volumes anchored at any node form one
/// contiguous run inside their level. A derived count tree, rebuilt after
/// every insertion batch, lets queries skip empty subtrees.
#[derive(Clone, Debug)]
pub struct HashedBvh<D> {
    volumes: Vec<Aabb>,
    data: Vec<D>,
    hashes: Vec<NodeKey>,
    level_begin: [usize; NUM_LEVELS + 1],
    bbox: Aabb,
    arena: Vec<CountNode>,
}

impl<D> HashedBvh<D> {
    pub fn new(bbox: Aabb) -> Result<Self> {
        if !bbox.is_valid() {
            return Err(Error::InvalidBoundingBox {
                min: bbox.min,
                max: bbox.max,
            });
        }
        Ok(HashedBvh {
            volumes: Vec::new(),
            data: Vec::new(),
            hashes: Vec::new(),
            level_begin: [0; NUM_LEVELS + 1],
            bbox,
            arena: Vec::new(),
        })
    }

    /// The current hashing domain. Grows to enclose inserted volumes.
    pub fn bbox(&self) -> &Aabb {
        &self.bbox
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn volume(&self, i: usize) -> Aabb {
        self.volumes[i]
    }

    pub fn data(&self, i: usize) -> &D {
        &self.data[i]
    }

    /// Insert a batch of volumes with their payloads.
    ///
    /// The bounding box first grows to enclose the batch; if it changes,
    /// every stored volume is re-keyed under the new box, since node
    /// cells move when the domain does and stale keys would let the
    /// traversal prune volumes it should report. Each new volume is
    /// keyed by its smallest enclosing node, the batch is partitioned by
    /// level and sorted, and every level slice is merged two-pointer
    /// style against the existing slice. The count tree is rebuilt from
    /// the merged arrays. Indices into this structure obtained before
    /// the call are invalidated.
    pub fn insert(&mut self, volumes: &[Aabb], data: &[D])
    where
        D: Clone,
    {
        assert_eq!(volumes.len(), data.len());
        if volumes.is_empty() {
            return;
        }
        let grown = self.bbox.enclosing(volumes);
        if grown != self.bbox {
            self.bbox = grown;
            self.rekey();
        }

        let mut staged: Vec<(NodeKey, usize)> = volumes
            .iter()
            .enumerate()
            .map(|(i, v)| (anchor_key(&self.bbox, v), i))
            .collect();
        // Key order is level-major (the sentinel bit dominates), so one
        // sort both partitions the batch into levels and sorts each
        // level slice.
        staged.sort_unstable();

        let mut batch_begin = [0usize; NUM_LEVELS + 1];
        for l in 0..NUM_LEVELS {
            let next_sentinel = 1u32 << (3 * (l as u32 + 1));
            batch_begin[l + 1] = staged.partition_point(|&(k, _)| k.raw() < next_sentinel);
        }
        debug_assert_eq!(batch_begin[NUM_LEVELS], staged.len());

        let total = self.hashes.len() + staged.len();
        let mut hashes: Vec<NodeKey> = Vec::with_capacity(total);
        let mut merged_volumes: Vec<Aabb> = Vec::with_capacity(total);
        let mut merged_data: Vec<D> = Vec::with_capacity(total);
        let mut level_begin = [0usize; NUM_LEVELS + 1];

        for l in 0..NUM_LEVELS {
            level_begin[l] = hashes.len();
            let mut i = self.level_begin[l];
            let mut j = batch_begin[l];
            while i < self.level_begin[l + 1] && j < batch_begin[l + 1] {
                if self.hashes[i] < staged[j].0 {
                    hashes.push(self.hashes[i]);
                    merged_volumes.push(self.volumes[i]);
                    merged_data.push(self.data[i].clone());
                    i += 1;
                } else {
                    let (k, m) = staged[j];
                    hashes.push(k);
                    merged_volumes.push(volumes[m]);
                    merged_data.push(data[m].clone());
                    j += 1;
                }
            }
            while i < self.level_begin[l + 1] {
                hashes.push(self.hashes[i]);
                merged_volumes.push(self.volumes[i]);
                merged_data.push(self.data[i].clone());
                i += 1;
            }
            while j < batch_begin[l + 1] {
                let (k, m) = staged[j];
                hashes.push(k);
                merged_volumes.push(volumes[m]);
                merged_data.push(data[m].clone());
                j += 1;
            }
            debug_assert!(hashes[level_begin[l]..].is_sorted());
        }
        level_begin[NUM_LEVELS] = hashes.len();
        debug_assert_eq!(level_begin[NUM_LEVELS], total);

        self.hashes = hashes;
        self.volumes = merged_volumes;
        self.data = merged_data;
        self.level_begin = level_begin;
        self.rebuild_counts();
        debug!(
            "bvh merge: {} volumes total, {} count nodes",
            self.hashes.len(),
            self.arena.len()
        );
    }

    /// Recompute every stored volume's key against the current bounding
    /// box and restore the level-partitioned sorted order. Runs when the
    /// box grows; the count tree is rebuilt by the caller.
    fn rekey(&mut self)
    where
        D: Clone,
    {
        if self.hashes.is_empty() {
            return;
        }
        let mut staged: Vec<(NodeKey, usize)> = self
            .volumes
            .iter()
            .enumerate()
            .map(|(i, v)| (anchor_key(&self.bbox, v), i))
            .collect();
        staged.sort_unstable();

        let mut hashes: Vec<NodeKey> = Vec::with_capacity(staged.len());
        let mut volumes: Vec<Aabb> = Vec::with_capacity(staged.len());
        let mut data: Vec<D> = Vec::with_capacity(staged.len());
        for &(k, i) in &staged {
            hashes.push(k);
            volumes.push(self.volumes[i]);
            data.push(self.data[i].clone());
        }
        let mut level_begin = [0usize; NUM_LEVELS + 1];
        for l in 0..NUM_LEVELS {
            let next_sentinel = 1u32 << (3 * (l as u32 + 1));
            level_begin[l + 1] = hashes.partition_point(|k| k.raw() < next_sentinel);
        }
        debug_assert_eq!(level_begin[NUM_LEVELS], hashes.len());

        debug!("bvh rekey: {} volumes under grown bbox", hashes.len());
        self.hashes = hashes;
        self.volumes = volumes;
        self.data = data;
        self.level_begin = level_begin;
    }

    /// Rebuild the subtree-count arena by walking every stored key's
    /// root-to-anchor path. The tree is fully derived state.
    fn rebuild_counts(&mut self) {
        self.arena.clear();
        if self.hashes.is_empty() {
            return;
        }
        self.arena.push(CountNode::new());
        for idx in 0..self.hashes.len() {
            let key = self.hashes[idx];
            let level = key.level();
            let mut node = 0;
            self.arena[node].size += 1;
            for depth in 1..=level {
                let octant = ((key.raw() >> (3 * (level - depth))) & 0x7) as usize;
                let next = match self.arena[node].children[octant] {
                    Some(n) => n,
                    None => {
                        let n = self.arena.len();
                        self.arena.push(CountNode::new());
                        self.arena[node].children[octant] = Some(n);
                        n
                    }
                };
                self.arena[next].size += 1;
                node = next;
            }
        }
        debug_assert_eq!(self.arena[0].size, self.hashes.len());
    }

    /// Visit the indices of all stored volumes intersecting `query`.
    /// Bounds are inclusive: touching volumes are reported. The visitor
    /// may return [`Visit::Stop`] to end the traversal early.
    pub fn visit_intersecting_volumes<F>(&self, query: &Aabb, mut visitor: F) -> Visit
    where
        F: FnMut(usize) -> Visit,
    {
        if self.arena.is_empty() {
            return Visit::Continue;
        }
        self.visit_node(NodeKey::ROOT, 0, &self.bbox, query, &mut visitor)
    }

    fn visit_node<F>(
        &self,
        key: NodeKey,
        node: usize,
        cell: &Aabb,
        query: &Aabb,
        visitor: &mut F,
    ) -> Visit
    where
        F: FnMut(usize) -> Visit,
    {
        // Volumes anchored at this node are the run of keys equal to it
        // within its level slice.
        let level = key.level() as usize;
        let slice = &self.hashes[self.level_begin[level]..self.level_begin[level + 1]];
        let lo = slice.partition_point(|&h| h < key);
        let hi = slice.partition_point(|&h| h <= key);
        for s in lo..hi {
            let i = self.level_begin[level] + s;
            if self.volumes[i].intersects(query) && visitor(i) == Visit::Stop {
                return Visit::Stop;
            }
        }
        if level + 1 == NUM_LEVELS {
            return Visit::Continue;
        }
        let children = key.children();
        let child_cells = cell.child_boxes();
        for c in 0..8 {
            if let Some(child_node) = self.arena[node].children[c]
                && child_cells[c].intersects(query)
                && self.visit_node(children[c], child_node, &child_cells[c], query, visitor)
                    == Visit::Stop
            {
                return Visit::Stop;
            }
        }
        Visit::Continue
    }
}

/// Key a volume by its smallest containing node. Boxes smaller than a
/// leaf cell anchor at the deepest stored level.
fn anchor_key(bbox: &Aabb, v: &Aabb) -> NodeKey {
    let mut key = NodeKey::smallest_containing(bbox, v);
    while key.level() as usize >= NUM_LEVELS {
        key = key.parent();
    }
    key
}
