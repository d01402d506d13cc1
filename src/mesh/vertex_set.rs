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

use ahash::AHashMap;
use log::debug;

use crate::error::Result;
use crate::geometry::{Aabb, Point};
use crate::mesh::vertex_array::VertexArray;
use crate::spatial::Visit;
use crate::spatial::hashed_octree::HashedOctree;

/// Stable integer identity of a distinct point. Ids are assigned in
/// insertion order and never reused.
pub type VertexId = u32;

/// Where a live vertex currently resides. Indices here are internal and
/// rewritten wholesale on [`VertexSet::optimize`]; only ids are stable.
#[derive(Clone, Copy, Debug)]
enum VertexLocation {
    Committed(usize),
    Pending(usize),
}

#[derive(Clone, Copy, Debug)]
pub struct VertexSetConfig {
    /// Pending vertices held before an automatic [`VertexSet::optimize`].
    pub short_list_capacity: usize,
}

impl Default for VertexSetConfig {
    fn default() -> Self {
        VertexSetConfig {
            short_list_capacity: 64,
        }
    }
}

/// Insert-or-find over points: every distinct point (to within a sup-norm
/// `epsilon`) gets a stable [`VertexId`]; re-inserting a point within
/// `epsilon` of an existing one returns the existing id.
///
/// New points accumulate in an unsorted short list and are flushed into
/// the committed octree by [`Self::optimize`], amortizing the merge cost
/// over many insertions. With chains of pairwise-near points (a near b,
/// b near c, a not near c) the id a point maps to can depend on insertion
/// order.
#[derive(Clone, Debug)]
pub struct VertexSet {
    octree: HashedOctree<VertexId>,
    short_list: VertexArray<VertexId>,
    id_map: AHashMap<VertexId, VertexLocation>,
    next_id: VertexId,
    epsilon: f64,
    config: VertexSetConfig,
}

impl VertexSet {
    pub fn new(bbox: Aabb, epsilon: f64) -> Result<Self> {
        Self::with_config(bbox, epsilon, VertexSetConfig::default())
    }

    pub fn with_config(bbox: Aabb, epsilon: f64, config: VertexSetConfig) -> Result<Self> {
        debug_assert!(epsilon >= 0.0);
        assert!(config.short_list_capacity > 0);
        Ok(VertexSet {
            octree: HashedOctree::new(bbox)?,
            short_list: VertexArray::new(),
            id_map: AHashMap::new(),
            next_id: 0,
            epsilon,
            config,
        })
    }

    /// Number of distinct vertices in the set.
    pub fn len(&self) -> usize {
        self.id_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_map.is_empty()
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// The committed octree. Pending vertices are not in it until
    /// [`Self::optimize`] runs.
    pub fn octree(&self) -> &HashedOctree<VertexId> {
        &self.octree
    }

    /// Insert `p`, or find the vertex it duplicates.
    ///
    /// The committed octree is searched first, then the pending short
    /// list; only if neither holds a point within `epsilon` (per axis)
    /// of `p` is a fresh id assigned. Filling the short list past its
    /// capacity triggers an automatic [`Self::optimize`].
    pub fn insert(&mut self, p: Point) -> VertexId {
        let mut found: Option<VertexId> = None;
        self.octree.visit_near_points(&p, self.epsilon, |i| {
            found = Some(*self.octree.vertices().data(i));
            Visit::Stop
        });
        if let Some(id) = found {
            return id;
        }
        for i in 0..self.short_list.len() {
            if self.short_list.point(i).within_eps(&p, self.epsilon) {
                return *self.short_list.data(i);
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        self.id_map
            .insert(id, VertexLocation::Pending(self.short_list.len()));
        self.short_list.push(p, id);
        if self.short_list.len() >= self.config.short_list_capacity {
            self.optimize();
        }
        id
    }

    /// Coordinates of the vertex with the given id, if it exists.
    pub fn get_vertex(&self, id: VertexId) -> Option<Point> {
        match self.id_map.get(&id)? {
            VertexLocation::Committed(i) => Some(self.octree.point(*i)),
            VertexLocation::Pending(i) => Some(self.short_list.point(*i)),
        }
    }

    /// Flush the short list into the committed octree and rebuild the
    /// id map from the merged arrays.
    pub fn optimize(&mut self) {
        if self.short_list.is_empty() {
            return;
        }
        let pending = self.short_list.len();
        self.octree.insert(&self.short_list, 0..pending);
        self.short_list.clear();
        self.id_map.clear();
        for i in 0..self.octree.len() {
            self.id_map
                .insert(*self.octree.vertices().data(i), VertexLocation::Committed(i));
        }
        debug!(
            "vertex set optimize: committed {} pending vertices, {} total",
            pending,
            self.octree.len()
        );
    }
}
