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

use crate::mesh::vertex_set::VertexId;
use crate::spatial::sorted_buffer::{SortKey, SortedBuffer, SortedBufferConfig};

/// Identity of an undirected edge: `low_id << 32 | high_id` of its
/// canonicalized endpoints. Content-derived, so equal edges always map
/// to equal ids regardless of insertion history.
pub type EdgeId = u64;

/// An undirected edge between two vertices, stored canonically with
/// `a <= b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    a: VertexId,
    b: VertexId,
}

impl Edge {
    /// Canonicalize the endpoint order.
    pub fn new(v1: VertexId, v2: VertexId) -> Self {
        if v1 <= v2 {
            Edge { a: v1, b: v2 }
        } else {
            Edge { a: v2, b: v1 }
        }
    }

    /// The lower endpoint id.
    pub fn a(&self) -> VertexId {
        self.a
    }

    /// The higher endpoint id.
    pub fn b(&self) -> VertexId {
        self.b
    }

    pub fn id(&self) -> EdgeId {
        (self.a as EdgeId) << 32 | self.b as EdgeId
    }
}

impl SortKey for Edge {
    type Key = EdgeId;

    fn sort_key(&self) -> EdgeId {
        self.id()
    }
}

/// Insert-or-find for undirected vertex-id pairs.
///
/// Edges live in a [`SortedBuffer`]: a bounded unsorted short list merged
/// into a sorted long list whenever it fills up. Endpoint order is
/// canonicalized on insertion, so `(a, b)` and `(b, a)` are the same
/// edge.
#[derive(Clone, Debug, Default)]
pub struct EdgeSet {
    edges: SortedBuffer<Edge>,
}

impl EdgeSet {
    pub fn new() -> Self {
        EdgeSet {
            edges: SortedBuffer::new(),
        }
    }

    pub fn with_config(config: SortedBufferConfig) -> Self {
        EdgeSet {
            edges: SortedBuffer::with_config(config),
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Insert the undirected edge `(v1, v2)` and return its id. Inserting
    /// an edge that is already present returns the existing id without
    /// storing a second copy.
    pub fn insert(&mut self, v1: VertexId, v2: VertexId) -> EdgeId {
        let edge = Edge::new(v1, v2);
        let id = edge.id();
        if self.edges.get(id).is_none() {
            self.edges.push(edge);
        }
        id
    }

    /// Look up an edge by id; `None` if it was never inserted.
    pub fn get_edge(&self, id: EdgeId) -> Option<Edge> {
        self.edges.get(id).copied()
    }
}
