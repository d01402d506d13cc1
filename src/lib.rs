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

//! Morton-hashed spatial indexing for 3D point and volume data.
//!
//! The crate keeps points and bounding volumes in sorted, implicitly
//! octree-addressed arrays: a [`spatial::hashed_octree::HashedOctree`] for
//! near-point queries and duplicate elimination, and a
//! [`spatial::hashed_bvh::HashedBvh`] for intersecting-volume queries. On
//! top of those sit [`mesh::vertex_set::VertexSet`] and
//! [`mesh::edge_set::EdgeSet`], which give merged vertices and
//! canonicalized undirected edges stable integer identities.

pub mod error;
pub mod geometry;
pub mod mesh;
pub mod spatial;

pub use error::{Error, Result};
