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

use crate::geometry::Point;

/// Structure-of-Arrays storage for vertex coordinates plus one opaque
/// payload per vertex.
///
/// Any index obtained from this container is invalidated by calls that may
/// grow or compact it (`push`, `resize`, `compact`); the indexing
/// structures built on top hand out stable ids instead of holding indices
/// across mutations.
#[derive(Clone, Debug, Default)]
pub struct VertexArray<D> {
    xs: Vec<f64>,
    ys: Vec<f64>,
    zs: Vec<f64>,
    data: Vec<D>,
}

impl<D> VertexArray<D> {
    pub fn new() -> Self {
        VertexArray {
            xs: Vec::new(),
            ys: Vec::new(),
            zs: Vec::new(),
            data: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        VertexArray {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
            zs: Vec::with_capacity(capacity),
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn push(&mut self, p: Point, d: D) {
        self.xs.push(p.x);
        self.ys.push(p.y);
        self.zs.push(p.z);
        self.data.push(d);
    }

    /// Resize to `size` elements, filling any new slots with defaults.
    pub fn resize(&mut self, size: usize)
    where
        D: Default + Clone,
    {
        self.xs.resize(size, 0.0);
        self.ys.resize(size, 0.0);
        self.zs.resize(size, 0.0);
        self.data.resize_with(size, D::default);
    }

    pub fn point(&self, i: usize) -> Point {
        Point::new(self.xs[i], self.ys[i], self.zs[i])
    }

    pub fn set(&mut self, i: usize, p: Point, d: D) {
        self.xs[i] = p.x;
        self.ys[i] = p.y;
        self.zs[i] = p.z;
        self.data[i] = d;
    }

    pub fn data(&self, i: usize) -> &D {
        &self.data[i]
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn zs(&self) -> &[f64] {
        &self.zs
    }

    pub fn payloads(&self) -> &[D] {
        &self.data
    }

    pub fn clear(&mut self) {
        self.xs.clear();
        self.ys.clear();
        self.zs.clear();
        self.data.clear();
    }

    pub fn swap(&mut self, other: &mut VertexArray<D>) {
        std::mem::swap(self, other);
    }

    /// Keep the elements whose index is flagged in `keep`, preserving
    /// their relative order. Discarded payloads are handed to
    /// `on_discard` before removal.
    pub fn compact(&mut self, keep: &[bool], mut on_discard: impl FnMut(D)) {
        assert_eq!(keep.len(), self.len());
        let mut w = 0;
        let data = std::mem::take(&mut self.data);
        for (r, d) in data.into_iter().enumerate() {
            if keep[r] {
                self.xs[w] = self.xs[r];
                self.ys[w] = self.ys[r];
                self.zs[w] = self.zs[r];
                self.data.push(d);
                w += 1;
            } else {
                on_discard(d);
            }
        }
        self.xs.truncate(w);
        self.ys.truncate(w);
        self.zs.truncate(w);
    }
}
