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

use thiserror::Error;

use crate::geometry::point::Point;

/// Errors reported at the crate's construction boundaries.
///
/// Absence of an item is never an error; lookups return `Option`. These
/// variants cover inputs that are programming errors on the caller's side.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A bounding box whose extent is not strictly positive and finite on
    /// every axis. Such a box cannot serve as a hashing domain.
    #[error("invalid bounding box: min {min:?} must lie strictly below max {max:?} on every axis")]
    InvalidBoundingBox { min: Point, max: Point },

    /// A raw octree node key that fails the sentinel-bit validity test.
    #[error("invalid node key {0:#x}")]
    InvalidNodeKey(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
