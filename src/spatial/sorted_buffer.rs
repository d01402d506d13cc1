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

/// Extraction of the ordering key a [`SortedBuffer`] sorts by.
pub trait SortKey {
    type Key: Ord + Copy;
    fn sort_key(&self) -> Self::Key;
}

/// Tuning knobs for [`SortedBuffer`]. The defaults mirror the historical
/// constants of this buffering scheme; none of them is principled, which
/// is why they are configuration rather than hard-coded.
#[derive(Clone, Copy, Debug)]
pub struct SortedBufferConfig {
    /// Maximum number of unsorted entries held before a flush.
    pub short_capacity: usize,
    /// Capacity reserved for the sorted segment on its first flush.
    pub initial_capacity: usize,
    /// Capacity growth factor applied when the sorted segment fills up.
    pub growth_factor: f64,
}

impl Default for SortedBufferConfig {
    fn default() -> Self {
        SortedBufferConfig {
            short_capacity: 32,
            initial_capacity: 16,
            growth_factor: 1.7,
        }
    }
}

/// A small unsorted "short list" in front of a sorted "long list".
///
/// Insertions append to the short list in O(1); when it fills up it is
/// insertion-sorted and two-pointer merged into the long list, which is
/// immutable between flushes. Lookups binary-search the long list and
/// fall back to a linear scan of the short list. The same buffering
/// discipline backs the hashed octree, the hashed BVH and the vertex set;
/// this type is its reusable standalone form.
#[derive(Clone, Debug)]
pub struct SortedBuffer<T: SortKey> {
    short: Vec<T>,
    long: Vec<T>,
    config: SortedBufferConfig,
}

impl<T: SortKey> Default for SortedBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SortKey> SortedBuffer<T> {
    pub fn new() -> Self {
        Self::with_config(SortedBufferConfig::default())
    }

    pub fn with_config(config: SortedBufferConfig) -> Self {
        assert!(config.short_capacity > 0);
        assert!(config.growth_factor > 1.0);
        SortedBuffer {
            short: Vec::with_capacity(config.short_capacity),
            long: Vec::new(),
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.short.len() + self.long.len()
    }

    pub fn is_empty(&self) -> bool {
        self.short.is_empty() && self.long.is_empty()
    }

    /// Look up an entry by key, in either segment.
    pub fn get(&self, key: T::Key) -> Option<&T> {
        let i = self.long.partition_point(|e| e.sort_key() < key);
        if let Some(e) = self.long.get(i)
            && e.sort_key() == key
        {
            return Some(e);
        }
        self.short.iter().find(|e| e.sort_key() == key)
    }

    /// Append an entry, flushing the short list first if it is full.
    /// Duplicate keys are tolerated; the flush keeps one entry per key.
    pub fn push(&mut self, item: T) {
        if self.short.len() == self.config.short_capacity {
            self.flush();
        }
        self.short.push(item);
    }

    /// Merge the short list into the long list, leaving the short list
    /// empty. A no-op when there is nothing pending.
    pub fn flush(&mut self) {
        if self.short.is_empty() {
            return;
        }
        // The short list is small by construction; insertion sort it.
        insertion_sort(&mut self.short);

        let needed = self.long.len() + self.short.len();
        let grown = (self.long.capacity() as f64 * self.config.growth_factor).ceil() as usize;
        let capacity = needed.max(grown).max(self.config.initial_capacity);
        let mut merged: Vec<T> = Vec::with_capacity(capacity);

        let long = std::mem::take(&mut self.long);
        let short = std::mem::take(&mut self.short);
        let mut a = long.into_iter().peekable();
        let mut b = short.into_iter().peekable();
        loop {
            let take_long = match (a.peek(), b.peek()) {
                (Some(x), Some(y)) => x.sort_key() <= y.sort_key(),
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            let item = if take_long {
                a.next().unwrap()
            } else {
                b.next().unwrap()
            };
            match merged.last() {
                Some(last) if last.sort_key() == item.sort_key() => {}
                _ => merged.push(item),
            }
        }
        debug_assert!(merged.is_sorted_by_key(|e| e.sort_key()));

        debug!("sorted buffer flush: {} entries", merged.len());
        self.long = merged;
        self.short = Vec::with_capacity(self.config.short_capacity);
    }

    /// The sorted segment. Entries pushed since the last flush are not
    /// in it.
    pub fn long_list(&self) -> &[T] {
        &self.long
    }

    /// The pending unsorted segment.
    pub fn short_list(&self) -> &[T] {
        &self.short
    }
}

fn insertion_sort<T: SortKey>(items: &mut [T]) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && items[j - 1].sort_key() > items[j].sort_key() {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
