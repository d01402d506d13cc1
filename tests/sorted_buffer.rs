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

use hashgeo::spatial::sorted_buffer::{SortKey, SortedBuffer, SortedBufferConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    key: u64,
    tag: u32,
}

impl SortKey for Entry {
    type Key = u64;

    fn sort_key(&self) -> u64 {
        self.key
    }
}

fn entry(key: u64, tag: u32) -> Entry {
    Entry { key, tag }
}

#[test]
fn entries_are_found_in_both_segments() {
    let mut buf = SortedBuffer::new();
    buf.push(entry(5, 0));
    buf.push(entry(3, 1));
    // Both still pending.
    assert_eq!(Some(&entry(5, 0)), buf.get(5));
    assert_eq!(Some(&entry(3, 1)), buf.get(3));
    buf.flush();
    assert_eq!(Some(&entry(5, 0)), buf.get(5));
    assert_eq!(Some(&entry(3, 1)), buf.get(3));
    assert_eq!(None, buf.get(4));
}

#[test]
fn flush_sorts_and_merges() {
    let config = SortedBufferConfig {
        short_capacity: 4,
        initial_capacity: 4,
        growth_factor: 1.7,
    };
    let mut buf = SortedBuffer::with_config(config);
    for key in [9, 1, 7, 3] {
        buf.push(entry(key, 0));
    }
    buf.flush();
    assert!(buf.short_list().is_empty());
    let keys: Vec<u64> = buf.long_list().iter().map(|e| e.key).collect();
    assert_eq!(vec![1, 3, 7, 9], keys);

    for key in [2, 8] {
        buf.push(entry(key, 0));
    }
    buf.flush();
    let keys: Vec<u64> = buf.long_list().iter().map(|e| e.key).collect();
    assert_eq!(vec![1, 2, 3, 7, 8, 9], keys);
}

#[test]
fn pushing_past_capacity_flushes_automatically() {
    let config = SortedBufferConfig {
        short_capacity: 3,
        initial_capacity: 3,
        growth_factor: 1.7,
    };
    let mut buf = SortedBuffer::with_config(config);
    for key in 0..7u64 {
        buf.push(entry(key, 0));
    }
    assert_eq!(7, buf.len());
    assert!(buf.long_list().len() >= 6);
    assert!(buf.short_list().len() <= 1);
}

#[test]
fn duplicate_keys_collapse_on_flush_keeping_the_long_entry() {
    let mut buf = SortedBuffer::new();
    buf.push(entry(5, 1));
    buf.flush();
    buf.push(entry(5, 2));
    buf.push(entry(6, 3));
    buf.flush();
    assert_eq!(2, buf.len());
    // The already-sorted entry wins the tie.
    assert_eq!(Some(&entry(5, 1)), buf.get(5));
    assert_eq!(Some(&entry(6, 3)), buf.get(6));
}

#[test]
fn random_workload_stays_sorted_and_complete() {
    let mut rng = StdRng::seed_from_u64(41);
    let mut buf = SortedBuffer::new();
    let mut keys = Vec::new();
    for tag in 0..500u32 {
        // Distinct keys; tags track insertion order.
        let key = (tag as u64) * 7919 % 100_000;
        keys.push(key);
        buf.push(entry(key, tag));
        if rng.random_range(0..10) == 0 {
            buf.flush();
        }
    }
    buf.flush();
    assert!(buf.long_list().is_sorted_by_key(|e| e.key));
    for &key in &keys {
        assert_eq!(Some(key), buf.get(key).map(|e| e.key));
    }
}
