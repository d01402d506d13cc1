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

use hashgeo::Error;
use hashgeo::geometry::{Aabb, Point};
use hashgeo::spatial::{HashedBvh, Visit};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn cube_at(x: f64, y: f64, z: f64, half: f64) -> Aabb {
    Aabb::new(
        Point::new(x - half, y - half, z - half),
        Point::new(x + half, y + half, z + half),
    )
}

/// Collect the payload tags of all volumes intersecting `q`. Storage
/// indices are merge-order dependent; tags are not.
fn query(bvh: &HashedBvh<usize>, q: &Aabb) -> Vec<usize> {
    let mut hits = Vec::new();
    bvh.visit_intersecting_volumes(q, |i| {
        hits.push(*bvh.data(i));
        Visit::Continue
    });
    hits.sort_unstable();
    hits
}

#[test]
fn rejects_an_invalid_bounding_box() {
    let degenerate = Aabb::new(Point::new(0.0, 0.0, 0.0), Point::new(0.0, 1.0, 1.0));
    let err = HashedBvh::<()>::new(degenerate).unwrap_err();
    assert!(matches!(err, Error::InvalidBoundingBox { .. }));
}

#[test]
fn an_empty_bvh_reports_nothing() {
    let bvh = HashedBvh::<usize>::new(Aabb::unit_cube()).unwrap();
    assert!(bvh.is_empty());
    assert!(query(&bvh, &Aabb::unit_cube()).is_empty());
}

#[test]
fn inserted_volumes_are_found_by_overlapping_queries() {
    let mut bvh = HashedBvh::new(Aabb::unit_cube()).unwrap();
    let volumes = [
        cube_at(0.2, 0.2, 0.2, 0.05),
        cube_at(0.8, 0.8, 0.8, 0.05),
        cube_at(0.5, 0.5, 0.5, 0.4),
    ];
    bvh.insert(&volumes, &[0, 1, 2]);
    assert_eq!(3, bvh.len());

    assert_eq!(vec![0, 2], query(&bvh, &cube_at(0.2, 0.2, 0.2, 0.01)));
    assert_eq!(vec![1, 2], query(&bvh, &cube_at(0.8, 0.8, 0.8, 0.01)));
    assert_eq!(vec![2], query(&bvh, &cube_at(0.5, 0.5, 0.2, 0.01)));
}

#[test]
fn disjoint_queries_find_nothing() {
    let mut bvh = HashedBvh::new(Aabb::unit_cube()).unwrap();
    bvh.insert(&[cube_at(0.2, 0.2, 0.2, 0.05)], &[0]);
    assert!(query(&bvh, &cube_at(0.8, 0.8, 0.8, 0.05)).is_empty());
}

#[test]
fn touching_volumes_count_as_intersecting() {
    let mut bvh = HashedBvh::new(Aabb::unit_cube()).unwrap();
    let v = Aabb::new(Point::new(0.1, 0.1, 0.1), Point::new(0.3, 0.3, 0.3));
    bvh.insert(&[v], &[0]);
    // Shares exactly one face plane with the stored volume.
    let touching = Aabb::new(Point::new(0.3, 0.1, 0.1), Point::new(0.4, 0.3, 0.3));
    assert_eq!(vec![0], query(&bvh, &touching));
}

#[test]
fn all_volumes_are_found_after_multiple_batches() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut bvh = HashedBvh::new(Aabb::unit_cube()).unwrap();
    let mut inserted = 0usize;
    for _ in 0..5 {
        let batch: Vec<Aabb> = (0..40)
            .map(|_| {
                cube_at(
                    rng.random_range(0.1..0.9),
                    rng.random_range(0.1..0.9),
                    rng.random_range(0.1..0.9),
                    rng.random_range(0.001..0.05),
                )
            })
            .collect();
        let data: Vec<usize> = (inserted..inserted + batch.len()).collect();
        bvh.insert(&batch, &data);
        inserted += batch.len();
    }
    assert_eq!(inserted, bvh.len());

    // Querying the whole domain must report every volume exactly once.
    let mut tags: Vec<usize> = Vec::new();
    bvh.visit_intersecting_volumes(&Aabb::unit_cube(), |i| {
        tags.push(*bvh.data(i));
        Visit::Continue
    });
    tags.sort_unstable();
    let expected: Vec<usize> = (0..inserted).collect();
    assert_eq!(expected, tags);
}

#[test]
fn random_queries_agree_with_brute_force() {
    let mut rng = StdRng::seed_from_u64(22);
    let mut bvh = HashedBvh::new(Aabb::unit_cube()).unwrap();
    let volumes: Vec<Aabb> = (0..120)
        .map(|_| {
            cube_at(
                rng.random_range(0.1..0.9),
                rng.random_range(0.1..0.9),
                rng.random_range(0.1..0.9),
                rng.random_range(0.001..0.1),
            )
        })
        .collect();
    let data: Vec<usize> = (0..volumes.len()).collect();
    bvh.insert(&volumes, &data);

    for _ in 0..20 {
        let q = cube_at(
            rng.random_range(0.0..1.0),
            rng.random_range(0.0..1.0),
            rng.random_range(0.0..1.0),
            rng.random_range(0.01..0.2),
        );
        let hits = query(&bvh, &q);
        let brute: Vec<usize> = (0..volumes.len())
            .filter(|&i| volumes[i].intersects(&q))
            .collect();
        assert_eq!(brute, hits);
    }
}

#[test]
fn the_bounding_box_grows_to_enclose_new_volumes() {
    let mut bvh = HashedBvh::new(Aabb::unit_cube()).unwrap();
    let outside = cube_at(2.0, 2.0, 2.0, 0.1);
    bvh.insert(&[outside], &[0]);
    assert!(bvh.bbox().max.x >= 2.1);
    assert_eq!(vec![0], query(&bvh, &cube_at(2.0, 2.0, 2.0, 0.05)));
}

#[test]
fn earlier_volumes_stay_findable_after_the_bounding_box_grows() {
    let mut bvh = HashedBvh::new(Aabb::unit_cube()).unwrap();
    bvh.insert(&[cube_at(0.2, 0.2, 0.2, 0.05)], &[0]);
    // Grow the domain far beyond the first volume's old anchor cell.
    bvh.insert(&[cube_at(100.0, 100.0, 100.0, 0.1)], &[1]);
    assert_eq!(vec![0], query(&bvh, &cube_at(0.2, 0.2, 0.2, 0.005)));
    assert_eq!(vec![1], query(&bvh, &cube_at(100.0, 100.0, 100.0, 0.05)));
    let whole = *bvh.bbox();
    assert_eq!(vec![0, 1], query(&bvh, &whole));
}

#[test]
fn visitor_stop_ends_the_traversal() {
    let mut bvh = HashedBvh::new(Aabb::unit_cube()).unwrap();
    let volumes: Vec<Aabb> = (0..10).map(|i| cube_at(0.5, 0.5, 0.5, 0.01 * (i + 1) as f64)).collect();
    let data: Vec<usize> = (0..10).collect();
    bvh.insert(&volumes, &data);

    let mut visits = 0;
    let verdict = bvh.visit_intersecting_volumes(&cube_at(0.5, 0.5, 0.5, 0.005), |_| {
        visits += 1;
        Visit::Stop
    });
    assert_eq!(Visit::Stop, verdict);
    assert_eq!(1, visits);
}
