// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape checks for sets of lattice coordinates.
//!
//! The covering search relies on two properties of the overlap set: every row
//! is one interval, and the set is connected under king moves. These helpers
//! check both on an arbitrary list of coordinates, which makes them usable as
//! oracles against a brute‑force enumeration.

use hashbrown::{HashMap, HashSet};

use crate::coord::LatticeCoord;

/// Returns `true` if every row and every column of `coords` is a contiguous
/// run of integers. Duplicates are ignored; the empty set is convex.
#[must_use]
pub fn is_row_column_convex(coords: &[LatticeCoord]) -> bool {
    let unique: HashSet<LatticeCoord> = coords.iter().copied().collect();
    let mut rows: HashMap<i64, (i64, i64, u64)> = HashMap::new();
    let mut cols: HashMap<i64, (i64, i64, u64)> = HashMap::new();
    for c in &unique {
        extend_run(&mut rows, c.b, c.a);
        extend_run(&mut cols, c.a, c.b);
    }
    rows.values()
        .chain(cols.values())
        .all(|&(min, max, count)| max.abs_diff(min) + 1 == count)
}

fn extend_run(runs: &mut HashMap<i64, (i64, i64, u64)>, line: i64, pos: i64) {
    runs.entry(line)
        .and_modify(|(min, max, count)| {
            *min = (*min).min(pos);
            *max = (*max).max(pos);
            *count += 1;
        })
        .or_insert((pos, pos, 1));
}

/// Returns `true` if every coordinate can reach every other through a chain
/// of king‑move neighbours inside the set. The empty set is connected.
#[must_use]
pub fn is_eight_connected(coords: &[LatticeCoord]) -> bool {
    let unique: HashSet<LatticeCoord> = coords.iter().copied().collect();
    let Some(&start) = unique.iter().next() else {
        return true;
    };
    let mut seen = HashSet::with_capacity(unique.len());
    seen.insert(start);
    let mut stack = alloc::vec![start];
    while let Some(c) = stack.pop() {
        for n in c.neighbors() {
            if unique.contains(&n) && seen.insert(n) {
                stack.push(n);
            }
        }
    }
    seen.len() == unique.len()
}
