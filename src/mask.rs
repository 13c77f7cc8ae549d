//! Mask predicates and penalty scoring (spec §4.H). The reference
//! implementation's `pattern_mask.py` carries two known scoring bugs (N4
//! always zero, N1's final run never flushed); this module follows the
//! corrected definitions spec.md §4.H mandates instead.

use crate::matrix::Matrix;

pub const MASK_COUNT: u8 = 8;

/// Evaluates mask predicate `id` (0..=7) at `(row, col)`.
pub fn predicate(id: u8, row: usize, col: usize) -> bool {
    let (r, c) = (row as i64, col as i64);
    match id {
        0 => (r + c) % 2 == 0,
        1 => r % 2 == 0,
        2 => c % 3 == 0,
        3 => (r + c) % 3 == 0,
        4 => (r / 2 + c / 3) % 2 == 0,
        5 => (r * c) % 2 + (r * c) % 3 == 0,
        6 => ((r * c) % 2 + (r * c) % 3) % 2 == 0,
        7 => ((r + c) % 2 + (r * c) % 3) % 2 == 0,
        _ => unreachable!("mask id out of range: {id}"),
    }
}

/// Materializes the matrix with mask `id` applied: every non-function
/// module is XOR'd against the mask predicate. Function modules are never
/// toggled. Returns a flat row-major `Vec<bool>` scratch buffer - the base
/// matrix itself is never mutated during trial scoring.
pub fn apply(matrix: &Matrix, id: u8) -> Vec<bool> {
    let size = matrix.size;
    let mut out = Vec::with_capacity(size * size);
    for r in 0..size {
        for c in 0..size {
            let bit = matrix.get(r, c);
            let toggled = if matrix.is_function(r, c) {
                bit
            } else {
                bit ^ predicate(id, r, c)
            };
            out.push(toggled);
        }
    }
    out
}

/// Total N1+N2+N3+N4 penalty for a candidate row-major `size`×`size` matrix.
pub fn penalty(candidate: &[bool], size: usize) -> u32 {
    n1(candidate, size) + n2(candidate, size) + n3(candidate, size) + n4(candidate, size)
}

fn at(m: &[bool], size: usize, r: usize, c: usize) -> bool {
    m[r * size + c]
}

fn run_penalty(modules: impl Iterator<Item = bool>) -> u32 {
    let mut penalty = 0;
    let mut run_value = None;
    let mut run_len = 0u32;
    for bit in modules {
        match run_value {
            Some(v) if v == bit => run_len += 1,
            _ => {
                if run_len >= 5 {
                    penalty += 3 + (run_len - 5);
                }
                run_value = Some(bit);
                run_len = 1;
            }
        }
    }
    if run_len >= 5 {
        penalty += 3 + (run_len - 5);
    }
    penalty
}

fn n1(m: &[bool], size: usize) -> u32 {
    let mut total = 0;
    for r in 0..size {
        total += run_penalty((0..size).map(|c| at(m, size, r, c)));
    }
    for c in 0..size {
        total += run_penalty((0..size).map(|r| at(m, size, r, c)));
    }
    total
}

fn n2(m: &[bool], size: usize) -> u32 {
    let mut total = 0;
    for r in 0..size.saturating_sub(1) {
        for c in 0..size.saturating_sub(1) {
            let v = at(m, size, r, c);
            if at(m, size, r, c + 1) == v
                && at(m, size, r + 1, c) == v
                && at(m, size, r + 1, c + 1) == v
            {
                total += 3;
            }
        }
    }
    total
}

const FINDER_LIKE: [bool; 11] = [
    true, false, true, true, true, false, true, false, false, false, false,
];

fn count_finder_like(modules: &[bool]) -> u32 {
    let mut count = 0;
    if modules.len() < FINDER_LIKE.len() {
        return 0;
    }
    for window in modules.windows(FINDER_LIKE.len()) {
        if window == FINDER_LIKE {
            count += 1;
        } else if window.iter().rev().eq(FINDER_LIKE.iter()) {
            count += 1;
        }
    }
    count
}

fn n3(m: &[bool], size: usize) -> u32 {
    let mut total = 0;
    for r in 0..size {
        let row: Vec<bool> = (0..size).map(|c| at(m, size, r, c)).collect();
        total += count_finder_like(&row);
    }
    for c in 0..size {
        let col: Vec<bool> = (0..size).map(|r| at(m, size, r, c)).collect();
        total += count_finder_like(&col);
    }
    total * 40
}

fn n4(m: &[bool], size: usize) -> u32 {
    let dark = m.iter().filter(|&&b| b).count();
    let total = size * size;
    let percent = dark as f64 * 100.0 / total as f64;
    let deviation = ((percent - 50.0).abs() / 5.0).floor() as u32;
    deviation * 10
}

/// Picks the minimum-penalty mask id (ties resolved by lowest id), given a
/// closure that materializes the committed candidate (base XOR mask, with
/// the format word for `(ec_level, id)` already written) for scoring.
pub fn select_best(size: usize, mut score_candidate: impl FnMut(u8) -> Vec<bool>) -> (u8, Vec<bool>) {
    let mut best_id = 0u8;
    let mut best_penalty = u32::MAX;
    let mut best_matrix = Vec::new();

    for id in 0..MASK_COUNT {
        let candidate = score_candidate(id);
        let p = penalty(&candidate, size);
        if p < best_penalty {
            best_penalty = p;
            best_id = id;
            best_matrix = candidate;
        }
    }

    (best_id, best_matrix)
}
