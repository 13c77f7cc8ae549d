//! Data steering cursor (spec §4.G): walks the matrix in upward-moving
//! 2-wide zigzag columns, skipping the vertical timing column, writing one
//! bit of the interleaved codeword stream into every non-function module it
//! crosses. Grounded on the reference implementation's `QRmatrix.add_data`,
//! modeled here as an explicit state machine rather than free-form index
//! arithmetic.

use crate::matrix::Matrix;

const TIMING_COLUMN: usize = 6;

/// Writes `bits` into `matrix`'s non-function modules following the
/// standard zigzag traversal, starting at the bottom-right corner. Stops as
/// soon as every bit has been placed; any modifiable modules not yet
/// reached are left at their pre-zeroed (light) default, which is exactly
/// how the standard's 0-7 trailing remainder bits are represented.
pub fn place_bits(matrix: &mut Matrix, bits: &[bool]) {
    let size = matrix.size;
    let mut row = size - 1;
    let mut col = size - 1;
    let mut vdir: isize = -1; // -1 = up, +1 = down
    let mut hflag = true;
    let mut index = 0;

    while index < bits.len() {
        if !matrix.is_function(row, col) {
            matrix.set(row, col, bits[index]);
            index += 1;
        }

        let next_row = if hflag { row as isize } else { row as isize + vdir };
        let next_col = if hflag { col as isize - 1 } else { col as isize + 1 };
        hflag = !hflag;

        if next_row < 0 || next_row >= size as isize {
            if col == 0 {
                // Column pair (0, 1) is the last one; there is nowhere left
                // to step to, so the traversal is complete.
                break;
            }
            col -= 1;
            vdir = -vdir;
            hflag = true;
        } else {
            row = next_row as usize;
            col = next_col as usize;
        }

        if col == TIMING_COLUMN {
            col -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modifiable_count(m: &Matrix) -> usize {
        (0..m.size * m.size)
            .filter(|&i| !m.is_function(i / m.size, i % m.size))
            .count()
    }

    #[test]
    fn every_bit_is_written_and_readable_back() {
        let mut m = Matrix::new(1);
        let capacity = modifiable_count(&m);
        let bits: Vec<bool> = (0..capacity).map(|i| i % 3 == 0).collect();
        place_bits(&mut m, &bits);

        let mut written = Vec::with_capacity(capacity);
        let size = m.size;
        let mut row = size - 1;
        let mut col = size - 1;
        let mut vdir: isize = -1;
        let mut hflag = true;
        while written.len() < capacity {
            if !m.is_function(row, col) {
                written.push(m.get(row, col));
            }
            let next_row = if hflag { row as isize } else { row as isize + vdir };
            let next_col = if hflag { col as isize - 1 } else { col as isize + 1 };
            hflag = !hflag;
            if next_row < 0 || next_row >= size as isize {
                if col == 0 {
                    break;
                }
                col -= 1;
                vdir = -vdir;
                hflag = true;
            } else {
                row = next_row as usize;
                col = next_col as usize;
            }
            if col == TIMING_COLUMN {
                col -= 1;
            }
        }
        assert_eq!(written, bits);
    }

    #[test]
    fn short_input_leaves_remainder_modules_light() {
        let mut m = Matrix::new(1);
        let capacity = modifiable_count(&m);
        let bits = vec![true; capacity - 4];
        place_bits(&mut m, &bits);

        let lit: usize = (0..m.size * m.size)
            .filter(|&i| {
                let (r, c) = (i / m.size, i % m.size);
                !m.is_function(r, c) && m.get(r, c)
            })
            .count();
        assert_eq!(lit, bits.len());
    }
}
