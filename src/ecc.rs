//! Block splitting, per-block Reed-Solomon error correction, and the final
//! interleaved codeword order (spec §4.E).

use crate::capacity::CapacityRecord;
use crate::gf;

/// Splits `data` into blocks per the capacity record's group layout, computes
/// each block's error-correction codewords, and returns the final
/// interleaved codeword sequence: data columns first (short blocks skipped
/// once exhausted), then EC columns.
pub fn interleave(data: &[u8], record: &CapacityRecord) -> Vec<u8> {
    let blocks = blockify(data, record);
    let ec_blocks: Vec<Vec<u8>> = blocks
        .iter()
        .map(|b| error_correction(b, record.ec_per_block as usize))
        .collect();

    let max_data_len = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let mut out = Vec::with_capacity(record.total_codewords());

    for i in 0..max_data_len {
        for block in &blocks {
            if i < block.len() {
                out.push(block[i]);
            }
        }
    }

    for i in 0..record.ec_per_block as usize {
        for ec in &ec_blocks {
            out.push(ec[i]);
        }
    }

    out
}

fn blockify<'a>(data: &'a [u8], record: &CapacityRecord) -> Vec<&'a [u8]> {
    let (g1, g2) = record.groups;
    let mut blocks = Vec::with_capacity(record.total_blocks() as usize);

    let group1_total = g1.block_count as usize * g1.data_per_block as usize;
    blocks.extend(data[..group1_total].chunks(g1.data_per_block as usize));

    if let Some(g2) = g2 {
        blocks.extend(data[group1_total..].chunks(g2.data_per_block as usize));
    }

    blocks
}

fn error_correction(block: &[u8], ec_count: usize) -> Vec<u8> {
    let generator = gf::tables().rs_generator(ec_count);
    let mut padded = block.to_vec();
    padded.resize(block.len() + ec_count, 0);
    gf::tables().poly_divmod(&padded, &generator)
}
