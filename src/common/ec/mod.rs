use std::ops::Deref;

use log::trace;

use super::metadata::{ECLevel, Version};

mod galois;

pub use galois::{generator_poly, G};

// Error correction
//------------------------------------------------------------------------------

/// Splits data codewords into blocks, computes the ecc of every block and returns
/// the interleaved data codewords followed by the interleaved ecc codewords.
pub fn ecc_and_interleave(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let (data_blocks, ecc_blocks) = ecc(data, version, ec_level);
    trace!(
        "Split {} data codewords into {} blocks with {} ecc each",
        data.len(),
        data_blocks.len(),
        version.ecc_per_block(ec_level)
    );

    let mut payload = interleave(&data_blocks);
    payload.extend(interleave(&ecc_blocks));
    debug_assert!(
        payload.len() == version.total_codewords(),
        "Payload len doesn't match total codewords: Payload {}, Total {}",
        payload.len(),
        version.total_codewords()
    );
    payload
}

// ECC: Error Correction Codeword generator
pub fn ecc(data: &[u8], version: Version, ec_level: ECLevel) -> (Vec<&[u8]>, Vec<Vec<u8>>) {
    let data_blocks = blockify(data, version, ec_level);

    let ecc_size_per_block = version.ecc_per_block(ec_level);
    let gen_poly = generator_poly(ecc_size_per_block);
    let ecc_blocks = data_blocks.iter().map(|b| ecc_per_block(b, &gen_poly)).collect::<Vec<_>>();

    (data_blocks, ecc_blocks)
}

pub fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
    let (block1_size, block1_count, block2_size, block2_count) =
        version.data_codewords_per_block(ec_level);

    let total_blocks = block1_count + block2_count;
    let total_block1_size = block1_size * block1_count;
    let total_size = total_block1_size + block2_size * block2_count;

    debug_assert!(
        total_size == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        total_size
    );

    let mut data_blocks = Vec::with_capacity(total_blocks);
    data_blocks.extend(data[..total_block1_size].chunks(block1_size));
    if block2_size > 0 {
        data_blocks.extend(data[total_block1_size..].chunks(block2_size));
    }
    data_blocks
}

// Performs polynomial long division with data polynomial(num)
// and generator polynomial(den) to compute remainder polynomial,
// the coefficients of which are the ecc
fn ecc_per_block(block: &[u8], gen_poly: &[G]) -> Vec<u8> {
    let len = block.len();
    let ecc_count = gen_poly.len() - 1;

    let mut res = block.iter().map(|&b| G(b)).collect::<Vec<_>>();
    res.resize(len + ecc_count, G(0));

    for i in 0..len {
        let lead_coeff = res[i];
        if lead_coeff == G(0) {
            continue;
        }

        for (u, &v) in res[i + 1..].iter_mut().zip(gen_poly[1..].iter()) {
            *u = *u + lead_coeff * v;
        }
    }

    res[len..].iter().map(|g| g.0).collect()
}

// Takes the i-th element of every block in turn; shorter blocks drop out once exhausted
pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}
