use std::{
    fmt::{Display, Formatter},
    ops::{Deref, Not},
};

use super::{codec::Mode, mask::MaskPattern};

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl From<bool> for Color {
    fn from(is_dark: bool) -> Self {
        if is_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

// Error correction level
//------------------------------------------------------------------------------

/// Error correction level, declared in increasing order of strength.
///
/// The declaration order is what tables and comparisons use. The two bits written
/// into the format information follow a different, fixed assignment, see
/// [`ECLevel::format_bits`].
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub const ALL: [ECLevel; 4] = [Self::L, Self::M, Self::Q, Self::H];

    /// Bits transmitted in the format information: L=01, M=00, Q=11, H=10.
    pub const fn format_bits(self) -> u32 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }

    pub fn from_format_bits(bits: u32) -> Self {
        debug_assert!(bits < 4, "Format bits for ec level must be 2 bits wide: {bits}");
        match bits & 0b11 {
            0b01 => Self::L,
            0b00 => Self::M,
            0b11 => Self::Q,
            _ => Self::H,
        }
    }

    const fn table_index(self) -> usize {
        self as usize
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub(crate) fn new(ver: usize) -> Self {
        debug_assert!((1..=40).contains(&ver), "Invalid version: {ver}");
        Self(ver)
    }

    pub(crate) fn all() -> impl DoubleEndedIterator<Item = Version> {
        (*Self::MIN..=*Self::MAX).map(Version)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    pub const fn mode_bits(self) -> usize {
        4
    }

    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        let bits = match mode {
            Mode::Numeric => [10, 12, 14],
            Mode::Alphanumeric => [9, 11, 13],
            Mode::Byte => [8, 16, 16],
            Mode::Kanji => [8, 10, 12],
            Mode::Eci => [0, 0, 0],
        };
        match self.0 {
            1..=9 => bits[0],
            10..=26 => bits[1],
            _ => bits[2],
        }
    }

    // Modules left for data and ecc after every function pattern and info area
    pub fn raw_data_modules(self) -> usize {
        let v = self.0;
        let mut res = (16 * v + 128) * v + 64;
        if v >= 2 {
            let align_cnt = v / 7 + 2;
            res -= (25 * align_cnt - 10) * align_cnt - 55;
            if v >= 7 {
                res -= 36;
            }
        }
        res
    }

    pub fn total_codewords(self) -> usize {
        self.raw_data_modules() >> 3
    }

    pub fn remainder_bits(self) -> usize {
        self.raw_data_modules() & 7
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        ECC_CODEWORDS_PER_BLOCK[ecl.table_index()][self.0 - 1] as usize
    }

    pub fn block_count(self, ecl: ECLevel) -> usize {
        NUM_ERROR_CORRECTION_BLOCKS[ecl.table_index()][self.0 - 1] as usize
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.total_codewords() - self.ecc_per_block(ecl) * self.block_count(ecl)
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    /// Returns `(block1_size, block1_count, block2_size, block2_count)`. Short blocks
    /// come first and long blocks hold exactly one more codeword.
    pub fn data_codewords_per_block(self, ecl: ECLevel) -> (usize, usize, usize, usize) {
        let data_len = self.data_codewords(ecl);
        let blocks = self.block_count(ecl);
        let block1_size = data_len / blocks;
        let block2_count = data_len % blocks;
        let block2_size = if block2_count > 0 { block1_size + 1 } else { 0 };
        (block1_size, blocks - block2_count, block2_size, block2_count)
    }

    pub fn alignment_pattern(self) -> Vec<usize> {
        let v = self.0;
        if v == 1 {
            return Vec::new();
        }

        let cnt = v / 7 + 2;
        let step = if v == 32 { 26 } else { (v * 4 + cnt * 2 + 1) / (cnt * 2 - 2) * 2 };
        let last = self.width() - 7;
        let mut res = vec![6; cnt];
        for (i, pos) in res.iter_mut().skip(1).rev().enumerate() {
            *pos = last - i * step;
        }
        res
    }

    /// 18 bit version information: 6 bit version followed by its BCH(18, 6) code.
    pub fn info(self) -> u32 {
        debug_assert!(self.0 >= 7, "Version info only exists from version 7: {}", self.0);
        let ver = self.0 as u32;
        let rem = bch_remainder(ver, VERSION_INFO_GENERATOR, 12);
        ver << 12 | rem
    }
}


// Format & version information
//------------------------------------------------------------------------------

/// 15 bit format information: ec level bits and mask, BCH(15, 5) protected and
/// XORed with the fixed format mask.
pub fn format_info_qr(ecl: ECLevel, mask: MaskPattern) -> u32 {
    let data = ecl.format_bits() << 3 | *mask as u32;
    let rem = bch_remainder(data, FORMAT_INFO_GENERATOR, 10);
    (data << 10 | rem) ^ FORMAT_INFO_MASK
}

// Remainder of `data * x^deg` divided by `gen` over GF(2)
fn bch_remainder(data: u32, gen: u32, deg: usize) -> u32 {
    let mut rem = data;
    for _ in 0..deg {
        rem = (rem << 1) ^ ((rem >> (deg - 1)) * gen);
    }
    debug_assert!(rem >> deg == 0, "BCH remainder overflowed {deg} bits: {rem:#x}");
    rem
}


// Global constants
//------------------------------------------------------------------------------

pub static FORMAT_INFO_BIT_LEN: usize = 15;

pub static VERSION_INFO_BIT_LEN: usize = 18;

static FORMAT_INFO_GENERATOR: u32 = 0x537;

static FORMAT_INFO_MASK: u32 = 0x5412;

static VERSION_INFO_GENERATOR: u32 = 0x1f25;

// Indexed by ec level, then version - 1
static ECC_CODEWORDS_PER_BLOCK: [[u8; 40]; 4] = [
    [
        7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30,
        30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    [
        13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30,
        30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

static NUM_ERROR_CORRECTION_BLOCKS: [[u8; 40]; 4] = [
    [
        1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13, 14,
        15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [
        1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23,
        25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [
        1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [
        1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35,
        37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];
