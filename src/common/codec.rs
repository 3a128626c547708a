use super::{
    bit_utils::BitStream,
    error::{QRError, QRResult},
    metadata::Version,
};

pub use encode::{boost_ec_level, encode_with_version, find_version};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
    Kanji = 0b1000,
    Eci = 0b0111,
}

impl Mode {
    #[inline]
    fn numeric_digit(char: char) -> Option<u16> {
        char.to_digit(10).map(|d| d as u16)
    }

    #[inline]
    fn alphanumeric_digit(char: char) -> Option<u16> {
        let digit = match char {
            '0'..='9' => char as u16 - '0' as u16,
            'A'..='Z' => char as u16 - 'A' as u16 + 10,
            ' ' => 36,
            '$' => 37,
            '%' => 38,
            '*' => 39,
            '+' => 40,
            '-' => 41,
            '.' => 42,
            '/' => 43,
            ':' => 44,
            _ => return None,
        };
        Some(digit)
    }

    pub fn contains(&self, char: char) -> bool {
        match self {
            Self::Numeric => Self::numeric_digit(char).is_some(),
            Self::Alphanumeric => Self::alphanumeric_digit(char).is_some(),
            Self::Byte => true,
            Self::Kanji | Self::Eci => false,
        }
    }

    // Bit length of the data part for `len` characters
    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => len * 8,
            Self::Kanji => len * 13,
            Self::Eci => unreachable!("ECI data length doesn't depend on a character count"),
        }
    }
}


// Segment
//------------------------------------------------------------------------------

/// A run of data encoded in a single mode: mode, character count and the data bits
/// that follow the segment header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    char_cnt: usize,
    data: BitStream,
}

impl Segment {
    /// Builds a segment from pre-encoded bits. The caller is responsible for `data`
    /// matching `mode` and `char_cnt`.
    pub fn new(mode: Mode, char_cnt: usize, data: BitStream) -> Self {
        Self { mode, char_cnt, data }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn char_cnt(&self) -> usize {
        self.char_cnt
    }

    pub fn data(&self) -> &BitStream {
        &self.data
    }

    /// Segments for arbitrary text: a single byte segment over its UTF-8 bytes.
    pub fn make_segments(text: &str) -> Vec<Segment> {
        vec![Self::bytes(text.as_bytes())]
    }

    pub fn bytes(data: &[u8]) -> Self {
        let mut bs = BitStream::new(Mode::Byte.encoded_len(data.len()));
        bs.extend(data);
        Self::new(Mode::Byte, data.len(), bs)
    }

    pub fn numeric(text: &str) -> QRResult<Self> {
        let digits = text
            .chars()
            .map(|c| Mode::numeric_digit(c).ok_or(QRError::InvalidChar(c)))
            .collect::<QRResult<Vec<_>>>()?;

        let mut bs = BitStream::new(Mode::Numeric.encoded_len(digits.len()));
        for chunk in digits.chunks(3) {
            let len = Mode::Numeric.encoded_len(chunk.len());
            let val = chunk.iter().fold(0_u16, |n, d| n * 10 + d);
            bs.push_bits(val, len);
        }
        Ok(Self::new(Mode::Numeric, digits.len(), bs))
    }

    pub fn alphanumeric(text: &str) -> QRResult<Self> {
        let digits = text
            .chars()
            .map(|c| Mode::alphanumeric_digit(c).ok_or(QRError::InvalidChar(c)))
            .collect::<QRResult<Vec<_>>>()?;

        let mut bs = BitStream::new(Mode::Alphanumeric.encoded_len(digits.len()));
        for chunk in digits.chunks(2) {
            let len = Mode::Alphanumeric.encoded_len(chunk.len());
            let val = chunk.iter().fold(0_u16, |n, d| n * 45 + d);
            bs.push_bits(val, len);
        }
        Ok(Self::new(Mode::Alphanumeric, digits.len(), bs))
    }

    /// Extended Channel Interpretation designator for the given assignment value.
    pub fn eci(assign_val: u32) -> QRResult<Self> {
        let mut bs = BitStream::new(24);
        match assign_val {
            0..=0x7f => bs.push_bits(assign_val, 8),
            0x80..=0x3fff => {
                bs.push_bits(0b10u8, 2);
                bs.push_bits(assign_val, 14);
            }
            0x4000..=999_999 => {
                bs.push_bits(0b110u8, 3);
                bs.push_bits(assign_val, 21);
            }
            _ => return Err(QRError::InvalidEci),
        }
        Ok(Self::new(Mode::Eci, 0, bs))
    }

    pub fn is_numeric(text: &str) -> bool {
        text.chars().all(|c| Mode::Numeric.contains(c))
    }

    pub fn is_alphanumeric(text: &str) -> bool {
        text.chars().all(|c| Mode::Alphanumeric.contains(c))
    }

    /// Header and data bit length at `ver`, or `None` if the character count doesn't
    /// fit the count field of that version.
    pub fn bit_len(&self, ver: Version) -> Option<usize> {
        let len_bits = ver.char_cnt_bits(self.mode);
        if self.char_cnt >= 1 << len_bits {
            return None;
        }
        Some(ver.mode_bits() + len_bits + self.data.len())
    }
}

#[cfg(test)]
mod segment_tests {
    use super::{Mode, Segment};
    use crate::common::{bit_utils::BitStream, error::QRError, metadata::Version};

    #[test]
    fn test_make_segments() {
        let segs = Segment::make_segments("Hello, world! 🌏");
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].mode(), Mode::Byte);
        assert_eq!(segs[0].char_cnt(), "Hello, world! 🌏".len());
        assert_eq!(segs[0].data().data(), "Hello, world! 🌏".as_bytes());
    }

    #[test]
    fn test_make_segments_empty() {
        let segs = Segment::make_segments("");
        assert_eq!(segs[0].char_cnt(), 0);
        assert!(segs[0].data().is_empty());
    }

    #[test]
    fn test_numeric() {
        let seg = Segment::numeric("01234567").unwrap();
        assert_eq!(seg.char_cnt(), 8);
        assert_eq!(seg.data().len(), 27);
        assert_eq!(seg.data().data(), [0b00000011, 0b00010101, 0b10011000, 0b01100000]);
        let seg = Segment::numeric("8").unwrap();
        assert_eq!(seg.data().data(), [0b10000000]);
    }

    #[test]
    fn test_alphanumeric() {
        let seg = Segment::alphanumeric("AC-42").unwrap();
        assert_eq!(seg.char_cnt(), 5);
        assert_eq!(seg.data().len(), 28);
        assert_eq!(seg.data().data(), [0b00111001, 0b11011100, 0b11100100, 0b00100000]);
    }

    #[test]
    fn test_invalid_chars() {
        assert_eq!(Segment::alphanumeric("HELLO world"), Err(QRError::InvalidChar('w')));
        assert_eq!(Segment::alphanumeric("AB#"), Err(QRError::InvalidChar('#')));
        assert_eq!(Segment::numeric("12a4"), Err(QRError::InvalidChar('a')));
    }

    #[test]
    fn test_eci() {
        let seg = Segment::eci(26).unwrap();
        assert_eq!(seg.data().data(), [26]);
        let seg = Segment::eci(0x1234).unwrap();
        assert_eq!(seg.data().len(), 16);
        assert_eq!(seg.data().data(), [0x92, 0x34]);
        let seg = Segment::eci(999_999).unwrap();
        assert_eq!(seg.data().len(), 24);
        assert_eq!(seg.data().data(), [0xcf, 0x42, 0x3f]);
        assert_eq!(Segment::eci(1_000_000), Err(QRError::InvalidEci));
    }

    #[test]
    fn test_predicates() {
        assert!(Segment::is_numeric("0123456789"));
        assert!(!Segment::is_numeric("12.5"));
        assert!(Segment::is_alphanumeric("HTTPS://EXAMPLE.COM/T/42"));
        assert!(!Segment::is_alphanumeric("https://example.com"));
        assert!(Segment::is_numeric(""));
    }

    #[test]
    fn test_bit_len() {
        let seg = Segment::numeric("123").unwrap();
        assert_eq!(seg.bit_len(Version::new(1)), Some(24));
        assert_eq!(seg.bit_len(Version::new(10)), Some(26));
        assert_eq!(seg.bit_len(Version::new(27)), Some(28));
        let seg = Segment::alphanumeric("AZ").unwrap();
        assert_eq!(seg.bit_len(Version::new(1)), Some(24));
        let seg = Segment::bytes(b"abc");
        assert_eq!(seg.bit_len(Version::new(27)), Some(44));
        let seg = Segment::eci(3).unwrap();
        assert_eq!(seg.bit_len(Version::new(1)), Some(12));
    }

    #[test]
    fn test_bit_len_char_cnt_overflow() {
        let seg = Segment::new(Mode::Byte, 256, BitStream::new(0));
        assert_eq!(seg.bit_len(Version::new(9)), None);
        assert_eq!(seg.bit_len(Version::new(10)), Some(20));
    }
}

// Writer for encoded data
//------------------------------------------------------------------------------

mod writer {
    use crate::common::{bit_utils::BitStream, metadata::Version};

    use super::{Segment, PADDING_CODEWORDS};

    pub fn push_segment(seg: &Segment, ver: Version, out: &mut BitStream) {
        push_header(seg, ver, out);
        out.append(seg.data());
    }

    fn push_header(seg: &Segment, ver: Version, out: &mut BitStream) {
        out.push_bits(seg.mode() as u8, ver.mode_bits());
        let len_bits = ver.char_cnt_bits(seg.mode());
        let char_cnt = seg.char_cnt();
        debug_assert!(
            char_cnt < (1 << len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
        );
        out.push_bits(char_cnt as u32, len_bits);
    }

    pub fn push_terminator(out: &mut BitStream) {
        let bit_len = out.len();
        let bit_capacity = out.capacity();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0u8, term_len);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0u8, padding_bits_len);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        let offset = out.len() & 7;
        debug_assert!(
            offset == 0,
            "Bit offset should be zero before padding codewords: {}",
            offset
        );

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

}

// Encoder
//------------------------------------------------------------------------------

mod encode {
    use crate::common::{
        bit_utils::BitStream,
        error::{QRError, QRResult},
        metadata::{ECLevel, Version},
    };

    use super::{
        writer::{pad_remaining_capacity, push_segment, push_terminator},
        Segment,
    };

    // Total bit length of `segs` at `ver`, or `None` if a character count overflows.
    fn total_bit_len(segs: &[Segment], ver: Version) -> Option<usize> {
        segs.iter().map(|s| s.bit_len(ver)).sum()
    }

    /// Smallest version within `[min, max]` whose data capacity holds `segs`.
    pub fn find_version(
        segs: &[Segment],
        ecl: ECLevel,
        min: Version,
        max: Version,
    ) -> QRResult<Version> {
        if min > max {
            return Err(QRError::InvalidVersion);
        }
        Version::all()
            .skip_while(|v| *v < min)
            .take_while(|v| *v <= max)
            .find(|&v| total_bit_len(segs, v).is_some_and(|len| len <= v.data_bit_capacity(ecl)))
            .ok_or(QRError::CapacityExceeded)
    }

    /// Strongest ec level, not weaker than `ecl`, that still holds `segs` at `ver`.
    pub fn boost_ec_level(segs: &[Segment], ver: Version, ecl: ECLevel) -> ECLevel {
        let Some(size) = total_bit_len(segs, ver) else {
            return ecl;
        };
        ECLevel::ALL
            .into_iter()
            .rev()
            .find(|&e| e >= ecl && size <= ver.data_bit_capacity(e))
            .unwrap_or(ecl)
    }

    /// Data codewords for `segs` at `ver`: segment headers and data, terminator and
    /// padding, exactly `ver.data_bit_capacity(ecl)` bits long.
    pub fn encode_with_version(
        segs: &[Segment],
        ecl: ECLevel,
        ver: Version,
    ) -> QRResult<BitStream> {
        let bit_capacity = ver.data_bit_capacity(ecl);
        let size = total_bit_len(segs, ver).ok_or(QRError::CapacityExceeded)?;
        if size > bit_capacity {
            return Err(QRError::CapacityExceeded);
        }

        let mut bs = BitStream::new(bit_capacity);
        for seg in segs {
            push_segment(seg, ver, &mut bs);
        }
        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);

        debug_assert!(
            bs.len() == bit_capacity,
            "Encoded length doesn't match capacity: Length {}, Capacity {bit_capacity}",
            bs.len()
        );
        Ok(bs)
    }

}

// Global constants
//------------------------------------------------------------------------------

static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];
