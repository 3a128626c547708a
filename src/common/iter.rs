use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Walks every module outside the vertical timing column in placement order: two
/// column strides from the right edge, alternating upward and downward. Callers skip
/// modules already taken by function patterns.
pub struct EncRegionIter {
    r: i16,
    c: i16,
    width: i16,
}

impl EncRegionIter {
    pub fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, width: w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 0 {
            return None;
        }
        let adjusted_col = if self.c <= VERT_TIMING_COL { self.c + 1 } else { self.c };
        let res = (self.r, self.c);
        let col_type = (self.width - adjusted_col) % 4;
        match col_type {
            2 if self.r > 0 => {
                self.r -= 1;
                self.c += 1;
            }
            0 if self.r < self.width - 1 => {
                self.r += 1;
                self.c += 1;
            }
            0 | 2 if self.c == VERT_TIMING_COL + 1 => {
                self.c -= 2;
            }
            _ => {
                self.c -= 1;
            }
        }
        Some(res)
    }
}

static VERT_TIMING_COL: i16 = 6;

#[cfg(test)]
mod iter_tests {
    use std::collections::HashSet;

    use super::EncRegionIter;
    use crate::builder::{Module, QRBuilder};
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_enc_region_iter_order() {
        let coords = EncRegionIter::new(Version::new(1)).take(6).collect::<Vec<_>>();
        assert_eq!(coords, [(20, 20), (20, 19), (19, 20), (19, 19), (18, 20), (18, 19)]);

        // Column pair 18/17 runs downward from the top row
        let coords = EncRegionIter::new(Version::new(1)).skip(42).take(4).collect::<Vec<_>>();
        assert_eq!(coords, [(0, 18), (0, 17), (1, 18), (1, 17)]);
    }

    #[test]
    fn test_enc_region_iter_covers_grid() {
        for v in [1, 2, 6, 7, 21, 40] {
            let ver = Version::new(v);
            let w = ver.width();
            let coords = EncRegionIter::new(ver).collect::<Vec<_>>();
            let unique = coords.iter().copied().collect::<HashSet<_>>();
            assert_eq!(coords.len(), w * (w - 1));
            assert_eq!(unique.len(), coords.len());
            assert!(coords.iter().all(|&(_, c)| c != 6));
        }
    }

    #[test]
    fn test_enc_region_iter() {
        for v in 1..=40 {
            let data = "Hello, world!".as_bytes();
            let version = Version::new(v);
            let qr = QRBuilder::new(data).version(v).ec_level(ECLevel::L).build().unwrap();
            let coords = EncRegionIter::new(version);
            let data_modules = coords
                .into_iter()
                .filter(|(r, c)| matches!(qr.get(*r, *c), Module::Data(_)))
                .count();
            let exp_modules = version.total_codewords() * 8 + version.remainder_bits();
            assert_eq!(data_modules, exp_modules);
        }
    }
}
