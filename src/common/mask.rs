use std::ops::Deref;

use log::trace;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::metadata::Color;
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    /// # Panics
    ///
    /// Panics if `pattern` is not in `0..8`.
    pub fn new(pattern: u8) -> Self {
        assert!(pattern < 8, "Invalid masking pattern: {pattern}");
        Self(pattern)
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(Self)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Mask functions take (row, column)
mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (p & 1) + (p % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((p & 1) + (p % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (((r + c) as i32 & 1) + (p % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!(),
        }
    }
}


// Mask selection
//------------------------------------------------------------------------------

/// Scores every mask on a private copy of `qr`, then applies the one with the lowest
/// penalty. Ties go to the lowest mask index.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let base: &QR = qr;
    let score = |m: u8| {
        let mut trial = base.clone();
        trial.apply_mask(MaskPattern(m));
        let pen = compute_total_penalty(&trial);
        trace!("Mask {m}: penalty {pen}");
        (pen, m)
    };

    #[cfg(feature = "parallel")]
    let (_, best_mask) =
        (0..8u8).into_par_iter().map(score).reduce(|| (u32::MAX, 0), std::cmp::min);
    #[cfg(not(feature = "parallel"))]
    let (_, best_mask) = (0..8u8).map(score).fold((u32::MAX, 0), std::cmp::min);

    let best_mask = MaskPattern(best_mask);
    qr.apply_mask(best_mask);
    best_mask
}

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let w = qr.width() as i16;
    let rows =
        (0..w).map(|r| (0..w).map(|c| *qr.get(r, c)).collect::<Vec<_>>()).collect::<Vec<_>>();
    let cols =
        (0..w).map(|c| (0..w).map(|r| *qr.get(r, c)).collect::<Vec<_>>()).collect::<Vec<_>>();

    let adj_pen = rows.iter().chain(&cols).map(|l| compute_adjacent_penalty(l)).sum::<u32>();
    let blk_pen = compute_block_penalty(&rows);
    let fp_pen = rows.iter().chain(&cols).map(|l| compute_finder_pattern_penalty(l)).sum::<u32>();
    let bal_pen = compute_balance_penalty(qr.count_dark_modules(), qr.width() * qr.width());
    adj_pen + blk_pen + fp_pen + bal_pen
}

// Runs of 5 or more modules of one color
fn compute_adjacent_penalty(line: &[Color]) -> u32 {
    let mut pen = 0;
    let mut run_len = 0;
    let mut last = None;
    for &clr in line {
        if last == Some(clr) {
            run_len += 1;
        } else {
            if run_len >= 5 {
                pen += run_len - 2;
            }
            last = Some(clr);
            run_len = 1;
        }
    }
    if run_len >= 5 {
        pen += run_len - 2;
    }
    pen
}

fn compute_block_penalty(rows: &[Vec<Color>]) -> u32 {
    let mut pen = 0;
    for (top, bottom) in rows.iter().zip(rows.iter().skip(1)) {
        for c in 0..top.len().saturating_sub(1) {
            let clr = top[c];
            if clr == top[c + 1] && clr == bottom[c] && clr == bottom[c + 1] {
                pen += 3;
            }
        }
    }
    pen
}

// 1:1:3:1:1 finder-like pattern with 4 light modules inside the grid on either side
fn compute_finder_pattern_penalty(line: &[Color]) -> u32 {
    static PATTERN: [Color; 7] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
    ];
    let w = line.len();
    let is_light = |s: &[Color]| s.iter().all(|&c| c == Color::Light);

    let mut pen = 0;
    for j in 0..w.saturating_sub(6) {
        if line[j..j + 7] != PATTERN {
            continue;
        }
        let before = j >= 4 && is_light(&line[j - 4..j]);
        let after = j + 10 < w && is_light(&line[j + 7..j + 11]);
        if before || after {
            pen += 40;
        }
    }
    pen
}

// 10 points per full 5% step away from an even dark/light split
fn compute_balance_penalty(dark_cnt: usize, total: usize) -> u32 {
    let k = (dark_cnt * 20).abs_diff(total * 10) / total;
    (k * 10) as u32
}
