use std::ops::{Add, Mul};

// Galois field element
//------------------------------------------------------------------------------

/// Element of GF(256) under the reducing polynomial x^8 + x^4 + x^3 + x^2 + 1.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct G(pub u8);

impl G {
    // α^i, where α = 2 is the primitive element
    pub fn gen_pow(i: usize) -> Self {
        Self(EXP_TABLE[i % 255])
    }

    pub fn log(self) -> usize {
        debug_assert!(self.0 != 0, "Log of zero is undefined");
        LOG_TABLE[self.0 as usize] as usize
    }
}

impl Add for G {
    type Output = Self;
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Mul for G {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        if self.0 == 0 || rhs.0 == 0 {
            return Self(0);
        }
        Self(EXP_TABLE[self.log() + rhs.log()])
    }
}

// Generator polynomial
//------------------------------------------------------------------------------

/// Coefficients of (x - α^0)(x - α^1)...(x - α^(degree-1)), highest degree first.
/// The leading coefficient is always 1.
pub fn generator_poly(degree: usize) -> Vec<G> {
    let mut poly = vec![G(1)];
    for i in 0..degree {
        let root = G::gen_pow(i);
        let mut next = vec![G(0); poly.len() + 1];
        for (j, &c) in poly.iter().enumerate() {
            next[j] = next[j] + c;
            next[j + 1] = next[j + 1] + c * root;
        }
        poly = next;
    }
    poly
}


// Global constants
//------------------------------------------------------------------------------

// Doubled so the sum of two logs can index it without reduction
pub static EXP_TABLE: [u8; 512] = build_exp_table();

pub static LOG_TABLE: [u8; 256] = build_log_table();

const fn build_exp_table() -> [u8; 512] {
    let mut table = [0u8; 512];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = x as u8;
        table[i + 255] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= 0x11d;
        }
        i += 1;
    }
    table
}

const fn build_log_table() -> [u8; 256] {
    let exp = build_exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}
