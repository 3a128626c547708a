//! # qrtix
//!
//! A self-contained QR code encoder with Reed-Solomon error correction.
//!
//! Text goes in, a square module grid comes out. The encoder picks the smallest
//! version that holds the data at the requested error correction level, appends
//! Reed-Solomon codewords, places everything on the grid and selects the mask with
//! the lowest penalty score.
//!
//! ## Quick Start
//!
//! ```rust
//! use qrtix::{encode, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = encode("HELLO", ECLevel::M)?;
//! assert_eq!(*qr.version(), 1);
//! assert_eq!(qr.width(), 21);
//!
//! // Top left finder pattern
//! assert!(qr.is_dark(0, 0));
//! assert!(!qr.is_dark(1, 1));
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrtix::{ECLevel, MaskPattern, QRBuilder, Segment};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let segments = vec![Segment::alphanumeric("HELLO WORLD")?, Segment::numeric("0123456789")?];
//! let qr = QRBuilder::from_segments(segments)
//!     .version_range(2, 10)         // Smallest fitting version in 2..=10
//!     .ec_level(ECLevel::Q)         // Defaults to ECLevel::M
//!     .boost_ec_level(true)         // Raise the level while the data still fits
//!     .mask(MaskPattern::new(3))    // Skips the penalty based mask search
//!     .build()?;
//!
//! let img = qr.to_image(4);  // 4 pixels per module, 4 module quiet zone
//! assert_eq!(img.width(), (qr.width() as u32 + 8) * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ## Features
//! - `parallel`: scores the 8 mask candidates on the rayon thread pool. The chosen
//!   mask is the same as without the feature.

pub mod builder;
pub(crate) mod common;
mod render;

pub use builder::{QRBuilder, QR};
pub use common::codec::{Mode, Segment};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};
pub use common::bit_utils::BitStream;

/// Encodes `text` as UTF-8 bytes in the smallest version that fits at `ec_level`.
pub fn encode(text: &str, ec_level: ECLevel) -> QRResult<QR> {
    encode_binary(text.as_bytes(), ec_level)
}

/// Encodes raw bytes in the smallest version that fits at `ec_level`.
pub fn encode_binary(data: &[u8], ec_level: ECLevel) -> QRResult<QR> {
    QRBuilder::new(data).ec_level(ec_level).build()
}
