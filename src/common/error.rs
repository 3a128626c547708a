use std::fmt::{Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    CapacityExceeded,
    InvalidVersion,
    InvalidChar(char),
    InvalidEci,
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Self::CapacityExceeded => f.write_str("Data exceeds the capacity of every version"),
            Self::InvalidVersion => f.write_str("Invalid version"),
            Self::InvalidChar(c) => write!(f, "Invalid character for encoding mode: {c:?}"),
            Self::InvalidEci => f.write_str("ECI assignment value out of range"),
        }
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;
