mod qr;

#[cfg(test)]
pub(crate) use qr::Module;
pub use qr::QR;

use log::{debug, log_enabled, Level};

use crate::common::{
    bit_utils::BitStream,
    codec::{boost_ec_level, encode_with_version, find_version, Segment},
    ec::ecc_and_interleave,
    error::{QRError, QRResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

/// Configures and builds a [`QR`] symbol.
///
/// Unset options fall back to: every version from 1 to 40, [`ECLevel::M`], no ec
/// level boosting and the mask with the lowest penalty score.
#[derive(Debug, Clone)]
pub struct QRBuilder {
    segments: Vec<Segment>,
    version_range: Option<(usize, usize)>,
    ec_level: ECLevel,
    boost_ec: bool,
    mask: Option<MaskPattern>,
}

impl QRBuilder {
    /// Builder for `data`, encoded as a single byte segment.
    pub fn new(data: &[u8]) -> Self {
        Self::from_segments(vec![Segment::bytes(data)])
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments, version_range: None, ec_level: ECLevel::M, boost_ec: false, mask: None }
    }

    pub fn data(&mut self, data: &[u8]) -> &mut Self {
        self.segments = vec![Segment::bytes(data)];
        self
    }

    pub fn segments(&mut self, segments: Vec<Segment>) -> &mut Self {
        self.segments = segments;
        self
    }

    /// Pins the symbol to a single version.
    pub fn version(&mut self, version: usize) -> &mut Self {
        self.version_range = Some((version, version));
        self
    }

    /// Restricts version selection to `min..=max`.
    pub fn version_range(&mut self, min: usize, max: usize) -> &mut Self {
        self.version_range = Some((min, max));
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version_range = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    /// Once the version is fixed, raise the ec level as far as the data still fits.
    pub fn boost_ec_level(&mut self, boost: bool) -> &mut Self {
        self.boost_ec = boost;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        let version = match self.version_range {
            Some((min, max)) if min == max => format!("{min}"),
            Some((min, max)) => format!("{min}..={max}"),
            None => "None".to_string(),
        };
        let mask = match self.mask {
            Some(m) => format!("{}", *m),
            None => "None".to_string(),
        };
        format!(
            "{{ Version: {version}, Ec level: {:?}, Boost: {}, Mask: {mask} }}",
            self.ec_level, self.boost_ec
        )
    }

    fn version_bounds(&self) -> QRResult<(Version, Version)> {
        let (min, max) = self.version_range.unwrap_or((*Version::MIN, *Version::MAX));
        if min < *Version::MIN || max > *Version::MAX || min > max {
            return Err(QRError::InvalidVersion);
        }
        Ok((Version::new(min), Version::new(max)))
    }
}


impl QRBuilder {
    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}...", self.metadata());

        let (min, max) = self.version_bounds()?;
        debug!("Finding best version...");
        let version = find_version(&self.segments, self.ec_level, min, max)?;
        let ec_level = if self.boost_ec {
            boost_ec_level(&self.segments, version, self.ec_level)
        } else {
            self.ec_level
        };

        debug!("Encoding data...");
        let encoded_data = encode_with_version(&self.segments, ec_level, version)?;

        debug!("Constructing payload with ecc & interleaving...");
        let payload = ecc_and_interleave(encoded_data.data(), version, ec_level);

        debug!("Constructing QR...");
        let mut qr = QR::new(version, ec_level);

        debug!("Drawing functional patterns...");
        qr.draw_all_function_patterns();

        debug!("Drawing encoding region...");
        qr.draw_encoding_region(BitStream::from(&payload));

        match self.mask {
            Some(m) => {
                debug!("Applying mask {}...", *m);
                qr.apply_mask(m);
            }
            None => {
                debug!("Finding & applying best mask...");
                apply_best_mask(&mut qr);
            }
        }

        if log_enabled!(Level::Debug) {
            self.log_report(&qr);
        }

        Ok(qr)
    }

    fn log_report(&self, qr: &QR) {
        let (version, ec_level) = (qr.version(), qr.ec_level());
        let total_modules = qr.width() * qr.width();
        let dark_modules = qr.count_dark_modules();
        let data_capacity = version.data_codewords(ec_level);
        let data_len = self.segments.iter().filter_map(|s| s.bit_len(version)).sum::<usize>();
        debug!("QR generated: {}", qr.metadata());
        debug!(
            "Data capacity: {data_capacity}, Data size: {}, Fill: {}%",
            data_len.div_ceil(8),
            data_len * 100 / (data_capacity << 3)
        );
        debug!(
            "Dark Cells: {dark_modules}, Light Cells: {}, Balance: {}",
            total_modules - dark_modules,
            dark_modules * 100 / total_modules
        );
    }
}
