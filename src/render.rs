use image::{GrayImage, Luma};

use crate::builder::QR;

// Render
//------------------------------------------------------------------------------

impl QR {
    /// Rasterises the symbol with `module_sz` pixels per module and a 4 module quiet
    /// zone on every side.
    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        let qz_sz = QUIET_ZONE as u32 * module_sz;
        let qr_sz = self.width() as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = GrayImage::new(total_sz, total_sz);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.put_pixel(j, i, Luma([255]));
                    continue;
                }
                let y = ((i - qz_sz) / module_sz) as usize;
                let x = ((j - qz_sz) / module_sz) as usize;
                let pixel = if self.is_dark(x, y) { Luma([0]) } else { Luma([255]) };
                canvas.put_pixel(j, i, pixel);
            }
        }

        canvas
    }

    /// Text rendering with `module_sz` characters per module and a 4 module quiet
    /// zone. Light modules are drawn as `█` so the symbol reads on a dark terminal.
    pub fn to_str(&self, module_sz: usize) -> String {
        let qz_sz = QUIET_ZONE * module_sz;
        let qr_sz = self.width() * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::with_capacity(total_sz * (total_sz * 3 + 1));
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.push('█');
                    continue;
                }
                let y = (i - qz_sz) / module_sz;
                let x = (j - qz_sz) / module_sz;
                canvas.push(if self.is_dark(x, y) { ' ' } else { '█' });
            }
            canvas.push('\n');
        }

        canvas
    }
}

static QUIET_ZONE: usize = 4;

#[cfg(test)]
mod render_tests {
    use crate::{common::metadata::ECLevel, QRBuilder};

    #[test]
    fn test_to_image() {
        let qr = QRBuilder::new(b"HELLO").ec_level(ECLevel::M).build().unwrap();
        let img = qr.to_image(3);
        assert_eq!(img.dimensions(), (87, 87));
        assert_eq!(img.get_pixel(0, 0).0, [255]);
        assert_eq!(img.get_pixel(11, 11).0, [255]);
        // Top left finder corner
        assert_eq!(img.get_pixel(12, 12).0, [0]);
        assert_eq!(img.get_pixel(14, 14).0, [0]);
        // Finder's light ring
        assert_eq!(img.get_pixel(15, 15).0, [255]);
    }

    #[test]
    fn test_to_str() {
        let qr = QRBuilder::new(b"HELLO").build().unwrap();
        let s = qr.to_str(1);
        let lines = s.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 29);
        assert!(lines.iter().all(|l| l.chars().count() == 29));
        assert!(lines[0].chars().all(|c| c == '█'));
        assert_eq!(lines[4].chars().skip(4).take(8).collect::<String>(), "       █");
    }
}
