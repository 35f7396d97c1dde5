use std::fs;
use std::path::Path;

use image::{GrayImage, Luma};
use tracing::debug;

use super::{Module, QR};
use crate::common::{Color, QRResult};

pub const QUIET_ZONE_WIDTH: usize = 4;

pub const SVG_MODULE_SIZE: usize = 10;

// Text
//------------------------------------------------------------------------------

impl QR {
    /// One line per row, `#` for dark and space for light modules.
    pub fn to_str(&self) -> String {
        self.render_text(|m| m.select('#', ' '))
    }

    /// Like [`QR::to_str`] but structural and format modules are drawn as `@` (dark) and
    /// `.` (light), so the reserved areas stand out from the data.
    pub fn to_marked_str(&self) -> String {
        self.render_text(|m| match m {
            Module::Data(c) => c.select('#', ' '),
            _ => m.select('@', '.'),
        })
    }

    fn render_text(&self, glyph: impl Fn(Module) -> char) -> String {
        let w = self.width();
        let mut canvas = String::with_capacity(w * (w + 1));
        for row in self.grid().chunks_exact(w) {
            canvas.extend(row.iter().map(|&m| glyph(m)));
            canvas.push('\n');
        }
        canvas
    }
}

// Svg & csv
//------------------------------------------------------------------------------

impl QR {
    pub fn to_svg(&self) -> String {
        let w = self.width();
        let total_sz = (2 * QUIET_ZONE_WIDTH + w) * SVG_MODULE_SIZE;

        let mut svg = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{total_sz}\" \
             height=\"{total_sz}\" viewBox=\"0 0 {total_sz} {total_sz}\">\n"
        ));
        svg.push_str(&svg_rect(0, 0, total_sz, "#ffffff"));
        for (i, m) in self.grid().iter().enumerate() {
            let x = (i % w + QUIET_ZONE_WIDTH) * SVG_MODULE_SIZE;
            let y = (i / w + QUIET_ZONE_WIDTH) * SVG_MODULE_SIZE;
            svg.push_str(&svg_rect(x, y, SVG_MODULE_SIZE, m.select("#000000", "#ffffff")));
        }
        svg.push_str("</svg>\n");
        svg
    }

    /// One line per row, modules joined by `;` as `1` (dark) or `0` (light).
    pub fn to_csv(&self) -> String {
        self.to_bool_grid()
            .iter()
            .map(|row| {
                let cells = row.iter().map(|&d| if d { "1" } else { "0" }).collect::<Vec<_>>();
                cells.join(";") + "\n"
            })
            .collect()
    }

    pub fn save_svg(&self, path: impl AsRef<Path>) -> QRResult<()> {
        fs::write(path.as_ref(), self.to_svg())?;
        debug!(path = %path.as_ref().display(), "Svg written");
        Ok(())
    }

    pub fn save_csv(&self, path: impl AsRef<Path>) -> QRResult<()> {
        fs::write(path.as_ref(), self.to_csv())?;
        debug!(path = %path.as_ref().display(), "Csv written");
        Ok(())
    }
}

fn svg_rect(x: usize, y: usize, sz: usize, fill: &str) -> String {
    format!("<rect x=\"{x}\" y=\"{y}\" width=\"{sz}\" height=\"{sz}\" fill=\"{fill}\"/>\n")
}

// Image
//------------------------------------------------------------------------------

impl QR {
    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        let qz_sz = QUIET_ZONE_WIDTH as u32 * module_sz;
        let qr_sz = self.width() as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = GrayImage::new(total_sz, total_sz);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.put_pixel(j, i, Luma([255]));
                    continue;
                }
                let r = (i - qz_sz) / module_sz;
                let c = (j - qz_sz) / module_sz;

                let pixel = match *self.get(r as i16, c as i16) {
                    Color::Dark => Luma([0]),
                    Color::Light => Luma([255]),
                };

                canvas.put_pixel(j, i, pixel);
            }
        }

        canvas
    }

    pub fn save_png(&self, path: impl AsRef<Path>, module_sz: u32) -> QRResult<()> {
        self.to_image(module_sz).save(path.as_ref())?;
        debug!(path = %path.as_ref().display(), module_sz, "Png written");
        Ok(())
    }
}

#[cfg(test)]
mod render_tests {
    use std::fs;

    use image::Luma;

    use crate::builder::QRBuilder;
    use crate::common::QRError;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("qrbyte-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_to_str() {
        let qr = QRBuilder::new(b"HELLO").build().unwrap();
        let text = qr.to_str();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 21);
        assert_eq!(&lines[0][..8], "####### ");
        assert_eq!(&lines[1][..8], "#     # ");
        for (r, line) in lines.iter().enumerate() {
            assert_eq!(line.chars().count(), 21);
            for (c, ch) in line.chars().enumerate() {
                assert_eq!(ch == '#', qr.is_dark(r as i16, c as i16));
            }
        }
    }

    #[test]
    fn test_to_marked_str() {
        let qr = QRBuilder::new(b"HELLO").build().unwrap();
        let text = qr.to_marked_str();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(&lines[0][..9], "@@@@@@@..");
        assert_eq!(&lines[6][..13], "@@@@@@@.@.@.@");
        // Data region keeps the plain glyphs
        assert!(lines[20][9..].chars().all(|ch| ch == '#' || ch == ' '));
    }

    #[test]
    fn test_to_svg() {
        let qr = QRBuilder::new(b"svg").build().unwrap();
        let svg = qr.to_svg();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("<rect x=\"0\" y=\"0\" width=\"290\" height=\"290\" fill=\"#ffffff\"/>"));
        assert!(svg.contains("<rect x=\"40\" y=\"40\" width=\"10\" height=\"10\" fill=\"#000000\"/>"));
        assert!(svg.contains("<rect x=\"110\" y=\"110\" width=\"10\" height=\"10\" fill=\"#ffffff\"/>"));
        assert_eq!(svg.matches("<rect").count(), 21 * 21 + 1);
    }

    #[test]
    fn test_to_csv() {
        let qr = QRBuilder::new(&[b'c'; 18]).build().unwrap();
        let csv = qr.to_csv();
        let lines = csv.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 25);
        assert!(lines[0].starts_with("1;1;1;1;1;1;1;0;"));
        for (r, line) in lines.iter().enumerate() {
            let cells = line.split(';').collect::<Vec<_>>();
            assert_eq!(cells.len(), 25);
            for (c, cell) in cells.iter().enumerate() {
                assert_eq!(*cell == "1", qr.is_dark(r as i16, c as i16));
            }
        }
    }

    #[test]
    fn test_to_image() {
        let qr = QRBuilder::new(b"image").build().unwrap();
        let img = qr.to_image(3);
        assert_eq!(img.dimensions(), (29 * 3, 29 * 3));
        assert_eq!(*img.get_pixel(0, 0), Luma([255]));
        assert_eq!(*img.get_pixel(12, 12), Luma([0]));
        assert_eq!(*img.get_pixel(12 + 3, 12 + 3), Luma([255]));
    }

    #[test]
    fn test_save_files() {
        let qr = QRBuilder::new(b"files").build().unwrap();

        let svg_path = temp_path("out.svg");
        qr.save_svg(&svg_path).unwrap();
        assert_eq!(fs::read_to_string(&svg_path).unwrap(), qr.to_svg());

        let csv_path = temp_path("out.csv");
        qr.save_csv(&csv_path).unwrap();
        assert_eq!(fs::read_to_string(&csv_path).unwrap(), qr.to_csv());

        let png_path = temp_path("out.png");
        qr.save_png(&png_path, 2).unwrap();
        let img = image::open(&png_path).unwrap().to_luma8();
        assert_eq!(img, qr.to_image(2));

        for p in [svg_path, csv_path, png_path] {
            let _ = fs::remove_file(p);
        }
    }

    #[test]
    fn test_save_into_missing_dir() {
        let qr = QRBuilder::new(b"").build().unwrap();
        let path = temp_path("missing-dir").join("out.svg");
        let not_found = Err(QRError::Io(std::io::ErrorKind::NotFound));
        assert_eq!(qr.save_svg(&path), not_found);
        assert_eq!(qr.save_csv(path.with_extension("csv")), not_found);
    }
}
