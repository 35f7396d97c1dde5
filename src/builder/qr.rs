use std::ops::Deref;

use tracing::{debug, trace};

use crate::common::{
    BitStream, Color, ECLevel, Flavor, MaskPattern, Metadata, PlacementCursor, QRError,
    QRResult, Version, FORMAT_INFO_BIT_LEN, FORMAT_INFO_COORDS_QR_MAIN, FORMAT_INFO_COORDS_QR_SIDE,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Format(Color),
    Data(Color),
}

impl Module {
    /// Structural, reserved or already holding a payload bit.
    pub fn is_taken(&self) -> bool {
        !matches!(self, Module::Empty)
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Module::Data(_))
    }
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    flavor: Flavor,
    mask: Option<MaskPattern>,
    format_info: u32,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub(crate) fn new(flavor: Flavor) -> Self {
        let w = flavor.version.width();
        Self { grid: vec![Module::Empty; w * w], w, flavor, mask: None, format_info: 0 }
    }

    pub fn grid(&self) -> &[Module] {
        &self.grid
    }

    pub fn version(&self) -> Version {
        self.flavor.version
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.flavor.ec_level
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn metadata(&self) -> Metadata {
        Metadata::new(
            self.flavor.version,
            self.flavor.ec_level,
            self.flavor.ec_codewords,
            self.mask.unwrap_or_default(),
            self.format_info,
        )
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    pub fn is_dark(&self, r: i16, c: i16) -> bool {
        matches!(*self.get(r, c), Color::Dark)
    }

    /// Module values row by row, `true` for dark.
    pub fn to_bool_grid(&self) -> Vec<Vec<bool>> {
        self.grid
            .chunks_exact(self.w)
            .map(|row| row.iter().map(|m| **m == Color::Dark).collect())
            .collect()
    }

    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize + 1);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "Row out of bounds: Row {r}, Width {w}");
        debug_assert!(-w <= c && c < w, "Column out of bounds: Column {c}, Width {w}");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub(crate) fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub(crate) fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }
}

#[cfg(test)]
mod qr_util_tests {
    use super::{Module, QR};
    use crate::common::{Color, Flavor};

    #[test]
    fn test_index_wrap() {
        let mut qr = QR::new(Flavor::select(0).unwrap());
        let w = qr.w as i16;
        qr.set(-1, -1, Module::Func(Color::Dark));
        assert_eq!(qr.get(w - 1, w - 1), Module::Func(Color::Dark));
        qr.set(0, 0, Module::Func(Color::Dark));
        assert_eq!(qr.get(-w, -w), Module::Func(Color::Dark));
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_bound() {
        let qr = QR::new(Flavor::select(0).unwrap());
        let w = qr.w as i16;
        qr.get(w, 0);
    }

    #[test]
    #[should_panic]
    fn test_col_out_of_bound() {
        let qr = QR::new(Flavor::select(0).unwrap());
        let w = qr.w as i16;
        qr.get(0, w);
    }

    #[test]
    fn test_module_states() {
        assert!(!Module::Empty.is_taken());
        assert!(Module::Func(Color::Light).is_taken());
        assert!(Module::Format(Color::Light).is_taken());
        assert!(Module::Data(Color::Dark).is_taken());
        assert!(Module::Data(Color::Light).is_data());
        assert!(!Module::Func(Color::Dark).is_data());
        assert_eq!(*Module::Empty, Color::Light);
    }

    #[test]
    fn test_width_per_version() {
        for flavor in crate::common::FLAVORS {
            let qr = QR::new(flavor);
            assert_eq!(qr.width(), 21 + 4 * (*flavor.version as usize - 1));
            assert_eq!(qr.grid().len(), qr.width() * qr.width());
        }
    }
}

// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        for (r, c) in [(3, 3), (3, -4), (-4, 3)] {
            self.draw_finder_pattern_at(r, c);
        }
    }

    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        for i in -3..=3 {
            for j in -3..=3 {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (3 | -3, _) | (_, 3 | -3) => Module::Func(Color::Dark),
                        (2 | -2, _) | (_, 2 | -2) => Module::Func(Color::Light),
                        _ => Module::Func(Color::Dark),
                    },
                );
            }
        }
    }

    fn draw_separators(&mut self) {
        for (r, c) in [(3, 3), (3, -4), (-4, 3)] {
            self.draw_separator_at(r, c);
        }
    }

    // Light ring on the sides of the finder that face the symbol interior
    fn draw_separator_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                if matches!((i, j), (4 | -4, _) | (_, 4 | -4)) {
                    self.set(r + i, c + j, Module::Func(Color::Light));
                }
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        let (off, last) = (6, w - 9);
        self.draw_line(off, 8, off, last);
        self.draw_line(8, off, last, off);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                let m =
                    if j & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
                self.set(r1, j, m);
            }
        } else {
            for i in r1..=r2 {
                let m =
                    if i & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
                self.set(i, c1, m);
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_pattern(&mut self) {
        let center = self.flavor.alignment_center;
        if center == 0 {
            return;
        }
        self.draw_alignment_pattern_at(center, center);
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        for i in -2..=2 {
            for j in -2..=2 {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Func(Color::Dark),
                        _ => Module::Func(Color::Light),
                    },
                )
            }
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub(crate) fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_separators();
        self.draw_alignment_pattern();
        self.draw_timing_pattern();
        self.draw_dark_module();
        self.reserve_format_area();
    }

    // Always dark, sits above the bottom-left separator
    fn draw_dark_module(&mut self) {
        let r = 4 * *self.flavor.version as i16 + 9;
        self.set(r, 8, Module::Func(Color::Dark));
    }
}

#[cfg(test)]
mod all_function_patterns_test {
    use crate::builder::QR;
    use crate::common::Flavor;

    #[test]
    fn test_all_function_patterns() {
        let mut qr = QR::new(Flavor::select(53).unwrap());
        qr.draw_all_function_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffFM............Ffffffff\n\
             fFFFFFfFM............FfFFFFFf\n\
             fFfffFfFM............FfFfffFf\n\
             fFfffFfFM............FfFfffFf\n\
             fFfffFfFM............FfFfffFf\n\
             fFFFFFfFM............FfFFFFFf\n\
             fffffffFfFfFfFfFfFfFfFfffffff\n\
             FFFFFFFFM............FFFFFFFF\n\
             MMMMMMfMM............MMMMMMMM\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f.............fffff....\n\
             FFFFFFFFf...........fFFFf....\n\
             fffffffFM...........fFfFf....\n\
             fFFFFFfFM...........fFFFf....\n\
             fFfffFfFM...........fffff....\n\
             fFfffFfFM....................\n\
             fFfffFfFM....................\n\
             fFFFFFfFM....................\n\
             fffffffFM....................\n"
        );
    }

    #[test]
    fn test_dark_module() {
        for flavor in crate::common::FLAVORS {
            let mut qr = QR::new(flavor);
            qr.draw_all_function_patterns();
            let r = 4 * *flavor.version as i16 + 9;
            assert!(qr.is_dark(r, 8));
            assert_eq!(r, qr.width() as i16 - 8);
        }
    }
}

// Format info
//------------------------------------------------------------------------------

impl QR {
    // Marks format cells as taken, leaving structural cells alone
    fn reserve_format_area(&mut self) {
        let coords = FORMAT_INFO_COORDS_QR_MAIN.iter().chain(FORMAT_INFO_COORDS_QR_SIDE.iter());
        for &(r, c) in coords {
            if !self.get(r, c).is_taken() {
                self.set(r, c, Module::Format(Color::Light));
            }
        }
    }

    pub(crate) fn draw_format_info(&mut self, format_info: u32) {
        self.format_info = format_info;
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_QR_MAIN);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, &FORMAT_INFO_COORDS_QR_SIDE);
    }

    fn draw_number(&mut self, number: u32, bit_len: usize, coords: &[(i16, i16)]) {
        let mut mask = 1 << (bit_len - 1);
        for &(r, c) in coords {
            debug_assert!(
                matches!(self.get(r, c), Module::Format(_)),
                "Format bit outside reserved area: {r} {c}"
            );
            let clr = Color::from(number & mask != 0);
            self.set(r, c, Module::Format(clr));
            mask >>= 1;
        }
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl QR {
    /// Places `payload` bits along the zig-zag walk and fills the leftover free cells
    /// with light remainder bits. Returns the number of payload bits placed, or
    /// `DataTooLong` when the payload outgrows the free cells.
    pub(crate) fn draw_encoding_region(&mut self, payload: BitStream) -> QRResult<usize> {
        let offered = payload.len();
        let mut coords = PlacementCursor::new(self.flavor.version);
        let placed = self.draw_payload(payload, &mut coords);
        if placed < offered {
            debug!(offered, placed, "Payload exceeds encoding region");
            return Err(QRError::DataTooLong);
        }
        let remainder = self.fill_remainder_bits(&mut coords);

        debug!(placed, remainder, "Encoding region drawn");
        debug_assert_eq!(
            remainder,
            self.flavor.version.remainder_bits(),
            "Unexpected remainder bit count"
        );
        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found after placement");
        Ok(placed)
    }

    fn draw_payload(&mut self, payload: BitStream, coords: &mut PlacementCursor) -> usize {
        let mut placed = 0;
        for bit in payload {
            let module = Module::Data(Color::from(bit));
            for (r, c) in coords.by_ref() {
                if !self.get(r, c).is_taken() {
                    self.set(r, c, module);
                    placed += 1;
                    break;
                }
            }
        }
        placed
    }

    fn fill_remainder_bits(&mut self, coords: &mut PlacementCursor) -> usize {
        let mut filled = 0;
        for (r, c) in coords {
            if !self.get(r, c).is_taken() {
                self.set(r, c, Module::Data(Color::Light));
                filled += 1;
            }
        }
        filled
    }

    /// Inverts every data module selected by `pattern`. Applying the same pattern twice
    /// restores the original values.
    pub(crate) fn apply_mask(&mut self, pattern: MaskPattern) {
        self.mask = Some(pattern);
        let mask_fn = pattern.mask_function();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if !mask_fn(r, c) {
                    continue;
                }
                // Free cells only survive an undersized payload; they are masked as data
                match self.get(r, c) {
                    Module::Data(clr) => self.set(r, c, Module::Data(!clr)),
                    Module::Empty => self.set(r, c, Module::Data(Color::Dark)),
                    _ => {}
                }
            }
        }
        trace!(mask = *pattern, "Mask applied");
    }
}
