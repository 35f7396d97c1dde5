use std::fmt::{Display, Formatter};
use std::ops::{Deref, Not};

use super::error::{QRError, QRResult};
use super::mask::MaskPattern;

// Metadata
//------------------------------------------------------------------------------

/// Summary of a finished symbol, handed to renderers alongside the grid.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Metadata {
    version: Version,
    ec_level: ECLevel,
    ec_codewords: usize,
    mask: MaskPattern,
    format_info: u32,
}

impl Metadata {
    pub fn new(
        version: Version,
        ec_level: ECLevel,
        ec_codewords: usize,
        mask: MaskPattern,
        format_info: u32,
    ) -> Self {
        Self { version, ec_level, ec_codewords, mask, format_info }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn ec_codewords(&self) -> usize {
        self.ec_codewords
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn format_info(&self) -> u32 {
        self.format_info
    }
}

impl Display for Metadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ Version: {}, Ec level: {}, Ec codewords: {}, Mask: {}, Format info: {:015b} }}",
            *self.version, self.ec_level, self.ec_codewords, *self.mask, self.format_info
        )
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct Version(u8);

impl Version {
    pub fn new(version: u8) -> QRResult<Self> {
        if !(MIN_QR_VERSION..=MAX_QR_VERSION).contains(&version) {
            return Err(QRError::InvalidVersion);
        }
        Ok(Self(version))
    }

    pub const fn width(self) -> usize {
        21 + 4 * (self.0 as usize - 1)
    }

    /// Light modules left over once all codewords are placed, for the versions in
    /// [`FLAVORS`].
    pub(crate) const fn remainder_bits(self) -> usize {
        match self.0 {
            2..=5 => 7,
            _ => 0,
        }
    }
}

impl Deref for Version {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl TryFrom<u8> for ECLevel {
    type Error = QRError;
    fn try_from(level: u8) -> QRResult<Self> {
        match level {
            0 => Ok(Self::L),
            1 => Ok(Self::M),
            2 => Ok(Self::Q),
            3 => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel),
        }
    }
}

impl Display for ECLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Self::L => 'L',
            Self::M => 'M',
            Self::Q => 'Q',
            Self::H => 'H',
        };
        write!(f, "{c}")
    }
}

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn select<T>(&self, dark: T, light: T) -> T {
        match self {
            Self::Dark => dark,
            Self::Light => light,
        }
    }
}

impl From<bool> for Color {
    fn from(bit: bool) -> Self {
        if bit {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// Flavor
//------------------------------------------------------------------------------

/// One row of the capacity table: everything that varies with payload size.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Flavor {
    pub capacity: usize,
    pub version: Version,
    pub ec_level: ECLevel,
    pub ec_codewords: usize,
    /// Row and column of the single alignment pattern center, 0 when absent.
    pub alignment_center: i16,
}

impl Flavor {
    const fn new(
        capacity: usize,
        version: u8,
        ec_level: ECLevel,
        ec_codewords: usize,
        alignment_center: i16,
    ) -> Self {
        Self { capacity, version: Version(version), ec_level, ec_codewords, alignment_center }
    }

    /// Picks the smallest flavor that fits `data_len` payload bytes.
    pub fn select(data_len: usize) -> QRResult<Self> {
        FLAVORS.iter().find(|f| f.capacity >= data_len).copied().ok_or(QRError::DataTooLong)
    }

    /// Length of the data codeword stream before error correction.
    pub const fn data_codewords(&self) -> usize {
        self.capacity + 2
    }

    pub const fn total_codewords(&self) -> usize {
        self.data_codewords() + self.ec_codewords
    }
}

pub static FLAVORS: [Flavor; 11] = [
    Flavor::new(7, 1, ECLevel::H, 17, 0),
    Flavor::new(11, 1, ECLevel::Q, 13, 0),
    Flavor::new(14, 1, ECLevel::M, 10, 0),
    Flavor::new(17, 1, ECLevel::L, 7, 0),
    Flavor::new(20, 2, ECLevel::Q, 22, 18),
    Flavor::new(26, 2, ECLevel::M, 16, 18),
    Flavor::new(32, 2, ECLevel::L, 10, 18),
    Flavor::new(42, 3, ECLevel::M, 26, 22),
    Flavor::new(53, 3, ECLevel::L, 15, 22),
    Flavor::new(78, 4, ECLevel::L, 20, 26),
    Flavor::new(106, 5, ECLevel::L, 26, 30),
];


// Global constants
//------------------------------------------------------------------------------

pub const MAX_DATA_LEN: usize = 106;

pub const MIN_QR_VERSION: u8 = 1;

pub const MAX_QR_VERSION: u8 = 40;

pub const MIN_LONG_INFO_VERSION: u8 = 7;

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const VERSION_INFO_BIT_LEN: usize = 18;

pub const FORMAT_MASK: u32 = 0b101010000010010;

pub const FORMAT_GENERATOR: u32 = 0b10100110111;

pub const VERSION_GENERATOR: u32 = 0b1111100100101;

pub const QR_FIELD_GENERATOR: u32 = 0x11D;

// Format info coordinates, most significant bit first. Negative indices count from the
// bottom/right edge.
pub static FORMAT_INFO_COORDS_QR_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

pub static FORMAT_INFO_COORDS_QR_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];
