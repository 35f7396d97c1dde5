//! # qrbyte
//!
//! A small QR code encoder for short byte payloads (up to 106 bytes), with Reed-Solomon
//! error correction over GF(256). Payloads are written in byte mode into one of eleven
//! fixed symbol flavors spanning versions 1 to 5.
//!
//! ## Quick Start
//!
//! ```rust
//! use qrbyte::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // The smallest flavor that fits the data is chosen automatically
//! let qr = QRBuilder::new(b"Hello, World!").build()?;
//!
//! println!("{}", qr.to_str());
//! let svg = qr.to_svg();
//! let img = qr.to_image(4); // 4x scale factor
//! # assert!(svg.contains("<rect"));
//! # assert_eq!(img.width(), (qr.width() as u32 + 8) * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### Overriding the mask
//!
//! ```rust
//! use qrbyte::{MaskPattern, QRBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new(b"Hello, World!")
//!     .mask(MaskPattern::new(3)?) // If not provided, pattern 6 is applied
//!     .build()?;
//! assert_eq!(*qr.metadata().mask(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Flavors
//!
//! | Capacity | Version | EC level | EC codewords |
//! |---------:|--------:|:--------:|-------------:|
//! | 7        | 1       | H        | 17           |
//! | 11       | 1       | Q        | 13           |
//! | 14       | 1       | M        | 10           |
//! | 17       | 1       | L        | 7            |
//! | 20       | 2       | Q        | 22           |
//! | 26       | 2       | M        | 16           |
//! | 32       | 2       | L        | 10           |
//! | 42       | 3       | M        | 26           |
//! | 53       | 3       | L        | 15           |
//! | 78       | 4       | L        | 20           |
//! | 106      | 5       | L        | 26           |
//!
//! Every flavor holds a single error correction block, so the codewords are laid out
//! without interleaving.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{Codewords, Module, QRBuilder, QR, QUIET_ZONE_WIDTH, SVG_MODULE_SIZE};
pub use common::bitstream::BitStream;
pub use common::codec::{encode_message, MessageData, Mode};
pub use common::ec::{ReedSolomonEncoder, MAX_EC_LEN, MIN_EC_LEN};
pub use common::error::{QRError, QRResult};
pub use common::format::{format_info, format_info_for};
pub use common::galois::GaloisTables;
pub use common::iter::PlacementCursor;
pub use common::mask::MaskPattern;
pub use common::metadata::{
    Color, ECLevel, Flavor, Metadata, Version, FLAVORS, MAX_DATA_LEN, QR_FIELD_GENERATOR,
};
