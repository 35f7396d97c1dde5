mod qr;
mod render;

pub use qr::{Module, QR};
pub use render::{QUIET_ZONE_WIDTH, SVG_MODULE_SIZE};

use tracing::debug;

use crate::common::{
    codec::{encode_message, MessageData},
    ec::ReedSolomonEncoder,
    error::QRResult,
    format::format_info_for,
    galois::GaloisTables,
    mask::MaskPattern,
    metadata::{Flavor, QR_FIELD_GENERATOR},
    BitStream,
};

pub struct QRBuilder<'a> {
    data: &'a [u8],
    mask: Option<MaskPattern>,
}

/// Data and error correction codewords of one encode, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codewords {
    pub flavor: Flavor,
    pub data: Vec<u8>,
    pub ecc: Vec<u8>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    /// Overrides the mask pattern. Without it pattern 6 is used; no penalty based
    /// selection takes place.
    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        match self.mask {
            Some(m) => format!("{{ Data len: {}, Mask: {} }}", self.data.len(), *m),
            None => format!("{{ Data len: {}, Mask: Default }}", self.data.len()),
        }
    }
}


impl QRBuilder<'_> {
    /// Selects the flavor and computes the data and error correction codewords.
    pub fn codewords(&self) -> QRResult<Codewords> {
        let flavor = Flavor::select(self.data.len())?;
        debug!(
            data_len = self.data.len(),
            version = *flavor.version,
            ec_level = %flavor.ec_level,
            ec_codewords = flavor.ec_codewords,
            "Flavor selected"
        );

        let msg = MessageData::new(self.data)?;
        let stream = encode_message(&msg, &flavor)?;

        let gf = GaloisTables::build(QR_FIELD_GENERATOR);
        let ecc = ReedSolomonEncoder::new(&gf).encode(stream.data(), flavor.ec_codewords)?;
        debug!(ecc_len = ecc.len(), "Error correction codewords computed");

        Ok(Codewords { flavor, data: stream.data().to_vec(), ecc })
    }

    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}", self.metadata());

        let Codewords { flavor, data, ecc } = self.codewords()?;

        // Everything fallible runs before the matrix is touched
        let mask = self.mask.unwrap_or_default();
        let format_info = format_info_for(flavor.version, flavor.ec_level, mask)?;

        let mut payload = BitStream::new(flavor.total_codewords() << 3)?;
        payload.extend(&data);
        payload.extend(&ecc);

        let mut qr = QR::new(flavor);
        qr.draw_all_function_patterns();
        qr.draw_encoding_region(payload)?;
        qr.apply_mask(mask);
        qr.draw_format_info(format_info);

        debug!(
            dark_modules = qr.count_dark_modules(),
            total_modules = qr.width() * qr.width(),
            "QR generated {}",
            qr.metadata()
        );

        Ok(qr)
    }
}
