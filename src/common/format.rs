use super::error::{QRError, QRResult};
use super::mask::MaskPattern;
use super::metadata::{
    ECLevel, Version, FORMAT_GENERATOR, FORMAT_INFO_BIT_LEN, FORMAT_MASK, MAX_QR_VERSION,
    MIN_LONG_INFO_VERSION, MIN_QR_VERSION, VERSION_GENERATOR, VERSION_INFO_BIT_LEN,
};

// Format & version info
//------------------------------------------------------------------------------

const FORMAT_ERROR_BIT_LEN: usize = 10;

const VERSION_ERROR_BIT_LEN: usize = 12;

/// Computes the protected information string for a symbol.
///
/// Versions below 7 get the 15 bit format info carrying `ec_level` (0=L, 1=M, 2=Q, 3=H)
/// and `mask_id`, masked with [`FORMAT_MASK`]. From version 7 on the 18 bit version info
/// is returned instead; level and mask are still validated but not encoded.
pub fn format_info(version: u8, ec_level: u8, mask_id: u8) -> QRResult<u32> {
    if !(MIN_QR_VERSION..=MAX_QR_VERSION).contains(&version) {
        return Err(QRError::InvalidVersion);
    }
    if ec_level > 3 {
        return Err(QRError::InvalidECLevel);
    }
    if mask_id > 7 {
        return Err(QRError::InvalidMaskingPattern);
    }

    if version < MIN_LONG_INFO_VERSION {
        // Stored level bits are L=01, M=00, Q=11, H=10
        let level = (ec_level ^ 1) as u32;
        let data = (level << 3 | mask_id as u32) << FORMAT_ERROR_BIT_LEN;
        let ecc = poly_mod(data, FORMAT_INFO_BIT_LEN, FORMAT_GENERATOR, FORMAT_ERROR_BIT_LEN);
        Ok((data | ecc) ^ FORMAT_MASK)
    } else {
        let data = (version as u32) << VERSION_ERROR_BIT_LEN;
        let ecc = poly_mod(data, VERSION_INFO_BIT_LEN, VERSION_GENERATOR, VERSION_ERROR_BIT_LEN);
        Ok(data | ecc)
    }
}

pub fn format_info_for(version: Version, ec_level: ECLevel, mask: MaskPattern) -> QRResult<u32> {
    format_info(*version, ec_level as u8, *mask)
}

// Binary polynomial division of `field` (`field_len` bits wide) by `generator`,
// repeated until fewer than `target_len + 1` significant bits remain
fn poly_mod(mut field: u32, mut field_len: usize, generator: u32, target_len: usize) -> u32 {
    let gen_len = bit_len(generator);
    field_len = field_len.min(bit_len(field));
    while field_len > target_len {
        field ^= generator << (field_len - gen_len);
        field_len = bit_len(field);
    }
    field
}

fn bit_len(n: u32) -> usize {
    (u32::BITS - n.leading_zeros()) as usize
}
