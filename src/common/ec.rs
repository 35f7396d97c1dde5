use tracing::trace;

use super::error::{QRError, QRResult};
use super::galois::GaloisTables;

// Reed-Solomon encoder
//------------------------------------------------------------------------------

pub const MIN_EC_LEN: usize = 7;

pub const MAX_EC_LEN: usize = 254;

pub struct ReedSolomonEncoder<'a> {
    gf: &'a GaloisTables,
}

impl<'a> ReedSolomonEncoder<'a> {
    pub fn new(gf: &'a GaloisTables) -> Self {
        Self { gf }
    }

    /// Builds the generator polynomial (x - alpha^0)(x - alpha^1)..(x - alpha^(n-1)) in
    /// exponent form, highest degree first. The result has `ec_count + 1` terms.
    pub fn generator_polynomial(&self, ec_count: usize) -> QRResult<Vec<u8>> {
        if !(MIN_EC_LEN..=MAX_EC_LEN).contains(&ec_count) {
            return Err(QRError::InvalidEcCount);
        }

        let size = ec_count + 1;
        let mut gen_poly = Vec::new();
        gen_poly.try_reserve_exact(size)?;
        gen_poly.resize(size, 0);

        // Starts from x + alpha^0, both coefficients are alpha^0
        for i in 1..size - 1 {
            let root = i as u8;
            gen_poly[i + 1] = GaloisTables::mul_exponents(gen_poly[i], root);
            for j in (1..=i).rev() {
                let shifted = GaloisTables::mul_exponents(gen_poly[j - 1], root);
                let sum = self.gf.exp(gen_poly[j]) ^ self.gf.exp(shifted);
                gen_poly[j] = self.gf.log(sum);
            }
        }

        Ok(gen_poly)
    }

    // Performs polynomial long division with message polynomial(num) and generator
    // polynomial(den) to compute remainder polynomial, the coefficients of which are
    // the ecc
    pub fn encode(&self, message: &[u8], ec_count: usize) -> QRResult<Vec<u8>> {
        let gen_poly = self.generator_polynomial(ec_count)?;
        let gen_len = gen_poly.len();

        let rem_len = gen_len.max(message.len());
        let mut rem = Vec::new();
        rem.try_reserve_exact(rem_len)?;
        rem.extend_from_slice(message);
        rem.resize(rem_len, 0);

        let mut scaled = Vec::new();
        scaled.try_reserve_exact(gen_len)?;
        scaled.resize(gen_len, 0);

        for step in 0..message.len() {
            let lead = rem[0];
            if lead != 0 {
                let log_lead = self.gf.log(lead);
                for (s, &g) in scaled.iter_mut().zip(gen_poly.iter()) {
                    *s = self.gf.exp(GaloisTables::mul_exponents(g, log_lead));
                }
                for (r, &s) in rem.iter_mut().zip(scaled.iter()) {
                    *r ^= s;
                }
            }
            debug_assert_eq!(rem[0], 0, "Lead term survived division step {step}");
            trace!(step, lead, "Reed-Solomon division step");

            // A zero lead uncovered by the shift is consumed as a step of its own on the
            // next pass, without touching the generator
            rem.rotate_left(1);
        }

        rem.truncate(ec_count);
        Ok(rem)
    }
}

#[cfg(test)]
mod ec_tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::ReedSolomonEncoder;
    use crate::common::error::QRError;
    use crate::common::galois::GaloisTables;
    use crate::common::metadata::QR_FIELD_GENERATOR;

    fn ecc(message: &[u8], ec_count: usize) -> Vec<u8> {
        let gf = GaloisTables::build(QR_FIELD_GENERATOR);
        ReedSolomonEncoder::new(&gf).encode(message, ec_count).unwrap()
    }

    #[test]
    fn test_generator_polynomial() {
        let gf = GaloisTables::build(QR_FIELD_GENERATOR);
        let rs = ReedSolomonEncoder::new(&gf);
        assert_eq!(rs.generator_polynomial(7).unwrap(), [0, 87, 229, 146, 149, 238, 102, 21]);
        assert_eq!(
            rs.generator_polynomial(10).unwrap(),
            [0, 251, 67, 46, 61, 118, 70, 64, 94, 32, 45]
        );
    }

    #[test]
    fn test_empty_payload_golden() {
        let msg = [0x40, 0x00, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC];
        let exp = [
            0x6D, 0x99, 0xF8, 0xE5, 0x4A, 0x68, 0x67, 0x8E, 0x79, 0x8A, 0x72, 0xAA, 0xA3, 0x82,
            0x3E, 0xDD, 0x9A,
        ];
        assert_eq!(ecc(&msg, 17), exp);
    }

    #[test]
    fn test_poly_mod_1() {
        let res = ecc(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", 10);
        assert_eq!(&*res, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_poly_mod_2() {
        let res = ecc(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", 13);
        assert_eq!(&*res, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_poly_mod_3() {
        let res = ecc(b"CUF\x86W&U\xc2w2\x06\x12\x06g&", 18);
        assert_eq!(&*res, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_hello_stream() {
        let msg = [0x40, 0x54, 0x84, 0x54, 0xC4, 0xC4, 0xF0, 0xEC, 0x11];
        let exp = [
            0x0B, 0xFF, 0x5F, 0x43, 0xCE, 0xEE, 0x38, 0x28, 0x78, 0xF1, 0x47, 0xF0, 0x6D, 0x24,
            0x44, 0x9A, 0xB8,
        ];
        assert_eq!(ecc(&msg, 17), exp);
    }

    #[test_case(0)]
    #[test_case(6)]
    #[test_case(255)]
    fn test_invalid_ec_count(ec_count: usize) {
        let gf = GaloisTables::build(QR_FIELD_GENERATOR);
        let res = ReedSolomonEncoder::new(&gf).encode(&[0x40, 0x00], ec_count);
        assert_eq!(res, Err(QRError::InvalidEcCount));
    }

    #[test]
    fn test_ec_count_bounds() {
        assert_eq!(ecc(&[0x40, 0x00], 7).len(), 7);
        assert_eq!(ecc(&[0x40, 0x00], 254).len(), 254);
    }

    // Appending the remainder yields a codeword divisible by the generator
    fn is_codeword(gf: &GaloisTables, codeword: &[u8], ec_count: usize) -> bool {
        (0..ec_count as u8).all(|root| {
            let x = gf.exp(root);
            codeword.iter().fold(0u8, |acc, &c| gf.mul(acc, x) ^ c) == 0
        })
    }

    proptest! {
        #[test]
        fn proptest_remainder_is_syndrome_free(
            msg in prop::collection::vec(any::<u8>(), 1..108),
            ec_count in 7usize..=30,
        ) {
            let gf = GaloisTables::build(QR_FIELD_GENERATOR);
            let rs = ReedSolomonEncoder::new(&gf);
            let ecc = rs.encode(&msg, ec_count).unwrap();
            prop_assert_eq!(&ecc, &rs.encode(&msg, ec_count).unwrap());

            let mut codeword = msg.clone();
            codeword.extend_from_slice(&ecc);
            prop_assert!(is_codeword(&gf, &codeword, ec_count));
        }
    }
}
