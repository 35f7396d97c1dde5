// GF(256) lookup tables
//------------------------------------------------------------------------------

pub const GALOIS_FIELD_SIZE: usize = 1 << 8;

/// Exponent and logarithm tables of GF(256) for one field generator.
///
/// The tables are read-only once built. Callers build them once per encode and lend
/// them to every arithmetic routine that needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaloisTables {
    exp: [u8; GALOIS_FIELD_SIZE],
    log: [u8; GALOIS_FIELD_SIZE],
}

impl GaloisTables {
    /// Builds the tables from `generator`, the field polynomial including its x^8 term
    /// (QR codes use 0x11D).
    ///
    /// `log[0]` has no meaning and is left at 0, as is `log[1]` since alpha^255 wraps
    /// back to 1.
    pub fn build(generator: u32) -> Self {
        let mut exp = [0u8; GALOIS_FIELD_SIZE];
        let mut log = [0u8; GALOIS_FIELD_SIZE];

        let mut value: u32 = 1;
        for (e, slot) in exp.iter_mut().enumerate() {
            if e > 0 {
                value <<= 1;
                if value > u8::MAX as u32 {
                    value ^= generator;
                }
            }
            *slot = value as u8;
            log[value as u8 as usize] = e as u8;
        }
        log[0] = 0;
        log[1] = 0;

        Self { exp, log }
    }

    /// Value of alpha^`exponent`.
    pub fn exp(&self, exponent: u8) -> u8 {
        self.exp[exponent as usize]
    }

    /// Exponent `e` such that alpha^e == `value`.
    pub fn log(&self, value: u8) -> u8 {
        self.log[value as usize]
    }

    /// Multiplies two field elements given in exponent form.
    ///
    /// An 8 bit overflow carries an extra 1 so the sum behaves as addition mod 255.
    pub fn mul_exponents(a: u8, b: u8) -> u8 {
        match a.overflowing_add(b) {
            (sum, true) => sum + 1,
            (sum, false) => sum,
        }
    }

    /// Multiplies two field elements given in value form.
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp(Self::mul_exponents(self.log(a), self.log(b)))
    }
}
