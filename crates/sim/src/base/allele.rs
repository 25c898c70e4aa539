use core::fmt;

use serde::{Deserialize, Serialize};

/// One copy of the beta-globin allele at the single simulated locus.
///
/// `A` is the normal hemoglobin allele and `S` the sickle allele. The
/// discriminants are stable and used when tallying alleles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Allele {
    A = 0,
    S = 1,
}

impl Allele {
    /// Convert from an ASCII byte (`b'A'` or `b'S'`, case-insensitive).
    #[inline]
    pub const fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            b'A' | b'a' => Some(Self::A),
            b'S' | b's' => Some(Self::S),
            _ => None,
        }
    }

    /// Convert to an uppercase `char`.
    #[inline(always)]
    pub const fn to_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::S => 'S',
        }
    }

    /// Return true for the sickle allele.
    #[inline(always)]
    pub const fn is_sickle(self) -> bool {
        matches!(self, Self::S)
    }
}

impl From<Allele> for char {
    #[inline(always)]
    fn from(allele: Allele) -> char {
        allele.to_char()
    }
}

impl fmt::Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
