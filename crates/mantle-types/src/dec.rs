use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Number of fractional decimal digits carried by [`Dec`].
pub const PRECISION: u32 = 18;

const SCALE: i128 = 10i128.pow(PRECISION);

/// Fixed-point decimal with 18 fractional digits.
///
/// Backed by an `i128` holding the value scaled by `10^18`, so every
/// balance operation is exact and reproducible across machines. The
/// canonical string form drops trailing fractional zeros (`"1.5"`, `"10"`).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dec(i128);

impl Dec {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(SCALE);

    /// Create from a whole number.
    pub const fn from_int(value: i64) -> Self {
        Self(value as i128 * SCALE)
    }

    /// Create from the raw scaled representation.
    pub const fn from_raw(raw: i128) -> Self {
        Self(raw)
    }

    /// The raw scaled representation.
    pub const fn raw(&self) -> i128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl From<i64> for Dec {
    fn from(value: i64) -> Self {
        Self::from_int(value)
    }
}

impl FromStr for Dec {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypeError::format(format!("invalid decimal: {s:?}"));

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, "")) if !int_part.is_empty() => return Err(invalid()),
            Some(parts) => parts,
            None => (digits, ""),
        };

        if int_part.is_empty()
            || !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
            || frac_part.len() > PRECISION as usize
        {
            return Err(invalid());
        }

        let int: i128 = int_part.parse().map_err(|_| invalid())?;
        let frac: i128 = if frac_part.is_empty() {
            0
        } else {
            let digits: i128 = frac_part.parse().map_err(|_| invalid())?;
            digits * 10i128.pow(PRECISION - frac_part.len() as u32)
        };

        let raw = int
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(frac))
            .ok_or(TypeError::Overflow)?;

        Ok(Self(if negative { -raw } else { raw }))
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = SCALE as u128;
        let (int, frac) = (abs / scale, abs % scale);

        if frac == 0 {
            write!(f, "{sign}{int}")
        } else {
            let frac = format!("{frac:018}");
            write!(f, "{sign}{int}.{}", frac.trim_end_matches('0'))
        }
    }
}

impl fmt::Debug for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dec({self})")
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
