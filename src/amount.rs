use std::fmt;

use serde::{Deserialize, Deserializer};

/// Fixed-point decimal with 4 decimal places, stored as a scaled integer.
///
/// Monetary values enter as JSON numbers and are converted once at the
/// boundary; all fee arithmetic stays in integer space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(i64);

impl Amount {
    const SCALE: i64 = 10_000;

    /// One cent, in scaled units.
    const CENT: i64 = 100;

    pub const ZERO: Amount = Amount(0);

    pub fn from_float(value: f64) -> Self {
        Amount((value * Self::SCALE as f64).round() as i64)
    }

    pub fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    /// Multiply by a fee rate, rounding half-up to whole cents.
    ///
    /// The rounding happens exactly once, on the full-precision product;
    /// the result always has at most 2 decimal places.
    pub fn apply_rate(self, rate: Rate) -> Amount {
        // scaled 1e-4 times ppm 1e-6: the product is in 1e-10 units,
        // so one cent is 10^8 product units
        let product = self.0 as i128 * rate.as_ppm() as i128;
        let half_cent: i128 = 50_000_000;
        let cents = if product >= 0 {
            (product + half_cent) / 100_000_000
        } else {
            (product - half_cent) / 100_000_000
        };
        Amount((cents * Self::CENT as i128) as i64)
    }

    /// Round half-up (away from zero) to 2 decimal places.
    pub fn round_cents(self) -> Amount {
        let rounded = if self.0 >= 0 {
            (self.0 + Self::CENT / 2) / Self::CENT * Self::CENT
        } else {
            (self.0 - Self::CENT / 2) / Self::CENT * Self::CENT
        };
        Amount(rounded)
    }
}

/// Formats as a fixed 2-decimal string, rounding half-up first.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scaled = self.round_cents().0;
        let sign = if scaled < 0 { "-" } else { "" };
        let abs = scaled.abs();
        let whole = abs / Self::SCALE;
        let cents = (abs % Self::SCALE) / Self::CENT;
        write!(f, "{sign}{whole}.{cents:02}")
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Ok(Amount::from_float(value))
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

/// A fee rate stored as parts per million (0.0003 -> 300 ppm).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rate(u32);

impl Rate {
    pub fn from_float(value: f64) -> Self {
        Rate((value * 1_000_000.0).round() as u32)
    }

    pub const fn from_ppm(ppm: u32) -> Self {
        Rate(ppm)
    }

    pub const fn as_ppm(self) -> u32 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Ok(Rate::from_float(value))
    }
}
