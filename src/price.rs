use std::fmt;

/// Fixed-point price differential with 2 decimal places, stored as scaled cents.
///
/// Differentials are quoted against the benchmark and may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Price(i64);

impl Price {
    const SCALE: i64 = 100;

    pub fn from_float(value: f64) -> Self {
        Price((value * Self::SCALE as f64).round() as i64)
    }

    pub fn from_cents(value: i64) -> Self {
        Price(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Always sign-explicit: differentials print as "+2.50" / "-4.00"
        let sign = if self.0 < 0 { "-" } else { "+" };
        let abs = self.0.abs();
        let whole = abs / Self::SCALE;
        let frac = abs % Self::SCALE;
        write!(f, "{sign}{whole}.{frac:02}")
    }
}
