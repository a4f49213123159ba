/// Largest number of fractional digits kept after normalisation.
/// 10^18 still fits in an i64.
const MAX_SCALE: u32 = 18;

/// A monetary amount as an exact decimal: `mantissa / 10^scale`.
///
/// Receipt totals and prices arrive as text ("35.35", "9.00"). Parsing
/// them into binary floats makes checks like "is a multiple of 0.25"
/// depend on rounding, so scoring works on this representation instead.
/// Trailing fractional zeros are stripped, so `9.00` is `(9, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    mantissa: i64,
    scale: u32,
}

impl Amount {
    pub const ZERO: Amount = Amount {
        mantissa: 0,
        scale: 0,
    };

    /// Strict parse of `[+-]digits[.digits]` (either side of the point
    /// may be empty, not both). Returns `None` for anything else,
    /// including values that overflow the fixed-point range.
    pub fn parse(raw: &str) -> Option<Amount> {
        let (negative, unsigned) = match raw.as_bytes().first() {
            Some(b'-') => (true, &raw[1..]),
            Some(b'+') => (false, &raw[1..]),
            _ => (false, raw),
        };

        let (whole, frac) = match unsigned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (unsigned, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let frac = frac.trim_end_matches('0');
        let scale = u32::try_from(frac.len()).ok().filter(|s| *s <= MAX_SCALE)?;

        let mut mantissa: i64 = 0;
        for b in whole.bytes().chain(frac.bytes()) {
            mantissa = mantissa
                .checked_mul(10)?
                .checked_add(i64::from(b - b'0'))?;
        }

        Some(Amount {
            mantissa: if negative { -mantissa } else { mantissa },
            scale,
        })
    }

    /// Tolerant parse: malformed input scores as zero.
    pub fn parse_or_zero(raw: &str) -> Amount {
        Amount::parse(raw).unwrap_or_else(|| {
            tracing::debug!(value = raw, "unparseable amount, scoring as zero");
            Amount::ZERO
        })
    }

    fn unit(&self) -> i64 {
        10_i64.pow(self.scale)
    }

    /// True when there are no cents (or smaller units).
    pub fn is_whole(&self) -> bool {
        self.scale == 0
    }

    /// True when the amount is an exact multiple of 0.25, i.e. when
    /// four times the amount is a whole number.
    pub fn is_multiple_of_quarter(&self) -> bool {
        (i128::from(self.mantissa) * 4) % i128::from(self.unit()) == 0
    }

    /// `ceil(self * 0.2)`, computed as `ceil(mantissa / (5 * 10^scale))`.
    pub fn fifth_rounded_up(&self) -> i64 {
        let num = i128::from(self.mantissa);
        let den = i128::from(self.unit()) * 5;

        // Integer division truncates toward zero, which is already the
        // ceiling for negative quotients.
        let q = if num > 0 { (num + den - 1) / den } else { num / den };

        // |q| <= |mantissa| / 5, always in range.
        q as i64
    }
}
