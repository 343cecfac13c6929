// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Square root and exponential, computed entirely in integer space.

use crate::fixed::FixedPoint;
use crate::kind::Kind;
use crate::q32;

/// Beyond `2^EXP_SHIFT_LIMIT` every kind has long since saturated.
const EXP_SHIFT_LIMIT: i64 = 40;

impl<K: Kind> FixedPoint<K> {
    /// Square root, rounded to nearest.
    ///
    /// Signed kinds return `-sqrt(|x|)` for negative input (`sqrt(-0.0625)` is
    /// `-0.25`) instead of rejecting it; callers relying on the mathematical
    /// domain must check the sign themselves.
    pub fn sqrt(self) -> Self {
        let wide = self.wide();
        // sqrt(raw / 2^F) * 2^F == sqrt(raw * 2^F)
        let root = q32::isqrt_round(wide.unsigned_abs() << K::FRAC_BITS);
        // root <= 2^24, so the cast is lossless.
        #[allow(clippy::cast_possible_wrap)]
        let root = root as i128;
        Self::from_wide_saturating(if wide < 0 { -root } else { root })
    }

    /// `e^self`, saturating to `MAX` when the result is not representable.
    ///
    /// Range reduction `x = k·ln2 + r` with `|r| <= ln2/2`, a Taylor series for
    /// `e^r` in Q32.32, then a shift by `k`. Large negative inputs underflow to
    /// zero.
    pub fn exp(self) -> Self {
        if self.is_zero() {
            return Self::ONE;
        }

        let x = q32::widen(self.wide(), K::FRAC_BITS);
        let ln2 = i128::from(q32::LN2);
        // k = round(x / ln2)
        let k = (x + ln2 / 2).div_euclid(ln2);
        if k > i128::from(EXP_SHIFT_LIMIT) {
            return Self::MAX;
        }
        if k < -i128::from(EXP_SHIFT_LIMIT) {
            return Self::ZERO;
        }
        let r = x - k * ln2;

        let one = i128::from(q32::ONE);
        let mut sum = one;
        let mut term = one;
        let mut n = 1_i128;
        loop {
            term = q32::mul(term, r) / n;
            if term == 0 {
                break;
            }
            sum += term;
            n += 1;
        }

        // |k| <= EXP_SHIFT_LIMIT, so the shift amount fits in u32.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let scaled = if k >= 0 {
            sum << (k as u32)
        } else {
            let shift = (-k) as u32;
            (sum + (1_i128 << (shift - 1))) >> shift
        };

        Self::from_wide_saturating(q32::narrow(scaled, K::FRAC_BITS))
    }
}

#[cfg(test)]
mod tests {
    use crate::fixed::{Fix16, UFix16, UFix8};

    #[test]
    fn sqrt_of_perfect_squares_is_exact() {
        assert_eq!(Fix16::from_raw(4 << 16).sqrt(), Fix16::from_raw(2 << 16));
        assert_eq!(Fix16::from_raw(4096).sqrt().raw(), 16_384); // sqrt(1/16) = 1/4
        assert_eq!(UFix8::from_raw(9 << 8).sqrt().raw(), 3 << 8);
        assert_eq!(UFix16::MAX.sqrt().raw(), 16_777_216); // ~256.0
    }

    #[test]
    fn exp_hits_named_constants() {
        assert_eq!(Fix16::ZERO.exp(), Fix16::ONE);
        assert_eq!(Fix16::ONE.exp(), Fix16::E);
        assert_eq!(UFix8::ONE.exp(), UFix8::E);
    }

    #[test]
    fn exp_saturates_and_underflows() {
        assert_eq!(Fix16::from_raw(11 << 16).exp(), Fix16::MAX);
        assert_eq!(Fix16::MAX.exp(), Fix16::MAX);
        assert_eq!(Fix16::MIN.exp(), Fix16::ZERO);
        assert_eq!(UFix8::from_raw(6 << 8).exp(), UFix8::MAX);
    }
}
