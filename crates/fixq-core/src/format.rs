// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Culture-aware decimal rendering.
//!
//! Every fixed-point value is a dyadic fraction `raw / 2^F`, so its decimal
//! expansion terminates after at most `F` fractional digits. Rendering always
//! starts from that exact expansion; the only rounding ever applied is the one
//! a pattern asks for, and it is half away from zero.
//!
//! Patterns follow the familiar numeric format-string conventions:
//!
//! | pattern      | meaning                                              |
//! |--------------|------------------------------------------------------|
//! | `""`, `G`    | shortest exact form                                  |
//! | `Gn`         | `n` significant digits, scientific when too wide     |
//! | `R`          | exact form (round-trips through `FromStr`)           |
//! | `Fn`         | `n` fractional digits (default 2)                    |
//! | `Nn`         | like `Fn` with digit grouping                        |
//! | `En`         | scientific, `n` mantissa digits (default 6)          |
//! | `Pn`         | value × 100 with the percent symbol (default 2)      |
//! | custom       | `0 # . , %`, quoted literals, `\` escapes, `;` sections |
//!
//! Separators and grouping come from a [`NumberFormat`].

use core::fmt;

use crate::error::FixedError;
use crate::fixed::FixedPoint;
use crate::kind::Kind;

/// Upper bound on an explicit precision specifier (`F99`).
const MAX_PRECISION: usize = 99;

/// The separators and symbols a culture uses to render numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberFormat {
    /// Separates the integer part from the fraction.
    pub decimal_separator: String,
    /// Inserted between digit groups of the integer part.
    pub group_separator: String,
    /// Group widths from the decimal point leftwards; the last width repeats
    /// and a trailing `0` stops grouping.
    pub group_sizes: Vec<u8>,
    /// Prefix for negative values.
    pub negative_sign: String,
    /// Symbol appended by `P` and `%`.
    pub percent_symbol: String,
    /// Text between the number and the percent symbol for `P`.
    pub percent_spacing: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::invariant()
    }
}

impl NumberFormat {
    fn build(
        decimal: &str,
        group: &str,
        sizes: &[u8],
        negative: &str,
        percent_spacing: &str,
    ) -> Self {
        Self {
            decimal_separator: decimal.to_owned(),
            group_separator: group.to_owned(),
            group_sizes: sizes.to_vec(),
            negative_sign: negative.to_owned(),
            percent_symbol: "%".to_owned(),
            percent_spacing: percent_spacing.to_owned(),
        }
    }

    /// The culture-independent format: `.` decimal mark, `,` groups of three.
    pub fn invariant() -> Self {
        Self::build(".", ",", &[3], "-", " ")
    }

    /// Looks up a built-in culture by name (case-insensitive).
    ///
    /// Known names: `""`/`invariant`, `en-US`, `en-GB`, `de-DE`, `fr-FR`,
    /// `es-ES`, `ar-SA`, `hi-IN`.
    pub fn for_culture(name: &str) -> Option<Self> {
        let format = match name.to_ascii_lowercase().as_str() {
            "" | "invariant" => Self::invariant(),
            "en-us" | "en-gb" => Self::build(".", ",", &[3], "-", ""),
            "de-de" => Self::build(",", ".", &[3], "-", "\u{a0}"),
            "fr-fr" => Self::build(",", "\u{202f}", &[3], "-", "\u{a0}"),
            "es-es" => Self::build(",", ".", &[3], "-", "\u{a0}"),
            "ar-sa" => Self::build("\u{66b}", "\u{66c}", &[3], "\u{61c}-", ""),
            "hi-in" => Self::build(".", ",", &[3, 2], "-", ""),
            _ => return None,
        };
        Some(format)
    }

    /// `true` when a group separator follows the digit `pos` places left of
    /// the units digit.
    fn group_boundary(&self, pos: usize) -> bool {
        let Some(&last) = self.group_sizes.last() else {
            return false;
        };
        let mut acc = 0_usize;
        let mut i = 0_usize;
        loop {
            let size = usize::from(self.group_sizes.get(i).copied().unwrap_or(last));
            if size == 0 {
                return false;
            }
            acc += size;
            if acc >= pos {
                return acc == pos;
            }
            i += 1;
        }
    }

    fn push_integer(&self, out: &mut String, digits: &[u8], grouped: bool) {
        let len = digits.len();
        for (i, d) in digits.iter().enumerate() {
            out.push(char::from(b'0' + d));
            let pos = len - 1 - i;
            if grouped && pos > 0 && self.group_boundary(pos) {
                out.push_str(&self.group_separator);
            }
        }
    }
}

/// A non-negative decimal magnitude: `0.d₀d₁d₂… × 10^int_len` with a sign.
///
/// Normalized: no leading or trailing zero digits; zero has no digits.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Digits {
    negative: bool,
    digits: Vec<u8>,
    int_len: isize,
}

impl Digits {
    /// Exact decimal expansion of `wide / 2^frac_bits`.
    fn exact(wide: i128, frac_bits: u32) -> Self {
        let magnitude = wide.unsigned_abs();
        let int = magnitude >> frac_bits;
        let frac = magnitude & ((1_u128 << frac_bits) - 1);
        // frac / 2^F == frac * 5^F / 10^F
        let scaled = frac * 5_u128.pow(frac_bits);
        let text = format!("{int}{scaled:0width$}", width = frac_bits as usize);
        let int_len = text.len() - frac_bits as usize;
        let mut out = Self {
            negative: wide < 0,
            digits: text.bytes().map(|b| b - b'0').collect(),
            int_len: isize::try_from(int_len).unwrap_or(isize::MAX),
        };
        out.normalize();
        out
    }

    fn normalize(&mut self) {
        let lead = self.digits.iter().take_while(|&&d| d == 0).count();
        if lead == self.digits.len() {
            self.digits.clear();
            self.int_len = 0;
            return;
        }
        self.digits.drain(..lead);
        self.int_len -= isize::try_from(lead).unwrap_or(0);
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
    }

    fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Decimal exponent of the leading digit.
    fn exponent(&self) -> isize {
        self.int_len - 1
    }

    /// Multiplies by `10^places`.
    fn shift(&mut self, places: isize) {
        if !self.is_zero() {
            self.int_len += places;
        }
    }

    /// Rounds half away from zero to `places` fractional digits.
    fn round_frac(&mut self, places: isize) {
        let keep = self.int_len + places;
        let Ok(keep) = usize::try_from(keep) else {
            self.digits.clear();
            self.int_len = 0;
            return;
        };
        if keep >= self.digits.len() {
            return;
        }
        let round_up = self.digits[keep] >= 5;
        self.digits.truncate(keep);
        if round_up {
            let mut carry = true;
            for d in self.digits.iter_mut().rev() {
                if *d == 9 {
                    *d = 0;
                } else {
                    *d += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                self.digits.insert(0, 1);
                self.int_len += 1;
            }
        }
        self.normalize();
    }

    /// Rounds half away from zero to `count` significant digits.
    fn round_significant(&mut self, count: usize) {
        let count = isize::try_from(count).unwrap_or(isize::MAX);
        self.round_frac(count - self.int_len);
    }

    fn int_digits(&self) -> Vec<u8> {
        let len = usize::try_from(self.int_len).unwrap_or(0);
        (0..len).map(|i| self.digits.get(i).copied().unwrap_or(0)).collect()
    }

    fn frac_digits(&self) -> Vec<u8> {
        let mut out = Vec::new();
        if self.int_len < 0 {
            out.resize(self.int_len.unsigned_abs(), 0);
        }
        let start = usize::try_from(self.int_len).unwrap_or(0);
        out.extend(self.digits.iter().skip(start));
        out
    }

    fn sign<'a>(&self, culture: &'a NumberFormat) -> &'a str {
        if self.negative && !self.is_zero() {
            &culture.negative_sign
        } else {
            ""
        }
    }
}

fn push_digits(out: &mut String, digits: &[u8]) {
    out.extend(digits.iter().map(|d| char::from(b'0' + d)));
}

/// `[-]int[.frac]` with an exact fraction and at least one integer digit.
fn plain(d: &Digits, min_frac: usize, grouped: bool, culture: &NumberFormat) -> String {
    let mut out = String::from(d.sign(culture));
    let int = d.int_digits();
    if int.is_empty() {
        out.push('0');
    } else {
        culture.push_integer(&mut out, &int, grouped);
    }
    let mut frac = d.frac_digits();
    if frac.len() < min_frac {
        frac.resize(min_frac, 0);
    }
    if !frac.is_empty() {
        out.push_str(&culture.decimal_separator);
        push_digits(&mut out, &frac);
    }
    out
}

fn fixed(mut d: Digits, places: usize, grouped: bool, culture: &NumberFormat) -> String {
    d.round_frac(isize::try_from(places).unwrap_or(isize::MAX));
    plain(&d, places, grouped, culture)
}

fn exponent_suffix(out: &mut String, marker: char, exponent: isize, min_width: usize) {
    out.push(marker);
    out.push(if exponent < 0 { '-' } else { '+' });
    out.push_str(&format!("{:0min_width$}", exponent.unsigned_abs()));
}

fn scientific(mut d: Digits, places: usize, marker: char, culture: &NumberFormat) -> String {
    let mut exponent = 0;
    if !d.is_zero() {
        exponent = d.exponent();
        d.shift(-exponent);
        d.round_frac(isize::try_from(places).unwrap_or(isize::MAX));
        if d.int_len > 1 {
            d.shift(-1);
            exponent += 1;
        }
    }
    let mut out = plain(&d, places, false, culture);
    exponent_suffix(&mut out, marker, exponent, 3);
    out
}

fn general(mut d: Digits, precision: usize, marker: char, culture: &NumberFormat) -> String {
    if precision == 0 {
        return plain(&d, 0, false, culture);
    }
    d.round_significant(precision);
    let exponent = d.exponent();
    let wide = isize::try_from(precision).unwrap_or(isize::MAX);
    if d.is_zero() || (exponent < wide && exponent >= -5) {
        return plain(&d, 0, false, culture);
    }
    d.shift(-exponent);
    let mut out = plain(&d, 0, false, culture);
    exponent_suffix(&mut out, marker, exponent, 2);
    out
}

fn percent(mut d: Digits, places: usize, culture: &NumberFormat) -> String {
    d.shift(2);
    let mut out = fixed(d, places, true, culture);
    out.push_str(&culture.percent_spacing);
    out.push_str(&culture.percent_symbol);
    out
}

/// Parses `X` / `Xnn` into a standard specifier, if the pattern has that shape.
fn standard(pattern: &str) -> Option<(char, Option<usize>)> {
    let mut chars = pattern.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic)?;
    let rest = chars.as_str();
    if rest.is_empty() {
        return Some((letter, None));
    }
    if rest.len() <= 9 && rest.bytes().all(|b| b.is_ascii_digit()) {
        return rest.parse().ok().map(|n| (letter, Some(n)));
    }
    None
}

fn render_standard(
    d: Digits,
    letter: char,
    precision: Option<usize>,
    culture: &NumberFormat,
) -> Result<String, FixedError> {
    let exp_marker = if letter.is_ascii_uppercase() { 'E' } else { 'e' };
    let out = match letter.to_ascii_uppercase() {
        'G' => general(d, precision.unwrap_or(0), exp_marker, culture),
        'R' => general(d, 0, exp_marker, culture),
        'F' => fixed(d, precision.unwrap_or(2), false, culture),
        'N' => fixed(d, precision.unwrap_or(2), true, culture),
        'E' => scientific(d, precision.unwrap_or(6), exp_marker, culture),
        'P' => percent(d, precision.unwrap_or(2), culture),
        _ => return Err(FixedError::InvalidFormat(letter.to_string())),
    };
    Ok(out)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Zero,
    Hash,
    Point,
    Comma,
    Percent,
    Literal(String),
}

impl Token {
    fn is_placeholder(&self) -> bool {
        matches!(self, Self::Zero | Self::Hash)
    }
}

/// Splits a custom pattern into its `;` sections, honoring quotes and escapes.
fn sections(pattern: &str) -> Result<Vec<Vec<Token>>, FixedError> {
    let invalid = || FixedError::InvalidFormat(pattern.to_owned());
    let mut out = vec![Vec::new()];
    let mut chars = pattern.chars();
    let mut seen_point = false;
    while let Some(c) = chars.next() {
        let token = match c {
            ';' => {
                out.push(Vec::new());
                seen_point = false;
                continue;
            }
            '0' => Token::Zero,
            '#' => Token::Hash,
            '.' if seen_point => continue,
            '.' => {
                seen_point = true;
                Token::Point
            }
            ',' => Token::Comma,
            '%' => Token::Percent,
            '\'' | '"' => {
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some(q) if q == c => break,
                        Some(other) => text.push(other),
                        None => return Err(invalid()),
                    }
                }
                Token::Literal(text)
            }
            '\\' => Token::Literal(chars.next().ok_or_else(invalid)?.to_string()),
            other => Token::Literal(other.to_string()),
        };
        if let Some(section) = out.last_mut() {
            section.push(token);
        }
    }
    Ok(out)
}

/// The numeric shape a custom section asks for.
struct Layout {
    point: usize,
    int_slots: usize,
    min_int: usize,
    min_frac: usize,
    max_frac: usize,
    grouped: bool,
    scale_commas: usize,
    percents: usize,
}

impl Layout {
    fn of(tokens: &[Token]) -> Self {
        let point = tokens
            .iter()
            .position(|t| *t == Token::Point)
            .unwrap_or(tokens.len());
        let (int, frac) = tokens.split_at(point);

        let int_slots = int.iter().filter(|t| t.is_placeholder()).count();
        let min_int = int
            .iter()
            .filter(|t| t.is_placeholder())
            .position(|t| *t == Token::Zero)
            .map_or(0, |first| int_slots - first);

        let frac_slots: Vec<&Token> = frac.iter().filter(|t| t.is_placeholder()).collect();
        let min_frac = frac_slots
            .iter()
            .rposition(|t| **t == Token::Zero)
            .map_or(0, |last| last + 1);

        let first_slot = int.iter().position(Token::is_placeholder);
        let last_slot = int.iter().rposition(Token::is_placeholder);
        let grouped = match (first_slot, last_slot) {
            (Some(first), Some(last)) => int[first..last].contains(&Token::Comma),
            _ => false,
        };
        let scale_commas = last_slot.map_or(0, |last| {
            int[last + 1..]
                .iter()
                .rev()
                .take_while(|t| **t == Token::Comma)
                .count()
        });
        let percents = tokens.iter().filter(|t| **t == Token::Percent).count();

        Self {
            point,
            int_slots,
            min_int,
            min_frac,
            max_frac: frac_slots.len(),
            grouped,
            scale_commas,
            percents,
        }
    }
}

/// Renders one custom section. Returns the text and whether the value
/// rounded to zero.
fn render_section(
    tokens: &[Token],
    mut d: Digits,
    signed: bool,
    culture: &NumberFormat,
) -> (String, bool) {
    let layout = Layout::of(tokens);
    let percents = isize::try_from(layout.percents).unwrap_or(0);
    let scales = isize::try_from(layout.scale_commas).unwrap_or(0);
    d.shift(2 * percents - 3 * scales);
    d.round_frac(isize::try_from(layout.max_frac).unwrap_or(isize::MAX));
    let zero = d.is_zero();

    let mut int = d.int_digits();
    if int.len() < layout.min_int {
        let mut padded = vec![0; layout.min_int - int.len()];
        padded.extend(int);
        int = padded;
    }
    let mut frac = d.frac_digits();
    if frac.len() < layout.min_frac {
        frac.resize(layout.min_frac, 0);
    }

    let mut out = String::new();
    if signed {
        out.push_str(d.sign(culture));
    }

    let push_int_digit = |out: &mut String, pos: usize| {
        out.push(char::from(b'0' + int[int.len() - 1 - pos]));
        if layout.grouped && pos > 0 && culture.group_boundary(pos) {
            out.push_str(&culture.group_separator);
        }
    };

    let mut slot = 0_usize;
    let mut frac_slot = 0_usize;
    for (i, token) in tokens.iter().enumerate() {
        let in_int = i < layout.point;
        match token {
            Token::Zero | Token::Hash if in_int => {
                let pos = layout.int_slots - 1 - slot;
                if slot == 0 {
                    for p in (pos..int.len()).rev() {
                        push_int_digit(&mut out, p);
                    }
                } else if pos < int.len() {
                    push_int_digit(&mut out, pos);
                }
                slot += 1;
            }
            Token::Zero | Token::Hash => {
                if let Some(digit) = frac.get(frac_slot) {
                    out.push(char::from(b'0' + digit));
                }
                frac_slot += 1;
            }
            Token::Point => {
                if layout.int_slots == 0 {
                    culture.push_integer(&mut out, &int, layout.grouped);
                }
                if !frac.is_empty() {
                    out.push_str(&culture.decimal_separator);
                }
            }
            Token::Comma => {}
            Token::Percent => out.push_str(&culture.percent_symbol),
            Token::Literal(text) => out.push_str(text),
        }
    }
    (out, zero)
}

fn render_custom(pattern: &str, d: Digits, culture: &NumberFormat) -> Result<String, FixedError> {
    let sections = sections(pattern)?;
    let zero_section = sections.get(2);
    let negative_section = sections.get(1).filter(|s| !s.is_empty());

    if d.is_zero() {
        if let Some(tokens) = zero_section {
            return Ok(render_section(tokens, d, false, culture).0);
        }
    }

    let (tokens, signed) = match negative_section {
        Some(tokens) if d.negative => (tokens, false),
        _ => (&sections[0], true),
    };
    let (out, rounded_zero) = render_section(tokens, d.clone(), signed, culture);
    match zero_section {
        Some(zero) if rounded_zero => Ok(render_section(zero, d, false, culture).0),
        _ => Ok(out),
    }
}

fn render(d: Digits, pattern: &str, culture: &NumberFormat) -> Result<String, FixedError> {
    if pattern.is_empty() {
        return Ok(general(d, 0, 'E', culture));
    }
    match standard(pattern) {
        Some((_, Some(n))) if n > MAX_PRECISION => {
            Err(FixedError::InvalidFormat(pattern.to_owned()))
        }
        Some((letter, precision)) => render_standard(d, letter, precision, culture),
        None => render_custom(pattern, d, culture),
    }
}

impl<K: Kind> FixedPoint<K> {
    fn digits(self) -> Digits {
        Digits::exact(self.wide(), K::FRAC_BITS)
    }

    /// Formats with `pattern` using the invariant culture.
    ///
    /// ```
    /// use fixq_core::Fix16;
    /// let x = Fix16::from_num(1234.5_f64);
    /// assert_eq!(x.format("N1").unwrap(), "1,234.5");
    /// ```
    pub fn format(self, pattern: &str) -> Result<String, FixedError> {
        self.format_with(pattern, &NumberFormat::invariant())
    }

    /// Formats with `pattern` using `culture`'s separators and symbols.
    pub fn format_with(self, pattern: &str, culture: &NumberFormat) -> Result<String, FixedError> {
        render(self.digits(), pattern, culture)
    }
}

/// Exact shortest form with the invariant culture; `{:.N}` rounds to `N`
/// fractional digits.
impl<K: Kind> fmt::Display for FixedPoint<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let invariant = NumberFormat::invariant();
        let text = match f.precision() {
            Some(places) => fixed(self.digits(), places, false, &invariant),
            None => general(self.digits(), 0, 'E', &invariant),
        };
        f.pad(&text)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn exact_expansion_of_one_ulp() {
        let d = Digits::exact(1, 16);
        assert_eq!(d.int_len, -4);
        assert_eq!(d.frac_digits().len(), 16);
        let d = Digits::exact(-(5 << 15), 16);
        assert!(d.negative);
        assert_eq!(d.int_digits(), vec![2]);
        assert_eq!(d.frac_digits(), vec![5]);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        let mut d = Digits::exact(-(5 << 15), 16); // -2.5
        d.round_frac(0);
        assert_eq!(d.int_digits(), vec![3]);
        let mut d = Digits::exact(0xFFFF, 16); // 0.9999847...
        d.round_frac(2);
        assert_eq!(d.int_digits(), vec![1]);
        assert!(d.frac_digits().is_empty());
    }

    #[test]
    fn group_boundaries_repeat_last_size() {
        let indian = NumberFormat::for_culture("hi-IN").unwrap();
        let hits: Vec<usize> = (1..10).filter(|&p| indian.group_boundary(p)).collect();
        assert_eq!(hits, vec![3, 5, 7, 9]);
        let western = NumberFormat::invariant();
        let hits: Vec<usize> = (1..10).filter(|&p| western.group_boundary(p)).collect();
        assert_eq!(hits, vec![3, 6, 9]);
    }

    #[test]
    fn standard_specifier_shapes() {
        assert_eq!(standard("F"), Some(('F', None)));
        assert_eq!(standard("n3"), Some(('n', Some(3))));
        assert_eq!(standard("#,0"), None);
        assert_eq!(standard("F123"), Some(('F', Some(123))));
        assert_eq!(standard("F1x"), None);
    }

    #[test]
    fn custom_layout_analysis() {
        let tokens = sections("#,0.00##").unwrap().remove(0);
        let layout = Layout::of(&tokens);
        assert!(layout.grouped);
        assert_eq!(layout.min_int, 1);
        assert_eq!((layout.min_frac, layout.max_frac), (2, 4));
        assert_eq!(layout.scale_commas, 0);

        let tokens = sections("0,,").unwrap().remove(0);
        assert_eq!(Layout::of(&tokens).scale_commas, 2);
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        assert!(matches!(sections("0 'abc"), Err(FixedError::InvalidFormat(_))));
        assert!(matches!(sections("0\\"), Err(FixedError::InvalidFormat(_))));
    }
}
