//! Culture-invariant number parsing
//!
//! Accepts the permissive en-US "any" number style: surrounding whitespace, a
//! leading or trailing sign, parentheses for negatives, a `$` currency symbol,
//! `,` group separators in the integer part, a `.` decimal point and an
//! exponent.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Exponents beyond this are rejected for exact (integer and decimal) targets
const MAX_EXACT_EXPONENT: i32 = 64;

/// A number split into its parts, digits without separators
#[derive(Debug, Clone, PartialEq, Eq)]
struct Scanned {
    negative: bool,
    int_digits: String,
    frac_digits: String,
    exponent: i32,
}

impl Scanned {
    /// Scientific notation understood by the std float parsers
    fn to_scientific(&self) -> String {
        format!(
            "{}{}.{}e{}",
            if self.negative { "-" } else { "" },
            if self.int_digits.is_empty() { "0" } else { &self.int_digits },
            if self.frac_digits.is_empty() { "0" } else { &self.frac_digits },
            self.exponent
        )
    }

    /// Positional notation with the exponent applied, e.g. `1.5e2` -> `150`
    fn to_positional(&self) -> Option<(String, String)> {
        let is_zero = self
            .int_digits
            .bytes()
            .chain(self.frac_digits.bytes())
            .all(|b| b == b'0');
        if is_zero {
            return Some(("0".into(), String::new()));
        }
        if self.exponent.abs() > MAX_EXACT_EXPONENT {
            return None;
        }

        let digits = format!("{}{}", self.int_digits, self.frac_digits);
        let point = self.int_digits.len() as i64 + self.exponent as i64;

        let (int_part, frac_part) = if point <= 0 {
            (String::new(), "0".repeat((-point) as usize) + &digits)
        } else if point as usize >= digits.len() {
            (digits.clone() + &"0".repeat(point as usize - digits.len()), String::new())
        } else {
            let (i, f) = digits.split_at(point as usize);
            (i.to_string(), f.to_string())
        };

        let int_part = int_part.trim_start_matches('0');
        let frac_part = frac_part.trim_end_matches('0');
        Some((
            if int_part.is_empty() { "0".into() } else { int_part.into() },
            frac_part.into(),
        ))
    }
}

fn scan(text: &str) -> Option<Scanned> {
    let mut s = text.trim();
    let mut negative = false;
    let mut signed = false;
    let mut currency = false;

    let parenthesized = s.starts_with('(') && s.ends_with(')') && s.len() >= 2;
    if parenthesized {
        negative = true;
        s = s[1..s.len() - 1].trim();
    }

    // Leading currency symbol and sign, in either order
    loop {
        if !currency && s.starts_with('$') {
            currency = true;
            s = &s[1..];
        } else if !signed && (s.starts_with('-') || s.starts_with('+')) {
            signed = true;
            negative ^= s.starts_with('-');
            s = &s[1..];
        } else {
            break;
        }
    }

    // Trailing sign and currency symbol, in either order
    loop {
        if !currency && s.ends_with('$') {
            currency = true;
            s = &s[..s.len() - 1];
        } else if !signed && (s.ends_with('-') || s.ends_with('+')) {
            signed = true;
            negative ^= s.ends_with('-');
            s = &s[..s.len() - 1];
        } else {
            break;
        }
    }

    if parenthesized && signed {
        return None;
    }

    let bytes = s.as_bytes();
    let mut pos = 0;
    let mut int_digits = String::new();
    let mut frac_digits = String::new();

    while pos < bytes.len() {
        match bytes[pos] {
            b @ b'0'..=b'9' => int_digits.push(b as char),
            b',' if !int_digits.is_empty() => {}
            _ => break,
        }
        pos += 1;
    }

    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        while let Some(b @ b'0'..=b'9') = bytes.get(pos).copied() {
            frac_digits.push(b as char);
            pos += 1;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut exponent: i32 = 0;
    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        pos += 1;
        let exp_negative = match bytes.get(pos) {
            Some(b'-') => {
                pos += 1;
                true
            }
            Some(b'+') => {
                pos += 1;
                false
            }
            _ => false,
        };
        let start = pos;
        while matches!(bytes.get(pos), Some(b'0'..=b'9')) {
            pos += 1;
        }
        if pos == start {
            return None;
        }
        // Saturate: anything this large overflows every target anyway
        let magnitude: i32 = s[start..pos].parse().unwrap_or(i32::MAX / 2);
        exponent = if exp_negative { -magnitude } else { magnitude };
    }

    if pos != bytes.len() {
        return None;
    }

    Some(Scanned {
        negative,
        int_digits,
        frac_digits,
        exponent,
    })
}

/// Parse an integer; a fractional part is accepted only when it is zero
pub fn parse_integer<T: TryFrom<i64>>(text: &str) -> Option<T> {
    let scanned = scan(text)?;
    let (int_part, frac_part) = scanned.to_positional()?;
    if !frac_part.is_empty() {
        return None;
    }

    let magnitude: i128 = int_part.parse().ok()?;
    let value = if scanned.negative { -magnitude } else { magnitude };
    T::try_from(i64::try_from(value).ok()?).ok()
}

/// Parse an `f64`; also accepts `NaN` and `Infinity`
pub fn parse_f64(text: &str) -> Option<f64> {
    if let Some(special) = parse_special(text) {
        return Some(special);
    }
    scan(text)?.to_scientific().parse().ok()
}

/// Parse an `f32`; also accepts `NaN` and `Infinity`
pub fn parse_f32(text: &str) -> Option<f32> {
    if let Some(special) = parse_special(text) {
        return Some(special as f32);
    }
    scan(text)?.to_scientific().parse().ok()
}

/// Parse a [`Decimal`]
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let scanned = scan(text)?;
    let (int_part, frac_part) = scanned.to_positional()?;
    let literal = format!(
        "{}{}{}{}",
        if scanned.negative { "-" } else { "" },
        int_part,
        if frac_part.is_empty() { "" } else { "." },
        frac_part
    );
    Decimal::from_str(&literal).ok()
}

fn parse_special(text: &str) -> Option<f64> {
    let s = text.trim();
    if s.eq_ignore_ascii_case("nan") {
        Some(f64::NAN)
    } else if s.eq_ignore_ascii_case("infinity") || s.eq_ignore_ascii_case("+infinity") {
        Some(f64::INFINITY)
    } else if s.eq_ignore_ascii_case("-infinity") {
        Some(f64::NEG_INFINITY)
    } else {
        None
    }
}
