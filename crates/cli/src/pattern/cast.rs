// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lenient numeric casts for captured text.
//!
//! Casts read the longest numeric prefix and fall back to zero when there is
//! none, so a constraint never fails to evaluate. Note that this also means
//! a non-numeric capture compares equal to a `0` constraint value.

/// Cast captured text to an integer.
///
/// Understands an optional sign, `0x` (hex), `0b` (binary), `0o`/`0d` and
/// bare leading-zero (octal) prefixes, and single `_` digit separators.
pub fn cast_int(text: &str) -> i64 {
    scan_int(text).0
}

/// Cast captured text to a float.
///
/// Reads an optional sign, digits, an optional fraction and an optional
/// exponent. The integer digits may be omitted when a fraction follows.
pub fn cast_float(text: &str) -> f64 {
    let bytes = text.as_bytes();
    let mut literal = String::new();
    let mut pos = 0;

    if let Some(&sign) = bytes.first()
        && (sign == b'-' || sign == b'+')
    {
        literal.push(sign as char);
        pos += 1;
    }

    let integer_end = scan_digits(bytes, pos, 10, &mut literal);
    let has_integer = integer_end > pos;
    pos = integer_end;

    let mut has_fraction = false;
    if bytes.get(pos) == Some(&b'.') {
        let mut fraction = String::from(".");
        let end = scan_digits(bytes, pos + 1, 10, &mut fraction);
        if end > pos + 1 {
            if !has_integer {
                literal.push('0');
            }
            literal.push_str(&fraction);
            pos = end;
            has_fraction = true;
        }
    }
    if !has_integer && !has_fraction {
        return 0.0;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exponent = String::from("e");
        let mut start = pos + 1;
        if let Some(&sign) = bytes.get(start)
            && (sign == b'-' || sign == b'+')
        {
            exponent.push(sign as char);
            start += 1;
        }
        if scan_digits(bytes, start, 10, &mut exponent) > start {
            literal.push_str(&exponent);
        }
    }

    literal.parse().unwrap_or(0.0)
}

/// True if the whole text is an integer literal `cast_int` reads completely.
pub fn is_int_literal(text: &str) -> bool {
    let (_, consumed) = scan_int(text);
    consumed > 0 && consumed == text.len()
}

/// Read an integer prefix, returning its value and the bytes consumed.
fn scan_int(text: &str) -> (i64, usize) {
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut negative = false;

    if let Some(&sign) = bytes.first()
        && (sign == b'-' || sign == b'+')
    {
        negative = sign == b'-';
        pos += 1;
    }

    let (radix, digits_start) = match (bytes.get(pos), bytes.get(pos + 1)) {
        (Some(b'0'), Some(b'x' | b'X')) => (16, pos + 2),
        (Some(b'0'), Some(b'b' | b'B')) => (2, pos + 2),
        (Some(b'0'), Some(b'o' | b'O' | b'd' | b'D')) => (8, pos + 2),
        (Some(b'0'), Some(b'0'..=b'7')) => (8, pos + 1),
        _ => (10, pos),
    };

    let mut digits = String::new();
    let end = scan_digits(bytes, digits_start, radix, &mut digits);
    if digits.is_empty() {
        // A lone "0" before an unusable prefix still counts as zero.
        return if bytes.get(pos) == Some(&b'0') {
            (0, pos + 1)
        } else {
            (0, 0)
        };
    }

    let magnitude = digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0i128, |acc, d| {
            acc.saturating_mul(i128::from(radix))
                .saturating_add(i128::from(d))
        });

    let signed = if negative { -magnitude } else { magnitude };
    let value = signed.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;
    (value, end)
}

/// Collect digits of `radix` starting at `start`, allowing single `_`
/// separators between digits. Returns the position after the last digit.
fn scan_digits(bytes: &[u8], start: usize, radix: u32, out: &mut String) -> usize {
    let mut pos = start;
    let mut end = start;
    while let Some(&b) = bytes.get(pos) {
        if (b as char).is_digit(radix) {
            out.push(b as char);
            pos += 1;
            end = pos;
        } else if b == b'_'
            && end == pos
            && pos > start
            && bytes.get(pos + 1).is_some_and(|n| (*n as char).is_digit(radix))
        {
            pos += 1;
        } else {
            break;
        }
    }
    end
}

#[cfg(test)]
#[path = "cast_tests.rs"]
mod tests;
