//! Number rendering that matches what the browser page showed.
//!
//! Prices use en-US grouping with up to three fraction digits and round on
//! the shortest decimal form of the value. Scores use a fixed number of
//! decimals and round on the exact binary value, so `0.35` is below the tie.
//! Ties round away from zero in both cases, unlike `format!`.

const PRICE_MAX_FRACTION_DIGITS: usize = 3;
const SINGLE_SCORE_DIGITS: usize = 1;
const BATCH_SCORE_DIGITS: usize = 0;
// Enough digits past the cut to tell an exact binary tie from a near one.
const TIE_GUARD_DIGITS: usize = 60;

pub fn format_price(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_owned();
    }

    let fixed = round_half_away(value.abs(), PRICE_MAX_FRACTION_DIGITS);
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 && (integer != "0" || !fraction.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Score text for the single-result panel.
pub fn format_score(score: f64) -> String {
    to_fixed(score, SINGLE_SCORE_DIGITS)
}

/// Score text for batch cards, rounded to a whole number.
pub fn format_whole_score(score: f64) -> String {
    to_fixed(score, BATCH_SCORE_DIGITS)
}

pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    let magnitude = round_exact_half_away(value.abs(), digits);
    if value < 0.0 {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}

fn round_half_away(magnitude: f64, digits: usize) -> String {
    let scale = 10f64.powi(digits as i32);
    let scaled = magnitude * scale;
    if scaled.fract() == 0.5 && scaled / scale == magnitude {
        return format!("{:.*}", digits, (scaled.floor() + 1.0) / scale);
    }
    format!("{:.*}", digits, magnitude)
}

fn round_exact_half_away(magnitude: f64, digits: usize) -> String {
    let exact = format!("{:.*}", digits + TIE_GUARD_DIGITS, magnitude);
    let (kept, rest) = exact.split_at(exact.len() - TIE_GUARD_DIGITS);
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if is_tie {
        increment_last_digit(kept.trim_end_matches('.'))
    } else {
        format!("{:.*}", digits, magnitude)
    }
}

fn increment_last_digit(decimal: &str) -> String {
    let mut bytes = decimal.as_bytes().to_vec();
    let mut carry = true;
    for byte in bytes.iter_mut().rev().filter(|byte| **byte != b'.') {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            carry = false;
            break;
        }
    }
    let incremented = String::from_utf8_lossy(&bytes).into_owned();
    if carry {
        format!("1{incremented}")
    } else {
        incremented
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
