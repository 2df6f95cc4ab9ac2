//! Duration-spec parsing (`0h50m`, `1.5h`, `90s`).
//!
//! A spec is an optional sign followed by one or more `<number><unit>`
//! pairs. Units are `h`, `m`, `s`, `ms`, `us` (or `µs`/`μs`) and `ns`;
//! numbers may carry a fraction. The bare literal `0` is also accepted.
//! Spans beyond the `i64` nanosecond range are rejected.

use crate::{Error, Result};
use chrono::TimeDelta;

const NANOS_PER_SECOND: f64 = 1e9;

/// Nanoseconds per unit suffix
fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(60 * 60 * 1_000_000_000),
        _ => None,
    }
}

/// Parse a duration spec into a `TimeDelta`
///
/// Zero and negative spans parse successfully; record parsers decide
/// whether they are acceptable.
pub fn parse_duration(spec: &str) -> Result<TimeDelta> {
    let invalid = |reason: &str| Error::InvalidDuration(format!("{:?}: {}", spec, reason));

    let (negative, body) = match spec.as_bytes().first() {
        Some(b'-') => (true, &spec[1..]),
        Some(b'+') => (false, &spec[1..]),
        _ => (false, spec),
    };

    if body == "0" {
        return Ok(TimeDelta::zero());
    }
    if body.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: u64 = 0;
    let mut rest = body;

    while !rest.is_empty() {
        let int_len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (int_digits, tail) = rest.split_at(int_len);

        let (frac_digits, tail) = match tail.strip_prefix('.') {
            Some(after_dot) => {
                let frac_len = after_dot
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(after_dot.len());
                after_dot.split_at(frac_len)
            }
            None => ("", tail),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(invalid("expected a number"));
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let scale = match unit {
            "" => return Err(invalid("missing unit")),
            _ => unit_nanos(unit).ok_or_else(|| invalid("unknown unit"))?,
        };

        let whole = int_digits.bytes().try_fold(0u64, |acc, b| {
            acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
        });
        let mut value = whole
            .and_then(|v| v.checked_mul(scale))
            .ok_or_else(|| invalid("duration out of range"))?;

        // Digits past u64 precision cannot change the result
        let mut fraction: u64 = 0;
        let mut divisor: f64 = 1.0;
        for b in frac_digits.bytes() {
            match fraction
                .checked_mul(10)
                .and_then(|f| f.checked_add(u64::from(b - b'0')))
            {
                Some(f) => {
                    fraction = f;
                    divisor *= 10.0;
                }
                None => break,
            }
        }
        if fraction > 0 {
            let extra = (fraction as f64 * (scale as f64 / divisor)) as u64;
            value = value
                .checked_add(extra)
                .ok_or_else(|| invalid("duration out of range"))?;
        }

        total = total
            .checked_add(value)
            .ok_or_else(|| invalid("duration out of range"))?;
        rest = tail;
    }

    let nanos = match negative {
        true => 0i64.checked_sub_unsigned(total),
        false => i64::try_from(total).ok(),
    };
    let nanos = nanos.ok_or_else(|| invalid("duration out of range"))?;

    Ok(TimeDelta::nanoseconds(nanos))
}

/// Fractional hours in a span
pub fn hours(duration: TimeDelta) -> f64 {
    seconds(duration) / 3600.0
}

/// Fractional minutes in a span
pub fn minutes(duration: TimeDelta) -> f64 {
    seconds(duration) / 60.0
}

fn seconds(duration: TimeDelta) -> f64 {
    match duration.num_nanoseconds() {
        Some(nanos) => nanos as f64 / NANOS_PER_SECOND,
        None => duration.num_milliseconds() as f64 / 1e3,
    }
}
