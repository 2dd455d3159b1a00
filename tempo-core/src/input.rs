//! Validation for user-entered durations and targets.
//!
//! Check order is load-bearing: parse failure wins over positivity, which
//! wins over range, which wins over integrality. Compound failures like
//! "-1.5" therefore report the positivity message, not the whole-number one.

use thiserror::Error;

/// A rejected duration/target input. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter a valid number")]
    InvalidNumber,
    #[error("Please enter a positive number")]
    NotPositive,
    #[error("Please enter a number less than 10,000")]
    TooLarge,
    #[error("Please enter a whole number")]
    NotWhole,
}

/// Largest accepted duration or target, in seconds.
pub const MAX_SECONDS: u32 = 9999;

/// Parses raw text into a validated number of seconds.
///
/// Accepts a plain number ("90") or a colon form ("1:30", "0:01:30");
/// colon segments carry into the next unit, so "0:90" is 90 seconds.
pub fn parse_seconds(raw: &str) -> Result<u32, InputError> {
    let trimmed = raw.trim();
    if trimmed.contains(':') {
        return parse_clock(trimmed);
    }
    let value: f64 = trimmed.parse().map_err(|_| InputError::InvalidNumber)?;
    validate_seconds(value)
}

/// The four-check contract over an already-numeric value.
pub fn validate_seconds(value: f64) -> Result<u32, InputError> {
    if !value.is_finite() {
        return Err(InputError::InvalidNumber);
    }
    if value <= 0.0 {
        return Err(InputError::NotPositive);
    }
    if value > MAX_SECONDS as f64 {
        return Err(InputError::TooLarge);
    }
    if value.fract() != 0.0 {
        return Err(InputError::NotWhole);
    }
    Ok(value as u32)
}

fn parse_clock(raw: &str) -> Result<u32, InputError> {
    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() > 3 {
        return Err(InputError::InvalidNumber);
    }
    let mut total: u64 = 0;
    for part in parts {
        let part = part.trim();
        let n: u64 = if part.is_empty() {
            0
        } else {
            part.parse().map_err(|_| InputError::InvalidNumber)?
        };
        total = total.saturating_mul(60).saturating_add(n);
    }
    validate_seconds(total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_seconds() {
        assert_eq!(parse_seconds("90"), Ok(90));
        assert_eq!(parse_seconds(" 1 "), Ok(1));
        assert_eq!(parse_seconds("9999"), Ok(9999));
    }

    #[test]
    fn rejects_with_specific_messages() {
        assert_eq!(parse_seconds("abc"), Err(InputError::InvalidNumber));
        assert_eq!(parse_seconds(""), Err(InputError::InvalidNumber));
        assert_eq!(parse_seconds("0"), Err(InputError::NotPositive));
        assert_eq!(parse_seconds("-7"), Err(InputError::NotPositive));
        assert_eq!(parse_seconds("10000"), Err(InputError::TooLarge));
        assert_eq!(parse_seconds("1.5"), Err(InputError::NotWhole));
    }

    #[test]
    fn check_order_decides_compound_failures() {
        // negative and fractional: positivity is checked first
        assert_eq!(parse_seconds("-1.5"), Err(InputError::NotPositive));
        // huge and fractional: range is checked before integrality
        assert_eq!(parse_seconds("10000.5"), Err(InputError::TooLarge));
    }

    #[test]
    fn messages_match_contract() {
        assert_eq!(
            InputError::InvalidNumber.to_string(),
            "Please enter a valid number"
        );
        assert_eq!(
            InputError::NotPositive.to_string(),
            "Please enter a positive number"
        );
        assert_eq!(
            InputError::TooLarge.to_string(),
            "Please enter a number less than 10,000"
        );
        assert_eq!(
            InputError::NotWhole.to_string(),
            "Please enter a whole number"
        );
    }

    #[test]
    fn colon_forms_carry_into_next_unit() {
        assert_eq!(parse_seconds("1:30"), Ok(90));
        assert_eq!(parse_seconds("0:90"), Ok(90));
        assert_eq!(parse_seconds("1:02:03"), Ok(3723));
        assert_eq!(parse_seconds(":30"), Ok(30));
    }

    #[test]
    fn colon_forms_share_the_contract() {
        assert_eq!(parse_seconds("0:00"), Err(InputError::NotPositive));
        assert_eq!(parse_seconds("999:59"), Err(InputError::TooLarge));
        assert_eq!(parse_seconds("1:2:3:4"), Err(InputError::InvalidNumber));
        assert_eq!(parse_seconds("1:x"), Err(InputError::InvalidNumber));
    }
}
