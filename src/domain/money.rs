use std::fmt;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// 1 unit = 100 cents, so 50.00 = 5000 cents.
pub type Cents = i64;

/// Format cents as a human-readable decimal string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Parse a decimal string into cents.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000, "500.0" -> 50000
///
/// Digits beyond the second decimal place are truncated.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, digits) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let (units_str, decimal_str) = match digits.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (digits, ""),
    };

    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }
    if !all_ascii_digits(units_str) || !all_ascii_digits(decimal_str) {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str.parse().map_err(|_| ParseCentsError::OutOfRange)?
    };

    // Pad or truncate the decimal part to exactly 2 digits
    let decimal_cents: i64 = match decimal_str.len() {
        0 => 0,
        1 => i64::from(decimal_str.as_bytes()[0] - b'0') * 10,
        _ => {
            let bytes = decimal_str.as_bytes();
            i64::from(bytes[0] - b'0') * 10 + i64::from(bytes[1] - b'0')
        }
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or(ParseCentsError::OutOfRange)?;

    Ok(if negative { -cents } else { cents })
}

/// Parse user-entered amount text. Same grammar as [`parse_cents`], but the
/// value must be exact in cents and must not be negative.
pub fn parse_amount(input: &str) -> Result<Cents, ParseCentsError> {
    let cents = parse_cents(input)?;

    // parse_cents truncates; user input may only carry zeros past the cents
    let extra_digits = input
        .trim()
        .split_once('.')
        .map(|(_, decimals)| decimals.get(2..).unwrap_or(""))
        .unwrap_or("");
    if extra_digits.bytes().any(|b| b != b'0') {
        return Err(ParseCentsError::TooPrecise);
    }

    if cents < 0 {
        return Err(ParseCentsError::Negative);
    }
    Ok(cents)
}

fn all_ascii_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    OutOfRange,
    Negative,
    TooPrecise,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::OutOfRange => write!(f, "amount is too large"),
            ParseCentsError::Negative => write!(f, "amount must not be negative"),
            ParseCentsError::TooPrecise => write!(f, "amount has more than two decimal places"),
        }
    }
}

impl std::error::Error for ParseCentsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(5000), "50.00");
        assert_eq!(format_cents(1234), "12.34");
        assert_eq!(format_cents(100), "1.00");
        assert_eq!(format_cents(1), "0.01");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-5000), "-50.00");
        assert_eq!(format_cents(-1), "-0.01");
        assert_eq!(format_cents(i64::MIN), "-92233720368547758.08");
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("50.00"), Ok(5000));
        assert_eq!(parse_cents("50"), Ok(5000));
        assert_eq!(parse_cents("12.34"), Ok(1234));
        assert_eq!(parse_cents("12.5"), Ok(1250));
        assert_eq!(parse_cents("500.0"), Ok(50000));
        assert_eq!(parse_cents("0.01"), Ok(1));
        assert_eq!(parse_cents(".50"), Ok(50));
        assert_eq!(parse_cents("7."), Ok(700));
        assert_eq!(parse_cents("-50.00"), Ok(-5000));
        assert_eq!(parse_cents("+3"), Ok(300));
        assert_eq!(parse_cents("  42  "), Ok(4200));
        assert_eq!(parse_cents("100.999"), Ok(10099)); // Truncates
    }

    #[test]
    fn test_parse_cents_invalid() {
        assert_eq!(parse_cents("abc"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("12.34.56"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents(""), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("."), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("-"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("1,000"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("1e3"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("1.é5"), Err(ParseCentsError::InvalidFormat));
        assert_eq!(parse_cents("--5"), Err(ParseCentsError::InvalidFormat));
    }

    #[test]
    fn test_parse_cents_out_of_range() {
        assert_eq!(
            parse_cents("99999999999999999999"),
            Err(ParseCentsError::OutOfRange)
        );
        assert_eq!(
            parse_cents("92233720368547758.08"),
            Err(ParseCentsError::OutOfRange)
        );
    }

    #[test]
    fn test_parse_amount_rejects_negative() {
        assert_eq!(parse_amount("-1"), Err(ParseCentsError::Negative));
        assert_eq!(parse_amount("-0"), Ok(0));
        assert_eq!(parse_amount("19.99"), Ok(1999));
    }

    #[test]
    fn test_parse_amount_rejects_sub_cent_values() {
        assert_eq!(parse_amount("10.009"), Err(ParseCentsError::TooPrecise));
        assert_eq!(parse_amount("12.345"), Err(ParseCentsError::TooPrecise));
        assert_eq!(parse_amount("0.005"), Err(ParseCentsError::TooPrecise));
        assert_eq!(parse_amount("-0.001"), Err(ParseCentsError::TooPrecise));
        // Trailing zeros do not change the value
        assert_eq!(parse_amount("10.000"), Ok(1000));
        assert_eq!(parse_amount(" 7.5000 "), Ok(750));
        // Stored values in the log still truncate
        assert_eq!(parse_cents("12.345"), Ok(1234));
    }
}
