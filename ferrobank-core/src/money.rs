use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("invalid decimal amount: {0}")]
    InvalidAmount(String),
}

/// Parses a signed decimal string. No exponents, no grouping, no locale.
pub fn parse(s: &str) -> Result<Decimal, MoneyError> {
    Decimal::from_str(s).map_err(|_| MoneyError::InvalidAmount(s.to_string()))
}

/// Renders a money value canonically: trailing zeros stripped, plain notation.
pub fn render(amount: Decimal) -> String {
    amount.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use test_log::test;

    use super::*;

    #[test]
    fn parses_signed_decimals() {
        assert_eq!(parse("100").unwrap(), dec!(100));
        assert_eq!(parse("-10.25").unwrap(), dec!(-10.25));
        assert_eq!(parse("0.001").unwrap(), dec!(0.001));
    }

    #[test]
    fn rejects_malformed_amounts() {
        for bad in ["abc", "", "10,5", "1.2.3"] {
            assert!(matches!(parse(bad), Err(MoneyError::InvalidAmount(_))), "accepted {bad:?}");
        }
    }

    #[test]
    fn renders_canonically() {
        assert_eq!(render(dec!(900.00)), "900");
        assert_eq!(render(dec!(0.5000)), "0.5");
        assert_eq!(render(dec!(-12.30)), "-12.3");
    }

    #[test]
    fn render_round_trips() {
        for raw in ["1000", "0.01", "-42.42", "1234567.891"] {
            let value = parse(raw).unwrap();
            assert_eq!(parse(&render(value)).unwrap(), value);
        }
    }

    #[test]
    fn textual_negation_matches_decimal_negation() {
        let amount = parse("123.45").unwrap();
        assert_eq!(parse("-123.45").unwrap(), -amount);
    }
}
