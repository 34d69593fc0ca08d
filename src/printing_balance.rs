//! Formatting of balances and plain numbers for display.
use crate::std::{
    string::{String, ToString},
    vec::Vec,
};

/// Metric prefixes for fractions of a unit, in steps of `10^-3`.
const MINUS_PREFIXES: &[&str] = &["m", "u", "n", "p", "f", "a"];

/// Balance formatted with chain decimals and units.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Currency {
    pub number: String,
    pub units: String,
}

impl Currency {
    pub fn show(&self) -> String {
        format!("{} {}", self.number, self.units)
    }
}

/// Unsigned integers that could be displayed as balance.
pub trait AsBalance: Sized {
    /// Format balance `value` in minimal chain units into chain units with
    /// decimals.
    ///
    /// Values below one unit get a metric prefix, so that the displayed
    /// integer part is non-zero whenever possible. All digits are kept.
    fn convert_balance_pretty(value: Self, decimals: u8, unit: &str) -> Currency;
}

macro_rules! impl_as_balance {
    ($($ty: ty), *) => {
        $(
            impl AsBalance for $ty {
                fn convert_balance_pretty(value: Self, decimals: u8, unit: &str) -> Currency {
                    balance_pretty(value as u128, decimals, unit)
                }
            }
        )*
    }
}

impl_as_balance!(u8, u16, u32, u64, u128);

/// Format number with thousands grouping, `1234567` into `1,234,567`.
pub fn format_number(value: u128) -> String {
    let digits = value.to_string();
    let mut groups: Vec<&str> = Vec::new();
    let mut end = digits.len();
    while end > 3 {
        groups.push(&digits[end - 3..end]);
        end -= 3;
    }
    groups.push(&digits[..end]);
    groups.reverse();
    groups.join(",")
}

fn balance_pretty(value: u128, decimals: u8, unit: &str) -> Currency {
    let decimals = decimals as u32;
    if decimals == 0 || at_least(value, decimals) {
        return Currency {
            number: with_decimal_point(value, decimals),
            units: unit.to_string(),
        };
    }
    for (i, prefix) in MINUS_PREFIXES.iter().enumerate() {
        let shift = 3 * (i as u32 + 1);
        if shift >= decimals {
            let number = if value == 0 {
                String::from("0")
            } else {
                format!("{value}{}", "0".repeat((shift - decimals) as usize))
            };
            return Currency {
                number,
                units: format!("{prefix}{unit}"),
            };
        }
        if at_least(value, decimals - shift) {
            return Currency {
                number: with_decimal_point(value, decimals - shift),
                units: format!("{prefix}{unit}"),
            };
        }
    }
    let shift = 3 * MINUS_PREFIXES.len() as u32;
    Currency {
        number: with_decimal_point(value, decimals - shift),
        units: format!("{}{unit}", MINUS_PREFIXES[MINUS_PREFIXES.len() - 1]),
    }
}

fn at_least(value: u128, decimals: u32) -> bool {
    match 10u128.checked_pow(decimals) {
        Some(unit) => value >= unit,
        None => false,
    }
}

fn with_decimal_point(value: u128, decimals: u32) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        digits
    } else if digits.len() > decimals {
        let (integer, fraction) = digits.split_at(digits.len() - decimals);
        format!("{integer}.{fraction}")
    } else {
        format!("0.{}{digits}", "0".repeat(decimals - digits.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_whole_units() {
        let currency = u128::convert_balance_pretty(1_061_900_000_000, 12, "WND");
        assert_eq!(currency.show(), "1.061900000000 WND");
    }

    #[test]
    fn balance_zero() {
        let currency = u128::convert_balance_pretty(0, 12, "WND");
        assert_eq!(currency.show(), "0 pWND");
    }

    #[test]
    fn balance_fractions() {
        assert_eq!(
            u128::convert_balance_pretty(1_500_000_000, 12, "WND").show(),
            "1.500000000 mWND"
        );
        assert_eq!(u128::convert_balance_pretty(500, 12, "WND").show(), "500 pWND");
        assert_eq!(u64::convert_balance_pretty(5, 10, "DOT").show(), "500 pDOT");
        assert_eq!(u8::convert_balance_pretty(42, 0, "UNIT").show(), "42 UNIT");
    }

    #[test]
    fn balance_micro_units() {
        assert_eq!(
            u128::convert_balance_pretty(100_000_000, 12, "WND").show(),
            "100.000000 uWND"
        );
        assert_eq!(
            u32::convert_balance_pretty(10_000_000, 12, "WND").show(),
            "10.000000 uWND"
        );
    }

    #[test]
    fn numbers_grouped() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
        assert_eq!(format_number(123_456), "123,456");
    }
}
