//! Amount parsing for bank statement cells.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::AMOUNT;
use crate::models::statement::BalanceSide;

/// Parse a printed amount such as `1,000.00` or `500`. A `Dr`/`Cr` suffix is
/// accepted and ignored; use [`parse_balance`] to keep it.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    parse_balance(s).map(|(amount, _)| amount)
}

/// Parse a printed balance, returning the amount and its side marker.
pub fn parse_balance(s: &str) -> Option<(Decimal, BalanceSide)> {
    let caps = AMOUNT.captures(s.trim())?;

    let integer_part = caps[1].replace(',', "");
    let amount_str = match caps.get(2) {
        Some(fraction) => format!("{}.{}", integer_part, fraction.as_str()),
        None => integer_part,
    };
    let amount = Decimal::from_str(&amount_str).ok()?;

    let side = match caps.get(3).map(|m| m.as_str()) {
        Some("Dr") => BalanceSide::Debit,
        Some("Cr") => BalanceSide::Credit,
        _ => BalanceSide::Unmarked,
    };

    Some((amount, side))
}

/// Format an amount with thousands separators and two decimals (1,234.56).
pub fn format_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    if amount.is_sign_negative() && !amount.is_zero() {
        formatted.push('-');
    }

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    format!("{}.{}", formatted, decimal_part)
}
