use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Result, ValidationError};

/// Formats an amount as US dollars, e.g. `"1234.5"` becomes `"$1,234.50"`.
pub fn format_currency(amount: &str) -> Result<String> {
    let value = Decimal::from_str(amount.trim()).map_err(ValidationError::DecimalParse)?;
    Ok(format_usd(value))
}

pub fn format_usd(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, cents)
}
