use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A category suggestion is only returned when its keyword confidence is
/// strictly greater than this ratio.
pub const SUGGESTION_CONFIDENCE_THRESHOLD: Decimal = dec!(0.5);

/// Words longer than this many characters are preferred when inventing a new
/// category name from a description.
pub const NEW_CATEGORY_MIN_WORD_LEN: usize = 3;

/// Decimal places used when rendering currency amounts.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Row cap applied by the monthly expense report.
pub const MONTHLY_REPORT_LIMIT: u64 = 1000;

/// Name given to the household created on first member insert.
pub const DEFAULT_HOUSEHOLD_NAME: &str = "Household";
