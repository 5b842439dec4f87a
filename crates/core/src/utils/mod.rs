pub mod count_serde;
pub mod decimal_serde;
pub mod format_utils;
pub mod time_utils;
