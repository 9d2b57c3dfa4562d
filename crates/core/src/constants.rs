/// Currency every amount in the marketplace is denominated in.
pub const BASE_CURRENCY: &str = "INR";

/// Decimal precision for money calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
