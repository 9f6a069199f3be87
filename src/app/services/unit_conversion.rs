//! Fixed-point unit conversion and formatting
//!
//! Compass stores lengths in decimal feet and angles in degrees regardless of
//! the units a survey was recorded in. These helpers convert to the declared
//! units and round half-up at two decimals so output is identical on every
//! platform.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{DECIMAL_PLACES, METRES_PER_FOOT, METRES_PER_FOOT_SCALE};
use crate::{Error, Result};

/// Round half-up (away from zero) to two decimals
pub fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DECIMAL_PLACES);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Render a value as a plain decimal with exactly two fractional digits
pub fn format_fixed(value: Decimal) -> String {
    round_half_up(value).to_string()
}

/// Render an optional value; absent values become an empty string
pub fn format_optional(value: Option<Decimal>) -> String {
    value.map(format_fixed).unwrap_or_default()
}

/// Convert degrees to gradians (400 per full circle)
pub fn degree_to_gradians(degrees: Decimal) -> Result<Decimal> {
    degrees
        .checked_mul(Decimal::from(400))
        .and_then(|scaled| scaled.checked_div(Decimal::from(360)))
        .map(round_half_up)
        .ok_or_else(|| Error::conversion(degrees, "gradians"))
}

/// Convert an inclination in degrees to percent grade
pub fn degree_to_percent(degrees: Decimal) -> Result<Decimal> {
    let radians = degrees
        .to_f64()
        .ok_or_else(|| Error::conversion(degrees, "percent"))?
        .to_radians();
    let percent = radians.tan() * 100.0;

    Decimal::from_f64(percent)
        .map(round_half_up)
        .ok_or_else(|| Error::conversion(degrees, "percent"))
}

/// Convert decimal feet to metres
pub fn decimal_feet_to_metres(feet: Decimal) -> Result<Decimal> {
    feet.checked_mul(Decimal::new(METRES_PER_FOOT, METRES_PER_FOOT_SCALE))
        .map(round_half_up)
        .ok_or_else(|| Error::conversion(feet, "metres"))
}
