//! Conversion of token amounts between the two decimal precisions of the
//! tracked token.
use crate::error::PrecisionError;
use crate::{Amount, U256};

/// Converts a high-precision amount into the low-precision unit by dividing
/// it by `10^decimal_difference`.
///
/// The division truncates toward zero: any remainder below the divisor is
/// dropped and never carried forward. A quotient of zero is rejected.
pub fn scale_down(amount: Amount, decimal_difference: u32) -> Result<Amount, PrecisionError> {
    let scaled = match U256::from(10u8).checked_pow(U256::from(decimal_difference)) {
        Some(divisor) => U256::from(amount) / divisor,
        // a divisor beyond U256 exceeds every representable amount
        None => U256::zero(),
    };

    if scaled.is_zero() {
        return Err(PrecisionError::NonPositiveConversion);
    }

    Ok(scaled.into())
}
