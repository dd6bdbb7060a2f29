//! Checked arithmetic over unsigned integers
//!
//! Every operation fails fatally (to the call, not the process) on
//! overflow, underflow or division by zero instead of wrapping.

use thiserror::Error;

/// Arithmetic errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("addition overflow: {a} + {b}")]
    AdditionOverflow { a: u128, b: u128 },
    #[error("subtraction underflow: {a} - {b}")]
    SubtractionUnderflow { a: u128, b: u128 },
    #[error("multiplication overflow: {a} * {b}")]
    MultiplicationOverflow { a: u128, b: u128 },
    #[error("division by zero")]
    DivisionByZero,
}

/// Add two values, failing on overflow
pub fn checked_add(a: u128, b: u128) -> Result<u128, MathError> {
    a.checked_add(b)
        .ok_or(MathError::AdditionOverflow { a, b })
}

/// Subtract `b` from `a`, failing if `b > a`
pub fn checked_sub(a: u128, b: u128) -> Result<u128, MathError> {
    a.checked_sub(b)
        .ok_or(MathError::SubtractionUnderflow { a, b })
}

/// Multiply two values, failing on overflow
///
/// A zero multiplicand short-circuits to 0 without consulting the
/// overflow check.
pub fn checked_mul(a: u128, b: u128) -> Result<u128, MathError> {
    if a == 0 {
        return Ok(0);
    }
    a.checked_mul(b)
        .ok_or(MathError::MultiplicationOverflow { a, b })
}

/// Divide `a` by `b`, failing if `b` is zero
pub fn checked_div(a: u128, b: u128) -> Result<u128, MathError> {
    if b == 0 {
        return Err(MathError::DivisionByZero);
    }
    Ok(a / b)
}
