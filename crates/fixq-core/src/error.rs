// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy shared by every fixed-point kind.
//!
//! Domain-undefined results (`tan` at odd multiples of π/2, `asin`/`acos`
//! outside `[-1, 1]`) are not errors; those functions return `Option`.

use thiserror::Error;

/// Errors surfaced by fixed-point arithmetic, conversion and interop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixedError {
    /// The exact result lies outside `[MIN, MAX]` of the target kind.
    #[error("arithmetic overflow: result does not fit in {kind}")]
    Overflow {
        /// Name of the kind (or primitive) that could not hold the result.
        kind: &'static str,
    },
    /// The divisor was zero.
    #[error("attempt to divide by zero")]
    DivideByZero,
    /// A floating-point source was NaN; fixed-point has no NaN encoding.
    #[error("NaN cannot be represented as {kind}")]
    NotANumber {
        /// Name of the target kind.
        kind: &'static str,
    },
    /// A required argument was absent.
    #[error("argument `{param}` must not be null")]
    ArgumentNull {
        /// Parameter name.
        param: &'static str,
    },
    /// No meaningful conversion exists between the two types.
    #[error("invalid cast from {from} to {to}")]
    InvalidCast {
        /// Source type name.
        from: &'static str,
        /// Requested target type name.
        to: &'static str,
    },
    /// A comparison received a value of a different type.
    #[error("object must be of type {expected}")]
    TypeMismatch {
        /// Name of the type the comparison expected.
        expected: &'static str,
    },
    /// A numeric format pattern could not be interpreted.
    #[error("invalid format specifier: {0:?}")]
    InvalidFormat(String),
    /// Text could not be parsed as a decimal number.
    #[error("invalid number: {0}")]
    Parse(String),
}
