// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! fixq-core: deterministic binary fixed-point scalars.
//!
//! Three representations share one generic implementation,
//! [`FixedPoint<K>`](FixedPoint):
//!
//! | alias      | storage | format  | range                     | ε          |
//! |------------|---------|---------|---------------------------|------------|
//! | [`Fix16`]  | `i32`   | Q16.16  | `[-32768, 32767.99998]`   | `2^-16`    |
//! | [`UFix16`] | `u32`   | UQ16.16 | `[0, 65535.99998]`        | `2^-16`    |
//! | [`UFix8`]  | `u16`   | UQ8.8   | `[0, 255.996]`            | `2^-8`     |
//!
//! Every operation is integer-only and bit-for-bit reproducible across
//! platforms: no floating point is used in arithmetic or in the elementary
//! functions, and float conversions are computed from the IEEE encoding.
//!
//! Overflow is explicit. Operators wrap; `checked_*` methods fail with
//! [`FixedError`]; `saturating_*` methods clamp. See [`NullableFixed`] for
//! absence-propagating arithmetic.
//!
//! ```
//! use fixq_core::{Fix16, FixedError};
//!
//! let a = Fix16::from_num(2.5_f64);
//! assert_eq!(a.to_string(), "2.5");
//! assert_eq!(Fix16::MAX.checked_add(Fix16::ONE), Err(FixedError::Overflow { kind: "Fix16" }));
//! assert_eq!(Fix16::MAX.saturating_add(Fix16::ONE), Fix16::MAX);
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::unreadable_literal,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::many_single_char_names,
    clippy::module_name_repetitions,
    clippy::use_self
)]

mod arith;
/// Conversions to and from primitive numeric types.
pub mod convert;
mod dispatch;
mod elementary;
mod error;
mod fixed;
mod format;
/// Representation kinds and their constant tables.
pub mod kind;
mod nullable;
/// Q32.32 working format used by the elementary functions.
mod q32;
mod trig;

pub use arith::LerpFraction;
pub use convert::{FromFixed, Scaled, ToFixed};
pub use dispatch::{TypeTag, Value};
pub use error::FixedError;
pub use fixed::{Fix16, FixedPoint, UFix16, UFix8};
pub use format::NumberFormat;
pub use kind::{Kind, SignedKind, I16F16, U16F16, U8F8};
pub use nullable::NullableFixed;
