// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]

use fixq_core::{Fix16, FixedError, UFix16, UFix8, I16F16, U16F16, U8F8};
use half::f16;
use rust_decimal::Decimal;

#[test]
fn integer_sources_scale_exactly() {
    assert_eq!(Fix16::from_num(234_i32).raw(), 15_335_424);
    assert_eq!(Fix16::from_raw(15_335_424).to_num::<i32>(), 234);
    assert_eq!(Fix16::from_num(1_u8), Fix16::ONE);
    assert_eq!(Fix16::from_num(0_u8), Fix16::ZERO);
    assert_eq!(UFix8::from_num(255_u8).raw(), 0xFF00);
    assert_eq!(Fix16::from_num(-1_i64), Fix16::NEG_ONE);
}

#[test]
fn wide_integer_sources_saturate() {
    assert_eq!(Fix16::from_num(i64::MAX), Fix16::MAX);
    assert_eq!(Fix16::from_num(i64::MIN), Fix16::MIN);
    assert_eq!(Fix16::from_num(40_000_u32), Fix16::MAX);
    assert_eq!(UFix16::from_num(-3_i32), UFix16::MIN);
    assert_eq!(UFix8::from_num(256_u16), UFix8::MAX);
    assert_eq!(
        Fix16::checked_from_num(32_768_i32),
        Err(FixedError::Overflow { kind: "Fix16" })
    );
    assert_eq!(Fix16::checked_from_num(32_767_i32).map(|v| v.raw()), Ok(32_767 << 16));
}

#[test]
fn float_sources_round_to_nearest() {
    assert_eq!(Fix16::from_num(2.5_f64).raw(), 163_840);
    assert_eq!(Fix16::from_num(0.1_f64).raw(), 6_554);
    assert_eq!(Fix16::from_num(-0.1_f64).raw(), -6_554);
    assert_eq!(Fix16::from_num(1.5_f32).raw(), 98_304);
    assert_eq!(UFix8::from_num(0.5_f32).raw(), 128);
    assert_eq!(Fix16::from_num(f16::from_f32(1.5)).raw(), 98_304);
}

#[test]
fn float_extremes_saturate_and_nan_is_zero() {
    assert_eq!(Fix16::from_num(f64::INFINITY), Fix16::MAX);
    assert_eq!(Fix16::from_num(f64::NEG_INFINITY), Fix16::MIN);
    assert_eq!(Fix16::from_num(f64::MAX), Fix16::MAX);
    assert_eq!(Fix16::from_num(f64::MIN), Fix16::MIN);
    assert_eq!(UFix16::from_num(-1.0e9_f64), UFix16::MIN);
    assert_eq!(Fix16::from_num(f64::NAN), Fix16::ZERO);
    assert_eq!(
        Fix16::checked_from_num(f64::NAN),
        Err(FixedError::NotANumber { kind: "Fix16" })
    );
    assert_eq!(
        UFix8::checked_from_num(f32::INFINITY),
        Err(FixedError::Overflow { kind: "UFix8" })
    );
}

#[test]
fn integer_targets_truncate_toward_zero() {
    assert_eq!(Fix16::from_raw(98_304).to_num::<i32>(), 1); // 1.5
    assert_eq!(Fix16::from_raw(-98_304).to_num::<i32>(), -1); // -1.5
    assert_eq!(Fix16::from_raw(-1).to_num::<i32>(), 0);
    assert_eq!(UFix8::from_raw(0x01FF).to_num::<u8>(), 1);
}

#[test]
fn integer_targets_clamp_to_their_own_range() {
    assert_eq!(Fix16::MIN.to_num::<u8>(), 0);
    assert_eq!(Fix16::MIN.to_num::<i8>(), i8::MIN);
    assert_eq!(Fix16::MAX.to_num::<u8>(), u8::MAX);
    assert_eq!(Fix16::MAX.to_num::<i16>(), i16::MAX);
    assert_eq!(UFix16::MAX.to_num::<i16>(), i16::MAX);
    assert_eq!(Fix16::MIN.to_num::<i64>(), -32_768);
    assert_eq!(
        Fix16::NEG_ONE.checked_to_num::<u8>(),
        Err(FixedError::Overflow { kind: "u8" })
    );
    assert_eq!(Fix16::from_num(100_i32).checked_to_num::<i8>(), Ok(100_i8));
}

#[test]
fn boolean_round_trip() {
    assert_eq!(Fix16::from(true), Fix16::ONE);
    assert_eq!(UFix8::from(false), UFix8::ZERO);
    assert!(Fix16::EPSILON.to_num::<bool>());
    assert!(!Fix16::ZERO.to_num::<bool>());
}

#[test]
fn half_targets_saturate_at_finite_extremes() {
    assert_eq!(Fix16::from_num(1.5_f64).to_num::<f16>(), f16::from_f32(1.5));
    assert_eq!(UFix16::MAX.to_num::<f16>(), f16::MAX);
    assert_eq!(
        UFix16::MAX.checked_to_num::<f16>(),
        Err(FixedError::Overflow { kind: "f16" })
    );
}

#[test]
fn decimal_targets_are_exact() {
    let d: Decimal = Fix16::from_raw(234).to_num();
    assert_eq!(d, Decimal::new(3_570_556_640_625, 15));
    let d: Decimal = Fix16::MIN.into();
    assert_eq!(d, Decimal::from(-32_768_i32));
    let d: Decimal = UFix8::from_raw(1).into();
    assert_eq!(d, Decimal::new(390_625, 8));
}

#[test]
fn decimal_sources_round_ties_to_even() {
    assert_eq!(Fix16::from_num(Decimal::new(25, 1)).raw(), 163_840);
    // 0.5 ulp of UFix8 is 2^-9 = 0.001953125.
    assert_eq!(UFix8::from_num(Decimal::new(1_953_125, 9)).raw(), 0);
    assert_eq!(UFix8::from_num(Decimal::new(5_859_375, 9)).raw(), 2);
    assert_eq!(Fix16::from_num(Decimal::MAX), Fix16::MAX);
    assert_eq!(Fix16::from_num(Decimal::MIN), Fix16::MIN);
}

#[test]
fn f64_views_are_exact() {
    assert_eq!(Fix16::from_raw(1).to_f64(), 1.0 / 65_536.0);
    assert_eq!(f64::from(UFix8::from_raw(0x0180)), 1.5);
    assert_eq!(f32::from(UFix8::from_raw(0x0040)), 0.25);
    assert_eq!(Fix16::MIN.to_num::<f64>(), -32_768.0);
}

#[test]
fn lossless_from_impls() {
    assert_eq!(Fix16::from(-128_i8).raw(), -128 << 16);
    assert_eq!(Fix16::from(i16::MIN), Fix16::MIN);
    assert_eq!(UFix16::from(u16::MAX).raw(), 0xFFFF_0000);
    assert_eq!(UFix8::from(200_u8).raw(), 200 << 8);
}

#[test]
fn parsing_is_exact_and_checked() {
    assert_eq!("2.5".parse::<Fix16>(), Ok(Fix16::from_raw(163_840)));
    assert_eq!("-0.003570556640625".parse::<Fix16>(), Ok(Fix16::from_raw(-234)));
    assert_eq!(" 255.99609375 ".parse::<UFix8>(), Ok(UFix8::MAX));
    assert_eq!(
        "40000".parse::<Fix16>(),
        Err(FixedError::Overflow { kind: "Fix16" })
    );
    assert!(matches!("abc".parse::<Fix16>(), Err(FixedError::Parse(_))));
}

#[test]
fn cross_kind_conversion_saturates() {
    // A tiny negative Fix16 must clamp, not wrap to a huge positive value.
    assert_eq!(Fix16::from_raw(-1).convert::<U8F8>(), UFix8::MIN);
    assert_eq!(Fix16::from_raw(-1).convert::<U16F16>(), UFix16::MIN);
    assert_eq!(Fix16::MIN.convert::<U16F16>(), UFix16::MIN);
    assert_eq!(UFix16::MAX.convert::<I16F16>(), Fix16::MAX);
    assert_eq!(Fix16::MAX.convert::<U8F8>(), UFix8::MAX);
}

#[test]
fn cross_kind_conversion_keeps_in_range_values() {
    assert_eq!(UFix8::from_raw(0x0180).convert::<I16F16>(), Fix16::from_num(1.5_f64));
    assert_eq!(Fix16::from_num(3_i32).convert::<U16F16>(), UFix16::from_num(3_u8));
    // Dropped fractional bits truncate: 1.5 + 2^-16 -> 1.5 in UQ8.8.
    assert_eq!(Fix16::from_raw(98_305).convert::<U8F8>().raw(), 0x0180);
    assert_eq!(Fix16::ONE.convert::<U8F8>(), UFix8::ONE);
}
