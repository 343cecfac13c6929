// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]

use fixq_core::{Fix16, UFix16, UFix8};

const TRIG_BUDGET: f64 = 0.008;
const INVERSE_BUDGET: f64 = 0.01;

/// `n + 1` evenly spaced Fix16 samples over `[lo, hi]`.
fn samples(lo: f64, hi: f64, n: u32) -> impl Iterator<Item = Fix16> {
    (0..=n).map(move |i| Fix16::from_num(lo + (hi - lo) * f64::from(i) / f64::from(n)))
}

#[test]
fn sin_cos_within_budget_over_one_period() {
    let pi = core::f64::consts::PI;
    for x in samples(-pi, pi, 4000) {
        let exact = x.to_f64();
        let (s, c) = x.sin_cos();
        assert!(
            (s.to_f64() - libm::sin(exact)).abs() < TRIG_BUDGET,
            "sin({exact}) = {s:?}"
        );
        assert!(
            (c.to_f64() - libm::cos(exact)).abs() < TRIG_BUDGET,
            "cos({exact}) = {c:?}"
        );
        assert_eq!(x.sin(), s);
        assert_eq!(x.cos(), c);
    }
}

#[test]
fn sin_cos_within_budget_far_from_origin() {
    for x in samples(-30_000.0, 30_000.0, 2000) {
        let exact = x.to_f64();
        assert!((x.sin().to_f64() - libm::sin(exact)).abs() < TRIG_BUDGET);
        assert!((x.cos().to_f64() - libm::cos(exact)).abs() < TRIG_BUDGET);
    }
}

#[test]
fn sine_is_odd_and_cosine_even_bit_for_bit() {
    for x in samples(0.0, 100.0, 997) {
        assert_eq!((-x).sin(), -x.sin());
        assert_eq!((-x).cos(), x.cos());
    }
}

#[test]
fn trig_at_named_angles() {
    assert_eq!(Fix16::ZERO.sin(), Fix16::ZERO);
    assert_eq!(Fix16::ZERO.cos(), Fix16::ONE);
    assert_eq!(Fix16::PI.sin(), Fix16::ZERO);
    assert_eq!(Fix16::PI.cos(), Fix16::NEG_ONE);
    let half_pi = Fix16::PI / Fix16::from_num(2_u8);
    assert_eq!(half_pi.sin(), Fix16::ONE);
}

#[test]
fn unsigned_kinds_clamp_negative_trig_results() {
    assert_eq!(UFix16::PI.cos(), UFix16::ZERO);
    let three_halves_pi = UFix16::from_num(4.712_388_98_f64);
    assert_eq!(three_halves_pi.sin(), UFix16::ZERO);
    let quarter = UFix8::PI_DIV_FOUR.sin().to_f64();
    assert!((quarter - core::f64::consts::FRAC_1_SQRT_2).abs() < TRIG_BUDGET);
}

#[test]
fn tan_is_undefined_at_half_pi() {
    let half_pi = Fix16::PI / Fix16::from_num(2_u8);
    assert_eq!(half_pi.tan(), None);
    assert_eq!((-half_pi).tan(), None);
    assert_eq!(Fix16::from_raw(102_944).tan(), None);
    assert_eq!((UFix8::PI / UFix8::from_num(2_u8)).tan(), None);
}

#[test]
fn tan_within_budget_away_from_poles() {
    for x in samples(-1.4, 1.4, 1000) {
        let exact = x.to_f64();
        let t = x.tan().map(Fix16::to_f64);
        let err = t.map(|t| (t - libm::tan(exact)).abs());
        assert!(err.is_some_and(|e| e < TRIG_BUDGET), "tan({exact}) = {t:?}");
    }
    assert_eq!(Fix16::ZERO.tan(), Some(Fix16::ZERO));
}

#[test]
fn asin_acos_reject_out_of_domain() {
    let outside = Fix16::from_num(1.1_f64);
    assert_eq!(outside.asin(), None);
    assert_eq!(outside.acos(), None);
    assert_eq!((-outside).asin(), None);
    assert_eq!(UFix8::from_num(2_u8).acos(), None);
    assert_eq!(Fix16::ONE.acos(), Some(Fix16::ZERO));
    assert_eq!(Fix16::ZERO.asin(), Some(Fix16::ZERO));
}

#[test]
fn asin_acos_within_budget() {
    for x in samples(-1.0, 1.0, 2000) {
        let exact = x.to_f64();
        let asin = x.asin().map(Fix16::to_f64).unwrap_or(f64::NAN);
        let acos = x.acos().map(Fix16::to_f64).unwrap_or(f64::NAN);
        assert!((asin - libm::asin(exact)).abs() < INVERSE_BUDGET, "asin({exact}) = {asin}");
        assert!((acos - libm::acos(exact)).abs() < INVERSE_BUDGET, "acos({exact}) = {acos}");
    }
}

#[test]
fn atan_within_budget() {
    for x in samples(-1000.0, 1000.0, 4000) {
        let exact = x.to_f64();
        assert!((x.atan().to_f64() - libm::atan(exact)).abs() < INVERSE_BUDGET);
    }
    assert_eq!(Fix16::ONE.atan(), Fix16::PI_DIV_FOUR);
}

#[test]
fn atan2_covers_every_quadrant() {
    let coords = [-500.0, -3.0, -1.0, -0.25, 0.0, 0.25, 1.0, 3.0, 500.0];
    for y in coords {
        for x in coords {
            let (fy, fx) = (Fix16::from_num(y), Fix16::from_num(x));
            let got = fy.atan2(fx).to_f64();
            let want = if x == 0.0 && y == 0.0 { 0.0 } else { libm::atan2(y, x) };
            assert!((got - want).abs() < INVERSE_BUDGET, "atan2({y}, {x}) = {got}");
        }
    }
    assert_eq!(Fix16::ZERO.atan2(Fix16::ZERO), Fix16::ZERO);
    assert_eq!(Fix16::ONE.atan2(Fix16::NEG_ONE), Fix16::THREE_PI_DIV_FOUR);
}

#[test]
fn sqrt_reapplies_sign_for_negative_input() {
    assert_eq!(Fix16::from_num(-0.0625_f64).sqrt(), Fix16::from_num(-0.25_f64));
    assert_eq!(Fix16::from_num(-4_i32).sqrt(), Fix16::from_num(-2_i32));
}

#[test]
fn sqrt_rounds_to_nearest() {
    assert_eq!(Fix16::ZERO.sqrt(), Fix16::ZERO);
    assert_eq!(Fix16::ONE.sqrt(), Fix16::ONE);
    let root2 = Fix16::from_num(2_u8).sqrt().to_f64();
    assert!((root2 - core::f64::consts::SQRT_2).abs() <= 0.5 / 65_536.0);
    for x in samples(0.0, 32_000.0, 3000) {
        let got = x.sqrt().to_f64();
        assert!((got - libm::sqrt(x.to_f64())).abs() <= 0.5 / 65_536.0);
    }
    assert_eq!(UFix8::from_num(2_u8).sqrt().raw(), 362); // 1.41406
}

#[test]
fn exp_tracks_the_oracle() {
    for x in samples(-12.0, 10.3, 3000) {
        let exact = libm::exp(x.to_f64());
        let got = x.exp().to_f64();
        let tolerance = (exact * 1e-4).max(2.0 / 65_536.0);
        assert!((got - exact).abs() < tolerance, "exp({x:?}) = {got}, want {exact}");
    }
}

#[test]
fn exp_saturates_instead_of_overflowing() {
    assert_eq!(Fix16::from_num(10.4_f64).exp(), Fix16::MAX);
    assert_eq!(Fix16::from_num(100_i32).exp(), Fix16::MAX);
    assert_eq!(Fix16::MAX.exp(), Fix16::MAX);
    assert_eq!(UFix16::from_num(12_u8).exp(), UFix16::MAX);
    assert_eq!(UFix8::from_num(5.6_f64).exp(), UFix8::MAX);
    assert_eq!(Fix16::from_num(-20_i32).exp(), Fix16::ZERO);
    assert_eq!(Fix16::MIN.exp(), Fix16::ZERO);
}
