// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]

use fixq_core::{Fix16, FixedError, NumberFormat, UFix16, UFix8};

fn culture(name: &str) -> NumberFormat {
    NumberFormat::for_culture(name).unwrap()
}

fn fix(v: f64) -> Fix16 {
    Fix16::from_num(v)
}

#[test]
fn display_renders_the_exact_dyadic_expansion() {
    assert_eq!(fix(2.5).to_string(), "2.5");
    assert_eq!(Fix16::ZERO.to_string(), "0");
    assert_eq!(Fix16::NEG_ONE.to_string(), "-1");
    assert_eq!(Fix16::from_raw(1).to_string(), "0.0000152587890625");
    assert_eq!(Fix16::from_raw(-234).to_string(), "-0.003570556640625");
    assert_eq!(Fix16::MIN.to_string(), "-32768");
    assert_eq!(Fix16::MAX.to_string(), "32767.9999847412109375");
    assert_eq!(UFix8::from_raw(1).to_string(), "0.00390625");
    assert_eq!(UFix16::MAX.to_string(), "65535.9999847412109375");
}

#[test]
fn display_honors_precision_and_width() {
    assert_eq!(format!("{:.3}", Fix16::PI), "3.142");
    assert_eq!(format!("{:.0}", fix(-2.5)), "-3");
    assert_eq!(format!("{:>6}", Fix16::ONE), "     1");
    assert_eq!(format!("{:<5}|", fix(0.5)), "0.5  |");
}

#[test]
fn custom_pattern_renders_every_fraction_digit() {
    let invariant = NumberFormat::invariant();
    assert_eq!(
        Fix16::from_raw(234)
            .format_with("#,0.################", &invariant)
            .unwrap(),
        "0.003570556640625"
    );
}

#[test]
fn fixed_and_number_specifiers() {
    assert_eq!(Fix16::PI.format("F2").unwrap(), "3.14");
    assert_eq!(Fix16::PI.format("F").unwrap(), "3.14");
    assert_eq!(fix(2.5).format("F0").unwrap(), "3");
    assert_eq!(fix(-2.5).format("F0").unwrap(), "-3");
    assert_eq!(fix(-0.001).format("F2").unwrap(), "0.00");
    assert_eq!(fix(12_345.5).format("N2").unwrap(), "12,345.50");
    assert_eq!(fix(-12_345.5).format("N0").unwrap(), "-12,346");
    assert_eq!(UFix16::MAX.format("N4").unwrap(), "65,536.0000");
}

#[test]
fn culture_separators_are_parameterized() {
    let x = fix(12_345.5);
    assert_eq!(x.format_with("N2", &culture("de-DE")).unwrap(), "12.345,50");
    assert_eq!(x.format_with("N2", &culture("fr-FR")).unwrap(), "12\u{202f}345,50");
    assert_eq!(x.format_with("N2", &culture("ar-SA")).unwrap(), "12\u{66c}345\u{66b}50");
    assert_eq!(x.format_with("N1", &culture("en-US")).unwrap(), "12,345.5");
    assert_eq!(fix(-2.5).format_with("G", &culture("ar-SA")).unwrap(), "\u{61c}-2\u{66b}5");
    assert!(NumberFormat::for_culture("xx-XX").is_none());
}

#[test]
fn custom_cultures_can_group_unevenly() {
    let lakh = NumberFormat {
        group_sizes: vec![1, 2],
        ..NumberFormat::invariant()
    };
    assert_eq!(UFix16::from_num(65_535_u16).format_with("N0", &lakh).unwrap(), "65,53,5");
    let flat = NumberFormat {
        group_sizes: vec![3, 0],
        ..NumberFormat::invariant()
    };
    assert_eq!(fix(12_345.0).format_with("N0", &flat).unwrap(), "12,345");
}

#[test]
fn percent_and_exponential_specifiers() {
    assert_eq!(fix(0.125).format("P1").unwrap(), "12.5 %");
    assert_eq!(fix(0.125).format_with("P1", &culture("en-US")).unwrap(), "12.5%");
    assert_eq!(fix(0.125).format_with("P0", &culture("de-DE")).unwrap(), "13\u{a0}%");
    assert_eq!(fix(1234.5).format("E3").unwrap(), "1.235E+003");
    assert_eq!(fix(1234.5).format("e2").unwrap(), "1.23e+003");
    assert_eq!(fix(-0.25).format("E").unwrap(), "-2.500000E-001");
    assert_eq!(Fix16::ZERO.format("E2").unwrap(), "0.00E+000");
    assert_eq!(fix(9.9999).format("E2").unwrap(), "1.00E+001");
}

#[test]
fn general_and_round_trip_specifiers() {
    assert_eq!(fix(1234.5).format("G").unwrap(), "1234.5");
    assert_eq!(fix(1234.5).format("G5").unwrap(), "1234.5");
    assert_eq!(fix(1234.5).format("G3").unwrap(), "1.23E+03");
    assert_eq!(fix(1234.5).format("g2").unwrap(), "1.2e+03");
    assert_eq!(Fix16::from_raw(1).format("G3").unwrap(), "0.0000153");
    assert_eq!(UFix8::from_raw(1).format("G2").unwrap(), "0.0039");
    let text = Fix16::from_raw(-98_765).format("R").unwrap();
    assert_eq!(text.parse::<Fix16>(), Ok(Fix16::from_raw(-98_765)));
    assert_eq!(fix(2.5).format("").unwrap(), "2.5");
}

#[test]
fn custom_digit_placeholders() {
    assert_eq!(fix(2.5).format("0.00").unwrap(), "2.50");
    assert_eq!(fix(0.5).format("#.##").unwrap(), ".5");
    assert_eq!(fix(1.0).format("#.##").unwrap(), "1");
    assert_eq!(fix(42.0).format("00000").unwrap(), "00042");
    assert_eq!(fix(12_345.0).format("#,##0").unwrap(), "12,345");
    assert_eq!(fix(12_345.0).format("0,.0").unwrap(), "12.3");
    assert_eq!(fix(12_345.0).format("0.0,").unwrap(), "12345.0");
    assert_eq!(fix(0.125).format("0.0%").unwrap(), "12.5%");
    assert_eq!(fix(5.0).format("'x='0").unwrap(), "x=5");
    assert_eq!(fix(5.0).format("\\#0").unwrap(), "#5");
    assert_eq!(fix(1234.0).format("00-00").unwrap(), "12-34");
    assert_eq!(fix(34.0).format("##-00").unwrap(), "-34");
}

#[test]
fn custom_sections() {
    let pattern = "0.0;(0.0);'zero'";
    assert_eq!(fix(5.0).format(pattern).unwrap(), "5.0");
    assert_eq!(fix(-5.0).format(pattern).unwrap(), "(5.0)");
    assert_eq!(Fix16::ZERO.format(pattern).unwrap(), "zero");
    assert_eq!(fix(-0.01).format(pattern).unwrap(), "zero");
    assert_eq!(fix(-5.0).format("0;").unwrap(), "-5");
    assert_eq!(fix(-5.0).format("0").unwrap(), "-5");
}

#[test]
fn invalid_patterns_are_rejected() {
    assert!(matches!(fix(1.0).format("X"), Err(FixedError::InvalidFormat(_))));
    assert!(matches!(fix(1.0).format("D2"), Err(FixedError::InvalidFormat(_))));
    assert!(matches!(fix(1.0).format("F100"), Err(FixedError::InvalidFormat(_))));
    assert!(matches!(fix(1.0).format("0 'open"), Err(FixedError::InvalidFormat(_))));
}

#[test]
fn debug_shows_value_and_raw_bits() {
    assert_eq!(format!("{:?}", fix(2.5)), "Fix16(2.5 raw=0x28000)");
    assert_eq!(format!("{:?}", UFix8::ONE), "UFix8(1 raw=0x100)");
}
