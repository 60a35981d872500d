use super::*;
use crate::{
    error::ParseErrorKind,
    float::{Category, NanKind, F80},
    options::RoundingMode,
};

const F64_MAX: &str = "179769313486231570814527423731704356798070567525844996598917476803157260780028538760589558632766878171540458953514382464234321326889464182768467546703537516986049910576551282076245490090389328944075868508455133942304583236903222948165808559332123348274797826204144723168738177180919299881250404026184124858368";

/// `f64::MAX` plus half an ulp, minus one.
const F64_BELOW_HALFWAY: &str = "179769313486231580793728971405303415079934132710037826936173778980444968292764750946649017977587207096330286416692887910946555547851940402630657488671505820681908902000708383676273854845817711531764475730270069855571366959622842914819860834936475292719074168444365510704342711559699508093042880177904174497791";

/// `f64::MAX` plus half an ulp.
const F64_HALFWAY: &str = "179769313486231580793728971405303415079934132710037826936173778980444968292764750946649017977587207096330286416692887910946555547851940402630657488671505820681908902000708383676273854845817711531764475730270069855571366959622842914819860834936475292719074168444365510704342711559699508093042880177904174497792";

fn parse<F: BinaryFloat>(text: &str, options: &ParseOptions) -> (F, Status) {
    let parsed = stof::<F>(text, options).unwrap();
    assert_eq!(parsed.consumed, text.len());
    (parsed.value, parsed.status)
}

fn decimal(text: &str) -> f64 {
    let (value, status) = parse::<f64>(text, &ParseOptions::default());
    assert_eq!(status, Status::Ok, "{}", text);
    value
}

fn bits(text: &str, options: &ParseOptions) -> (u64, Status) {
    let (value, status) = parse::<f64>(text, options);
    (value.to_bits(), status)
}

#[test]
fn decimal_values() {
    assert_eq!(decimal("0.1"), 0.1);
    assert_eq!(decimal("-12.5"), -12.5);
    assert_eq!(decimal("1e23"), 1e23);
    assert_eq!(decimal("8.1"), 8.1);
    assert_eq!(decimal(".5"), 0.5);
    assert_eq!(decimal("5."), 5.0);
    assert_eq!(decimal("123456789012345678901234567890"), 1.2345678901234568e29);
    assert_eq!(decimal("2.2250738585072011e-308"), 2.225_073_858_507_201e-308);
    assert_eq!(decimal("2.2250738585072014e-308"), f64::MIN_POSITIVE);
    assert_eq!(decimal("9007199254740993"), 9_007_199_254_740_992.0);
    assert_eq!(decimal("9007199254740993.0000000000000000000000001"), 9_007_199_254_740_994.0);
    assert_eq!(decimal("0.000000000000000000000000000000000000001e39"), 1.0);
    assert_eq!(decimal("1000000000000000000000e-21"), 1.0);
    let long = format!("0.{}1", "0".repeat(300));
    assert_eq!(decimal(&long), 1e-301);
}

#[test]
fn signed_zeros() {
    let options = ParseOptions::default();
    assert_eq!(bits("0", &options), (0, Status::Ok));
    assert_eq!(bits("-0", &options), (1 << 63, Status::Ok));
    assert_eq!(bits("-0.000e5", &options), (1 << 63, Status::Ok));
    assert_eq!(bits("0e99999999999999999999999", &options), (0, Status::Ok));
}

#[test]
fn integer_hexadecimal() {
    let options = ParseOptions::new(Notation::Hex);
    let (value, status) = parse::<f64>("3FD1997CBCAA668D", &options);
    assert_eq!(status, Status::Ok);
    assert_eq!(value, 4_598_625_455_542_265_485u64 as f64);
    assert_eq!(value.to_bits(), 0x43cf_e8cc_be5e_5533);
    // an extended float holds it exactly
    let (value, _) = parse::<F80>("3FD1997CBCAA668D", &options);
    assert_eq!(value.to_bits(), 0x403c_ff46_65f2_f2a9_9a34);
    let (mantissa, exp2) = FloatParts::decompose(value).exact();
    assert_eq!(u128::from(mantissa) >> -exp2, 4_598_625_455_542_265_485);
}

#[test]
fn hexadecimal_values() {
    let options = ParseOptions::new(Notation::Hex);
    assert_eq!(parse::<f64>("12.8", &options), (18.5, Status::Ok));
    assert_eq!(parse::<f64>("1s2", &options), (256.0, Status::Ok));
    assert_eq!(parse::<f64>("A.8S-1", &options), (0.656_25, Status::Ok));
    assert_eq!(parse::<f32>("-0.0001", &options), (-1.0 / 65536.0, Status::Ok));

    let options = ParseOptions::new(Notation::HexBinary);
    assert_eq!(parse::<f64>("1.999999999999ap-4", &options), (0.1, Status::Ok));
    assert_eq!(parse::<f64>("1.8p1", &options), (3.0, Status::Ok));
    assert_eq!(parse::<f64>("18p-4", &options), (1.5, Status::Ok));
    assert_eq!(parse::<f64>("1p-1074", &options), (f64::from_bits(1), Status::Ok));
    assert_eq!(parse::<f64>("1p-1075", &options), (0.0, Status::Underflow));
    assert_eq!(parse::<f64>("1.8p-1075", &options), (f64::from_bits(1), Status::Ok));
    assert_eq!(parse::<f64>("1p1024", &options), (f64::INFINITY, Status::Overflow));
    assert_eq!(parse::<f64>("1.fffffffffffffp1023", &options), (f64::MAX, Status::Ok));
    // half an ulp above the maximum rounds to even, past the range
    assert_eq!(
        parse::<f64>("1.fffffffffffff8p1023", &options),
        (f64::INFINITY, Status::Overflow)
    );
    assert_eq!(parse::<f64>("0.00001p+20", &options), (1.0, Status::Ok));
    assert_eq!(parse::<f64>("100000p-99999999999", &options), (0.0, Status::Underflow));
    assert_eq!(parse::<f64>("0.1p99999999999", &options), (f64::INFINITY, Status::Overflow));
}

#[test]
fn overflow_boundary() {
    let options = ParseOptions::default();
    assert_eq!(parse::<f64>(F64_MAX, &options), (f64::MAX, Status::Ok));
    assert_eq!(parse::<f64>(&format!("{}.0", F64_MAX), &options), (f64::MAX, Status::Ok));
    assert_eq!(parse::<f64>(F64_BELOW_HALFWAY, &options), (f64::MAX, Status::Ok));
    assert_eq!(
        parse::<f64>(F64_HALFWAY, &options),
        (f64::INFINITY, Status::Overflow)
    );
    assert_eq!(parse::<f64>("1e309", &options), (f64::INFINITY, Status::Overflow));
    assert_eq!(
        parse::<f64>("-1e99999999999", &options),
        (f64::NEG_INFINITY, Status::Overflow)
    );
    let digits = format!("1{}", "0".repeat(400));
    assert_eq!(parse::<f64>(&digits, &options), (f64::INFINITY, Status::Overflow));
    // truncation cannot bring a value past the range back
    let truncate = options.rounding(RoundingMode::Truncate);
    assert_eq!(parse::<f64>(F64_HALFWAY, &truncate), (f64::MAX, Status::Ok));
    assert_eq!(parse::<f64>("1e309", &truncate), (f64::INFINITY, Status::Overflow));

    assert_eq!(parse::<f32>("3.4028235e38", &options), (f32::MAX, Status::Ok));
    assert_eq!(parse::<f32>("3.4028236e38", &options), (f32::INFINITY, Status::Overflow));
}

#[test]
fn subnormals() {
    let options = ParseOptions::default();
    assert_eq!(bits("4.9406564584124654e-324", &options), (1, Status::Ok));
    assert_eq!(bits("2.4703282292062328e-324", &options), (1, Status::Ok));
    assert_eq!(bits("2.4703282292062327e-324", &options), (0, Status::Underflow));
    assert_eq!(bits("-1e-400", &options), (1 << 63, Status::Underflow));
    assert_eq!(bits("1e-99999999999", &options), (0, Status::Underflow));
    assert_eq!(bits("2.225073858507201e-308", &options), (0x000f_ffff_ffff_ffff, Status::Ok));
    assert_eq!(
        bits("1e-400", &options.rounding(RoundingMode::Ceiling)),
        (1, Status::Ok)
    );
    assert_eq!(
        bits("-1e-400", &options.rounding(RoundingMode::Floor)),
        (1 << 63 | 1, Status::Ok)
    );

    let flush = options.subnormals(false);
    assert_eq!(bits("1e-310", &flush), (0, Status::Underflow));
    assert_eq!(bits("-1e-310", &flush), (1 << 63, Status::Underflow));
    assert_eq!(bits("2.2250738585072014e-308", &flush), (f64::MIN_POSITIVE.to_bits(), Status::Ok));
    // rounds up to the smallest normal
    assert_eq!(
        bits("2.2250738585072013e-308", &flush),
        (f64::MIN_POSITIVE.to_bits(), Status::Ok)
    );
}

#[test]
fn rounding_modes() {
    let with = |mode: RoundingMode| ParseOptions::default().rounding(mode);
    assert_eq!(bits("0.1", &with(RoundingMode::NearestEven)).0, 0x3fb9_9999_9999_999a);
    assert_eq!(bits("0.1", &with(RoundingMode::Ceiling)).0, 0x3fb9_9999_9999_999a);
    assert_eq!(bits("0.1", &with(RoundingMode::Floor)).0, 0x3fb9_9999_9999_9999);
    assert_eq!(bits("0.1", &with(RoundingMode::Truncate)).0, 0x3fb9_9999_9999_9999);
    assert_eq!(bits("-0.1", &with(RoundingMode::Floor)).0, 0xbfb9_9999_9999_999a);
    assert_eq!(bits("-0.1", &with(RoundingMode::Ceiling)).0, 0xbfb9_9999_9999_9999);
    // exact ties
    assert_eq!(decimal("9007199254740995"), 9_007_199_254_740_996.0);
    let (value, _) = parse::<f64>("9007199254740995", &with(RoundingMode::Truncate));
    assert_eq!(value, 9_007_199_254_740_994.0);
    // exact values are never moved
    assert_eq!(bits("0.5", &with(RoundingMode::Ceiling)).0, 0.5f64.to_bits());
}

#[test]
fn extended_precision() {
    let options = ParseOptions::default();
    let (one, _) = parse::<F80>("1", &options);
    assert_eq!(one.to_bits(), 0x3fff_8000_0000_0000_0000);
    let (value, _) = parse::<F80>("0.1", &options);
    assert_eq!(value.to_bits(), 0x3ffb_cccc_cccc_cccc_cccd);
    let (value, status) = parse::<F80>("1e4933", &options);
    assert_eq!((value.to_bits(), status), (0x7fff_8000_0000_0000_0000, Status::Overflow));
    let (value, status) = parse::<F80>("3.6e-4951", &options);
    assert_eq!((value.to_bits(), status), (1, Status::Ok));
    let (value, status) = parse::<F80>("1e-4952", &options);
    assert_eq!((value.to_bits(), status), (0, Status::Underflow));
}

#[test]
fn special_values() {
    let options = ParseOptions::default();
    assert_eq!(parse::<f64>("inf", &options), (f64::INFINITY, Status::Ok));
    assert_eq!(parse::<f64>("-Infinity", &options).0, f64::NEG_INFINITY);
    assert!(parse::<f64>("NaN", &options).0.is_nan());
    assert!(parse::<f32>("nan()", &options).0.is_nan());
    assert_eq!(bits("nan", &options).0, 0x7ff8_0000_0000_0000);
    assert_eq!(bits("-nan(ind)", &options).0, 0xfff8_0000_0000_0000);
    assert_eq!(bits("nan(snan)", &options).0, 0x7ff0_0000_0000_0001);
    assert_eq!(bits("-NAN(SNAN)", &options).0, 0xfff0_0000_0000_0001);
    assert_ne!(bits("nan(snan)", &options).0, bits("nan", &options).0);

    let (value, _) = parse::<F80>("-nan(snan)", &options);
    assert_eq!(
        FloatParts::decompose(value).category(),
        Category::Nan(NanKind::Signaling)
    );
    assert!(value.is_sign_negative());
}

#[test]
fn partial_and_strict() {
    let partial = ParseOptions::default().partial(true);
    let parsed = stof::<f64>("12.5abc", &partial).unwrap();
    assert_eq!((parsed.value, parsed.consumed), (12.5, 4));
    let parsed = stof::<f64>("1e", &partial).unwrap();
    assert_eq!((parsed.value, parsed.consumed), (1.0, 1));
    let parsed = stof::<f64>("-infinite", &partial).unwrap();
    assert_eq!((parsed.value, parsed.consumed), (f64::NEG_INFINITY, 4));
    let parsed = stof::<f64>("2.5e-1,", &partial).unwrap();
    assert_eq!((parsed.value, parsed.consumed), (0.25, 6));

    let strict = ParseOptions::default();
    let error = |text: &str| stof::<f64>(text, &strict).unwrap_err();
    assert_eq!(
        error("12.5abc"),
        ParseError {
            kind: ParseErrorKind::UnexpectedCharacter('a'),
            position: 4
        }
    );
    assert_eq!(error("1e").kind, ParseErrorKind::NoExponent);
    assert_eq!(error("").position, 0);
    assert_eq!(error("-").kind, ParseErrorKind::Empty);
    assert_eq!(error("abc").kind, ParseErrorKind::Invalid('a', 10));
    assert_eq!(error(" 1").position, 0);
    assert_eq!(error("1 ").position, 1);
    assert_eq!(
        error("1.5\u{e9}"),
        ParseError {
            kind: ParseErrorKind::UnexpectedCharacter('\u{e9}'),
            position: 3
        }
    );
    // nothing parsed is an error even in partial mode
    assert_eq!(stof::<f64>("x", &partial).unwrap_err().position, 0);
}
