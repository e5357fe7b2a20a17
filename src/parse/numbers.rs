use core::ops::RangeInclusive;

use winnow::{
    combinator::{alt, cut_err, opt, repeat, trace},
    error::{StrContext, StrContextValue},
    token::{one_of, rest, take_while},
    ModalResult, Parser,
};

// ;; Boolean

// boolean = true / false
//
// The whole word is taken before matching so that e.g. `truthy` is a
// malformed boolean rather than `true` with trailing garbage.
pub(crate) fn boolean(input: &mut &str) -> ModalResult<bool> {
    trace(
        "boolean",
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').verify_map(
            |word: &str| match word {
                TRUE => Some(true),
                FALSE => Some(false),
                _ => None,
            },
        ),
    )
    .parse_next(input)
}

const TRUE: &str = "true";
const FALSE: &str = "false";

// ;; Integer

// integer = [ minus / plus ] int-digits
// int-digits = DIGIT *( DIGIT / underscore DIGIT )
pub(crate) fn integer(input: &mut &str) -> ModalResult<i64> {
    trace(
        "integer",
        dec_int.and_then(cut_err(
            rest.try_map(|s: &str| s.replace('_', "").parse::<i64>()),
        )),
    )
    .parse_next(input)
}

fn dec_int<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    trace(
        "dec-int",
        (opt(one_of((b'+', b'-'))), zero_prefixable_int)
            .take()
            .context(StrContext::Label("integer")),
    )
    .parse_next(input)
}

// ;; Float

// float = dec-int ( exp / frac [ exp ] )
pub(crate) fn float(input: &mut &str) -> ModalResult<f64> {
    trace(
        "float",
        float_
            .and_then(cut_err(
                rest.try_map(|s: &str| s.replace('_', "").parse::<f64>())
                    .verify(|f: &f64| f.is_finite()),
            ))
            .context(StrContext::Label("floating-point number")),
    )
    .parse_next(input)
}

fn float_<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        dec_int,
        alt((exp.void(), (frac.void(), opt(exp.void())).void())),
    )
        .take()
        .parse_next(input)
}

// frac = decimal-point zero-prefixable-int
// decimal-point = %x2E               ; .
fn frac<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        '.',
        cut_err(zero_prefixable_int)
            .context(StrContext::Expected(StrContextValue::Description("digit"))),
    )
        .take()
        .parse_next(input)
}

// zero-prefixable-int = DIGIT *( DIGIT / underscore DIGIT )
fn zero_prefixable_int<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        digit,
        repeat(
            0..,
            alt((
                digit.void(),
                (
                    one_of(b'_'),
                    cut_err(digit)
                        .context(StrContext::Expected(StrContextValue::Description("digit"))),
                )
                    .void(),
            )),
        )
        .map(|()| ()),
    )
        .take()
        .parse_next(input)
}

// exp = "e" float-exp-part
// float-exp-part = [ minus / plus ] zero-prefixable-int
fn exp<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of((b'e', b'E')),
        opt(one_of([b'+', b'-'])),
        cut_err(zero_prefixable_int),
    )
        .take()
        .parse_next(input)
}

// DIGIT = %x30-39 ; 0-9
fn digit(input: &mut &str) -> ModalResult<char> {
    one_of(DIGIT).parse_next(input)
}
const DIGIT: RangeInclusive<u8> = b'0'..=b'9';

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_int(mut s: &str) -> Result<i64, ()> {
        integer(&mut s).map_err(|_| ())
    }

    fn parse_float(mut s: &str) -> Result<f64, ()> {
        float(&mut s).map_err(|_| ())
    }

    #[test]
    fn integers() {
        assert_eq!(parse_int("42"), Ok(42));
        assert_eq!(parse_int("+17"), Ok(17));
        assert_eq!(parse_int("-5"), Ok(-5));
        assert_eq!(parse_int("0"), Ok(0));
        assert_eq!(parse_int("1_000_000"), Ok(1_000_000));
    }

    #[test]
    fn integer_overflow() {
        assert!(parse_int("9999999999999999999").is_err());
    }

    #[test]
    fn underscore_placement() {
        assert!(parse_int("1__2").is_err());
        assert!(parse_int("1_").is_err());
        assert_eq!(parse_int("1_2"), Ok(12));
    }

    #[test]
    fn floats() {
        assert_eq!(parse_float("3.14"), Ok(3.14));
        assert_eq!(parse_float("-0.01"), Ok(-0.01));
        assert_eq!(parse_float("5e22"), Ok(5e22));
        assert_eq!(parse_float("1e06"), Ok(1e6));
        assert_eq!(parse_float("6.626e-34"), Ok(6.626e-34));
        assert_eq!(parse_float("9_224_617.445_991"), Ok(9_224_617.445_991));
    }

    #[test]
    fn float_overflow_is_rejected() {
        assert!(parse_float("1e999").is_err());
    }

    #[test]
    fn float_needs_digits_after_point() {
        assert!(parse_float("3.").is_err());
        assert!(parse_float("3.e5").is_err());
    }

    #[test]
    fn booleans() {
        let mut s = "true";
        assert_eq!(boolean(&mut s), Ok(true));
        let mut s = "false";
        assert_eq!(boolean(&mut s), Ok(false));
        for bad in ["True", "FALSE", "truthy", "t", "false2"] {
            let mut s = bad;
            assert!(boolean(&mut s).is_err(), "{bad}");
        }
    }
}
