use core::ops::RangeInclusive;

use winnow::{
    combinator::{alt, cut_err, opt, preceded, trace},
    token::{one_of, take_while},
    ModalResult, Parser,
};

use crate::Datetime;

/// The first position in `input` whose character cannot belong to a datetime.
///
/// This is a lookahead only; the run it delimits is probed with
/// [`looks_like_datetime`] before the real grammar ever runs.
pub(crate) fn date_token_end(input: &str) -> usize {
    input
        .find(|c: char| !matches!(c, '0'..='9' | 'T' | 't' | ' ' | 'Z' | 'z' | ':' | '-' | '+' | '.'))
        .unwrap_or(input.len())
}

/// Shape test for dispatching between datetimes and numbers.
///
/// Structural validation happens in [`date_time`]; this only checks that the
/// delimiters sit where `YYYY-MM-DDTHH:MM:SS` puts them.
pub(crate) fn looks_like_datetime(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 20
        && b[4] == b'-'
        && b[7] == b'-'
        && b[10] == b'T'
        && b[13] == b':'
        && b[16] == b':'
}

// ;; Date and Time (as defined in RFC 3339)

// date-time      = full-date "T" partial-time time-offset
// full-date      = date-fullyear "-" date-month "-" date-mday
// partial-time   = time-hour ":" time-minute ":" time-second [time-secfrac]
// time-offset    = "Z" / time-numoffset
pub(crate) fn date_time(input: &mut &str) -> ModalResult<Datetime> {
    trace(
        "date-time",
        (full_date, cut_err(('T', partial_time, time_offset))).map(
            |((year, month, day), (_, (hour, minute, second, microsecond), (offset_hour, offset_minute)))| {
                Datetime {
                    year,
                    month,
                    day,
                    hour,
                    minute,
                    second,
                    microsecond,
                    offset_hour,
                    offset_minute,
                }
            },
        ),
    )
    .parse_next(input)
}

fn full_date(input: &mut &str) -> ModalResult<(u16, u8, u8)> {
    trace(
        "full-date",
        (date_fullyear, '-', cut_err((date_month, '-', date_mday)))
            .map(|(year, _, (month, _, day))| (year, month, day))
            .verify(|&(year, month, day)| day <= days_in_month(year, month)),
    )
    .parse_next(input)
}

fn days_in_month(year: u16, month: u8) -> u8 {
    let is_leap_year = (year % 4 == 0) && ((year % 100 != 0) || (year % 400 == 0));
    match month {
        2 if is_leap_year => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn partial_time(input: &mut &str) -> ModalResult<(u8, u8, u8, u32)> {
    trace(
        "partial-time",
        (time_hour, ':', time_minute, ':', time_second, opt(time_secfrac)).map(
            |(hour, _, minute, _, second, microsecond)| {
                (hour, minute, second, microsecond.unwrap_or_default())
            },
        ),
    )
    .parse_next(input)
}

// time-numoffset = ( "+" / "-" ) time-hour ":" time-minute
fn time_offset(input: &mut &str) -> ModalResult<(i8, i8)> {
    trace(
        "time-offset",
        alt((
            'Z'.value((0, 0)),
            (one_of((b'+', b'-')), cut_err((time_hour, ':', time_minute))).map(
                |(sign, (hour, _, minute))| {
                    if sign == '-' {
                        (-(hour as i8), -(minute as i8))
                    } else {
                        (hour as i8, minute as i8)
                    }
                },
            ),
        )),
    )
    .parse_next(input)
}

// date-fullyear  = 4DIGIT
fn date_fullyear(input: &mut &str) -> ModalResult<u16> {
    unsigned_digits::<4, 4>
        .map(|s: &str| s.parse::<u16>().expect("4DIGIT fits in u16"))
        .parse_next(input)
}

// date-month     = 2DIGIT  ; 01-12
fn date_month(input: &mut &str) -> ModalResult<u8> {
    two_digits
        .verify(|month| (1..=12).contains(month))
        .parse_next(input)
}

// date-mday      = 2DIGIT  ; 01-28, 01-29, 01-30, 01-31 based on month/year
fn date_mday(input: &mut &str) -> ModalResult<u8> {
    two_digits
        .verify(|day| (1..=31).contains(day))
        .parse_next(input)
}

// time-hour      = 2DIGIT  ; 00-23
fn time_hour(input: &mut &str) -> ModalResult<u8> {
    two_digits.verify(|hour| *hour <= 23).parse_next(input)
}

// time-minute    = 2DIGIT  ; 00-59
fn time_minute(input: &mut &str) -> ModalResult<u8> {
    two_digits.verify(|minute| *minute <= 59).parse_next(input)
}

// time-second    = 2DIGIT  ; 00-58, 00-59, 00-60 based on leap second rules
fn time_second(input: &mut &str) -> ModalResult<u8> {
    two_digits.verify(|second| *second <= 60).parse_next(input)
}

// time-secfrac   = "." 1*DIGIT
//
// The digits accumulate literally into the microsecond field, so `.5` is
// five microseconds and `.000005` is the same value.
fn time_secfrac(input: &mut &str) -> ModalResult<u32> {
    preceded('.', unsigned_digits::<1, { usize::MAX }>)
        .try_map(|repr: &str| repr.parse::<u32>())
        .parse_next(input)
}

fn two_digits(input: &mut &str) -> ModalResult<u8> {
    unsigned_digits::<2, 2>
        .map(|s: &str| s.parse::<u8>().expect("2DIGIT fits in u8"))
        .parse_next(input)
}

fn unsigned_digits<'i, const MIN: usize, const MAX: usize>(
    input: &mut &'i str,
) -> ModalResult<&'i str> {
    take_while(MIN..=MAX, DIGIT).parse_next(input)
}

// DIGIT = %x30-39 ; 0-9
const DIGIT: RangeInclusive<u8> = b'0'..=b'9';

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(mut s: &str) -> Result<Datetime, ()> {
        match date_time(&mut s) {
            Ok(dt) if s.is_empty() => Ok(dt),
            _ => Err(()),
        }
    }

    #[test]
    fn utc_datetime() {
        let dt = parse("1979-05-27T07:32:00Z").unwrap();
        assert_eq!((dt.year, dt.month, dt.day), (1979, 5, 27));
        assert_eq!((dt.hour, dt.minute, dt.second), (7, 32, 0));
        assert_eq!(dt.microsecond, 0);
        assert!(dt.is_utc());
    }

    #[test]
    fn negative_offset() {
        let dt = parse("1979-05-27T00:32:00-07:00").unwrap();
        assert_eq!((dt.offset_hour, dt.offset_minute), (-7, 0));
    }

    #[test]
    fn fraction_accumulates_literally() {
        assert_eq!(parse("1979-05-27T00:32:00.999999Z").unwrap().microsecond, 999999);
        assert_eq!(parse("1979-05-27T00:32:00.5Z").unwrap().microsecond, 5);
    }

    #[test]
    fn fixed_widths_are_enforced() {
        for bad in [
            "1979-5-27T07:32:00Z",
            "1979-05-27T7:32:00Z",
            "79-05-27T07:32:00Z",
            "1979-05-27T07:32:00",
            "1979-05-27",
            "1979-05-27T07:32:00+0700",
        ] {
            assert!(parse(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn field_ranges_are_enforced() {
        for bad in [
            "1979-13-27T07:32:00Z",
            "1979-00-27T07:32:00Z",
            "1979-02-30T07:32:00Z",
            "2001-02-29T07:32:00Z",
            "1979-05-27T24:32:00Z",
            "1979-05-27T07:60:00Z",
        ] {
            assert!(parse(bad).is_err(), "{bad}");
        }
        // 2000 was a leap year.
        assert!(parse("2000-02-29T00:00:00Z").is_ok());
    }

    #[test]
    fn shape_probe() {
        assert!(looks_like_datetime("1979-05-27T07:32:00Z"));
        assert!(!looks_like_datetime("1979-05-27"));
        assert!(!looks_like_datetime("123.456"));
        let probe = "1979-05-27T07:32:00Z # when";
        assert_eq!(date_token_end(probe), 21);
    }
}
