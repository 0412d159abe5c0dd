//! # Field Parsers
//!
//! Parsers for the fixed-width field formats shared by the sentence decoders:
//! time of day, date, latitude and longitude, plus whole-field numbers.
//!
//! Every parser takes the complete text of one field and either decodes all of
//! it or fails with a [`FieldFormatError`].

use nom::{
    Err, Input, Parser,
    bytes::complete::take,
    character::complete,
    combinator::{rest_len, verify},
    error::{ErrorKind, ParseError},
    number,
    sequence::terminated,
};

use crate::error::{FieldErrorKind, FieldFormatError};

type PResult<'a, O> = nom::IResult<&'a str, O>;

type FieldResult<T> = Result<T, FieldFormatError>;

/// Ensures that the parser consumes all input.
///
/// Fails with `e` when `f` succeeds but leaves input behind.
pub(crate) fn consumed<I, E: ParseError<I>, F>(
    f: F,
    e: ErrorKind,
) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = E>
where
    I: Input,
    F: Parser<I, Error = E>,
{
    terminated(
        f,
        verify(rest_len, |len| len == &0).or(move |i| Err(Err::Error(E::from_error_kind(i, e)))),
    )
}

/// Runs `f` on exactly the next `count` characters.
fn with_take<'a, O, F>(
    count: usize,
    f: F,
) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    take(count).and_then(consumed(f, ErrorKind::Eof))
}

fn check_length(field: &'static str, text: &str, len: usize) -> FieldResult<()> {
    if text.len() != len {
        return Err(FieldFormatError::new(field, text, FieldErrorKind::Length));
    }

    Ok(())
}

/// Parses a UTC time of day in `hhmmss.sss` format into milliseconds since midnight.
///
/// The field must be exactly 10 characters. Hours, minutes and seconds are only
/// required to be numbers: `99` hours is accepted. The character between seconds
/// and milliseconds is not inspected.
///
/// # Examples
///
/// ```rust
/// use nmea0183_visitor::parse::time_of_day;
///
/// assert_eq!(time_of_day("064951.123"), Ok(24_591_123));
/// assert!(time_of_day("064951").is_err());
/// ```
pub fn time_of_day(text: &str) -> FieldResult<u32> {
    const FIELD: &str = "time";

    check_length(FIELD, text, 10)?;

    let result: PResult<(u8, u8, u8, &str, u16)> = (
        with_take(2, complete::u8),
        with_take(2, complete::u8),
        with_take(2, complete::u8),
        take(1u8),
        with_take(3, complete::u16),
    )
        .parse(text);

    let (_, (hours, minutes, seconds, _, millis)) =
        result.map_err(|_| FieldFormatError::new(FIELD, text, FieldErrorKind::Number))?;

    Ok(u32::from(hours) * 3_600_000
        + u32::from(minutes) * 60_000
        + u32::from(seconds) * 1_000
        + u32::from(millis))
}

/// Parses a `ddmmyy` date.
///
/// Two-digit years always mean 2000 + `yy`.
///
/// # Examples
///
/// ```rust
/// use nmea0183_visitor::parse::date;
/// use time::{Date, Month};
///
/// let expected = Date::from_calendar_date(2006, Month::April, 26).unwrap();
/// assert_eq!(date("260406").unwrap(), expected);
/// assert!(date("261306").is_err());
/// ```
pub fn date(text: &str) -> FieldResult<time::Date> {
    const FIELD: &str = "date";

    check_length(FIELD, text, 6)?;

    let result: PResult<(u8, u8, u8)> = (
        with_take(2, complete::u8),
        with_take(2, complete::u8),
        with_take(2, complete::u8),
    )
        .parse(text);

    let (_, (day, month, year)) =
        result.map_err(|_| FieldFormatError::new(FIELD, text, FieldErrorKind::Number))?;

    let invalid_date = |_| FieldFormatError::new(FIELD, text, FieldErrorKind::Date);
    let month = time::Month::try_from(month).map_err(invalid_date)?;

    time::Date::from_calendar_date(2000 + i32::from(year), month, day).map_err(invalid_date)
}

/// Parses a `ddmm.mmmm` latitude with its `N`/`S` indicator into signed decimal degrees.
///
/// # Examples
///
/// ```rust
/// use nmea0183_visitor::parse::latitude;
///
/// let north = latitude("2307.1256", "N").unwrap();
/// assert!((north - 23.11876).abs() < 1e-9);
///
/// let south = latitude("2307.1256", "S").unwrap();
/// assert_eq!(south, -north);
/// ```
pub fn latitude(text: &str, indicator: &str) -> FieldResult<f64> {
    check_coordinate("latitude", text, 2)?;
    let sign = hemisphere("latitude indicator", indicator, "N", "S")?;

    Ok(sign * decimal_degrees("latitude", text, 2)?)
}

/// Parses a `dddmm.mmmm` longitude with its `E`/`W` indicator into signed decimal degrees.
///
/// # Examples
///
/// ```rust
/// use nmea0183_visitor::parse::longitude;
///
/// let east = longitude("12016.4438", "E").unwrap();
/// assert!((east - 120.274063333).abs() < 1e-6);
///
/// assert!(longitude("12016.4438", "N").is_err());
/// ```
pub fn longitude(text: &str, indicator: &str) -> FieldResult<f64> {
    check_coordinate("longitude", text, 3)?;
    let sign = hemisphere("longitude indicator", indicator, "E", "W")?;

    Ok(sign * decimal_degrees("longitude", text, 3)?)
}

/// Parses a latitude/longitude pair spread over four fields.
///
/// A position is only decoded when both the latitude and the longitude fields are
/// present; otherwise `(0.0, 0.0)` is returned, the encoding for "no fix yet".
pub fn location(
    latitude_text: &str,
    latitude_indicator: &str,
    longitude_text: &str,
    longitude_indicator: &str,
) -> FieldResult<(f64, f64)> {
    if latitude_text.is_empty() || longitude_text.is_empty() {
        return Ok((0.0, 0.0));
    }

    Ok((
        latitude(latitude_text, latitude_indicator)?,
        longitude(longitude_text, longitude_indicator)?,
    ))
}

/// Checks the fixed layout of a coordinate: `degree_digits` digits, two minute
/// digits, a `.` and four decimals.
fn check_coordinate(field: &'static str, text: &str, degree_digits: usize) -> FieldResult<()> {
    check_length(field, text, degree_digits + 7)?;

    if text.as_bytes()[degree_digits + 2] != b'.' {
        return Err(FieldFormatError::new(field, text, FieldErrorKind::Separator));
    }

    Ok(())
}

fn decimal_degrees(field: &'static str, text: &str, degree_digits: usize) -> FieldResult<f64> {
    let result: PResult<(f64, f64)> = (
        with_take(degree_digits, number::complete::double),
        consumed(number::complete::double, ErrorKind::Eof),
    )
        .parse(text);

    let (_, (degrees, minutes)) =
        result.map_err(|_| FieldFormatError::new(field, text, FieldErrorKind::Number))?;

    Ok(degrees + minutes / 60.0)
}

fn hemisphere(
    field: &'static str,
    indicator: &str,
    positive: &str,
    negative: &str,
) -> FieldResult<f64> {
    match indicator {
        i if i == positive => Ok(1.0),
        i if i == negative => Ok(-1.0),
        _ => Err(FieldFormatError::new(field, indicator, FieldErrorKind::Value)),
    }
}

/// Parses a whole field as an unsigned decimal byte.
pub fn unsigned(field: &'static str, text: &str) -> FieldResult<u8> {
    let result: PResult<u8> = consumed(complete::u8, ErrorKind::Eof).parse(text);

    result
        .map(|(_, value)| value)
        .map_err(|_| FieldFormatError::new(field, text, FieldErrorKind::Number))
}

/// Parses a whole field as a decimal number.
pub fn decimal(field: &'static str, text: &str) -> FieldResult<f32> {
    let result: PResult<f32> = consumed(number::complete::float, ErrorKind::Eof).parse(text);

    result
        .map(|(_, value)| value)
        .map_err(|_| FieldFormatError::new(field, text, FieldErrorKind::Number))
}

/// Parses a decimal number, treating an empty field as `0`.
pub fn optional_decimal(field: &'static str, text: &str) -> FieldResult<f32> {
    if text.is_empty() {
        return Ok(0.0);
    }

    decimal(field, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use time::macros::date;

    fn kind<T: std::fmt::Debug>(result: FieldResult<T>) -> FieldErrorKind {
        result.unwrap_err().kind
    }

    #[test]
    fn test_time_of_day() {
        assert_eq!(time_of_day("064951.123"), Ok(24_591_123));
        assert_eq!(time_of_day("000000.000"), Ok(0));
        assert_eq!(time_of_day("235959.999"), Ok(86_399_999));

        // no range validation, and the separator is not inspected
        assert_eq!(time_of_day("990000.000"), Ok(356_400_000));
        assert_eq!(time_of_day("064951x123"), Ok(24_591_123));
    }

    #[test]
    fn test_time_of_day_errors() {
        assert_eq!(kind(time_of_day("064951.00")), FieldErrorKind::Length);
        assert_eq!(kind(time_of_day("064951")), FieldErrorKind::Length);
        assert_eq!(kind(time_of_day("")), FieldErrorKind::Length);
        assert_eq!(kind(time_of_day("06a951.123")), FieldErrorKind::Number);
        assert_eq!(kind(time_of_day("064951.1x3")), FieldErrorKind::Number);
        assert_eq!(kind(time_of_day("+64951.123")), FieldErrorKind::Number);

        let error = time_of_day("0649").unwrap_err();
        assert_eq!(error.field, "time");
        assert_eq!(error.input, "0649");
    }

    #[test]
    fn test_date() {
        assert_eq!(super::date("260406"), Ok(date!(2006 - 04 - 26)));
        assert_eq!(super::date("010100"), Ok(date!(2000 - 01 - 01)));
        assert_eq!(super::date("311299"), Ok(date!(2099 - 12 - 31)));

        assert_eq!(kind(super::date("26040")), FieldErrorKind::Length);
        assert_eq!(kind(super::date("26a406")), FieldErrorKind::Number);
        assert_eq!(kind(super::date("261306")), FieldErrorKind::Date);
        assert_eq!(kind(super::date("300206")), FieldErrorKind::Date);
        assert_eq!(kind(super::date("000106")), FieldErrorKind::Date);
    }

    #[test]
    fn test_latitude() {
        let value = latitude("2307.1256", "N").unwrap();
        assert!((value - 23.11876).abs() < 1e-9);

        let value = latitude("0000.0000", "S").unwrap();
        assert_eq!(value, 0.0);

        assert_eq!(kind(latitude("307.1256", "N")), FieldErrorKind::Length);
        assert_eq!(kind(latitude("23071.256", "N")), FieldErrorKind::Separator);
        assert_eq!(kind(latitude("2307.1256", "X")), FieldErrorKind::Value);
        assert_eq!(kind(latitude("2307.1256", "")), FieldErrorKind::Value);
        assert_eq!(kind(latitude("2307.1256", "NS")), FieldErrorKind::Value);
        assert_eq!(kind(latitude("2a07.1256", "N")), FieldErrorKind::Number);
        assert_eq!(kind(latitude("2307.12x6", "N")), FieldErrorKind::Number);

        let error = latitude("2307.1256", "E").unwrap_err();
        assert_eq!(error.field, "latitude indicator");
        assert_eq!(error.input, "E");
    }

    #[test]
    fn test_longitude() {
        let value = longitude("12016.4438", "E").unwrap();
        assert!((value - 120.274_063_333_333_33).abs() < 1e-9);

        let value = longitude("12016.4438", "W").unwrap();
        assert!((value + 120.274_063_333_333_33).abs() < 1e-9);

        assert_eq!(kind(longitude("2016.4438", "E")), FieldErrorKind::Length);
        assert_eq!(kind(longitude("1201.64438", "E")), FieldErrorKind::Separator);
        assert_eq!(kind(longitude("12016.4438", "S")), FieldErrorKind::Value);
        assert_eq!(kind(longitude("12O16.4438", "E")), FieldErrorKind::Number);
    }

    #[test]
    fn test_location() {
        assert_eq!(location("", "", "", ""), Ok((0.0, 0.0)));
        assert_eq!(location("2307.1256", "N", "", "E"), Ok((0.0, 0.0)));
        assert_eq!(location("", "N", "12016.4438", "E"), Ok((0.0, 0.0)));

        let (lat, lon) = location("2307.1256", "N", "12016.4438", "E").unwrap();
        assert!((lat - 23.11876).abs() < 1e-9);
        assert!((lon - 120.274_063_333_333_33).abs() < 1e-9);

        assert!(location("2307.1256", "X", "12016.4438", "E").is_err());
        assert!(location("2307.1256", "N", "12016.4438", "X").is_err());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(unsigned("satellites", "8"), Ok(8));
        assert_eq!(unsigned("satellites", "08"), Ok(8));
        assert_eq!(unsigned("position fix", "255"), Ok(255));
        assert_eq!(kind(unsigned("position fix", "256")), FieldErrorKind::Number);
        assert_eq!(kind(unsigned("satellites", "")), FieldErrorKind::Number);
        assert_eq!(kind(unsigned("satellites", "A8")), FieldErrorKind::Number);
        assert_eq!(kind(unsigned("satellites", "8A")), FieldErrorKind::Number);

        assert_eq!(decimal("speed", "0.03"), Ok(0.03));
        assert_eq!(decimal("speed", "165.48"), Ok(165.48));
        assert_eq!(kind(decimal("speed", "")), FieldErrorKind::Number);
        assert_eq!(kind(decimal("speed", "abc")), FieldErrorKind::Number);
        assert_eq!(kind(decimal("speed", "1.0x")), FieldErrorKind::Number);

        assert_eq!(optional_decimal("hdop", ""), Ok(0.0));
        assert_eq!(optional_decimal("hdop", "0.95"), Ok(0.95));
        assert!(optional_decimal("hdop", "x").is_err());
    }

    proptest! {
        #[test]
        fn prop_hemisphere_negates(degrees in 0u32..90, minutes in 0u32..600_000) {
            let text = format!("{:02}{:02}.{:04}", degrees, minutes / 10_000, minutes % 10_000);
            let north = latitude(&text, "N").unwrap();
            let south = latitude(&text, "S").unwrap();
            prop_assert_eq!(north, -south);
            prop_assert!(north >= 0.0);
        }

        #[test]
        fn prop_time_of_day_sum(h in 0u32..24, m in 0u32..60, s in 0u32..60, ms in 0u32..1000) {
            let text = format!("{h:02}{m:02}{s:02}.{ms:03}");
            prop_assert_eq!(time_of_day(&text), Ok(((h * 60 + m) * 60 + s) * 1000 + ms));
        }
    }
}
