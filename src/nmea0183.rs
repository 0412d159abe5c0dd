//! # NMEA 0183 Sentence Framing
//!
//! This module validates the framing of a single NMEA 0183 sentence and splits it
//! into its fields. It handles the format: `$TYPE,D1,D2,...,Dn*CC`
//!
//! Lines are expected without their line ending; [`std::io::BufRead::lines`] already
//! removes both `\n` and `\r\n`.

use nom::{
    AsBytes, Input, Parser,
    branch::alt,
    bytes::complete::take_until,
    character::complete::{char, hex_digit1},
    combinator::rest,
    error::ErrorKind,
    number::complete::hex_u32,
    sequence::preceded,
};

use crate::parse::consumed;

/// Returns whether `sentence` is a well-formed NMEA 0183 sentence with a correct checksum.
///
/// A sentence is accepted when:
/// 1. It is at least 6 bytes long (the shortest accepted sentence is `$T,*CC`)
/// 2. It starts with `$`
/// 3. The third byte from the end is the `*` checksum delimiter
/// 4. The two bytes after `*` are hexadecimal digits (either case) equal to the
///    XOR of every byte between `$` and `*`
///
/// Any other input yields `false`. Malformed sentences are common noise in raw
/// GPS streams, so this is not an error condition.
///
/// # Examples
///
/// ```rust
/// use nmea0183_visitor::is_valid_sentence;
///
/// assert!(is_valid_sentence("$GPGGA,123456,data*41"));
/// assert!(is_valid_sentence("$GPGGA,064951.000,,,,,0,0,,,M,,M,,*47"));
///
/// assert!(!is_valid_sentence("$GPGGA,123456,data*42")); // (wrong checksum)
/// assert!(!is_valid_sentence("GPGGA,123456,data*41"));  // (missing `$`)
/// assert!(!is_valid_sentence("$GPGGA,123456,data"));    // (missing checksum)
/// assert!(!is_valid_sentence("$T*"));                   // (too short)
/// ```
pub fn is_valid_sentence(sentence: &str) -> bool {
    let bytes = sentence.as_bytes();
    let len = bytes.len();

    if len < 6 || bytes[0] != b'$' || bytes[len - 3] != b'*' {
        return false;
    }

    // `$` and `*` are ASCII, so both slice bounds are on char boundaries.
    let (_, calculated) = checksum(&sentence[1..len - 3]);

    match hex_checksum(&sentence[len - 2..]) {
        Ok((_, found)) => found == calculated,
        Err(_) => false,
    }
}

/// Parses the two hexadecimal digits that follow the `*` delimiter.
fn hex_checksum(i: &str) -> nom::IResult<&str, u8> {
    let digits: nom::IResult<&str, &str> = consumed(hex_digit1, ErrorKind::HexDigit).parse(i);
    let (i, digits) = digits?;
    let (_, cc) = hex_u32::<_, nom::error::Error<&str>>.parse(digits)?;

    Ok((i, cc as u8))
}

/// Calculates the NMEA 0183 checksum for the given sentence body.
///
/// The checksum is the XOR of every byte between the `$` prefix and the `*`
/// delimiter, excluding both.
///
/// # Returns
///
/// A tuple of `(input, checksum)` where `input` is returned unchanged.
///
/// # Examples
///
/// ```rust
/// use nmea0183_visitor::checksum;
///
/// let (_, cc) = checksum("GPGGA,123456,data");
/// assert_eq!(cc, 0x41);
/// ```
pub fn checksum<I>(input: I) -> (I, u8)
where
    I: Input + AsBytes,
{
    let calculated_checksum = input
        .as_bytes()
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte);

    (input, calculated_checksum)
}

/// Formats a checksum value as a two-digit uppercase hexadecimal string.
///
/// # Examples
///
/// ```rust
/// use nmea0183_visitor::format_checksum;
///
/// assert_eq!(format_checksum(0x41), "41");
/// assert_eq!(format_checksum(0x0A), "0A");
/// ```
pub fn format_checksum(checksum: u8) -> String {
    format!("{checksum:02X}")
}

/// Splits a validated sentence into its comma-separated fields.
///
/// The leading `$TYPE` token is dropped and the `*CC` checksum suffix is removed
/// from the last field. Empty fields are kept: they mean "not provided".
///
/// A sentence without any `,` has no fields and yields an empty vector.
///
/// # Examples
///
/// ```rust
/// use nmea0183_visitor::split_fields;
///
/// assert_eq!(split_fields("$GPGSA,A,1,,*32"), vec!["A", "1", "", ""]);
/// assert!(split_fields("$GPGSA*42").is_empty());
/// ```
pub fn split_fields(sentence: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = sentence.split(',').skip(1).collect();

    if let Some(last) = fields.last_mut() {
        *last = last
            .get(..last.len().saturating_sub(3))
            .unwrap_or_default();
    }

    fields
}

/// Returns the sentence type tag, the text between `$` and the first `,`.
///
/// When the sentence has no fields the tag ends at the `*` delimiter.
///
/// # Examples
///
/// ```rust
/// use nmea0183_visitor::sentence_tag;
///
/// assert_eq!(sentence_tag("$GPRMC,064951.000,V,,,,,0.00,0.00,260406,,,N*44"), "GPRMC");
/// assert_eq!(sentence_tag("$GPTXT*4F"), "GPTXT");
/// ```
pub fn sentence_tag(sentence: &str) -> &str {
    let result: nom::IResult<&str, &str> =
        preceded(char('$'), alt((take_until(","), take_until("*"), rest))).parse(sentence);

    match result {
        Ok((_, tag)) => tag,
        Err(_) => sentence,
    }
}
