//! # Sentence Decoders
//!
//! Strongly-typed records for the supported NMEA 0183 sentences and the decoders
//! that build them from the fields of a validated sentence.

mod gga;
mod gsa;
mod rmc;

pub use gga::GGA;
pub use gsa::GSA;
pub use rmc::RMC;

use std::fmt;

use crate::error::{FieldErrorKind, FieldFormatError, SentenceDecodeError};

/// A trait for records that can be decoded from the fields of a sentence.
///
/// `fields` is the output of [`split_fields`](crate::split_fields): the sentence
/// type token is already removed and the checksum is stripped from the last field.
///
/// Implementors provide [`Decode::decode_fields`]; [`Decode::decode`] checks the
/// field count first and attaches the sentence type to any field error.
///
/// # Example
///
/// ```rust
/// use nmea0183_visitor::{Decode, GSA, split_fields};
///
/// let fields = split_fields("$GPGSA,A,3,03,04,01,32,22,28,11,,,,,,2.32,0.95,2.11*02");
/// let gsa = GSA::decode(&fields).unwrap();
/// assert_eq!(gsa.satellites.as_slice(), &[3, 4, 1, 32, 22, 28, 11]);
/// ```
pub trait Decode: Sized {
    /// The sentence type this record is decoded from.
    const SENTENCE_TYPE: SentenceType;

    /// The exact number of fields the sentence must have.
    const FIELD_COUNT: usize;

    /// Decodes a record from fields whose count was already checked.
    fn decode_fields(fields: &[&str]) -> Result<Self, FieldFormatError>;

    /// Decodes a record, failing if the field count or any field is invalid.
    fn decode(fields: &[&str]) -> Result<Self, SentenceDecodeError> {
        if fields.len() != Self::FIELD_COUNT {
            return Err(SentenceDecodeError::FieldCount {
                sentence: Self::SENTENCE_TYPE,
                expected: Self::FIELD_COUNT,
                found: fields.len(),
            });
        }

        Self::decode_fields(fields).map_err(|source| SentenceDecodeError::Field {
            sentence: Self::SENTENCE_TYPE,
            source,
        })
    }
}

/// The closed set of sentence types understood by the decoder.
///
/// Any other tag is [`SentenceType::Unknown`]: decoding it is a successful no-op.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceType {
    /// Global Positioning System Fix Data
    GGA,
    /// Recommended Minimum Navigation Information
    RMC,
    /// GPS DOP and active satellites
    GSA,
    /// Any other sentence
    Unknown,
}

impl SentenceType {
    /// Classifies a sentence tag from the GPS talker (`GPGGA`, `GPRMC`, `GPGSA`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nmea0183_visitor::SentenceType;
    ///
    /// assert_eq!(SentenceType::from_tag("GPGGA"), SentenceType::GGA);
    /// assert_eq!(SentenceType::from_tag("GNGGA"), SentenceType::Unknown);
    /// assert_eq!(SentenceType::from_tag("GPVTG"), SentenceType::Unknown);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "GPGGA" => SentenceType::GGA,
            "GPRMC" => SentenceType::RMC,
            "GPGSA" => SentenceType::GSA,
            _ => SentenceType::Unknown,
        }
    }

    /// Classifies a sentence tag by its formatter, ignoring the two-character talker ID.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nmea0183_visitor::SentenceType;
    ///
    /// assert_eq!(SentenceType::from_formatter("GNGGA"), SentenceType::GGA);
    /// assert_eq!(SentenceType::from_formatter("GLGSA"), SentenceType::GSA);
    /// assert_eq!(SentenceType::from_formatter("GGA"), SentenceType::Unknown);
    /// ```
    pub fn from_formatter(tag: &str) -> Self {
        if tag.len() != 5 {
            return SentenceType::Unknown;
        }

        match tag.get(2..) {
            Some("GGA") => SentenceType::GGA,
            Some("RMC") => SentenceType::RMC,
            Some("GSA") => SentenceType::GSA,
            _ => SentenceType::Unknown,
        }
    }
}

impl fmt::Display for SentenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SentenceType::GGA => "GGA",
            SentenceType::RMC => "RMC",
            SentenceType::GSA => "GSA",
            SentenceType::Unknown => "unknown",
        };

        f.write_str(name)
    }
}

/// A decoded sentence.
///
/// ## Example Usage
///
/// ```rust
/// use nmea0183_visitor::{NmeaSentence, parse_sentence};
///
/// let sentence = parse_sentence("$GPRMC,064951.000,V,,,,,0.00,0.00,260406,,,N*44");
///
/// match sentence {
///     Some(Ok(NmeaSentence::RMC(rmc))) => println!("Time: {}", rmc.time),
///     Some(Ok(other)) => println!("Other sentence: {:?}", other.sentence_type()),
///     Some(Err(error)) => println!("Decode error: {error}"),
///     None => println!("Not a valid sentence"),
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum NmeaSentence {
    /// Global Positioning System Fix Data
    GGA(GGA),
    /// Recommended Minimum Navigation Information
    RMC(RMC),
    /// GPS DOP and active satellites
    GSA(GSA),
    /// A sentence type without a decoder
    Unknown,
}

impl NmeaSentence {
    /// Decodes the fields of a sentence of the given type.
    ///
    /// [`SentenceType::Unknown`] always succeeds with [`NmeaSentence::Unknown`].
    pub fn decode(
        sentence_type: SentenceType,
        fields: &[&str],
    ) -> Result<Self, SentenceDecodeError> {
        match sentence_type {
            SentenceType::GGA => GGA::decode(fields).map(NmeaSentence::GGA),
            SentenceType::RMC => RMC::decode(fields).map(NmeaSentence::RMC),
            SentenceType::GSA => GSA::decode(fields).map(NmeaSentence::GSA),
            SentenceType::Unknown => Ok(NmeaSentence::Unknown),
        }
    }

    /// Returns the type of this sentence.
    pub fn sentence_type(&self) -> SentenceType {
        match self {
            NmeaSentence::GGA(_) => SentenceType::GGA,
            NmeaSentence::RMC(_) => SentenceType::RMC,
            NmeaSentence::GSA(_) => SentenceType::GSA,
            NmeaSentence::Unknown => SentenceType::Unknown,
        }
    }
}

/// Decodes a single-character code field into one of the code enums.
fn code<T>(
    field: &'static str,
    text: &str,
    from_field: fn(&str) -> Option<T>,
) -> Result<T, FieldFormatError> {
    from_field(text).ok_or_else(|| FieldFormatError::new(field, text, FieldErrorKind::Value))
}

macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $char:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Decodes a field holding exactly one code character.
            pub fn from_field(field: &str) -> Option<Self> {
                let mut chars = field.chars();
                match (chars.next(), chars.next()) {
                    $(
                        (Some($char), None) => Some(Self::$variant),
                    )*
                    _ => None,
                }
            }

            /// Returns the character encoding this value.
            pub fn as_char(self) -> char {
                match self {
                    $(
                        Self::$variant => $char,
                    )*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_char())
            }
        }
    };
}

code_enum! {
    /// RMC Status
    pub enum Status {
        /// A - Data valid
        'A' => Valid,
        /// V - Data not valid
        'V' => Invalid,
    }
}

code_enum! {
    /// RMC Mode Indicator
    pub enum Mode {
        /// A - Autonomous mode
        'A' => Autonomous,
        /// D - Differential mode
        'D' => Differential,
        /// E - Estimated (dead-reckoning) mode
        'E' => Estimated,
        /// N - Data not valid
        'N' => NotValid,
    }
}

code_enum! {
    /// GSA Selection Mode (mode 1)
    pub enum SelectionMode {
        /// M - Manual, forced to operate in 2D or 3D
        'M' => Manual,
        /// A - Automatic, 2D/3D
        'A' => Automatic,
    }
}

code_enum! {
    /// GSA Fix Mode (mode 2)
    pub enum FixMode {
        /// 1 - No fix
        '1' => NoFix,
        /// 2 - 2D fix, fewer than 4 satellites used
        '2' => Fix2D,
        /// 3 - 3D fix, at least 4 satellites used
        '3' => Fix3D,
    }
}
