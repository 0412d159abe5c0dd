//! # Error Types
//!
//! This module defines the error types produced while decoding sentence fields.
//!
//! Structurally invalid sentences (bad framing or checksum) never produce an error
//! value: they are skipped by the dispatcher. Errors only describe sentences that
//! passed validation but whose content could not be decoded.

use thiserror::Error;

use crate::sentences::SentenceType;

/// The way a single field failed to match its expected format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldErrorKind {
    /// The field does not have the fixed length its format requires.
    #[error("unexpected length")]
    Length,

    /// A literal separator (such as the `.` of `ddmm.mmmm`) is not where the
    /// format expects it.
    #[error("misplaced separator")]
    Separator,

    /// A numeric component could not be parsed.
    #[error("not a number")]
    Number,

    /// The field is well-formed but holds a value outside the accepted set,
    /// e.g. an `X` hemisphere indicator or a `K` altitude unit.
    #[error("unsupported value")]
    Value,

    /// The day, month and year do not form a calendar date.
    #[error("not a calendar date")]
    Date,
}

/// A field of a sentence could not be decoded.
///
/// Contains the name of the field, the raw text that was rejected and the
/// reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} `{input}`: {kind}")]
pub struct FieldFormatError {
    /// Name of the field, e.g. `"latitude"` or `"altitude unit"`.
    pub field: &'static str,
    /// The rejected field text.
    pub input: String,
    /// Why the field was rejected.
    pub kind: FieldErrorKind,
}

impl FieldFormatError {
    pub(crate) fn new(field: &'static str, input: &str, kind: FieldErrorKind) -> Self {
        FieldFormatError {
            field,
            input: input.to_owned(),
            kind,
        }
    }
}

/// A checksum-valid sentence whose content could not be decoded.
///
/// Only the first failing field is reported; decoding stops there and no record
/// is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SentenceDecodeError {
    /// The sentence does not have the number of fields its type requires.
    #[error("failed to parse {sentence}: invalid number of fields {found}, expected {expected}")]
    FieldCount {
        /// Type of the sentence being decoded
        sentence: SentenceType,
        /// Number of fields the sentence type requires
        expected: usize,
        /// Number of fields found in the sentence
        found: usize,
    },

    /// One of the fields of the sentence was invalid.
    #[error("failed to parse {sentence}: {source}")]
    Field {
        /// Type of the sentence being decoded
        sentence: SentenceType,
        /// The first field that failed
        #[source]
        source: FieldFormatError,
    },
}

impl SentenceDecodeError {
    /// Returns the type of the sentence that failed to decode.
    pub fn sentence_type(&self) -> SentenceType {
        match self {
            SentenceDecodeError::FieldCount { sentence, .. }
            | SentenceDecodeError::Field { sentence, .. } => *sentence,
        }
    }

    /// Returns the field error, if the failure was caused by a specific field.
    pub fn field_error(&self) -> Option<&FieldFormatError> {
        match self {
            SentenceDecodeError::FieldCount { .. } => None,
            SentenceDecodeError::Field { source, .. } => Some(source),
        }
    }
}
