//! # Sentence Dispatch
//!
//! This module drives decoding over a stream of lines. Each line is validated,
//! classified by its sentence type, decoded and handed to a [`Visitor`].
//!
//! Processing is synchronous: a line is fully dispatched before the next one is
//! read. Invalid lines are skipped silently and decode errors are reported to the
//! visitor; only a failure of the line source stops the stream.

use std::io::{self, BufRead};

use log::{debug, trace};

use crate::{
    GGA, GSA, RMC,
    error::SentenceDecodeError,
    nmea0183::{is_valid_sentence, sentence_tag, split_fields},
    sentences::{NmeaSentence, SentenceType},
};

/// Receives the sentences decoded by a [`Dispatcher`].
///
/// Every method has a default implementation, so a visitor only implements the
/// callbacks it is interested in.
///
/// For every valid sentence the dispatcher calls, in order:
/// 1. [`Visitor::on_before_parse`]; returning `false` skips the sentence entirely
/// 2. one of [`Visitor::on_gga`], [`Visitor::on_rmc`] or [`Visitor::on_gsa`] if the
///    sentence was decoded into a record
/// 3. [`Visitor::on_after_parse`] with the decode error, if any
///
/// # Examples
///
/// ```rust
/// use nmea0183_visitor::{GGA, Visitor, visit};
///
/// #[derive(Default)]
/// struct Altitudes(Vec<f32>);
///
/// impl Visitor for Altitudes {
///     fn on_gga(&mut self, gga: GGA) {
///         self.0.push(gga.altitude);
///     }
/// }
///
/// let input = "$GPGGA,064951.000,2307.1256,N,12016.4438,E,1,8,0.95,39.9,M,17.8,M,,*63\n";
///
/// let mut altitudes = Altitudes::default();
/// visit(input.as_bytes(), &mut altitudes).unwrap();
/// assert_eq!(altitudes.0, vec![39.9]);
/// ```
pub trait Visitor {
    /// Called before a valid sentence is decoded.
    ///
    /// `sentence_type` is the raw tag of the sentence, e.g. `GPGGA`. Return `false`
    /// to skip decoding; [`Visitor::on_after_parse`] is then not called either.
    fn on_before_parse(&mut self, _sentence_type: &str, _sentence: &str) -> bool {
        true
    }

    /// Called after a sentence was decoded, with the error if decoding failed.
    ///
    /// Sentences of an unknown type are reported here with no error.
    fn on_after_parse(
        &mut self,
        _sentence_type: &str,
        _sentence: &str,
        _error: Option<&SentenceDecodeError>,
    ) {
    }

    /// Called with every successfully decoded GGA sentence.
    fn on_gga(&mut self, _gga: GGA) {}

    /// Called with every successfully decoded RMC sentence.
    fn on_rmc(&mut self, _rmc: RMC) {}

    /// Called with every successfully decoded GSA sentence.
    fn on_gsa(&mut self, _gsa: GSA) {}
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    fn on_before_parse(&mut self, sentence_type: &str, sentence: &str) -> bool {
        (**self).on_before_parse(sentence_type, sentence)
    }

    fn on_after_parse(
        &mut self,
        sentence_type: &str,
        sentence: &str,
        error: Option<&SentenceDecodeError>,
    ) {
        (**self).on_after_parse(sentence_type, sentence, error)
    }

    fn on_gga(&mut self, gga: GGA) {
        (**self).on_gga(gga)
    }

    fn on_rmc(&mut self, rmc: RMC) {
        (**self).on_rmc(rmc)
    }

    fn on_gsa(&mut self, gsa: GSA) {
        (**self).on_gsa(gsa)
    }
}

/// Defines which talker IDs are accepted in front of a sentence formatter.
///
/// The tag of an NMEA 0183 sentence is a two-character talker ID (`GP` for GPS,
/// `GN` for combined GNSS, `GL` for GLONASS, ...) followed by a three-character
/// formatter (`GGA`, `RMC`, `GSA`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TalkerMode {
    /// Only the GPS talker is decoded.
    ///
    /// `GPGGA`, `GPRMC` and `GPGSA` are routed to their decoders; any other tag,
    /// including `GNGGA`, is treated as an unknown sentence.
    #[default]
    Gps,

    /// Any talker is decoded.
    ///
    /// The talker ID is ignored and the sentence is routed by its formatter only,
    /// so `GNGGA` and `GLGSA` are decoded like `GPGGA` and `GPGSA`.
    Any,
}

impl TalkerMode {
    fn classify(self, tag: &str) -> SentenceType {
        match self {
            TalkerMode::Gps => SentenceType::from_tag(tag),
            TalkerMode::Any => SentenceType::from_formatter(tag),
        }
    }
}

/// Configures a [`Dispatcher`].
///
/// # Examples
///
/// ```rust
/// use nmea0183_visitor::{DispatcherBuilder, NmeaSentence, TalkerMode};
///
/// let dispatcher = DispatcherBuilder::new()
///     .talker_mode(TalkerMode::Any)
///     .build();
///
/// let result = dispatcher.parse_sentence("$GNGGA,064951.123,,,,,0,0,,,M,,M,,*59");
/// assert!(matches!(result, Some(Ok(NmeaSentence::GGA(_)))));
/// ```
#[must_use]
#[derive(Debug, Default, Clone, Copy)]
pub struct DispatcherBuilder {
    /// Talker mode for the dispatcher.
    talker_mode: TalkerMode,
}

impl DispatcherBuilder {
    /// Creates a new builder with default settings.
    ///
    /// The default settings are:
    /// - Talker mode: [`TalkerMode::Gps`]
    pub fn new() -> Self {
        DispatcherBuilder {
            talker_mode: TalkerMode::Gps,
        }
    }

    /// Sets the talker mode of the dispatcher.
    pub fn talker_mode(mut self, mode: TalkerMode) -> Self {
        self.talker_mode = mode;
        self
    }

    /// Builds the dispatcher with the configured settings.
    pub fn build(self) -> Dispatcher {
        Dispatcher {
            talker_mode: self.talker_mode,
        }
    }
}

/// Validates, decodes and dispatches NMEA 0183 sentences.
///
/// A dispatcher only holds its configuration: every call owns its own scan state,
/// so one dispatcher can serve any number of independent streams.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Dispatcher {
    talker_mode: TalkerMode,
}

impl Dispatcher {
    /// Returns a builder to configure a dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Returns the talker mode of this dispatcher.
    pub fn talker_mode(&self) -> TalkerMode {
        self.talker_mode
    }

    /// Classifies a sentence tag according to the talker mode.
    pub fn sentence_type(&self, tag: &str) -> SentenceType {
        self.talker_mode.classify(tag)
    }

    /// Validates and decodes one sentence.
    ///
    /// Returns [`None`] when the sentence is not valid (see
    /// [`is_valid_sentence`](crate::is_valid_sentence)), otherwise the decoded
    /// sentence or the decode error.
    pub fn parse_sentence(
        &self,
        sentence: &str,
    ) -> Option<Result<NmeaSentence, SentenceDecodeError>> {
        if !is_valid_sentence(sentence) {
            trace!("skipping invalid sentence {sentence:?}");
            return None;
        }

        Some(self.decode(sentence_tag(sentence), sentence))
    }

    fn decode(&self, tag: &str, sentence: &str) -> Result<NmeaSentence, SentenceDecodeError> {
        NmeaSentence::decode(self.sentence_type(tag), &split_fields(sentence))
    }

    /// Dispatches one line to `visitor`.
    ///
    /// Invalid lines are skipped without calling the visitor.
    pub fn dispatch<V>(&self, sentence: &str, visitor: &mut V)
    where
        V: Visitor + ?Sized,
    {
        if !is_valid_sentence(sentence) {
            trace!("skipping invalid sentence {sentence:?}");
            return;
        }

        let tag = sentence_tag(sentence);

        if !visitor.on_before_parse(tag, sentence) {
            trace!("{tag} sentence skipped by visitor");
            return;
        }

        let error = match self.decode(tag, sentence) {
            Ok(NmeaSentence::GGA(gga)) => {
                visitor.on_gga(gga);
                None
            }
            Ok(NmeaSentence::RMC(rmc)) => {
                visitor.on_rmc(rmc);
                None
            }
            Ok(NmeaSentence::GSA(gsa)) => {
                visitor.on_gsa(gsa);
                None
            }
            Ok(NmeaSentence::Unknown) => {
                trace!("no decoder for {tag} sentence");
                None
            }
            Err(error) => {
                debug!("{error}: {sentence:?}");
                Some(error)
            }
        };

        visitor.on_after_parse(tag, sentence, error.as_ref());
    }

    /// Dispatches every line produced by `lines` to `visitor`.
    ///
    /// Stops at the end of the lines or at the first read error, which is returned.
    pub fn visit_lines<I, V>(&self, lines: I, visitor: &mut V) -> io::Result<()>
    where
        I: IntoIterator<Item = io::Result<String>>,
        V: Visitor + ?Sized,
    {
        for line in lines {
            let line = line.inspect_err(|error| debug!("failed to read line: {error}"))?;
            self.dispatch(&line, visitor);
        }

        Ok(())
    }

    /// Dispatches every line of `reader` to `visitor`.
    ///
    /// Line endings (`\n` or `\r\n`) are removed before validation.
    pub fn visit<R, V>(&self, reader: R, visitor: &mut V) -> io::Result<()>
    where
        R: BufRead,
        V: Visitor + ?Sized,
    {
        self.visit_lines(reader.lines(), visitor)
    }

    /// Returns an iterator over the sentences of `reader`.
    pub fn sentences<R: BufRead>(&self, reader: R) -> Sentences<R> {
        Sentences {
            lines: reader.lines(),
            dispatcher: *self,
            failed: false,
        }
    }
}

/// An iterator over the valid sentences of a reader.
///
/// Invalid lines are skipped. Each item is either a read error, after which the
/// iterator ends, or the outcome of decoding one sentence.
///
/// This struct is created by [`Dispatcher::sentences`] and [`sentences`].
///
/// # Examples
///
/// ```rust
/// use nmea0183_visitor::{NmeaSentence, sentences};
///
/// let input = "\
/// $GPRMC,064951.000,V,,,,,0.00,0.00,260406,,,N*44
/// garbage
/// $GPGSA,A,3,03,04,01,32,22,28,11,,,,,,2.32,0.95,2.11*02
/// ";
///
/// let decoded: Vec<_> = sentences(input.as_bytes())
///     .collect::<std::io::Result<_>>()
///     .unwrap();
///
/// assert_eq!(decoded.len(), 2);
/// assert!(matches!(decoded[0], Ok(NmeaSentence::RMC(_))));
/// assert!(matches!(decoded[1], Ok(NmeaSentence::GSA(_))));
/// ```
#[derive(Debug)]
pub struct Sentences<R> {
    lines: io::Lines<R>,
    dispatcher: Dispatcher,
    failed: bool,
}

impl<R: BufRead> Iterator for Sentences<R> {
    type Item = io::Result<Result<NmeaSentence, SentenceDecodeError>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            match self.lines.next()? {
                Ok(line) => {
                    if let Some(result) = self.dispatcher.parse_sentence(&line) {
                        return Some(Ok(result));
                    }
                }
                Err(error) => {
                    debug!("failed to read line: {error}");
                    self.failed = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

/// Dispatches every line of `reader` to `visitor` with the default [`Dispatcher`].
pub fn visit<R, V>(reader: R, visitor: &mut V) -> io::Result<()>
where
    R: BufRead,
    V: Visitor + ?Sized,
{
    Dispatcher::default().visit(reader, visitor)
}

/// Dispatches every line of `lines` to `visitor` with the default [`Dispatcher`].
pub fn visit_lines<I, V>(lines: I, visitor: &mut V) -> io::Result<()>
where
    I: IntoIterator<Item = io::Result<String>>,
    V: Visitor + ?Sized,
{
    Dispatcher::default().visit_lines(lines, visitor)
}

/// Validates and decodes one sentence with the default [`Dispatcher`].
///
/// # Examples
///
/// ```rust
/// use nmea0183_visitor::{NmeaSentence, parse_sentence};
///
/// assert!(parse_sentence("$GPGGA,064951.000,,,,,0,0,,,M,,M,,*48").is_none());
/// assert_eq!(parse_sentence("$GPVTG,*7E"), Some(Ok(NmeaSentence::Unknown)));
///
/// let result = parse_sentence("$GPGGA,064951.123,,,,,0,0,,,M,,M,,*47");
/// assert!(matches!(result, Some(Ok(NmeaSentence::GGA(_)))));
/// ```
pub fn parse_sentence(sentence: &str) -> Option<Result<NmeaSentence, SentenceDecodeError>> {
    Dispatcher::default().parse_sentence(sentence)
}

/// Returns an iterator over the sentences of `reader` with the default [`Dispatcher`].
pub fn sentences<R: BufRead>(reader: R) -> Sentences<R> {
    Dispatcher::default().sentences(reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        assert_eq!(Dispatcher::builder().build(), Dispatcher::default());
        assert_eq!(Dispatcher::default().talker_mode(), TalkerMode::Gps);

        let dispatcher = DispatcherBuilder::new().talker_mode(TalkerMode::Any).build();
        assert_eq!(dispatcher.talker_mode(), TalkerMode::Any);
    }

    #[test]
    fn test_talker_mode() {
        let gps = Dispatcher::default();
        assert_eq!(gps.sentence_type("GPGGA"), SentenceType::GGA);
        assert_eq!(gps.sentence_type("GNGGA"), SentenceType::Unknown);

        let any = Dispatcher::builder().talker_mode(TalkerMode::Any).build();
        assert_eq!(any.sentence_type("GPGGA"), SentenceType::GGA);
        assert_eq!(any.sentence_type("GNGGA"), SentenceType::GGA);
        assert_eq!(any.sentence_type("GLGSA"), SentenceType::GSA);
        assert_eq!(any.sentence_type("GNRMC"), SentenceType::RMC);
        assert_eq!(any.sentence_type("GPGSV"), SentenceType::Unknown);
    }

    #[test]
    fn test_default_visitor() {
        struct Ignore;
        impl Visitor for Ignore {}

        let mut visitor = Ignore;
        assert!(visitor.on_before_parse("GPGGA", "$GPGGA*56"));
        visitor.on_after_parse("GPGGA", "$GPGGA*56", None);

        let input = "$GPGGA,064951.123,,,,,0,0,,,M,,M,,*47\n$GPGGA,064951.000,,,,,0,0,,,K,,M,,*41\n";
        assert!(visit(input.as_bytes(), &mut visitor).is_ok());
    }

    #[test]
    fn test_parse_sentence() {
        assert_eq!(parse_sentence(""), None);
        assert_eq!(parse_sentence("$GPGGA,064951.000,,,,,0,0,,,M,,M,,*48"), None);

        let result = parse_sentence("$GPGGA,064951.000,,,,,0,0,,,K,,M,,*41");
        assert!(matches!(result, Some(Err(SentenceDecodeError::Field { .. }))));
    }
}
