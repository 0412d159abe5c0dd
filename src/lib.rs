//! # NMEA 0183 Visitor
//!
//! This library decodes NMEA 0183 sentences of the form `$TTSSS,D1,D2,...,Dn*CC`
//! read line by line from any byte stream, and hands the decoded records to a
//! [`Visitor`].
//!
//! Supported sentences:
//! - [`GGA`]: Global Positioning System Fix Data
//! - [`RMC`]: Recommended Minimum Navigation Information
//! - [`GSA`]: GPS DOP and active satellites
//!
//! Lines with a missing `$`, a missing `*` or a wrong checksum are skipped; any
//! other sentence type is accepted and ignored.
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_visitor::{GGA, RMC, SentenceDecodeError, Visitor, visit};
//!
//! #[derive(Default)]
//! struct Track {
//!     fixes: usize,
//!     errors: usize,
//! }
//!
//! impl Visitor for Track {
//!     fn on_gga(&mut self, gga: GGA) {
//!         if gga.position_fix != 0 {
//!             self.fixes += 1;
//!         }
//!     }
//!
//!     fn on_rmc(&mut self, rmc: RMC) {
//!         println!("{} at {}", rmc.status, rmc.time);
//!     }
//!
//!     fn on_after_parse(&mut self, _: &str, _: &str, error: Option<&SentenceDecodeError>) {
//!         if error.is_some() {
//!             self.errors += 1;
//!         }
//!     }
//! }
//!
//! let input = "\
//! $GPGGA,064951.000,2307.1256,N,12016.4438,E,1,8,0.95,39.9,M,17.8,M,,*63\r
//! $GPRMC,064951.000,V,,,,,0.00,0.00,260406,,,N*44\r
//! $GPGGA,064951.000,,,,,0,0,,,K,,M,,*41\r
//! ";
//!
//! let mut track = Track::default();
//! visit(input.as_bytes(), &mut track).unwrap();
//!
//! assert_eq!(track.fixes, 1);
//! assert_eq!(track.errors, 1);
//! ```

pub mod error;
mod nmea0183;
pub mod parse;
pub mod sentences;
mod visit;

pub use error::{FieldErrorKind, FieldFormatError, SentenceDecodeError};
pub use nmea0183::*;
pub use sentences::{
    Decode, FixMode, GGA, GSA, Mode, NmeaSentence, RMC, SelectionMode, SentenceType, Status,
};
pub use visit::*;

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
