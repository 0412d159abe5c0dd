#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::FieldFormatError,
    parse::{date, decimal, location, time_of_day},
    sentences::{Decode, Mode, SentenceType, Status, code},
};

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///         0          1 2         3 4          5 6    7      8      9   10 11
///         |          | |         | |          | |    |      |      |   |  |
///  $GPRMC,hhmmss.sss,A,ddmm.mmmm,a,dddmm.mmmm,a,x.xx,xxx.xx,ddmmyy,x.x,a,m*hh
/// ```
///
/// The magnetic variation fields (9 and 10) are not decoded.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct RMC {
    /// Fix date and time in UTC
    pub time: time::OffsetDateTime,
    /// Status
    pub status: Status,
    /// Latitude in decimal degrees, negative south of the equator
    pub latitude: f64,
    /// Longitude in decimal degrees, negative west of Greenwich
    pub longitude: f64,
    /// Mode Indicator
    pub mode: Mode,
    /// Speed over ground in knots
    pub speed: f32,
    /// Course over ground in degrees
    pub heading: f32,
}

impl Decode for RMC {
    const SENTENCE_TYPE: SentenceType = SentenceType::RMC;
    const FIELD_COUNT: usize = 12;

    fn decode_fields(fields: &[&str]) -> Result<Self, FieldFormatError> {
        let millis = time_of_day(fields[0])?;
        let date = date(fields[8])?;
        let status = code("status", fields[1], Status::from_field)?;
        let (latitude, longitude) = location(fields[2], fields[3], fields[4], fields[5])?;
        let speed = decimal("speed", fields[6])?;
        let heading = decimal("heading", fields[7])?;
        let mode = code("mode", fields[11], Mode::from_field)?;

        Ok(RMC {
            time: date.midnight().assume_utc() + time::Duration::milliseconds(i64::from(millis)),
            status,
            latitude,
            longitude,
            mode,
            speed,
            heading,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldErrorKind, SentenceDecodeError, split_fields};
    use time::macros::datetime;

    fn decode(sentence: &str) -> Result<RMC, SentenceDecodeError> {
        RMC::decode(&split_fields(sentence))
    }

    #[test]
    fn test_rmc_no_fix() {
        let rmc = decode("$GPRMC,064951.000,V,,,,,0.00,0.00,260406,,,N*44").unwrap();

        assert_eq!(
            rmc,
            RMC {
                time: datetime!(2006-04-26 06:49:51 UTC),
                status: Status::Invalid,
                latitude: 0.0,
                longitude: 0.0,
                mode: Mode::NotValid,
                speed: 0.0,
                heading: 0.0,
            }
        );
    }

    #[test]
    fn test_rmc_fix() {
        let rmc =
            decode("$GPRMC,064951.000,A,2307.1256,N,12016.4438,E,0.03,165.48,260406,,,A*00")
                .unwrap();

        assert_eq!(rmc.time, datetime!(2006-04-26 06:49:51 UTC));
        assert_eq!(rmc.status, Status::Valid);
        assert_eq!(rmc.mode, Mode::Autonomous);
        assert!((rmc.latitude - 23.11876).abs() < 1e-9);
        assert!((rmc.longitude - 120.274_063_333_333_33).abs() < 1e-9);
        assert_eq!(rmc.speed, 0.03);
        assert_eq!(rmc.heading, 165.48);
    }

    #[test]
    fn test_rmc_sign_inversion() {
        let north_east =
            decode("$GPRMC,064951.000,A,2307.1256,N,12016.4438,E,0.03,165.48,260406,,,A*00")
                .unwrap();
        let south_west =
            decode("$GPRMC,064951.000,A,2307.1256,S,12016.4438,W,0.03,165.48,260406,,,A*00")
                .unwrap();

        assert_eq!(south_west.latitude, -north_east.latitude);
        assert_eq!(south_west.longitude, -north_east.longitude);
        assert_eq!(south_west.time, north_east.time);
    }

    #[test]
    fn test_rmc_milliseconds() {
        let rmc = decode("$GPRMC,235959.999,A,,,,,1.5,90.0,311299,,,D*00").unwrap();
        assert_eq!(rmc.time, datetime!(2099-12-31 23:59:59.999 UTC));
        assert_eq!(rmc.mode, Mode::Differential);
    }

    #[test]
    fn test_rmc_invalid_fields() {
        let cases = [
            ("$GPRMC,064951.000,X,,,,,0.00,0.00,260406,,,N*00", "status"),
            ("$GPRMC,064951.000,AV,,,,,0.00,0.00,260406,,,N*00", "status"),
            ("$GPRMC,064951.000,V,,,,,0.00,0.00,260406,,,F*00", "mode"),
            ("$GPRMC,064951.000,V,,,,,0.00,0.00,260406,,,*00", "mode"),
            ("$GPRMC,064951.000,V,,,,,,0.00,260406,,,N*00", "speed"),
            ("$GPRMC,064951.000,V,,,,,0.00,abc,260406,,,N*00", "heading"),
            ("$GPRMC,064951.000,V,,,,,0.00,0.00,2604,,,N*00", "date"),
            ("$GPRMC,0649,V,,,,,0.00,0.00,260406,,,N*00", "time"),
        ];

        for (sentence, field) in cases {
            match decode(sentence) {
                Err(SentenceDecodeError::Field { sentence: ty, source }) => {
                    assert_eq!(ty, SentenceType::RMC);
                    assert_eq!(source.field, field, "{sentence}");
                }
                other => panic!("Parsed invalid sentence as valid: {sentence}\n\t{other:?}"),
            }
        }
    }

    #[test]
    fn test_rmc_invalid_date() {
        let error = decode("$GPRMC,064951.000,V,,,,,0.00,0.00,310406,,,N*00").unwrap_err();
        assert_eq!(error.field_error().map(|e| e.kind), Some(FieldErrorKind::Date));
    }

    #[test]
    fn test_rmc_field_count() {
        assert!(matches!(
            decode("$GPRMC,064951.000,V,,,,,0.00,0.00,260406,,,N,S*00"),
            Err(SentenceDecodeError::FieldCount {
                expected: 12,
                found: 13,
                ..
            })
        ));
    }
}
