use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{FieldErrorKind, FieldFormatError},
    parse::{location, optional_decimal, time_of_day, unsigned},
    sentences::{Decode, SentenceType},
};

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///         0          1         2 3          4 5 6 7    8    9 10   11 12 13
///         |          |         | |          | | | |    |    | |    |  |  |
///  $GPGGA,hhmmss.sss,ddmm.mmmm,a,dddmm.mmmm,a,x,x,x.xx,x.x,M,x.x,M,x.x,xxxx*hh
/// ```
///
/// When `position_fix` is 0 only `time` and `used_satellites` are meaningful: the
/// position fields are empty and decode as zero.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GGA {
    /// Fix time in UTC, as an offset since midnight
    pub time: Duration,
    /// Number of satellites in use
    pub used_satellites: u8,
    /// Position fix indicator: 0 - not available, 1 - GPS fix, 2 - Differential GPS fix
    pub position_fix: u8,
    /// Latitude in decimal degrees, negative south of the equator
    pub latitude: f64,
    /// Longitude in decimal degrees, negative west of Greenwich
    pub longitude: f64,
    /// Horizontal Dilution of Precision
    pub hdop: f32,
    /// Antenna altitude above/below mean sea level in meters
    pub altitude: f32,
}

impl Decode for GGA {
    const SENTENCE_TYPE: SentenceType = SentenceType::GGA;
    const FIELD_COUNT: usize = 14;

    fn decode_fields(fields: &[&str]) -> Result<Self, FieldFormatError> {
        let millis = time_of_day(fields[0])?;
        let (latitude, longitude) = location(fields[1], fields[2], fields[3], fields[4])?;
        let position_fix = unsigned("position fix", fields[5])?;
        let used_satellites = unsigned("used satellites", fields[6])?;
        let hdop = optional_decimal("hdop", fields[7])?;
        let altitude = optional_decimal("altitude", fields[8])?;

        if fields[9] != "M" {
            return Err(FieldFormatError::new(
                "altitude unit",
                fields[9],
                FieldErrorKind::Value,
            ));
        }

        Ok(GGA {
            time: Duration::from_millis(u64::from(millis)),
            used_satellites,
            position_fix,
            latitude,
            longitude,
            hdop,
            altitude,
        })
    }
}
