#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::FieldFormatError,
    parse::{decimal, unsigned},
    sentences::{Decode, FixMode, SelectionMode, SentenceType, code},
};

/// Fields holding satellite IDs: the sentence has room for 12, but only the
/// first 10 are ever read.
const SATELLITE_FIELDS: std::ops::Range<usize> = 2..12;

/// GSA - GPS DOP and active satellites
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsa_gps_dop_and_active_satellites>
///
/// ```text
///         0 1 2                       13 14   15   16
///         | | |                        | |    |    |
///  $GPGSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x.xx,x.xx,x.xx*hh
/// ```
///
/// Satellite IDs are read as a contiguous prefix: scanning stops at the first
/// empty slot, so an ID following an empty slot is never read.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GSA {
    /// Selection mode
    pub selection_mode: SelectionMode,
    /// Fix mode
    pub fix_mode: FixMode,
    /// IDs of the satellites used in the fix, in channel order
    pub satellites: heapless::Vec<u8, 12>,
    /// Position Dilution of Precision, 0 without a fix
    pub pdop: f32,
    /// Horizontal Dilution of Precision, 0 without a fix
    pub hdop: f32,
    /// Vertical Dilution of Precision, 0 without a fix
    pub vdop: f32,
}

impl Decode for GSA {
    const SENTENCE_TYPE: SentenceType = SentenceType::GSA;
    const FIELD_COUNT: usize = 17;

    fn decode_fields(fields: &[&str]) -> Result<Self, FieldFormatError> {
        let selection_mode = code("mode 1", fields[0], SelectionMode::from_field)?;
        let fix_mode = code("mode 2", fields[1], FixMode::from_field)?;

        let satellites = fields[SATELLITE_FIELDS]
            .iter()
            .take_while(|field| !field.is_empty())
            .map(|field| unsigned("satellite id", field))
            .collect::<Result<heapless::Vec<u8, 12>, _>>()?;

        // the xDOP fields are only available when there is a fix.
        let (pdop, hdop, vdop) = if fix_mode != FixMode::NoFix {
            (
                decimal("pdop", fields[14])?,
                decimal("hdop", fields[15])?,
                decimal("vdop", fields[16])?,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        Ok(GSA {
            selection_mode,
            fix_mode,
            satellites,
            pdop,
            hdop,
            vdop,
        })
    }
}
