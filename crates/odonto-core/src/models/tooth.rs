use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A permanent-tooth code in FDI notation: quadrant digit (1–4) followed
/// by position digit (1–8). Exactly 32 codes are valid; everything else
/// is rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(try_from = "String", into = "String")]
#[ts(export, type = "string")]
pub struct ToothCode(String);

impl ToothCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the code, used for ordering findings (11..48).
    pub fn number(&self) -> u8 {
        // Both bytes are ASCII digits by construction.
        let b = self.0.as_bytes();
        (b[0] - b'0') * 10 + (b[1] - b'0')
    }
}

impl FromStr for ToothCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut bytes = t.bytes();
        match (bytes.next(), bytes.next(), bytes.next()) {
            (Some(q @ b'1'..=b'4'), Some(p @ b'1'..=b'8'), None) => {
                Ok(ToothCode(format!("{}{}", q as char, p as char)))
            }
            _ => Err(CoreError::InvalidToothCode(s.to_string())),
        }
    }
}

impl TryFrom<String> for ToothCode {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ToothCode> for String {
    fn from(t: ToothCode) -> String {
        t.0
    }
}

impl fmt::Display for ToothCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Upper arch in display order, left to right.
pub const UPPER_ARCH: [&str; 16] = [
    "18", "17", "16", "15", "14", "13", "12", "11", "21", "22", "23", "24", "25", "26", "27", "28",
];

/// Lower arch in display order, left to right.
pub const LOWER_ARCH: [&str; 16] = [
    "48", "47", "46", "45", "44", "43", "42", "41", "31", "32", "33", "34", "35", "36", "37", "38",
];

/// All 32 permanent-tooth codes in display order (upper then lower arch).
pub fn all_teeth() -> impl Iterator<Item = ToothCode> {
    UPPER_ARCH
        .iter()
        .chain(LOWER_ARCH.iter())
        .map(|s| ToothCode(s.to_string()))
}

/// A zone of a tooth: one of the five positional surfaces, or GENERAL
/// meaning the whole tooth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ToothSurface {
    #[serde(rename = "GENERAL")]
    General,
    #[serde(rename = "O")]
    Occlusal,
    #[serde(rename = "M")]
    Mesial,
    #[serde(rename = "D")]
    Distal,
    #[serde(rename = "B")]
    Buccal,
    #[serde(rename = "L")]
    Lingual,
}

/// Positional surfaces in canonical order. This order is the documented
/// tie-break for the chart aggregator and the sort key for findings.
pub const POSITIONAL_SURFACES: [ToothSurface; 5] = [
    ToothSurface::Occlusal,
    ToothSurface::Mesial,
    ToothSurface::Distal,
    ToothSurface::Buccal,
    ToothSurface::Lingual,
];

/// All surfaces in canonical order, GENERAL first.
pub const ALL_SURFACES: [ToothSurface; 6] = [
    ToothSurface::General,
    ToothSurface::Occlusal,
    ToothSurface::Mesial,
    ToothSurface::Distal,
    ToothSurface::Buccal,
    ToothSurface::Lingual,
];

impl ToothSurface {
    /// Wire form: "GENERAL" or the single surface letter.
    pub fn code(self) -> &'static str {
        match self {
            ToothSurface::General => "GENERAL",
            ToothSurface::Occlusal => "O",
            ToothSurface::Mesial => "M",
            ToothSurface::Distal => "D",
            ToothSurface::Buccal => "B",
            ToothSurface::Lingual => "L",
        }
    }

    /// Single-letter form for positional surfaces; `None` for GENERAL.
    pub fn letter(self) -> Option<&'static str> {
        match self {
            ToothSurface::General => None,
            other => Some(other.code()),
        }
    }

    /// Position in the canonical GENERAL, O, M, D, B, L order.
    pub fn canonical_order(self) -> u8 {
        match self {
            ToothSurface::General => 0,
            ToothSurface::Occlusal => 1,
            ToothSurface::Mesial => 2,
            ToothSurface::Distal => 3,
            ToothSurface::Buccal => 4,
            ToothSurface::Lingual => 5,
        }
    }
}

impl fmt::Display for ToothSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
