//! Reporting quarters

use serde::{Deserialize, Serialize};

/// Quarter of the reporting year
///
/// Each quarter has its own incident spreadsheet, named by the quarter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quarter {
    /// January to March
    #[serde(rename = "ENE-MAR")]
    EneMar,

    /// April to June
    #[serde(rename = "ABR-JUN")]
    AbrJun,

    /// July to September
    #[serde(rename = "JUL-SEP")]
    JulSep,

    /// October to December
    #[serde(rename = "OCT-DIC")]
    OctDic,
}

impl Quarter {
    /// All quarters in calendar order
    pub const ALL: [Quarter; 4] = [
        Quarter::EneMar,
        Quarter::AbrJun,
        Quarter::JulSep,
        Quarter::OctDic,
    ];

    /// Quarter code as it appears in file names
    pub fn code(&self) -> &'static str {
        match self {
            Quarter::EneMar => "ENE-MAR",
            Quarter::AbrJun => "ABR-JUN",
            Quarter::JulSep => "JUL-SEP",
            Quarter::OctDic => "OCT-DIC",
        }
    }

    /// Parse a quarter from its code (case-insensitive, `_` accepted for `-`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace('_', "-").as_str() {
            "ENE-MAR" => Some(Quarter::EneMar),
            "ABR-JUN" => Some(Quarter::AbrJun),
            "JUL-SEP" => Some(Quarter::JulSep),
            "OCT-DIC" => Some(Quarter::OctDic),
            _ => None,
        }
    }
}

impl Default for Quarter {
    fn default() -> Self {
        Quarter::EneMar
    }
}

impl std::fmt::Display for Quarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Quarter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid quarter: {}", s))
    }
}
