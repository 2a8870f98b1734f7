//! PTV route type codes
//!
//! The numeric codes are fixed by the remote service.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PtvError;

/// Metropolitan train
pub const TRAIN: u8 = 0;
/// Tram
pub const TRAM: u8 = 1;
/// Bus (metropolitan, regional and SkyBus)
pub const BUS: u8 = 2;
/// V/Line regional train and coach
pub const VLINE: u8 = 3;
/// Night bus
pub const NIGHT_BUS: u8 = 4;

/// Transport mode as understood by the PTV API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum RouteType {
    /// Metropolitan train
    Train = TRAIN,
    /// Tram
    Tram = TRAM,
    /// Bus
    Bus = BUS,
    /// V/Line
    Vline = VLINE,
    /// Night bus
    NightBus = NIGHT_BUS,
}

impl RouteType {
    /// All route types in code order
    pub const ALL: [Self; 5] = [
        Self::Train,
        Self::Tram,
        Self::Bus,
        Self::Vline,
        Self::NightBus,
    ];

    /// Wire code sent in paths and query strings
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Train => "Train",
            Self::Tram => "Tram",
            Self::Bus => "Bus",
            Self::Vline => "V/Line",
            Self::NightBus => "Night Bus",
        }
    }
}

impl TryFrom<u8> for RouteType {
    type Error = PtvError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            TRAIN => Ok(Self::Train),
            TRAM => Ok(Self::Tram),
            BUS => Ok(Self::Bus),
            VLINE => Ok(Self::Vline),
            NIGHT_BUS => Ok(Self::NightBus),
            other => Err(PtvError::configuration(format!(
                "unknown route type: {other}"
            ))),
        }
    }
}

impl From<RouteType> for u8 {
    fn from(route_type: RouteType) -> Self {
        route_type.code()
    }
}

/// Formats as the wire code, not the label.
impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_service() {
        assert_eq!(RouteType::Train.code(), 0);
        assert_eq!(RouteType::Tram.code(), 1);
        assert_eq!(RouteType::Bus.code(), 2);
        assert_eq!(RouteType::Vline.code(), 3);
        assert_eq!(RouteType::NightBus.code(), 4);
    }

    #[test]
    fn test_try_from_roundtrip() {
        for route_type in RouteType::ALL {
            assert_eq!(RouteType::try_from(route_type.code()).unwrap(), route_type);
        }
    }

    #[test]
    fn test_try_from_unknown() {
        let err = RouteType::try_from(7).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_display_is_wire_code() {
        assert_eq!(RouteType::Train.to_string(), "0");
        assert_eq!(RouteType::NightBus.to_string(), "4");
        assert_eq!(RouteType::Vline.label(), "V/Line");
    }

    #[test]
    fn test_serde_as_integer() {
        let json = serde_json::to_string(&RouteType::Bus).unwrap();
        assert_eq!(json, "2");
        let parsed: RouteType = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, RouteType::Tram);
        assert!(serde_json::from_str::<RouteType>("9").is_err());
    }
}
