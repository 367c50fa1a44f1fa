//! Search radius selection.
//!
//! The locator UI offers a fixed menu (`todos`, `10km`, `25km`, `50km`,
//! `100km`); `todos` means "no limit".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const UNBOUNDED_LABEL: &str = "todos";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RadiusSelection {
    Km(u32),
    Unbounded,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid radius selection '{0}': expected \"todos\" or \"<n>km\"")]
pub struct RadiusParseError(pub String);

impl RadiusSelection {
    /// The menu offered by the locator, in display order.
    pub const OPTIONS: [RadiusSelection; 5] = [
        RadiusSelection::Unbounded,
        RadiusSelection::Km(10),
        RadiusSelection::Km(25),
        RadiusSelection::Km(50),
        RadiusSelection::Km(100),
    ];

    /// Upper distance bound in kilometers. `Unbounded` is `f64::INFINITY`.
    #[must_use]
    pub fn ceiling_km(self) -> f64 {
        match self {
            RadiusSelection::Km(km) => f64::from(km),
            RadiusSelection::Unbounded => f64::INFINITY,
        }
    }

    #[must_use]
    pub fn is_unbounded(self) -> bool {
        matches!(self, RadiusSelection::Unbounded)
    }
}

impl Default for RadiusSelection {
    fn default() -> Self {
        RadiusSelection::Km(100)
    }
}

impl FromStr for RadiusSelection {
    type Err = RadiusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "todos" | "all" | "unlimited" => return Ok(RadiusSelection::Unbounded),
            "" => return Err(RadiusParseError(s.to_string())),
            _ => {}
        }

        let digits = normalized
            .strip_suffix("km")
            .unwrap_or(&normalized)
            .trim_end();
        digits
            .parse::<u32>()
            .map(RadiusSelection::Km)
            .map_err(|_| RadiusParseError(s.to_string()))
    }
}

impl fmt::Display for RadiusSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadiusSelection::Km(km) => write!(f, "{km}km"),
            RadiusSelection::Unbounded => f.write_str(UNBOUNDED_LABEL),
        }
    }
}

impl TryFrom<String> for RadiusSelection {
    type Error = RadiusParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RadiusSelection> for String {
    fn from(value: RadiusSelection) -> Self {
        value.to_string()
    }
}
