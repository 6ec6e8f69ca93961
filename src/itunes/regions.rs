//! Supported iTunes store regions (ISO 3166-1 alpha-2 country codes).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regions the directory is queried for. Anything else falls back to [`Region::Us`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Fi,
    Ru,
    Gb,
    #[default]
    Us,
}

impl Region {
    /// Returns the lowercase country code used in upstream URLs.
    pub fn code(&self) -> &'static str {
        match self {
            Region::Fi => "fi",
            Region::Ru => "ru",
            Region::Gb => "gb",
            Region::Us => "us",
        }
    }

    /// Returns the human-readable country name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Region::Fi => "Finland",
            Region::Ru => "Russia",
            Region::Gb => "United Kingdom",
            Region::Us => "United States",
        }
    }

    /// Returns all supported regions in catalog order.
    pub fn all() -> &'static [Region] {
        &[Region::Fi, Region::Ru, Region::Gb, Region::Us]
    }

    /// Maps an arbitrary caller-supplied code onto a supported region.
    ///
    /// Matching is case-sensitive; unknown or empty input yields the default.
    pub fn resolve(candidate: &str) -> Region {
        candidate.parse().unwrap_or_default()
    }
}

/// Resolves `candidate` to the code of a supported region.
pub fn resolve(candidate: &str) -> &'static str {
    Region::resolve(candidate).code()
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::all()
            .iter()
            .copied()
            .find(|r| r.code() == s)
            .ok_or_else(|| RegionParseError(s.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct RegionParseError(String);

impl fmt::Display for RegionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown region '{}'. Valid regions: fi, ru, gb, us", self.0)
    }
}

impl std::error::Error for RegionParseError {}
