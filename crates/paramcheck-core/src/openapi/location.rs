//! Parameter locations (the OpenAPI `in` field).

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four places a parameter value can be transmitted.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub const ALL: [ParameterLocation; 4] = [
        ParameterLocation::Path,
        ParameterLocation::Query,
        ParameterLocation::Header,
        ParameterLocation::Cookie,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterLocation {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|loc| loc.as_str() == s)
            .ok_or_else(|| crate::Error::InvalidLocation(s.to_string()))
    }
}

/// The `in` value as written in a document.
///
/// Documents may carry values outside the four legal locations (Swagger 2.0
/// `body` and `formData` are common). Those are kept verbatim as `Unknown`
/// so that validation, not parsing, reports them.
///
/// Two locations are equal when they spell the same `in` value, so an
/// `Unknown("query")` built by hand behaves exactly like `Known(Query)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Location {
    Known(ParameterLocation),
    Unknown(String),
}

impl Location {
    pub fn as_str(&self) -> &str {
        match self {
            Location::Known(loc) => loc.as_str(),
            Location::Unknown(raw) => raw,
        }
    }

    /// The legal location this value names, if any.
    pub fn known(&self) -> Option<ParameterLocation> {
        match self {
            Location::Known(loc) => Some(*loc),
            Location::Unknown(raw) => raw.parse().ok(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::Unknown(String::new())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ParameterLocation> for Location {
    fn from(loc: ParameterLocation) -> Self {
        Location::Known(loc)
    }
}

impl From<String> for Location {
    fn from(raw: String) -> Self {
        match raw.parse() {
            Ok(loc) => Location::Known(loc),
            Err(_) => Location::Unknown(raw),
        }
    }
}

impl From<&str> for Location {
    fn from(raw: &str) -> Self {
        Location::from(raw.to_string())
    }
}

impl From<Location> for String {
    fn from(loc: Location) -> Self {
        match loc {
            Location::Known(loc) => loc.as_str().to_string(),
            Location::Unknown(raw) => raw,
        }
    }
}

impl PartialEq<ParameterLocation> for Location {
    fn eq(&self, other: &ParameterLocation) -> bool {
        self.known() == Some(*other)
    }
}
