//! Catalog resource types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A category of catalog entity served by the upstream API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    People,
    Films,
    Planets,
    Starships,
    Vehicles,
}

impl ResourceType {
    /// Every resource type, in the order they are listed to callers
    pub const ALL: [ResourceType; 5] = [
        ResourceType::People,
        ResourceType::Films,
        ResourceType::Planets,
        ResourceType::Starships,
        ResourceType::Vehicles,
    ];

    /// Path segment used by the upstream API
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::People => "people",
            ResourceType::Films => "films",
            ResourceType::Planets => "planets",
            ResourceType::Starships => "starships",
            ResourceType::Vehicles => "vehicles",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known resource type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownResource(pub String);

impl fmt::Display for UnknownResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown resource type: {}", self.0)
    }
}

impl std::error::Error for UnknownResource {}

impl FromStr for ResourceType {
    type Err = UnknownResource;

    // Exact, case-sensitive match on the upstream path segment
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}
