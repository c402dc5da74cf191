//! LocationType - Kind of API surface node a documentation fragment attaches to

use serde::{Deserialize, Serialize};

/// Which optional location fields a location type needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRequirements {
    pub name: bool,
    pub path: bool,
    pub method: bool,
}

/// Closed set of location types the hosting platform recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    Api,
    Authorizer,
    Resource,
    Method,
    PathParameter,
    QueryParameter,
    RequestHeader,
    ResponseHeader,
    Model,
}

impl LocationType {
    pub const ALL: [LocationType; 9] = [
        LocationType::Api,
        LocationType::Authorizer,
        LocationType::Resource,
        LocationType::Method,
        LocationType::PathParameter,
        LocationType::QueryParameter,
        LocationType::RequestHeader,
        LocationType::ResponseHeader,
        LocationType::Model,
    ];

    /// Fields that must be present; every other field must be absent
    pub fn requirements(&self) -> FieldRequirements {
        let (name, path, method) = match self {
            LocationType::Api => (false, false, false),
            LocationType::Authorizer | LocationType::Model => (true, false, false),
            LocationType::Resource => (false, true, false),
            LocationType::Method => (false, true, true),
            LocationType::PathParameter
            | LocationType::QueryParameter
            | LocationType::RequestHeader
            | LocationType::ResponseHeader => (true, true, true),
        };
        FieldRequirements { name, path, method }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Api => "API",
            LocationType::Authorizer => "AUTHORIZER",
            LocationType::Resource => "RESOURCE",
            LocationType::Method => "METHOD",
            LocationType::PathParameter => "PATH_PARAMETER",
            LocationType::QueryParameter => "QUERY_PARAMETER",
            LocationType::RequestHeader => "REQUEST_HEADER",
            LocationType::ResponseHeader => "RESPONSE_HEADER",
            LocationType::Model => "MODEL",
        }
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LocationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        LocationType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| format!("Unknown location type: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        for location_type in LocationType::ALL {
            let parsed: LocationType = location_type.to_string().parse().unwrap();
            assert_eq!(parsed, location_type);
        }
        assert_eq!(
            "path-parameter".parse::<LocationType>().unwrap(),
            LocationType::PathParameter
        );
        assert!("STAGE".parse::<LocationType>().is_err());
    }

    #[test]
    fn test_serde_uses_platform_names() {
        let json = serde_json::to_string(&LocationType::ResponseHeader).unwrap();
        assert_eq!(json, "\"RESPONSE_HEADER\"");
    }
}
