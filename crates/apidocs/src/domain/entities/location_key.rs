//! LocationKey - Address of one documentable node in the API surface
//!
//! A key is the tuple `(type, name, path, method)`. The location type decides
//! which of the three optional fields must be present; every other field must
//! be absent. Keys are only obtainable through validation, so a
//! `LocationKey` value always satisfies that rule.

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::LocationType;

/// Characters allowed in an HTTP method token besides ASCII alphanumerics
const METHOD_TOKEN_CHARS: &str = "!#$%&'*+-.^_`|~";

/// Unvalidated location as supplied by a caller or read off the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSpec {
    #[serde(rename = "type")]
    pub location_type: LocationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl LocationSpec {
    pub fn new(location_type: LocationType) -> Self {
        Self {
            location_type,
            name: None,
            path: None,
            method: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Check the field combination against the location type
    pub fn validate(self) -> Result<LocationKey, DomainError> {
        let location_type = self.location_type;
        let required = location_type.requirements();

        let name = check_field(location_type, "name", self.name, required.name)?;
        let path = check_field(location_type, "path", self.path, required.path)?;
        let method = check_field(location_type, "method", self.method, required.method)?;

        if let Some(path) = &path {
            if !path.starts_with('/') {
                return Err(DomainError::malformed(
                    location_type,
                    format!("path must start with '/': {path}"),
                ));
            }
        }

        let method = match method {
            Some(method) => Some(normalize_method(location_type, &method)?),
            None => None,
        };

        Ok(LocationKey {
            location_type,
            name,
            path,
            method,
        })
    }
}

fn check_field(
    location_type: LocationType,
    field: &str,
    value: Option<String>,
    required: bool,
) -> Result<Option<String>, DomainError> {
    match (value, required) {
        (Some(v), true) if v.trim().is_empty() => Err(DomainError::malformed(
            location_type,
            format!("{field} must not be empty"),
        )),
        (Some(v), true) => Ok(Some(v)),
        (None, true) => Err(DomainError::malformed(
            location_type,
            format!("{field} is required"),
        )),
        (Some(_), false) => Err(DomainError::malformed(
            location_type,
            format!("{field} must be absent"),
        )),
        (None, false) => Ok(None),
    }
}

fn normalize_method(location_type: LocationType, method: &str) -> Result<String, DomainError> {
    let valid = method
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || METHOD_TOKEN_CHARS.contains(c));
    if !valid {
        return Err(DomainError::malformed(
            location_type,
            format!("method is not an HTTP token: {method}"),
        ));
    }
    Ok(method.to_ascii_uppercase())
}

/// Validated location key
///
/// Equality compares all four fields; an absent field never equals a present
/// one, including an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LocationSpec", into = "LocationSpec")]
pub struct LocationKey {
    location_type: LocationType,
    name: Option<String>,
    path: Option<String>,
    method: Option<String>,
}

impl LocationKey {
    pub fn new(
        location_type: LocationType,
        name: Option<String>,
        path: Option<String>,
        method: Option<String>,
    ) -> Result<Self, DomainError> {
        LocationSpec {
            location_type,
            name,
            path,
            method,
        }
        .validate()
    }

    /// The whole API
    pub fn api() -> Self {
        Self {
            location_type: LocationType::Api,
            name: None,
            path: None,
            method: None,
        }
    }

    pub fn authorizer(name: impl Into<String>) -> Result<Self, DomainError> {
        LocationSpec::new(LocationType::Authorizer)
            .with_name(name)
            .validate()
    }

    pub fn model(name: impl Into<String>) -> Result<Self, DomainError> {
        LocationSpec::new(LocationType::Model).with_name(name).validate()
    }

    pub fn resource(path: impl Into<String>) -> Result<Self, DomainError> {
        LocationSpec::new(LocationType::Resource)
            .with_path(path)
            .validate()
    }

    pub fn method(path: impl Into<String>, method: impl Into<String>) -> Result<Self, DomainError> {
        LocationSpec::new(LocationType::Method)
            .with_path(path)
            .with_method(method)
            .validate()
    }

    /// A named parameter or header scoped to one method.
    /// `location_type` must be one of the parameter/header types.
    pub fn scoped(
        location_type: LocationType,
        path: impl Into<String>,
        method: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        LocationSpec::new(location_type)
            .with_path(path)
            .with_method(method)
            .with_name(name)
            .validate()
    }

    pub fn location_type(&self) -> LocationType {
        self.location_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn http_method(&self) -> Option<&str> {
        self.method.as_deref()
    }
}

impl TryFrom<LocationSpec> for LocationKey {
    type Error = DomainError;

    fn try_from(spec: LocationSpec) -> Result<Self, Self::Error> {
        spec.validate()
    }
}

impl From<LocationKey> for LocationSpec {
    fn from(key: LocationKey) -> Self {
        Self {
            location_type: key.location_type,
            name: key.name,
            path: key.path,
            method: key.method,
        }
    }
}

impl std::fmt::Display for LocationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.location_type)?;
        if let Some(method) = &self.method {
            write!(f, " {method}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " {path}")?;
        }
        if let Some(name) = &self.name {
            write!(f, " [{name}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(
        location_type: LocationType,
        name: bool,
        path: bool,
        method: bool,
    ) -> LocationSpec {
        LocationSpec {
            location_type,
            name: name.then(|| "todoId".to_string()),
            path: path.then(|| "/todo/{todoId}".to_string()),
            method: method.then(|| "GET".to_string()),
        }
    }

    #[test]
    fn test_exactly_required_fields_are_accepted() {
        let cases = [
            (LocationType::Api, (false, false, false)),
            (LocationType::Authorizer, (true, false, false)),
            (LocationType::PathParameter, (true, true, true)),
            (LocationType::RequestHeader, (true, true, true)),
            (LocationType::Resource, (false, true, false)),
            (LocationType::Method, (false, true, true)),
            (LocationType::QueryParameter, (true, true, true)),
            (LocationType::ResponseHeader, (true, true, true)),
            (LocationType::Model, (true, false, false)),
        ];

        for (location_type, required) in cases {
            // Every combination of present/absent fields; only the required one passes
            for mask in 0..8u8 {
                let combo = (mask & 1 != 0, mask & 2 != 0, mask & 4 != 0);
                let result = spec(location_type, combo.0, combo.1, combo.2).validate();
                if combo == required {
                    assert!(result.is_ok(), "{location_type} {combo:?} should be accepted");
                } else {
                    assert!(
                        matches!(result, Err(DomainError::MalformedLocationKey { .. })),
                        "{location_type} {combo:?} should be rejected"
                    );
                }
            }
        }
    }

    #[test]
    fn test_absent_is_not_empty_string() {
        let err = LocationSpec::new(LocationType::Authorizer)
            .with_name("")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("name must not be empty"));

        let err = LocationSpec::new(LocationType::Api)
            .with_name("")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("name must be absent"));
    }

    #[test]
    fn test_equality_uses_all_fields() {
        let a = LocationKey::scoped(LocationType::PathParameter, "/todo/{todoId}", "GET", "todoId")
            .unwrap();
        let b = LocationKey::scoped(LocationType::PathParameter, "/todo/{todoId}", "get", "todoId")
            .unwrap();
        let c = LocationKey::scoped(LocationType::QueryParameter, "/todo/{todoId}", "GET", "todoId")
            .unwrap();
        let d = LocationKey::method("/todo/{todoId}", "GET").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_eq!(b.http_method(), Some("GET"));
    }

    #[test]
    fn test_method_key_accessors() {
        let key = LocationKey::method("/todo", "post").unwrap();

        assert_eq!(key.location_type(), LocationType::Method);
        assert_eq!(key.path(), Some("/todo"));
        assert_eq!(key.http_method(), Some("POST"));
        assert_eq!(key.name(), None);
    }

    #[test]
    fn test_path_and_method_shape() {
        assert!(LocationKey::resource("todo").is_err());
        assert!(LocationKey::method("/todo", "GE T").is_err());
        assert!(LocationKey::method("/todo", "*").is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let key: LocationKey = serde_json::from_value(serde_json::json!({
            "type": "METHOD",
            "path": "/todo",
            "method": "post"
        }))
        .unwrap();
        assert_eq!(key, LocationKey::method("/todo", "POST").unwrap());

        let bad = serde_json::from_value::<LocationKey>(serde_json::json!({
            "type": "API",
            "method": "GET"
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let json = serde_json::to_value(LocationKey::resource("/todo").unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "RESOURCE", "path": "/todo" }));
    }

    #[test]
    fn test_display() {
        let key = LocationKey::scoped(LocationType::RequestHeader, "/todo", "get", "Authorization")
            .unwrap();
        assert_eq!(key.to_string(), "REQUEST_HEADER GET /todo [Authorization]");
        assert_eq!(LocationKey::api().to_string(), "API");
    }
}
