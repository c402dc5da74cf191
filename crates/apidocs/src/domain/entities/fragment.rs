//! DocumentationFragment - Documentation attached to one location key

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::location_key::LocationKey;

/// Free-form fragment content (summary, description, schema, example, ...)
pub type Properties = serde_json::Map<String, Value>;

/// Prefix distinguishing platform extension keys from standard keys
pub const EXTENSION_PREFIX: &str = "x-";

/// A fragment as the registry sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentationFragment {
    pub location: LocationKey,
    pub properties: Properties,
}

impl DocumentationFragment {
    pub fn new(location: LocationKey, properties: Properties) -> Self {
        Self {
            location,
            properties,
        }
    }

    pub fn summary(&self) -> Option<&str> {
        self.properties.get("summary").and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.properties.get("description").and_then(Value::as_str)
    }

    /// Platform extension entries (`x-...` keys)
    pub fn extensions(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.properties
            .iter()
            .filter(|(key, _)| key.starts_with(EXTENSION_PREFIX))
    }
}

/// Opaque handle returned by the platform for a stored part
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FragmentHandle {
    pub id: String,
}

impl FragmentHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl std::fmt::Display for FragmentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

/// A fragment as stored by the platform, with its part id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentationPart {
    pub id: String,
    pub location: LocationKey,
    pub properties: Properties,
}

impl DocumentationPart {
    pub fn handle(&self) -> FragmentHandle {
        FragmentHandle::new(self.id.clone())
    }

    pub fn into_fragment(self) -> DocumentationFragment {
        DocumentationFragment::new(self.location, self.properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extensions_are_separated_from_standard_keys() {
        let properties = json!({
            "summary": "Create a todo",
            "description": "Stores a new todo item",
            "x-amazon-apigateway-integration": { "type": "aws_proxy" },
            "x-codegen-request-body-name": "body"
        });
        let fragment = DocumentationFragment::new(
            LocationKey::method("/todo", "POST").unwrap(),
            properties.as_object().cloned().unwrap(),
        );

        assert_eq!(fragment.summary(), Some("Create a todo"));
        assert_eq!(fragment.description(), Some("Stores a new todo item"));

        let mut names: Vec<&str> = fragment.extensions().map(|(k, _)| k.as_str()).collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec!["x-amazon-apigateway-integration", "x-codegen-request-body-name"]
        );
    }
}
