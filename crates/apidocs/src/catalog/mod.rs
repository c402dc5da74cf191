//! Todo API documentation catalog
//!
//! The fragments a registration pass attaches to the todo API surface:
//! API info, the request authorizer, resources, methods, parameters,
//! headers and models.

mod models;

pub use models::*;

use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::domain::{
    BuildContext, DocumentationFragment, DomainError, LocationKey, LocationType, Properties,
};

pub const API_TITLE: &str = "Todo API";
pub const API_VERSION: &str = "1.0.0";
pub const AUTHORIZER_NAME: &str = "authorizer";

const TODO_PATH: &str = "/todo";
const TODO_ITEM_PATH: &str = "/todo/{todoId}";

fn properties(value: Value) -> Properties {
    match value {
        Value::Object(map) => map,
        _ => Properties::new(),
    }
}

fn fragment(location: LocationKey, value: Value) -> DocumentationFragment {
    DocumentationFragment::new(location, properties(value))
}

/// MODEL fragment carrying the JSON schema of `T`
fn model<T>(description: &str) -> Result<DocumentationFragment, DomainError>
where
    T: for<'s> ToSchema<'s>,
{
    let (name, schema) = <T as ToSchema<'static>>::schema();
    Ok(fragment(
        LocationKey::model(name)?,
        json!({
            "description": description,
            "schema": schema,
        }),
    ))
}

/// Every fragment of the todo API, stamped with the pass timestamp
pub fn todo_api(context: &BuildContext) -> Result<Vec<DocumentationFragment>, DomainError> {
    Ok(vec![
        fragment(
            LocationKey::api(),
            json!({
                "info": {
                    "title": API_TITLE,
                    "version": API_VERSION,
                    "description": format!(
                        "Create, list and read todo items. Documentation generated at {}.",
                        context.stamp()
                    ),
                    "license": { "name": "MIT" },
                }
            }),
        ),
        fragment(
            LocationKey::authorizer(AUTHORIZER_NAME)?,
            json!({
                "description": "Checks the Authorization header before the request reaches the todo listing.",
                "x-authorizer-type": "request",
            }),
        ),
        fragment(
            LocationKey::resource(TODO_PATH)?,
            json!({ "description": "Collection of todo items." }),
        ),
        fragment(
            LocationKey::resource(TODO_ITEM_PATH)?,
            json!({ "description": "A single todo item addressed by its id." }),
        ),
        fragment(
            LocationKey::method(TODO_PATH, "POST")?,
            json!({
                "summary": "Create a todo",
                "description": "Stores a new todo item and returns its id.",
                "tags": ["todo"],
            }),
        ),
        fragment(
            LocationKey::method(TODO_PATH, "GET")?,
            json!({
                "summary": "List todos",
                "description": "Lists todo ids with their creation dates. Requires authorization.",
                "tags": ["todo"],
            }),
        ),
        fragment(
            LocationKey::method(TODO_ITEM_PATH, "GET")?,
            json!({
                "summary": "Get a todo",
                "description": "Returns a single todo item.",
                "tags": ["todo"],
            }),
        ),
        fragment(
            LocationKey::scoped(LocationType::PathParameter, TODO_ITEM_PATH, "GET", "todoId")?,
            json!({ "description": "Todo id (UUID)." }),
        ),
        fragment(
            LocationKey::scoped(LocationType::RequestHeader, TODO_PATH, "GET", "Authorization")?,
            json!({ "description": "Token checked by the request authorizer." }),
        ),
        fragment(
            LocationKey::scoped(LocationType::ResponseHeader, TODO_PATH, "POST", "Content-Type")?,
            json!({ "description": "Always application/json." }),
        ),
        model::<CreateTodoRequest>("Body of a create-todo request.")?,
        model::<CreateTodoResponse>("Id of the created todo.")?,
        model::<TodoSummary>("Entry of the todo listing.")?,
        model::<Todo>("A todo item.")?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;

    fn context() -> BuildContext {
        BuildContext::new(Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap())
    }

    #[test]
    fn test_keys_are_unique() {
        let fragments = todo_api(&context()).unwrap();
        let keys: HashSet<&LocationKey> = fragments.iter().map(|f| &f.location).collect();
        assert_eq!(keys.len(), fragments.len());
    }

    #[test]
    fn test_api_description_carries_pass_timestamp() {
        let fragments = todo_api(&context()).unwrap();
        let api = fragments
            .iter()
            .find(|f| f.location == LocationKey::api())
            .unwrap();
        let description = api.properties["info"]["description"].as_str().unwrap();
        assert!(description.ends_with("generated at 2026-10-18T09:30:00Z."));
    }

    #[test]
    fn test_models_carry_generated_schemas() {
        let fragments = todo_api(&context()).unwrap();
        let todo = fragments
            .iter()
            .find(|f| f.location == LocationKey::model("Todo").unwrap())
            .unwrap();
        let schema = &todo.properties["schema"];
        assert!(schema["properties"]["todoId"].is_object());
        assert!(schema["properties"]["createdAt"].is_object());
        assert_eq!(todo.description(), Some("A todo item."));
    }

    #[test]
    fn test_covers_documented_routes() {
        let fragments = todo_api(&context()).unwrap();
        for (path, method) in [("/todo", "POST"), ("/todo", "GET"), ("/todo/{todoId}", "GET")] {
            let key = LocationKey::method(path, method).unwrap();
            assert!(fragments.iter().any(|f| f.location == key), "{method} {path}");
        }
    }
}
