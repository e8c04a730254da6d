#![allow(dead_code)]

use api::modules::{self, Store};
use api::state::{AppState, ServerConfig};
use async_graphql::dynamic::Schema;
use async_graphql::{Request, Value, Variables};
use bundle::{BundleOptions, ModuleDecl};

/// The demo service as the binary wires it, with freshly seeded data.
pub fn demo_state(options: &BundleOptions) -> AppState {
    AppState::new(
        &modules::all(),
        options,
        Store::seeded(),
        ServerConfig::default(),
    )
    .expect("Failed to create AppState")
}

/// Bundles `declarations` and builds the executable schema without request data.
pub fn schema_for(declarations: &[ModuleDecl], options: &BundleOptions) -> Schema {
    let bundle = bundle::bundle(declarations, options);
    api::gql::build_schema(&bundle, options).expect("Failed to build schema")
}

/// Helper function to execute GraphQL queries and mutations
pub async fn execute_graphql(
    schema: &Schema,
    query: &str,
    variables: Option<Variables>,
) -> async_graphql::Response {
    let mut request = Request::new(query);

    if let Some(vars) = variables {
        request = request.variables(vars);
    }

    schema.execute(request).await
}

/// Executes `query` and returns its data as JSON, failing on any GraphQL error.
pub async fn data_of(schema: &Schema, query: &str) -> serde_json::Value {
    let response = execute_graphql(schema, query, None).await;
    assert!(
        response.errors.is_empty(),
        "query should succeed: {:?}",
        response.errors
    );
    response.data.into_json().unwrap()
}

pub fn json(value: serde_json::Value) -> Value {
    Value::from_json(value).unwrap()
}
