mod common;

use api::gql::{build_schema, schema_builder, SchemaBuildError};
use async_graphql::{Value, Variables};
use bundle::{Bundle, BundleOptions, Module, ModuleDecl, Resolver, ResolverData};
use common::*;
use serde_json::json;

fn build_error(type_defs: &str) -> SchemaBuildError {
    let bundle = Bundle {
        type_defs: type_defs.to_string(),
        ..Default::default()
    };
    let Err(err) = build_schema(&bundle, &BundleOptions::default()) else {
        panic!("schema should be rejected: {type_defs}");
    };
    err
}

#[tokio::test]
async fn test_query_resolver_is_executed() {
    let module = Module::new()
        .queries("hello: String")
        .query("hello", Resolver::constant("world"));
    let schema = schema_for(&[module.into()], &BundleOptions::default());

    assert_eq!(data_of(&schema, "{ hello }").await, json!({ "hello": "world" }));
}

#[tokio::test]
async fn test_fields_without_resolver_read_parent_property() {
    let module = Module::new()
        .schema("type Profile { name: String, tags: [String!]! }")
        .queries("profile: Profile")
        .query(
            "profile",
            Resolver::constant(json(json!({ "name": "Ada", "tags": ["math", "poetry"] }))),
        );
    let schema = schema_for(&[module.into()], &BundleOptions::default());

    assert_eq!(
        data_of(&schema, "{ profile { name tags } }").await,
        json!({ "profile": { "name": "Ada", "tags": ["math", "poetry"] } })
    );
}

#[tokio::test]
async fn test_arguments_and_info_reach_resolver() {
    let module = Module::new()
        .queries("greet(name: String!): String")
        .query(
            "greet",
            Resolver::from_fn(|params| {
                let name = match params.arg_value("name") {
                    Some(Value::String(name)) => name.clone(),
                    _ => String::new(),
                };
                Ok(Some(Value::from(format!(
                    "{}.{} says hi to {name}",
                    params.info.parent_type, params.info.field_name
                ))))
            }),
        );
    let schema = schema_for(&[module.into()], &BundleOptions::default());

    let response = execute_graphql(
        &schema,
        "query Greet($name: String!) { greet(name: $name) }",
        Some(Variables::from_json(json!({ "name": "Alan" }))),
    )
    .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(
        response.data.into_json().unwrap(),
        json!({ "greet": "RootQuery.greet says hi to Alan" })
    );
}

#[tokio::test]
async fn test_request_data_is_resolver_context() {
    let module = Module::new()
        .queries("tenant: String")
        .query(
            "tenant",
            Resolver::from_fn(|params| {
                Ok(params
                    .context
                    .get::<String>()
                    .map(|tenant| Value::from(tenant.as_str())))
            }),
        );
    let options = BundleOptions::default();
    let bundle = bundle::bundle(&[module.into()], &options);
    let schema = schema_builder(&bundle, &options)
        .unwrap()
        .data(ResolverData::new("acme".to_string()))
        .finish()
        .unwrap();

    assert_eq!(data_of(&schema, "{ tenant }").await, json!({ "tenant": "acme" }));
}

#[tokio::test]
async fn test_extend_type_adds_fields_from_other_module() {
    let base = Module::new()
        .schema("type User { id: ID! }")
        .queries("me: User")
        .query("me", Resolver::constant(json(json!({ "id": "1" }))));
    let extension = Module::new()
        .schema("extend type User { nickname: String }")
        .field(
            "User",
            "nickname",
            Resolver::from_fn(|params| {
                Ok(params
                    .parent_str("id")
                    .map(|id| Value::from(format!("nick-{id}"))))
            }),
        );
    let schema = schema_for(&[base.into(), extension.into()], &BundleOptions::default());

    assert_eq!(
        data_of(&schema, "{ me { id nickname } }").await,
        json!({ "me": { "id": "1", "nickname": "nick-1" } })
    );
}

#[tokio::test]
async fn test_enum_strings_are_returned_as_enum_values() {
    let module = Module::new()
        .schema("enum Color { RED GREEN }")
        .queries("color: Color\ncolors: [Color!]!")
        .query("color", Resolver::constant("GREEN"))
        .query("colors", Resolver::constant(json(json!(["RED", "GREEN"]))));
    let schema = schema_for(&[module.into()], &BundleOptions::default());

    assert_eq!(
        data_of(&schema, "{ color colors }").await,
        json!({ "color": "GREEN", "colors": ["RED", "GREEN"] })
    );
}

#[tokio::test]
async fn test_input_objects_are_accepted() {
    let module = Module::new()
        .schema("input Point { x: Int!, y: Int! }")
        .queries("sum(point: Point!): Int")
        .query(
            "sum",
            Resolver::from_fn(|params| {
                let Some(Value::Object(point)) = params.arg_value("point") else {
                    return Ok(None);
                };
                let coordinate = |name: &str| match point.get(name) {
                    Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
                    _ => 0,
                };
                Ok(Some(Value::Number((coordinate("x") + coordinate("y")).into())))
            }),
        );
    let schema = schema_for(&[module.into()], &BundleOptions::default());

    assert_eq!(
        data_of(&schema, "{ sum(point: { x: 2, y: 3 }) }").await,
        json!({ "sum": 5 })
    );
}

#[tokio::test]
async fn test_union_members_resolved_by_typename() {
    let module = Module::new()
        .schema("type Cat { name: String }\ntype Dog { name: String }\nunion Pet = Cat | Dog")
        .queries("pets: [Pet]")
        .query(
            "pets",
            Resolver::constant(json(json!([
                { "__typename": "Cat", "name": "Tom" },
                { "__typename": "Dog", "name": "Rex" },
            ]))),
        );
    let schema = schema_for(&[module.into()], &BundleOptions::default());

    assert_eq!(
        data_of(
            &schema,
            "{ pets { __typename ... on Cat { name } ... on Dog { name } } }"
        )
        .await,
        json!({ "pets": [
            { "__typename": "Cat", "name": "Tom" },
            { "__typename": "Dog", "name": "Rex" },
        ] })
    );
}

#[tokio::test]
async fn test_combined_resolve_type_chain() {
    let shapes = Module::new()
        .schema("interface Shape { sides: Int }\ntype Square implements Shape { sides: Int }\ntype Triangle implements Shape { sides: Int }")
        .queries("shapes: [Shape!]!")
        .query(
            "shapes",
            Resolver::constant(json(json!([{ "sides": 4 }, { "sides": 3 }]))),
        );
    let by_sides = |sides: i64, name: &'static str| {
        Resolver::from_fn(move |params| match &params.parent {
            Value::Object(fields) => Ok(match fields.get("sides") {
                Some(Value::Number(n)) if n.as_i64() == Some(sides) => Some(Value::from(name)),
                _ => None,
            }),
            _ => Ok(None),
        })
    };
    let squares = Module::new().field("Shape", "__resolveType", by_sides(4, "Square"));
    let triangles = Module::new().field("Shape", "__resolveType", by_sides(3, "Triangle"));

    let declarations: Vec<ModuleDecl> = vec![shapes.into(), squares.into(), triangles.into()];
    let schema = schema_for(&declarations, &BundleOptions::default());

    assert_eq!(
        data_of(&schema, "{ shapes { __typename sides } }").await,
        json!({ "shapes": [
            { "__typename": "Square", "sides": 4 },
            { "__typename": "Triangle", "sides": 3 },
        ] })
    );
}

#[tokio::test]
async fn test_unresolvable_abstract_type_is_a_field_error() {
    let module = Module::new()
        .schema("type Cat { name: String }\nunion Pet = Cat")
        .queries("pet: Pet")
        .query("pet", Resolver::constant(json(json!({ "name": "Tom" }))));
    let schema = schema_for(&[module.into()], &BundleOptions::default());

    let response = execute_graphql(&schema, "{ pet { ... on Cat { name } } }", None).await;

    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("Pet"));
}

#[tokio::test]
async fn test_resolver_errors_surface_as_graphql_errors() {
    let module = Module::new()
        .queries("broken: String")
        .query(
            "broken",
            Resolver::from_fn(|_| Err(async_graphql::Error::new("boom"))),
        );
    let schema = schema_for(&[module.into()], &BundleOptions::default());

    let response = execute_graphql(&schema, "{ broken }", None).await;

    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "boom");
}

#[tokio::test]
async fn test_custom_root_keys() {
    let module = Module::new()
        .queries("a: String")
        .mutations("b: String")
        .query("a", Resolver::constant("query"))
        .mutation("b", Resolver::constant("mutation"));
    let options = BundleOptions::default()
        .query_root("Query")
        .mutation_root("Mutation");
    let schema = schema_for(&[module.into()], &options);

    assert_eq!(data_of(&schema, "{ a }").await, json!({ "a": "query" }));
    assert_eq!(data_of(&schema, "mutation { b }").await, json!({ "b": "mutation" }));
}

#[tokio::test]
async fn test_custom_scalars_pass_values_through() {
    let module = Module::new()
        .schema("scalar DateTime")
        .queries("now: DateTime")
        .query("now", Resolver::constant("2024-01-01T00:00:00Z"));
    let schema = schema_for(&[module.into()], &BundleOptions::default());

    assert_eq!(
        data_of(&schema, "{ now }").await,
        json!({ "now": "2024-01-01T00:00:00Z" })
    );
}

#[test]
fn test_missing_query_root() {
    let module = Module::new().mutations("only: String");
    let options = BundleOptions::default();
    let bundle = bundle::bundle(&[module.into()], &options);

    let Err(err) = build_schema(&bundle, &options) else {
        panic!("schema without a query root should be rejected");
    };
    assert!(matches!(err, SchemaBuildError::MissingQueryRoot));
}

#[test]
fn test_unknown_root_type() {
    let err = build_error("type Query { a: String }\nschema { query: Query mutation: Missing }");

    assert!(matches!(err, SchemaBuildError::UnknownRootType(name) if name == "Missing"));
}

#[test]
fn test_conflicting_extension() {
    let err = build_error(
        "type Query { a: String }\ntype Thing { a: String }\nextend interface Thing { b: String }",
    );

    assert!(matches!(
        err,
        SchemaBuildError::ConflictingDefinition { ref name, first: "an object", second: "an interface" }
            if name == "Thing"
    ));
}

#[test]
fn test_parse_error() {
    let err = build_error("type {");

    assert!(matches!(err, SchemaBuildError::Parse(_)));
}

#[test]
fn test_roots_fall_back_to_configured_keys() {
    let err = build_error("type RootMutation { a: String }");

    assert!(matches!(err, SchemaBuildError::MissingQueryRoot));
}
