#![allow(dead_code)]

use async_graphql::Value;
use bundle::{Bundle, BundleOptions, ModuleDecl, Resolver};

/// Collapses every whitespace run into a single space, like the
/// definitions a reader would write on one line.
pub fn simplify(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn bundle_default(declarations: &[ModuleDecl]) -> Bundle {
    bundle::bundle(declarations, &BundleOptions::default())
}

pub fn simplified_type_defs(declarations: &[ModuleDecl]) -> String {
    simplify(&bundle_default(declarations).type_defs)
}

pub fn json(value: serde_json::Value) -> Value {
    Value::from_json(value).expect("valid GraphQL value")
}

pub fn string(s: &str) -> Value {
    Value::String(s.to_string())
}

/// Resolver that always yields `null`.
pub fn null_resolver() -> Resolver {
    Resolver::from_fn(|_| Ok(Some(Value::Null)))
}

/// `__resolveType`-style resolver answering `type_name` when the parent's
/// `kind` equals `kind`, and nothing otherwise.
pub fn kind_resolver(kind: &'static str, type_name: &'static str) -> Resolver {
    Resolver::from_fn(move |params| {
        Ok(params
            .parent_str("kind")
            .filter(|k| *k == kind)
            .map(|_| string(type_name)))
    })
}
