//! Demo schema modules served by the `api` binary.

pub mod node;
pub mod posts;
pub mod store;
pub mod system;
pub mod users;

use async_graphql::Value;
use bundle::{ModuleDecl, ResolveParams};

pub use store::Store;

/// Every demo module. `node` and `users` are reached through dependencies.
pub fn all() -> Vec<ModuleDecl> {
    vec![
        system::module().into(),
        ModuleDecl::from(&*users::USERS),
        ModuleDecl::factory(|| ModuleDecl::from(&*posts::POSTS)),
    ]
}

pub(crate) fn store(params: &ResolveParams) -> async_graphql::Result<&Store> {
    params
        .context
        .get::<Store>()
        .ok_or_else(|| async_graphql::Error::new("Store is not attached to the request"))
}

pub(crate) fn required_str<'p>(params: &'p ResolveParams, name: &str) -> async_graphql::Result<&'p str> {
    match params.arg_value(name) {
        Some(Value::String(value)) => Ok(value.as_str()),
        _ => Err(async_graphql::Error::new(format!("Missing argument: {name}"))),
    }
}
