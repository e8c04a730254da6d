use std::sync::Arc;

use async_graphql::Value;
use bundle::{Module, ResolveParams, Resolver, ResolverResult};
use once_cell::sync::Lazy;

use super::node::NODE;
use super::store::{to_list, to_value, USER_PREFIX};
use super::{required_str, store};
use crate::gql::RESOLVE_TYPE;

pub static USERS: Lazy<Arc<Module>> = Lazy::new(|| {
    Arc::new(
        Module::new()
            .schema(
                r#"
type User implements Node {
  id: ID!
  name: String!
}"#,
            )
            .queries("users: [User!]!\nuser(id: ID!): User")
            .mutations("renameUser(id: ID!, name: String!): User")
            .query("users", Resolver::from_fn(users))
            .query("user", Resolver::from_fn(user))
            .query("node", Resolver::from_fn(user_node))
            .mutation("renameUser", Resolver::from_fn(rename_user))
            .field("Node", RESOLVE_TYPE, Resolver::from_fn(resolve_type))
            .depends_on(&*NODE),
    )
});

fn users(params: &ResolveParams) -> ResolverResult {
    to_list(&store(params)?.users()).map(Some)
}

fn user(params: &ResolveParams) -> ResolverResult {
    let id = required_str(params, "id")?;
    match store(params)?.user(id) {
        Some(user) => to_value(&user).map(Some),
        None => Ok(Some(Value::Null)),
    }
}

/// Answers `node(id)` for user ids only; other ids fall through.
fn user_node(params: &ResolveParams) -> ResolverResult {
    let id = required_str(params, "id")?;
    if !id.starts_with(USER_PREFIX) {
        return Ok(None);
    }
    user(params)
}

fn rename_user(params: &ResolveParams) -> ResolverResult {
    let id = required_str(params, "id")?;
    let name = required_str(params, "name")?;
    match store(params)?.rename_user(id, name) {
        Some(user) => to_value(&user).map(Some),
        None => Ok(Some(Value::Null)),
    }
}

fn resolve_type(params: &ResolveParams) -> ResolverResult {
    Ok(params
        .parent_str("id")
        .filter(|id| id.starts_with(USER_PREFIX))
        .map(|_| Value::from("User")))
}
