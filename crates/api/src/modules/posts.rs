use std::sync::Arc;

use async_graphql::Value;
use bundle::{Module, ResolveParams, Resolver, ResolverResult};
use once_cell::sync::Lazy;

use super::node::NODE;
use super::store::{to_list, to_value, POST_PREFIX};
use super::users::USERS;
use super::{required_str, store};
use crate::gql::RESOLVE_TYPE;

pub static POSTS: Lazy<Arc<Module>> = Lazy::new(|| {
    Arc::new(
        Module::new()
            .schema(
                r#"
type Post implements Node {
  id: ID!
  title: String!
  author: User
}

extend type User {
  posts: [Post!]!
}"#,
            )
            .queries("posts: [Post!]!")
            .mutations("createPost(authorId: ID!, title: String!): Post")
            .subscriptions("latestPost: Post")
            .query("posts", Resolver::from_fn(posts))
            .query("node", Resolver::from_fn(post_node))
            .mutation("createPost", Resolver::from_fn(create_post))
            .subscription("latestPost", Resolver::from_fn(latest_post))
            .field("Post", "author", Resolver::from_fn(author))
            .field("User", "posts", Resolver::from_fn(posts_by_user))
            .field("Node", RESOLVE_TYPE, Resolver::from_fn(resolve_type))
            .depends_on(&*NODE)
            .depends_on(&*USERS),
    )
});

fn posts(params: &ResolveParams) -> ResolverResult {
    to_list(&store(params)?.posts()).map(Some)
}

/// Answers `node(id)` for post ids only; other ids fall through.
fn post_node(params: &ResolveParams) -> ResolverResult {
    let id = required_str(params, "id")?;
    if !id.starts_with(POST_PREFIX) {
        return Ok(None);
    }
    match store(params)?.post(id) {
        Some(post) => to_value(&post).map(Some),
        None => Ok(Some(Value::Null)),
    }
}

fn create_post(params: &ResolveParams) -> ResolverResult {
    let author_id = required_str(params, "authorId")?;
    let title = required_str(params, "title")?;
    let store = store(params)?;
    if store.user(author_id).is_none() {
        return Err(async_graphql::Error::new(format!(
            "Unknown author: {author_id}"
        )));
    }
    to_value(&store.add_post(author_id, title)).map(Some)
}

fn latest_post(params: &ResolveParams) -> ResolverResult {
    match store(params)?.latest_post() {
        Some(post) => to_value(&post).map(Some),
        None => Ok(Some(Value::Null)),
    }
}

fn author(params: &ResolveParams) -> ResolverResult {
    let author = params
        .parent_str("authorId")
        .and_then(|id| store(params).ok()?.user(id));
    match author {
        Some(user) => to_value(&user).map(Some),
        None => Ok(Some(Value::Null)),
    }
}

fn posts_by_user(params: &ResolveParams) -> ResolverResult {
    let Some(user_id) = params.parent_str("id") else {
        return Ok(Some(Value::List(Vec::new())));
    };
    to_list(&store(params)?.posts_by(user_id)).map(Some)
}

fn resolve_type(params: &ResolveParams) -> ResolverResult {
    Ok(params
        .parent_str("id")
        .filter(|id| id.starts_with(POST_PREFIX))
        .map(|_| Value::from("Post")))
}
