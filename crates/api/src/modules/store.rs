use async_graphql::Value;
use bundle::ResultExt;
use parking_lot::RwLock;
use serde::Serialize;

pub const USER_PREFIX: &str = "user:";
pub const POST_PREFIX: &str = "post:";

#[derive(Clone, Debug, Serialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub author_id: String,
}

/// In-memory data behind the demo modules, shared with resolvers through
/// the request's `ResolverData`.
#[derive(Debug, Default)]
pub struct Store {
    users: RwLock<Vec<UserRecord>>,
    posts: RwLock<Vec<PostRecord>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded() -> Self {
        let store = Self::new();
        let ada = store.add_user("Ada");
        let alan = store.add_user("Alan");
        store.add_post(&ada.id, "Notes on the Analytical Engine");
        store.add_post(&alan.id, "On Computable Numbers");
        store.add_post(&ada.id, "Bernoulli numbers, step by step");
        store
    }

    pub fn add_user(&self, name: &str) -> UserRecord {
        let mut users = self.users.write();
        let user = UserRecord {
            id: format!("{USER_PREFIX}{}", users.len() + 1),
            name: name.to_string(),
        };
        users.push(user.clone());
        user
    }

    pub fn add_post(&self, author_id: &str, title: &str) -> PostRecord {
        let mut posts = self.posts.write();
        let post = PostRecord {
            id: format!("{POST_PREFIX}{}", posts.len() + 1),
            title: title.to_string(),
            author_id: author_id.to_string(),
        };
        posts.push(post.clone());
        post
    }

    pub fn users(&self) -> Vec<UserRecord> {
        self.users.read().clone()
    }

    pub fn user(&self, id: &str) -> Option<UserRecord> {
        self.users.read().iter().find(|u| u.id == id).cloned()
    }

    /// Returns the renamed user, or `None` when no user has that id.
    pub fn rename_user(&self, id: &str, name: &str) -> Option<UserRecord> {
        let mut users = self.users.write();
        let user = users.iter_mut().find(|u| u.id == id)?;
        user.name = name.to_string();
        Some(user.clone())
    }

    pub fn posts(&self) -> Vec<PostRecord> {
        self.posts.read().clone()
    }

    pub fn post(&self, id: &str) -> Option<PostRecord> {
        self.posts.read().iter().find(|p| p.id == id).cloned()
    }

    pub fn posts_by(&self, author_id: &str) -> Vec<PostRecord> {
        self.posts
            .read()
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect()
    }

    pub fn latest_post(&self) -> Option<PostRecord> {
        self.posts.read().last().cloned()
    }
}

/// Converts a record into a resolver value.
pub fn to_value<T: Serialize>(record: &T) -> async_graphql::Result<Value> {
    async_graphql::to_value(record).resolver_err("Failed to serialize record")
}

pub fn to_list<T: Serialize>(records: &[T]) -> async_graphql::Result<Value> {
    records
        .iter()
        .map(to_value)
        .collect::<async_graphql::Result<Vec<_>>>()
        .map(Value::List)
}
