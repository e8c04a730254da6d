use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_graphql::indexmap::IndexMap;
use async_graphql::{Name, Value};
use futures_util::future::{self, BoxFuture, FutureExt};

/// `Ok(None)` means the resolver produced no defined result, which lets a
/// composed chain fall through to the next link. `Ok(Some(Value::Null))` is a
/// defined null and stops the chain.
pub type ResolverResult = async_graphql::Result<Option<Value>>;
pub type ResolverFuture = BoxFuture<'static, ResolverResult>;
pub type ResolverFn = Arc<dyn Fn(ResolveParams) -> ResolverFuture + Send + Sync>;

/// Per-request data handed to every resolver (the "context" argument).
#[derive(Clone)]
pub struct ResolverData(Arc<dyn Any + Send + Sync>);

impl ResolverData {
    pub fn new<T: Any + Send + Sync>(data: T) -> Self {
        Self(Arc::new(data))
    }

    pub fn get<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl Default for ResolverData {
    fn default() -> Self {
        Self::new(())
    }
}

impl fmt::Debug for ResolverData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResolverData")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolveInfo {
    pub parent_type: String,
    pub field_name: String,
}

#[derive(Clone, Debug, Default)]
pub struct ResolveParams {
    pub parent: Value,
    pub args: IndexMap<Name, Value>,
    pub context: ResolverData,
    pub info: ResolveInfo,
}

impl ResolveParams {
    pub fn new(parent: Value) -> Self {
        Self {
            parent,
            ..Default::default()
        }
    }

    pub fn arg(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.args.insert(Name::new(name), value.into());
        self
    }

    pub fn context(mut self, context: ResolverData) -> Self {
        self.context = context;
        self
    }

    pub fn info(mut self, parent_type: impl Into<String>, field_name: impl Into<String>) -> Self {
        self.info = ResolveInfo {
            parent_type: parent_type.into(),
            field_name: field_name.into(),
        };
        self
    }

    pub fn arg_value(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    /// Reads a string field from the parent object.
    pub fn parent_str(&self, field: &str) -> Option<&str> {
        match &self.parent {
            Value::Object(fields) => match fields.get(field) {
                Some(Value::String(s)) => Some(s.as_str()),
                _ => None,
            },
            _ => None,
        }
    }
}

/// A field or operation resolver.
///
/// Resolvers registered by several modules for the same slot are kept as a
/// [`Resolver::Chain`], tried in registration order until one yields a
/// defined value.
#[derive(Clone)]
pub enum Resolver {
    Direct(ResolverFn),
    Chain(Vec<ResolverFn>),
}

impl Resolver {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(ResolveParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ResolverResult> + Send + 'static,
    {
        Resolver::Direct(Arc::new(move |params| f(params).boxed()))
    }

    /// Wraps a synchronous function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&ResolveParams) -> ResolverResult + Send + Sync + 'static,
    {
        Resolver::Direct(Arc::new(move |params| future::ready(f(&params)).boxed()))
    }

    /// Always resolves to `value`.
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::from_fn(move |_| Ok(Some(value.clone())))
    }

    /// Appends `next` as the last fallback of this resolver.
    pub fn push(&mut self, next: Resolver) {
        let mut links = match std::mem::replace(self, Resolver::Chain(Vec::new())) {
            Resolver::Direct(f) => vec![f],
            Resolver::Chain(links) => links,
        };
        links.extend(next.into_links());
        *self = Resolver::Chain(links);
    }

    /// Returns a resolver that tries `self` first and falls back to `next`
    /// when `self` yields no defined result.
    pub fn compose(mut self, next: Resolver) -> Self {
        self.push(next);
        self
    }

    /// Number of resolver functions behind this slot.
    pub fn len(&self) -> usize {
        match self {
            Resolver::Direct(_) => 1,
            Resolver::Chain(links) => links.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_chain(&self) -> bool {
        matches!(self, Resolver::Chain(_))
    }

    pub fn resolve(&self, params: ResolveParams) -> ResolverFuture {
        match self {
            Resolver::Direct(f) => f(params),
            Resolver::Chain(links) => {
                let links = links.clone();
                async move {
                    for link in links.iter() {
                        if let Some(value) = link(params.clone()).await? {
                            return Ok(Some(value));
                        }
                    }
                    Ok(None)
                }
                .boxed()
            }
        }
    }

    fn into_links(self) -> Vec<ResolverFn> {
        match self {
            Resolver::Direct(f) => vec![f],
            Resolver::Chain(links) => links,
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolver::Direct(_) => f.write_str("Resolver::Direct"),
            Resolver::Chain(links) => write!(f, "Resolver::Chain({})", links.len()),
        }
    }
}

/// Extension trait that converts any `Result<T, E>` where `E: Display`
/// into `async_graphql::Result<T>` with a contextual message prefix.
///
/// Usage: `id.parse::<u64>().resolver_err("Invalid user ID")?`
pub trait ResultExt<T> {
    fn resolver_err(self, context: &str) -> std::result::Result<T, async_graphql::Error>;
}

impl<T, E: fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    fn resolver_err(self, context: &str) -> std::result::Result<T, async_graphql::Error> {
        self.map_err(|e| async_graphql::Error::new(format!("{context}: {e}")))
    }
}
