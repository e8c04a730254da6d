use std::env;

use serde::Deserialize;

pub const DEFAULT_QUERY_ROOT: &str = "RootQuery";
pub const DEFAULT_MUTATION_ROOT: &str = "RootMutation";
pub const DEFAULT_SUBSCRIPTION_ROOT: &str = "RootSubscription";

/// The three root operation categories a module can contribute to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Query,
    Mutation,
    Subscription,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Query, Category::Mutation, Category::Subscription];

    /// Operation keyword used inside the `schema { }` block.
    pub fn keyword(self) -> &'static str {
        match self {
            Category::Query => "query",
            Category::Mutation => "mutation",
            Category::Subscription => "subscription",
        }
    }
}

/// Root type names, used both in the generated definitions and as resolver table keys.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RootKeys {
    pub query: String,
    pub mutation: String,
    pub subscription: String,
}

impl Default for RootKeys {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY_ROOT.to_string(),
            mutation: DEFAULT_MUTATION_ROOT.to_string(),
            subscription: DEFAULT_SUBSCRIPTION_ROOT.to_string(),
        }
    }
}

impl RootKeys {
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::Query => &self.query,
            Category::Mutation => &self.mutation,
            Category::Subscription => &self.subscription,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BundleOptions {
    pub root_keys: RootKeys,
    /// Chain colliding resolvers instead of letting the later module win.
    pub combine: bool,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            root_keys: RootKeys::default(),
            combine: true,
        }
    }
}

impl BundleOptions {
    /// Reads overrides from `BUNDLE_ROOT_QUERY`, `BUNDLE_ROOT_MUTATION`,
    /// `BUNDLE_ROOT_SUBSCRIPTION` and `BUNDLE_COMBINE`. Missing or unparsable
    /// values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            root_keys: RootKeys {
                query: env::var("BUNDLE_ROOT_QUERY").unwrap_or(defaults.root_keys.query),
                mutation: env::var("BUNDLE_ROOT_MUTATION").unwrap_or(defaults.root_keys.mutation),
                subscription: env::var("BUNDLE_ROOT_SUBSCRIPTION")
                    .unwrap_or(defaults.root_keys.subscription),
            },
            combine: env::var("BUNDLE_COMBINE")
                .ok()
                .and_then(|v| v.to_lowercase().parse().ok())
                .unwrap_or(defaults.combine),
        }
    }

    pub fn query_root(mut self, name: impl Into<String>) -> Self {
        self.root_keys.query = name.into();
        self
    }

    pub fn mutation_root(mut self, name: impl Into<String>) -> Self {
        self.root_keys.mutation = name.into();
        self
    }

    pub fn subscription_root(mut self, name: impl Into<String>) -> Self {
        self.root_keys.subscription = name.into();
        self
    }

    pub fn combine(mut self, combine: bool) -> Self {
        self.combine = combine;
        self
    }
}
