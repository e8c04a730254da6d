use std::fmt;

use async_graphql::indexmap::IndexMap;
use tracing::{debug, warn};

use crate::config::{BundleOptions, Category, RootKeys};
use crate::fragments::Fragments;
use crate::module::{ModuleResolvers, ResolvedModule};
use crate::resolver::Resolver;

pub type FieldResolvers = IndexMap<String, Resolver>;

/// Type name → field (or operation) name → resolver.
#[derive(Clone, Default)]
pub struct ResolverTable(IndexMap<String, FieldResolvers>);

impl ResolverTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, type_name: &str, field_name: &str) -> Option<&Resolver> {
        self.0.get(type_name)?.get(field_name)
    }

    pub fn fields(&self, type_name: &str) -> Option<&FieldResolvers> {
        self.0.get(type_name)
    }

    pub fn contains_type(&self, type_name: &str) -> bool {
        self.0.contains_key(type_name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldResolvers)> {
        self.0.iter().map(|(name, fields)| (name.as_str(), fields))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replaces whatever occupies the slot. Returns the previous resolver.
    pub fn insert(
        &mut self,
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        resolver: Resolver,
    ) -> Option<Resolver> {
        self.0
            .entry(type_name.into())
            .or_default()
            .insert(field_name.into(), resolver)
    }

    pub fn ensure_type(&mut self, type_name: &str) -> &mut FieldResolvers {
        self.0.entry(type_name.to_owned()).or_default()
    }

    pub fn remove_type(&mut self, type_name: &str) -> Option<FieldResolvers> {
        self.0.shift_remove(type_name)
    }

    /// Adds a resolver to a slot. An occupied slot either gets `resolver`
    /// appended to its fallback chain (`combine`) or is overwritten.
    pub fn register(
        &mut self,
        type_name: &str,
        field_name: &str,
        resolver: Resolver,
        combine: bool,
    ) {
        let fields = self.ensure_type(type_name);
        match fields.get_mut(field_name) {
            Some(existing) if combine => {
                debug!(type_name, field_name, "composing resolvers");
                existing.push(resolver);
            }
            Some(existing) => {
                debug!(type_name, field_name, "overwriting resolver");
                *existing = resolver;
            }
            None => {
                fields.insert(field_name.to_owned(), resolver);
            }
        }
    }
}

impl fmt::Debug for ResolverTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.0
                    .iter()
                    .map(|(name, fields)| (name, fields.keys().collect::<Vec<_>>())),
            )
            .finish()
    }
}

/// A module's resolvers with the operation maps renamed to their root types.
fn normalized<'a>(
    resolvers: &'a ModuleResolvers,
    root_keys: &'a RootKeys,
) -> impl Iterator<Item = (&'a str, &'a FieldResolvers)> {
    Category::ALL
        .into_iter()
        .map(move |category| (root_keys.get(category), resolvers.operations(category)))
        .chain(
            resolvers
                .types
                .iter()
                .map(|(name, fields)| (name.as_str(), fields)),
        )
}

/// Merges every module's resolvers, in module order.
///
/// A root type is present exactly when its category has operation text;
/// resolvers registered for a category without text are dropped.
pub fn merge(
    modules: &[ResolvedModule],
    fragments: &Fragments,
    options: &BundleOptions,
) -> ResolverTable {
    let mut table = ResolverTable::new();
    for category in fragments.categories() {
        table.ensure_type(options.root_keys.get(category));
    }

    for module in modules {
        for (type_name, fields) in normalized(module.resolvers(), &options.root_keys) {
            for (field_name, resolver) in fields {
                table.register(type_name, field_name, resolver.clone(), options.combine);
            }
        }
    }

    for category in Category::ALL {
        if !fragments.operations(category).is_empty() {
            continue;
        }
        let root = options.root_keys.get(category);
        if let Some(dropped) = table.remove_type(root) {
            if !dropped.is_empty() {
                warn!(
                    root,
                    operations = ?dropped.keys().collect::<Vec<_>>(),
                    "dropping resolvers without a matching {} definition",
                    category.keyword()
                );
            }
        }
    }

    table
}
