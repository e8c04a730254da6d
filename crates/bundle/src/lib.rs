//! Composes independently authored schema modules into one set of type
//! definitions and one resolver table.
//!
//! ```text
//! declarations ─ graph::resolve ─┬─ fragments::collect ─ assemble::assemble ─┬─ hooks::apply
//!                                └─ merge::merge ────────────────────────────┘
//! ```

pub mod assemble;
pub mod config;
pub mod fragments;
pub mod graph;
pub mod hooks;
pub mod merge;
pub mod module;
pub mod resolver;

pub use config::{BundleOptions, Category, RootKeys};
pub use fragments::Fragments;
pub use merge::{FieldResolvers, ResolverTable};
pub use module::{AlterFn, FactoryFn, Module, ModuleDecl, ModuleResolvers, ResolvedModule};
pub use resolver::{
    ResolveInfo, ResolveParams, Resolver, ResolverData, ResolverFn, ResolverFuture,
    ResolverResult, ResultExt,
};

use serde_json::{Map, Value as JsonValue};
use tracing::debug;

/// The bundled output: definition text plus resolver table, as handed to an
/// execution engine. `extensions` is free-form room for `alter` hooks.
#[derive(Clone, Debug, Default)]
pub struct Bundle {
    pub type_defs: String,
    pub resolvers: ResolverTable,
    pub extensions: Map<String, JsonValue>,
}

impl Bundle {
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    pub fn extension(&self, key: &str) -> Option<&JsonValue> {
        self.extensions.get(key)
    }
}

/// Bundles a list of module declarations.
///
/// Never fails: missing fields count as empty, repeated or cyclic
/// declarations contribute once, and colliding resolvers are chained or
/// overwritten according to `options.combine`.
pub fn bundle(declarations: &[ModuleDecl], options: &BundleOptions) -> Bundle {
    let modules = graph::resolve(declarations);
    let fragments = fragments::collect(&modules);
    let resolvers = merge::merge(&modules, &fragments, options);
    let type_defs = assemble::assemble(&fragments, &options.root_keys);

    debug!(
        modules = modules.len(),
        types = resolvers.len(),
        "bundled schema modules"
    );

    hooks::apply(
        &modules,
        Bundle {
            type_defs,
            resolvers,
            extensions: Map::new(),
        },
    )
}
