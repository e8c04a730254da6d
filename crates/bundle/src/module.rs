use std::fmt;
use std::sync::Arc;

use async_graphql::indexmap::IndexMap;

use crate::config::Category;
use crate::resolver::Resolver;
use crate::Bundle;

pub type AlterFn = Arc<dyn Fn(Bundle) -> Bundle + Send + Sync>;
pub type FactoryFn = Arc<dyn Fn() -> ModuleDecl + Send + Sync>;

/// Resolvers contributed by one module.
///
/// `queries`, `mutations` and `subscriptions` are keyed by operation name and
/// land under the configured root type names. `types` maps a type name to its
/// field resolvers.
#[derive(Clone, Debug, Default)]
pub struct ModuleResolvers {
    pub queries: IndexMap<String, Resolver>,
    pub mutations: IndexMap<String, Resolver>,
    pub subscriptions: IndexMap<String, Resolver>,
    pub types: IndexMap<String, IndexMap<String, Resolver>>,
}

impl ModuleResolvers {
    pub fn operations(&self, category: Category) -> &IndexMap<String, Resolver> {
        match category {
            Category::Query => &self.queries,
            Category::Mutation => &self.mutations,
            Category::Subscription => &self.subscriptions,
        }
    }

    fn operations_mut(&mut self, category: Category) -> &mut IndexMap<String, Resolver> {
        match category {
            Category::Query => &mut self.queries,
            Category::Mutation => &mut self.mutations,
            Category::Subscription => &mut self.subscriptions,
        }
    }
}

/// A self-contained contributor of type definitions, root operations and
/// resolvers. Every field is optional; absent text counts as empty.
#[derive(Clone, Default)]
pub struct Module {
    pub schema: Option<String>,
    pub queries: Option<String>,
    pub mutations: Option<String>,
    pub subscriptions: Option<String>,
    pub resolvers: ModuleResolvers,
    pub modules: Vec<ModuleDecl>,
    pub alter: Option<AlterFn>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(mut self, text: impl Into<String>) -> Self {
        self.schema = Some(text.into());
        self
    }

    pub fn queries(mut self, text: impl Into<String>) -> Self {
        self.queries = Some(text.into());
        self
    }

    pub fn mutations(mut self, text: impl Into<String>) -> Self {
        self.mutations = Some(text.into());
        self
    }

    pub fn subscriptions(mut self, text: impl Into<String>) -> Self {
        self.subscriptions = Some(text.into());
        self
    }

    pub fn query(self, name: impl Into<String>, resolver: Resolver) -> Self {
        self.operation(Category::Query, name, resolver)
    }

    pub fn mutation(self, name: impl Into<String>, resolver: Resolver) -> Self {
        self.operation(Category::Mutation, name, resolver)
    }

    pub fn subscription(self, name: impl Into<String>, resolver: Resolver) -> Self {
        self.operation(Category::Subscription, name, resolver)
    }

    pub fn operation(
        mut self,
        category: Category,
        name: impl Into<String>,
        resolver: Resolver,
    ) -> Self {
        self.resolvers
            .operations_mut(category)
            .insert(name.into(), resolver);
        self
    }

    /// Registers a field resolver on a regular type, e.g. `("Node", "__resolveType")`.
    pub fn field(
        mut self,
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        resolver: Resolver,
    ) -> Self {
        self.resolvers
            .types
            .entry(type_name.into())
            .or_default()
            .insert(field_name.into(), resolver);
        self
    }

    pub fn depends_on(mut self, declaration: impl Into<ModuleDecl>) -> Self {
        self.modules.push(declaration.into());
        self
    }

    pub fn alter<F>(mut self, alter: F) -> Self
    where
        F: Fn(Bundle) -> Bundle + Send + Sync + 'static,
    {
        self.alter = Some(Arc::new(alter));
        self
    }

    pub fn text(&self, category: Category) -> Option<&str> {
        match category {
            Category::Query => self.queries.as_deref(),
            Category::Mutation => self.mutations.as_deref(),
            Category::Subscription => self.subscriptions.as_deref(),
        }
    }

    pub fn into_decl(self) -> ModuleDecl {
        ModuleDecl::from(self)
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("schema", &self.schema)
            .field("queries", &self.queries)
            .field("mutations", &self.mutations)
            .field("subscriptions", &self.subscriptions)
            .field("resolvers", &self.resolvers)
            .field("modules", &self.modules.len())
            .field("alter", &self.alter.is_some())
            .finish()
    }
}

/// Anything that can stand in a module list.
///
/// Declarations are identified by their allocation, so the same `Arc` seen
/// twice in one graph is expanded only once.
#[derive(Clone)]
pub enum ModuleDecl {
    Module(Arc<Module>),
    List(Arc<[ModuleDecl]>),
    Factory(FactoryFn),
}

impl ModuleDecl {
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn() -> ModuleDecl + Send + Sync + 'static,
    {
        ModuleDecl::Factory(Arc::new(factory))
    }

    pub fn list(declarations: impl IntoIterator<Item = ModuleDecl>) -> Self {
        ModuleDecl::List(declarations.into_iter().collect())
    }

    pub(crate) fn identity(&self) -> usize {
        match self {
            ModuleDecl::Module(module) => Arc::as_ptr(module) as *const () as usize,
            ModuleDecl::List(items) => Arc::as_ptr(items) as *const () as usize,
            ModuleDecl::Factory(factory) => Arc::as_ptr(factory) as *const () as usize,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            ModuleDecl::Module(_) => "module",
            ModuleDecl::List(_) => "list",
            ModuleDecl::Factory(_) => "factory",
        }
    }
}

impl fmt::Debug for ModuleDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleDecl::Module(module) => fmt::Debug::fmt(module, f),
            ModuleDecl::List(items) => f.debug_list().entries(items.iter()).finish(),
            ModuleDecl::Factory(_) => f.write_str("Factory"),
        }
    }
}

impl From<Module> for ModuleDecl {
    fn from(module: Module) -> Self {
        ModuleDecl::Module(Arc::new(module))
    }
}

impl From<Arc<Module>> for ModuleDecl {
    fn from(module: Arc<Module>) -> Self {
        ModuleDecl::Module(module)
    }
}

impl From<&Arc<Module>> for ModuleDecl {
    fn from(module: &Arc<Module>) -> Self {
        ModuleDecl::Module(module.clone())
    }
}

impl From<Vec<ModuleDecl>> for ModuleDecl {
    fn from(declarations: Vec<ModuleDecl>) -> Self {
        ModuleDecl::List(declarations.into())
    }
}

/// A module as emitted by graph resolution: its dependencies have been
/// expanded into the flat sequence, so it exposes no `modules` of its own.
/// The caller's module is shared, never modified.
#[derive(Clone)]
pub struct ResolvedModule(Arc<Module>);

impl ResolvedModule {
    pub(crate) fn new(module: Arc<Module>) -> Self {
        Self(module)
    }

    pub fn schema(&self) -> Option<&str> {
        self.0.schema.as_deref()
    }

    pub fn text(&self, category: Category) -> Option<&str> {
        self.0.text(category)
    }

    pub fn resolvers(&self) -> &ModuleResolvers {
        &self.0.resolvers
    }

    pub fn alter(&self) -> Option<&AlterFn> {
        self.0.alter.as_ref()
    }

    /// Whether this record was produced from `module`.
    pub fn is(&self, module: &Arc<Module>) -> bool {
        Arc::ptr_eq(&self.0, module)
    }
}

impl fmt::Debug for ResolvedModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedModule")
            .field("schema", &self.0.schema)
            .field("queries", &self.0.queries)
            .field("mutations", &self.0.mutations)
            .field("subscriptions", &self.0.subscriptions)
            .field("resolvers", &self.0.resolvers)
            .finish()
    }
}
