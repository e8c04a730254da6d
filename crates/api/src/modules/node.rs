use std::sync::Arc;

use bundle::Module;
use once_cell::sync::Lazy;

/// The `Node` interface and the `node(id)` lookup. Modules owning node types
/// contribute partial `RootQuery.node` and `Node.__resolveType` resolvers
/// that answer only for their own ids.
pub static NODE: Lazy<Arc<Module>> = Lazy::new(|| {
    Arc::new(
        Module::new()
            .schema(
                r#"
"An object with a globally unique id."
interface Node {
  id: ID!
}"#,
            )
            .queries("node(id: ID!): Node"),
    )
});
