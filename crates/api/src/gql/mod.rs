//! Turns a [`bundle::Bundle`] into an executable `async_graphql` dynamic schema.

pub mod error;
pub mod resolve;
pub mod schema;
pub mod types;

pub use error::SchemaBuildError;
pub use resolve::RESOLVE_TYPE;
pub use schema::{build_schema, schema_builder};
pub use types::Roots;
