use thiserror::Error;

/// Why a bundle could not be turned into an executable schema.
#[derive(Debug, Error)]
pub enum SchemaBuildError {
    #[error("invalid type definitions: {0}")]
    Parse(String),

    #[error("type definitions declare no query root")]
    MissingQueryRoot,

    #[error("root type `{0}` is not defined as an object type")]
    UnknownRootType(String),

    #[error("`{name}` is defined both as {first} and as {second}")]
    ConflictingDefinition {
        name: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("schema validation failed: {0}")]
    Schema(String),
}
