use std::sync::Arc;

use async_graphql::dynamic::Schema;
use bundle::{Bundle, BundleOptions, ModuleDecl, ResolverData};
use tracing::info;

use crate::error::AppError;
use crate::gql::{schema_builder, SchemaBuildError};
use crate::modules::Store;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub introspection: bool,
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            introspection: false,
            allowed_origins: split_origins(DEFAULT_ALLOWED_ORIGINS),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(port) => port.parse()?,
            Err(_) => DEFAULT_PORT,
        };
        let introspection = std::env::var("GQL_INTROSPECTION")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);
        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .map(|v| split_origins(&v))
            .unwrap_or_else(|_| split_origins(DEFAULT_ALLOWED_ORIGINS));

        Ok(Self {
            port,
            introspection,
            allowed_origins,
        })
    }
}

fn split_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

/// Shared by every handler: the executable schema plus the bundle it was
/// built from.
#[derive(Clone)]
pub struct AppState {
    pub schema: Schema,
    bundle: Arc<Bundle>,
    config: ServerConfig,
}

impl AppState {
    /// Bundles `declarations` and builds the executable schema, with `store`
    /// attached as the resolver context of every request.
    pub fn new(
        declarations: &[ModuleDecl],
        options: &BundleOptions,
        store: Store,
        config: ServerConfig,
    ) -> Result<Self, AppError> {
        let bundle = bundle::bundle(declarations, options);

        let mut builder = schema_builder(&bundle, options)?.data(ResolverData::new(store));
        if !config.introspection {
            builder = builder.disable_introspection();
        }
        let schema = builder
            .finish()
            .map_err(|e| SchemaBuildError::Schema(format!("{e:?}")))?;

        info!(
            types = bundle.resolvers.len(),
            introspection = config.introspection,
            "executable schema ready"
        );

        Ok(Self {
            schema,
            bundle: Arc::new(bundle),
            config,
        })
    }

    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
