pub mod app;
pub mod error;
pub mod gql;
pub mod modules;
pub mod state;

pub use state::{AppState, ServerConfig};
