use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_graphql::Value;
use bundle::{Module, Resolver};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service-level operations. Built per call: the ping counter belongs to the
/// returned module.
pub fn module() -> Module {
    let pings = Arc::new(AtomicU64::new(0));

    Module::new()
        .queries("version: String!")
        .mutations("ping: Int!")
        .subscriptions("heartbeat: String!")
        .query("version", Resolver::constant(VERSION))
        .mutation(
            "ping",
            Resolver::from_fn(move |_| {
                let count = pings.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(Some(Value::Number(count.into())))
            }),
        )
        .subscription(
            "heartbeat",
            Resolver::new(|_| async { Ok(Some(Value::from("alive"))) }),
        )
        .alter(|bundle| bundle.with_extension("version", VERSION))
}
