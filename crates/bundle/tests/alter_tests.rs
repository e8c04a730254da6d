mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bundle::{Module, ModuleDecl, Resolver};
use common::*;
use serde_json::json;

#[test]
fn test_alter_result_after_bundling() {
    let calls = Arc::new(AtomicUsize::new(0));
    let module = {
        let calls = calls.clone();
        Module::new().alter(move |bundle| {
            calls.fetch_add(1, Ordering::SeqCst);
            bundle.with_extension("extra", true)
        })
    };

    let bundle = bundle_default(&[module.into()]);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(bundle.extension("extra"), Some(&json!(true)));
}

#[test]
fn test_alters_apply_in_module_order() {
    let modules: Vec<ModuleDecl> = vec![
        Module::new()
            .alter(|bundle| bundle.with_extension("a", 1).with_extension("last", "a"))
            .into(),
        Module::new()
            .alter(|bundle| bundle.with_extension("b", 2).with_extension("last", "b"))
            .into(),
    ];

    let bundle = bundle_default(&modules);

    assert_eq!(bundle.extension("a"), Some(&json!(1)));
    assert_eq!(bundle.extension("b"), Some(&json!(2)));
    assert_eq!(bundle.extension("last"), Some(&json!("b")));
}

#[test]
fn test_alter_sees_assembled_output() {
    let module = Module::new()
        .queries("a: String")
        .query("a", null_resolver())
        .alter(|bundle| {
            let has_root = bundle.resolvers.contains_type("RootQuery");
            let mentions_root = bundle.type_defs.contains("type RootQuery");
            bundle.with_extension("assembled", has_root && mentions_root)
        });

    let bundle = bundle_default(&[module.into()]);

    assert_eq!(bundle.extension("assembled"), Some(&json!(true)));
}

#[test]
fn test_dependency_alters_run_in_resolved_order() {
    let dependency = Module::new().alter(|mut bundle| {
        bundle.type_defs.push_str("# dependency\n");
        bundle
    });
    let dependent = Module::new()
        .alter(|mut bundle| {
            bundle.type_defs.push_str("# dependent\n");
            bundle
        })
        .depends_on(dependency);

    let bundle = bundle_default(&[dependent.into()]);

    assert!(bundle.type_defs.ends_with("# dependent\n# dependency\n"));
}

#[test]
fn test_alter_can_replace_result() {
    let module = Module::new()
        .schema("type Dropped { id: ID }")
        .alter(|mut bundle| {
            bundle.type_defs = "type Replaced { id: ID }".to_string();
            bundle
                .resolvers
                .insert("Replaced", "id", Resolver::constant(string("1")));
            bundle
        });

    let bundle = bundle_default(&[module.into()]);

    assert_eq!(bundle.type_defs, "type Replaced { id: ID }");
    assert!(bundle.resolvers.get("Replaced", "id").is_some());
}
