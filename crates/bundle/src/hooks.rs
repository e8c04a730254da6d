use crate::module::ResolvedModule;
use crate::Bundle;

/// Runs every module's `alter` over the assembled bundle, in module order.
pub fn apply(modules: &[ResolvedModule], bundle: Bundle) -> Bundle {
    modules
        .iter()
        .fold(bundle, |bundle, module| match module.alter() {
            Some(alter) => alter(bundle),
            None => bundle,
        })
}
