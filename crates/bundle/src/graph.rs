use std::collections::HashSet;

use tracing::{trace, warn};

use crate::module::{ModuleDecl, ResolvedModule};

struct Pending {
    decl: ModuleDecl,
    from_factory: bool,
}

impl Pending {
    fn declared(decl: ModuleDecl) -> Self {
        Self {
            decl,
            from_factory: false,
        }
    }
}

/// Declarations already expanded during one `resolve` call.
///
/// Each visited declaration is retained until the call ends so a dropped
/// factory result can never hand its address to a later allocation.
#[derive(Default)]
struct Visited {
    seen: HashSet<usize>,
    retained: Vec<ModuleDecl>,
}

impl Visited {
    fn insert(&mut self, decl: &ModuleDecl) -> bool {
        if !self.seen.insert(decl.identity()) {
            return false;
        }
        self.retained.push(decl.clone());
        true
    }
}

/// Flattens a module graph into the order modules contribute in: each module
/// is followed by its own dependencies, depth-first, left-to-right.
///
/// A declaration seen a second time contributes nothing, which breaks
/// dependency cycles. Factories are invoked once; a factory that returns
/// another factory is not unwrapped.
pub fn resolve(declarations: &[ModuleDecl]) -> Vec<ResolvedModule> {
    let mut visited = Visited::default();
    let mut stack: Vec<Pending> = declarations
        .iter()
        .rev()
        .cloned()
        .map(Pending::declared)
        .collect();
    let mut resolved = Vec::new();

    while let Some(Pending { decl, from_factory }) = stack.pop() {
        if !visited.insert(&decl) {
            trace!(kind = decl.kind(), "declaration already visited, skipping");
            continue;
        }

        match decl {
            ModuleDecl::Factory(_) if from_factory => {
                warn!("factory returned another factory; nested factories are not invoked");
            }
            ModuleDecl::Factory(factory) => stack.push(Pending {
                decl: factory(),
                from_factory: true,
            }),
            ModuleDecl::List(items) => {
                stack.extend(items.iter().rev().cloned().map(Pending::declared));
            }
            ModuleDecl::Module(module) => {
                stack.extend(module.modules.iter().rev().cloned().map(Pending::declared));
                resolved.push(ResolvedModule::new(module));
            }
        }
    }

    resolved
}
