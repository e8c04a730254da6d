use crate::config::RootKeys;
use crate::fragments::Fragments;

/// Builds the final definition text: the type fragments, one root type per
/// category with operations, then the `schema { }` declaration naming them.
pub fn assemble(fragments: &Fragments, root_keys: &RootKeys) -> String {
    let mut text = String::new();

    if !fragments.types.is_empty() {
        text.push_str(&fragments.types);
        text.push('\n');
    }

    for category in fragments.categories() {
        text.push_str(&format!(
            "type {} {{\n{}\n}}\n",
            root_keys.get(category),
            fragments.operations(category)
        ));
    }

    text.push_str("schema {\n");
    for category in fragments.categories() {
        text.push_str(&format!(
            "  {}: {}\n",
            category.keyword(),
            root_keys.get(category)
        ));
    }
    text.push_str("}\n");

    text
}
