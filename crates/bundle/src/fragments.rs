use crate::config::Category;
use crate::module::ResolvedModule;

/// The joined text of every module, per category.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fragments {
    pub types: String,
    pub queries: String,
    pub mutations: String,
    pub subscriptions: String,
}

impl Fragments {
    pub fn operations(&self, category: Category) -> &str {
        match category {
            Category::Query => &self.queries,
            Category::Mutation => &self.mutations,
            Category::Subscription => &self.subscriptions,
        }
    }

    /// Categories that received at least one operation, in root order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(move |category| !self.operations(*category).is_empty())
    }
}

pub fn collect(modules: &[ResolvedModule]) -> Fragments {
    Fragments {
        types: join(modules, |m| m.schema()),
        queries: join(modules, |m| m.text(Category::Query)),
        mutations: join(modules, |m| m.text(Category::Mutation)),
        subscriptions: join(modules, |m| m.text(Category::Subscription)),
    }
}

fn join<'a, F>(modules: &'a [ResolvedModule], fragment: F) -> String
where
    F: Fn(&'a ResolvedModule) -> Option<&'a str>,
{
    modules
        .iter()
        .filter_map(fragment)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
