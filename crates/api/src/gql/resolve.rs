use std::sync::Arc;

use async_graphql::dynamic::{FieldValue, ResolverContext};
use async_graphql::indexmap::IndexMap;
use async_graphql::parser::types::{BaseType, Type};
use async_graphql::{Name, Value};
use bundle::{ResolveInfo, ResolveParams, Resolver, ResolverData, ResolverTable};
use futures_util::future::{BoxFuture, FutureExt};

use super::types::{Catalog, TypeCategory};

/// Field name under which interfaces and unions register their type resolver.
pub const RESOLVE_TYPE: &str = "__resolveType";

/// Shape of a field's declared output type, used to hand resolved values to
/// the engine in the form it expects.
#[derive(Clone, Debug)]
pub(crate) enum Shape {
    Leaf,
    Enum,
    Object,
    Abstract(String),
    List(Box<Shape>),
}

impl Shape {
    pub fn of(ty: &Type, catalog: &Catalog<'_>) -> Self {
        match &ty.base {
            BaseType::List(item) => Shape::List(Box::new(Shape::of(item, catalog))),
            BaseType::Named(name) => match catalog.category(name.as_str()) {
                TypeCategory::Leaf => Shape::Leaf,
                TypeCategory::Enum => Shape::Enum,
                TypeCategory::Object => Shape::Object,
                TypeCategory::Abstract => Shape::Abstract(name.to_string()),
            },
        }
    }

    fn apply<'a>(
        &'a self,
        value: Value,
        table: &'a ResolverTable,
        context: &'a ResolverData,
    ) -> BoxFuture<'a, async_graphql::Result<Shaped>> {
        async move {
            if value == Value::Null {
                return Ok(Shaped::Null);
            }
            match self {
                Shape::Leaf | Shape::Object => Ok(Shaped::Value(value)),
                Shape::Enum => Ok(Shaped::Value(match value {
                    Value::String(name) => Value::Enum(Name::new(name)),
                    other => other,
                })),
                Shape::Abstract(abstract_type) => {
                    let concrete = concrete_type(table, abstract_type, &value, context).await?;
                    Ok(Shaped::Typed(value, concrete))
                }
                Shape::List(item) => {
                    let Value::List(values) = value else {
                        return Err(async_graphql::Error::new("expected a list value"));
                    };
                    let mut items = Vec::with_capacity(values.len());
                    for value in values {
                        items.push(item.apply(value, table, context).await?);
                    }
                    Ok(Shaped::List(items))
                }
            }
        }
        .boxed()
    }
}

/// A resolved value ready to become a [`FieldValue`].
#[derive(Debug)]
pub(crate) enum Shaped {
    Null,
    Value(Value),
    Typed(Value, String),
    List(Vec<Shaped>),
}

impl Shaped {
    pub fn into_field_value<'a>(self) -> FieldValue<'a> {
        match self {
            Shaped::Null => FieldValue::NULL,
            Shaped::Value(value) => FieldValue::value(value),
            Shaped::Typed(value, ty) => FieldValue::value(value).with_type(ty),
            Shaped::List(items) => {
                FieldValue::list(items.into_iter().map(Shaped::into_field_value))
            }
        }
    }
}

/// Everything a single schema field needs to run its bundled resolver.
pub(crate) struct FieldRuntime {
    resolver: Option<Resolver>,
    info: ResolveInfo,
    shape: Shape,
    table: Arc<ResolverTable>,
}

impl FieldRuntime {
    pub fn new(table: Arc<ResolverTable>, parent_type: &str, field_name: &str, shape: Shape) -> Self {
        Self {
            resolver: table.get(parent_type, field_name).cloned(),
            info: ResolveInfo {
                parent_type: parent_type.to_string(),
                field_name: field_name.to_string(),
            },
            shape,
            table,
        }
    }

    /// Runs the registered resolver, or reads the same-named property of the
    /// parent value when there is none.
    pub async fn resolve(
        &self,
        parent: Value,
        args: IndexMap<Name, Value>,
        context: ResolverData,
    ) -> async_graphql::Result<Shaped> {
        let value = match &self.resolver {
            Some(resolver) => {
                resolver
                    .resolve(ResolveParams {
                        parent,
                        args,
                        context: context.clone(),
                        info: self.info.clone(),
                    })
                    .await?
            }
            None => property(&parent, &self.info.field_name),
        };

        match value {
            None => Ok(Shaped::Null),
            Some(value) => self.shape.apply(value, &self.table, &context).await,
        }
    }

    pub async fn resolve_field<'a>(
        &self,
        ctx: &ResolverContext<'a>,
    ) -> async_graphql::Result<Option<FieldValue<'a>>> {
        let parent = ctx.parent_value.as_value().cloned().unwrap_or_default();
        match self.resolve(parent, arguments(ctx), request_data(ctx)).await? {
            Shaped::Null => Ok(None),
            shaped => Ok(Some(shaped.into_field_value())),
        }
    }
}

pub(crate) fn arguments(ctx: &ResolverContext<'_>) -> IndexMap<Name, Value> {
    ctx.args.as_index_map().clone()
}

pub(crate) fn request_data(ctx: &ResolverContext<'_>) -> ResolverData {
    ctx.ctx.data_opt::<ResolverData>().cloned().unwrap_or_default()
}

fn property(parent: &Value, field: &str) -> Option<Value> {
    match parent {
        Value::Object(fields) => fields.get(field).cloned(),
        _ => None,
    }
}

/// Picks the object type behind an interface or union value: the type's
/// `__resolveType` resolver first, then a `__typename` property.
async fn concrete_type(
    table: &ResolverTable,
    abstract_type: &str,
    value: &Value,
    context: &ResolverData,
) -> async_graphql::Result<String> {
    if let Some(resolver) = table.get(abstract_type, RESOLVE_TYPE) {
        let params = ResolveParams::new(value.clone())
            .context(context.clone())
            .info(abstract_type, RESOLVE_TYPE);
        match resolver.resolve(params).await? {
            Some(Value::String(name)) => return Ok(name),
            Some(Value::Enum(name)) => return Ok(name.to_string()),
            _ => {}
        }
    }

    if let Some(Value::String(name)) = property(value, "__typename") {
        return Ok(name);
    }

    Err(async_graphql::Error::new(format!(
        "Abstract type `{abstract_type}` could not be resolved to an object type"
    )))
}
