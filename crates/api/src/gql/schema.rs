use std::sync::Arc;

use async_graphql::dynamic::{
    Enum, EnumItem, Field, FieldFuture, InputObject, InputValue, Interface, InterfaceField,
    Object, Scalar, Schema, SchemaBuilder, Subscription, SubscriptionField,
    SubscriptionFieldFuture, Type, Union,
};
use async_graphql::parser::parse_schema;
use async_graphql::parser::types::{FieldDefinition, InputValueDefinition};
use bundle::{Bundle, BundleOptions, ResolverTable};
use futures_util::stream;
use tracing::debug;

use super::error::SchemaBuildError;
use super::resolve::{arguments, request_data, FieldRuntime, Shape};
use super::types::{is_builtin_scalar, type_ref, Catalog, MergedKind, MergedType, Roots};

/// Builds an executable schema from a bundle. Request data can be attached by
/// callers through [`schema_builder`] before finishing.
pub fn build_schema(bundle: &Bundle, options: &BundleOptions) -> Result<Schema, SchemaBuildError> {
    schema_builder(bundle, options)?
        .finish()
        .map_err(|e| SchemaBuildError::Schema(format!("{e:?}")))
}

/// Parses the bundled type definitions and registers every type, wiring each
/// field to its bundled resolver.
pub fn schema_builder(
    bundle: &Bundle,
    options: &BundleOptions,
) -> Result<SchemaBuilder, SchemaBuildError> {
    let document =
        parse_schema(&bundle.type_defs).map_err(|e| SchemaBuildError::Parse(e.to_string()))?;
    let catalog = Catalog::from_document(&document)?;
    let roots = Roots::resolve(&document, &catalog, &options.root_keys)?;

    debug!(
        query = %roots.query,
        mutation = ?roots.mutation,
        subscription = ?roots.subscription,
        "building executable schema"
    );

    let registrar = Registrar {
        catalog: &catalog,
        roots: &roots,
        table: Arc::new(bundle.resolvers.clone()),
    };

    let mut builder = Schema::build(
        &roots.query,
        roots.mutation.as_deref(),
        roots.subscription.as_deref(),
    );
    for ty in catalog.types() {
        if let Some(ty) = registrar.convert(ty) {
            builder = builder.register(ty);
        }
    }

    Ok(builder)
}

struct Registrar<'c, 'a> {
    catalog: &'c Catalog<'a>,
    roots: &'c Roots,
    table: Arc<ResolverTable>,
}

impl Registrar<'_, '_> {
    fn convert(&self, ty: &MergedType<'_>) -> Option<Type> {
        let converted = match &ty.kind {
            MergedKind::Scalar if is_builtin_scalar(ty.name) => return None,
            MergedKind::Scalar => {
                let mut scalar = Scalar::new(ty.name);
                if let Some(description) = ty.description {
                    scalar = scalar.description(description);
                }
                Type::Scalar(scalar)
            }
            MergedKind::Object { fields, .. } if self.roots.is_subscription(ty.name) => {
                let mut subscription = Subscription::new(ty.name);
                if let Some(description) = ty.description {
                    subscription = subscription.description(description);
                }
                for field in fields {
                    subscription = subscription.field(self.subscription_field(ty.name, field));
                }
                Type::Subscription(subscription)
            }
            MergedKind::Object { implements, fields } => {
                let mut object = Object::new(ty.name);
                if let Some(description) = ty.description {
                    object = object.description(description);
                }
                for interface in implements {
                    object = object.implement(*interface);
                }
                for field in fields {
                    object = object.field(self.field(ty.name, field));
                }
                Type::Object(object)
            }
            MergedKind::Interface { implements, fields } => {
                let mut interface = Interface::new(ty.name);
                if let Some(description) = ty.description {
                    interface = interface.description(description);
                }
                for parent in implements {
                    interface = interface.implement(*parent);
                }
                for field in fields {
                    interface = interface.field(interface_field(field));
                }
                Type::Interface(interface)
            }
            MergedKind::Union { members } => {
                let mut union = Union::new(ty.name);
                if let Some(description) = ty.description {
                    union = union.description(description);
                }
                for member in members {
                    union = union.possible_type(*member);
                }
                Type::Union(union)
            }
            MergedKind::Enum { values } => {
                let mut enum_type = Enum::new(ty.name);
                if let Some(description) = ty.description {
                    enum_type = enum_type.description(description);
                }
                for value in values {
                    enum_type = enum_type.item(EnumItem::new(*value));
                }
                Type::Enum(enum_type)
            }
            MergedKind::InputObject { fields } => {
                let mut input = InputObject::new(ty.name);
                if let Some(description) = ty.description {
                    input = input.description(description);
                }
                for field in fields {
                    input = input.field(input_value(field));
                }
                Type::InputObject(input)
            }
        };
        Some(converted)
    }

    fn runtime(&self, parent_type: &str, field: &FieldDefinition) -> Arc<FieldRuntime> {
        Arc::new(FieldRuntime::new(
            self.table.clone(),
            parent_type,
            field.name.node.as_str(),
            Shape::of(&field.ty.node, self.catalog),
        ))
    }

    fn field(&self, parent_type: &str, definition: &FieldDefinition) -> Field {
        let runtime = self.runtime(parent_type, definition);
        let mut field = Field::new(
            definition.name.node.to_string(),
            type_ref(&definition.ty.node),
            move |ctx| {
                let runtime = runtime.clone();
                FieldFuture::new(async move { runtime.resolve_field(&ctx).await })
            },
        );
        if let Some(description) = &definition.description {
            field = field.description(description.node.clone());
        }
        for argument in &definition.arguments {
            field = field.argument(input_value(&argument.node));
        }
        field
    }

    /// Subscription resolvers produce a single value, delivered as a
    /// one-item stream.
    fn subscription_field(&self, parent_type: &str, definition: &FieldDefinition) -> SubscriptionField {
        let runtime = self.runtime(parent_type, definition);
        let mut field = SubscriptionField::new(
            definition.name.node.to_string(),
            type_ref(&definition.ty.node),
            move |ctx| {
                let runtime = runtime.clone();
                SubscriptionFieldFuture::new(async move {
                    let shaped = runtime
                        .resolve(async_graphql::Value::Null, arguments(&ctx), request_data(&ctx))
                        .await?;
                    Ok::<_, async_graphql::Error>(stream::once(async move {
                        Ok::<_, async_graphql::Error>(shaped.into_field_value())
                    }))
                })
            },
        );
        if let Some(description) = &definition.description {
            field = field.description(description.node.clone());
        }
        for argument in &definition.arguments {
            field = field.argument(input_value(&argument.node));
        }
        field
    }
}

fn interface_field(definition: &FieldDefinition) -> InterfaceField {
    let mut field = InterfaceField::new(
        definition.name.node.to_string(),
        type_ref(&definition.ty.node),
    );
    if let Some(description) = &definition.description {
        field = field.description(description.node.clone());
    }
    for argument in &definition.arguments {
        field = field.argument(input_value(&argument.node));
    }
    field
}

fn input_value(definition: &InputValueDefinition) -> InputValue {
    let mut input = InputValue::new(
        definition.name.node.to_string(),
        type_ref(&definition.ty.node),
    );
    if let Some(description) = &definition.description {
        input = input.description(description.node.clone());
    }
    if let Some(default) = &definition.default_value {
        input = input.default_value(default.node.clone());
    }
    input
}
