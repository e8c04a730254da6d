use async_graphql::dynamic::TypeRef;
use async_graphql::indexmap::map::Entry;
use async_graphql::indexmap::IndexMap;
use async_graphql::parser::types::{
    BaseType, FieldDefinition, InputValueDefinition, ServiceDocument, Type, TypeKind,
    TypeSystemDefinition,
};
use bundle::RootKeys;

use super::error::SchemaBuildError;

const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

pub(crate) fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

/// How values of a named type are handed to the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum TypeCategory {
    Leaf,
    Enum,
    Object,
    Abstract,
}

pub(crate) enum MergedKind<'a> {
    Scalar,
    Object {
        implements: Vec<&'a str>,
        fields: Vec<&'a FieldDefinition>,
    },
    Interface {
        implements: Vec<&'a str>,
        fields: Vec<&'a FieldDefinition>,
    },
    Union {
        members: Vec<&'a str>,
    },
    Enum {
        values: Vec<&'a str>,
    },
    InputObject {
        fields: Vec<&'a InputValueDefinition>,
    },
}

impl<'a> MergedKind<'a> {
    fn from_kind(kind: &'a TypeKind) -> Self {
        match kind {
            TypeKind::Scalar => MergedKind::Scalar,
            TypeKind::Object(object) => MergedKind::Object {
                implements: object.implements.iter().map(|n| n.node.as_str()).collect(),
                fields: object.fields.iter().map(|f| &f.node).collect(),
            },
            TypeKind::Interface(interface) => MergedKind::Interface {
                implements: interface.implements.iter().map(|n| n.node.as_str()).collect(),
                fields: interface.fields.iter().map(|f| &f.node).collect(),
            },
            TypeKind::Union(union) => MergedKind::Union {
                members: union.members.iter().map(|n| n.node.as_str()).collect(),
            },
            TypeKind::Enum(enum_type) => MergedKind::Enum {
                values: enum_type
                    .values
                    .iter()
                    .map(|v| v.node.value.node.as_str())
                    .collect(),
            },
            TypeKind::InputObject(input) => MergedKind::InputObject {
                fields: input.fields.iter().map(|f| &f.node).collect(),
            },
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MergedKind::Scalar => "a scalar",
            MergedKind::Object { .. } => "an object",
            MergedKind::Interface { .. } => "an interface",
            MergedKind::Union { .. } => "a union",
            MergedKind::Enum { .. } => "an enum",
            MergedKind::InputObject { .. } => "an input object",
        }
    }

    /// Folds an `extend` (or repeated) definition of the same type into this one.
    fn absorb(&mut self, name: &str, other: MergedKind<'a>) -> Result<(), SchemaBuildError> {
        match (self, other) {
            (MergedKind::Scalar, MergedKind::Scalar) => {}
            (
                MergedKind::Object { implements, fields },
                MergedKind::Object {
                    implements: more_implements,
                    fields: more_fields,
                },
            )
            | (
                MergedKind::Interface { implements, fields },
                MergedKind::Interface {
                    implements: more_implements,
                    fields: more_fields,
                },
            ) => {
                implements.extend(more_implements);
                fields.extend(more_fields);
            }
            (MergedKind::Union { members }, MergedKind::Union { members: more }) => {
                members.extend(more)
            }
            (MergedKind::Enum { values }, MergedKind::Enum { values: more }) => values.extend(more),
            (MergedKind::InputObject { fields }, MergedKind::InputObject { fields: more }) => {
                fields.extend(more)
            }
            (existing, incoming) => {
                return Err(SchemaBuildError::ConflictingDefinition {
                    name: name.to_string(),
                    first: existing.label(),
                    second: incoming.label(),
                });
            }
        }
        Ok(())
    }
}

pub(crate) struct MergedType<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub kind: MergedKind<'a>,
}

/// Every named type of a parsed document, keyed by name in declaration order.
pub(crate) struct Catalog<'a> {
    types: IndexMap<&'a str, MergedType<'a>>,
}

impl<'a> Catalog<'a> {
    pub fn from_document(document: &'a ServiceDocument) -> Result<Self, SchemaBuildError> {
        let mut types: IndexMap<&'a str, MergedType<'a>> = IndexMap::new();

        for definition in &document.definitions {
            let TypeSystemDefinition::Type(definition) = definition else {
                continue;
            };
            let definition = &definition.node;
            let name = definition.name.node.as_str();
            let kind = MergedKind::from_kind(&definition.kind);

            match types.entry(name) {
                Entry::Vacant(entry) => {
                    entry.insert(MergedType {
                        name,
                        description: definition.description.as_ref().map(|d| d.node.as_str()),
                        kind,
                    });
                }
                Entry::Occupied(mut entry) => {
                    let merged = entry.get_mut();
                    if merged.description.is_none() {
                        merged.description =
                            definition.description.as_ref().map(|d| d.node.as_str());
                    }
                    merged.kind.absorb(name, kind)?;
                }
            }
        }

        Ok(Self { types })
    }

    pub fn types(&self) -> impl Iterator<Item = &MergedType<'a>> {
        self.types.values()
    }

    pub fn category(&self, name: &str) -> TypeCategory {
        match self.types.get(name).map(|ty| &ty.kind) {
            Some(MergedKind::Object { .. }) => TypeCategory::Object,
            Some(MergedKind::Interface { .. }) | Some(MergedKind::Union { .. }) => {
                TypeCategory::Abstract
            }
            Some(MergedKind::Enum { .. }) => TypeCategory::Enum,
            _ => TypeCategory::Leaf,
        }
    }

    fn is_object(&self, name: &str) -> bool {
        self.category(name) == TypeCategory::Object
    }
}

/// Root operation type names of a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roots {
    pub query: String,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

impl Roots {
    /// Uses the document's `schema { }` block when there is one, otherwise the
    /// configured root keys whose types exist.
    pub(crate) fn resolve(
        document: &ServiceDocument,
        catalog: &Catalog<'_>,
        root_keys: &RootKeys,
    ) -> Result<Self, SchemaBuildError> {
        let declared = document.definitions.iter().find_map(|definition| match definition {
            TypeSystemDefinition::Schema(schema) => Some(&schema.node),
            _ => None,
        });

        let (query, mutation, subscription) = match declared {
            Some(schema) => (
                schema.query.as_ref().map(|n| n.node.to_string()),
                schema.mutation.as_ref().map(|n| n.node.to_string()),
                schema.subscription.as_ref().map(|n| n.node.to_string()),
            ),
            None => {
                let existing = |name: &str| catalog.is_object(name).then(|| name.to_string());
                (
                    existing(&root_keys.query),
                    existing(&root_keys.mutation),
                    existing(&root_keys.subscription),
                )
            }
        };

        let query = query.ok_or(SchemaBuildError::MissingQueryRoot)?;
        for root in std::iter::once(&query).chain(mutation.iter()).chain(subscription.iter()) {
            if !catalog.is_object(root) {
                return Err(SchemaBuildError::UnknownRootType(root.clone()));
            }
        }

        Ok(Self {
            query,
            mutation,
            subscription,
        })
    }

    pub fn is_subscription(&self, name: &str) -> bool {
        self.subscription.as_deref() == Some(name)
    }
}

pub(crate) fn type_ref(ty: &Type) -> TypeRef {
    let base = match &ty.base {
        BaseType::Named(name) => TypeRef::named(name.to_string()),
        BaseType::List(item) => TypeRef::List(Box::new(type_ref(item))),
    };
    if ty.nullable {
        base
    } else {
        TypeRef::NonNull(Box::new(base))
    }
}
