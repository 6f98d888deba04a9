//! Conversion of the parser AST into owned [Definition]s. This is a separate module so the rest of
//! the crate never touches parser types.

mod directives;
mod fields;

use self::{directives::*, fields::*};
use crate::definitions::*;
use cynic_parser::{ConstValue, type_system as ast};

pub(crate) fn ingest_document(document: &ast::TypeSystemDocument) -> Vec<Definition> {
    document.definitions().map(ingest_definition).collect()
}

fn ingest_definition(definition: ast::Definition<'_>) -> Definition {
    match definition {
        ast::Definition::Schema(schema) => ingest_schema_definition(schema, false),
        ast::Definition::SchemaExtension(schema) => ingest_schema_definition(schema, true),
        ast::Definition::Type(type_definition) => ingest_type_definition(type_definition, false),
        ast::Definition::TypeExtension(type_definition) => ingest_type_definition(type_definition, true),
        ast::Definition::Directive(directive_definition) => {
            Definition::Directive(ingest_directive_definition(directive_definition))
        }
    }
}

fn ingest_type_definition(type_definition: ast::TypeDefinition<'_>, extension: bool) -> Definition {
    let name = type_definition.name().to_owned();
    let description = type_definition
        .description()
        .map(|description| description.to_cow().into_owned());
    let directives = ingest_directives(type_definition.directives());

    match type_definition {
        ast::TypeDefinition::Object(object) => Definition::Object(ObjectType {
            name,
            description,
            interfaces: object.implements_interfaces().map(str::to_owned).collect(),
            directives,
            fields: ingest_fields(object.fields()),
            extension,
        }),
        ast::TypeDefinition::Interface(interface) => Definition::Interface(InterfaceType {
            name,
            description,
            interfaces: interface.implements_interfaces().map(str::to_owned).collect(),
            directives,
            fields: ingest_fields(interface.fields()),
            extension,
        }),
        ast::TypeDefinition::Union(union) => Definition::Union(UnionType {
            name,
            description,
            directives,
            members: union.members().map(|member| member.name().to_owned()).collect(),
            extension,
        }),
        ast::TypeDefinition::Enum(r#enum) => Definition::Enum(EnumType {
            name,
            description,
            directives,
            values: r#enum
                .values()
                .map(|value| EnumValueDefinition {
                    name: value.value().to_owned(),
                    description: value.description().map(|description| description.to_cow().into_owned()),
                    directives: ingest_directives(value.directives()),
                })
                .collect(),
            extension,
        }),
        ast::TypeDefinition::Scalar(_) => Definition::Scalar(ScalarType {
            name,
            description,
            directives,
            extension,
        }),
        ast::TypeDefinition::InputObject(input_object) => Definition::InputObject(InputObjectType {
            name,
            description,
            directives,
            fields: input_object.fields().map(ingest_input_value_definition).collect(),
            extension,
        }),
    }
}

fn ingest_schema_definition(schema: ast::SchemaDefinition<'_>, extension: bool) -> Definition {
    Definition::Schema(SchemaDefinition {
        description: schema.description().map(|description| description.to_cow().into_owned()),
        directives: ingest_directives(schema.directives()),
        operation_types: RootOperationTypes {
            query: schema.query_type().map(|root| root.named_type().to_owned()),
            mutation: schema.mutation_type().map(|root| root.named_type().to_owned()),
            subscription: schema.subscription_type().map(|root| root.named_type().to_owned()),
        },
        extension,
    })
}

fn ingest_type(ty: ast::Type<'_>) -> Type {
    use cynic_parser::common::WrappingType;

    // Wrappers come outermost first.
    let wrappers = ty.wrappers().collect::<Vec<_>>();

    wrappers
        .into_iter()
        .rev()
        .fold(Type::named(ty.name()), |inner, wrapper| match wrapper {
            WrappingType::NonNull => inner.non_null(),
            WrappingType::List => inner.list(),
        })
}

fn ingest_value(value: ConstValue<'_>) -> Value {
    match value {
        ConstValue::Null(_) => Value::Null,
        ConstValue::Int(n) => Value::Int(n.as_i64()),
        ConstValue::Float(n) => Value::Float(n.as_f64()),
        ConstValue::String(s) => Value::String(s.as_str().to_owned()),
        ConstValue::Boolean(b) => Value::Boolean(b.value()),
        ConstValue::Enum(e) => Value::Enum(e.name().to_owned()),
        ConstValue::List(list) => Value::List(list.items().map(ingest_value).collect()),
        ConstValue::Object(object) => Value::Object(
            object
                .fields()
                .map(|field| (field.name().to_owned(), ingest_value(field.value())))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ingest(sdl: &str) -> Vec<Definition> {
        ingest_document(&cynic_parser::parse_type_system_document(sdl).unwrap())
    }

    #[test]
    fn object_with_wrapped_field_types_and_arguments() {
        let definitions = ingest(
            r#"
            "A thing"
            type Thing implements Node @key(fields: "id") {
              id: ID!
              tags(first: Int = 10, filter: [String!]): [String!]! @deprecated(reason: "no")
            }
            "#,
        );

        let [Definition::Object(object)] = definitions.as_slice() else {
            unreachable!("expected a single object, got {definitions:?}");
        };

        assert_eq!(object.name, "Thing");
        assert_eq!(object.description.as_deref(), Some("A thing"));
        assert_eq!(object.interfaces, ["Node"]);
        assert_eq!(object.directives[0].name, "key");
        assert_eq!(object.fields[0].ty.to_string(), "ID!");

        let tags = &object.fields[1];
        assert_eq!(tags.ty.to_string(), "[String!]!");
        assert_eq!(tags.arguments[0].default_value, Some(Value::Int(10)));
        assert_eq!(tags.arguments[1].ty.to_string(), "[String!]");
        assert_eq!(
            tags.directives[0].argument("reason"),
            Some(&Value::String("no".to_owned()))
        );
    }

    #[test]
    fn every_kind_is_ingested() {
        let definitions = ingest(
            r#"
            schema { query: Root mutation: Mutations }
            directive @auth(requires: [Role!] = [ADMIN]) repeatable on OBJECT | FIELD_DEFINITION
            interface Node { id: ID! }
            union Item = Book | Movie
            enum Role { ADMIN USER @deprecated }
            scalar DateTime
            input Filter { ids: [ID!] }
            extend type Root { extra: Int }
            "#,
        );

        let kinds = definitions.iter().map(Definition::kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            [
                DefinitionKind::Schema,
                DefinitionKind::Directive,
                DefinitionKind::Interface,
                DefinitionKind::Union,
                DefinitionKind::Enum,
                DefinitionKind::Scalar,
                DefinitionKind::InputObject,
                DefinitionKind::Object,
            ]
        );

        let Definition::Schema(schema) = &definitions[0] else { unreachable!() };
        assert_eq!(schema.operation_types.query.as_deref(), Some("Root"));
        assert_eq!(schema.operation_types.mutation.as_deref(), Some("Mutations"));
        assert_eq!(schema.operation_types.subscription, None);

        let Definition::Directive(auth) = &definitions[1] else { unreachable!() };
        assert!(auth.repeatable);
        assert_eq!(auth.locations, ["OBJECT", "FIELD_DEFINITION"]);
        assert_eq!(
            auth.arguments[0].default_value,
            Some(Value::List(vec![Value::Enum("ADMIN".to_owned())]))
        );

        let Definition::Union(item) = &definitions[3] else { unreachable!() };
        assert_eq!(item.members, ["Book", "Movie"]);

        let Definition::Enum(role) = &definitions[4] else { unreachable!() };
        assert_eq!(role.values.len(), 2);
        assert_eq!(role.values[1].directives[0].name, "deprecated");

        assert!(definitions[7].is_extension());
        assert!(!definitions[6].is_extension());
    }
}
