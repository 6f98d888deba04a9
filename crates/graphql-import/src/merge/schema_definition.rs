use super::*;

/// Fold a `schema` block into the accumulated one. The first type declared for an operation wins.
pub(super) fn merge_schema_definitions(existing: &mut Option<SchemaDefinition>, incoming: SchemaDefinition) {
    let Some(schema) = existing else {
        *existing = Some(incoming);
        return;
    };

    for (operation, type_name) in incoming.operation_types.iter() {
        let slot = schema.operation_types.get_mut(operation);

        if slot.is_none() {
            *slot = Some(type_name.to_owned());
        }
    }

    merge_description(&mut schema.description, incoming.description);
    schema.directives = merge_directives(mem::take(&mut schema.directives), incoming.directives);
    schema.extension &= incoming.extension;
}

/// The `schema` block that closes the merged output, if any.
///
/// Operations declared in an explicit `schema` block take precedence. The others are inferred from
/// object types named `Query`, `Mutation` and `Subscription`.
pub(super) fn synthesize_schema_definition(
    explicit: Option<SchemaDefinition>,
    definitions: &[Definition],
    config: &MergeConfig,
) -> Option<SchemaDefinition> {
    if !config.use_schema_definition {
        return None;
    }

    let mut schema = explicit.unwrap_or_default();

    for operation in OperationType::ALL {
        let type_name = operation.default_type_name();
        let slot = schema.operation_types.get_mut(operation);

        let defined = definitions
            .iter()
            .filter_map(Definition::as_object)
            .any(|object| object.name == type_name);

        if slot.is_none() && defined {
            *slot = Some(type_name.to_owned());
        }
    }

    if schema.operation_types.is_empty() {
        if !config.force_schema_definition {
            return None;
        }

        schema.operation_types.query = Some(OperationType::Query.default_type_name().to_owned());
    }

    schema.extension = false;

    Some(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(name: &str) -> Definition {
        Definition::Object(ObjectType {
            name: name.to_owned(),
            ..Default::default()
        })
    }

    #[test]
    fn inferred_from_root_types() {
        let schema = synthesize_schema_definition(
            None,
            &[object("Mutation"), object("Query"), object("User")],
            &MergeConfig::default(),
        )
        .unwrap();

        assert_eq!(schema.operation_types.query.as_deref(), Some("Query"));
        assert_eq!(schema.operation_types.mutation.as_deref(), Some("Mutation"));
        assert_eq!(schema.operation_types.subscription, None);
    }

    #[test]
    fn explicit_operations_take_precedence() {
        let mut explicit = None;
        merge_schema_definitions(
            &mut explicit,
            SchemaDefinition {
                operation_types: RootOperationTypes {
                    query: Some("RootQuery".to_owned()),
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        merge_schema_definitions(
            &mut explicit,
            SchemaDefinition {
                operation_types: RootOperationTypes {
                    query: Some("OtherQuery".to_owned()),
                    mutation: Some("RootMutation".to_owned()),
                    ..Default::default()
                },
                ..Default::default()
            },
        );

        let schema =
            synthesize_schema_definition(explicit, &[object("Query"), object("Subscription")], &MergeConfig::default())
                .unwrap();

        assert_eq!(
            schema.operation_types,
            RootOperationTypes {
                query: Some("RootQuery".to_owned()),
                mutation: Some("RootMutation".to_owned()),
                subscription: Some("Subscription".to_owned()),
            }
        );
    }

    #[test]
    fn forced_or_absent() {
        let forced = MergeConfig {
            force_schema_definition: true,
            ..Default::default()
        };

        assert_eq!(synthesize_schema_definition(None, &[object("User")], &MergeConfig::default()), None);

        let schema = synthesize_schema_definition(None, &[object("User")], &forced).unwrap();
        assert_eq!(schema.operation_types.query.as_deref(), Some("Query"));

        let disabled = MergeConfig {
            use_schema_definition: false,
            ..forced
        };
        assert_eq!(synthesize_schema_definition(None, &[object("Query")], &disabled), None);
    }
}
