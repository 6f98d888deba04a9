use super::*;

pub(super) fn merge_fields(
    type_name: &str,
    existing: &mut Vec<FieldDefinition>,
    incoming: Vec<FieldDefinition>,
    config: &MergeConfig,
) -> Result<(), MergeError> {
    for field in incoming {
        let Some(existing_field) = existing.iter_mut().find(|known| known.name == field.name) else {
            existing.push(field);
            continue;
        };

        check_field_types(type_name, &field.name, &existing_field.ty, &field.ty, config)?;

        merge_description(&mut existing_field.description, field.description);
        merge_arguments(&mut existing_field.arguments, field.arguments);
        existing_field.directives = merge_directives(mem::take(&mut existing_field.directives), field.directives);
    }

    Ok(())
}

pub(super) fn merge_input_fields(
    type_name: &str,
    existing: &mut Vec<InputValueDefinition>,
    incoming: Vec<InputValueDefinition>,
    config: &MergeConfig,
) -> Result<(), MergeError> {
    for field in incoming {
        let Some(existing_field) = existing.iter_mut().find(|known| known.name == field.name) else {
            existing.push(field);
            continue;
        };

        check_field_types(type_name, &field.name, &existing_field.ty, &field.ty, config)?;

        merge_description(&mut existing_field.description, field.description);

        if existing_field.default_value.is_none() {
            existing_field.default_value = field.default_value;
        }

        existing_field.directives = merge_directives(mem::take(&mut existing_field.directives), field.directives);
    }

    Ok(())
}

/// Arguments are unioned by name. The first definition of an argument wins.
fn merge_arguments(existing: &mut Vec<InputValueDefinition>, incoming: Vec<InputValueDefinition>) {
    for argument in incoming {
        if !existing.iter().any(|known| known.name == argument.name) {
            existing.push(argument);
        }
    }
}

/// The first declared type is always kept. A different type is only an error with
/// `throw_on_conflict`, and only when the incoming type is not a safe change of the existing one.
fn check_field_types(
    type_name: &str,
    field: &str,
    existing: &Type,
    incoming: &Type,
    config: &MergeConfig,
) -> Result<(), MergeError> {
    if existing == incoming {
        return Ok(());
    }

    if config.throw_on_conflict && !existing.is_safe_change_to(incoming) {
        return Err(MergeError::FieldTypeConflict {
            type_name: type_name.to_owned(),
            field: field.to_owned(),
            existing: existing.clone(),
            incoming: incoming.clone(),
        });
    }

    tracing::debug!(
        type_name,
        field,
        existing = %existing,
        incoming = %incoming,
        "Keeping the first type of a field declared with different types"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, ty: Type) -> FieldDefinition {
        FieldDefinition {
            name: name.to_owned(),
            description: None,
            arguments: Vec::new(),
            ty,
            directives: Vec::new(),
        }
    }

    fn argument(name: &str) -> InputValueDefinition {
        InputValueDefinition {
            name: name.to_owned(),
            description: None,
            ty: Type::named("Int"),
            default_value: None,
            directives: Vec::new(),
        }
    }

    #[test]
    fn arguments_and_descriptions_of_a_shared_field() {
        let mut existing = vec![FieldDefinition {
            arguments: vec![argument("first")],
            ..field("posts", Type::named("Post").list())
        }];

        let incoming = vec![
            FieldDefinition {
                description: Some("All the posts".to_owned()),
                arguments: vec![argument("first"), argument("after")],
                directives: vec![Directive::new("deprecated")],
                ..field("posts", Type::named("Post").list())
            },
            field("count", Type::named("Int")),
        ];

        merge_fields("User", &mut existing, incoming, &MergeConfig::default()).unwrap();

        assert_eq!(existing.len(), 2);

        let posts = &existing[0];
        assert_eq!(posts.description.as_deref(), Some("All the posts"));
        assert_eq!(
            posts.arguments.iter().map(|argument| argument.name.as_str()).collect::<Vec<_>>(),
            ["first", "after"]
        );
        assert_eq!(posts.directives, [Directive::new("deprecated")]);
    }

    #[test]
    fn input_fields_keep_the_first_default() {
        let mut existing = vec![argument("limit")];
        let incoming = vec![InputValueDefinition {
            default_value: Some(Value::Int(10)),
            ..argument("limit")
        }];

        merge_input_fields("Filter", &mut existing, incoming, &MergeConfig::default()).unwrap();

        assert_eq!(existing[0].default_value, Some(Value::Int(10)));
    }

    #[test]
    fn input_field_type_conflicts() {
        let config = MergeConfig {
            throw_on_conflict: true,
            ..Default::default()
        };

        let error = merge_input_fields(
            "Filter",
            &mut vec![argument("limit")],
            vec![InputValueDefinition {
                ty: Type::named("String"),
                ..argument("limit")
            }],
            &config,
        )
        .unwrap_err();

        assert!(matches!(error, MergeError::FieldTypeConflict { field, .. } if field == "limit"));
    }
}
