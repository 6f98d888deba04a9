use super::*;

pub(super) fn ingest_directives(directives: ast::iter::Iter<'_, ast::Directive<'_>>) -> Vec<Directive> {
    directives
        .map(|directive| Directive {
            name: directive.name().to_owned(),
            arguments: directive
                .arguments()
                .map(|argument| (argument.name().to_owned(), ingest_value(argument.value())))
                .collect(),
        })
        .collect()
}

pub(super) fn ingest_directive_definition(directive_definition: ast::DirectiveDefinition<'_>) -> DirectiveDefinition {
    DirectiveDefinition {
        name: directive_definition.name().to_owned(),
        description: directive_definition
            .description()
            .map(|description| description.to_cow().into_owned()),
        arguments: directive_definition
            .arguments()
            .map(ingest_input_value_definition)
            .collect(),
        repeatable: directive_definition.is_repeatable(),
        locations: directive_definition
            .locations()
            .map(|location| location_name(location).to_owned())
            .collect(),
    }
}

fn location_name(location: ast::DirectiveLocation) -> &'static str {
    match location {
        ast::DirectiveLocation::Query => "QUERY",
        ast::DirectiveLocation::Mutation => "MUTATION",
        ast::DirectiveLocation::Subscription => "SUBSCRIPTION",
        ast::DirectiveLocation::Field => "FIELD",
        ast::DirectiveLocation::FragmentDefinition => "FRAGMENT_DEFINITION",
        ast::DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
        ast::DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
        ast::DirectiveLocation::VariableDefinition => "VARIABLE_DEFINITION",
        ast::DirectiveLocation::Schema => "SCHEMA",
        ast::DirectiveLocation::Scalar => "SCALAR",
        ast::DirectiveLocation::Object => "OBJECT",
        ast::DirectiveLocation::FieldDefinition => "FIELD_DEFINITION",
        ast::DirectiveLocation::ArgumentDefinition => "ARGUMENT_DEFINITION",
        ast::DirectiveLocation::Interface => "INTERFACE",
        ast::DirectiveLocation::Union => "UNION",
        ast::DirectiveLocation::Enum => "ENUM",
        ast::DirectiveLocation::EnumValue => "ENUM_VALUE",
        ast::DirectiveLocation::InputObject => "INPUT_OBJECT",
        ast::DirectiveLocation::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
    }
}
