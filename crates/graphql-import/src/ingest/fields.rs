use super::*;

pub(super) fn ingest_fields(fields: ast::iter::Iter<'_, ast::FieldDefinition<'_>>) -> Vec<FieldDefinition> {
    fields
        .map(|field| FieldDefinition {
            name: field.name().to_owned(),
            description: field.description().map(|description| description.to_cow().into_owned()),
            arguments: field.arguments().map(ingest_input_value_definition).collect(),
            ty: ingest_type(field.ty()),
            directives: ingest_directives(field.directives()),
        })
        .collect()
}

pub(super) fn ingest_input_value_definition(input_value: ast::InputValueDefinition<'_>) -> InputValueDefinition {
    InputValueDefinition {
        name: input_value.name().to_owned(),
        description: input_value
            .description()
            .map(|description| description.to_cow().into_owned()),
        ty: ingest_type(input_value.ty()),
        default_value: input_value.default_value().map(ingest_value),
        directives: ingest_directives(input_value.directives()),
    }
}
