use super::*;
use crate::render_sdl::render_directive_definition;

/// Two definitions of the same directive must agree on everything but their locations, which are
/// unioned.
pub(super) fn merge_directive_definitions(
    existing: &mut DirectiveDefinition,
    incoming: DirectiveDefinition,
    config: &MergeConfig,
) -> Result<(), MergeError> {
    if !same_signature(existing, &incoming) {
        if config.throw_on_conflict {
            return Err(MergeError::DirectiveRedefinitionConflict {
                name: existing.name.clone(),
                existing: render_directive_definition(existing),
                incoming: render_directive_definition(&incoming),
            });
        }

        tracing::debug!(name = %existing.name, "Keeping the first of two different definitions of a directive");

        return Ok(());
    }

    merge_description(&mut existing.description, incoming.description);

    for location in incoming.locations {
        if !existing.locations.contains(&location) {
            existing.locations.push(location);
        }
    }

    Ok(())
}

fn same_signature(a: &DirectiveDefinition, b: &DirectiveDefinition) -> bool {
    a.repeatable == b.repeatable
        && a.arguments.len() == b.arguments.len()
        && a.arguments.iter().zip(&b.arguments).all(|(a, b)| {
            a.name == b.name && a.ty == b.ty && a.default_value == b.default_value && a.directives == b.directives
        })
}
