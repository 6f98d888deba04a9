use super::*;

/// Union of enum values by name. A later description replaces an earlier one, and directives are
/// merged.
pub(super) fn merge_enum_values(existing: &mut Vec<EnumValueDefinition>, incoming: Vec<EnumValueDefinition>) {
    for value in incoming {
        let Some(existing_value) = existing.iter_mut().find(|known| known.name == value.name) else {
            existing.push(value);
            continue;
        };

        if value.description.is_some() {
            existing_value.description = value.description;
        }

        existing_value.directives = merge_directives(mem::take(&mut existing_value.directives), value.directives);
    }
}
