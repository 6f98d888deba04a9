use super::*;

/// Union of directive usages by name. For a directive present on both sides, list arguments are
/// unioned and any other argument takes the incoming value.
pub(super) fn merge_directives(mut existing: Vec<Directive>, incoming: Vec<Directive>) -> Vec<Directive> {
    for directive in incoming {
        match existing.iter_mut().find(|known| known.name == directive.name) {
            Some(known) => merge_directive_arguments(&mut known.arguments, directive.arguments),
            None => existing.push(directive),
        }
    }

    existing
}

fn merge_directive_arguments(existing: &mut Vec<(String, Value)>, incoming: Vec<(String, Value)>) {
    for (name, value) in incoming {
        let Some((_, existing_value)) = existing.iter_mut().find(|(known, _)| *known == name) else {
            existing.push((name, value));
            continue;
        };

        match (existing_value, value) {
            (Value::List(existing_items), Value::List(items)) => {
                for item in items {
                    if !existing_items.contains(&item) {
                        existing_items.push(item);
                    }
                }
            }
            (existing_value, value) => *existing_value = value,
        }
    }
}
