use itertools::Itertools as _;

/// Union of implemented interfaces or union members. Names from the later definition come first,
/// followed by the earlier names it does not repeat.
pub(super) fn merge_named_types(existing: Vec<String>, incoming: Vec<String>) -> Vec<String> {
    incoming.into_iter().chain(existing).unique().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn later_names_first() {
        let merged = merge_named_types(names(&["A", "B"]), names(&["C", "A"]));

        assert_eq!(merged, ["C", "A", "B"]);
    }
}
