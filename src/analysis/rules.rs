/// One row of an ordered rule table.
///
/// Every rule whose predicate holds contributes all of its entries; rules never
/// suppress each other. Mutually exclusive branches are expressed with
/// disjoint predicates.
pub struct Rule<C: 'static, E: 'static> {
    pub name: &'static str,
    pub applies: fn(&C) -> bool,
    pub entries: &'static [E],
}

/// Walk `rules` in table order and yield the entries of every matching rule.
pub fn evaluate<'a, C: 'static, E: 'static>(
    rules: &'a [Rule<C, E>],
    context: &'a C,
) -> impl Iterator<Item = &'static E> + 'a {
    rules
        .iter()
        .filter(move |rule| (rule.applies)(context))
        .flat_map(|rule| rule.entries.iter())
}

/// Names of the rules that fire for `context`, in table order.
pub fn fired<C: 'static, E: 'static>(rules: &[Rule<C, E>], context: &C) -> Vec<&'static str> {
    rules
        .iter()
        .filter(|rule| (rule.applies)(context))
        .map(|rule| rule.name)
        .collect()
}
