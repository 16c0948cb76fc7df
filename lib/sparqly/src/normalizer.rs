use crate::query_text::PrefixMap;
use sparql_database::results::Binding;

/// Rewrites `value` and `datatype` of every bound term from a full IRI to `token:local` form.
///
/// The first prefix (in map order) whose IRI starts the field wins; there is no longest-match
/// preference. Returns the number of rewritten fields.
pub fn normalize(bindings: &mut [Binding], prefixes: &PrefixMap) -> usize {
    if prefixes.is_empty() {
        return 0;
    }
    let mut rewritten = 0;
    for binding in bindings.iter_mut() {
        for term in binding.values_mut() {
            if shorten(&mut term.value, prefixes) {
                rewritten += 1;
            }
            if let Some(datatype) = term.datatype.as_mut() {
                if shorten(datatype, prefixes) {
                    rewritten += 1;
                }
            }
        }
    }
    rewritten
}

fn shorten(field: &mut String, prefixes: &PrefixMap) -> bool {
    for (token, iri) in prefixes {
        if let Some(local) = field.strip_prefix(iri.as_str()) {
            *field = format!("{token}:{local}");
            return true;
        }
    }
    false
}
