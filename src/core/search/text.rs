//! Free-text matching against entry names.

/// Whether an entry name is eligible for the current search text.
///
/// Matching is case-insensitive and bidirectional: a short query matches a
/// longer name ("fire" -> "Fireball"), and a query that has grown past the
/// full name still matches it ("Fireball Spell" -> "Fireball"), so matches stay
/// put while the user keeps typing. An empty query matches everything.
pub fn text_matches(name: &str, search_text: &str) -> bool {
    if search_text.is_empty() {
        return true;
    }
    let name = name.to_lowercase();
    let query = search_text.to_lowercase();
    name.contains(&query) || query.contains(&name)
}
