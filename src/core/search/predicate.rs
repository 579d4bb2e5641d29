//! Per-category match predicates.
//!
//! Every predicate first checks the entry URL for the category's marker, then
//! (except for Classes) inspects the resolved record. Facets are read by
//! position in the order the catalogue defines them. All facet constraints of
//! one category are AND-ed; numeric comparisons are exact equality.

use super::category::CategoryKind;
use super::facet::FacetChoice;
use crate::core::compendium::ResourceRecord;

/// Fields on equipment that may carry a category-like label.
const ITEM_LABEL_FIELDS: &[&str] = &[
    "vehicle_category",
    "armor_category",
    "weapon_category",
    "weapon_range",
    "tool_category",
];

/// Cheap URL check run before any resolution.
pub fn url_gate(kind: CategoryKind, url: &str) -> bool {
    url.contains(kind.url_marker())
}

/// Whether the predicate needs the full record behind the URL.
pub fn needs_record(kind: CategoryKind) -> bool {
    kind != CategoryKind::Classes
}

/// Evaluate a category predicate against a resolved record.
///
/// The caller is expected to have checked [`url_gate`] already.
pub fn matches_record(kind: CategoryKind, choices: &[FacetChoice], record: &ResourceRecord) -> bool {
    match kind {
        CategoryKind::Spells => matches_spell(choices, record),
        CategoryKind::Traits => matches_trait(choices, record),
        CategoryKind::Items => matches_item(choices, record),
        CategoryKind::Monsters => matches_monster(choices, record),
        CategoryKind::MagicItems => matches_magic_item(choices, record),
        CategoryKind::Classes => true,
    }
}

/// Selection of the facet at `index`; `None` means "Any" (or no such facet).
fn selected(choices: &[FacetChoice], index: usize) -> Option<&str> {
    choices.get(index).and_then(FacetChoice::selection)
}

/// Bidirectional substring match used for near-synonymous labels
/// ("Wondrous Items" vs "Wondrous Item").
fn overlaps(selection: &str, label: &str) -> bool {
    selection.contains(label) || label.contains(selection)
}

fn matches_spell(choices: &[FacetChoice], record: &ResourceRecord) -> bool {
    let school_ok = selected(choices, 0).map_or(true, |school| {
        record.nested_name("school") == Some(school)
    });
    let level_ok = selected(choices, 1).map_or(true, |level| {
        record.scalar_string("level").as_deref() == Some(level)
    });
    let class_ok = selected(choices, 2).map_or(true, |class| {
        record.names_in("classes").contains(&class)
    });
    school_ok && level_ok && class_ok
}

fn matches_trait(choices: &[FacetChoice], record: &ResourceRecord) -> bool {
    selected(choices, 0).map_or(true, |race| record.names_in("races").contains(&race))
}

fn matches_item(choices: &[FacetChoice], record: &ResourceRecord) -> bool {
    let category_ok = selected(choices, 0).map_or(true, |category| {
        record.nested_name("equipment_category") == Some(category)
            || record
                .nested_name("gear_category")
                .is_some_and(|gear| overlaps(category, gear))
            || ITEM_LABEL_FIELDS.iter().any(|field| {
                record
                    .str_field(field)
                    .filter(|label| !label.is_empty())
                    .is_some_and(|label| overlaps(category, label))
            })
    });
    let property_ok = selected(choices, 1).map_or(true, |property| {
        record.names_in("properties").contains(&property)
    });
    category_ok && property_ok
}

fn matches_monster(choices: &[FacetChoice], record: &ResourceRecord) -> bool {
    let Some(wanted) = choices.first().and_then(FacetChoice::range_value) else {
        return true;
    };
    record.number("challenge_rating") == Some(wanted)
}

fn matches_magic_item(choices: &[FacetChoice], record: &ResourceRecord) -> bool {
    let rarity_ok = selected(choices, 0).map_or(true, |rarity| {
        record.nested_name("rarity") == Some(rarity)
    });
    let type_ok = selected(choices, 1).map_or(true, |item_type| {
        record
            .nested_name("equipment_category")
            .is_some_and(|category| overlaps(item_type, category))
    });
    rarity_ok && type_ok
}
