//! Structural classification of compendium records.
//!
//! The API does not tag records with a type, so the kind of a record is read
//! off its shape and its URL. [`RULES`] is evaluated top to bottom and the
//! first match wins. Several rules overlap, so the order is part of the
//! contract:
//!
//! - `armor_category` beats the generic equipment and bundle rules
//! - Gear excludes `equipment-categories` URLs, which are matched much later
//! - Class excludes `subclasses` URLs (`"classes"` is a substring of them)
//! - Subrace is checked before Race for the same reason

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::compendium::ResourceRecord;

// ============================================================================
// VariantTag
// ============================================================================

/// The kind of resource a record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantTag {
    Armor,
    Gear,
    Spell,
    /// Equipment packs and other records with `contents`.
    Bundle,
    MagicSchool,
    Monster,
    Alignment,
    MagicItem,
    Class,
    Skill,
    AbilityScore,
    Feature,
    EquipmentCategory,
    Subclass,
    Subrace,
    Race,
    Trait,
}

impl VariantTag {
    /// Human-readable label for page titles.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Armor => "Armor",
            Self::Gear => "Gear",
            Self::Spell => "Spell",
            Self::Bundle => "Bundle",
            Self::MagicSchool => "Magic School",
            Self::Monster => "Monster",
            Self::Alignment => "Alignment",
            Self::MagicItem => "Magic Item",
            Self::Class => "Class",
            Self::Skill => "Skill",
            Self::AbilityScore => "Ability Score",
            Self::Feature => "Feature",
            Self::EquipmentCategory => "Equipment Category",
            Self::Subclass => "Subclass",
            Self::Subrace => "Subrace",
            Self::Race => "Race",
            Self::Trait => "Trait",
        }
    }
}

impl fmt::Display for VariantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// No classification rule matched the record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown resource variant: no classification rule matched {url}")]
pub struct UnknownVariantError {
    pub url: String,
}

// ============================================================================
// Rules
// ============================================================================

/// One predicate -> tag step of the classifier.
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    /// Short name used in debug logs.
    pub name: &'static str,
    pub tag: VariantTag,
    predicate: fn(&ResourceRecord) -> bool,
}

impl ClassificationRule {
    pub fn matches(&self, record: &ResourceRecord) -> bool {
        (self.predicate)(record)
    }
}

impl fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .finish()
    }
}

fn url_has(record: &ResourceRecord, needle: &str) -> bool {
    record.url().contains(needle)
}

fn is_armor(r: &ResourceRecord) -> bool {
    r.has("armor_category")
}

fn is_gear(r: &ResourceRecord) -> bool {
    url_has(r, "equipment") && !r.has("contents") && !url_has(r, "equipment-categories")
}

fn is_spell(r: &ResourceRecord) -> bool {
    r.has("components")
}

fn is_bundle(r: &ResourceRecord) -> bool {
    r.list_len("contents") > 0
}

fn is_magic_school(r: &ResourceRecord) -> bool {
    url_has(r, "magic-schools")
}

fn is_monster(r: &ResourceRecord) -> bool {
    url_has(r, "monsters")
}

fn is_alignment(r: &ResourceRecord) -> bool {
    url_has(r, "alignments")
}

fn is_magic_item(r: &ResourceRecord) -> bool {
    url_has(r, "magic-items")
}

fn is_class(r: &ResourceRecord) -> bool {
    url_has(r, "classes") && !url_has(r, "subclasses")
}

fn is_skill(r: &ResourceRecord) -> bool {
    url_has(r, "skills")
}

fn is_ability_score(r: &ResourceRecord) -> bool {
    url_has(r, "ability-scores")
}

fn is_feature(r: &ResourceRecord) -> bool {
    url_has(r, "features")
}

fn is_equipment_category(r: &ResourceRecord) -> bool {
    url_has(r, "equipment-categories")
}

fn is_subclass(r: &ResourceRecord) -> bool {
    url_has(r, "subclasses")
}

fn is_subrace(r: &ResourceRecord) -> bool {
    url_has(r, "subraces")
}

fn is_race(r: &ResourceRecord) -> bool {
    url_has(r, "races")
}

fn is_trait(r: &ResourceRecord) -> bool {
    url_has(r, "traits")
}

const fn rule(
    name: &'static str,
    tag: VariantTag,
    predicate: fn(&ResourceRecord) -> bool,
) -> ClassificationRule {
    ClassificationRule {
        name,
        tag,
        predicate,
    }
}

/// Classification rules in priority order.
pub const RULES: &[ClassificationRule] = &[
    rule("armor_category", VariantTag::Armor, is_armor),
    rule("equipment_without_contents", VariantTag::Gear, is_gear),
    rule("components", VariantTag::Spell, is_spell),
    rule("non_empty_contents", VariantTag::Bundle, is_bundle),
    rule("magic_schools_url", VariantTag::MagicSchool, is_magic_school),
    rule("monsters_url", VariantTag::Monster, is_monster),
    rule("alignments_url", VariantTag::Alignment, is_alignment),
    rule("magic_items_url", VariantTag::MagicItem, is_magic_item),
    rule("classes_url", VariantTag::Class, is_class),
    rule("skills_url", VariantTag::Skill, is_skill),
    rule("ability_scores_url", VariantTag::AbilityScore, is_ability_score),
    rule("features_url", VariantTag::Feature, is_feature),
    rule(
        "equipment_categories_url",
        VariantTag::EquipmentCategory,
        is_equipment_category,
    ),
    rule("subclasses_url", VariantTag::Subclass, is_subclass),
    rule("subraces_url", VariantTag::Subrace, is_subrace),
    rule("races_url", VariantTag::Race, is_race),
    rule("traits_url", VariantTag::Trait, is_trait),
];

/// The first rule that matches `record`, if any.
pub fn matching_rule(record: &ResourceRecord) -> Option<&'static ClassificationRule> {
    RULES.iter().find(|rule| rule.matches(record))
}

/// Classify a record. Pure: the same record always yields the same result.
pub fn classify(record: &ResourceRecord) -> Result<VariantTag, UnknownVariantError> {
    match matching_rule(record) {
        Some(rule) => {
            log::trace!("{} classified as {} by rule '{}'", record.url(), rule.tag, rule.name);
            Ok(rule.tag)
        }
        None => Err(UnknownVariantError {
            url: record.url().to_string(),
        }),
    }
}
