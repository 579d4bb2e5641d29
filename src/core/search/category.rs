//! Filter categories and the facet catalogue.
//!
//! Each category owns an ordered list of facets. Option lists that depend on
//! compendium data (schools, classes, races, equipment categories, weapon
//! properties) are fetched once by [`FacetCatalogue::load`] and then shared
//! read-only by every session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::SearchError;
use super::facet::FacetChoice;
use crate::core::compendium::CompendiumSource;

/// Equipment categories that belong to magic items and are left out of the
/// Items category options.
pub const MAGIC_ITEM_CATEGORIES: &[&str] = &[
    "Land Vehicles",
    "Wondrous Items",
    "Rod",
    "Potion",
    "Ring",
    "Scroll",
    "Staff",
    "Wand",
];

pub const SPELL_LEVELS: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

pub const RARITIES: &[&str] = &[
    "Varies",
    "Common",
    "Uncommon",
    "Rare",
    "Very Rare",
    "Legendary",
    "Artifact",
];

pub const MAGIC_ITEM_TYPES: &[&str] = &[
    "Wondrous Item",
    "Rod",
    "Potion",
    "Ring",
    "Scroll",
    "Staff",
    "Wand",
];

/// Challenge rating spin control bounds.
pub const CHALLENGE_RATING_MIN: f64 = 0.0;
pub const CHALLENGE_RATING_MAX: f64 = 50.0;

// ============================================================================
// CategoryKind
// ============================================================================

/// The filterable categories, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Spells,
    Traits,
    Items,
    Monsters,
    MagicItems,
    Classes,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 6] = [
        Self::Spells,
        Self::Traits,
        Self::Items,
        Self::Monsters,
        Self::MagicItems,
        Self::Classes,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Spells => "Spells",
            Self::Traits => "Traits",
            Self::Items => "Items",
            Self::Monsters => "Monsters",
            Self::MagicItems => "Magic Items",
            Self::Classes => "Classes",
        }
    }

    /// URL fragment every record of this category carries.
    pub fn url_marker(&self) -> &'static str {
        match self {
            Self::Spells => "spells",
            Self::Traits => "traits",
            Self::Items => "equipment",
            Self::Monsters => "monsters",
            Self::MagicItems => "magic-items",
            Self::Classes => "classes",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for CategoryKind {
    type Err = SearchError;

    /// Accepts the display title or the identifier, ignoring case, spaces,
    /// dashes and underscores (`"Magic Items"`, `"magic_items"`, `"MagicItems"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|kind| kind.title().replace(' ', "").to_lowercase() == wanted)
            .ok_or_else(|| SearchError::UnknownCategory(s.to_string()))
    }
}

// ============================================================================
// CategoryDefinition / FacetCatalogue
// ============================================================================

/// A category with its default facet state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub kind: CategoryKind,
    pub choices: Vec<FacetChoice>,
}

impl CategoryDefinition {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

/// Option lists pulled from the compendium when the catalogue is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceOptions {
    pub magic_schools: Vec<String>,
    pub classes: Vec<String>,
    pub races: Vec<String>,
    pub equipment_categories: Vec<String>,
    pub weapon_properties: Vec<String>,
}

/// Read-only category definitions shared by every session.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetCatalogue {
    categories: Vec<CategoryDefinition>,
}

impl FacetCatalogue {
    /// Fetch the reference listings and build every category.
    ///
    /// A listing that cannot be fetched is logged and leaves its facet with
    /// only the "Any" option; the catalogue itself always loads.
    pub async fn load(source: &dyn CompendiumSource) -> Self {
        let (magic_schools, classes, races, equipment_categories, weapon_properties) = futures::join!(
            listing_names(source, "/api/magic-schools"),
            listing_names(source, "/api/classes"),
            listing_names(source, "/api/races"),
            listing_names(source, "/api/equipment-categories"),
            listing_names(source, "/api/weapon-properties"),
        );

        let catalogue = Self::from_options(ReferenceOptions {
            magic_schools,
            classes,
            races,
            equipment_categories,
            weapon_properties,
        });
        log::info!(
            "Facet catalogue loaded from {} source: {} categories",
            source.id(),
            catalogue.categories.len()
        );
        catalogue
    }

    /// Build the catalogue from already-fetched option lists.
    pub fn from_options(options: ReferenceOptions) -> Self {
        let item_categories = options
            .equipment_categories
            .into_iter()
            .filter(|name| !MAGIC_ITEM_CATEGORIES.contains(&name.as_str()));

        let categories = vec![
            CategoryDefinition {
                kind: CategoryKind::Spells,
                choices: vec![
                    FacetChoice::choice("School", options.magic_schools),
                    FacetChoice::choice("Level", SPELL_LEVELS.iter().copied()),
                    FacetChoice::choice("Classes", options.classes),
                ],
            },
            CategoryDefinition {
                kind: CategoryKind::Traits,
                choices: vec![FacetChoice::choice("Races", options.races)],
            },
            CategoryDefinition {
                kind: CategoryKind::Items,
                choices: vec![
                    FacetChoice::choice("Categories", item_categories),
                    FacetChoice::choice("Properties", options.weapon_properties),
                ],
            },
            CategoryDefinition {
                kind: CategoryKind::Monsters,
                choices: vec![FacetChoice::range(
                    "Challenge Rating",
                    CHALLENGE_RATING_MIN,
                    CHALLENGE_RATING_MAX,
                    CHALLENGE_RATING_MIN,
                )],
            },
            CategoryDefinition {
                kind: CategoryKind::MagicItems,
                choices: vec![
                    FacetChoice::choice("Rarity", RARITIES.iter().copied()),
                    FacetChoice::choice("Type", MAGIC_ITEM_TYPES.iter().copied()),
                ],
            },
            CategoryDefinition {
                kind: CategoryKind::Classes,
                choices: Vec::new(),
            },
        ];

        Self { categories }
    }

    pub fn get(&self, kind: CategoryKind) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|c| c.kind == kind)
    }

    /// Categories in menu order.
    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }
}

async fn listing_names(source: &dyn CompendiumSource, path: &str) -> Vec<String> {
    match source.list_category(path).await {
        Ok(entries) => entries.into_iter().map(|e| e.name).collect(),
        Err(e) => {
            log::warn!("Facet options unavailable for {path}: {e}");
            Vec::new()
        }
    }
}
