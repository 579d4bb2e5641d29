//! Search Session Scenario Tests
//!
//! End-to-end behavior of text search and category filters over the fixture
//! dataset:
//! - Text matching and filter OR-combination
//! - Per-category facet semantics
//! - Failure isolation and resolve memoization

use std::sync::Arc;

use crate::core::compendium::{CachedCompendium, CompendiumSource};
use crate::core::search::{CategoryKind, FacetValue, SearchError};
use crate::tests::common::{fixture_browser, fixture_compendium, fixture_session, visible_names};
use crate::tests::mocks::CountingSource;

// =============================================================================
// Text search
// =============================================================================

#[tokio::test]
async fn test_text_search_over_spells_and_monsters() {
    let mut session = fixture_session(&["/api/spells", "/api/monsters"]).await;
    assert_eq!(session.entries().len(), 8);

    let report = session.set_search_text("ab").await;

    assert_eq!(visible_names(&session), vec!["Aboleth"]);
    assert_eq!(report.visible, 1);
    assert_eq!(report.total, 8);
    assert!(!report.filters_revealed);
}

#[tokio::test]
async fn test_clearing_text_restores_everything() {
    let mut session = fixture_session(&["/api/spells", "/api/monsters"]).await;
    session.set_search_text("troll").await;
    assert_eq!(visible_names(&session), vec!["Troll"]);

    let report = session.set_search_text("").await;
    assert_eq!(report.visible, report.total);
}

#[tokio::test]
async fn test_overlong_query_keeps_match() {
    let mut session = fixture_session(&["/api/spells"]).await;
    session.set_search_text("Shield spell").await;
    assert_eq!(visible_names(&session), vec!["Shield"]);
}

// =============================================================================
// Filters
// =============================================================================

#[tokio::test]
async fn test_filters_or_combine_across_categories() {
    let mut session = fixture_session(&["/api/spells", "/api/equipment", "/api/magic-items"]).await;

    let (spells, _) = session.add_filter(CategoryKind::Spells).await.unwrap();
    session.update_facet(spells, 1, "3").await.unwrap();
    assert_eq!(visible_names(&session), vec!["Fireball"]);

    let (magic, _) = session.add_filter(CategoryKind::MagicItems).await.unwrap();
    let report = session.update_facet(magic, 0, "Rare").await.unwrap();

    assert_eq!(visible_names(&session), vec!["Fireball", "Flame Tongue"]);
    assert!(report.filters_revealed);
}

#[tokio::test]
async fn test_text_and_filters_combine() {
    let mut session = fixture_session(&["/api/spells", "/api/monsters"]).await;
    session.add_filter(CategoryKind::Spells).await.unwrap();
    assert_eq!(visible_names(&session), vec!["Fireball", "Shield", "Cure Wounds"]);

    session.set_search_text("fire").await;
    assert_eq!(visible_names(&session), vec!["Fireball"]);
}

#[tokio::test]
async fn test_spell_facets_and_within_filter() {
    let mut session = fixture_session(&["/api/spells"]).await;
    let (handle, _) = session.add_filter(CategoryKind::Spells).await.unwrap();

    session.update_facet(handle, 0, "Evocation").await.unwrap();
    assert_eq!(visible_names(&session), vec!["Fireball", "Cure Wounds"]);

    session.update_facet(handle, 2, "Wizard").await.unwrap();
    assert_eq!(visible_names(&session), vec!["Fireball"]);

    session.update_facet(handle, 1, "1").await.unwrap();
    assert!(visible_names(&session).is_empty());
}

#[tokio::test]
async fn test_monster_rating_is_exact() {
    let mut session = fixture_session(&["/api/monsters"]).await;
    let (handle, _) = session.add_filter(CategoryKind::Monsters).await.unwrap();
    // Default rating is 0.
    assert_eq!(visible_names(&session), vec!["Rat"]);

    session.update_facet(handle, 0, FacetValue::Number(5.0)).await.unwrap();
    assert_eq!(visible_names(&session), vec!["Troll"]);

    session.update_facet(handle, 0, FacetValue::Number(0.25)).await.unwrap();
    assert_eq!(visible_names(&session), vec!["Goblin"]);
}

#[tokio::test]
async fn test_item_categories_and_properties() {
    let mut session = fixture_session(&["/api/equipment"]).await;
    let (handle, _) = session.add_filter(CategoryKind::Items).await.unwrap();
    assert_eq!(session.visible_entries().count(), 5);

    session.update_facet(handle, 0, "Weapon").await.unwrap();
    assert_eq!(visible_names(&session), vec!["Longsword", "Rapier"]);

    session.update_facet(handle, 1, "Finesse").await.unwrap();
    assert_eq!(visible_names(&session), vec!["Rapier"]);
}

#[tokio::test]
async fn test_item_category_matches_labels() {
    let mut session = fixture_session(&["/api/equipment"]).await;
    let (handle, _) = session.add_filter(CategoryKind::Items).await.unwrap();

    session.update_facet(handle, 0, "Armor").await.unwrap();
    assert_eq!(visible_names(&session), vec!["Chain Mail"]);

    session.update_facet(handle, 0, "Adventuring Gear").await.unwrap();
    assert_eq!(visible_names(&session), vec!["Rope, hempen (50 feet)", "Explorer's Pack"]);
}

#[tokio::test]
async fn test_magic_item_type_overlaps_category() {
    let mut session = fixture_session(&["/api/magic-items"]).await;
    let (handle, _) = session.add_filter(CategoryKind::MagicItems).await.unwrap();

    session.update_facet(handle, 1, "Wondrous Item").await.unwrap();
    assert_eq!(visible_names(&session), vec!["Bag of Holding"]);
}

#[tokio::test]
async fn test_trait_race_facet() {
    let mut session = fixture_session(&["/api/traits"]).await;
    let (handle, _) = session.add_filter(CategoryKind::Traits).await.unwrap();

    session.update_facet(handle, 0, "Elf").await.unwrap();
    assert_eq!(visible_names(&session), vec!["Darkvision"]);
}

#[tokio::test]
async fn test_classes_filter_is_url_only() {
    let source = Arc::new(CachedCompendium::new(CountingSource::new(fixture_compendium())));
    let dyn_source: Arc<dyn CompendiumSource> = source.clone();
    let mut session = fixture_browser(dyn_source)
        .await
        .create_session_from(&["/api/classes", "/api/spells"])
        .await;

    session.add_filter(CategoryKind::Classes).await.unwrap();

    assert_eq!(visible_names(&session), vec!["Cleric", "Sorcerer", "Wizard"]);
    assert_eq!(source.inner().total_resolves(), 0);
}

#[tokio::test]
async fn test_removing_last_filter_collapses_row() {
    let mut session = fixture_session(&["/api/spells", "/api/monsters"]).await;
    let (handle, _) = session.add_filter(CategoryKind::Spells).await.unwrap();
    assert_eq!(session.visible_entries().count(), 3);

    let report = session.remove_filter(handle).await.unwrap();
    assert!(!report.filters_revealed);
    assert_eq!(report.visible, 8);

    assert!(matches!(
        session.remove_filter(handle).await,
        Err(SearchError::UnknownFilter(_))
    ));
}

#[tokio::test]
async fn test_add_filter_by_name() {
    let mut session = fixture_session(&["/api/magic-items"]).await;
    session.add_filter_named("Magic Items").await.unwrap();
    assert_eq!(session.filters()[0].kind(), CategoryKind::MagicItems);

    assert!(matches!(
        session.add_filter_named("Vehicles").await,
        Err(SearchError::UnknownCategory(_))
    ));
}

// =============================================================================
// Failures and memoization
// =============================================================================

#[tokio::test]
async fn test_resolve_failure_hides_only_that_entry() {
    let source: Arc<dyn CompendiumSource> = Arc::new(
        CountingSource::new(fixture_compendium()).with_broken("/api/spells/shield"),
    );
    let mut session = fixture_browser(source)
        .await
        .create_session_from(&["/api/spells"])
        .await;

    let (_, report) = session.add_filter(CategoryKind::Spells).await.unwrap();

    assert_eq!(visible_names(&session), vec!["Fireball", "Cure Wounds"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "Shield");
    assert!(report.failures[0].retryable);
    assert_eq!(session.last_report(), &report);
}

#[tokio::test]
async fn test_text_mismatch_never_resolves() {
    let source = Arc::new(CountingSource::new(fixture_compendium()));
    let dyn_source: Arc<dyn CompendiumSource> = source.clone();
    let mut session = fixture_browser(dyn_source)
        .await
        .create_session_from(&["/api/spells", "/api/monsters"])
        .await;

    session.set_search_text("troll").await;
    session.add_filter(CategoryKind::Monsters).await.unwrap();

    assert_eq!(source.total_resolves(), 1);
    assert_eq!(source.resolve_count("/api/monsters/troll"), 1);
}

#[tokio::test]
async fn test_cache_resolves_each_url_once() {
    let source = Arc::new(CachedCompendium::new(CountingSource::new(fixture_compendium())));
    let dyn_source: Arc<dyn CompendiumSource> = source.clone();
    let mut session = fixture_browser(dyn_source)
        .await
        .create_session_from(&["/api/spells"])
        .await;

    let (handle, _) = session.add_filter(CategoryKind::Spells).await.unwrap();
    session.update_facet(handle, 0, "Evocation").await.unwrap();
    session.update_facet(handle, 2, "Cleric").await.unwrap();

    assert_eq!(visible_names(&session), vec!["Cure Wounds"]);
    assert_eq!(source.inner().resolve_count("/api/spells/fireball"), 1);
    assert_eq!(source.inner().total_resolves(), 3);

    let stats = source.stats().await;
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.hits, 6);
}
