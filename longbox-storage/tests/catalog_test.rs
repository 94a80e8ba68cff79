//! Store-level integration: schema, seed, predicate execution, pools.

use std::time::{Duration, Instant};

use longbox_core::deadline::Deadline;
use longbox_core::errors::EngineError;
use longbox_core::models::NameKind;
use longbox_core::traits::ICatalogStore;
use longbox_query::{build_predicate, Criteria, Criterion, TextMatch};
use longbox_storage::seed::NewComic;
use longbox_storage::CatalogStore;

fn seeded() -> CatalogStore {
    let store = CatalogStore::open_in_memory().unwrap();
    let marvel = store.add_publisher("Marvel Comics").unwrap();
    let asm = store.add_series("Amazing Spider-Man", Some(marvel)).unwrap();
    let asm1 = store
        .add_comic(&NewComic {
            title: "Amazing Spider-Man #1",
            series_id: Some(asm),
            publisher_id: Some(marvel),
            year: Some(1963),
            file_path: "/comics/asm/001.cbz",
        })
        .unwrap();
    let lee = store.add_creator("Stan Lee").unwrap();
    let ditko = store.add_creator("Steve Ditko").unwrap();
    store.credit_creator(asm1, lee, "writer").unwrap();
    store.credit_creator(asm1, ditko, "artist").unwrap();
    let spidey = store.add_character("Spider-Man").unwrap();
    store.link_character(asm1, spidey, false).unwrap();
    store
}

#[test]
fn predicate_fetch_resolves_series_and_publisher() {
    let store = seeded();
    let criteria = Criteria::new().with(Criterion::Title(TextMatch::partial("spider")));
    let predicate = build_predicate(&criteria, true).unwrap();

    let rows = store.comics_where(&predicate, Deadline::none()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Amazing Spider-Man #1");
    assert_eq!(rows[0].series.as_deref(), Some("Amazing Spider-Man"));
    assert_eq!(rows[0].publisher.as_deref(), Some("Marvel Comics"));
    assert_eq!(rows[0].year, Some(1963));
}

#[test]
fn like_wildcards_match_literally_end_to_end() {
    let store = CatalogStore::open_in_memory().unwrap();
    store
        .add_comic(&NewComic {
            title: "100% Marvel: Oddities",
            ..NewComic::default()
        })
        .unwrap();
    store
        .add_comic(&NewComic {
            title: "1000 Marvels",
            ..NewComic::default()
        })
        .unwrap();

    // A literal "100%" query must not treat % as a wildcard, which would
    // also match "1000 Marvels".
    let criteria = Criteria::new().with(Criterion::Title(TextMatch::partial("100%")));
    let predicate = build_predicate(&criteria, true).unwrap();
    let rows = store.comics_where(&predicate, Deadline::none()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "100% Marvel: Oddities");
}

#[test]
fn appearance_joins_deduplicate_comics() {
    let store = seeded();
    // Two creators on one comic: a creator-joined predicate matching both
    // credits must return the comic once.
    let criteria = Criteria::new().with(Criterion::Creator {
        name: TextMatch::partial("e"),
        role: None,
    });
    let predicate = build_predicate(&criteria, true).unwrap();
    let rows = store.comics_where(&predicate, Deadline::none()).unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn name_pools_cover_each_entity_kind() {
    let store = seeded();
    let titles = store
        .name_pool(NameKind::ComicTitle, Deadline::none())
        .unwrap();
    assert_eq!(titles.len(), 1);
    let creators = store.name_pool(NameKind::Creator, Deadline::none()).unwrap();
    assert_eq!(creators.len(), 2);
    let characters = store
        .name_pool(NameKind::Character, Deadline::none())
        .unwrap();
    assert_eq!(characters[0].name, "Spider-Man");
}

#[test]
fn character_walk_respects_via_team_flag() {
    let store = CatalogStore::open_in_memory().unwrap();
    let comic = store
        .add_comic(&NewComic {
            title: "Avengers #4",
            year: Some(1964),
            ..NewComic::default()
        })
        .unwrap();
    let cap = store.add_character("Captain America").unwrap();
    store.link_character(comic, cap, true).unwrap();

    let with_teams = store
        .comic_ids_for_characters(&[cap], true, Deadline::none())
        .unwrap();
    assert_eq!(with_teams, vec![comic]);

    let direct_only = store
        .comic_ids_for_characters(&[cap], false, Deadline::none())
        .unwrap();
    assert!(direct_only.is_empty());
}

#[test]
fn creator_walk_respects_role_filter() {
    let store = seeded();
    let lee = store.add_creator("Stan Lee").unwrap();

    let as_writer = store
        .comic_ids_for_creators(&[lee], Some("WRITER"), Deadline::none())
        .unwrap();
    assert_eq!(as_writer.len(), 1);

    let as_inker = store
        .comic_ids_for_creators(&[lee], Some("inker"), Deadline::none())
        .unwrap();
    assert!(as_inker.is_empty());
}

#[test]
fn collaboration_rows_include_all_credits_on_shared_comics() {
    let store = seeded();
    let lee = store.add_creator("Stan Lee").unwrap();
    let rows = store
        .collaboration_rows(&[lee], Deadline::none())
        .unwrap();
    // Lee's own credit and Ditko's, on the one shared comic.
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().any(|r| r.collaborator_name == "Steve Ditko"));
}

#[test]
fn duplicate_appearance_rows_are_ignored() {
    let store = seeded();
    let lee = store.add_creator("Stan Lee").unwrap();
    let titles = store
        .name_pool(NameKind::ComicTitle, Deadline::none())
        .unwrap();
    let comic = titles[0].id;
    // Same (comic, creator, role) triple again: no-op.
    store.credit_creator(comic, lee, "writer").unwrap();
    let credits = store.creators_for(comic).unwrap();
    assert_eq!(credits.len(), 2);
}

#[test]
fn expired_deadline_aborts_before_query() {
    let store = seeded();
    let expired = Deadline::at(Instant::now() - Duration::from_millis(1));
    let criteria = Criteria::new().with(Criterion::Title(TextMatch::partial("spider")));
    let predicate = build_predicate(&criteria, true).unwrap();
    let err = store.comics_where(&predicate, expired).unwrap_err();
    assert!(matches!(err, EngineError::Timeout));
}

#[test]
fn file_backed_catalog_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    {
        let store = CatalogStore::open(&path).unwrap();
        store
            .add_comic(&NewComic {
                title: "Fantastic Four #1",
                year: Some(1961),
                ..NewComic::default()
            })
            .unwrap();
    }
    let reopened = CatalogStore::open(&path).unwrap();
    let stats = reopened.catalog_stats().unwrap();
    assert_eq!(stats.total_comics, 1);
    assert_eq!(stats.year_min, Some(1961));
}
