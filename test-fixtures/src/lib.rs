//! Seeded in-memory catalogs for integration tests across crates.
//!
//! The fixture data is a small sixties-to-modern slice of a collection:
//! enough series, creators, teams, and events to exercise every join
//! path without hiding what a test is asserting.

use longbox_storage::seed::NewComic;
use longbox_storage::CatalogStore;

/// An empty catalog with the schema in place.
pub fn empty_catalog() -> CatalogStore {
    CatalogStore::open_in_memory().expect("in-memory catalog")
}

/// The standard fixture catalog. Contents:
///
/// | Comic | Year | Notable rows |
/// |---|---|---|
/// | Amazing Spider-Man #1 | 1963 | Spider-Man; Lee (writer), Ditko (artist) |
/// | Amazing Spider-Man #14 | 1964 | Spider-Man; Lee (writer), Ditko (artist) |
/// | Fantastic Four #1 | 1961 | Lee (writer AND editor), Kirby (artist); team Fantastic Four |
/// | Fantastic Four #48 | 1966 | Galactus Trilogy event; Silver Surfer |
/// | Avengers #4 | 1964 | team Avengers; Captain America via team roster |
/// | New Avengers #1 | 2005 | team New Avengers; Spider-Man via team roster |
/// | Avengers Disassembled | 2004 | event Avengers Disassembled |
/// | Batman #404 | 1987 | DC; Miller (writer), Mazzucchelli (artist) |
/// | Infinity Gauntlet #1 | 1991 | event Infinity Gauntlet; Thanos |
pub fn marvel_catalog() -> CatalogStore {
    let store = empty_catalog();

    let marvel = store.add_publisher("Marvel Comics").unwrap();
    let dc = store.add_publisher("DC Comics").unwrap();

    let asm = store.add_series("Amazing Spider-Man", Some(marvel)).unwrap();
    let ff = store.add_series("Fantastic Four", Some(marvel)).unwrap();
    let avengers_series = store.add_series("Avengers", Some(marvel)).unwrap();
    let new_avengers = store.add_series("New Avengers", Some(marvel)).unwrap();
    let batman_series = store.add_series("Batman", Some(dc)).unwrap();
    let gauntlet = store.add_series("Infinity Gauntlet", Some(marvel)).unwrap();

    let lee = store.add_creator("Stan Lee").unwrap();
    let ditko = store.add_creator("Steve Ditko").unwrap();
    let kirby = store.add_creator("Jack Kirby").unwrap();
    let bendis = store.add_creator("Brian Michael Bendis").unwrap();
    let finch = store.add_creator("David Finch").unwrap();
    let miller = store.add_creator("Frank Miller").unwrap();
    let mazzucchelli = store.add_creator("David Mazzucchelli").unwrap();
    let starlin = store.add_creator("Jim Starlin").unwrap();

    let spider_man = store.add_character("Spider-Man").unwrap();
    let cap = store.add_character("Captain America").unwrap();
    let surfer = store.add_character("Silver Surfer").unwrap();
    let batman = store.add_character("Batman").unwrap();
    let thanos = store.add_character("Thanos").unwrap();

    let team_ff = store.add_team("Fantastic Four").unwrap();
    let team_avengers = store.add_team("Avengers").unwrap();
    let team_new_avengers = store.add_team("New Avengers").unwrap();

    let galactus = store.add_event("Galactus Trilogy").unwrap();
    let disassembled = store.add_event("Avengers Disassembled").unwrap();
    let infinity = store.add_event("Infinity Gauntlet").unwrap();

    let asm1 = store
        .add_comic(&NewComic {
            title: "Amazing Spider-Man #1",
            series_id: Some(asm),
            publisher_id: Some(marvel),
            year: Some(1963),
            file_path: "/comics/asm/001.cbz",
        })
        .unwrap();
    store.credit_creator(asm1, lee, "writer").unwrap();
    store.credit_creator(asm1, ditko, "artist").unwrap();
    store.link_character(asm1, spider_man, false).unwrap();

    let asm14 = store
        .add_comic(&NewComic {
            title: "Amazing Spider-Man #14",
            series_id: Some(asm),
            publisher_id: Some(marvel),
            year: Some(1964),
            file_path: "/comics/asm/014.cbz",
        })
        .unwrap();
    store.credit_creator(asm14, lee, "writer").unwrap();
    store.credit_creator(asm14, ditko, "artist").unwrap();
    store.link_character(asm14, spider_man, false).unwrap();

    let ff1 = store
        .add_comic(&NewComic {
            title: "Fantastic Four #1",
            series_id: Some(ff),
            publisher_id: Some(marvel),
            year: Some(1961),
            file_path: "/comics/ff/001.cbz",
        })
        .unwrap();
    store.credit_creator(ff1, lee, "writer").unwrap();
    store.credit_creator(ff1, lee, "editor").unwrap();
    store.credit_creator(ff1, kirby, "artist").unwrap();
    store.link_team(ff1, team_ff).unwrap();

    let ff48 = store
        .add_comic(&NewComic {
            title: "Fantastic Four #48",
            series_id: Some(ff),
            publisher_id: Some(marvel),
            year: Some(1966),
            file_path: "/comics/ff/048.cbz",
        })
        .unwrap();
    store.credit_creator(ff48, lee, "writer").unwrap();
    store.credit_creator(ff48, kirby, "artist").unwrap();
    store.link_character(ff48, surfer, false).unwrap();
    store.link_team(ff48, team_ff).unwrap();
    store.link_event(ff48, galactus).unwrap();

    let avengers4 = store
        .add_comic(&NewComic {
            title: "Avengers #4",
            series_id: Some(avengers_series),
            publisher_id: Some(marvel),
            year: Some(1964),
            file_path: "/comics/avengers/004.cbz",
        })
        .unwrap();
    store.credit_creator(avengers4, lee, "writer").unwrap();
    store.credit_creator(avengers4, kirby, "artist").unwrap();
    store.link_team(avengers4, team_avengers).unwrap();
    store.link_character(avengers4, cap, true).unwrap();

    let na1 = store
        .add_comic(&NewComic {
            title: "New Avengers #1",
            series_id: Some(new_avengers),
            publisher_id: Some(marvel),
            year: Some(2005),
            file_path: "/comics/new-avengers/001.cbz",
        })
        .unwrap();
    store.credit_creator(na1, bendis, "writer").unwrap();
    store.credit_creator(na1, finch, "artist").unwrap();
    store.link_team(na1, team_new_avengers).unwrap();
    store.link_character(na1, spider_man, true).unwrap();

    let disassembled_comic = store
        .add_comic(&NewComic {
            title: "Avengers Disassembled",
            series_id: Some(avengers_series),
            publisher_id: Some(marvel),
            year: Some(2004),
            file_path: "/comics/avengers/disassembled.cbz",
        })
        .unwrap();
    store.credit_creator(disassembled_comic, bendis, "writer").unwrap();
    store.credit_creator(disassembled_comic, finch, "artist").unwrap();
    store.link_team(disassembled_comic, team_avengers).unwrap();
    store.link_event(disassembled_comic, disassembled).unwrap();

    let batman404 = store
        .add_comic(&NewComic {
            title: "Batman #404",
            series_id: Some(batman_series),
            publisher_id: Some(dc),
            year: Some(1987),
            file_path: "/comics/batman/404.cbz",
        })
        .unwrap();
    store.credit_creator(batman404, miller, "writer").unwrap();
    store
        .credit_creator(batman404, mazzucchelli, "artist")
        .unwrap();
    store.link_character(batman404, batman, false).unwrap();

    let gauntlet1 = store
        .add_comic(&NewComic {
            title: "Infinity Gauntlet #1",
            series_id: Some(gauntlet),
            publisher_id: Some(marvel),
            year: Some(1991),
            file_path: "/comics/gauntlet/001.cbz",
        })
        .unwrap();
    store.credit_creator(gauntlet1, starlin, "writer").unwrap();
    store.link_character(gauntlet1, thanos, false).unwrap();
    store.link_event(gauntlet1, infinity).unwrap();

    store
}
