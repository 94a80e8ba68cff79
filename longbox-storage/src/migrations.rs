//! Catalog schema: entity tables plus appearance link tables.

use rusqlite::Connection;

use longbox_core::errors::EngineResult;

use crate::to_store_err;

pub fn run_migrations(conn: &Connection) -> EngineResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS publishers (
            id   INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS series (
            id           INTEGER PRIMARY KEY,
            name         TEXT NOT NULL,
            publisher_id INTEGER REFERENCES publishers(id),
            UNIQUE (name, publisher_id)
        );

        CREATE TABLE IF NOT EXISTS comics (
            id           INTEGER PRIMARY KEY,
            title        TEXT NOT NULL,
            series_id    INTEGER REFERENCES series(id),
            publisher_id INTEGER REFERENCES publishers(id),
            year         INTEGER,
            file_path    TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_comics_year   ON comics(year);
        CREATE INDEX IF NOT EXISTS idx_comics_series ON comics(series_id);

        CREATE TABLE IF NOT EXISTS creators (
            id   INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS characters (
            id   INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS teams (
            id   INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS events (
            id   INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS comic_creators (
            comic_id   INTEGER NOT NULL REFERENCES comics(id)   ON DELETE CASCADE,
            creator_id INTEGER NOT NULL REFERENCES creators(id) ON DELETE CASCADE,
            role       TEXT NOT NULL,
            PRIMARY KEY (comic_id, creator_id, role)
        );

        CREATE INDEX IF NOT EXISTS idx_comic_creators_creator ON comic_creators(creator_id);

        CREATE TABLE IF NOT EXISTS comic_characters (
            comic_id     INTEGER NOT NULL REFERENCES comics(id)     ON DELETE CASCADE,
            character_id INTEGER NOT NULL REFERENCES characters(id) ON DELETE CASCADE,
            via_team     INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (comic_id, character_id)
        );

        CREATE INDEX IF NOT EXISTS idx_comic_characters_character ON comic_characters(character_id);

        CREATE TABLE IF NOT EXISTS comic_teams (
            comic_id INTEGER NOT NULL REFERENCES comics(id) ON DELETE CASCADE,
            team_id  INTEGER NOT NULL REFERENCES teams(id)  ON DELETE CASCADE,
            PRIMARY KEY (comic_id, team_id)
        );

        CREATE INDEX IF NOT EXISTS idx_comic_teams_team ON comic_teams(team_id);

        CREATE TABLE IF NOT EXISTS comic_events (
            comic_id INTEGER NOT NULL REFERENCES comics(id) ON DELETE CASCADE,
            event_id INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            PRIMARY KEY (comic_id, event_id)
        );

        CREATE INDEX IF NOT EXISTS idx_comic_events_event ON comic_events(event_id);
        ",
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}
