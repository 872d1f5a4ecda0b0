//! Idempotent DDL for the analytics schema.
//!
//! Every table carries its natural key so that re-running any loader with
//! `ON CONFLICT DO NOTHING` inserts nothing for already-present rows.
//! The `events` key is `NULLS NOT DISTINCT` so that index-less events
//! conflict too instead of duplicating on every rerun (needs Postgres 15+,
//! compose pins 16). `"index"` and `"timestamp"` are quoted throughout;
//! the raw StatsBomb field names are kept as column names.

/// All schema statements, executed in order at startup and before ingest.
pub const DDL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS competitions (
        competition_id   INT  NOT NULL,
        season_id        INT  NOT NULL,
        country_name     TEXT,
        competition_name TEXT,
        season_name      TEXT,
        PRIMARY KEY (competition_id, season_id)
    )",
    "CREATE TABLE IF NOT EXISTS matches (
        match_id       BIGINT PRIMARY KEY,
        competition_id INT,
        season_id      INT,
        match_date     DATE,
        home_team      TEXT,
        away_team      TEXT
    )",
    "CREATE TABLE IF NOT EXISTS lineups (
        match_id    BIGINT NOT NULL,
        team_name   TEXT   NOT NULL,
        player_name TEXT   NOT NULL,
        PRIMARY KEY (match_id, team_name, player_name)
    )",
    "CREATE TABLE IF NOT EXISTS events (
        id          BIGSERIAL PRIMARY KEY,
        match_id    BIGINT NOT NULL,
        \"index\"     INT,
        \"timestamp\" TEXT,
        type        TEXT,
        UNIQUE NULLS NOT DISTINCT (match_id, \"index\")
    )",
    "CREATE TABLE IF NOT EXISTS match_events (
        event_id    UUID PRIMARY KEY,
        event_type  TEXT,
        player      TEXT,
        x           DOUBLE PRECISION,
        y           DOUBLE PRECISION,
        \"timestamp\" TEXT
    )",
    // The events unique constraint already indexes (match_id, "index").
    "CREATE INDEX IF NOT EXISTS idx_matches_competition
        ON matches (competition_id, season_id)",
];
