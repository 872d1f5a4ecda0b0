//! PostgreSQL-backed match store using `sqlx::PgPool`.

use std::time::Duration;

use chrono::NaiveDate;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::schema;
use crate::config::AppConfig;
use crate::domain::{Competition, EnrichedEvent, LineupEntry, MatchEvent, MatchRecord};
use crate::error::ServiceError;

/// Optional filters for the match list endpoint.
///
/// `team` matches either side of the fixture.
#[derive(Debug, Clone, Default)]
pub struct MatchFilter {
    /// Restrict to one competition.
    pub competition_id: Option<i32>,
    /// Restrict to one season.
    pub season_id: Option<i32>,
    /// Restrict to matches where this team played, home or away.
    pub team: Option<String>,
}

/// PostgreSQL-backed storage for competitions, matches, lineups, and
/// events.
#[derive(Debug, Clone)]
pub struct MatchStore {
    pool: PgPool,
}

impl MatchStore {
    /// Creates a store from an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a pool with the configured sizing and wraps it in a store.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] when the pool cannot connect.
    pub async fn connect(config: &AppConfig) -> Result<Self, ServiceError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|e| ServiceError::Database(format!("postgres connect: {e}")))?;
        Ok(Self::new(pool))
    }

    /// Creates every table and index if missing. Safe to run on every
    /// startup and before every ingest.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] on DDL failure.
    pub async fn ensure_schema(&self) -> Result<(), ServiceError> {
        for statement in schema::DDL {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| ServiceError::Database(format!("ensure schema: {e}")))?;
        }
        Ok(())
    }

    /// Executes `SELECT 1`, the connectivity probe behind `/db-check`.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] when the round-trip fails.
    pub async fn ping(&self) -> Result<i32, ServiceError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ServiceError::Database(e.to_string()))
    }

    // ── Loader upserts ──────────────────────────────────────────────────

    /// Inserts competitions, skipping rows whose (competition, season)
    /// pair is already present. Returns the number of rows inserted.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] on insert failure; the whole
    /// batch is one transaction.
    pub async fn insert_competitions(&self, rows: &[Competition]) -> Result<u64, ServiceError> {
        let mut tx = self.begin().await?;
        let mut inserted = 0;
        for row in rows {
            let result = sqlx::query(
                "INSERT INTO competitions \
                 (competition_id, season_id, country_name, competition_name, season_name) \
                 VALUES ($1, $2, $3, $4, $5) ON CONFLICT DO NOTHING",
            )
            .bind(row.competition_id)
            .bind(row.season_id)
            .bind(&row.country_name)
            .bind(&row.competition_name)
            .bind(&row.season_name)
            .execute(&mut *tx)
            .await
            .map_err(|e| ServiceError::Database(format!("insert competition: {e}")))?;
            inserted += result.rows_affected();
        }
        self.commit(tx).await?;
        Ok(inserted)
    }

    /// Inserts matches keyed on `match_id`. Returns the number inserted.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] on insert failure.
    pub async fn insert_matches(&self, rows: &[MatchRecord]) -> Result<u64, ServiceError> {
        let mut tx = self.begin().await?;
        let mut inserted = 0;
        for row in rows {
            let result = sqlx::query(
                "INSERT INTO matches \
                 (match_id, competition_id, season_id, match_date, home_team, away_team) \
                 VALUES ($1, $2, $3, $4, $5, $6) ON CONFLICT (match_id) DO NOTHING",
            )
            .bind(row.match_id)
            .bind(row.competition_id)
            .bind(row.season_id)
            .bind(row.match_date)
            .bind(&row.home_team)
            .bind(&row.away_team)
            .execute(&mut *tx)
            .await
            .map_err(|e| ServiceError::Database(format!("insert match: {e}")))?;
            inserted += result.rows_affected();
        }
        self.commit(tx).await?;
        Ok(inserted)
    }

    /// Inserts lineup entries keyed on (match, team, player).
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] on insert failure.
    pub async fn insert_lineups(&self, rows: &[LineupEntry]) -> Result<u64, ServiceError> {
        let mut tx = self.begin().await?;
        let mut inserted = 0;
        for row in rows {
            let result = sqlx::query(
                "INSERT INTO lineups (match_id, team_name, player_name) \
                 VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
            )
            .bind(row.match_id)
            .bind(&row.team_name)
            .bind(&row.player_name)
            .execute(&mut *tx)
            .await
            .map_err(|e| ServiceError::Database(format!("insert lineup: {e}")))?;
            inserted += result.rows_affected();
        }
        self.commit(tx).await?;
        Ok(inserted)
    }

    /// Inserts minimal events keyed on (match, index).
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] on insert failure.
    pub async fn insert_events(&self, rows: &[MatchEvent]) -> Result<u64, ServiceError> {
        let mut tx = self.begin().await?;
        let mut inserted = 0;
        for row in rows {
            let result = sqlx::query(
                "INSERT INTO events (match_id, \"index\", \"timestamp\", type) \
                 VALUES ($1, $2, $3, $4) ON CONFLICT (match_id, \"index\") DO NOTHING",
            )
            .bind(row.match_id)
            .bind(row.index)
            .bind(&row.timestamp)
            .bind(&row.event_type)
            .execute(&mut *tx)
            .await
            .map_err(|e| ServiceError::Database(format!("insert event: {e}")))?;
            inserted += result.rows_affected();
        }
        self.commit(tx).await?;
        Ok(inserted)
    }

    /// Inserts enriched events keyed on the StatsBomb event UUID.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] on insert failure.
    pub async fn insert_enriched_events(
        &self,
        rows: &[EnrichedEvent],
    ) -> Result<u64, ServiceError> {
        let mut tx = self.begin().await?;
        let mut inserted = 0;
        for row in rows {
            let result = sqlx::query(
                "INSERT INTO match_events (event_id, event_type, player, x, y, \"timestamp\") \
                 VALUES ($1, $2, $3, $4, $5, $6) ON CONFLICT (event_id) DO NOTHING",
            )
            .bind(row.event_id)
            .bind(&row.event_type)
            .bind(&row.player)
            .bind(row.x)
            .bind(row.y)
            .bind(&row.timestamp)
            .execute(&mut *tx)
            .await
            .map_err(|e| ServiceError::Database(format!("insert enriched event: {e}")))?;
            inserted += result.rows_affected();
        }
        self.commit(tx).await?;
        Ok(inserted)
    }

    // ── Read queries ────────────────────────────────────────────────────

    /// Lists competition/season entries ordered by competition then
    /// season name, optionally filtered by country.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] on query failure.
    pub async fn list_competitions(
        &self,
        country: Option<&str>,
    ) -> Result<Vec<Competition>, ServiceError> {
        let rows = sqlx::query_as::<_, (i32, i32, Option<String>, Option<String>, Option<String>)>(
            "SELECT competition_id, season_id, country_name, competition_name, season_name \
             FROM competitions \
             WHERE ($1::TEXT IS NULL OR country_name = $1) \
             ORDER BY competition_name, season_name",
        )
        .bind(country)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(competition_id, season_id, country_name, competition_name, season_name)| {
                    Competition {
                        competition_id,
                        season_id,
                        country_name: country_name.unwrap_or_default(),
                        competition_name: competition_name.unwrap_or_default(),
                        season_name: season_name.unwrap_or_default(),
                    }
                },
            )
            .collect())
    }

    /// Counts matches passing the filter.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] on query failure.
    pub async fn count_matches(&self, filter: &MatchFilter) -> Result<i64, ServiceError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM matches \
             WHERE ($1::INT IS NULL OR competition_id = $1) \
               AND ($2::INT IS NULL OR season_id = $2) \
               AND ($3::TEXT IS NULL OR home_team = $3 OR away_team = $3)",
        )
        .bind(filter.competition_id)
        .bind(filter.season_id)
        .bind(filter.team.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))
    }

    /// Lists matches passing the filter, ordered by date then id.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] on query failure.
    pub async fn list_matches(
        &self,
        filter: &MatchFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MatchRecord>, ServiceError> {
        let rows = sqlx::query_as::<
            _,
            (i64, Option<i32>, Option<i32>, Option<NaiveDate>, Option<String>, Option<String>),
        >(
            "SELECT match_id, competition_id, season_id, match_date, home_team, away_team \
             FROM matches \
             WHERE ($1::INT IS NULL OR competition_id = $1) \
               AND ($2::INT IS NULL OR season_id = $2) \
               AND ($3::TEXT IS NULL OR home_team = $3 OR away_team = $3) \
             ORDER BY match_date, match_id \
             LIMIT $4 OFFSET $5",
        )
        .bind(filter.competition_id)
        .bind(filter.season_id)
        .bind(filter.team.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(match_from_row).collect())
    }

    /// Fetches one match by StatsBomb id.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] on query failure.
    pub async fn get_match(&self, match_id: i64) -> Result<Option<MatchRecord>, ServiceError> {
        let row = sqlx::query_as::<
            _,
            (i64, Option<i32>, Option<i32>, Option<NaiveDate>, Option<String>, Option<String>),
        >(
            "SELECT match_id, competition_id, season_id, match_date, home_team, away_team \
             FROM matches WHERE match_id = $1",
        )
        .bind(match_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))?;

        Ok(row.map(match_from_row))
    }

    /// Lists lineup entries for a match ordered by team then player.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] on query failure.
    pub async fn lineups_for_match(
        &self,
        match_id: i64,
    ) -> Result<Vec<LineupEntry>, ServiceError> {
        let rows = sqlx::query_as::<_, (i64, String, String)>(
            "SELECT match_id, team_name, player_name FROM lineups \
             WHERE match_id = $1 ORDER BY team_name, player_name",
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(match_id, team_name, player_name)| LineupEntry {
                match_id,
                team_name,
                player_name,
            })
            .collect())
    }

    /// Counts events recorded for a match.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] on query failure.
    pub async fn count_events(&self, match_id: i64) -> Result<i64, ServiceError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events WHERE match_id = $1")
            .bind(match_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ServiceError::Database(e.to_string()))
    }

    /// Lists events for a match in timeline order.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] on query failure.
    pub async fn events_for_match(
        &self,
        match_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MatchEvent>, ServiceError> {
        let rows = sqlx::query_as::<_, (i64, Option<i32>, Option<String>, Option<String>)>(
            "SELECT match_id, \"index\", \"timestamp\", type FROM events \
             WHERE match_id = $1 ORDER BY \"index\" LIMIT $2 OFFSET $3",
        )
        .bind(match_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(match_id, index, timestamp, event_type)| MatchEvent {
                match_id,
                index,
                timestamp,
                event_type,
            })
            .collect())
    }

    /// Event counts grouped by type, most frequent first.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] on query failure.
    pub async fn event_type_counts(
        &self,
        match_id: i64,
    ) -> Result<Vec<(Option<String>, i64)>, ServiceError> {
        sqlx::query_as::<_, (Option<String>, i64)>(
            "SELECT type, COUNT(*) FROM events WHERE match_id = $1 \
             GROUP BY type ORDER BY COUNT(*) DESC, type",
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))
    }

    /// Non-null raw timestamps for a match, for minutes estimation.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Database`] on query failure.
    pub async fn event_timestamps(&self, match_id: i64) -> Result<Vec<String>, ServiceError> {
        sqlx::query_scalar::<_, String>(
            "SELECT \"timestamp\" FROM events \
             WHERE match_id = $1 AND \"timestamp\" IS NOT NULL",
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))
    }

    // ── Transaction helpers ─────────────────────────────────────────────

    async fn begin(&self) -> Result<sqlx::Transaction<'_, sqlx::Postgres>, ServiceError> {
        self.pool
            .begin()
            .await
            .map_err(|e| ServiceError::Database(format!("begin: {e}")))
    }

    async fn commit(&self, tx: sqlx::Transaction<'_, sqlx::Postgres>) -> Result<(), ServiceError> {
        tx.commit()
            .await
            .map_err(|e| ServiceError::Database(format!("commit: {e}")))
    }
}

type MatchRow = (
    i64,
    Option<i32>,
    Option<i32>,
    Option<NaiveDate>,
    Option<String>,
    Option<String>,
);

fn match_from_row(
    (match_id, competition_id, season_id, match_date, home_team, away_team): MatchRow,
) -> MatchRecord {
    MatchRecord {
        match_id,
        competition_id: competition_id.unwrap_or_default(),
        season_id: season_id.unwrap_or_default(),
        match_date: match_date.unwrap_or_default(),
        home_team: home_team.unwrap_or_default(),
        away_team: away_team.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    // Requires a live database; run with:
    //   DATABASE_URL=postgres://... cargo test -- --ignored
    async fn connect_test_store() -> MatchStore {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            unreachable!("DATABASE_URL must be set for database tests");
        };
        let Ok(pool) = PgPool::connect(&database_url).await else {
            unreachable!("postgres should be reachable");
        };
        let store = MatchStore::new(pool);
        let Ok(()) = store.ensure_schema().await else {
            unreachable!("schema should apply");
        };
        store
    }

    /// Fresh ids per run so reruns of the suite never collide.
    fn unique_id() -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_nanos()).unwrap_or(i64::MAX),
            Err(_) => unreachable!("clock before epoch"),
        }
    }

    fn event(match_id: i64, index: Option<i32>, event_type: &str) -> MatchEvent {
        MatchEvent {
            match_id,
            index,
            timestamp: Some("00:01:00.000".to_string()),
            event_type: Some(event_type.to_string()),
        }
    }

    #[tokio::test]
    #[ignore]
    async fn reinserting_event_batch_inserts_nothing() {
        let store = connect_test_store().await;
        let match_id = unique_id();

        // One index-less row: NULL keys must conflict on the rerun too.
        let rows = vec![
            event(match_id, Some(1), "Pass"),
            event(match_id, Some(2), "Shot"),
            event(match_id, None, "Starting XI"),
        ];

        let Ok(first) = store.insert_events(&rows).await else {
            unreachable!("first insert should succeed");
        };
        assert_eq!(first, 3);

        let Ok(second) = store.insert_events(&rows).await else {
            unreachable!("second insert should succeed");
        };
        assert_eq!(second, 0);
    }

    #[tokio::test]
    #[ignore]
    async fn reinserting_competition_and_lineup_batches_inserts_nothing() {
        let store = connect_test_store().await;
        let match_id = unique_id();
        let competition_id = i32::try_from(match_id % i64::from(i32::MAX)).unwrap_or(1);

        let competitions = vec![Competition {
            competition_id,
            season_id: 1,
            country_name: "Spain".to_string(),
            competition_name: "La Liga".to_string(),
            season_name: "2020/2021".to_string(),
        }];
        let lineups = vec![
            LineupEntry {
                match_id,
                team_name: "Argentina".to_string(),
                player_name: "Lionel Messi".to_string(),
            },
            LineupEntry {
                match_id,
                team_name: "France".to_string(),
                player_name: "Kylian Mbappé".to_string(),
            },
        ];

        let Ok(first) = store.insert_competitions(&competitions).await else {
            unreachable!("first competition insert should succeed");
        };
        assert_eq!(first, 1);
        let Ok(second) = store.insert_competitions(&competitions).await else {
            unreachable!("second competition insert should succeed");
        };
        assert_eq!(second, 0);

        let Ok(first) = store.insert_lineups(&lineups).await else {
            unreachable!("first lineup insert should succeed");
        };
        assert_eq!(first, 2);
        let Ok(second) = store.insert_lineups(&lineups).await else {
            unreachable!("second lineup insert should succeed");
        };
        assert_eq!(second, 0);
    }
}
