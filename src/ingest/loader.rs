//! Open-data loaders: walk the bucket layout and upsert into PostgreSQL.
//!
//! Error policy, matching the original operational behavior: a failure to
//! fetch the competitions index is fatal; any per-season or per-match
//! object that cannot be fetched or decoded is logged as a warning,
//! counted in the report, and skipped. Re-running a loader is a no-op for
//! rows already present.

use std::path::Path;

use futures_util::StreamExt;
use futures_util::stream;
use tracing::{info, warn};

use super::s3::OpenDataStore;
use super::statsbomb::{RawCompetition, RawEvent, RawLineupTeam, RawMatch};
use super::IngestError;
use crate::domain::{Competition, EnrichedEvent, LineupEntry, MatchEvent, MatchRecord};
use crate::persistence::MatchStore;

/// Concurrent in-flight S3 fetches per run.
const FETCH_CONCURRENCY: usize = 8;

/// Outcome counters for one loader run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Objects fetched and decoded successfully.
    pub fetched: u64,
    /// Rows newly inserted.
    pub inserted: u64,
    /// Rows skipped because they were already present.
    pub skipped: u64,
    /// Objects that failed to fetch or decode and were skipped.
    pub failed: u64,
}

impl LoadReport {
    /// Folds another report into this one.
    pub fn absorb(&mut self, other: Self) {
        self.fetched += other.fetched;
        self.inserted += other.inserted;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }

    /// Records one successfully fetched object whose rows were offered to
    /// the store: `attempted` rows, of which `inserted` were new.
    pub fn record_batch(&mut self, attempted: usize, inserted: u64) {
        self.fetched += 1;
        self.inserted += inserted;
        self.skipped += (attempted as u64).saturating_sub(inserted);
    }
}

/// Orchestrates the open-data loaders.
#[derive(Debug, Clone)]
pub struct DataLoader {
    store: MatchStore,
    source: OpenDataStore,
}

impl DataLoader {
    /// Creates a loader over the given store and bucket client.
    #[must_use]
    pub fn new(store: MatchStore, source: OpenDataStore) -> Self {
        Self { store, source }
    }

    /// Loads `competitions.json` into the `competitions` table.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestError`] when the index cannot be fetched or the
    /// batch insert fails; the index is the root of every other loader,
    /// so there is nothing to skip to.
    pub async fn load_competitions(&self) -> Result<LoadReport, IngestError> {
        let key = self.source.competitions_key();
        let raw: Vec<RawCompetition> = self.source.fetch_json(&key).await?;
        let rows: Vec<Competition> = raw.into_iter().map(Into::into).collect();

        let inserted = self.store.insert_competitions(&rows).await?;
        let mut report = LoadReport::default();
        report.record_batch(rows.len(), inserted);
        info!(
            inserted = report.inserted,
            skipped = report.skipped,
            "competitions loaded"
        );
        Ok(report)
    }

    /// Loads every season's match file into the `matches` table.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestError`] when the competitions index cannot be
    /// fetched; individual season files that fail are counted and skipped.
    pub async fn load_matches(&self) -> Result<LoadReport, IngestError> {
        let pairs = self.competition_pairs().await?;

        let reports = stream::iter(pairs)
            .map(|(competition_id, season_id)| self.load_matches_for(competition_id, season_id))
            .buffer_unordered(FETCH_CONCURRENCY)
            .collect::<Vec<_>>()
            .await;

        let mut report = LoadReport::default();
        for r in reports {
            report.absorb(r);
        }
        info!(
            inserted = report.inserted,
            skipped = report.skipped,
            failed = report.failed,
            "matches loaded"
        );
        Ok(report)
    }

    /// Loads every known match's lineup file into the `lineups` table.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestError`] when the competitions index cannot be
    /// fetched; individual lineup files that fail are counted and skipped.
    pub async fn load_lineups(&self) -> Result<LoadReport, IngestError> {
        let (match_ids, mut report) = self.match_ids().await?;

        let results = stream::iter(match_ids)
            .map(|match_id| self.load_lineups_for(match_id))
            .buffer_unordered(FETCH_CONCURRENCY)
            .collect::<Vec<_>>()
            .await;

        for r in results {
            report.absorb(r);
        }
        info!(
            inserted = report.inserted,
            skipped = report.skipped,
            failed = report.failed,
            "lineups loaded"
        );
        Ok(report)
    }

    /// Loads every known match's event file into the `events` table
    /// (minimal projection).
    ///
    /// # Errors
    ///
    /// Returns an [`IngestError`] when the competitions index cannot be
    /// fetched; individual event files that fail are counted and skipped.
    pub async fn load_events(&self) -> Result<LoadReport, IngestError> {
        let (match_ids, mut report) = self.match_ids().await?;

        let results = stream::iter(match_ids)
            .map(|match_id| self.load_events_for(match_id))
            .buffer_unordered(FETCH_CONCURRENCY)
            .collect::<Vec<_>>()
            .await;

        for r in results {
            report.absorb(r);
        }
        info!(
            inserted = report.inserted,
            skipped = report.skipped,
            failed = report.failed,
            "events loaded"
        );
        Ok(report)
    }

    // ── Per-object workers ──────────────────────────────────────────────

    async fn load_matches_for(&self, competition_id: i32, season_id: i32) -> LoadReport {
        let key = self.source.matches_key(competition_id, season_id);
        let mut report = LoadReport::default();

        let raw: Vec<RawMatch> = match self.source.fetch_json(&key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "skipping season match file");
                report.failed += 1;
                return report;
            }
        };

        let total = raw.len();
        let rows: Vec<MatchRecord> = raw
            .into_iter()
            .filter_map(|m| m.into_record(competition_id, season_id))
            .collect();
        if rows.len() < total {
            warn!(
                key,
                dropped = total - rows.len(),
                "matches with unparseable dates dropped"
            );
        }

        match self.store.insert_matches(&rows).await {
            Ok(inserted) => report.record_batch(rows.len(), inserted),
            Err(e) => {
                warn!(key, error = %e, "match batch insert failed");
                report.failed += 1;
            }
        }
        report
    }

    async fn load_lineups_for(&self, match_id: i64) -> LoadReport {
        let key = self.source.lineups_key(match_id);
        let mut report = LoadReport::default();

        let raw: Vec<RawLineupTeam> = match self.source.fetch_json(&key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "skipping lineup file");
                report.failed += 1;
                return report;
            }
        };

        let rows: Vec<LineupEntry> = raw
            .into_iter()
            .flat_map(|team| team.into_entries(match_id))
            .collect();

        match self.store.insert_lineups(&rows).await {
            Ok(inserted) => report.record_batch(rows.len(), inserted),
            Err(e) => {
                warn!(key, error = %e, "lineup batch insert failed");
                report.failed += 1;
            }
        }
        report
    }

    async fn load_events_for(&self, match_id: i64) -> LoadReport {
        let key = self.source.events_key(match_id);
        let mut report = LoadReport::default();

        let raw: Vec<RawEvent> = match self.source.fetch_json(&key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "skipping event file");
                report.failed += 1;
                return report;
            }
        };

        let rows: Vec<MatchEvent> = raw
            .into_iter()
            .map(|e| e.into_minimal(match_id))
            .collect();

        match self.store.insert_events(&rows).await {
            Ok(inserted) => report.record_batch(rows.len(), inserted),
            Err(e) => {
                warn!(key, error = %e, "event batch insert failed");
                report.failed += 1;
            }
        }
        report
    }

    // ── Bucket walking ──────────────────────────────────────────────────

    async fn competition_pairs(&self) -> Result<Vec<(i32, i32)>, IngestError> {
        let key = self.source.competitions_key();
        let raw: Vec<RawCompetition> = self.source.fetch_json(&key).await?;
        Ok(raw
            .into_iter()
            .map(|c| (c.competition_id, c.season_id))
            .collect())
    }

    /// Every match id reachable from the competitions index. Season files
    /// that fail to fetch are counted in the returned report.
    async fn match_ids(&self) -> Result<(Vec<i64>, LoadReport), IngestError> {
        let pairs = self.competition_pairs().await?;
        let mut report = LoadReport::default();
        let mut match_ids = Vec::new();

        let results = stream::iter(pairs)
            .map(|(competition_id, season_id)| async move {
                let key = self.source.matches_key(competition_id, season_id);
                let fetched: Result<Vec<RawMatch>, IngestError> =
                    self.source.fetch_json(&key).await;
                (key, fetched)
            })
            .buffer_unordered(FETCH_CONCURRENCY)
            .collect::<Vec<_>>()
            .await;

        for (key, result) in results {
            match result {
                Ok(matches) => match_ids.extend(matches.into_iter().map(|m| m.match_id)),
                Err(e) => {
                    warn!(key, error = %e, "skipping season match file");
                    report.failed += 1;
                }
            }
        }
        Ok((match_ids, report))
    }
}

/// Loads one match's raw event file from disk into `match_events`,
/// keeping only events with a complete enriched projection. Needs no
/// bucket access, only the store.
///
/// # Errors
///
/// Returns an [`IngestError`] when the file cannot be read or decoded,
/// or the insert fails.
pub async fn load_local_events(
    store: &MatchStore,
    path: &Path,
) -> Result<LoadReport, IngestError> {
    let bytes = tokio::fs::read(path).await?;
    let raw: Vec<RawEvent> =
        serde_json::from_slice(&bytes).map_err(|e| IngestError::Decode {
            key: path.display().to_string(),
            message: e.to_string(),
        })?;

    let total = raw.len();
    let rows: Vec<EnrichedEvent> = raw.into_iter().filter_map(RawEvent::into_enriched).collect();
    let dropped = total - rows.len();

    let inserted = store.insert_enriched_events(&rows).await?;
    let mut report = LoadReport::default();
    report.record_batch(rows.len(), inserted);
    info!(
        file = %path.display(),
        inserted = report.inserted,
        skipped = report.skipped,
        dropped_incomplete = dropped,
        "enriched events loaded"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_absorb_sums_counters() {
        let mut total = LoadReport {
            fetched: 1,
            inserted: 10,
            skipped: 2,
            failed: 0,
        };
        total.absorb(LoadReport {
            fetched: 3,
            inserted: 5,
            skipped: 0,
            failed: 2,
        });
        assert_eq!(
            total,
            LoadReport {
                fetched: 4,
                inserted: 15,
                skipped: 2,
                failed: 2,
            }
        );
    }

    #[test]
    fn record_batch_derives_skipped() {
        let mut report = LoadReport::default();
        report.record_batch(20, 14);
        assert_eq!(report.fetched, 1);
        assert_eq!(report.inserted, 14);
        assert_eq!(report.skipped, 6);

        // Inserted can never exceed attempted, but the counter must not
        // underflow if the store reports oddly.
        report.record_batch(2, 5);
        assert_eq!(report.skipped, 6);
    }
}
