use crate::config::{EnrichmentConfig, PipelineConfig};
use crate::dedup::RequestDedup;
use crate::enrichment::{rank_batch, screen_candidates, EnrichedCandidate, ResolvedProfile};
use crate::error::{FetchError, Result};
use crate::fallback::FallbackStore;
use crate::fetcher::{HttpStatsSource, StatsSource};
use crate::models::{Award, FranchiseOutcome, PlayerSeasons, RawPlayerCandidate, RunSummary};
use crate::snapshot::{read_snapshot, write_snapshot};
use franchise_registry::{same_player, RosterPlayer, RosterSnapshot, Slot, FRANCHISES};
use parking_lot::Mutex;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Per-player fetch results shared by every franchise in one run.
///
/// A player who suited up for several franchises is fetched once.
#[derive(Default)]
pub struct RunCache {
    positions: RequestDedup<String, std::result::Result<Vec<Slot>, FetchError>>,
    seasons: RequestDedup<String, std::result::Result<PlayerSeasons, FetchError>>,
    awards: RequestDedup<String, std::result::Result<Vec<Award>, FetchError>>,
}

impl RunCache {
    /// Distinct players whose positions were requested
    pub fn players_requested(&self) -> usize {
        self.positions.len()
    }
}

/// Builds ranked franchise rosters from a stats source
pub struct RosterPipeline<S: StatsSource + 'static> {
    source: Arc<S>,
    config: EnrichmentConfig,
    fallback: Arc<FallbackStore>,
}

impl<S: StatsSource + 'static> RosterPipeline<S> {
    pub fn new(source: Arc<S>, config: EnrichmentConfig, fallback: FallbackStore) -> Self {
        Self { source, config, fallback: Arc::new(fallback) }
    }

    /// Rebuild every franchise
    pub async fn rebuild(&self) -> (RosterSnapshot, RunSummary) {
        let abbreviations: Vec<&str> = FRANCHISES.iter().map(|f| f.abbreviation).collect();
        self.rebuild_franchises(&abbreviations).await
    }

    /// Rebuild the given franchises with one shared request cache
    pub async fn rebuild_franchises(&self, abbreviations: &[&str]) -> (RosterSnapshot, RunSummary) {
        let cache = Arc::new(RunCache::default());
        let mut franchises = BTreeMap::new();
        let mut summary = RunSummary::default();

        for abbr in abbreviations {
            let (roster, outcome) = self.build_franchise(abbr, &cache).await;
            summary.record(abbr, outcome);
            franchises.insert(abbr.to_string(), roster);
        }

        info!(
            "Rebuild finished: {} enriched, {} fell back, {} distinct players fetched",
            summary.enriched_count(),
            summary.fell_back_count(),
            cache.players_requested()
        );
        (RosterSnapshot::new(franchises), summary)
    }

    /// Build one franchise roster. Never fails: a franchise whose totals are
    /// unusable keeps its fallback roster as-is.
    pub async fn build_franchise(
        &self,
        abbr: &str,
        cache: &Arc<RunCache>,
    ) -> (Vec<RosterPlayer>, FranchiseOutcome) {
        info!("Building roster for {}", abbr);

        let candidates = match self.source.franchise_totals(abbr).await {
            Ok(candidates) => candidates,
            Err(e) => {
                if e.is_malformed() {
                    error!("Malformed totals for {}, keeping last-known-good roster: {}", abbr, e);
                } else {
                    warn!("Totals unavailable for {}, keeping fallback roster: {}", abbr, e);
                }
                let roster = self.fallback.roster(abbr).to_vec();
                return (roster, FranchiseOutcome::FellBack { reason: e.to_string() });
            }
        };

        let total = candidates.len();
        let screened = screen_candidates(candidates, self.config.effective_candidate_limit());
        info!("{}: screened {} candidates down to {}", abbr, total, screened.len());

        let enriched = self.enrich_all(abbr, screened, cache).await;
        let enriched_count = enriched.len();
        let fallbacks = enriched.iter().filter(|e| e.profile.used_fallback).count();

        let mut roster: Vec<RosterPlayer> = rank_batch(enriched)
            .into_iter()
            .take(self.config.roster_size)
            .map(|ranked| ranked.player)
            .collect();
        let backfilled = backfill(&mut roster, self.fallback.roster(abbr), self.config.roster_size);

        if roster.len() < self.config.roster_size {
            warn!(
                "{}: only {} of {} roster spots filled after backfill",
                abbr,
                roster.len(),
                self.config.roster_size
            );
        }
        info!(
            "{}: {} players ({} enriched, {} fallbacks, {} backfilled)",
            abbr,
            roster.len(),
            enriched_count,
            fallbacks,
            backfilled
        );

        (roster, FranchiseOutcome::Enriched { candidates: enriched_count, fallbacks, backfilled })
    }

    /// Fixed pool of workers pulling candidates from a shared queue.
    ///
    /// Every screened candidate comes back exactly once, in screening order.
    /// Results are recorded as each candidate finishes, so a worker that dies
    /// only loses its in-flight candidate; that one gets a fallback profile and
    /// anything it left queued is enriched after the pool drains.
    async fn enrich_all(
        &self,
        abbr: &str,
        screened: Vec<RawPlayerCandidate>,
        cache: &Arc<RunCache>,
    ) -> Vec<EnrichedCandidate> {
        if screened.is_empty() {
            return Vec::new();
        }

        let workers = self.config.concurrency.clamp(1, screened.len());
        let slots: Arc<Mutex<Vec<Option<EnrichedCandidate>>>> =
            Arc::new(Mutex::new((0..screened.len()).map(|_| None).collect()));
        let queue: Arc<Mutex<VecDeque<(usize, RawPlayerCandidate)>>> =
            Arc::new(Mutex::new(screened.iter().cloned().enumerate().collect()));

        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let queue = Arc::clone(&queue);
            let slots = Arc::clone(&slots);
            let source = Arc::clone(&self.source);
            let cache = Arc::clone(cache);
            let fallback = Arc::clone(&self.fallback);
            let abbr = abbr.to_string();

            handles.push(tokio::spawn(async move {
                loop {
                    let next = queue.lock().pop_front();
                    let Some((index, candidate)) = next else {
                        break;
                    };
                    let enriched = enrich_candidate(&abbr, candidate, &source, &cache, &fallback).await;
                    slots.lock()[index] = Some(enriched);
                }
            }));
        }

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Enrichment worker for {} stopped: {}", abbr, e);
            }
        }

        let leftover: Vec<(usize, RawPlayerCandidate)> = queue.lock().drain(..).collect();
        for (index, candidate) in leftover {
            let enriched = enrich_candidate(abbr, candidate, &self.source, cache, &self.fallback).await;
            slots.lock()[index] = Some(enriched);
        }

        let finished = std::mem::take(&mut *slots.lock());
        finished
            .into_iter()
            .zip(screened)
            .map(|(slot, candidate)| match slot {
                Some(enriched) => enriched,
                None => {
                    let profile = fallback_profile(abbr, &candidate, &self.fallback, "enrichment worker stopped");
                    EnrichedCandidate { candidate, profile }
                }
            })
            .collect()
    }
}

/// Fetch positions, seasons and awards together; any failure falls back to
/// the cached entry, then to a degraded profile
async fn enrich_candidate<S: StatsSource + 'static>(
    abbr: &str,
    candidate: RawPlayerCandidate,
    source: &Arc<S>,
    cache: &RunCache,
    fallback: &FallbackStore,
) -> EnrichedCandidate {
    let id = candidate.player_id.clone();

    let positions = {
        let (source, id) = (Arc::clone(source), id.clone());
        cache.positions.get_or_fetch(id.clone(), move || async move { source.player_positions(&id).await })
    };
    let seasons = {
        let (source, id) = (Arc::clone(source), id.clone());
        cache.seasons.get_or_fetch(id.clone(), move || async move { source.player_seasons(&id).await })
    };
    let awards = {
        let (source, id) = (Arc::clone(source), id.clone());
        cache.awards.get_or_fetch(id.clone(), move || async move { source.player_awards(&id).await })
    };

    let profile = match tokio::join!(positions, seasons, awards) {
        (Ok(positions), Ok(seasons), Ok(awards)) => {
            ResolvedProfile::from_fetched(abbr, &candidate, positions, &seasons, &awards)
        }
        (positions, seasons, awards) => {
            let reason = [positions.err(), seasons.err(), awards.err()]
                .into_iter()
                .flatten()
                .next()
                .map(|e| e.to_string())
                .unwrap_or_default();
            fallback_profile(abbr, &candidate, fallback, &reason)
        }
    };

    EnrichedCandidate { candidate, profile }
}

/// Cached entry for the candidate when one exists, otherwise a degraded profile
fn fallback_profile(
    abbr: &str,
    candidate: &RawPlayerCandidate,
    fallback: &FallbackStore,
    reason: &str,
) -> ResolvedProfile {
    match fallback.find(abbr, &candidate.name) {
        Some(entry) => {
            warn!("{} ({}): enrichment failed, using cached entry: {}", candidate.name, abbr, reason);
            ResolvedProfile::from_cached(entry)
        }
        None => {
            warn!("{} ({}): enrichment failed, no cached entry: {}", candidate.name, abbr, reason);
            ResolvedProfile::degraded(candidate)
        }
    }
}

/// Append fallback entries not already on the roster until it is full.
/// Returns how many were added.
pub fn backfill(roster: &mut Vec<RosterPlayer>, fallback: &[RosterPlayer], roster_size: usize) -> usize {
    let mut added = 0;
    for entry in fallback {
        if roster.len() >= roster_size {
            break;
        }
        if roster.iter().any(|p| same_player(&p.name, &entry.name)) {
            continue;
        }
        roster.push(entry.clone());
        added += 1;
    }
    added
}

/// Fallback store layered from the embedded seed, an optional seed file and
/// the previous snapshot. The embedded seed alone covers every franchise.
pub fn load_fallback(config: &PipelineConfig) -> Result<FallbackStore> {
    let mut store = FallbackStore::embedded()?;
    match FallbackStore::load_seed(&config.paths.fallback) {
        Ok(seed) => store.overlay(&seed),
        Err(e) => info!("No seed override at {:?}: {}", config.paths.fallback, e),
    }
    match read_snapshot(&config.paths.snapshot) {
        Ok(previous) => {
            info!("Using previous snapshot from {} as last-known-good", previous.generated_at);
            store.overlay_snapshot(&previous);
        }
        Err(e) => warn!("No previous snapshot at {:?}: {}", config.paths.snapshot, e),
    }
    Ok(store)
}

/// Rebuild every franchise from `source` and write the snapshot atomically.
/// A snapshot that would not load in the scoring engine is never written.
pub async fn rebuild_with_source<S: StatsSource + 'static>(
    source: Arc<S>,
    config: &PipelineConfig,
) -> Result<RunSummary> {
    let pipeline = RosterPipeline::new(source, config.enrichment.clone(), load_fallback(config)?);
    let (snapshot, summary) = pipeline.rebuild().await;
    snapshot.validate()?;
    write_snapshot(&config.paths.snapshot, &snapshot)?;
    Ok(summary)
}

/// Rebuild against the configured HTTP source
pub async fn rebuild_snapshot(config: &PipelineConfig) -> Result<RunSummary> {
    config.validate()?;
    let source = Arc::new(HttpStatsSource::new(config.source.clone())?);
    rebuild_with_source(source, config).await
}
