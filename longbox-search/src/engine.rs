//! SearchEngine: one operation per search tool, orchestrating the
//! predicate builder, the match cascade, and the result assembler.
//!
//! Flow per tool: build predicate → structural fetch → escalate through
//! the cascade when too few rows came back → assemble and order.
//! Collaboration queries skip the cascade-on-comics path and aggregate
//! co-credit rows instead.

use std::collections::HashMap;
use std::time::Instant;

use serde_json::json;
use tracing::{debug, info};

use longbox_core::config::SearchConfig;
use longbox_core::deadline::Deadline;
use longbox_core::errors::{EngineResult, ValidationError};
use longbox_core::models::{CatalogStats, ComicSummary, Confidence, NameKind};
use longbox_core::traits::ICatalogStore;
use longbox_match::{match_cascade, CascadeConfig, Normalizer};
use longbox_query::{build_predicate, Criteria, Criterion, TextMatch};

use crate::assembler;
use crate::collaboration;
use crate::response::{CollaborationResponse, ComicResult, ResponseMetadata, SearchResponse};

/// The search engine. Holds a store handle and config, nothing else;
/// every call is stateless and idempotent.
pub struct SearchEngine<'a> {
    store: &'a dyn ICatalogStore,
    config: SearchConfig,
    normalizer: Normalizer,
}

impl<'a> SearchEngine<'a> {
    pub fn new(store: &'a dyn ICatalogStore) -> Self {
        Self::with_config(store, SearchConfig::default())
    }

    pub fn with_config(store: &'a dyn ICatalogStore, config: SearchConfig) -> Self {
        let normalizer = Normalizer::new(config.strip_leading_articles);
        Self {
            store,
            config,
            normalizer,
        }
    }

    /// Search comics by title, with cascade fallback unless `exact_match`.
    pub fn search_by_title(
        &self,
        title: &str,
        exact_match: bool,
        deadline: Deadline,
    ) -> EngineResult<SearchResponse> {
        let started = Instant::now();
        let criteria = Criteria::new().with(Criterion::Title(text(title, exact_match)));
        let predicate = build_predicate(&criteria, true)?;
        let mut scored = structural(self.store.comics_where(&predicate, deadline)?);

        let mut fuzzy_used = false;
        if scored.len() < self.config.min_results && !exact_match {
            let (matched, fuzzy) = self.match_entities(NameKind::ComicTitle, title, deadline)?;
            fuzzy_used = fuzzy;
            // Title matches map straight onto comic ids.
            scored.extend(matched);
        }

        let results = assembler::assemble(self.store, scored, deadline)?;
        Ok(self.respond(
            results,
            started,
            json!({ "title": title, "exact_match": exact_match }),
            fuzzy_used,
        ))
    }

    /// Search comics by series name, optionally filtered by publisher.
    pub fn search_by_series(
        &self,
        series: &str,
        publisher: Option<&str>,
        exact_match: bool,
        deadline: Deadline,
    ) -> EngineResult<SearchResponse> {
        let started = Instant::now();
        let mut criteria = Criteria::new().with(Criterion::Series(text(series, exact_match)));
        if let Some(publisher) = publisher {
            criteria.push(Criterion::Publisher(TextMatch::partial(publisher)));
        }
        let predicate = build_predicate(&criteria, true)?;
        let mut scored = structural(self.store.comics_where(&predicate, deadline)?);

        let mut fuzzy_used = false;
        if scored.len() < self.config.min_results && !exact_match {
            let (matched, fuzzy) = self.match_entities(NameKind::Series, series, deadline)?;
            fuzzy_used = fuzzy;
            scored.extend(self.comics_for(NameKind::Series, matched, deadline)?);
        }

        let mut results = assembler::assemble(self.store, scored, deadline)?;
        if let Some(publisher) = publisher {
            retain_publisher(&mut results, publisher, &self.normalizer);
        }
        Ok(self.respond(
            results,
            started,
            json!({ "series": series, "publisher": publisher, "exact_match": exact_match }),
            fuzzy_used,
        ))
    }

    /// Search comics featuring a character. `include_teams` counts
    /// team-roster appearance rows as matches.
    pub fn search_by_character(
        &self,
        character_name: &str,
        include_teams: bool,
        deadline: Deadline,
    ) -> EngineResult<SearchResponse> {
        let started = Instant::now();
        let criteria = Criteria::new().with(Criterion::Character {
            name: TextMatch::partial(character_name),
            include_teams,
        });
        let predicate = build_predicate(&criteria, true)?;
        let mut scored = structural(self.store.comics_where(&predicate, deadline)?);

        let mut fuzzy_used = false;
        if scored.len() < self.config.min_results {
            let (matched, fuzzy) =
                self.match_entities(NameKind::Character, character_name, deadline)?;
            fuzzy_used = fuzzy;
            for (confidence, ids) in group_by_confidence(matched) {
                let comic_ids =
                    self.store
                        .comic_ids_for_characters(&ids, include_teams, deadline)?;
                scored.extend(comic_ids.into_iter().map(|id| (id, confidence)));
            }
        }

        let results = assembler::assemble(self.store, scored, deadline)?;
        Ok(self.respond(
            results,
            started,
            json!({ "character_name": character_name, "include_teams": include_teams }),
            fuzzy_used,
        ))
    }

    /// Search comics featuring a team.
    pub fn search_by_team(&self, team_name: &str, deadline: Deadline) -> EngineResult<SearchResponse> {
        let started = Instant::now();
        let criteria = Criteria::new().with(Criterion::Team(TextMatch::partial(team_name)));
        let predicate = build_predicate(&criteria, true)?;
        let mut scored = structural(self.store.comics_where(&predicate, deadline)?);

        let mut fuzzy_used = false;
        if scored.len() < self.config.min_results {
            let (matched, fuzzy) = self.match_entities(NameKind::Team, team_name, deadline)?;
            fuzzy_used = fuzzy;
            scored.extend(self.comics_for(NameKind::Team, matched, deadline)?);
        }

        let results = assembler::assemble(self.store, scored, deadline)?;
        Ok(self.respond(
            results,
            started,
            json!({ "team_name": team_name }),
            fuzzy_used,
        ))
    }

    /// Search comics by creator, optionally restricted to one role.
    pub fn search_by_creator(
        &self,
        creator_name: &str,
        role: Option<&str>,
        exact_match: bool,
        deadline: Deadline,
    ) -> EngineResult<SearchResponse> {
        let started = Instant::now();
        let criteria = Criteria::new().with(Criterion::Creator {
            name: text(creator_name, exact_match),
            role: role.map(str::to_string),
        });
        let predicate = build_predicate(&criteria, true)?;
        let mut scored = structural(self.store.comics_where(&predicate, deadline)?);

        let mut fuzzy_used = false;
        if scored.len() < self.config.min_results && !exact_match {
            let (matched, fuzzy) = self.match_entities(NameKind::Creator, creator_name, deadline)?;
            fuzzy_used = fuzzy;
            for (confidence, ids) in group_by_confidence(matched) {
                let comic_ids = self.store.comic_ids_for_creators(&ids, role, deadline)?;
                scored.extend(comic_ids.into_iter().map(|id| (id, confidence)));
            }
        }

        let results = assembler::assemble(self.store, scored, deadline)?;
        Ok(self.respond(
            results,
            started,
            json!({ "creator_name": creator_name, "role": role, "exact_match": exact_match }),
            fuzzy_used,
        ))
    }

    /// Search comics tied to an event or story arc.
    pub fn search_by_event(
        &self,
        event_name: &str,
        deadline: Deadline,
    ) -> EngineResult<SearchResponse> {
        let started = Instant::now();
        let criteria = Criteria::new().with(Criterion::Event(TextMatch::partial(event_name)));
        let predicate = build_predicate(&criteria, true)?;
        let mut scored = structural(self.store.comics_where(&predicate, deadline)?);

        let mut fuzzy_used = false;
        if scored.len() < self.config.min_results {
            let (matched, fuzzy) = self.match_entities(NameKind::Event, event_name, deadline)?;
            fuzzy_used = fuzzy;
            scored.extend(self.comics_for(NameKind::Event, matched, deadline)?);
        }

        let results = assembler::assemble(self.store, scored, deadline)?;
        Ok(self.respond(
            results,
            started,
            json!({ "event_name": event_name }),
            fuzzy_used,
        ))
    }

    /// Search comics by year or inclusive year range. Purely structural:
    /// no confidence scoring, no cascade.
    pub fn search_by_year(
        &self,
        year: Option<i32>,
        start_year: Option<i32>,
        end_year: Option<i32>,
        deadline: Deadline,
    ) -> EngineResult<SearchResponse> {
        let started = Instant::now();
        let criterion = match (year, start_year, end_year) {
            (None, None, None) => return Err(ValidationError::MissingYearBounds.into()),
            (Some(_), Some(_), _) => {
                return Err(ValidationError::AmbiguousYear {
                    field: "start_year".to_string(),
                }
                .into())
            }
            (Some(_), None, Some(_)) => {
                return Err(ValidationError::AmbiguousYear {
                    field: "end_year".to_string(),
                }
                .into())
            }
            (Some(y), None, None) => Criterion::Year(y),
            (None, start, end) => Criterion::YearRange { start, end },
        };
        let predicate = build_predicate(&Criteria::new().with(criterion), true)?;
        let scored = structural(self.store.comics_where(&predicate, deadline)?);

        let results = assembler::assemble(self.store, scored, deadline)?;
        Ok(self.respond(
            results,
            started,
            json!({ "year": year, "start_year": start_year, "end_year": end_year }),
            false,
        ))
    }

    /// Ranked co-appearance statistics for a creator.
    pub fn find_creator_collaborations(
        &self,
        creator_name: &str,
        collaboration_type: Option<&str>,
        deadline: Deadline,
    ) -> EngineResult<CollaborationResponse> {
        let started = Instant::now();

        let (matched, fuzzy_used) =
            self.match_entities(NameKind::Creator, creator_name, deadline)?;
        let creator_ids: Vec<i64> = matched.iter().map(|(id, _)| *id).collect();
        debug!(
            creator = %creator_name,
            resolved = creator_ids.len(),
            "resolved primary creator"
        );

        let rows = self.store.collaboration_rows(&creator_ids, deadline)?;
        deadline.check()?;
        let entries = collaboration::aggregate(rows, &creator_ids, collaboration_type);

        info!(
            creator = %creator_name,
            collaborators = entries.len(),
            "collaboration query complete"
        );
        let metadata = ResponseMetadata {
            query_time_ms: elapsed_ms(started),
            result_count: entries.len(),
            search_terms: json!({
                "creator_name": creator_name,
                "collaboration_type": collaboration_type,
            }),
            fuzzy_matches_used: fuzzy_used,
        };
        Ok(CollaborationResponse {
            results: entries,
            metadata,
        })
    }

    /// Multi-criteria search over a validated criteria mapping.
    pub fn advanced_search(
        &self,
        criteria: &serde_json::Value,
        match_all: bool,
        deadline: Deadline,
    ) -> EngineResult<SearchResponse> {
        let started = Instant::now();
        let validated = Criteria::from_json(criteria)?;
        let predicate = build_predicate(&validated, match_all)?;
        debug!(where_sql = %predicate.where_sql, binds = predicate.binds.len(), "advanced search predicate");

        let scored = structural(self.store.comics_where(&predicate, deadline)?);
        let results = assembler::assemble(self.store, scored, deadline)?;

        let mut terms = criteria.clone();
        if let Some(map) = terms.as_object_mut() {
            map.insert("match_all".to_string(), json!(match_all));
        }
        Ok(self.respond(results, started, terms, false))
    }

    /// Whole-catalog statistics.
    pub fn database_stats(&self) -> EngineResult<CatalogStats> {
        self.store.catalog_stats()
    }

    /// Resolve a free-text name against one entity pool via the cascade.
    /// Returns matched (entity id, confidence) pairs and whether any
    /// fuzzy tier contributed.
    fn match_entities(
        &self,
        kind: NameKind,
        query: &str,
        deadline: Deadline,
    ) -> EngineResult<(Vec<(i64, Confidence)>, bool)> {
        let pool = self.store.name_pool(kind, deadline)?;
        deadline.check()?;

        // Names can repeat (comic titles especially): cascade over the
        // distinct strings, then expand back to every id carrying one.
        let mut ids_by_name: HashMap<&str, Vec<i64>> = HashMap::new();
        for row in &pool {
            ids_by_name.entry(row.name.as_str()).or_default().push(row.id);
        }

        let cascade_config = CascadeConfig {
            min_results: self.config.min_results,
            fuzzy_threshold: self.config.fuzzy_threshold,
            exact_only: false,
        };
        let matches = match_cascade(
            query,
            ids_by_name.keys().copied(),
            &cascade_config,
            &self.normalizer,
        );

        let fuzzy_used = matches.iter().any(|m| m.tier.is_fuzzy());
        let mut out = Vec::new();
        for m in &matches {
            if let Some(ids) = ids_by_name.get(m.candidate.as_str()) {
                out.extend(ids.iter().map(|id| (*id, m.confidence)));
            }
        }
        debug!(?kind, query = %query, matched = out.len(), fuzzy_used, "cascade fallback");
        Ok((out, fuzzy_used))
    }

    /// Map matched entities to scored comic ids through their appearance
    /// table.
    fn comics_for(
        &self,
        kind: NameKind,
        matched: Vec<(i64, Confidence)>,
        deadline: Deadline,
    ) -> EngineResult<Vec<(i64, Confidence)>> {
        let mut scored = Vec::new();
        for (confidence, ids) in group_by_confidence(matched) {
            let comic_ids = self.store.comic_ids_for(kind, &ids, deadline)?;
            scored.extend(comic_ids.into_iter().map(|id| (id, confidence)));
        }
        Ok(scored)
    }

    fn respond(
        &self,
        results: Vec<ComicResult>,
        started: Instant,
        search_terms: serde_json::Value,
        fuzzy_matches_used: bool,
    ) -> SearchResponse {
        let metadata = ResponseMetadata {
            query_time_ms: elapsed_ms(started),
            result_count: results.len(),
            search_terms,
            fuzzy_matches_used,
        };
        info!(
            results = metadata.result_count,
            fuzzy = metadata.fuzzy_matches_used,
            elapsed_ms = metadata.query_time_ms,
            "search complete"
        );
        SearchResponse { results, metadata }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

fn text(value: &str, exact: bool) -> TextMatch {
    if exact {
        TextMatch::exact(value)
    } else {
        TextMatch::partial(value)
    }
}

/// Structural hits carry full confidence.
fn structural(summaries: Vec<ComicSummary>) -> Vec<(i64, Confidence)> {
    summaries
        .into_iter()
        .map(|s| (s.id, Confidence::exact()))
        .collect()
}

/// Bucket matched entity ids by identical confidence so each bucket is
/// one store round-trip. Buckets come out highest-confidence first.
fn group_by_confidence(matched: Vec<(i64, Confidence)>) -> Vec<(Confidence, Vec<i64>)> {
    let mut groups: Vec<(Confidence, Vec<i64>)> = Vec::new();
    for (id, confidence) in matched {
        match groups
            .iter_mut()
            .find(|(c, _)| c.value() == confidence.value())
        {
            Some((_, ids)) => ids.push(id),
            None => groups.push((confidence, vec![id])),
        }
    }
    groups.sort_by(|a, b| {
        b.0.value()
            .partial_cmp(&a.0.value())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    groups
}

/// Publisher filter applied after fuzzy series fallback: keep comics whose
/// publisher contains the requested name, case-insensitively.
fn retain_publisher(results: &mut Vec<ComicResult>, publisher: &str, normalizer: &Normalizer) {
    let wanted = normalizer.normalize(publisher);
    results.retain(|r| {
        r.publisher
            .as_deref()
            .map_or(false, |p| normalizer.normalize(p).contains(&wanted))
    });
}
