//! Result assembly: dedupe scored comic ids, nest relations, order totally.

use std::collections::HashMap;

use tracing::debug;

use longbox_core::deadline::Deadline;
use longbox_core::errors::EngineResult;
use longbox_core::models::Confidence;
use longbox_core::traits::ICatalogStore;

use crate::response::ComicResult;

/// Assemble full result records for a set of scored comic ids.
///
/// A comic reached through several join paths appears once, keeping the
/// maximum confidence observed. Ordering is total: confidence descending,
/// year ascending (absent year last), title ascending, id ascending.
pub fn assemble(
    store: &dyn ICatalogStore,
    scored: Vec<(i64, Confidence)>,
    deadline: Deadline,
) -> EngineResult<Vec<ComicResult>> {
    if scored.is_empty() {
        return Ok(Vec::new());
    }

    let mut best: HashMap<i64, Confidence> = HashMap::new();
    for (id, confidence) in scored {
        best.entry(id)
            .and_modify(|c| {
                if confidence.value() > c.value() {
                    *c = confidence;
                }
            })
            .or_insert(confidence);
    }

    let ids: Vec<i64> = best.keys().copied().collect();
    let summaries = store.comics_by_ids(&ids, deadline)?;
    debug!(requested = ids.len(), fetched = summaries.len(), "assembling results");

    let mut results = Vec::with_capacity(summaries.len());
    for summary in summaries {
        // Assembly can be the slow half of a large query: honor the
        // deadline between relation fetches, never return a partial list.
        deadline.check()?;
        let confidence = best
            .get(&summary.id)
            .copied()
            .unwrap_or_else(Confidence::exact);
        results.push(ComicResult {
            creators: store.creators_for(summary.id)?,
            characters: store.characters_for(summary.id)?,
            teams: store.teams_for(summary.id)?,
            id: summary.id,
            title: summary.title,
            series: summary.series,
            publisher: summary.publisher,
            year: summary.year,
            file_path: summary.file_path,
            match_confidence: confidence,
        });
    }

    results.sort_by(|a, b| {
        b.match_confidence
            .value()
            .partial_cmp(&a.match_confidence.value())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                a.year
                    .unwrap_or(i32::MAX)
                    .cmp(&b.year.unwrap_or(i32::MAX))
            })
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.id.cmp(&b.id))
    });

    Ok(results)
}
