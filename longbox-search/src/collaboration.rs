//! Collaboration aggregation: shared-comic counts per collaborator role.

use std::collections::{HashMap, HashSet};

use longbox_core::models::CollabRow;

use crate::response::CollaborationEntry;

/// Aggregate raw co-credit rows into ranked collaborator entries.
///
/// Groups by (collaborator, role) and counts distinct shared comics per
/// group, so a primary creator holding two roles on one comic still counts
/// it once. Self-pairs (any resolved primary id) are excluded. The role
/// filter retains matching groups without changing their counts. Ranking:
/// count descending, collaborator name ascending, role ascending.
pub fn aggregate(
    rows: Vec<CollabRow>,
    primary_ids: &[i64],
    role_filter: Option<&str>,
) -> Vec<CollaborationEntry> {
    let primary: HashSet<i64> = primary_ids.iter().copied().collect();

    let mut shared: HashMap<(i64, String), (String, HashSet<i64>)> = HashMap::new();
    for row in rows {
        if primary.contains(&row.collaborator_id) {
            continue;
        }
        shared
            .entry((row.collaborator_id, row.role))
            .or_insert_with(|| (row.collaborator_name, HashSet::new()))
            .1
            .insert(row.comic_id);
    }

    let mut entries: Vec<CollaborationEntry> = shared
        .into_iter()
        .filter(|((_, role), _)| {
            role_filter.map_or(true, |wanted| role.eq_ignore_ascii_case(wanted))
        })
        .map(|((_, role), (name, comics))| CollaborationEntry {
            collaborator: name,
            role,
            shared_comic_count: comics.len(),
        })
        .collect();

    entries.sort_by(|a, b| {
        b.shared_comic_count
            .cmp(&a.shared_comic_count)
            .then_with(|| a.collaborator.cmp(&b.collaborator))
            .then_with(|| a.role.cmp(&b.role))
    });

    entries
}
