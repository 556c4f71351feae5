use itertools::Itertools;

use crate::model::ScoredEntry;

/// Order a single contest's entries and assign competition ranks.
///
/// Equal totals share a rank and the next distinct total skips ahead
/// ("1, 1, 3"). Team id only fixes iteration order among ties.
pub fn rank(mut entries: Vec<ScoredEntry>) -> Vec<ScoredEntry> {
    entries.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| a.team_id.cmp(&b.team_id))
    });

    let mut current_rank = 0;
    let mut previous = None;
    for (index, entry) in entries.iter_mut().enumerate() {
        if previous != Some(entry.total_points) {
            current_rank = index as u32 + 1;
            previous = Some(entry.total_points);
        }
        entry.rank = current_rank;
    }
    entries
}

/// Rank entries belonging to several contests, each contest independently.
pub fn rank_by_contest(entries: Vec<ScoredEntry>) -> Vec<ScoredEntry> {
    entries
        .into_iter()
        .into_group_map_by(|e| e.contest_id.clone())
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .flat_map(|(_, group)| rank(group))
        .collect()
}
