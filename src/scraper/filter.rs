use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::domain::NoticeCandidate;

/// Keeps the first occurrence of each distinct title, preserving scan order.
/// The same notice is routinely matched by more than one block pattern, or
/// appears on more than one source page. Idempotent.
pub fn dedup_by_title(candidates: Vec<NoticeCandidate>) -> Vec<NoticeCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.title.clone()))
        .collect()
}

/// Drops candidates published before the cutoff. A candidate exactly at the
/// cutoff is retained.
pub fn retain_since(
    candidates: Vec<NoticeCandidate>,
    cutoff: DateTime<Utc>,
) -> Vec<NoticeCandidate> {
    candidates
        .into_iter()
        .filter(|candidate| candidate.published_at >= cutoff)
        .collect()
}
