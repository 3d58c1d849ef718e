use std::cmp::Reverse;
use std::collections::HashSet;

use crate::models::ConversationEntry;

/// Stable sort, newest first by `modified` (falling back to `created`).
///
/// Entries without a parseable timestamp sort last. Equal keys keep their
/// input order.
pub fn sort_by_recency(entries: &mut [ConversationEntry]) {
    entries.sort_by_cached_key(|entry| Reverse(entry.recency()));
}

/// Keep the first entry seen for each session id
pub fn dedup_by_session(entries: Vec<ConversationEntry>) -> Vec<ConversationEntry> {
    let mut seen = HashSet::with_capacity(entries.len());
    entries.into_iter().filter(|entry| seen.insert(entry.session_id.clone())).collect()
}

/// Union two entry lists into one recency-ordered list, one entry per session.
///
/// `primary` entries precede `secondary` ones before sorting, so on an exact
/// recency tie for the same session the `primary` version is kept. Among
/// duplicates with different timestamps the most recent one wins.
pub fn merge_entries(
    primary: Vec<ConversationEntry>,
    secondary: Vec<ConversationEntry>,
) -> Vec<ConversationEntry> {
    let mut all = primary;
    all.extend(secondary);
    sort_by_recency(&mut all);
    dedup_by_session(all)
}
