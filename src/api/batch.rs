//! Identifier filtering and batching.

use std::collections::HashSet;

use crate::config::QueryConfig;

/// Drops blacklisted identifiers and deduplicates the rest.
///
/// Blacklist matching is case-insensitive; original casing is preserved in
/// the output. Deduplication is first-seen-wins, so batch composition is
/// deterministic for a given input order.
pub(crate) fn filter_identifiers<S: AsRef<str>>(ids: &[S], config: &QueryConfig) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(ids.len());
    let mut kept = Vec::new();

    for id in ids {
        let id = id.as_ref();
        let lowered = id.to_lowercase();
        if config.blacklist.contains(&lowered) {
            continue;
        }
        if seen.insert(lowered) {
            kept.push(id.to_string());
        }
    }

    kept
}

/// Partitions identifiers into consecutive batches of at most `batch_size`.
pub(crate) fn into_batches(ids: Vec<String>, batch_size: usize) -> Vec<Vec<String>> {
    ids.chunks(batch_size.max(1))
        .map(<[String]>::to_vec)
        .collect()
}
