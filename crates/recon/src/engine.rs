//! Core join: two keyed indices in, one partitioned comparison out.
//!
//! Pure and deterministic: identical inputs produce identical, order-stable
//! output. No state survives a call.

use crate::compare::ComparePolicy;
use crate::error::{ReconError, Side};
use crate::index::KeyedIndex;
use crate::model::{Comparison, MatchedPair};

/// Classify every key of both indices into exactly one partition.
///
/// `matched` and `internal_only` follow the internal index's first-seen
/// order; remaining provider entries follow the provider index's first-seen
/// order. Returns `Precondition` if either side's source collection was
/// empty; no partial result is produced.
pub fn reconcile(
    internal: &KeyedIndex,
    provider: &KeyedIndex,
    policy: &ComparePolicy,
) -> Result<Comparison, ReconError> {
    if internal.is_empty() {
        return Err(ReconError::Precondition { side: Side::Internal });
    }
    if provider.is_empty() {
        return Err(ReconError::Precondition { side: Side::Provider });
    }

    let mut matched = Vec::new();
    let mut internal_only = Vec::new();
    let mut provider_consumed = vec![false; provider.len()];

    for internal_rec in internal.iter() {
        match provider.lookup(&internal_rec.reference) {
            Some((slot, provider_rec)) => {
                provider_consumed[slot] = true;
                matched.push(MatchedPair {
                    reference: internal_rec.reference.clone(),
                    amount_mismatch: !policy
                        .amounts_match(&internal_rec.amount, &provider_rec.amount),
                    status_mismatch: !policy
                        .statuses_match(&internal_rec.status, &provider_rec.status),
                    internal: internal_rec.clone(),
                    provider: provider_rec.clone(),
                });
            }
            None => internal_only.push(internal_rec.clone()),
        }
    }

    let provider_only: Vec<_> = provider
        .iter()
        .enumerate()
        .filter(|(slot, _)| !provider_consumed[*slot])
        .map(|(_, rec)| rec.clone())
        .collect();

    Ok(Comparison {
        matched,
        internal_only,
        provider_only,
        unkeyed_internal: internal.unkeyed().to_vec(),
        unkeyed_provider: provider.unkeyed().to_vec(),
    })
}
