use crate::model::{Comparison, ReconSummary};

/// Compute partition and mismatch counts from a comparison.
pub fn compute_summary(comparison: &Comparison) -> ReconSummary {
    let matched = comparison.matched.len();
    let in_agreement = comparison.matched.iter().filter(|m| m.in_agreement()).count();
    let amount_mismatches = comparison.matched.iter().filter(|m| m.amount_mismatch).count();
    let status_mismatches = comparison.matched.iter().filter(|m| m.status_mismatch).count();

    ReconSummary {
        internal_keys: matched + comparison.internal_only.len(),
        provider_keys: matched + comparison.provider_only.len(),
        matched,
        in_agreement,
        amount_mismatches,
        status_mismatches,
        internal_only: comparison.internal_only.len(),
        provider_only: comparison.provider_only.len(),
        unkeyed_internal: comparison.unkeyed_internal.len(),
        unkeyed_provider: comparison.unkeyed_provider.len(),
    }
}
