use std::collections::HashMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single normalized row from either source's CSV.
///
/// `amount` and `status` keep the exact textual representation the source
/// produced; the engine never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxRecord {
    pub reference: String,
    pub amount: String,
    pub status: String,
    /// Columns the normalizer preserved but the engine never compares.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, String>,
}

impl TxRecord {
    pub fn new(
        reference: impl Into<String>,
        amount: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            amount: amount.into(),
            status: status.into(),
            extra: HashMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Matched pair
// ---------------------------------------------------------------------------

/// A key found in both indices, with per-field discrepancy flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedPair {
    pub reference: String,
    pub internal: TxRecord,
    pub provider: TxRecord,
    pub amount_mismatch: bool,
    pub status_mismatch: bool,
}

impl MatchedPair {
    /// Both flags false: the two records agree on every compared field.
    pub fn in_agreement(&self) -> bool {
        !self.amount_mismatch && !self.status_mismatch
    }
}

// ---------------------------------------------------------------------------
// Comparison output
// ---------------------------------------------------------------------------

/// The engine's sole output: three disjoint, ordered partitions.
///
/// `matched` and `internal_only` follow internal first-seen key order;
/// `provider_only` follows provider first-seen order restricted to keys the
/// join did not consume. Unkeyed records never enter the join and are
/// carried through per side for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub matched: Vec<MatchedPair>,
    pub internal_only: Vec<TxRecord>,
    pub provider_only: Vec<TxRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unkeyed_internal: Vec<TxRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unkeyed_provider: Vec<TxRecord>,
}

// ---------------------------------------------------------------------------
// Summary + report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub internal_keys: usize,
    pub provider_keys: usize,
    pub matched: usize,
    pub in_agreement: usize,
    pub amount_mismatches: usize,
    pub status_mismatches: usize,
    pub internal_only: usize,
    pub provider_only: usize,
    pub unkeyed_internal: usize,
    pub unkeyed_provider: usize,
}

impl ReconSummary {
    /// True when every matched pair agrees and neither side has orphans.
    pub fn is_clean(&self) -> bool {
        self.matched == self.in_agreement && self.internal_only == 0 && self.provider_only == 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub comparison: Comparison,
}
