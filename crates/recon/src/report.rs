//! Report assembly and the flat row projections consumed by exporters.

use crate::model::{Comparison, MatchedPair, ReconMeta, ReconReport, TxRecord};
use crate::summary::compute_summary;

/// Column order for the matched-pair export.
pub const MATCHED_HEADER: [&str; 5] = [
    "transaction_reference",
    "internal_amount",
    "internal_status",
    "provider_amount",
    "provider_status",
];

/// Column order for one-sided and unkeyed exports.
pub const ORPHAN_HEADER: [&str; 3] = ["transaction_reference", "amount", "status"];

/// Wrap a comparison with its summary and run metadata.
pub fn build_report(name: &str, comparison: Comparison) -> ReconReport {
    ReconReport {
        meta: ReconMeta {
            name: name.to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary: compute_summary(&comparison),
        comparison,
    }
}

/// One row per matched pair, key plus both sides' compared fields.
pub fn matched_rows(pairs: &[MatchedPair]) -> Vec<[String; 5]> {
    pairs
        .iter()
        .map(|pair| {
            [
                pair.reference.clone(),
                pair.internal.amount.clone(),
                pair.internal.status.clone(),
                pair.provider.amount.clone(),
                pair.provider.status.clone(),
            ]
        })
        .collect()
}

/// One row per orphan or unkeyed record.
pub fn orphan_rows(records: &[TxRecord]) -> Vec<[String; 3]> {
    records
        .iter()
        .map(|rec| [rec.reference.clone(), rec.amount.clone(), rec.status.clone()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison() -> Comparison {
        Comparison {
            matched: vec![MatchedPair {
                reference: "TX1".into(),
                internal: TxRecord::new("TX1", "100", "paid"),
                provider: TxRecord::new("TX1", "90", "paid"),
                amount_mismatch: true,
                status_mismatch: false,
            }],
            internal_only: vec![TxRecord::new("TX2", "50", "pending")],
            provider_only: vec![],
            unkeyed_internal: vec![],
            unkeyed_provider: vec![],
        }
    }

    #[test]
    fn matched_projection() {
        let rows = matched_rows(&comparison().matched);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], ["TX1", "100", "paid", "90", "paid"]);
    }

    #[test]
    fn orphan_projection() {
        let rows = orphan_rows(&comparison().internal_only);
        assert_eq!(rows, vec![["TX2".to_string(), "50".into(), "pending".into()]]);
    }

    #[test]
    fn report_carries_summary_and_meta() {
        let report = build_report("test run", comparison());
        assert_eq!(report.meta.name, "test run");
        assert_eq!(report.meta.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(report.summary.matched, 1);
        assert_eq!(report.summary.amount_mismatches, 1);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["meta"]["run_at"].is_string());
        assert_eq!(json["summary"]["internal_only"], 1);
        assert_eq!(
            json["comparison"]["matched"][0]["reference"],
            serde_json::Value::from("TX1")
        );
    }
}
