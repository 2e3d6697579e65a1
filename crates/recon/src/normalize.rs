//! Record normalizer: delimited text with a header row → `TxRecord`s.
//!
//! This is the engine's input boundary. Anything that goes wrong here is
//! reported as a typed error before `reconcile` is ever reached; malformed
//! text never crashes the join.

use std::collections::HashMap;

use crate::config::ColumnMapping;
use crate::error::{ReconError, Side};
use crate::model::TxRecord;

/// Parse one source's CSV text into records.
///
/// Header names are whitespace-trimmed before being matched against the
/// mapping, and columns are resolved by name, so declaration order does not
/// matter. Unmapped columns are preserved in `TxRecord::extra`. Rows whose
/// cells are all empty are skipped.
pub fn read_records(
    side: Side,
    csv_text: &str,
    columns: &ColumnMapping,
) -> Result<Vec<TxRecord>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::Csv { side, message: e.to_string() })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, ReconError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReconError::MissingColumn { side, column: name.into() })
    };

    let reference_idx = idx(&columns.reference)?;
    let amount_idx = idx(&columns.amount)?;
    let status_idx = idx(&columns.status)?;

    let mut records = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| ReconError::Csv { side, message: e.to_string() })?;

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let mut extra = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            if i == reference_idx || i == amount_idx || i == status_idx {
                continue;
            }
            if let Some(value) = record.get(i) {
                extra.insert(header.clone(), value.to_string());
            }
        }

        records.push(TxRecord {
            reference: record.get(reference_idx).unwrap_or("").to_string(),
            amount: record.get(amount_idx).unwrap_or("").to_string(),
            status: record.get(status_idx).unwrap_or("").to_string(),
            extra,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_columns() -> ColumnMapping {
        ColumnMapping::default()
    }

    #[test]
    fn basic_read() {
        let csv = "\
transaction_reference,amount,status
TX1,100,paid
TX2,50,pending
";
        let records = read_records(Side::Internal, csv, &default_columns()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].reference, "TX1");
        assert_eq!(records[0].amount, "100");
        assert_eq!(records[1].status, "pending");
    }

    #[test]
    fn headers_are_trimmed_before_matching() {
        let csv = "\
 transaction_reference , amount ,status
TX1,100,paid
";
        let records = read_records(Side::Internal, csv, &default_columns()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reference, "TX1");
    }

    #[test]
    fn column_order_does_not_matter() {
        let csv = "\
status,transaction_reference,amount
paid,TX1,100
";
        let records = read_records(Side::Internal, csv, &default_columns()).unwrap();
        assert_eq!(records[0].reference, "TX1");
        assert_eq!(records[0].amount, "100");
        assert_eq!(records[0].status, "paid");
    }

    #[test]
    fn extra_columns_preserved() {
        let csv = "\
transaction_reference,amount,status,channel
TX1,100,paid,web
";
        let records = read_records(Side::Internal, csv, &default_columns()).unwrap();
        assert_eq!(records[0].extra.get("channel").map(String::as_str), Some("web"));
    }

    #[test]
    fn all_empty_rows_skipped() {
        let csv = "\
transaction_reference,amount,status
TX1,100,paid
,,
TX2,50,paid
";
        let records = read_records(Side::Internal, csv, &default_columns()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn missing_reference_cell_yields_empty_key() {
        let csv = "\
transaction_reference,amount,status
,100,paid
";
        let records = read_records(Side::Internal, csv, &default_columns()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reference, "");
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "\
transaction_reference,value,status
TX1,100,paid
";
        let err = read_records(Side::Provider, csv, &default_columns()).unwrap_err();
        match err {
            ReconError::MissingColumn { side, column } => {
                assert_eq!(side, Side::Provider);
                assert_eq!(column, "amount");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn remapped_columns() {
        let csv = "\
ref_id,gross,state
TX1,100,paid
";
        let columns = ColumnMapping {
            reference: "ref_id".into(),
            amount: "gross".into(),
            status: "state".into(),
        };
        let records = read_records(Side::Internal, csv, &columns).unwrap();
        assert_eq!(records[0].reference, "TX1");
        assert_eq!(records[0].amount, "100");
        assert_eq!(records[0].status, "paid");
    }

    #[test]
    fn short_row_fills_empty_cells() {
        let csv = "\
transaction_reference,amount,status
TX1,100
";
        let records = read_records(Side::Internal, csv, &default_columns()).unwrap();
        assert_eq!(records[0].status, "");
    }
}
