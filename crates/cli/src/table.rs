//! Human summary rendering for stderr.

use tally_recon::model::{MatchedPair, ReconSummary};
use unicode_width::UnicodeWidthStr;

/// At most this many discrepant pairs are printed; the rest are counted.
const DISCREPANCY_LIMIT: usize = 20;

/// Pad a string to exactly `width` display columns, using Unicode display
/// width so CJK references keep the columns aligned.
fn pad_right(s: &str, width: usize) -> String {
    let sw = UnicodeWidthStr::width(s);
    if sw >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - sw))
    }
}

pub fn print_summary(name: &str, summary: &ReconSummary) {
    eprintln!(
        "'{}': {} internal / {} provider keys — {} matched ({} in agreement), {} internal-only, {} provider-only",
        name,
        summary.internal_keys,
        summary.provider_keys,
        summary.matched,
        summary.in_agreement,
        summary.internal_only,
        summary.provider_only,
    );

    if summary.amount_mismatches > 0 || summary.status_mismatches > 0 {
        eprintln!(
            "  {} amount mismatch(es), {} status mismatch(es)",
            summary.amount_mismatches, summary.status_mismatches,
        );
    }

    if summary.unkeyed_internal > 0 || summary.unkeyed_provider > 0 {
        eprintln!(
            "  note: {} internal / {} provider row(s) had no reference and were excluded from matching",
            summary.unkeyed_internal, summary.unkeyed_provider,
        );
    }
}

/// Print an aligned table of the pairs that disagree.
pub fn print_discrepancies(matched: &[MatchedPair]) {
    let discrepant: Vec<&MatchedPair> =
        matched.iter().filter(|m| !m.in_agreement()).collect();
    if discrepant.is_empty() {
        return;
    }

    let shown = &discrepant[..discrepant.len().min(DISCREPANCY_LIMIT)];

    let mut widths = [
        "reference".len(),
        "internal".len(),
        "provider".len(),
    ];
    for pair in shown {
        widths[0] = widths[0].max(UnicodeWidthStr::width(pair.reference.as_str()));
        widths[1] = widths[1].max(UnicodeWidthStr::width(side_cell(pair, true).as_str()));
        widths[2] = widths[2].max(UnicodeWidthStr::width(side_cell(pair, false).as_str()));
    }

    eprintln!(
        "  {}  {}  {}  remarks",
        pad_right("reference", widths[0]),
        pad_right("internal", widths[1]),
        pad_right("provider", widths[2]),
    );
    for pair in shown {
        eprintln!(
            "  {}  {}  {}  {}",
            pad_right(&pair.reference, widths[0]),
            pad_right(&side_cell(pair, true), widths[1]),
            pad_right(&side_cell(pair, false), widths[2]),
            remarks(pair),
        );
    }

    if discrepant.len() > shown.len() {
        eprintln!(
            "  ... and {} more discrepant pair(s)",
            discrepant.len() - shown.len(),
        );
    }
}

fn side_cell(pair: &MatchedPair, internal: bool) -> String {
    let rec = if internal { &pair.internal } else { &pair.provider };
    format!("{} / {}", rec.amount, rec.status)
}

fn remarks(pair: &MatchedPair) -> &'static str {
    match (pair.amount_mismatch, pair.status_mismatch) {
        (true, true) => "amount + status mismatch",
        (true, false) => "amount mismatch",
        (false, true) => "status mismatch",
        (false, false) => "ok",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_right_ascii() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("abcd", 4), "abcd");
        assert_eq!(pad_right("abcde", 4), "abcde");
    }

    #[test]
    fn pad_right_cjk_counts_display_width() {
        // Two CJK chars occupy four columns.
        assert_eq!(pad_right("参照", 6), "参照  ");
    }
}
