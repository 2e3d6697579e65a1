use serde::Deserialize;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Amount field comparison mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountCompare {
    /// Strict representation equality: `"100"` and `"100.00"` mismatch.
    #[default]
    Exact,
    /// Parse both sides as financial numbers and compare values; falls
    /// back to exact comparison when either side does not parse.
    Numeric,
}

/// Status field comparison mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCompare {
    #[default]
    Exact,
    CaseInsensitive,
}

/// Per-field comparators for matched pairs.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct ComparePolicy {
    pub amount: AmountCompare,
    pub status: StatusCompare,
}

impl ComparePolicy {
    pub fn amounts_match(&self, internal: &str, provider: &str) -> bool {
        match self.amount {
            AmountCompare::Exact => internal == provider,
            AmountCompare::Numeric => {
                match (parse_financial_number(internal), parse_financial_number(provider)) {
                    (Some(a), Some(b)) => a == b,
                    _ => internal == provider,
                }
            }
        }
    }

    pub fn statuses_match(&self, internal: &str, provider: &str) -> bool {
        match self.status {
            StatusCompare::Exact => internal == provider,
            StatusCompare::CaseInsensitive => {
                internal.to_lowercase() == provider.to_lowercase()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Financial number parsing
// ---------------------------------------------------------------------------

/// Parse a financial number string:
/// - Strip `$`, commas, whitespace
/// - Handle `(123.45)` → `-123.45`
/// - Returns None if non-numeric characters remain after stripping
pub fn parse_financial_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (is_negative, inner) = if trimmed.starts_with('(') && trimmed.ends_with(')') {
        (true, &trimmed[1..trimmed.len() - 1])
    } else {
        (false, trimmed)
    };

    let cleaned: String = inner
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    for (i, c) in cleaned.chars().enumerate() {
        match c {
            '0'..='9' | '.' => {}
            '-' | '+' if i == 0 && !is_negative => {}
            _ => return None,
        }
    }

    let value: f64 = cleaned.parse().ok()?;
    Some(if is_negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic() {
        assert_eq!(parse_financial_number("123.45"), Some(123.45));
        assert_eq!(parse_financial_number("-50"), Some(-50.0));
        assert_eq!(parse_financial_number("0"), Some(0.0));
    }

    #[test]
    fn parse_currency_decorations() {
        assert_eq!(parse_financial_number("$685.00"), Some(685.0));
        assert_eq!(parse_financial_number("$1,234.56"), Some(1234.56));
        assert_eq!(parse_financial_number("(500.00)"), Some(-500.0));
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert_eq!(parse_financial_number("abc"), None);
        assert_eq!(parse_financial_number("12abc34"), None);
        assert_eq!(parse_financial_number(""), None);
        assert_eq!(parse_financial_number("   "), None);
    }

    #[test]
    fn exact_amounts_compare_representation() {
        let policy = ComparePolicy::default();
        assert!(policy.amounts_match("100", "100"));
        // Numerically equal, textually different: still a mismatch.
        assert!(!policy.amounts_match("100", "100.00"));
    }

    #[test]
    fn numeric_amounts_compare_value() {
        let policy = ComparePolicy {
            amount: AmountCompare::Numeric,
            ..ComparePolicy::default()
        };
        assert!(policy.amounts_match("100", "100.00"));
        assert!(policy.amounts_match("$1,000", "1000"));
        assert!(!policy.amounts_match("100", "90"));
        // Unparseable side falls back to exact comparison.
        assert!(!policy.amounts_match("N/A", "100"));
        assert!(policy.amounts_match("N/A", "N/A"));
    }

    #[test]
    fn status_case_folding() {
        let exact = ComparePolicy::default();
        assert!(!exact.statuses_match("PAID", "paid"));

        let folded = ComparePolicy {
            status: StatusCompare::CaseInsensitive,
            ..ComparePolicy::default()
        };
        assert!(folded.statuses_match("PAID", "paid"));
        assert!(!folded.statuses_match("paid", "pending"));
    }
}
