use serde::Deserialize;

use crate::compare::{AmountCompare, ComparePolicy, StatusCompare};
use crate::error::ReconError;
use crate::index::DuplicatePolicy;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ReconConfig {
    pub name: String,
    pub internal: SourceConfig,
    pub provider: SourceConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// CSV path, resolved relative to the config file's directory.
    pub file: String,
    #[serde(default)]
    pub columns: ColumnMapping,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub reference: String,
    pub amount: String,
    pub status: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            reference: "transaction_reference".into(),
            amount: "amount".into(),
            status: "status".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub duplicates: DuplicatePolicy,
    pub amount: AmountCompare,
    pub status: StatusCompare,
}

impl PolicyConfig {
    pub fn compare(&self) -> ComparePolicy {
        ComparePolicy {
            amount: self.amount,
            status: self.status,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        for (label, source) in [("internal", &self.internal), ("provider", &self.provider)] {
            if source.file.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "{label} source: file path is empty"
                )));
            }
            for (col_label, col) in [
                ("reference", &source.columns.reference),
                ("amount", &source.columns.amount),
                ("status", &source.columns.status),
            ] {
                if col.trim().is_empty() {
                    return Err(ReconError::ConfigValidation(format!(
                        "{label} source: {col_label} column name is empty"
                    )));
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
name = "April close"

[internal]
file = "internal.csv"

[provider]
file = "provider.csv"
"#;

    #[test]
    fn parse_minimal() {
        let config = ReconConfig::from_toml(VALID).unwrap();
        assert_eq!(config.name, "April close");
        assert_eq!(config.internal.file, "internal.csv");
        assert_eq!(config.internal.columns.reference, "transaction_reference");
        assert_eq!(config.policy.duplicates, DuplicatePolicy::KeepLast);
        assert_eq!(config.policy.amount, AmountCompare::Exact);
        assert_eq!(config.policy.status, StatusCompare::Exact);
    }

    #[test]
    fn parse_with_policy_and_remap() {
        let input = r#"
name = "Hardened"

[internal]
file = "ledger.csv"
[internal.columns]
reference = "ref_id"
amount    = "gross"
status    = "state"

[provider]
file = "statement.csv"

[policy]
duplicates = "reject"
amount     = "numeric"
status     = "case_insensitive"
"#;
        let config = ReconConfig::from_toml(input).unwrap();
        assert_eq!(config.internal.columns.reference, "ref_id");
        assert_eq!(config.internal.columns.amount, "gross");
        // Provider keeps defaults when not remapped.
        assert_eq!(config.provider.columns.status, "status");
        assert_eq!(config.policy.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.policy.amount, AmountCompare::Numeric);
        assert_eq!(config.policy.status, StatusCompare::CaseInsensitive);
    }

    #[test]
    fn reject_unknown_policy_value() {
        let input = format!("{VALID}\n[policy]\nduplicates = \"keep_best\"\n");
        let err = ReconConfig::from_toml(&input).unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }

    #[test]
    fn reject_missing_provider_table() {
        let input = r#"
name = "Half"

[internal]
file = "internal.csv"
"#;
        let err = ReconConfig::from_toml(input).unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }

    #[test]
    fn reject_blank_file_path() {
        let input = r#"
name = "Blank"

[internal]
file = "  "

[provider]
file = "provider.csv"
"#;
        let err = ReconConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("file path is empty"));
    }

    #[test]
    fn reject_blank_column_name() {
        let input = r#"
name = "Blank column"

[internal]
file = "internal.csv"
[internal.columns]
reference = ""

[provider]
file = "provider.csv"
"#;
        let err = ReconConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("reference column name is empty"));
    }
}
