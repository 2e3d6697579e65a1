use std::fmt;

/// Which source collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Internal,
    Provider,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Provider => "provider",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key that appeared more than once within one source collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    pub side: Side,
    pub key: String,
    pub count: usize,
}

#[derive(Debug)]
pub enum ReconError {
    /// A source collection was empty at invocation time.
    Precondition { side: Side },
    /// Duplicate keys found under the `reject` policy.
    DuplicateKeys(Vec<DuplicateKey>),
    /// Required column missing from a source's header row.
    MissingColumn { side: Side, column: String },
    /// Delimited-text read error while normalizing a source.
    Csv { side: Side, message: String },
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (missing table, blank file path, etc.).
    ConfigValidation(String),
    /// A comparison is already running on this session.
    Busy,
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Precondition { side } => {
                write!(f, "nothing to reconcile: {side} collection is empty")
            }
            Self::DuplicateKeys(dups) => {
                writeln!(f, "duplicate keys found:")?;
                for dup in dups {
                    writeln!(f, "  {} key {:?} appears {} times", dup.side, dup.key, dup.count)?;
                }
                Ok(())
            }
            Self::MissingColumn { side, column } => {
                write!(f, "{side} source: missing column '{column}'")
            }
            Self::Csv { side, message } => write!(f, "{side} source: {message}"),
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Busy => write!(f, "a comparison is already in progress"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
