use clockabilly::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped line of build output.  The timestamp is kept exactly as the container
/// runtime wrote it (`YYYY-MM-DDTHH:MM:SS[.fraction]Z`).
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogItem {
    pub timestamp: String,
    pub log: String,
}

impl LogItem {
    pub fn new(timestamp: &str, log: &str) -> LogItem {
        LogItem { timestamp: timestamp.into(), log: log.into() }
    }
}

/// The read-only `BuildLog` object served to API clients; it is computed fresh on every
/// request and never stored.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildLog {
    pub build: String,
    pub items: Vec<LogItem>,
    pub creation_timestamp: DateTime<Utc>,

    #[serde(default)]
    pub skipped_lines: usize,
}
