use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::*;

use super::BuildLogError;
use crate::errors::*;
use crate::prelude::*;

// Each line the container runtime hands back looks like
//
//   <optional decoration><YYYY-MM-DDTHH:MM:SS[.fraction]Z><whitespace><message>
//
// The decoration match is lazy, so the first timestamp on the line wins and any timestamps
// inside the message itself are left alone.  A timestamp with nothing after it is an empty
// message.
static LOG_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^.*?([0-9]{4}-[0-1][0-9]-[0-3][0-9]T[0-2][0-9]:[0-5][0-9]:[0-5][0-9](?:\.[0-9]+)?Z)(?:\s+(.*))?$",
    )
    .expect("log line regex is valid")
});

/// What to do with a non-empty line that doesn't contain a log timestamp.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParsePolicy {
    /// Drop the line, count it, and log a warning.
    #[default]
    Skip,

    /// Stop parsing and return `BuildLogError::Parse` for the first such line.
    FailFast,
}

impl FromStr for ParsePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<ParsePolicy> {
        match s {
            "skip" => Ok(ParsePolicy::Skip),
            "fail-fast" | "failFast" => Ok(ParsePolicy::FailFast),
            _ => bail!("unknown parse policy: {s} (expected one of: skip, fail-fast)"),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParsedLog {
    pub items: Vec<LogItem>,
    pub skipped_lines: usize,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LogParser {
    policy: ParsePolicy,
}

impl LogParser {
    pub fn new(policy: ParsePolicy) -> LogParser {
        LogParser { policy }
    }

    pub fn policy(&self) -> ParsePolicy {
        self.policy
    }

    pub fn parse(&self, text: &str) -> Result<ParsedLog, BuildLogError> {
        let mut parsed = ParsedLog::default();

        for (i, raw_line) in text.split('\n').enumerate() {
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            if line.trim().is_empty() {
                continue;
            }

            match parse_line(line) {
                Some(item) => parsed.items.push(item),
                None => match self.policy {
                    ParsePolicy::Skip => {
                        warn!("skipping log line {} with no timestamp: {line:?}", i + 1);
                        parsed.skipped_lines += 1;
                    },
                    ParsePolicy::FailFast => {
                        return Err(BuildLogError::Parse { line: i + 1, text: line.into() });
                    },
                },
            }
        }

        Ok(parsed)
    }
}

pub fn parse_line(line: &str) -> Option<LogItem> {
    let caps = LOG_LINE_REGEX.captures(line)?;
    let timestamp = caps.get(1)?.as_str();
    let message = caps.get(2).map_or("", |m| m.as_str());
    Some(LogItem::new(timestamp, message))
}

pub fn parse_log(text: &str, policy: ParsePolicy) -> Result<ParsedLog, BuildLogError> {
    LogParser::new(policy).parse(text)
}
