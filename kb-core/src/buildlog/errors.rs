use std::fmt;

use crate::errors::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResourceKind {
    Build,
    Pod,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Build => write!(f, "build"),
            ResourceKind::Pod => write!(f, "pod"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BuildLogError {
    #[error("{0} {1} not found")]
    NotFound(ResourceKind, String),

    #[error("pod {0} is in an invalid state: {1}")]
    InvalidState(String, String),

    #[error("could not fetch logs from {url}{}", describe_status(.status))]
    Transport {
        url: String,
        status: Option<u16>,
        source: Option<reqwest::Error>,
    },

    #[error("cancelled while fetching logs from {0}")]
    Cancelled(String),

    #[error("line {line} has no log timestamp: {text:?}")]
    Parse { line: usize, text: String },
}

impl BuildLogError {
    pub fn build_not_found(name: &str) -> BuildLogError {
        BuildLogError::NotFound(ResourceKind::Build, name.into())
    }

    pub fn pod_not_found(name: &str) -> BuildLogError {
        BuildLogError::NotFound(ResourceKind::Pod, name.into())
    }

    pub fn invalid_state(pod: &str, reason: &str) -> BuildLogError {
        BuildLogError::InvalidState(pod.into(), reason.into())
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            BuildLogError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (status {code})"),
        None => String::new(),
    }
}
