use kb_core::buildlog::BuildLogError;
use kb_core::errors::*;
use rocket::Responder;
use tracing::*;

pub const READ_ONLY_MSG: &str = "BuildLog can only be retrieved";

#[derive(Debug, Responder)]
pub enum BuildLogResponseError {
    #[response(status = 404)]
    NotFound(String),

    #[response(status = 405)]
    MethodNotAllowed(&'static str),

    #[response(status = 409)]
    InvalidState(String),

    #[response(status = 500)]
    ServerError(String),

    #[response(status = 502)]
    UpstreamError(String),

    #[response(status = 503)]
    Cancelled(String),
}

impl BuildLogResponseError {
    pub fn read_only() -> Self {
        Self::MethodNotAllowed(READ_ONLY_MSG)
    }
}

impl From<anyhow::Error> for BuildLogResponseError {
    fn from(err: anyhow::Error) -> Self {
        // rocket only sees the response body, so the full chain goes into the message
        let msg = format!("{err:#}");
        match err.downcast_ref::<BuildLogError>() {
            Some(BuildLogError::NotFound(..)) => Self::NotFound(msg),
            Some(BuildLogError::InvalidState(..)) => Self::InvalidState(msg),
            Some(BuildLogError::Transport { .. }) => Self::UpstreamError(msg),
            Some(BuildLogError::Cancelled(_)) => Self::Cancelled(msg),
            Some(BuildLogError::Parse { .. }) => {
                warn!("{msg}");
                Self::ServerError(msg)
            },
            None => {
                log_unexpected(&err, "unexpected error serving build log");
                Self::ServerError(msg)
            },
        }
    }
}
