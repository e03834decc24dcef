use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
#[cfg(any(test, feature = "mock"))]
use mockall::automock;
use tracing::*;
use url::Url;

use super::BuildLogError;
use crate::prelude::*;

// Fetchers never retry; a failed fetch is handed straight back to the caller.
#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait LogFetcher: Send + Sync {
    async fn fetch(&self, url: &Url, cancel: &CancellationToken) -> Result<Bytes, BuildLogError>;
}

pub struct HttpLogFetcher {
    client: reqwest::Client,
}

impl HttpLogFetcher {
    pub fn new(timeout: Option<Duration>) -> anyhow::Result<HttpLogFetcher> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(HttpLogFetcher { client: builder.build()? })
    }

    pub fn with_client(client: reqwest::Client) -> HttpLogFetcher {
        HttpLogFetcher { client }
    }

    async fn fetch_uncancelled(&self, url: &Url) -> Result<Bytes, BuildLogError> {
        let transport_err = |source: reqwest::Error| BuildLogError::Transport {
            url: url.to_string(),
            status: source.status().map(|s| s.as_u16()),
            source: Some(source),
        };

        let resp = self.client.get(url.clone()).send().await.map_err(transport_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(BuildLogError::Transport {
                url: url.to_string(),
                status: Some(status.as_u16()),
                source: None,
            });
        }

        resp.bytes().await.map_err(transport_err)
    }
}

#[async_trait]
impl LogFetcher for HttpLogFetcher {
    async fn fetch(&self, url: &Url, cancel: &CancellationToken) -> Result<Bytes, BuildLogError> {
        debug!("fetching logs from {url}");
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(BuildLogError::Cancelled(url.to_string())),
            res = self.fetch_uncancelled(url) => res,
        }
    }
}
