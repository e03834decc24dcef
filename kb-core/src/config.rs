use std::fs::File;
use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};
use url::Url;

use crate::buildlog::ParsePolicy;
use crate::constants::*;
use crate::push::RetryPolicy;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushRetryConfig {
    #[serde(default = "default_push_retries")]
    pub retries: u32,

    #[serde(default = "default_push_delay_seconds")]
    pub delay_seconds: u64,
}

impl Default for PushRetryConfig {
    fn default() -> Self {
        PushRetryConfig {
            retries: DEFAULT_PUSH_RETRY_COUNT,
            delay_seconds: DEFAULT_PUSH_RETRY_DELAY_SECONDS,
        }
    }
}

impl From<&PushRetryConfig> for RetryPolicy {
    fn from(config: &PushRetryConfig) -> Self {
        RetryPolicy::new(config.retries, Duration::from_secs(config.delay_seconds))
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildLogConfig {
    // The API server address that node log requests are proxied through; has no default
    pub proxy_base: Url,

    #[serde(default = "default_namespace")]
    pub default_namespace: String,

    #[serde(default)]
    pub parse_policy: ParsePolicy,

    pub fetch_timeout_seconds: Option<u64>,

    #[serde(default)]
    pub push: PushRetryConfig,
}

impl BuildLogConfig {
    pub fn new(proxy_base: Url) -> BuildLogConfig {
        BuildLogConfig {
            proxy_base,
            default_namespace: default_namespace(),
            parse_policy: Default::default(),
            fetch_timeout_seconds: None,
            push: Default::default(),
        }
    }

    pub fn load(filename: &str) -> anyhow::Result<BuildLogConfig> {
        Ok(serde_yaml::from_reader(File::open(filename)?)?)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_seconds.map(Duration::from_secs)
    }
}

fn default_namespace() -> String {
    DEFAULT_BUILD_NAMESPACE.into()
}

fn default_push_retries() -> u32 {
    DEFAULT_PUSH_RETRY_COUNT
}

fn default_push_delay_seconds() -> u64 {
    DEFAULT_PUSH_RETRY_DELAY_SECONDS
}
