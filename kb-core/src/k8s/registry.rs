use async_trait::async_trait;
#[cfg(any(test, feature = "mock"))]
use mockall::automock;
use tracing::*;

use crate::prelude::*;

// The build and pod registries are owned by the API server; we only ever read from them.
// Both lookups return Ok(None) when the object doesn't exist so that callers can tell
// "not found" apart from "couldn't ask".

#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait BuildRegistry: Send + Sync {
    async fn get_build(&self, namespace: &str, name: &str) -> anyhow::Result<Option<Build>>;
}

#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait PodRegistry: Send + Sync {
    async fn get_pod(&self, namespace: &str, name: &str) -> anyhow::Result<Option<corev1::Pod>>;
}

#[derive(Clone)]
pub struct KubeRegistry {
    client: kube::Client,
}

impl KubeRegistry {
    pub fn new(client: kube::Client) -> KubeRegistry {
        KubeRegistry { client }
    }
}

#[async_trait]
impl BuildRegistry for KubeRegistry {
    async fn get_build(&self, namespace: &str, name: &str) -> anyhow::Result<Option<Build>> {
        debug!("looking up build {namespace}/{name}");
        let build_api = kube::Api::<Build>::namespaced(self.client.clone(), namespace);
        Ok(build_api.get_opt(name).await?)
    }
}

#[async_trait]
impl PodRegistry for KubeRegistry {
    async fn get_pod(&self, namespace: &str, name: &str) -> anyhow::Result<Option<corev1::Pod>> {
        debug!("looking up pod {namespace}/{name}");
        let pod_api = kube::Api::<corev1::Pod>::namespaced(self.client.clone(), namespace);
        Ok(pod_api.get_opt(name).await?)
    }
}
