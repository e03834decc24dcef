use tracing::*;
use url::Url;

use super::BuildLogError;
use crate::errors::*;
use crate::k8s::{
    split_namespaced_name,
    BuildRegistry,
    PodExt,
    PodRegistry,
};
use crate::prelude::*;

/// Where the logs for a single build container can be read from.  Recomputed on every request and
/// never cached.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogLocator {
    pub host: String,
    pub namespace: String,
    pub pod: String,
    pub container: String,
    pub url: Url,
}

impl LogLocator {
    pub fn new(
        proxy_base: &Url,
        host: &str,
        namespace: &str,
        pod: &str,
        container: &str,
    ) -> anyhow::Result<LogLocator> {
        let mut url = proxy_base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow!("proxy base {proxy_base} cannot be used as a base URL"))?;
            segments
                .pop_if_empty()
                .extend([PROXY_PATH_SEGMENT, host, CONTAINER_LOGS_PATH_SEGMENT, namespace, pod, container]);
        }

        Ok(LogLocator {
            host: host.into(),
            namespace: namespace.into(),
            pod: pod.into(),
            container: container.into(),
            url,
        })
    }
}

pub struct LogLocationResolver {
    builds: Box<dyn BuildRegistry>,
    pods: Box<dyn PodRegistry>,
    proxy_base: Url,
    default_namespace: String,
}

impl LogLocationResolver {
    pub fn new(
        builds: Box<dyn BuildRegistry>,
        pods: Box<dyn PodRegistry>,
        proxy_base: Url,
        default_namespace: &str,
    ) -> LogLocationResolver {
        LogLocationResolver {
            builds,
            pods,
            proxy_base,
            default_namespace: default_namespace.into(),
        }
    }

    pub fn split_build_id(&self, build_id: &str) -> (String, String) {
        split_namespaced_name(build_id, &self.default_namespace)
    }

    // build -> pod -> (host, first container).  None of the objects we read here are modified.
    pub async fn resolve(&self, build_id: &str) -> anyhow::Result<LogLocator> {
        let (ns, build_name) = self.split_build_id(build_id);

        let build = self
            .builds
            .get_build(&ns, &build_name)
            .await
            .with_context(|| format!("could not look up build {ns}/{build_name}"))?
            .ok_or_else(|| BuildLogError::build_not_found(&format!("{ns}/{build_name}")))?;

        // A build that hasn't been scheduled yet has no pod, which from our point of view is
        // the same as its pod having been garbage-collected
        let Some(pod_name) = build.spec.pod_name.as_deref().filter(|p| !p.is_empty()) else {
            bail!(BuildLogError::pod_not_found(&format!("for build {ns}/{build_name}")));
        };

        let pod = self
            .pods
            .get_pod(&ns, pod_name)
            .await
            .with_context(|| format!("could not look up pod {ns}/{pod_name}"))?
            .ok_or_else(|| BuildLogError::pod_not_found(&format!("{ns}/{pod_name}")))?;

        let pod_id = format!("{ns}/{pod_name}");
        let container = pod
            .first_container_name()
            .ok_or_else(|| BuildLogError::invalid_state(&pod_id, "pod has no containers"))?;
        let host = pod
            .host()
            .ok_or_else(|| BuildLogError::invalid_state(&pod_id, "pod has not been scheduled to a node"))?;

        let locator = LogLocator::new(&self.proxy_base, host, &ns, pod_name, container)?;
        debug!("logs for build {ns}/{build_name} are at {}", locator.url);
        Ok(locator)
    }
}
