use futures::{
    StreamExt,
    TryStreamExt,
};
use kube::runtime::WatchStreamExt;
use kube::runtime::watcher::{
    self,
    watcher,
};
use tracing::*;

use super::*;

// Returns Some(result) once the build has reached a terminal phase, and None if we need to
// keep waiting.
pub fn check_build_complete(build: &Build) -> Option<EmptyResult> {
    let phase = build.phase();
    match phase {
        BuildPhase::Complete => Some(Ok(())),
        BuildPhase::Failed | BuildPhase::Error => {
            let msg = build
                .status
                .as_ref()
                .and_then(|s| s.message.clone())
                .unwrap_or_else(|| format!("phase {phase:?}"));
            Some(Err(KubernetesError::build_failed(&format!("{} ({msg})", build.namespaced_name()))))
        },
        BuildPhase::Pending | BuildPhase::Running => None,
    }
}

pub async fn wait_for_build_complete(
    client: kube::Client,
    namespace: &str,
    name: &str,
    cancel: &CancellationToken,
) -> EmptyResult {
    info!("waiting for build {namespace}/{name}...");
    let build_api = kube::Api::<Build>::namespaced(client, namespace);
    let config = watcher::Config::default().fields(&format!("metadata.name={name}"));
    let mut build_stream = watcher(build_api, config).default_backoff().applied_objects().boxed();

    loop {
        let maybe_build = tokio::select! {
            biased;
            _ = cancel.cancelled() => bail!("cancelled while waiting for build {namespace}/{name}"),
            res = build_stream.try_next() => res?,
        };

        let Some(build) = maybe_build else {
            bail!(KubernetesError::watch_closed(&format!("{namespace}/{name}")));
        };

        // The field selector should already filter these out
        if build.name_any() != name {
            continue;
        }

        info!("build {namespace}/{name} phase is now {:?}", build.phase());
        if let Some(res) = check_build_complete(&build) {
            return res;
        }
    }
}
