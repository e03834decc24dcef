
use assertables::*;
use kb_testutils::*;
use mockall::predicate::*;

use super::*;
use crate::errors::*;
use crate::k8s::{
    MockBuildRegistry,
    MockPodRegistry,
};
use crate::prelude::*;

fn test_proxy_base() -> url::Url {
    url::Url::parse("https://apiserver.test:6443").unwrap()
}

fn expected_url() -> String {
    format!("https://apiserver.test:6443/proxy/{TEST_HOST}/containerLogs/{TEST_NAMESPACE}/{TEST_POD}/{TEST_CONTAINER}")
}

fn mock_registries(build: Option<Build>, pod: Option<corev1::Pod>) -> (MockBuildRegistry, MockPodRegistry) {
    let mut builds = MockBuildRegistry::new();
    builds
        .expect_get_build()
        .with(eq(TEST_NAMESPACE), eq(TEST_BUILD))
        .returning(move |_, _| Ok(build.clone()));

    let mut pods = MockPodRegistry::new();
    pods.expect_get_pod()
        .with(eq(TEST_NAMESPACE), eq(TEST_POD))
        .returning(move |_, _| Ok(pod.clone()));

    (builds, pods)
}

fn resolver_for(builds: MockBuildRegistry, pods: MockPodRegistry) -> LogLocationResolver {
    LogLocationResolver::new(Box::new(builds), Box::new(pods), test_proxy_base(), TEST_NAMESPACE)
}
