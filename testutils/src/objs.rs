use k8s_openapi::api::core::v1 as corev1;
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use kb_api::v1::*;
use rstest::*;

use crate::constants::*;

#[fixture]
pub fn test_build(#[default(BuildPhase::Running)] phase: BuildPhase) -> Build {
    let mut build = Build::new(
        TEST_BUILD,
        BuildSpec {
            source_uri: "https://git.test/apps/the-app.git".into(),
            image_tag: TEST_IMAGE_TAG.into(),
            pod_name: Some(TEST_POD.into()),
            ..Default::default()
        },
    );
    build.metadata.namespace = Some(TEST_NAMESPACE.into());
    build.status = Some(BuildStatus { phase, ..Default::default() });
    build
}

#[fixture]
pub fn test_build_pod(#[default(Some(TEST_HOST))] host: Option<&str>) -> corev1::Pod {
    corev1::Pod {
        metadata: metav1::ObjectMeta {
            namespace: Some(TEST_NAMESPACE.into()),
            name: Some(TEST_POD.into()),
            ..Default::default()
        },
        spec: Some(corev1::PodSpec {
            node_name: host.map(|h| h.into()),
            containers: vec![
                corev1::Container { name: TEST_CONTAINER.into(), ..Default::default() },
                corev1::Container { name: "sidecar".into(), ..Default::default() },
            ],
            ..Default::default()
        }),
        status: Some(corev1::PodStatus { phase: Some("Running".into()), ..Default::default() }),
    }
}

pub fn container_logs_path(host: &str, pod: &str, container: &str) -> String {
    format!("/proxy/{host}/containerLogs/{TEST_NAMESPACE}/{pod}/{container}")
}

pub fn build_path(name: &str) -> String {
    format!("/apis/kubebuild.dev/v1/namespaces/{TEST_NAMESPACE}/builds/{name}")
}

pub fn pod_path(name: &str) -> String {
    format!("/api/v1/namespaces/{TEST_NAMESPACE}/pods/{name}")
}
