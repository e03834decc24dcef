use bytes::Bytes;
use kb_core::buildlog::{
    BuildLogError,
    LogLocationResolver,
    LogParser,
    MockLogFetcher,
    ParsePolicy,
};
use kb_core::k8s::{
    MockBuildRegistry,
    MockPodRegistry,
};
use rocket::http::Status;
use rocket::local::asynchronous::Client as LocalClient;

use super::*;
use crate::errors::READ_ONLY_MSG;

const LOCATION: &str = "https://apiserver.test:6443/proxy/node-1/containerLogs/test-builds/the-build-pod/sti-build";

fn storage(
    build: Option<Build>,
    pod: Option<corev1::Pod>,
    fetch_result: fn() -> Result<Bytes, BuildLogError>,
) -> BuildLogStorage {
    let mut builds = MockBuildRegistry::new();
    builds.expect_get_build().returning(move |_, _| Ok(build.clone()));
    let mut pods = MockPodRegistry::new();
    pods.expect_get_pod().returning(move |_, _| Ok(pod.clone()));
    let mut fetcher = MockLogFetcher::new();
    fetcher.expect_fetch().returning(move |_, _| fetch_result());

    let proxy_base = url::Url::parse("https://apiserver.test:6443").unwrap();
    let resolver = LogLocationResolver::new(Box::new(builds), Box::new(pods), proxy_base, TEST_NAMESPACE);
    BuildLogStorage::new(resolver, Box::new(fetcher), LogParser::new(ParsePolicy::FailFast))
}

fn good_log() -> Result<Bytes, BuildLogError> {
    Ok(Bytes::from_static(TEST_LOG.as_bytes()))
}

async fn client_for(storage: BuildLogStorage) -> LocalClient {
    let rkt_config = rocket::Config::debug_default();
    LocalClient::tracked(build_server(&rkt_config, storage, CancellationToken::new()))
        .await
        .unwrap()
}

#[rstest]
#[tokio::test]
async fn test_get_build_log(test_build: Build, test_build_pod: corev1::Pod) {
    let client = client_for(storage(Some(test_build), Some(test_build_pod), good_log)).await;

    let resp = client.get("/buildlogs/test-builds/the-build").dispatch().await;
    assert_eq!(resp.status(), Status::Ok);

    let build_log: BuildLog = resp.into_json().await.unwrap();
    assert_eq!(build_log.build, TEST_BUILD_ID);
    assert_eq!(build_log.items.len(), 3);
    assert_eq!(build_log.items[0], LogItem::new("2015-03-12T18:42:11.123Z", "Step 1 : FROM centos"));
}

#[rstest]
#[tokio::test]
async fn test_get_build_log_location(test_build: Build, test_build_pod: corev1::Pod) {
    let client = client_for(storage(Some(test_build), Some(test_build_pod), good_log)).await;

    let resp = client.get("/buildlogs/test-builds/the-build/location").dispatch().await;
    assert_eq!(resp.status(), Status::TemporaryRedirect);
    assert_eq!(resp.headers().get_one("Location"), Some(LOCATION));
}

#[rstest]
#[tokio::test]
async fn test_get_build_log_build_not_found() {
    let client = client_for(storage(None, None, good_log)).await;

    let resp = client.get("/buildlogs/test-builds/the-build").dispatch().await;
    assert_eq!(resp.status(), Status::NotFound);
    assert!(resp.into_string().await.unwrap().contains("build test-builds/the-build not found"));
}

#[rstest]
#[tokio::test]
async fn test_get_build_log_pod_not_found(test_build: Build) {
    let client = client_for(storage(Some(test_build), None, good_log)).await;

    let resp = client.get("/buildlogs/test-builds/the-build/location").dispatch().await;
    assert_eq!(resp.status(), Status::NotFound);
}

#[rstest]
#[tokio::test]
async fn test_get_build_log_unscheduled_pod(test_build: Build, #[with(None)] test_build_pod: corev1::Pod) {
    let client = client_for(storage(Some(test_build), Some(test_build_pod), good_log)).await;

    let resp = client.get("/buildlogs/test-builds/the-build").dispatch().await;
    assert_eq!(resp.status(), Status::Conflict);
}

#[rstest]
#[tokio::test]
async fn test_get_build_log_upstream_error(test_build: Build, test_build_pod: corev1::Pod) {
    fn bad_gateway() -> Result<Bytes, BuildLogError> {
        Err(BuildLogError::Transport { url: LOCATION.into(), status: Some(500), source: None })
    }
    let client = client_for(storage(Some(test_build), Some(test_build_pod), bad_gateway)).await;

    let resp = client.get("/buildlogs/test-builds/the-build").dispatch().await;
    assert_eq!(resp.status(), Status::BadGateway);
    let body = resp.into_string().await.unwrap();
    assert!(body.starts_with("fetching logs for build test-builds/the-build: "));
    assert!(body.contains("(status 500)"));
}

#[rstest]
#[tokio::test]
async fn test_get_build_log_parse_error(test_build: Build, test_build_pod: corev1::Pod) {
    fn garbage() -> Result<Bytes, BuildLogError> {
        Ok(Bytes::from_static(b"this is not a build log\n"))
    }
    let client = client_for(storage(Some(test_build), Some(test_build_pod), garbage)).await;

    let resp = client.get("/buildlogs/test-builds/the-build").dispatch().await;
    assert_eq!(resp.status(), Status::InternalServerError);
}

#[rstest]
#[case::list_all("GET", "/buildlogs")]
#[case::list("GET", "/buildlogs/test-builds")]
#[case::create_without_namespace("POST", "/buildlogs")]
#[case::create("POST", "/buildlogs/test-builds")]
#[case::update("PUT", "/buildlogs/test-builds/the-build")]
#[case::delete("DELETE", "/buildlogs/test-builds/the-build")]
#[tokio::test]
async fn test_build_log_is_read_only(#[case] method: &str, #[case] path: &'static str) {
    let client = client_for(storage(None, None, good_log)).await;

    let req = match method {
        "GET" => client.get(path),
        "POST" => client.post(path),
        "PUT" => client.put(path),
        "DELETE" => client.delete(path),
        _ => unreachable!(),
    };
    let resp = req.dispatch().await;
    assert_eq!(resp.status(), Status::MethodNotAllowed);
    assert_eq!(resp.into_string().await.unwrap(), READ_ONLY_MSG);
}
