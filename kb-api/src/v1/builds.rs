use clockabilly::{DateTime, Utc};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub enum BuildPhase {
    #[default]
    Pending,
    Running,
    Complete,
    Failed,
    Error,
}

impl BuildPhase {
    // Once a build reaches one of these phases the build controller never moves it again
    pub fn is_terminal(&self) -> bool {
        matches!(self, BuildPhase::Complete | BuildPhase::Failed | BuildPhase::Error)
    }

    pub fn is_successful(&self) -> bool {
        *self == BuildPhase::Complete
    }
}

#[derive(Clone, CustomResource, Debug, Default, Deserialize, JsonSchema, Serialize)]
#[kube(group = "kubebuild.dev", version = "v1", kind = "Build", namespaced)]
#[kube(shortname = "bld", shortname = "blds")]
#[kube(status = "BuildStatus")]
#[kube(
    printcolumn = r#"{"name":"phase", "type":"string", "description":"build phase", "jsonPath":".status.phase"}"#,
    printcolumn = r#"{"name":"pod", "type":"string", "description":"pod running the build", "jsonPath":".spec.podName"}"#,
    printcolumn = r#"{"name":"start time", "type":"string", "description":"build start time", "jsonPath":".status.startTime"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct BuildSpec {
    // Required fields
    pub source_uri: String,
    pub image_tag: String,

    // Optional fields; the pod reference is filled in by the build controller once the
    // build has been scheduled
    pub pod_name: Option<String>,
    pub labels: Option<std::collections::BTreeMap<String, String>>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStatus {
    pub phase: BuildPhase,
    pub start_time: Option<DateTime<Utc>>,
    pub completion_time: Option<DateTime<Utc>>,
    pub message: Option<String>,
}

impl Build {
    pub fn phase(&self) -> BuildPhase {
        self.status.as_ref().map(|s| s.phase).unwrap_or_default()
    }
}
