#![cfg_attr(coverage, feature(coverage_attribute))]
pub mod buildlog;
pub mod config;
pub mod constants;
pub mod errors;
pub mod k8s;
pub mod logging;
pub mod push;

pub mod prelude {
    pub use k8s_openapi::api::core::v1 as corev1;
    pub use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
    pub use kb_api::v1::{
        Build,
        BuildLog,
        BuildPhase,
        LogItem,
    };
    pub use kube::{
        CustomResourceExt,
        ResourceExt,
    };
    pub use tokio_util::sync::CancellationToken;

    pub use crate::constants::*;
    pub use crate::errors::EmptyResult;
    pub use crate::k8s::KubeResourceExt;
}
