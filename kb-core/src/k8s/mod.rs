mod pod_ext;
mod registry;
mod util;
mod watch;

pub use registry::*;
pub use util::*;
pub use watch::*;

use crate::errors::*;
use crate::prelude::*;

err_impl! {KubernetesError,
    #[error("build failed: {0}")]
    BuildFailed(String),

    #[error("watch stream for build {0} closed unexpectedly")]
    WatchClosed(String),
}

pub trait KubeResourceExt {
    fn namespaced_name(&self) -> String;
}

pub trait PodExt {
    fn host(&self) -> Option<&str>;
    fn first_container_name(&self) -> Option<&str>;
}

#[cfg(test)]
pub mod tests;
