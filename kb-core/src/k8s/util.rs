use kube::api::Resource;

use super::*;

// Build identifiers are `namespace/name`; a bare name lives in the default namespace
pub fn split_namespaced_name(name: &str, default_namespace: &str) -> (String, String) {
    match name.split_once('/') {
        Some((namespace, name)) if !namespace.is_empty() => (namespace.into(), name.into()),
        Some((_, name)) => (default_namespace.into(), name.into()),
        None => (default_namespace.into(), name.into()),
    }
}

impl<T: Resource> KubeResourceExt for T {
    fn namespaced_name(&self) -> String {
        match self.namespace() {
            Some(ns) => format!("{}/{}", ns, self.name_any()),
            None => self.name_any(),
        }
    }
}
