use super::*;

// Builds only ever run in a single container, so the first container in the spec is
// the one we want logs from.
impl PodExt for corev1::Pod {
    fn host(&self) -> Option<&str> {
        self.spec.as_ref()?.node_name.as_deref().filter(|h| !h.is_empty())
    }

    fn first_container_name(&self) -> Option<&str> {
        self.spec.as_ref()?.containers.first().map(|c| c.name.as_str())
    }
}
