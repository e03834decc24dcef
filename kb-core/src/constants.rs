// Env vars
pub const CONFIG_PATH_ENV_VAR: &str = "KUBEBUILD_CONFIG";
pub const DEFAULT_NAMESPACE_ENV_VAR: &str = "KUBEBUILD_NAMESPACE";
pub const PUSH_PASSWORD_ENV_VAR: &str = "KUBEBUILD_PUSH_PASSWORD";

// Node log proxy path layout: <proxy base>/proxy/<host>/containerLogs/<ns>/<pod>/<container>
pub const PROXY_PATH_SEGMENT: &str = "proxy";
pub const CONTAINER_LOGS_PATH_SEGMENT: &str = "containerLogs";

// Defaults
pub const DEFAULT_BUILD_NAMESPACE: &str = "default";
pub const DEFAULT_PUSH_RETRY_COUNT: u32 = 2;
pub const DEFAULT_PUSH_RETRY_DELAY_SECONDS: u64 = 10;
pub const DEFAULT_IMAGE_TAG: &str = "latest";
pub const DOCKER_BINARY: &str = "docker";
