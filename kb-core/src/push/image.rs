use std::process::Stdio;

use async_trait::async_trait;
#[cfg(any(test, feature = "mock"))]
use mockall::automock;
use serde::{
    Deserialize,
    Serialize,
};
use tokio::io::{
    AsyncWriteExt,
    BufWriter,
};
use tokio::process::{
    ChildStdin,
    Command,
};
use tracing::*;

use super::retry::*;
use crate::errors::*;
use crate::prelude::*;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushAuth {
    pub username: String,
    pub password: String,
    pub server_address: Option<String>,
}

#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait ImagePusher: Send + Sync {
    async fn push<'a>(&self, repository: &str, tag: &str, auth: Option<&'a PushAuth>) -> EmptyResult;
}

/// Splits an image reference into its repository and tag.  Any `@digest` suffix is dropped, and
/// a trailing `:xyz` only counts as a tag if it contains no `/` (otherwise it's a registry port).
pub fn parse_repository_tag(name: &str) -> (String, String) {
    let name = match name.split_once('@') {
        Some((repo, _digest)) => repo,
        None => name,
    };

    match name.rsplit_once(':') {
        Some((repo, tag)) if !tag.contains('/') => (repo.into(), tag.into()),
        _ => (name.into(), String::new()),
    }
}

async fn write_password(stdin: ChildStdin, password: &str) -> std::io::Result<()> {
    let mut stdin = BufWriter::new(stdin);
    stdin.write_all(password.as_bytes()).await?;
    stdin.flush().await
}

pub struct DockerCliPusher {
    binary: String,
}

impl DockerCliPusher {
    pub fn new(binary: &str) -> DockerCliPusher {
        DockerCliPusher { binary: binary.into() }
    }

    async fn login(&self, auth: &PushAuth) -> EmptyResult {
        let mut cmd = Command::new(&self.binary);
        cmd.args(["login", "--username", &auth.username, "--password-stdin"]);
        if let Some(server) = &auth.server_address {
            cmd.arg(server);
        }

        debug!("running `{} login` for user {}", self.binary, auth.username);
        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("could not run {}", self.binary))?;

        // If login exits without reading its stdin, the exit status and stderr below say why
        let stdin = child.stdin.take().ok_or(anyhow!("could not take stdin"))?;
        match write_password(stdin, &auth.password).await {
            Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => {
                debug!("{} login exited before reading the password", self.binary)
            },
            res => res.context("writing password to docker login")?,
        }

        let output = child
            .wait_with_output()
            .await
            .with_context(|| format!("waiting for {} login", self.binary))?;
        if !output.status.success() {
            bail!("{} login failed: {}", self.binary, String::from_utf8_lossy(&output.stderr).trim());
        }
        Ok(())
    }
}

impl Default for DockerCliPusher {
    fn default() -> Self {
        DockerCliPusher::new(DOCKER_BINARY)
    }
}

#[async_trait]
impl ImagePusher for DockerCliPusher {
    async fn push<'a>(&self, repository: &str, tag: &str, auth: Option<&'a PushAuth>) -> EmptyResult {
        if let Some(a) = auth {
            self.login(a).await?;
        }

        let image = if tag.is_empty() { repository.to_string() } else { format!("{repository}:{tag}") };
        let output = Command::new(&self.binary)
            .args(["push", &image])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("could not run {}", self.binary))?;
        debug!("push output: {:?}", output);

        if !output.status.success() {
            bail!("{} push {image} failed: {}", self.binary, String::from_utf8_lossy(&output.stderr).trim());
        }
        Ok(())
    }
}

#[instrument(skip_all, fields(image = name))]
pub async fn push_image(
    pusher: &dyn ImagePusher,
    name: &str,
    auth: Option<&PushAuth>,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> Result<(), PushError> {
    let (repository, tag) = parse_repository_tag(name);
    let tag = if tag.is_empty() { DEFAULT_IMAGE_TAG } else { tag.as_str() };
    let repository = repository.as_str();

    info!("pushing image {repository}:{tag}");
    push_with_retry(policy, cancel, || pusher.push(repository, tag, auth)).await?;
    info!("successfully pushed {repository}:{tag}");
    Ok(())
}
