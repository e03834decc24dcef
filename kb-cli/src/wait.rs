use kb_core::errors::*;
use kb_core::k8s::{
    split_namespaced_name,
    wait_for_build_complete,
};
use kb_core::prelude::*;

use crate::cancel_on_ctrl_c;

#[derive(clap::Args, Debug)]
pub struct Args {
    #[arg(long_help = "build to wait for, as <namespace>/<name> or just <name>")]
    pub build: String,

    #[arg(
        short,
        long,
        env = DEFAULT_NAMESPACE_ENV_VAR,
        default_value = DEFAULT_BUILD_NAMESPACE,
        long_help = "namespace for builds given without one"
    )]
    pub namespace: String,

    #[arg(long, long_help = "give up waiting after this long, e.g. 10m")]
    pub timeout: Option<humantime::Duration>,
}

pub async fn cmd(args: &Args, client: kube::Client) -> EmptyResult {
    let (ns, name) = split_namespaced_name(&args.build, &args.namespace);
    println!("waiting for build {ns}/{name}...");

    let cancel = cancel_on_ctrl_c();
    let wait = wait_for_build_complete(client, &ns, &name, &cancel);
    match args.timeout {
        Some(timeout) => tokio::time::timeout(timeout.into(), wait)
            .await
            .with_context(|| format!("timed out waiting for build {ns}/{name}"))??,
        None => wait.await?,
    }

    println!("build {ns}/{name} complete");
    Ok(())
}
