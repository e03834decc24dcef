mod config;
mod crd;
mod logs;
mod push;
mod wait;

use clap::{
    crate_version,
    Parser,
    Subcommand,
};
use kb_core::logging;
use kb_core::prelude::*;
use tracing::*;

#[derive(Parser)]
#[command(about = "command-line app for kubebuild builds", version, propagate_version = true)]
struct KbCommandRoot {
    #[command(subcommand)]
    subcommand: KbSubcommand,

    #[arg(short, long, global = true, env = CONFIG_PATH_ENV_VAR, long_help = "path to a kubebuild config file")]
    config: Option<String>,

    #[arg(short, long, global = true, default_value = "warn")]
    verbosity: String,
}

#[derive(Subcommand)]
enum KbSubcommand {
    #[command(about = "print kubebuild CRDs")]
    Crd,

    #[command(about = "print the log URL for a build", visible_alias = "loc")]
    Location(logs::Args),

    #[command(about = "print the timestamped logs for a build", visible_alias = "log")]
    Logs(logs::Args),

    #[command(about = "push an image to a registry, retrying on failure")]
    Push(push::Args),

    #[command(about = "kubebuild version")]
    Version,

    #[command(about = "wait for a build to finish")]
    Wait(wait::Args),
}

// The returned token is cancelled on Ctrl-C so that in-flight fetches and retry delays stop early
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling");
            token.cancel();
        }
    });
    cancel
}

#[tokio::main]
async fn main() -> EmptyResult {
    let args = KbCommandRoot::parse();
    logging::setup_for_cli(&args.verbosity)?;

    // Only the subcommands that talk to the apiserver construct a kube client
    let config_file = args.config.as_deref();
    match &args.subcommand {
        KbSubcommand::Crd => crd::cmd(),
        KbSubcommand::Location(args) => {
            let client = kube::Client::try_default().await?;
            logs::location_cmd(args, config_file, client).await
        },
        KbSubcommand::Logs(args) => {
            let client = kube::Client::try_default().await?;
            logs::cmd(args, config_file, client).await
        },
        KbSubcommand::Push(args) => push::cmd(args, config_file).await,
        KbSubcommand::Version => {
            println!("kbctl {}", crate_version!());
            Ok(())
        },
        KbSubcommand::Wait(args) => {
            let client = kube::Client::try_default().await?;
            wait::cmd(args, client).await
        },
    }
}

#[cfg(test)]
mod tests;
