use kb_core::config::BuildLogConfig;
use kb_core::errors::*;
use kb_core::prelude::*;
use kb_core::push::{
    push_image,
    DockerCliPusher,
    PushAuth,
    RetryPolicy,
};

use crate::cancel_on_ctrl_c;

#[derive(clap::Args, Debug)]
pub struct Args {
    #[arg(long_help = "image to push, e.g. registry.example:5000/apps/app:v1")]
    pub image: String,

    #[arg(long, long_help = "number of times to retry a failed push [default: 2]")]
    pub retries: Option<u32>,

    #[arg(long, long_help = "time to wait between push attempts, e.g. 10s [default: 10s]")]
    pub retry_delay: Option<humantime::Duration>,

    #[arg(short, long, requires = "password", long_help = "registry username")]
    pub username: Option<String>,

    #[arg(long, env = PUSH_PASSWORD_ENV_VAR, hide_env_values = true, long_help = "registry password")]
    pub password: Option<String>,

    #[arg(long, long_help = "registry to log in to; defaults to the one docker picks for the image")]
    pub registry: Option<String>,

    #[arg(long, default_value = DOCKER_BINARY, long_help = "docker (or compatible) binary used to push")]
    pub docker_binary: String,
}

// Flags override the config file's push settings, which override the built-in defaults
pub fn retry_policy(args: &Args, config_file: Option<&str>) -> anyhow::Result<RetryPolicy> {
    let base = match config_file {
        Some(path) => {
            let config = BuildLogConfig::load(path).with_context(|| format!("could not load config file {path}"))?;
            RetryPolicy::from(&config.push)
        },
        None => RetryPolicy::default(),
    };

    Ok(RetryPolicy::new(
        args.retries.unwrap_or(base.max_retries),
        args.retry_delay.map_or(base.delay, Into::into),
    ))
}

pub fn push_auth(args: &Args) -> Option<PushAuth> {
    let username = args.username.as_ref()?;
    Some(PushAuth {
        username: username.clone(),
        password: args.password.clone().unwrap_or_default(),
        server_address: args.registry.clone(),
    })
}

pub async fn cmd(args: &Args, config_file: Option<&str>) -> EmptyResult {
    let policy = retry_policy(args, config_file)?;
    let pusher = DockerCliPusher::new(&args.docker_binary);

    println!("pushing {}...", args.image);
    push_image(&pusher, &args.image, push_auth(args).as_ref(), &policy, &cancel_on_ctrl_c()).await?;
    println!("pushed {}", args.image);
    Ok(())
}
