use std::io::Write;

use kb_core::buildlog::BuildLogStorage;
use kb_core::prelude::*;
use tracing::*;

use crate::cancel_on_ctrl_c;
use crate::config::{
    load_config,
    ConfigArgs,
};

#[derive(clap::Args, Debug)]
pub struct Args {
    #[arg(long_help = "build to look up, as <namespace>/<name> or just <name>")]
    pub build: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn write_build_log(out: &mut impl Write, build_log: &BuildLog) -> EmptyResult {
    for item in &build_log.items {
        if item.log.is_empty() {
            writeln!(out, "{}", item.timestamp)?;
        } else {
            writeln!(out, "{} {}", item.timestamp, item.log)?;
        }
    }
    Ok(())
}

pub async fn cmd(args: &Args, config_file: Option<&str>, client: kube::Client) -> EmptyResult {
    let config = load_config(config_file, &args.config)?;
    let storage = BuildLogStorage::from_config(client, &config)?;

    let build_log = storage.get(&args.build, &cancel_on_ctrl_c()).await?;
    if build_log.skipped_lines > 0 {
        warn!("{} log lines without a timestamp were skipped", build_log.skipped_lines);
    }
    write_build_log(&mut std::io::stdout().lock(), &build_log)
}

pub async fn location_cmd(args: &Args, config_file: Option<&str>, client: kube::Client) -> EmptyResult {
    let config = load_config(config_file, &args.config)?;
    let storage = BuildLogStorage::from_config(client, &config)?;
    println!("{}", storage.resource_location(&args.build).await?);
    Ok(())
}
