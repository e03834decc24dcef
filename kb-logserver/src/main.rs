mod errors;

use clap::Parser;
use kb_core::buildlog::BuildLogStorage;
use kb_core::config::BuildLogConfig;
use kb_core::logging;
use kb_core::prelude::*;
use kube::Client;
use rocket::fairing::AdHoc;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::State;
use tracing::*;

use crate::errors::BuildLogResponseError;

#[derive(Parser, Debug)]
struct Options {
    #[arg(short, long, env = CONFIG_PATH_ENV_VAR)]
    config_file: String,

    #[arg(long)]
    server_port: u16,

    #[arg(short, long, default_value = "info")]
    verbosity: String,
}

#[rocket::get("/buildlogs/<namespace>/<name>")]
async fn get_build_log(
    namespace: &str,
    name: &str,
    storage: &State<BuildLogStorage>,
    cancel: &State<CancellationToken>,
) -> Result<Json<BuildLog>, BuildLogResponseError> {
    let build_id = format!("{namespace}/{name}");
    info!("logs requested for build {build_id}");
    Ok(Json(storage.get(&build_id, cancel).await?))
}

#[rocket::get("/buildlogs/<namespace>/<name>/location")]
async fn get_build_log_location(
    namespace: &str,
    name: &str,
    storage: &State<BuildLogStorage>,
) -> Result<Redirect, BuildLogResponseError> {
    let build_id = format!("{namespace}/{name}");
    let location = storage.resource_location(&build_id).await?;
    debug!("redirecting to {location} for build {build_id}");
    Ok(Redirect::temporary(location))
}

#[rocket::get("/buildlogs")]
fn list_all_build_logs() -> BuildLogResponseError {
    BuildLogResponseError::read_only()
}

#[rocket::get("/buildlogs/<_>")]
fn list_build_logs() -> BuildLogResponseError {
    BuildLogResponseError::read_only()
}

#[rocket::post("/buildlogs")]
fn create_build_log_without_namespace() -> BuildLogResponseError {
    BuildLogResponseError::read_only()
}

#[rocket::post("/buildlogs/<_>")]
fn create_build_log() -> BuildLogResponseError {
    BuildLogResponseError::read_only()
}

#[rocket::put("/buildlogs/<_>/<_>")]
fn update_build_log() -> BuildLogResponseError {
    BuildLogResponseError::read_only()
}

#[rocket::delete("/buildlogs/<_>/<_>")]
fn delete_build_log() -> BuildLogResponseError {
    BuildLogResponseError::read_only()
}

fn build_server(
    rkt_config: &rocket::Config,
    storage: BuildLogStorage,
    cancel: CancellationToken,
) -> rocket::Rocket<rocket::Build> {
    let shutdown_token = cancel.clone();
    rocket::custom(rkt_config)
        .mount(
            "/",
            rocket::routes![
                get_build_log,
                get_build_log_location,
                list_all_build_logs,
                list_build_logs,
                create_build_log_without_namespace,
                create_build_log,
                update_build_log,
                delete_build_log,
            ],
        )
        .manage(storage)
        .manage(cancel)
        .attach(AdHoc::on_shutdown("cancel in-flight log fetches", |_| {
            Box::pin(async move { shutdown_token.cancel() })
        }))
}

#[instrument(ret, err)]
async fn run(args: Options) -> EmptyResult {
    let config = BuildLogConfig::load(&args.config_file)?;
    let client = Client::try_default().await?;
    let storage = BuildLogStorage::from_config(client, &config)?;

    let rkt_config = rocket::Config { port: args.server_port, ..Default::default() };
    build_server(&rkt_config, storage, CancellationToken::new()).launch().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> EmptyResult {
    let args = Options::parse();
    logging::setup(&args.verbosity)?;
    run(args).await
}

#[cfg(test)]
mod tests;
