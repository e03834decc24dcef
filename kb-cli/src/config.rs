use kb_core::buildlog::ParsePolicy;
use kb_core::config::BuildLogConfig;
use kb_core::errors::*;
use kb_core::prelude::*;
use url::Url;

#[derive(clap::Args, Debug, Default)]
pub struct ConfigArgs {
    #[arg(long, long_help = "base URL that node log requests are proxied through (e.g. from `kubectl proxy`)")]
    pub proxy_base: Option<Url>,

    #[arg(short, long, env = DEFAULT_NAMESPACE_ENV_VAR, long_help = "namespace for builds given without one")]
    pub namespace: Option<String>,

    #[arg(long, long_help = "how to handle log lines with no timestamp: skip or fail-fast")]
    pub parse_policy: Option<ParsePolicy>,

    #[arg(long, long_help = "give up fetching logs after this long, e.g. 30s")]
    pub fetch_timeout: Option<humantime::Duration>,
}

// Flags override whatever is in the config file; without a config file, --proxy-base is required
pub fn load_config(config_file: Option<&str>, args: &ConfigArgs) -> anyhow::Result<BuildLogConfig> {
    let mut config = match (config_file, &args.proxy_base) {
        (Some(path), _) => {
            BuildLogConfig::load(path).with_context(|| format!("could not load config file {path}"))?
        },
        (None, Some(proxy_base)) => BuildLogConfig::new(proxy_base.clone()),
        (None, None) => bail!("no proxy base configured; pass --proxy-base or --config"),
    };

    if let Some(proxy_base) = &args.proxy_base {
        config.proxy_base = proxy_base.clone();
    }
    if let Some(ns) = &args.namespace {
        config.default_namespace = ns.clone();
    }
    if let Some(policy) = args.parse_policy {
        config.parse_policy = policy;
    }
    if let Some(timeout) = args.fetch_timeout {
        config.fetch_timeout_seconds = Some(timeout.as_secs());
    }

    Ok(config)
}
