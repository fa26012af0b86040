use anyhow::Context;
use proxydns_domain::config::CliOverrides;
use proxydns_domain::Config;

pub fn load_config(path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    Config::load(path, cli_overrides).context("Failed to load configuration")
}
