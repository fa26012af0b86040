use clap::Parser;
use proxydns_application::ports::DnsClient;
use proxydns_domain::config::CliOverrides;
use std::process::ExitCode;
use tracing::{error, info};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "proxydns")]
#[command(version)]
#[command(about = "proxydns - resolve names through static hosts and an ordered server chain")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Per-server query timeout in seconds
    #[arg(short = 't', long, value_name = "SECS")]
    query_timeout: Option<u64>,

    /// Domains to resolve
    #[arg(required = true, value_name = "DOMAIN")]
    domains: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        query_timeout: cli.query_timeout,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting proxydns v{}", env!("CARGO_PKG_VERSION"));

    let services = di::DnsServices::new(&config)?;
    services.start()?;

    let lookups = cli.domains.iter().map(|domain| {
        let client = services.client.clone();
        async move { (domain, client.lookup_ip(domain).await) }
    });

    let mut failed = 0usize;
    for (domain, result) in futures::future::join_all(lookups).await {
        match result {
            Ok(addresses) => {
                let joined = addresses
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                println!("{}\t{}", domain, joined);
            }
            Err(e) => {
                failed += 1;
                error!(domain = %domain, error = %e, cause = ?e.last_error().map(ToString::to_string), "Lookup failed");
            }
        }
    }

    services.close()?;

    if failed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
