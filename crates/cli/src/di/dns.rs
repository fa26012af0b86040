use proxydns_application::ports::{DnsClient, ManagedComponent};
use proxydns_application::services::ResolutionServer;
use proxydns_domain::Config;
use proxydns_infrastructure::dns::{ResolutionServerBuilder, UdpDatagramTransport};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub server: Arc<ResolutionServer>,
    pub client: Arc<dyn DnsClient>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing resolution server");

        let server = ResolutionServerBuilder::from_config(&config.dns)?
            .with_transport(Arc::new(UdpDatagramTransport::new()))
            .build()?;
        let server = Arc::new(server);

        Ok(Self {
            client: server.clone(),
            server,
        })
    }

    pub fn start(&self) -> anyhow::Result<()> {
        self.server.start()?;
        Ok(())
    }

    pub fn close(&self) -> anyhow::Result<()> {
        self.server.close()?;
        Ok(())
    }
}
