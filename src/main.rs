use swapi_proxy::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swapi_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match std::env::var("SWAPI_PROXY_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading configuration from {}", path);
            ProxyConfig::from_yaml_file(&path)?
        }
        Err(_) => ProxyConfig::default_config(),
    };

    // Hosting platforms hand out the port through the environment
    if let Ok(port) = std::env::var("PORT") {
        let host = config
            .server
            .bind
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.server.bind = format!("{}:{}", host, port);
    }

    tracing::info!(
        upstream = %config.upstream.base_url,
        timeout_secs = config.upstream.timeout_secs,
        "Starting SWAPI proxy"
    );

    let bind = config.server.bind.clone();
    ServerBuilder::new(config).serve(&bind).await
}
