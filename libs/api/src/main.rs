use std::net::{Ipv4Addr, SocketAddr};

use api::{
    config::{Config, Secrets},
    connect_image_store, serve, ApiState,
};
use repository::init_repository;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let secrets: Secrets = util::load_env()?;
    let config: Config = util::load_config("Config.toml")?;

    let repository =
        init_repository(&secrets.database_url, &config.database).await?;
    let images = connect_image_store(
        &config.storage,
        secrets.aws_access_key_id,
        secrets.aws_secret_access_key,
    )
    .await;
    let state = ApiState::new(repository, images, secrets.acceptable_api_key);

    let router = serve(state, &config.cors)?;

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.server.port));
    let listener = TcpListener::bind(&address).await?;
    info!(task = "listen", address = %address);

    Ok(axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?)
}
