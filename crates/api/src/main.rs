use idadmin_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    idadmin_observability::init_with(config.log_format);

    if config.insecure_default_secret {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
    }

    let app = idadmin_api::app::build_from_config(&config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!(
        super_admin = %config.super_admin,
        "listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;
    Ok(())
}
