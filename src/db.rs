use anyhow::Context;
use tokio_postgres::Client;

/// Connect to the database named by DB_URL and drive the connection task in
/// the background. One connection serves the whole run.
pub async fn db() -> anyhow::Result<Client> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let url = std::env::var("DB_URL").context("DB_URL must be set")?;
    let (client, connection) = tokio_postgres::connect(&url, tls)
        .await
        .context("database connection failed")?;
    tokio::spawn(connection);
    Ok(client)
}
