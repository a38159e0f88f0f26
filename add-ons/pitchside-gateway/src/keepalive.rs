//! Keep-alive pinger: periodic GET against a configured URL so free-tier
//! hosts don't idle the service out. Runs on its own task; a failed ping is
//! logged and never affects request serving.

use std::time::Duration;

pub async fn ping_loop(url: String, tick: Duration) {
    tracing::info!(
        target: "pitchside::keepalive",
        url = %url,
        tick_secs = tick.as_secs(),
        "keep-alive loop started"
    );
    let client = reqwest::Client::new();
    let mut interval = tokio::time::interval(tick);
    loop {
        interval.tick().await;
        if let Err(e) = ping_once(&client, &url).await {
            tracing::warn!(target: "pitchside::keepalive", error = %e, "keep-alive ping failed");
        }
    }
}

async fn ping_once(client: &reqwest::Client, url: &str) -> Result<(), reqwest::Error> {
    let res = client.get(url).send().await?;
    tracing::debug!(target: "pitchside::keepalive", status = %res.status(), "keep-alive ping");
    Ok(())
}
